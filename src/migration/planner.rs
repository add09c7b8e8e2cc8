//! Orders revisions into a single linear chain.

use super::file::Revision;
use crate::error::MigrationError;
use std::collections::{HashMap, HashSet};

/// Root first, head last. Fails on duplicate ids, unknown parents, branches, several roots or
/// revisions unreachable from the root.
pub fn plan(revisions: Vec<Revision>) -> Result<Vec<Revision>, MigrationError> {
    if revisions.is_empty() {
        return Ok(revisions);
    }
    let mut ids = HashSet::new();
    for rev in &revisions {
        if !ids.insert(rev.id.clone()) {
            return Err(MigrationError::Chain(format!("duplicate revision {}", rev.id)));
        }
    }
    let mut child_of: HashMap<Option<String>, usize> = HashMap::new();
    for (i, rev) in revisions.iter().enumerate() {
        if let Some(parent) = &rev.revises {
            if !ids.contains(parent) {
                return Err(MigrationError::Chain(format!(
                    "revision {} revises unknown revision {}",
                    rev.id, parent
                )));
            }
        }
        if let Some(other) = child_of.insert(rev.revises.clone(), i) {
            let what = match &rev.revises {
                Some(p) => format!("revisions {} and {} both revise {}", revisions[other].id, rev.id, p),
                None => format!("multiple root revisions: {} and {}", revisions[other].id, rev.id),
            };
            return Err(MigrationError::Chain(what));
        }
    }
    let mut slots: Vec<Option<Revision>> = revisions.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());
    let mut parent: Option<String> = None;
    while let Some(&i) = child_of.get(&parent) {
        let Some(rev) = slots[i].take() else { break };
        parent = Some(rev.id.clone());
        ordered.push(rev);
    }
    if ordered.is_empty() {
        return Err(MigrationError::Chain("no root revision".into()));
    }
    if ordered.len() != slots.len() {
        return Err(MigrationError::Chain("revisions not reachable from the root".into()));
    }
    Ok(ordered)
}

/// Last revision of a planned chain.
pub fn head(planned: &[Revision]) -> Option<&str> {
    planned.last().map(|r| r.id.as_str())
}
