//! Versioned, reversible SQL migrations.

pub mod file;
pub mod planner;
pub mod runner;

pub use file::{load_dir, parse_revision, Revision};
pub use planner::plan;
pub use runner::{downgrade, new_revision, status, upgrade, RevisionStatus};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_shipped_migrations_form_one_chain() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
        let planned = plan(load_dir(&dir).unwrap()).unwrap();
        let ids: Vec<&str> = planned.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a1c3e5f7b901", "b2d4f6a8c012", "c3e5a7b9d123", "d4f6b8c0e234"]);
        assert!(planned.iter().all(|r| r.upgrade.starts_with("CREATE TABLE") && r.downgrade.starts_with("DROP TABLE")));
    }
}
