//! `swx make ...`

use super::{MakeArgs, MakeWhat};
use crate::scaffold::{parse_columns, Component, Report, Scaffolder};

pub fn run(what: MakeWhat) -> anyhow::Result<()> {
    let (component, args) = match what {
        MakeWhat::Model(a) => (Some(Component::Model), a),
        MakeWhat::Controller(a) => (Some(Component::Controller), a),
        MakeWhat::Service(a) => (Some(Component::Service), a),
        MakeWhat::Repository(a) => (Some(Component::Repository), a),
        MakeWhat::Route(a) => (Some(Component::Route), a),
        MakeWhat::Resource(a) => (None, a),
        MakeWhat::Migration(a) => {
            let columns = parse_columns(&a.columns)?;
            let path = scaffolder(&a).make_migration(&a.name, &columns)?;
            println!("Created migration {}", path.display());
            return Ok(());
        }
    };
    let columns = parse_columns(&args.columns)?;
    let s = scaffolder(&args);
    let report = match component {
        Some(c) => {
            let mut report = Report::default();
            s.make(c, &args.name, &columns, &mut report)?;
            report
        }
        None => s.make_resource(&args.name, &columns, args.migration)?,
    };
    print!("{}", summary(&report));
    Ok(())
}

fn scaffolder(args: &MakeArgs) -> Scaffolder {
    Scaffolder::new(&args.root, &args.migrations_dir)
}

fn summary(report: &Report) -> String {
    let mut out = String::new();
    for p in &report.created {
        out.push_str(&format!("Created {}\n", p.display()));
    }
    for p in &report.skipped {
        out.push_str(&format!("Skipped (already exists) {}\n", p.display()));
    }
    if let Some(p) = &report.migration {
        out.push_str(&format!("Created migration {}\n", p.display()));
    }
    out
}
