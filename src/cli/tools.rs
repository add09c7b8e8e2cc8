//! `swx format` / `swx lint`: thin wrappers around cargo.

use std::process::Command;

fn cargo(args: &[&str], what: &str) -> anyhow::Result<()> {
    println!("Running cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if status.success() {
        println!("{} passed", what);
        Ok(())
    } else {
        anyhow::bail!("{} failed ({})", what, status)
    }
}

pub fn format() -> anyhow::Result<()> {
    cargo(&["fmt", "--all"], "format")
}

pub fn lint() -> anyhow::Result<()> {
    cargo(&["clippy", "--all-targets", "--", "-D", "warnings"], "lint")
}
