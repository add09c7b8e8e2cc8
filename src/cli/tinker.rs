//! `swx tinker`: SQL console against the configured database.

use super::db::connect_ready;
use crate::config::Settings;
use crate::service::crud::row_to_json;
use serde_json::Value;
use sqlx::PgPool;
use std::io::{IsTerminal, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Collects input lines into statements. A statement ends with `;` or a blank line.
#[derive(Debug, Default)]
pub struct StatementBuffer {
    buf: String,
}

impl StatementBuffer {
    pub fn push(&mut self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return self.take();
        }
        if !self.buf.is_empty() {
            self.buf.push('\n');
        }
        self.buf.push_str(line.trim_end());
        if trimmed.ends_with(';') {
            return self.take();
        }
        None
    }

    /// Whatever is left, e.g. at end of input.
    pub fn take(&mut self) -> Option<String> {
        let stmt = std::mem::take(&mut self.buf);
        let stmt = stmt.trim().trim_end_matches(';').trim();
        (!stmt.is_empty()).then(|| stmt.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

pub fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "\\q" | "exit" | "quit")
}

async fn execute(pool: &PgPool, sql: &str) -> Result<Vec<Value>, sqlx::Error> {
    let rows = sqlx::query(sql).fetch_all(pool).await?;
    Ok(rows.iter().map(row_to_json).collect())
}

fn prompt(continuation: bool) {
    print!("{}", if continuation { "...> " } else { "swx> " });
    let _ = std::io::stdout().flush();
}

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let pool = connect_ready(&settings).await?;
    let interactive = std::io::stdin().is_terminal();
    if interactive {
        println!("swX SQL console ({}). End statements with ';'. \\q to quit.", settings.db_name);
        prompt(false);
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut buffer = StatementBuffer::default();
    let mut failed = false;
    while let Some(line) = lines.next_line().await? {
        if buffer.is_empty() && is_quit(&line) {
            break;
        }
        if let Some(stmt) = buffer.push(&line) {
            failed |= !run_statement(&pool, &stmt).await;
        }
        if interactive {
            prompt(!buffer.is_empty());
        }
    }
    if let Some(stmt) = buffer.take() {
        failed |= !run_statement(&pool, &stmt).await;
    }
    pool.close().await;
    if failed && !interactive {
        anyhow::bail!("one or more statements failed");
    }
    Ok(())
}

async fn run_statement(pool: &PgPool, stmt: &str) -> bool {
    match execute(pool, stmt).await {
        Ok(rows) => {
            for row in &rows {
                println!("{}", serde_json::to_string_pretty(row).unwrap_or_default());
            }
            println!("({} rows)", rows.len());
            true
        }
        Err(e) => {
            eprintln!("error: {}", e);
            false
        }
    }
}
