//! Serial execution of a JSON-lines command script.
//!
//! Each command runs to completion before the next line is read. A rejected
//! command is reported and the run continues; a line that is not a valid
//! command aborts the run.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use lpledger_core::ledger::{LedgerEvent, LpLedger};
use serde::Serialize;
use tracing::debug;

use crate::command::{Command, QueryResult, Response};

/// Result line written for each executed command.
#[derive(Debug, Serialize)]
pub struct Outcome {
    /// 1-based line number in the script.
    pub line: usize,
    /// What happened.
    #[serde(flatten)]
    pub status: Status,
}

/// Status of an executed command.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    /// A mutation was applied.
    Applied {
        /// The applied change.
        event: LedgerEvent,
    },
    /// A query was answered.
    Answered {
        /// The query result.
        result: QueryResult,
    },
    /// The ledger refused the call; nothing changed.
    Rejected {
        /// Stable error code.
        code: &'static str,
        /// Human-readable reason.
        message: String,
    },
}

/// Counts over a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Mutations applied.
    pub applied: usize,
    /// Queries answered.
    pub answered: usize,
    /// Calls rejected by the ledger.
    pub rejected: usize,
}

/// Executes every command in `input` against `ledger`, writing one JSON
/// [`Outcome`] per command to `output`.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Fails on I/O errors and on the first line that is not a valid command.
pub fn run<R: BufRead, W: Write>(ledger: &mut LpLedger, input: R, mut output: W) -> Result<Summary> {
    let mut summary = Summary::default();

    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {number}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command: Command = serde_json::from_str(trimmed)
            .with_context(|| format!("Invalid command on line {number}"))?;
        if command.is_query() {
            debug!(line = number, ?command, "Answering query");
        } else {
            debug!(line = number, ?command, "Applying mutation");
        }

        let status = match command.execute(ledger) {
            Ok(Response::Event(event)) => {
                summary.applied += 1;
                Status::Applied { event }
            }
            Ok(Response::Query(result)) => {
                summary.answered += 1;
                Status::Answered { result }
            }
            Err(err) => {
                summary.rejected += 1;
                Status::Rejected {
                    code: err.error_code(),
                    message: err.to_string(),
                }
            }
        };

        let outcome = Outcome {
            line: number,
            status,
        };
        serde_json::to_writer(&mut output, &outcome)
            .with_context(|| format!("Failed to write outcome for line {number}"))?;
        writeln!(output)?;
    }

    output.flush()?;
    Ok(summary)
}
