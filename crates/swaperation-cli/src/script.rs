//! Driver scripts for `play`.
//!
//! One command per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! swap 0 2     # exchange physical qubits 0 and 2
//! next         # commit the pending gate
//! restart      # start over, keeping the best score
//! ```

use std::fmt;

use anyhow::{Result, bail};

/// One driver request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    Swap(u32, u32),
    Next,
    Restart,
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptCommand::Swap(x, y) => write!(f, "swap {x} {y}"),
            ScriptCommand::Next => write!(f, "next"),
            ScriptCommand::Restart => write!(f, "restart"),
        }
    }
}

/// A command with its 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

/// Parse a whole script.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>> {
    let mut out = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        let words: Vec<&str> = text.split_whitespace().collect();
        let command = match words.as_slice() {
            ["swap", x, y] => {
                let parse = |w: &str| {
                    w.parse::<u32>()
                        .map_err(|_| anyhow::anyhow!("line {line}: invalid qubit index '{w}'"))
                };
                ScriptCommand::Swap(parse(*x)?, parse(*y)?)
            }
            ["next"] | ["n"] => ScriptCommand::Next,
            ["restart"] => ScriptCommand::Restart,
            _ => bail!("line {line}: unknown command '{text}' (expected: swap X Y, next, restart)"),
        };
        out.push(ScriptLine { line, command });
    }
    Ok(out)
}
