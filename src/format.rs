//! Formatting pass over reconstructed output.
//!
//! Reconstructed text is an approximation and frequently not syntactically
//! valid, so every failure here falls back to the unformatted text. Verbatim
//! output never passes through this module.

use std::io::Write as _;
use std::process::{Command, Stdio};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::logging;

/// Semicolon policy handed to the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Semicolons {
    Insert,
    Omit,
}

/// Options for the formatting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub semicolons: Semicolons,
    /// Grammar the formatter should parse the text as.
    pub dialect: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            semicolons: Semicolons::Omit,
            dialect: "babel".to_string(),
        }
    }
}

/// Pipes reconstructed text through an external formatter command.
#[derive(Debug, Clone)]
pub struct CodeFormatter {
    command: String,
    options: FormatOptions,
}

impl CodeFormatter {
    pub fn new(command: impl Into<String>, options: FormatOptions) -> Self {
        Self {
            command: command.into(),
            options,
        }
    }

    /// Format `text`, falling back to it unchanged when the formatter
    /// cannot run or rejects the input.
    pub fn format(&self, text: &str) -> String {
        match self.try_format(text) {
            Ok(formatted) => formatted,
            Err(err) => {
                logging::log_format_fallback(&format!("{:#}", err));
                text.to_string()
            }
        }
    }

    fn try_format(&self, text: &str) -> anyhow::Result<String> {
        let parts = shlex::split(&self.command)
            .filter(|parts| !parts.is_empty())
            .with_context(|| format!("invalid formatter command `{}`", self.command))?;

        let mut cmd = Command::new(&parts[0]);
        cmd.args(&parts[1..]);
        cmd.arg("--parser").arg(&self.options.dialect);
        if self.options.semicolons == Semicolons::Omit {
            cmd.arg("--no-semi");
        }

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn formatter `{}`", parts[0]))?;

        {
            let mut stdin = child.stdin.take().context("formatter stdin unavailable")?;
            stdin
                .write_all(text.as_bytes())
                .context("failed to pipe source to formatter")?;
        }

        let output = child
            .wait_with_output()
            .context("formatter did not run to completion")?;
        if !output.status.success() {
            anyhow::bail!("formatter exited with {}", output.status);
        }

        String::from_utf8(output.stdout).context("formatter produced non-UTF-8 output")
    }
}
