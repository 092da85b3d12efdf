//! Post-processing of generated text.
//!
//! The generator already emits gofmt-shaped code; [`Gofmt`] is for callers
//! that want the canonical toolchain output byte for byte.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::GeneratorError;

/// Turns generated text into its final form.
pub trait Formatter {
    fn format(&self, code: String) -> Result<String, GeneratorError>;
}

/// Returns the code unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl Formatter for Verbatim {
    fn format(&self, code: String) -> Result<String, GeneratorError> {
        Ok(code)
    }
}

/// Pipes the code through an external `gofmt` binary.
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: String,
}

impl Default for Gofmt {
    fn default() -> Self {
        Self {
            program: "gofmt".to_string(),
        }
    }
}

impl Gofmt {
    /// Uses `program` instead of `gofmt` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Formatter for Gofmt {
    fn format(&self, code: String) -> Result<String, GeneratorError> {
        let failed = |message: String| GeneratorError::Format { message };

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("could not start '{}': {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| failed("stdin of the formatter is not available".to_string()))?;
        stdin
            .write_all(code.as_bytes())
            .map_err(|e| failed(format!("could not write to '{}': {e}", self.program)))?;
        // EOF
        drop(stdin);

        let output = child
            .wait_with_output()
            .map_err(|e| failed(format!("'{}' did not finish: {e}", self.program)))?;

        if !output.status.success() {
            return Err(failed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| failed(format!("'{}' produced invalid UTF-8: {e}", self.program)))
    }
}
