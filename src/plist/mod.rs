//! Property-list conversion via an external converter.
//!
//! String tables staged for packaging must be rewritten to the binary plist
//! encoding, otherwise downstream code signing chokes on them. The conversion
//! itself is delegated to a system tool (`plutil` on macOS); this module
//! models that tool as a narrow capability so pipelines can be tested with a
//! substitute implementation.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::util::ProcessBuilder;

/// Default converter program.
pub const DEFAULT_PROGRAM: &str = "plutil";

/// Error from a property-list conversion attempt.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The converter program could not be located.
    #[error("converter `{program}` not found (install it or set STAGEKIT_PLUTIL)")]
    ToolNotFound { program: String },

    /// The converter could not be spawned or waited on.
    #[error("failed to invoke `{command}`: {message}")]
    Invoke { command: String, message: String },

    /// The converter ran but reported failure.
    #[error("`{command}` exited with code {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Capability interface for rewriting a property list in place.
pub trait PlistConverter {
    /// Rewrite the file at `path` to the binary plist encoding, in place.
    fn convert_to_binary(&self, path: &Path) -> Result<(), ConvertError>;
}

/// Production converter backed by an external program (`plutil` by default).
#[derive(Debug, Clone)]
pub struct Plutil {
    program: PathBuf,
}

impl Plutil {
    /// Locate the default converter program.
    pub fn new() -> Result<Self, ConvertError> {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Locate a specific converter program, by name or path.
    pub fn with_program(program: impl AsRef<str>) -> Result<Self, ConvertError> {
        let program = program.as_ref();
        let resolved =
            crate::util::process::find_executable(program).ok_or(ConvertError::ToolNotFound {
                program: program.to_string(),
            })?;
        Ok(Plutil { program: resolved })
    }

    /// Path of the resolved converter program.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl PlistConverter for Plutil {
    fn convert_to_binary(&self, path: &Path) -> Result<(), ConvertError> {
        let builder = ProcessBuilder::new(&self.program)
            .args(["-convert", "binary1"])
            .arg(path);
        let command = builder.display_command();

        let output = builder.exec().map_err(|e| ConvertError::Invoke {
            command: command.clone(),
            message: format!("{e:#}"),
        })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
