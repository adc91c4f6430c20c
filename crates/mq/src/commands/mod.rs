//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Resolve a quiz file argument: a name without extension means `.xml`.
pub(crate) fn resolve_input(file: &Path) -> Result<PathBuf, CliError> {
    let path = if file.extension().is_none() {
        file.with_extension("xml")
    } else {
        file.to_path_buf()
    };
    if !path.is_file() {
        return Err(CliError::Validation(format!(
            "Cannot read file {}",
            path.display()
        )));
    }
    Ok(path)
}
