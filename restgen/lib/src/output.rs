//! End-to-end generation and file output.
//!
//! Generation is atomic: the whole file is built and formatted in memory
//! before anything touches the disk, and the write itself goes through a
//! temporary file that is renamed into place.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::codegen::generate_unit;
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::format::Formatter;
use crate::go_source::parse_go_source;
use crate::walker::Walker;

/// Parses Go `source`, walks it, and returns the generated file.
///
/// ## Errors
/// Returns an error if the source does not parse, a spec cannot be lowered,
/// or the formatter fails.
pub fn generate_source(
    source: &str,
    config: &GeneratorConfig,
    formatter: &dyn Formatter,
) -> Result<String, GeneratorError> {
    let unit = parse_go_source(source)?;

    let mut walker = Walker::new(&unit);
    if let Some(package_name) = &config.package_name {
        walker = walker.with_package_name(package_name.clone());
    }
    let parsed = walker.walk();
    tracing::debug!(
        package = %parsed.package_name,
        builders = parsed.specs.len(),
        "Walked source unit"
    );

    let code = generate_unit(&parsed, config)?;
    formatter.format(code)
}

/// Reads `input`, generates, and writes the result to `output`.
///
/// Returns the generated code.
pub fn generate_file(
    input: &Path,
    output: &Path,
    config: &GeneratorConfig,
    formatter: &dyn Formatter,
) -> Result<String, GeneratorError> {
    let source = fs::read_to_string(input).map_err(|e| GeneratorError::Read {
        path: input.display().to_string(),
        source: e,
    })?;

    let code = generate_source(&source, config, formatter)?;
    write_atomic(output, &code)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        "Wrote generated builders"
    );
    Ok(code)
}

/// Writes `content` to `path` via a hidden sibling file and a rename,
/// creating parent directories as needed.
///
/// The sibling is named after the whole file name, so unrelated files next
/// to `path` (`builders.tmp` beside `builders.go`) are never touched.
///
/// ## Errors
/// Returns [`GeneratorError::Write`] if `path` has no file name, or if the
/// directory, the sibling, or the rename fails. A failed rename removes the
/// sibling.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let write_error = |path: &Path, source: io::Error| GeneratorError::Write {
        path: path.display().to_string(),
        source,
    };

    let file_name = path.file_name().ok_or_else(|| {
        write_error(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        )
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    let temp_path = temp_sibling(path, file_name);
    fs::write(&temp_path, content).map_err(|e| write_error(&temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(path, e));
    }
    Ok(())
}

/// `dir/.builders.go.restgen-tmp` for `dir/builders.go`.
fn temp_sibling(path: &Path, file_name: &OsStr) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(file_name);
    name.push(".restgen-tmp");
    path.with_file_name(name)
}
