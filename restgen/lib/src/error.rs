//! Error types for the generator.

use thiserror::Error;

/// Errors that can occur while parsing, generating, or writing.
///
/// Missing or unrecognized annotations are not errors; the affected
/// declaration or method is skipped instead.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The input is not syntactically valid Go.
    #[error("Failed to parse source at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// No package clause and no package override.
    #[error("Source has no package clause and no package name was configured")]
    MissingPackage,

    /// A setter or async method needs an argument but declares none.
    #[error("Method '{method}' of '{request_type}' must declare at least one parameter")]
    MissingArgument {
        request_type: String,
        method: String,
    },

    /// The async wrapper delegates to the sync method, which is absent.
    #[error("'{request_type}' declares an @ASYNC method but no @SYNC method to run it")]
    AsyncWithoutSync { request_type: String },

    /// The external formatter rejected the generated code.
    #[error("Formatting generated code failed: {message}")]
    Format { message: String },

    /// Failed to read an input file.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
