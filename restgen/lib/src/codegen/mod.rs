//! Lowering of [`RequestSpec`]s to Go source.
//!
//! Every builder is emitted as a fixed sequence of fragments:
//!
//! 1. the callback interface, when the spec declares an async method
//! 2. the `<RequestType>Impl` struct and its `New<RequestType>` constructor
//! 3. one setter per recorded parameter method
//! 4. `applyPathSubstitutions` and `build`
//! 5. the sync and async wrappers, each when declared
//!
//! Fragments register the imports they use, so the import block of the
//! assembled file lists exactly what the code references.

mod assembly;
mod builder;
mod dispatch;
pub mod go;

pub use assembly::ContentKind;

use crate::config::{BANNER, GeneratorConfig};
use crate::endpoint::unmatched_tokens;
use crate::error::GeneratorError;
use crate::spec::{ParsedUnit, RequestSpec};
use go::{GoWriter, Imports};

/// Generates one Go file holding a builder for every spec in `parsed`.
///
/// The output is a pure function of its inputs: generating twice from the
/// same unit yields identical text.
///
/// ## Errors
/// - [`GeneratorError::MissingPackage`] if neither the unit nor `config`
///   provides a package name.
/// - [`GeneratorError::MissingArgument`] and
///   [`GeneratorError::AsyncWithoutSync`] for specs that cannot be lowered.
///
/// ## Examples
///
/// ```
/// use restgen_lib::{GeneratorConfig, ParsedUnit, generate_unit};
///
/// let parsed = ParsedUnit {
///     package_name: "photos".to_string(),
///     specs: vec![],
/// };
/// let code = generate_unit(&parsed, &GeneratorConfig::default().without_banner()).unwrap();
/// assert_eq!(code, "package photos\n");
/// ```
pub fn generate_unit(
    parsed: &ParsedUnit<'_>,
    config: &GeneratorConfig,
) -> Result<String, GeneratorError> {
    let package = config
        .package_name
        .as_deref()
        .unwrap_or(&parsed.package_name);
    if package.is_empty() {
        return Err(GeneratorError::MissingPackage);
    }

    let mut imports = Imports::new();
    let mut builders = GoWriter::new();
    for spec in &parsed.specs {
        builders.blank();
        generate_builder(spec, config, &mut imports, &mut builders)?;
    }

    let mut out = GoWriter::new();
    if config.banner {
        out.line(0, BANNER);
        out.blank();
    }
    out.line(0, format!("package {package}"));
    if !imports.is_empty() {
        out.blank();
        imports.render(&mut out);
    }

    let mut code = out.finish();
    code.push_str(&builders.finish());
    Ok(code)
}

/// Emits one builder into `out`, registering its imports.
pub fn generate_builder(
    spec: &RequestSpec<'_>,
    config: &GeneratorConfig,
    imports: &mut Imports,
    out: &mut GoWriter,
) -> Result<(), GeneratorError> {
    dispatch::check(spec)?;

    let keys: Vec<&String> = spec.path_substitutions.keys().collect();
    for token in unmatched_tokens(&spec.api_endpoint, &keys) {
        tracing::warn!(
            request_type = %spec.request_type,
            endpoint = %spec.api_endpoint,
            token,
            "No PATH annotation for endpoint token, it will be sent verbatim"
        );
    }

    if spec.has_async() {
        dispatch::emit_callback(spec, out);
        out.blank();
    }
    builder::emit_struct(spec, config, imports, out);
    out.blank();
    builder::emit_constructor(spec, config, out);
    builder::emit_setters(spec, imports, out)?;
    out.blank();
    assembly::emit_path_substitution(spec, imports, out);
    out.blank();
    assembly::emit_build(spec, imports, out);
    dispatch::emit_wrappers(spec, config, imports, out)?;

    tracing::info!(
        request_type = %spec.request_type,
        method = %spec.http_method,
        endpoint = %spec.api_endpoint,
        "Generated request builder"
    );
    Ok(())
}
