//! Generator configuration.

/// Import path of the Go package providing `restclient.Client`.
pub const DEFAULT_RUNTIME_IMPORT: &str = "restgen/restclient";

/// First line of every generated file, in the form Go tooling recognizes.
pub const BANNER: &str = "// Code generated by restgen. DO NOT EDIT.";

/// Options controlling how a source unit is lowered to Go.
///
/// ## Examples
///
/// ```
/// use restgen_lib::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_package_name("photos")
///     .with_runtime_import("github.com/acme/api/restclient");
///
/// assert_eq!(config.package_name.as_deref(), Some("photos"));
/// assert_eq!(config.runtime_package(), "restclient");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Package clause for the output; defaults to the input's package.
    pub package_name: Option<String>,
    /// Import path of the client capability package.
    pub runtime_import: String,
    /// Emit the "Code generated" banner.
    pub banner: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: None,
            runtime_import: DEFAULT_RUNTIME_IMPORT.to_string(),
            banner: true,
        }
    }
}

impl GeneratorConfig {
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn with_runtime_import(mut self, runtime_import: impl Into<String>) -> Self {
        self.runtime_import = runtime_import.into();
        self
    }

    pub fn without_banner(mut self) -> Self {
        self.banner = false;
        self
    }

    /// Package identifier the runtime import is referenced by.
    pub fn runtime_package(&self) -> &str {
        self.runtime_import
            .rsplit('/')
            .next()
            .unwrap_or(&self.runtime_import)
    }
}
