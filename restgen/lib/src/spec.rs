//! The request specification: the intermediate representation between the
//! declaration walk and code generation.
//!
//! A [`RequestSpec`] borrows its methods from the [`SourceUnit`] it was
//! derived from, so the unit must outlive code generation.
//!
//! [`SourceUnit`]: crate::source::SourceUnit

use std::collections::BTreeMap;

use strum::{Display, EnumIter, EnumString};

use crate::source::MethodDecl;

/// HTTP methods an endpoint can be declared with.
///
/// `POST_FORM` is accepted by the annotation filter but never reaches this
/// type: it is canonicalized to [`HttpMethod::Post`] during extraction.
///
/// ```
/// use std::str::FromStr;
/// use restgen_lib::HttpMethod;
///
/// assert_eq!(HttpMethod::from_str("DELETE").unwrap(), HttpMethod::Delete);
/// assert_eq!(HttpMethod::Head.to_string(), "HEAD");
/// assert!(HttpMethod::from_str("get").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl HttpMethod {
    /// POST and PUT carry a negotiated body; the rest carry a query string.
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

/// The category a method annotation routes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ParamKind {
    /// `{name}` substitution in the endpoint template.
    Path,
    /// Query string parameter.
    Query,
    /// URL-encoded form field.
    Field,
    /// Request header.
    Header,
    /// Multipart form part.
    Part,
    /// Blocking execution method; the value names the response type.
    Sync,
    /// Callback execution method; the value names the callback type.
    Async,
}

/// Parameter methods keyed by annotation value.
///
/// Ordered so generated output does not depend on declaration order of
/// unrelated methods. Inserting an existing key replaces the earlier method.
pub type ParamMap<'unit> = BTreeMap<String, &'unit MethodDecl>;

/// Everything needed to generate one request builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec<'unit> {
    pub package_name: String,
    /// Name of the annotated interface, e.g. `GetPhotoRequestBuilder`.
    pub request_type: String,
    /// Endpoint template with optional `{name}` tokens.
    pub api_endpoint: String,
    pub http_method: HttpMethod,
    pub path_substitutions: ParamMap<'unit>,
    pub query_params: ParamMap<'unit>,
    pub post_form_params: ParamMap<'unit>,
    pub post_multipart_params: ParamMap<'unit>,
    /// Methods whose single argument becomes the JSON body.
    pub post_params: ParamMap<'unit>,
    pub header_params: ParamMap<'unit>,
    pub sync_response: Option<&'unit MethodDecl>,
    pub async_response: Option<&'unit MethodDecl>,
    pub callback_type: String,
    pub response_type: String,
}

impl<'unit> RequestSpec<'unit> {
    /// Creates a spec with no parameters yet.
    pub fn new(
        package_name: impl Into<String>,
        request_type: impl Into<String>,
        http_method: HttpMethod,
        api_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            request_type: request_type.into(),
            api_endpoint: api_endpoint.into(),
            http_method,
            path_substitutions: ParamMap::new(),
            query_params: ParamMap::new(),
            post_form_params: ParamMap::new(),
            post_multipart_params: ParamMap::new(),
            post_params: ParamMap::new(),
            header_params: ParamMap::new(),
            sync_response: None,
            async_response: None,
            callback_type: String::new(),
            response_type: String::new(),
        }
    }

    /// Routes `method` into the slot for `kind`.
    ///
    /// For map categories `value` is the key; for SYNC/ASYNC it names the
    /// response or callback type. A SYNC/ASYNC method with an empty type name
    /// is dropped, so a recorded execution method always has its type.
    pub fn record(&mut self, kind: ParamKind, value: &str, method: &'unit MethodDecl) {
        if matches!(kind, ParamKind::Sync | ParamKind::Async) && value.is_empty() {
            tracing::debug!(
                request_type = %self.request_type,
                method = %method.name,
                annotation = %kind,
                "Execution annotation names no type, method excluded"
            );
            return;
        }

        let slot = match kind {
            ParamKind::Path => &mut self.path_substitutions,
            ParamKind::Query => &mut self.query_params,
            ParamKind::Field => &mut self.post_form_params,
            ParamKind::Header => &mut self.header_params,
            ParamKind::Part => &mut self.post_multipart_params,
            ParamKind::Sync => {
                self.sync_response = Some(method);
                self.response_type = value.to_string();
                return;
            }
            ParamKind::Async => {
                self.async_response = Some(method);
                self.callback_type = value.to_string();
                return;
            }
        };

        if let Some(previous) = slot.insert(value.to_string(), method) {
            tracing::debug!(
                request_type = %self.request_type,
                key = value,
                replaced = %previous.name,
                by = %method.name,
                "Duplicate annotation value, keeping the later method"
            );
        }
    }

    /// Whether the callback type and async wrapper will be emitted.
    pub fn has_async(&self) -> bool {
        self.async_response.is_some() && !self.callback_type.is_empty()
    }

    /// Whether the blocking execution method will be emitted.
    pub fn has_sync(&self) -> bool {
        self.sync_response.is_some() && !self.response_type.is_empty()
    }

    /// Name of the generated implementation struct.
    pub fn impl_type(&self) -> String {
        format!("{}Impl", self.request_type)
    }
}

/// The result of walking one source unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUnit<'unit> {
    pub package_name: String,
    /// One spec per annotated interface, in declaration order.
    pub specs: Vec<RequestSpec<'unit>>,
}

impl ParsedUnit<'_> {
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::source::{MethodDecl, Param};

    fn method(name: &str) -> MethodDecl {
        MethodDecl::new(name, vec![Param::new("v", "string")])
    }

    #[test]
    fn only_post_and_put_carry_a_body() {
        let with_body: Vec<_> = HttpMethod::iter().filter(|m| m.carries_body()).collect();
        assert_eq!(with_body, vec![HttpMethod::Post, HttpMethod::Put]);
    }

    #[test]
    fn record_routes_by_kind() {
        let path = method("PhotoID");
        let query = method("ImageSize");
        let run = MethodDecl::new("Run", vec![]);
        let mut spec = RequestSpec::new("photos", "GetPhoto", HttpMethod::Get, "/photos/{id}");

        spec.record(ParamKind::Path, "id", &path);
        spec.record(ParamKind::Query, "image_size", &query);
        spec.record(ParamKind::Sync, "PhotoResponse", &run);

        assert_eq!(spec.path_substitutions["id"].name, "PhotoID");
        assert_eq!(spec.query_params["image_size"].name, "ImageSize");
        assert_eq!(spec.sync_response.map(|m| m.name.as_str()), Some("Run"));
        assert_eq!(spec.response_type, "PhotoResponse");
        assert!(spec.has_sync());
        assert!(!spec.has_async());
    }

    #[test]
    fn later_duplicate_key_wins() {
        let first = method("First");
        let second = method("Second");
        let mut spec = RequestSpec::new("p", "R", HttpMethod::Get, "/{id}");

        spec.record(ParamKind::Path, "id", &first);
        spec.record(ParamKind::Path, "id", &second);

        assert_eq!(spec.path_substitutions.len(), 1);
        assert_eq!(spec.path_substitutions["id"].name, "Second");
    }

    #[test]
    fn execution_method_without_type_name_is_dropped() {
        let run = MethodDecl::new("Run", vec![]);
        let run_async = MethodDecl::new("RunAsync", vec![Param::new("cb", "Callback")]);
        let mut spec = RequestSpec::new("p", "R", HttpMethod::Get, "/r");

        spec.record(ParamKind::Sync, "", &run);
        spec.record(ParamKind::Async, "", &run_async);

        assert!(spec.sync_response.is_none());
        assert!(spec.response_type.is_empty());
        assert!(spec.async_response.is_none());
        assert!(spec.callback_type.is_empty());
    }

    #[test]
    fn impl_type_appends_suffix() {
        let spec = RequestSpec::new("p", "UploadRequest", HttpMethod::Put, "/u");
        assert_eq!(spec.impl_type(), "UploadRequestImpl");
    }
}
