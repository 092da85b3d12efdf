//! Builder struct, constructor, and fluent setters.

use crate::codegen::go::{GoWriter, Imports, quote, unused_name};
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::source::{MethodDecl, Param};
use crate::spec::{ParamMap, RequestSpec};

/// The six setter shapes, in the order they are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setter {
    Path,
    Query,
    Form,
    Body,
    Header,
    Multipart,
}

impl Setter {
    const ORDER: [Setter; 6] = [
        Setter::Path,
        Setter::Query,
        Setter::Form,
        Setter::Body,
        Setter::Header,
        Setter::Multipart,
    ];

    fn entries<'s, 'unit>(self, spec: &'s RequestSpec<'unit>) -> &'s ParamMap<'unit> {
        match self {
            Self::Path => &spec.path_substitutions,
            Self::Query => &spec.query_params,
            Self::Form => &spec.post_form_params,
            Self::Body => &spec.post_params,
            Self::Header => &spec.header_params,
            Self::Multipart => &spec.post_multipart_params,
        }
    }

    /// The statement storing `arg` under `key` on `receiver`.
    fn store(self, receiver: &str, key: &str, arg: &Param, imports: &mut Imports) -> String {
        let key = quote(key);
        match self {
            Self::Path => format!(
                "{receiver}.pathSubstitutions[{key}] = {}",
                stringify(arg, imports)
            ),
            Self::Query => format!(
                "{receiver}.queryParams.Add({key}, {})",
                stringify(arg, imports)
            ),
            Self::Form => format!(
                "{receiver}.postFormParams.Add({key}, {})",
                stringify(arg, imports)
            ),
            Self::Body => format!("{receiver}.postBody = {}", arg.name),
            Self::Header => format!(
                "{receiver}.headerParams[{key}] = {}",
                stringify(arg, imports)
            ),
            Self::Multipart => format!(
                "{receiver}.postMultiPartParams[{key}] = {}",
                payload(arg, imports)
            ),
        }
    }
}

/// Textual arguments pass through; anything else goes through `%v`.
fn stringify(arg: &Param, imports: &mut Imports) -> String {
    if arg.is_textual() {
        arg.name.clone()
    } else {
        imports.std("fmt");
        format!("fmt.Sprintf(\"%v\", {})", arg.name)
    }
}

fn payload(arg: &Param, imports: &mut Imports) -> String {
    if arg.is_bytes() {
        arg.name.clone()
    } else if arg.is_textual() {
        format!("[]byte({})", arg.name)
    } else {
        imports.std("fmt");
        format!("[]byte(fmt.Sprintf(\"%v\", {}))", arg.name)
    }
}

/// The implementation struct holding accumulated parameters.
pub fn emit_struct(
    spec: &RequestSpec<'_>,
    config: &GeneratorConfig,
    imports: &mut Imports,
    out: &mut GoWriter,
) {
    imports.std("net/url");
    imports.runtime(&config.runtime_import);

    out.line(0, format!("type {} struct {{", spec.impl_type()));
    out.aligned(
        1,
        &[
            field("client", format!("{}.Client", config.runtime_package())),
            field("pathSubstitutions", "map[string]string"),
            field("queryParams", "url.Values"),
            field("postFormParams", "url.Values"),
            field("postBody", "interface{}"),
            field("postMultiPartParams", "map[string][]byte"),
            field("headerParams", "map[string]string"),
        ],
    );
    out.line(0, "}");
}

/// `New<RequestType>(client)` returning the interface type.
pub fn emit_constructor(spec: &RequestSpec<'_>, config: &GeneratorConfig, out: &mut GoWriter) {
    out.line(
        0,
        format!(
            "func New{}(client {}.Client) {} {{",
            spec.request_type,
            config.runtime_package(),
            spec.request_type
        ),
    );
    out.line(1, format!("return &{}{{", spec.impl_type()));
    out.aligned(
        2,
        &[
            field("client:", "client,"),
            field("pathSubstitutions:", "make(map[string]string),"),
            field("queryParams:", "url.Values{},"),
            field("postFormParams:", "url.Values{},"),
            field("postMultiPartParams:", "make(map[string][]byte),"),
            field("headerParams:", "make(map[string]string),"),
        ],
    );
    out.line(1, "}");
    out.line(0, "}");
}

/// One chaining setter per recorded parameter method.
///
/// ## Errors
/// Returns [`GeneratorError::MissingArgument`] if a parameter method declares
/// no parameters.
pub fn emit_setters(
    spec: &RequestSpec<'_>,
    imports: &mut Imports,
    out: &mut GoWriter,
) -> Result<(), GeneratorError> {
    for setter in Setter::ORDER {
        for (key, method) in setter.entries(spec) {
            emit_setter(spec, setter, key, method, imports, out)?;
        }
    }
    Ok(())
}

fn emit_setter(
    spec: &RequestSpec<'_>,
    setter: Setter,
    key: &str,
    method: &MethodDecl,
    imports: &mut Imports,
    out: &mut GoWriter,
) -> Result<(), GeneratorError> {
    let arg = method
        .first_param()
        .ok_or_else(|| GeneratorError::MissingArgument {
            request_type: spec.request_type.clone(),
            method: method.name.clone(),
        })?;

    let taken: Vec<&str> = method.params.iter().map(|p| p.name.as_str()).collect();
    let receiver = unused_name("b", &taken);

    out.blank();
    out.line(
        0,
        format!(
            "func ({receiver} *{}) {}({}) {} {{",
            spec.impl_type(),
            method.name,
            method.params_list(),
            spec.request_type
        ),
    );
    out.line(1, setter.store(&receiver, key, arg, imports));
    out.line(1, format!("return {receiver}"));
    out.line(0, "}");
    Ok(())
}

fn field(name: &str, value: impl Into<String>) -> (String, String) {
    (name.to_string(), value.into())
}
