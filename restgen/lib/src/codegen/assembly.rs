//! Path substitution and request assembly.
//!
//! Assembly is lowered per HTTP method at generation time. Methods that carry
//! a body get the content negotiation chain in [`ContentKind::PRECEDENCE`]
//! order; the others append the query string instead.

use strum::Display;

use crate::codegen::go::{GoWriter, Imports, quote};
use crate::spec::RequestSpec;

/// Request body encodings, tested in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ContentKind {
    Json,
    Form,
    Multipart,
}

impl ContentKind {
    /// A JSON body wins over form fields, form fields over multipart parts.
    pub const PRECEDENCE: [ContentKind; 3] =
        [ContentKind::Json, ContentKind::Form, ContentKind::Multipart];

    /// Go condition selecting this encoding.
    pub fn condition(self) -> &'static str {
        match self {
            Self::Json => "b.postBody != nil",
            Self::Form => "len(b.postFormParams) > 0",
            Self::Multipart => "len(b.postMultiPartParams) > 0",
        }
    }

    /// Go expression for the Content-Type header value.
    pub fn content_type_expr(self) -> &'static str {
        match self {
            Self::Json => "\"application/json\"",
            Self::Form => "\"application/x-www-form-urlencoded\"",
            Self::Multipart => "writer.FormDataContentType()",
        }
    }

    fn imports(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["bytes", "encoding/json"],
            Self::Form => &["strings"],
            Self::Multipart => &["bytes", "mime/multipart"],
        }
    }

    /// Statements assigning `body`, at `indent`.
    fn emit_body(self, indent: usize, out: &mut GoWriter) {
        match self {
            Self::Json => {
                out.line(indent, "payload, err := json.Marshal(b.postBody)");
                emit_bail(indent, out);
                out.line(indent, "body = bytes.NewReader(payload)");
            }
            Self::Form => {
                out.line(indent, "body = strings.NewReader(b.postFormParams.Encode())");
            }
            Self::Multipart => {
                out.line(indent, "buffer := &bytes.Buffer{}");
                out.line(indent, "writer := multipart.NewWriter(buffer)");
                out.line(indent, "for key, value := range b.postMultiPartParams {");
                out.line(
                    indent + 1,
                    "if err := writer.WriteField(key, string(value)); err != nil {",
                );
                out.line(indent + 2, "return nil, err");
                out.line(indent + 1, "}");
                out.line(indent, "}");
                out.line(indent, "if err := writer.Close(); err != nil {");
                out.line(indent + 1, "return nil, err");
                out.line(indent, "}");
                out.line(indent, "body = buffer");
            }
        }
        out.line(indent, format!("contentType = {}", self.content_type_expr()));
    }
}

fn emit_bail(indent: usize, out: &mut GoWriter) {
    out.line(indent, "if err != nil {");
    out.line(indent + 1, "return nil, err");
    out.line(indent, "}");
}

/// `applyPathSubstitutions`: replaces every `{key}` with its stored value.
pub fn emit_path_substitution(spec: &RequestSpec<'_>, imports: &mut Imports, out: &mut GoWriter) {
    imports.std("strings");

    out.line(
        0,
        format!(
            "func (b *{}) applyPathSubstitutions(api string) string {{",
            spec.impl_type()
        ),
    );
    out.line(1, "for key, value := range b.pathSubstitutions {");
    out.line(2, "api = strings.Replace(api, \"{\"+key+\"}\", value, -1)");
    out.line(1, "}");
    out.line(1, "return api");
    out.line(0, "}");
}

/// `build()`: assembles the `*http.Request` for this endpoint.
pub fn emit_build(spec: &RequestSpec<'_>, imports: &mut Imports, out: &mut GoWriter) {
    imports.std("fmt");
    imports.std("net/http");

    let method = quote(&spec.http_method.to_string());
    out.line(
        0,
        format!("func (b *{}) build() (*http.Request, error) {{", spec.impl_type()),
    );
    out.line(1, "if b.client == nil {");
    out.line(
        2,
        format!(
            "return nil, fmt.Errorf({})",
            quote(&format!("{}: no client configured", spec.request_type))
        ),
    );
    out.line(1, "}");
    out.line(
        1,
        format!(
            "endpoint := b.client.BaseURL() + b.applyPathSubstitutions({})",
            quote(&spec.api_endpoint)
        ),
    );

    if spec.http_method.carries_body() {
        // Body negotiation: the first non-empty source wins.
        imports.std("io");
        out.line(1, "var body io.Reader");
        out.line(1, "contentType := \"\"");
        for (idx, kind) in ContentKind::PRECEDENCE.into_iter().enumerate() {
            for &path in kind.imports() {
                imports.std(path);
            }
            let opener = if idx == 0 { "if" } else { "} else if" };
            out.line(1, format!("{opener} {} {{", kind.condition()));
            kind.emit_body(2, out);
        }
        out.line(1, "}");
        out.line(
            1,
            format!("req, err := http.NewRequest({method}, endpoint, body)"),
        );
        emit_bail(1, out);
        out.line(1, "if contentType != \"\" {");
        out.line(2, "req.Header.Set(\"Content-Type\", contentType)");
        out.line(1, "}");
    } else {
        // Query string only, no body.
        out.line(
            1,
            format!("req, err := http.NewRequest({method}, endpoint, nil)"),
        );
        emit_bail(1, out);
        out.line(1, "if len(b.queryParams) > 0 {");
        out.line(2, "req.URL.RawQuery = b.queryParams.Encode()");
        out.line(1, "}");
    }

    // Headers, then Accept, which a header setter cannot override.
    out.line(1, "for key, value := range b.headerParams {");
    out.line(2, "req.Header.Set(key, value)");
    out.line(1, "}");
    out.line(1, "req.Header.Set(\"Accept\", \"application/json\")");
    out.line(1, "return req, nil");
    out.line(0, "}");
}
