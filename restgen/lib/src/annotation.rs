//! Annotation extraction from single comment lines.
//!
//! An annotation has the shape `@KEY("value")`. It is matched anywhere in
//! the line, so the comment marker (`//`, `/*`) can be left in place:
//!
//! ```
//! use restgen_lib::annotation::{extract_http_annotation, extract_request_annotation};
//!
//! let http = extract_http_annotation(r#"// @GET("/photos/{id}")"#).unwrap();
//! assert_eq!(http.key, "GET");
//! assert_eq!(http.value, "/photos/{id}");
//!
//! let param = extract_request_annotation(r#"// @PATH("id")"#).unwrap();
//! assert_eq!(param.key, "PATH");
//!
//! // HTTP keys are not parameter keys, and vice versa.
//! assert!(extract_request_annotation(r#"// @GET("/photos")"#).is_none());
//! ```

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::spec::{HttpMethod, ParamKind};

/// `@` + ASCII word key + `("` + greedy value + `")`.
static ANNOTATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@([A-Za-z0-9_]+)\("(.*)"\)"#).expect("annotation pattern is valid")
});

/// Key accepted by the HTTP filter that lowers to plain POST.
const POST_FORM: &str = "POST_FORM";

/// A `@KEY("value")` pair lifted out of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub key: String,
    pub value: String,
}

impl Annotation {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Typed view of the key when it names an HTTP method.
    pub fn http_method(&self) -> Option<HttpMethod> {
        HttpMethod::from_str(&self.key).ok()
    }

    /// Typed view of the key when it names a parameter category.
    pub fn param_kind(&self) -> Option<ParamKind> {
        ParamKind::from_str(&self.key).ok()
    }
}

/// The two key sets an annotation can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFilter {
    /// GET, POST, POST_FORM, PUT, DELETE, HEAD.
    HttpMethod,
    /// PATH, QUERY, FIELD, HEADER, PART, SYNC, ASYNC.
    Parameter,
}

impl AnnotationFilter {
    /// Exact, case-sensitive membership test.
    pub fn accepts(self, key: &str) -> bool {
        match self {
            Self::HttpMethod => key == POST_FORM || HttpMethod::from_str(key).is_ok(),
            Self::Parameter => ParamKind::from_str(key).is_ok(),
        }
    }
}

/// Extracts an annotation whose key passes `filter`.
///
/// Returns `None` when the text does not match the grammar or the key is
/// filtered out.
pub fn extract_annotation(filter: AnnotationFilter, text: &str) -> Option<Annotation> {
    let captures = ANNOTATION_PATTERN.captures(text)?;
    let key = captures.get(1)?.as_str();
    if !filter.accepts(key) {
        return None;
    }
    let value = captures.get(2).map_or("", |m| m.as_str());
    Some(Annotation::new(key, value))
}

/// Extracts an HTTP-method annotation, canonicalizing `POST_FORM` to `POST`.
pub fn extract_http_annotation(text: &str) -> Option<Annotation> {
    let mut annotation = extract_annotation(AnnotationFilter::HttpMethod, text)?;
    if annotation.key == POST_FORM {
        annotation.key = HttpMethod::Post.to_string();
    }
    Some(annotation)
}

/// Extracts a parameter annotation; the key is returned unchanged.
pub fn extract_request_annotation(text: &str) -> Option<Annotation> {
    extract_annotation(AnnotationFilter::Parameter, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_annotations_for_every_method() {
        for (input, key) in [
            (r#"@DELETE("/test")"#, "DELETE"),
            (r#"@GET("/test")"#, "GET"),
            (r#"@HEAD("/test")"#, "HEAD"),
            (r#"@POST("/test")"#, "POST"),
            (r#"@PUT("/test")"#, "PUT"),
        ] {
            assert_eq!(
                extract_http_annotation(input),
                Some(Annotation::new(key, "/test")),
                "input: {input}"
            );
        }
    }

    #[test]
    fn post_form_is_canonicalized_to_post() {
        let annotation = extract_http_annotation(r#"@POST_FORM("/test")"#).unwrap();
        assert_eq!(annotation, Annotation::new("POST", "/test"));
        assert_eq!(annotation.http_method(), Some(HttpMethod::Post));
    }

    #[test]
    fn http_filter_rejects_other_keys() {
        for input in [
            r#"@INVALID("/test")"#,
            r#"@SYNC("/test")"#,
            r#"@QUERY("/test")"#,
            r#"@get("/test")"#,
            r#"@GETS("/test")"#,
        ] {
            assert_eq!(extract_http_annotation(input), None, "input: {input}");
        }
    }

    #[test]
    fn malformed_syntax_is_no_match() {
        for input in [
            r#"@("/test")"#,
            r#"@@("/test")"#,
            r#"@GET(/test)"#,
            r#"@GET("/test)"#,
            r#"@GET"/test""#,
            "GET(\"/test\")",
            "",
        ] {
            assert_eq!(extract_http_annotation(input), None, "input: {input}");
        }
    }

    #[test]
    fn empty_value_is_allowed() {
        assert_eq!(
            extract_http_annotation(r#"@GET("")"#),
            Some(Annotation::new("GET", ""))
        );
        assert_eq!(
            extract_request_annotation(r#"@QUERY("")"#),
            Some(Annotation::new("QUERY", ""))
        );
    }

    #[test]
    fn request_annotations_keep_key_and_value() {
        for (key, value) in [
            ("FIELD", "test_1"),
            ("HEADER", "test_2"),
            ("PART", "test_3"),
            ("PATH", "test_4"),
            ("QUERY", "test_5"),
            ("SYNC", "test_6"),
            ("ASYNC", "test_7"),
        ] {
            let input = format!(r#"@{key}("{value}")"#);
            assert_eq!(
                extract_request_annotation(&input),
                Some(Annotation::new(key, value))
            );
        }
    }

    #[test]
    fn request_filter_rejects_http_and_lowercase_keys() {
        assert_eq!(extract_request_annotation(r#"@HEAD("/test")"#), None);
        assert_eq!(extract_request_annotation(r#"@POST_FORM("/test")"#), None);
        assert_eq!(extract_request_annotation(r#"@field("invalid")"#), None);
    }

    #[test]
    fn comment_markers_are_ignored() {
        let annotation = extract_request_annotation(r#"// @HEADER("x-type")"#).unwrap();
        assert_eq!(annotation.value, "x-type");
        assert_eq!(annotation.param_kind(), Some(ParamKind::Header));
    }

    #[test]
    fn value_runs_to_the_last_closing_quote() {
        let annotation = extract_http_annotation(r#"@GET("/a") and ("/b")"#).unwrap();
        assert_eq!(annotation.value, r#"/a") and ("/b"#);
    }
}
