//! Declaration walk: turns annotated interfaces into [`RequestSpec`]s.
//!
//! Each type declaration is processed by a two-state machine:
//!
//! - `Idle`: the declaration's doc comment has no HTTP annotation, or the
//!   declaration is not an interface. Nothing is recorded.
//! - `Collecting`: an HTTP annotation was found. The method and endpoint are
//!   recorded immediately and every method of the interface is routed by its
//!   own annotation into the accumulating spec.
//!
//! The state returns to `Idle` after every declaration, so each annotated
//! interface in a unit yields its own spec.

use crate::annotation::{Annotation, extract_http_annotation, extract_request_annotation};
use crate::source::{SourceUnit, TypeDecl};
use crate::spec::{HttpMethod, ParsedUnit, RequestSpec};

/// Walks `unit` using its own package name.
pub fn walk(unit: &SourceUnit) -> ParsedUnit<'_> {
    Walker::new(unit).walk()
}

enum WalkState<'unit> {
    Idle,
    Collecting(RequestSpec<'unit>),
}

/// Single-pass walker over one [`SourceUnit`].
pub struct Walker<'unit> {
    unit: &'unit SourceUnit,
    package_name: String,
}

impl<'unit> Walker<'unit> {
    pub fn new(unit: &'unit SourceUnit) -> Self {
        Self {
            unit,
            package_name: unit.package_name.clone(),
        }
    }

    /// Overrides the package name recorded in every spec.
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    pub fn walk(self) -> ParsedUnit<'unit> {
        let specs = self
            .unit
            .declarations
            .iter()
            .filter_map(|decl| self.visit(decl))
            .collect();

        ParsedUnit {
            package_name: self.package_name,
            specs,
        }
    }

    fn visit(&self, decl: &'unit TypeDecl) -> Option<RequestSpec<'unit>> {
        let state = match http_annotation(decl) {
            Some((method, endpoint)) => WalkState::Collecting(RequestSpec::new(
                self.package_name.clone(),
                decl.name.clone(),
                method,
                endpoint,
            )),
            None => WalkState::Idle,
        };

        let WalkState::Collecting(mut spec) = state else {
            return None;
        };

        let Some(methods) = decl.methods() else {
            tracing::debug!(
                declaration = %decl.name,
                "HTTP annotation on a non-interface type, skipping"
            );
            return None;
        };

        for method in methods {
            let annotation = method.annotation_line().and_then(extract_request_annotation);
            let Some((kind, value)) = annotation
                .as_ref()
                .and_then(|a| a.param_kind().map(|kind| (kind, a.value.as_str())))
            else {
                tracing::debug!(
                    request_type = %decl.name,
                    method = %method.name,
                    "No parameter annotation, method excluded"
                );
                continue;
            };
            spec.record(kind, value, method);
        }

        Some(spec)
    }
}

/// The HTTP annotation closest to the declaration, if any.
fn http_annotation(decl: &TypeDecl) -> Option<(HttpMethod, String)> {
    decl.doc
        .iter()
        .rev()
        .find_map(|line| extract_http_annotation(line))
        .and_then(|annotation: Annotation| Some((annotation.http_method()?, annotation.value)))
}
