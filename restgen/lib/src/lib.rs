//! Request builder generator for annotated Go interfaces.
//!
//! An interface whose doc comment carries an HTTP annotation describes one
//! endpoint; each of its methods carries a parameter annotation saying where
//! its argument goes:
//!
//! ```text
//! // @GET("/photos/{id}")
//! type GetPhoto interface {
//!     // @PATH("id")
//!     PhotoID(id string) GetPhoto
//!     // @QUERY("image_size")
//!     ImageSize(size int) GetPhoto
//!     // @SYNC("PhotoResponse")
//!     Run() (PhotoResponse, error)
//! }
//! ```
//!
//! From that the generator emits a `GetPhotoImpl` struct, a `NewGetPhoto`
//! constructor taking the client capability, chaining setters, request
//! assembly, and the execution wrappers.
//!
//! ## Pipeline
//!
//! - [`go_source`] - tree-sitter parse into a [`SourceUnit`]
//! - [`walker`] - annotated interfaces to [`RequestSpec`]s
//! - [`codegen`] - [`RequestSpec`]s to Go text
//! - [`format`] - optional `gofmt` pass
//! - [`output`] - end-to-end helpers and atomic file writes
//!
//! ## Example
//!
//! ```
//! use restgen_lib::{GeneratorConfig, Verbatim, generate_source};
//!
//! let source = r#"package photos
//!
//! // @DELETE("/photos/{id}")
//! type DeletePhoto interface {
//!     // @PATH("id")
//!     ID(id string) DeletePhoto
//! }
//! "#;
//!
//! let code = generate_source(source, &GeneratorConfig::default(), &Verbatim).unwrap();
//! assert!(code.contains("func (b *DeletePhotoImpl) ID(id string) DeletePhoto {"));
//! ```

pub mod annotation;
pub mod codegen;
mod config;
pub mod endpoint;
mod error;
pub mod format;
pub mod go_source;
pub mod output;
pub mod source;
mod spec;
pub mod walker;

pub use annotation::{Annotation, AnnotationFilter, extract_http_annotation, extract_request_annotation};
pub use codegen::{ContentKind, generate_unit};
pub use config::{BANNER, DEFAULT_RUNTIME_IMPORT, GeneratorConfig};
pub use error::GeneratorError;
pub use format::{Formatter, Gofmt, Verbatim};
pub use go_source::parse_go_source;
pub use output::{generate_file, generate_source, write_atomic};
pub use source::{DeclKind, MethodDecl, Param, SourceUnit, TypeDecl};
pub use spec::{HttpMethod, ParamKind, ParamMap, ParsedUnit, RequestSpec};
pub use walker::{Walker, walk};
