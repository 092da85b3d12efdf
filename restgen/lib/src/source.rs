//! Parser-independent declaration tree.
//!
//! The walker only needs type declarations, their doc comments, and the
//! method sets of interfaces. Any parser that can produce a [`SourceUnit`]
//! can feed the generator; [`crate::go_source`] is the tree-sitter backed one.

/// One parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceUnit {
    /// Name from the package clause.
    pub package_name: String,
    /// Top-level type declarations in source order.
    pub declarations: Vec<TypeDecl>,
}

/// A named type declaration and the comment lines directly above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Raw comment lines, top to bottom, markers included.
    pub doc: Vec<String>,
    pub kind: DeclKind,
}

/// What a type declaration declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    /// A method set; methods in declaration order.
    Interface(Vec<MethodDecl>),
    /// Anything else (struct, alias, named basic type, ...).
    Other,
}

/// One interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub doc: Vec<String>,
    pub params: Vec<Param>,
    /// Result list as written, e.g. `(PhotoResponse, error)`.
    pub result: Option<String>,
}

/// A single named parameter. Grouped names (`a, b int`) are split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// The type exactly as written in source, e.g. `[]byte` or `*models.Photo`.
    pub ty: String,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, doc: Vec<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            doc,
            kind,
        }
    }

    /// Methods if this declares an interface.
    pub fn methods(&self) -> Option<&[MethodDecl]> {
        match &self.kind {
            DeclKind::Interface(methods) => Some(methods),
            DeclKind::Other => None,
        }
    }
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            params,
            result: None,
        }
    }

    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// The line annotations are read from: the first doc comment line.
    pub fn annotation_line(&self) -> Option<&str> {
        self.doc.first().map(String::as_str)
    }

    pub fn first_param(&self) -> Option<&Param> {
        self.params.first()
    }

    /// `name type` pairs joined with `, `, as used in a Go signature.
    pub fn params_list(&self) -> String {
        self.params
            .iter()
            .map(|p| format!("{} {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// Whether the static type is already a string.
    pub fn is_textual(&self) -> bool {
        self.ty == "string"
    }

    pub fn is_bytes(&self) -> bool {
        self.ty == "[]byte"
    }
}
