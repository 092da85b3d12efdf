//! Go declaration parsing backed by tree-sitter.
//!
//! Produces the parser-independent [`SourceUnit`] tree. Only the parts the
//! walker needs are lifted: the package clause, type declarations with the
//! comments directly above them, and interface method sets.

use tree_sitter::{Node, Parser};

use crate::error::GeneratorError;
use crate::source::{DeclKind, MethodDecl, Param, SourceUnit, TypeDecl};

/// Parses Go source text into a [`SourceUnit`].
///
/// ## Errors
/// Returns [`GeneratorError::Parse`] if the source contains syntax errors.
/// Nothing is extracted from a file that does not parse cleanly.
pub fn parse_go_source(source: &str) -> Result<SourceUnit, GeneratorError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| GeneratorError::Parse {
            line: 0,
            column: 0,
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| GeneratorError::Parse {
            line: 0,
            column: 0,
            message: "parser produced no tree".to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(syntax_error(root));
    }

    let mut unit = SourceUnit::default();
    let mut cursor = root.walk();
    let children: Vec<Node> = root.named_children(&mut cursor).collect();

    for (node, doc) in with_docs(&children, source) {
        match node.kind() {
            "package_clause" => {
                let mut inner = node.walk();
                if let Some(ident) = node
                    .named_children(&mut inner)
                    .find(|n| n.kind() == "package_identifier")
                {
                    unit.package_name = text(ident, source);
                }
            }
            "type_declaration" => {
                unit.declarations.extend(type_declarations(node, doc, source));
            }
            _ => {}
        }
    }

    tracing::debug!(
        package = %unit.package_name,
        declarations = unit.declarations.len(),
        "Parsed Go source"
    );

    Ok(unit)
}

/// Locates the first error or missing node for the report.
fn syntax_error(root: Node) -> GeneratorError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let position = node.start_position();
            let message = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                "unexpected syntax".to_string()
            };
            return GeneratorError::Parse {
                line: position.row + 1,
                column: position.column + 1,
                message,
            };
        }
        let mut cursor = node.walk();
        let mut children: Vec<Node> = node.children(&mut cursor).collect();
        // Depth-first, leftmost error first.
        children.reverse();
        stack.extend(children);
    }

    GeneratorError::Parse {
        line: 0,
        column: 0,
        message: "unexpected syntax".to_string(),
    }
}

/// Pairs every non-comment node with the comment block directly above it.
///
/// A block belongs to a node when no blank line separates them. Comments on
/// the same line as the previous node are trailing comments and ignored.
fn with_docs<'tree>(nodes: &[Node<'tree>], source: &str) -> Vec<(Node<'tree>, Vec<String>)> {
    let mut result = Vec::new();
    let mut pending: Vec<Node<'tree>> = Vec::new();
    let mut last_end_row: Option<usize> = None;

    for &node in nodes {
        if node.kind() == "comment" {
            let row = node.start_position().row;
            if last_end_row == Some(row) {
                continue;
            }
            if let Some(prev) = pending.last()
                && prev.end_position().row + 1 < row
            {
                pending.clear();
            }
            pending.push(node);
            continue;
        }

        let attached = pending
            .last()
            .is_some_and(|c| c.end_position().row + 1 >= node.start_position().row);
        let doc = if attached {
            pending.iter().map(|c| text(*c, source)).collect()
        } else {
            Vec::new()
        };
        pending.clear();
        last_end_row = Some(node.end_position().row);
        result.push((node, doc));
    }

    result
}

/// Expands `type X ...` and `type ( X ...; Y ... )` into declarations.
fn type_declarations(node: Node, outer_doc: Vec<String>, source: &str) -> Vec<TypeDecl> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    let specs = with_docs(&children, source)
        .into_iter()
        .filter(|(n, _)| matches!(n.kind(), "type_spec" | "type_alias"))
        .collect::<Vec<_>>();
    let single = specs.len() == 1;

    specs
        .into_iter()
        .filter_map(|(spec, doc)| {
            let doc = if doc.is_empty() && single {
                outer_doc.clone()
            } else {
                doc
            };
            type_spec(spec, doc, source)
        })
        .collect()
}

fn type_spec(node: Node, doc: Vec<String>, source: &str) -> Option<TypeDecl> {
    let name = text(node.child_by_field_name("name")?, source);
    let kind = match node.child_by_field_name("type") {
        Some(ty) if node.kind() == "type_spec" && ty.kind() == "interface_type" => {
            DeclKind::Interface(interface_methods(ty, source))
        }
        _ => DeclKind::Other,
    };
    Some(TypeDecl::new(name, doc, kind))
}

fn interface_methods(node: Node, source: &str) -> Vec<MethodDecl> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();

    with_docs(&children, source)
        .into_iter()
        .filter(|(n, _)| matches!(n.kind(), "method_elem" | "method_spec"))
        .filter_map(|(elem, doc)| {
            let name = text(elem.child_by_field_name("name")?, source);
            let params = elem
                .child_by_field_name("parameters")
                .map(|list| parameters(list, source))
                .unwrap_or_default();
            let result = elem.child_by_field_name("result").map(|r| text(r, source));
            Some(MethodDecl {
                name,
                doc,
                params,
                result,
            })
        })
        .collect()
}

/// Flattens a parameter list; unnamed parameters are called `argN`.
fn parameters(list: Node, source: &str) -> Vec<Param> {
    let mut params = Vec::new();
    let mut cursor = list.walk();
    let declarations: Vec<Node> = list.named_children(&mut cursor).collect();

    for declaration in declarations {
        let variadic = match declaration.kind() {
            "parameter_declaration" => false,
            "variadic_parameter_declaration" => true,
            _ => continue,
        };
        let Some(ty_node) = declaration.child_by_field_name("type") else {
            continue;
        };
        let ty = if variadic {
            format!("...{}", text(ty_node, source))
        } else {
            text(ty_node, source)
        };

        let mut name_cursor = declaration.walk();
        let names: Vec<String> = declaration
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| text(n, source))
            .collect();

        if names.is_empty() {
            params.push(Param::new(format!("arg{}", params.len()), ty));
        } else {
            for name in names {
                params.push(Param::new(name, ty.clone()));
            }
        }
    }

    params
}

fn text(node: Node, source: &str) -> String {
    node.utf8_text(source.as_bytes())
        .map(str::to_string)
        .unwrap_or_default()
}
