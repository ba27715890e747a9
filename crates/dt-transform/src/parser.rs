//! TypeScript parse adapter built on tree-sitter.
//!
//! This module turns source text into a syntax tree for the rewrite rules.
//! The tree is exclusively owned by the single conversion step processing
//! the file and is discarded as soon as the rewritten text is produced.

use tree_sitter::{Language, Parser, Tree};

use crate::error::TransformError;

/// Which TypeScript grammar to parse with.
///
/// `.tsx` files need the TSX grammar; angle-bracket type assertions are
/// only valid in the plain TypeScript grammar, and JSX only in TSX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Plain TypeScript (`.ts`, astro frontmatter).
    TypeScript,
    /// TypeScript with JSX (`.tsx`).
    Tsx,
}

impl Dialect {
    fn language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Parses source text into a syntax tree.
///
/// The returned tree may still contain error nodes; callers that require
/// well-formed input should check with [`first_syntax_error`].
///
/// # Errors
///
/// - [`TransformError::LanguageInit`] if the grammar cannot be loaded.
/// - [`TransformError::Parse`] if the parser returns no tree.
pub fn parse(source: &str, dialect: Dialect) -> Result<Tree, TransformError> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|_| TransformError::LanguageInit)?;

    parser.parse(source, None).ok_or(TransformError::Parse)
}

/// Returns the location of the first syntax error in the tree, if any.
///
/// Walks the tree depth-first looking for `ERROR` or missing nodes and
/// reports the earliest one as a [`TransformError::Syntax`].
#[must_use]
pub fn first_syntax_error(tree: &Tree) -> Option<TransformError> {
    let root = tree.root_node();
    if !root.has_error() {
        return None;
    }

    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return Some(TransformError::Syntax {
                line: pos.row + 1,
                column: pos.column,
            });
        }
        // Descend only into subtrees that contain the error
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                // has_error was set but no ERROR node found; report the root
                let pos = root.start_position();
                return Some(TransformError::Syntax {
                    line: pos.row + 1,
                    column: pos.column,
                });
            }
        }
    }
}
