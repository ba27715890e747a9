#![deny(clippy::all)]
#![warn(missing_docs)]

//! Source-to-source transformation engine for TypeScript and TSX.
//!
//! Parses a source file into a concrete syntax tree, applies a configured
//! rule set over its top-level statements, and prints the result by
//! splicing textual edits back into the original source. Everything the
//! rules do not touch is preserved byte for byte, including comments,
//! whitespace, and string contents.
//!
//! Three rule families exist:
//!
//! - **type erasure** removes every type-level construct while keeping
//!   runtime code intact;
//! - **module-syntax normalization** rewrites between ECMAScript-module
//!   and common-module syntax at the top level, in a fixed direction;
//! - **export rewriting** converts export statements to `exports` /
//!   `module.exports` assignments when lowering to common-module syntax.
//!
//! # Examples
//!
//! ```
//! use dt_transform::{transform, Dialect, RuleSet};
//!
//! let source = "export const greet = (name: string): string => `hi ${name}`;";
//! let output = transform(source, Dialect::TypeScript, &RuleSet::typed_module()).unwrap();
//! assert_eq!(
//!     output,
//!     "const greet = (name) => `hi ${name}`;\nexports.greet = greet;"
//! );
//! ```

pub mod edit;
mod erase;
mod error;
mod modules;
mod parser;

pub use error::TransformError;
pub use parser::{Dialect, first_syntax_error, parse};

use edit::apply_edits;
use erase::collect_erasure;
use modules::{StatementRewrite, rewrite_to_common_js, rewrite_to_esm};

/// The module syntax a file is normalized towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleTarget {
    /// `require()` / `exports` / `module.exports`.
    CommonJs,
    /// `import` / `export`.
    EsModule,
}

/// The rule families to run over one source file.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Remove type annotations, declarations, and assertions.
    pub erase_types: bool,
    /// Normalize top-level module syntax towards this target, if any.
    pub module_target: Option<ModuleTarget>,
    /// Rewrite export statements when lowering to common-module syntax.
    pub rewrite_exports: bool,
}

impl RuleSet {
    /// The rule set for a typed module: erase types, lower to
    /// common-module syntax, and rewrite exports.
    #[must_use]
    pub fn typed_module() -> Self {
        Self {
            erase_types: true,
            module_target: Some(ModuleTarget::CommonJs),
            rewrite_exports: true,
        }
    }

    /// The rule set for component frontmatter: raise to
    /// ECMAScript-module syntax only. Annotations stay in place and
    /// export statements are left alone.
    #[must_use]
    pub fn component_frontmatter() -> Self {
        Self {
            erase_types: false,
            module_target: Some(ModuleTarget::EsModule),
            rewrite_exports: false,
        }
    }
}

/// Transforms `source` according to `rules` and returns the rewritten
/// text.
///
/// The output is produced by applying span edits to the original source,
/// so untouched regions survive exactly as written.
///
/// # Errors
///
/// Returns [`TransformError::Syntax`] when the source does not parse,
/// [`TransformError::LanguageInit`] when the grammar cannot be loaded,
/// and [`TransformError::OverlappingEdits`] if two rules ever claim
/// intersecting spans.
pub fn transform(source: &str, dialect: Dialect, rules: &RuleSet) -> Result<String, TransformError> {
    let tree = parse(source, dialect)?;
    if let Some(err) = first_syntax_error(&tree) {
        return Err(err);
    }

    let mut edits = Vec::new();
    let root = tree.root_node();
    let mut cursor = root.walk();

    for stmt in root.named_children(&mut cursor) {
        if let Some(target) = rules.module_target {
            let rewrite = match target {
                ModuleTarget::CommonJs => {
                    rewrite_to_common_js(stmt, source, rules.rewrite_exports)
                }
                ModuleTarget::EsModule => rewrite_to_esm(stmt, source),
            };
            match rewrite {
                StatementRewrite::Replaced(stmt_edits) => {
                    edits.extend(stmt_edits);
                    continue;
                }
                StatementRewrite::KeptDeclaration(stmt_edits, decl) => {
                    edits.extend(stmt_edits);
                    if rules.erase_types {
                        collect_erasure(decl, source, &mut edits);
                    }
                    continue;
                }
                StatementRewrite::Untouched => {}
            }
        }

        if rules.erase_types {
            collect_erasure(stmt, source, &mut edits);
        }
    }

    apply_edits(source, edits)
}
