//! Module-syntax normalization rules.
//!
//! Rewrites between ECMAScript-module syntax (`import` / `export`) and
//! common-module syntax (`require()` / `exports`). The direction is fixed
//! per file kind by the caller, never inferred from the source:
//!
//! - typed modules are lowered to common-module syntax
//!   ([`rewrite_to_common_js`]);
//! - component frontmatter is raised to ECMAScript-module syntax
//!   ([`rewrite_to_esm`]).
//!
//! Rules apply to top-level statements only, which is where both syntaxes
//! are legal. When both a default and named specifiers are present, the
//! default binding is always captured via the `default` key, never
//! positionally. Renames (`a as b` / `a: b`) are preserved in both
//! directions.

use smallvec::SmallVec;
use tree_sitter::Node;

use crate::edit::Edit;
use crate::erase::{erases_statement, remove_statement};

/// What a module-syntax rule decided about one top-level statement.
#[derive(Debug)]
pub(crate) enum StatementRewrite<'a> {
    /// The statement is fully replaced; nothing below it needs visiting.
    Replaced(Vec<Edit>),

    /// Edits were produced around a declaration that stays in place;
    /// erasure still needs to visit the kept node.
    KeptDeclaration(Vec<Edit>, Node<'a>),

    /// No module rule applies to this statement.
    Untouched,
}

/// A named specifier: the imported/exported name and an optional local
/// rename.
type NamedSpecs<'a> = SmallVec<[(&'a str, Option<&'a str>); 4]>;

/// The bindings introduced by one import clause.
#[derive(Debug, Default)]
struct ImportBindings<'a> {
    default: Option<&'a str>,
    namespace: Option<&'a str>,
    named: NamedSpecs<'a>,
    has_named_clause: bool,
}

impl ImportBindings<'_> {
    fn is_empty(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named.is_empty()
    }
}

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    source
        .get(node.start_byte()..node.end_byte())
        .unwrap_or_default()
}

// =============================================================================
// ESM -> COMMON-MODULE (typed modules)
// =============================================================================

/// Rewrites one top-level statement from ECMAScript-module syntax to
/// common-module syntax.
///
/// `rewrite_exports` controls whether export statements are rewritten;
/// import statements are always handled.
pub(crate) fn rewrite_to_common_js<'a>(
    stmt: Node<'a>,
    source: &str,
    rewrite_exports: bool,
) -> StatementRewrite<'a> {
    match stmt.kind() {
        "import_statement" => rewrite_import(stmt, source),
        "export_statement" if rewrite_exports => rewrite_export(stmt, source),
        _ => StatementRewrite::Untouched,
    }
}

fn rewrite_import<'a>(stmt: Node<'a>, source: &str) -> StatementRewrite<'a> {
    // `import type ...` carries no runtime binding at all; the grammar
    // surfaces the keyword as a direct token of the statement
    if has_token(stmt, "type") {
        return StatementRewrite::Replaced(vec![remove_statement(stmt, source)]);
    }

    let Some(source_node) = stmt.child_by_field_name("source") else {
        return StatementRewrite::Untouched;
    };
    let module = node_text(source_node, source);

    let clause = stmt
        .named_children(&mut stmt.walk())
        .find(|c| c.kind() == "import_clause");

    let Some(clause) = clause else {
        // Side-effect import: bare module-load call
        let text = format!("require({module});");
        return StatementRewrite::Replaced(vec![Edit::replace(
            stmt.start_byte(),
            stmt.end_byte(),
            text,
        )]);
    };

    let bindings = read_import_clause(clause, source);

    if bindings.is_empty() {
        if bindings.has_named_clause {
            // Every specifier was type-only; nothing survives at runtime
            return StatementRewrite::Replaced(vec![remove_statement(stmt, source)]);
        }
        return StatementRewrite::Untouched;
    }

    let binding = common_js_binding(&bindings);
    let text = format!("const {binding} = require({module});");
    StatementRewrite::Replaced(vec![Edit::replace(stmt.start_byte(), stmt.end_byte(), text)])
}

/// Reads default, namespace, and named specifiers out of an import clause,
/// dropping inline `type` specifiers.
fn read_import_clause<'a>(clause: Node<'_>, source: &'a str) -> ImportBindings<'a> {
    let mut bindings = ImportBindings::default();

    let mut cursor = clause.walk();
    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => bindings.default = Some(node_text(child, source)),
            "namespace_import" => {
                let mut ns_cursor = child.walk();
                bindings.namespace = child
                    .named_children(&mut ns_cursor)
                    .find(|c| c.kind() == "identifier")
                    .map(|c| node_text(c, source));
            }
            "named_imports" => {
                bindings.has_named_clause = true;
                let mut spec_cursor = child.walk();
                for spec in child.named_children(&mut spec_cursor) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    // `import { type Foo }` is erased, not bound
                    if has_token(spec, "type") {
                        continue;
                    }
                    let Some(name) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    let alias = spec
                        .child_by_field_name("alias")
                        .map(|a| node_text(a, source));
                    bindings.named.push((node_text(name, source), alias));
                }
            }
            _ => {}
        }
    }

    bindings
}

/// Builds the binding pattern on the left of `= require(...)`.
fn common_js_binding(bindings: &ImportBindings<'_>) -> String {
    match (bindings.default, bindings.namespace) {
        // `import D from 'm'` / `import * as N from 'm'` bind the whole
        // module object directly
        (Some(name), None) if bindings.named.is_empty() => return name.to_owned(),
        (None, Some(name)) if bindings.named.is_empty() => return name.to_owned(),
        _ => {}
    }

    let mut keys: Vec<String> = Vec::new();
    if let Some(default) = bindings.default {
        keys.push(format!("default: {default}"));
    }
    for (name, alias) in &bindings.named {
        match alias {
            Some(alias) => keys.push(format!("{name}: {alias}")),
            None => keys.push((*name).to_owned()),
        }
    }
    if let Some(namespace) = bindings.namespace {
        keys.push(format!("...{namespace}"));
    }

    format!("{{ {} }}", keys.join(", "))
}

fn rewrite_export<'a>(stmt: Node<'a>, source: &str) -> StatementRewrite<'a> {
    // `export type { ... }` carries no runtime binding
    if has_token(stmt, "type") {
        return StatementRewrite::Replaced(vec![remove_statement(stmt, source)]);
    }

    let source_node = stmt.child_by_field_name("source");
    let module = source_node.map(|n| node_text(n, source));

    // Default exports first: declarations after `default` become the
    // assigned expression, not a kept statement
    if has_token(stmt, "default") {
        return rewrite_default_export(stmt, source);
    }

    if let Some(decl) = stmt.child_by_field_name("declaration") {
        // Type-only declarations vanish with their export wrapper
        if erases_statement(decl.kind()) {
            return StatementRewrite::Replaced(vec![remove_statement(stmt, source)]);
        }
        return rewrite_export_declaration(stmt, decl, source);
    }

    // `export * as ns from 'm'`
    let mut cursor = stmt.walk();
    if let Some(ns) = stmt
        .named_children(&mut cursor)
        .find(|c| c.kind() == "namespace_export")
    {
        if let (Some(module), Some(name)) = (module, first_identifier(ns, source)) {
            let text = format!("exports.{name} = require({module});");
            return StatementRewrite::Replaced(vec![Edit::replace(
                stmt.start_byte(),
                stmt.end_byte(),
                text,
            )]);
        }
        return StatementRewrite::Untouched;
    }

    // `export * from 'm'`
    if has_token(stmt, "*") {
        if let Some(module) = module {
            let text = format!("Object.assign(exports, require({module}));");
            return StatementRewrite::Replaced(vec![Edit::replace(
                stmt.start_byte(),
                stmt.end_byte(),
                text,
            )]);
        }
        return StatementRewrite::Untouched;
    }

    // `export { a, b as c }` with or without a source
    let mut cursor = stmt.walk();
    if let Some(clause) = stmt
        .named_children(&mut cursor)
        .find(|c| c.kind() == "export_clause")
    {
        return rewrite_export_clause(stmt, clause, module, source);
    }

    StatementRewrite::Untouched
}

/// `export const x = 1` keeps the declaration and appends one
/// `exports.x = x;` per exported name.
fn rewrite_export_declaration<'a>(
    stmt: Node<'a>,
    decl: Node<'a>,
    source: &str,
) -> StatementRewrite<'a> {
    let names = match decl.kind() {
        "function_declaration"
        | "generator_function_declaration"
        | "class_declaration"
        | "abstract_class_declaration" => decl
            .child_by_field_name("name")
            .map(|n| vec![node_text(n, source).to_owned()])
            .unwrap_or_default(),
        "lexical_declaration" | "variable_declaration" => {
            let mut names = Vec::new();
            let mut cursor = decl.walk();
            for declarator in decl.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(pattern) = declarator.child_by_field_name("name") {
                    collect_binding_identifiers(pattern, source, &mut names);
                }
            }
            names
        }
        // The rule only recognizes variable/function/class declarations
        _ => return StatementRewrite::Untouched,
    };

    if names.is_empty() {
        return StatementRewrite::Untouched;
    }

    let mut edits = vec![Edit::remove(stmt.start_byte(), decl.start_byte())];
    let mut assignments = String::new();
    for name in &names {
        assignments.push_str(&format!("\nexports.{name} = {name};"));
    }
    edits.push(Edit::insert(stmt.end_byte(), assignments));

    StatementRewrite::KeptDeclaration(edits, decl)
}

fn rewrite_default_export<'a>(stmt: Node<'a>, source: &str) -> StatementRewrite<'a> {
    let value = stmt
        .child_by_field_name("value")
        .or_else(|| find_default_value(stmt));
    let Some(value) = value else {
        return StatementRewrite::Untouched;
    };

    if erases_statement(value.kind()) {
        // `export default interface ...` has no runtime value
        return StatementRewrite::Replaced(vec![remove_statement(stmt, source)]);
    }

    let edits = vec![Edit::replace(
        stmt.start_byte(),
        value.start_byte(),
        "module.exports = ".to_owned(),
    )];
    StatementRewrite::KeptDeclaration(edits, value)
}

fn rewrite_export_clause<'a>(
    stmt: Node<'a>,
    clause: Node<'a>,
    module: Option<&str>,
    source: &str,
) -> StatementRewrite<'a> {
    let mut assignments: Vec<String> = Vec::new();

    let mut cursor = clause.walk();
    for spec in clause.named_children(&mut cursor) {
        if spec.kind() != "export_specifier" {
            continue;
        }
        if has_token(spec, "type") {
            continue;
        }
        let Some(name) = spec.child_by_field_name("name") else {
            continue;
        };
        let local = node_text(name, source);
        let exported = spec
            .child_by_field_name("alias")
            .map_or(local, |a| node_text(a, source));

        match module {
            // Re-export: the binding comes from the other module
            Some(module) => {
                assignments.push(format!("exports.{exported} = require({module}).{local};"));
            }
            // Plain named export: sourced from the local identifier
            None => assignments.push(format!("exports.{exported} = {local};")),
        }
    }

    if assignments.is_empty() {
        // Nothing but type specifiers: remove the statement outright
        return StatementRewrite::Replaced(vec![remove_statement(stmt, source)]);
    }

    StatementRewrite::Replaced(vec![Edit::replace(
        stmt.start_byte(),
        stmt.end_byte(),
        assignments.join("\n"),
    )])
}

// =============================================================================
// COMMON-MODULE -> ESM (component frontmatter)
// =============================================================================

/// Rewrites one top-level statement from common-module syntax to
/// ECMAScript-module syntax.
pub(crate) fn rewrite_to_esm<'a>(stmt: Node<'a>, source: &str) -> StatementRewrite<'a> {
    match stmt.kind() {
        // Bare `require('m');` becomes a side-effect import
        "expression_statement" => {
            let Some(call) = stmt.named_child(0) else {
                return StatementRewrite::Untouched;
            };
            let Some(module) = require_call_source(call, source) else {
                return StatementRewrite::Untouched;
            };
            let text = format!("import {module};");
            StatementRewrite::Replaced(vec![Edit::replace(stmt.start_byte(), stmt.end_byte(), text)])
        }

        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = stmt.walk();
            let declarators: SmallVec<[Node<'a>; 2]> = stmt
                .named_children(&mut cursor)
                .filter(|c| c.kind() == "variable_declarator")
                .collect();
            // Only single-declarator statements are rewritten; mixed
            // declarations are left for the author to split
            let [declarator] = declarators.as_slice() else {
                return StatementRewrite::Untouched;
            };

            let Some(value) = declarator.child_by_field_name("value") else {
                return StatementRewrite::Untouched;
            };
            let Some(module) = require_call_source(value, source) else {
                return StatementRewrite::Untouched;
            };
            let Some(pattern) = declarator.child_by_field_name("name") else {
                return StatementRewrite::Untouched;
            };

            let Some(text) = esm_import_text(pattern, module, source) else {
                return StatementRewrite::Untouched;
            };
            StatementRewrite::Replaced(vec![Edit::replace(stmt.start_byte(), stmt.end_byte(), text)])
        }

        _ => StatementRewrite::Untouched,
    }
}

/// Returns the module string (with quotes) if `node` is a call to the
/// module-load primitive with a single string argument.
fn require_call_source<'a>(node: Node<'_>, source: &'a str) -> Option<&'a str> {
    if node.kind() != "call_expression" {
        return None;
    }
    let callee = node.child_by_field_name("function")?;
    if callee.kind() != "identifier" || node_text(callee, source) != "require" {
        return None;
    }
    let args = node.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let named: SmallVec<[Node<'_>; 2]> = args.named_children(&mut cursor).collect();
    let [arg] = named.as_slice() else {
        return None;
    };
    if arg.kind() != "string" {
        return None;
    }
    Some(node_text(*arg, source))
}

/// Builds an import declaration mirroring a require binding pattern.
///
/// Returns `None` for pattern shapes an import declaration cannot express
/// (nested patterns, default values, rest mixed with a default-less
/// specifier list and named entries on both sides).
fn esm_import_text(pattern: Node<'_>, module: &str, source: &str) -> Option<String> {
    match pattern.kind() {
        // `const D = require('m')` binds the whole module object
        "identifier" => Some(format!("import {} from {module};", node_text(pattern, source))),

        "object_pattern" => {
            let mut default: Option<&str> = None;
            let mut namespace: Option<&str> = None;
            let mut named: NamedSpecs<'_> = SmallVec::new();

            let mut cursor = pattern.walk();
            for entry in pattern.named_children(&mut cursor) {
                match entry.kind() {
                    "shorthand_property_identifier_pattern" => {
                        named.push((node_text(entry, source), None));
                    }
                    "pair_pattern" => {
                        let key = entry.child_by_field_name("key")?;
                        let value = entry.child_by_field_name("value")?;
                        if value.kind() != "identifier" {
                            return None;
                        }
                        let key_text = node_text(key, source);
                        let value_text = node_text(value, source);
                        if key_text == "default" {
                            default = Some(value_text);
                        } else {
                            named.push((key_text, Some(value_text)));
                        }
                    }
                    "rest_pattern" => {
                        let inner = entry.named_child(0)?;
                        if inner.kind() != "identifier" {
                            return None;
                        }
                        namespace = Some(node_text(inner, source));
                    }
                    "comment" => {}
                    // Default values and nested patterns cannot be
                    // expressed as import specifiers
                    _ => return None,
                }
            }

            let specifiers = match (default, namespace, named.is_empty()) {
                (Some(d), None, true) => d.to_owned(),
                (Some(d), Some(ns), true) => format!("{d}, * as {ns}"),
                (None, Some(ns), true) => format!("* as {ns}"),
                (None, None, false) => named_specifier_list(&named),
                (Some(d), None, false) => format!("{d}, {}", named_specifier_list(&named)),
                // Named entries alongside a rest capture have no import
                // equivalent
                (_, Some(_), false) => return None,
                (None, None, true) => return Some(format!("import {module};")),
            };

            Some(format!("import {specifiers} from {module};"))
        }

        _ => None,
    }
}

fn named_specifier_list(named: &NamedSpecs<'_>) -> String {
    let specs: Vec<String> = named
        .iter()
        .map(|(name, alias)| match alias {
            Some(alias) if alias != name => format!("{name} as {alias}"),
            _ => (*name).to_owned(),
        })
        .collect();
    format!("{{ {} }}", specs.join(", "))
}

// =============================================================================
// NODE HELPERS
// =============================================================================

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == token)
}

fn first_identifier<'a>(node: Node<'_>, source: &'a str) -> Option<&'a str> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| c.kind() == "identifier")
        .map(|c| node_text(c, source))
}

/// Finds the exported value of `export default ...` when the grammar does
/// not expose it as a field: the first named child after the `default`
/// token that is not a comment.
fn find_default_value(stmt: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = stmt.walk();
    let mut seen_default = false;
    for child in stmt.children(&mut cursor) {
        if child.kind() == "default" {
            seen_default = true;
            continue;
        }
        if seen_default && child.is_named() && child.kind() != "comment" {
            return Some(child);
        }
    }
    None
}

/// Collects every identifier bound by a declarator pattern.
fn collect_binding_identifiers(pattern: Node<'_>, source: &str, names: &mut Vec<String>) {
    match pattern.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            names.push(node_text(pattern, source).to_owned());
        }
        "object_pattern" | "array_pattern" | "pair_pattern" | "rest_pattern"
        | "object_assignment_pattern" | "assignment_pattern" => {
            let mut cursor = pattern.walk();
            for child in pattern.named_children(&mut cursor) {
                // Pair patterns bind their value side, not the key
                if pattern.kind() == "pair_pattern"
                    && child_is_field(pattern, child, "key")
                {
                    continue;
                }
                collect_binding_identifiers(child, source, names);
            }
        }
        _ => {}
    }
}

fn child_is_field(parent: Node<'_>, child: Node<'_>, field: &str) -> bool {
    parent
        .child_by_field_name(field)
        .is_some_and(|f| f.id() == child.id())
}
