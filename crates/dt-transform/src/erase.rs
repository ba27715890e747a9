//! Type-erasure rewrite rules.
//!
//! Each rule matches one node category and yields a span edit that deletes
//! the construct or unwraps it to its runtime expression. The rules are
//! order-independent and structural; they never touch runtime code.
//!
//! Covered constructs:
//!
//! | Construct | Action |
//! |-----------|--------|
//! | type annotation (`: T`), optional marker (`?`) | removed |
//! | generic parameter / argument lists (`<T>`) | removed |
//! | `interface` / `type` alias declarations | removed |
//! | `declare ...` ambient statements, overload signatures | removed |
//! | `x as T`, `x satisfies T`, `<T>x`, `x!` | unwrapped to `x` |
//! | parameter properties (`private x`), `readonly`, `override` | plain parameter/field |
//! | `implements` clauses, `abstract` markers | removed |

use tree_sitter::Node;

use crate::edit::Edit;

/// Statement-level constructs that are deleted wholesale.
const ERASED_STATEMENTS: &[&str] = &[
    "interface_declaration",
    "type_alias_declaration",
    "ambient_declaration",
    "function_signature",
    "abstract_method_signature",
];

/// Node categories removed by simple span deletion.
const ERASED_SPANS: &[&str] = &[
    "type_annotation",
    "type_parameters",
    "type_arguments",
    "implements_clause",
];

/// Returns `true` if erasure deletes this statement entirely.
pub(crate) fn erases_statement(kind: &str) -> bool {
    ERASED_STATEMENTS.contains(&kind)
}

/// Collects erasure edits for `node` and everything below it.
///
/// Subtrees that fall inside an already-deleted span are not descended
/// into, so the collected edits never overlap.
pub(crate) fn collect_erasure(node: Node<'_>, source: &str, edits: &mut Vec<Edit>) {
    let kind = node.kind();

    if erases_statement(kind) {
        edits.push(remove_statement(node, source));
        return;
    }

    if ERASED_SPANS.contains(&kind) {
        edits.push(Edit::remove(node.start_byte(), node.end_byte()));
        return;
    }

    match kind {
        // `x as T`, `x satisfies T`, `x!` keep the inner expression and
        // drop the trailing operator and type
        "as_expression" | "satisfies_expression" | "non_null_expression" => {
            if let Some(inner) = node.named_child(0) {
                edits.push(Edit::remove(inner.end_byte(), node.end_byte()));
                collect_erasure(inner, source, edits);
            }
            return;
        }

        // Angle-bracket assertion `<T>x` keeps the trailing expression
        "type_assertion" => {
            let count = node.named_child_count();
            if count > 0 {
                if let Some(expr) = node.named_child(count - 1) {
                    edits.push(Edit::remove(node.start_byte(), expr.start_byte()));
                    collect_erasure(expr, source, edits);
                }
            }
            return;
        }

        // Parameter properties and class-member modifiers
        "accessibility_modifier" | "override_modifier" => {
            edits.push(remove_with_trailing_ws(node, source));
            return;
        }

        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "readonly"
                if matches!(
                    kind,
                    "required_parameter" | "optional_parameter" | "public_field_definition"
                ) =>
            {
                edits.push(remove_with_trailing_ws(child, source));
            }
            // Optional-parameter and optional-field markers are TypeScript
            // syntax; the definite-assignment `!` likewise
            "?" if matches!(kind, "optional_parameter" | "public_field_definition") => {
                edits.push(Edit::remove(child.start_byte(), child.end_byte()));
            }
            "!" if kind == "public_field_definition" => {
                edits.push(Edit::remove(child.start_byte(), child.end_byte()));
            }
            "abstract" if kind == "abstract_class_declaration" => {
                edits.push(remove_with_trailing_ws(child, source));
            }
            _ => collect_erasure(child, source, edits),
        }
    }
}

/// Deletes a statement node plus its trailing semicolon and line break.
pub(crate) fn remove_statement(node: Node<'_>, source: &str) -> Edit {
    let bytes = source.as_bytes();
    let mut end = node.end_byte();

    while bytes.get(end).is_some_and(|b| *b == b' ' || *b == b'\t') {
        end += 1;
    }
    if bytes.get(end) == Some(&b';') {
        end += 1;
        while bytes.get(end).is_some_and(|b| *b == b' ' || *b == b'\t') {
            end += 1;
        }
    }
    if bytes.get(end) == Some(&b'\r') {
        end += 1;
    }
    if bytes.get(end) == Some(&b'\n') {
        end += 1;
    }

    Edit::remove(node.start_byte(), end)
}

/// Deletes a node plus the spaces that separated it from what follows.
fn remove_with_trailing_ws(node: Node<'_>, source: &str) -> Edit {
    let bytes = source.as_bytes();
    let mut end = node.end_byte();
    while bytes.get(end).is_some_and(|b| *b == b' ' || *b == b'\t') {
        end += 1;
    }
    Edit::remove(node.start_byte(), end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::apply_edits;
    use crate::parser::{Dialect, parse};

    fn erase(source: &str) -> String {
        let tree = parse(source, Dialect::TypeScript).expect("parse failed");
        let mut edits = Vec::new();
        let root = tree.root_node();
        let mut cursor = root.walk();
        for stmt in root.named_children(&mut cursor) {
            collect_erasure(stmt, source, &mut edits);
        }
        apply_edits(source, edits).expect("apply failed")
    }

    #[test]
    fn test_binding_annotation_removed() {
        assert_eq!(erase("const x: number = 1;"), "const x = 1;");
    }

    #[test]
    fn test_parameter_and_return_annotations_removed() {
        assert_eq!(
            erase("function add(a: number, b: number): number { return a + b; }"),
            "function add(a, b) { return a + b; }"
        );
    }

    #[test]
    fn test_optional_parameter_marker_removed() {
        assert_eq!(
            erase("function greet(name?: string) { return name; }"),
            "function greet(name) { return name; }"
        );
    }

    #[test]
    fn test_generics_removed() {
        let out = erase("function identity<T>(value: T): T { return value; }");
        assert_eq!(out, "function identity(value) { return value; }");
    }

    #[test]
    fn test_call_site_type_arguments_removed() {
        assert_eq!(
            erase("const m = new Map<string, number>();"),
            "const m = new Map();"
        );
    }

    #[test]
    fn test_interface_removed_entirely() {
        let out = erase("interface Point { x: number; y: number }\nconst p = { x: 1, y: 2 };\n");
        assert_eq!(out, "const p = { x: 1, y: 2 };\n");
        assert!(!out.contains("interface"));
    }

    #[test]
    fn test_type_alias_removed_entirely() {
        let out = erase("type ID = string;\nconst id = 'a';\n");
        assert_eq!(out, "const id = 'a';\n");
    }

    #[test]
    fn test_as_expression_unwrapped() {
        assert_eq!(erase("const n = value as number;"), "const n = value;");
    }

    #[test]
    fn test_nested_as_expressions_unwrapped() {
        assert_eq!(
            erase("const n = (value as unknown) as number;"),
            "const n = (value);"
        );
    }

    #[test]
    fn test_angle_bracket_assertion_unwrapped() {
        assert_eq!(erase("const n = <number>value;"), "const n = value;");
    }

    #[test]
    fn test_non_null_assertion_unwrapped() {
        assert_eq!(erase("const v = maybe!;"), "const v = maybe;");
        assert_eq!(erase("const v = obj.field!.inner;"), "const v = obj.field.inner;");
    }

    #[test]
    fn test_satisfies_unwrapped() {
        assert_eq!(
            erase("const cfg = { a: 1 } satisfies Config;"),
            "const cfg = { a: 1 };"
        );
    }

    #[test]
    fn test_parameter_property_becomes_plain_parameter() {
        let out = erase("class Person { constructor(private name: string) {} }");
        assert_eq!(out, "class Person { constructor(name) {} }");
    }

    #[test]
    fn test_readonly_parameter_property() {
        let out = erase("class Person { constructor(public readonly id: number) {} }");
        assert_eq!(out, "class Person { constructor(id) {} }");
    }

    #[test]
    fn test_class_field_modifiers_removed() {
        let out = erase("class C { private count: number = 0; }");
        assert_eq!(out, "class C { count = 0; }");
    }

    #[test]
    fn test_implements_clause_removed() {
        let out = erase("class C implements Runnable { run() {} }");
        assert!(!out.contains("implements"));
        assert!(out.contains("class C"));
        assert!(out.contains("run() {}"));
    }

    #[test]
    fn test_declare_statement_removed() {
        let out = erase("declare const VERSION: string;\nconst x = 1;\n");
        assert_eq!(out, "const x = 1;\n");
    }

    #[test]
    fn test_overload_signature_removed() {
        let out = erase("function f(x: string): string;\nfunction f(x: any) { return x; }\n");
        assert_eq!(out, "function f(x) { return x; }\n");
    }

    #[test]
    fn test_already_untyped_source_is_noop() {
        let src = "const x = 1;\nfunction f(a, b) { return a + b; }\nclass C { run() {} }\n";
        assert_eq!(erase(src), src);
    }

    #[test]
    fn test_comments_and_formatting_preserved() {
        let src = "// keep me\nconst x: number = 1; // inline\n";
        assert_eq!(erase(src), "// keep me\nconst x = 1; // inline\n");
    }
}
