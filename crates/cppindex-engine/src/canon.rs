// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Name canonicalization (spec.md §4.2): produces a single canonical name
//! string from a declarator subtree and the active namespace stack.

use tree_sitter::Node;

/// Node kinds that terminate the declarator descent with a usable name.
const NAME_BEARING_KINDS: &[&str] = &[
    "identifier",
    "qualified_identifier",
    "destructor_name",
    "operator_name",
    "field_identifier",
    "operator_cast",
];

fn node_text(node: Node, source: &[u8]) -> String {
    String::from_utf8_lossy(&source[node.start_byte()..node.end_byte()]).into_owned()
}

/// Descend a declarator subtree to the innermost name-bearing node,
/// preferring the `declarator` field (mirroring how pointer/reference/
/// function declarators nest) and falling back to a scan of named
/// children for declarator shapes with no `declarator` field (e.g. a bare
/// `function_declarator` whose name is a direct child).
fn find_name_node<'a>(node: Node<'a>) -> Option<Node<'a>> {
    if NAME_BEARING_KINDS.contains(&node.kind()) {
        return Some(node);
    }
    if let Some(declarator) = node.child_by_field_name("declarator") {
        if let Some(found) = find_name_node(declarator) {
            return Some(found);
        }
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(found) = find_name_node(child) {
            return Some(found);
        }
    }
    None
}

/// Collapse whitespace around an `operator` token per spec.md §4.2:
/// symbol operators (`operator==`, `operator[]`) lose all internal
/// whitespace; keyword operators (`operator new`, `operator delete[]`)
/// keep exactly the one mandatory space after `operator`.
fn normalize_operator_name(raw: &str) -> Option<String> {
    let rest = raw.trim().strip_prefix("operator")?.trim();
    if rest.is_empty() {
        return None;
    }
    let starts_with_keyword = rest.starts_with(|c: char| c.is_alphabetic() || c == '_');
    let collapsed: String = rest.split_whitespace().collect();
    if starts_with_keyword {
        Some(format!("operator {collapsed}"))
    } else {
        Some(format!("operator{collapsed}"))
    }
}

/// Produce the canonical name of a conversion operator: `operator` joined
/// with the source slice of its target type, preserved verbatim (it may
/// itself contain internal spaces, e.g. `operator unsigned int`).
fn conversion_operator_name(node: Node, source: &[u8]) -> Option<String> {
    let type_node = node
        .child_by_field_name("type")
        .or_else(|| node.named_child(0))?;
    let type_text = node_text(type_node, source).trim();
    if type_text.is_empty() {
        return None;
    }
    Some(format!("operator {type_text}"))
}

/// Final whitespace/noise check (spec.md §4.2 rule 5): reject anything
/// left containing whitespace of any kind, which would indicate a
/// comment or multi-line token leaked into the name. A single interior
/// space is tolerated only for the keyword-operator and
/// conversion-operator forms spec.md's own worked examples require
/// (`operator new`, `operator int`) — both already produce that space
/// deliberately, so this check runs after normalization, not before.
fn is_clean(name: &str) -> bool {
    !name.is_empty() && !name.contains(['\t', '\n', '\r'])
}

/// Strip every whitespace character from `text`. Used for node kinds
/// (`destructor_name`, `qualified_identifier`) that are legal C++ with
/// interior spaces the grammar permits but spec.md's §3 "no whitespace
/// in `entity_name`" invariant forbids — e.g. `ClassName::~ ClassName`
/// or a qualified operator definition with extra spacing around `::`.
fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Produce the canonical (unqualified) name of a function-like
/// declarator, applying the rules of spec.md §4.2 step 2.
#[must_use]
pub fn canonical_function_name(declarator: Node, source: &[u8]) -> Option<String> {
    let name_node = find_name_node(declarator)?;
    let name = match name_node.kind() {
        "operator_name" => normalize_operator_name(node_text(name_node, source))?,
        "operator_cast" => conversion_operator_name(name_node, source)?,
        "destructor_name" | "qualified_identifier" => {
            strip_whitespace(&node_text(name_node, source))
        }
        _ => node_text(name_node, source).trim().to_string(),
    };
    is_clean(&name).then_some(name)
}

/// Read the `name` field of a class/struct specifier. Anonymous
/// classes/structs (no `name` field) return `None` — they are dropped,
/// never emitted (spec.md §4.2 rule 3).
#[must_use]
pub fn canonical_type_name(specifier: Node, source: &[u8]) -> Option<String> {
    let name_node = specifier.child_by_field_name("name")?;
    let name = node_text(name_node, source).trim().to_string();
    is_clean(&name).then_some(name)
}

/// Prepend the active namespace stack with `::` separators. Empty
/// segments (anonymous namespaces) are transparent and contribute
/// nothing (spec.md §4.2 rule 4).
#[must_use]
pub fn qualify(namespace_stack: &[String], name: &str) -> String {
    let mut segments: Vec<&str> = namespace_stack
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    segments.push(name);
    segments.join("::")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_symbol_has_no_space() {
        assert_eq!(
            normalize_operator_name("operator ==").as_deref(),
            Some("operator==")
        );
        assert_eq!(
            normalize_operator_name("operator[]").as_deref(),
            Some("operator[]")
        );
    }

    #[test]
    fn operator_keyword_keeps_one_space() {
        assert_eq!(
            normalize_operator_name("operator new").as_deref(),
            Some("operator new")
        );
        assert_eq!(
            normalize_operator_name("operator  delete").as_deref(),
            Some("operator delete")
        );
    }

    #[test]
    fn strip_whitespace_removes_all_interior_spaces() {
        assert_eq!(strip_whitespace("~ ClassName"), "~ClassName");
        assert_eq!(strip_whitespace("MyClass :: operator  =="), "MyClass::operator==");
    }

    #[test]
    fn qualify_skips_anonymous_segments() {
        let stack = vec!["A".to_string(), String::new(), "B".to_string()];
        assert_eq!(qualify(&stack, "C"), "A::B::C");
    }

    #[test]
    fn qualify_with_empty_stack_is_unqualified() {
        let stack: Vec<String> = vec![];
        assert_eq!(qualify(&stack, "foo"), "foo");
    }
}
