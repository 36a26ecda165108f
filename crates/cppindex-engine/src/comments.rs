// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Doc-comment classification and aggregation (spec.md §4.3).
//!
//! Correlation is purely positional: walk named previous siblings of the
//! outer node backward, stopping at the first non-comment sibling or the
//! first blank-line gap. This deliberately ignores tree-semantic
//! attachment — a `// TODO` line interleaved with `///` lines is treated
//! as part of the same block as long as there is no blank line between
//! them.

use tree_sitter::Node;

const DOC_PREFIXES: &[&str] = &["///", "/**", "//!", "/*!"];

/// A comment token whose text begins with one of the doc-comment
/// delimiters.
#[must_use]
pub fn is_doc_comment(text: &str) -> bool {
    DOC_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

/// Concatenate the run of comment nodes immediately preceding `outer`,
/// with no blank-line gap between any two adjacent entries. Returns
/// `None` when no such run exists. Text is preserved verbatim (comment
/// delimiters included); entries are joined with a single newline.
#[must_use]
pub fn aggregate_doc_comment(outer: Node, source: &[u8]) -> Option<String> {
    let mut expected_line = outer.start_position().row;
    let mut collected: Vec<Node> = Vec::new();
    let mut cursor = outer;

    while let Some(prev) = cursor.prev_named_sibling() {
        if prev.kind() != "comment" {
            break;
        }
        let gap = expected_line as i64 - prev.end_position().row as i64;
        if gap > 1 {
            break;
        }
        collected.push(prev);
        expected_line = prev.start_position().row;
        cursor = prev;
    }

    if collected.is_empty() {
        return None;
    }

    collected.reverse();
    let text = collected
        .iter()
        .map(|node| String::from_utf8_lossy(&source[node.start_byte()..node.end_byte()]))
        .collect::<Vec<_>>()
        .join("\n");
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse(src: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_cpp::LANGUAGE.into())
            .unwrap();
        parser.parse(src, None).unwrap()
    }

    #[test]
    fn doc_prefixes_are_recognized() {
        assert!(is_doc_comment("/// hi"));
        assert!(is_doc_comment("/** hi */"));
        assert!(is_doc_comment("//! hi"));
        assert!(is_doc_comment("/*! hi */"));
        assert!(!is_doc_comment("// plain"));
        assert!(!is_doc_comment("/* plain */"));
    }

    #[test]
    fn single_doc_comment_is_attached() {
        let src = "/** brief */\nvoid bar() {}";
        let tree = parse(src);
        let func = tree.root_node().named_child(0).unwrap();
        let doc = aggregate_doc_comment(func, src.as_bytes());
        assert_eq!(doc.as_deref(), Some("/** brief */"));
    }

    #[test]
    fn blank_line_gap_excludes_earlier_block() {
        let src = "/// d1\n/// d2\n\n/// d3\nvoid f() {}";
        let tree = parse(src);
        let func = tree.root_node().named_child(0).unwrap();
        let doc = aggregate_doc_comment(func, src.as_bytes()).unwrap();
        assert_eq!(doc, "/// d3");
    }

    #[test]
    fn plain_comments_are_still_concatenated() {
        let src = "// just a note\nvoid f() {}";
        let tree = parse(src);
        let func = tree.root_node().named_child(0).unwrap();
        let doc = aggregate_doc_comment(func, src.as_bytes());
        assert_eq!(doc.as_deref(), Some("// just a note"));
    }

    #[test]
    fn no_preceding_comment_is_none() {
        let src = "void f() {}";
        let tree = parse(src);
        let func = tree.root_node().named_child(0).unwrap();
        assert_eq!(aggregate_doc_comment(func, src.as_bytes()), None);
    }
}
