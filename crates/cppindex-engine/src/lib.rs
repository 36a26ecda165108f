// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Name canonicalization, doc-comment aggregation, tree traversal, and
//! URI assembly for the C++ structural code-indexing core.
//!
//! `cppindex-parse` turns bytes into a `tree_sitter::Tree`; this crate
//! turns a tree into the canonical `ExtractedEntity` stream for one
//! file. Directory-level orchestration lives in `cppindex-fs`.

pub mod canon;
pub mod comments;
pub mod traversal;

pub use traversal::{assemble_uri, extract_entities, ExtractionConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use cppindex_core::{EntityType, ExtractionStats};
    use tree_sitter::Parser;

    fn parse(src: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_cpp::LANGUAGE.into())
            .unwrap();
        parser.parse(src, None).unwrap()
    }

    fn extract(src: &str, config: &ExtractionConfig) -> (Vec<cppindex_core::ExtractedEntity>, ExtractionStats) {
        let tree = parse(src);
        let mut stats = ExtractionStats::new();
        let entities = extract_entities(&tree, src.as_bytes(), "repo", "a.cpp", config, &mut stats);
        (entities, stats)
    }

    /// Scenario 1 (spec.md §8): a bare top-level function.
    #[test]
    fn top_level_function() {
        let (entities, stats) = extract("void foo() {}", &ExtractionConfig::default());
        assert_eq!(entities.len(), 1);
        let e = &entities[0];
        assert_eq!(e.entity_type, EntityType::Function);
        assert_eq!(e.entity_name, "foo");
        assert_eq!(e.docstring, None);
        assert!(!e.is_templated);
        assert_eq!(e.global_uri, "repo::a.cpp::Function::foo");
        assert_eq!(stats.entities_extracted, 1);
    }

    /// Scenario 2: a doc-commented function.
    #[test]
    fn doc_commented_function() {
        let (entities, _) = extract("/** brief */\nvoid bar() {}", &ExtractionConfig::default());
        assert_eq!(entities.len(), 1);
        let e = &entities[0];
        assert_eq!(e.entity_name, "bar");
        assert_eq!(e.docstring.as_deref(), Some("/** brief */"));
    }

    /// Scenario 3: a class nested two namespaces deep.
    #[test]
    fn nested_namespace_class() {
        let src = "namespace math { namespace inner { class C { void m(); }; } }";
        let (entities, _) = extract(src, &ExtractionConfig::default());
        assert_eq!(entities.len(), 1);
        let e = &entities[0];
        assert_eq!(e.entity_type, EntityType::Class);
        assert_eq!(e.entity_name, "math::inner::C");
    }

    /// Scenario 4: a templated class.
    #[test]
    fn templated_class() {
        let src = "template<typename T> class Stack { void push(T); };";
        let (entities, _) = extract(src, &ExtractionConfig::default());
        assert_eq!(entities.len(), 1);
        let e = &entities[0];
        assert!(e.is_templated);
        assert_eq!(e.entity_type, EntityType::Class);
        assert_eq!(e.entity_name, "Stack");
        assert!(e.code_text.starts_with("template"));
    }

    /// Scenario 5: a forward declaration is dropped, the definition is kept.
    #[test]
    fn forward_declaration_is_dropped() {
        let src = "class Fwd; class Real { int x; };";
        let (entities, _) = extract(src, &ExtractionConfig::default());
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_name, "Real");
    }

    /// Scenario 6: a blank-line gap excludes the earlier doc-comment block.
    #[test]
    fn blank_line_gap_excludes_earlier_comment_block() {
        let src = "/// d1\n/// d2\n\n/// d3\nvoid f() {}";
        let (entities, _) = extract(src, &ExtractionConfig::default());
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].docstring.as_deref(), Some("/// d3"));
    }

    /// Scenario 7: a declaration-only prototype inside `extern "C"`, only
    /// extracted when the caller opts in via `ExtractionConfig`.
    #[test]
    fn linkage_declaration_extracted_only_when_configured() {
        let src = r#"extern "C" { void init(); }"#;

        let (entities, _) = extract(src, &ExtractionConfig::default());
        assert!(entities.is_empty());

        let config = ExtractionConfig {
            extract_linkage_declarations: true,
        };
        let (entities, _) = extract(src, &config);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_name, "init");
        assert_eq!(entities[0].entity_type, EntityType::Function);
    }

    #[test]
    fn anonymous_namespace_is_transparent() {
        let src = "namespace { void f() {} }";
        let (entities, _) = extract(src, &ExtractionConfig::default());
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_name, "f");
    }

    #[test]
    fn source_fidelity_of_code_text() {
        let src = "void foo() {\n  return;\n}";
        let tree = parse(src);
        let mut stats = ExtractionStats::new();
        let entities = extract_entities(
            &tree,
            src.as_bytes(),
            "repo",
            "a.cpp",
            &ExtractionConfig::default(),
            &mut stats,
        );
        let e = &entities[0];
        let outer = tree.root_node().named_child(0).unwrap();
        let expected =
            String::from_utf8_lossy(&src.as_bytes()[outer.start_byte()..outer.end_byte()]);
        assert_eq!(e.code_text, expected);
        assert_eq!(e.start_line, 1);
        assert_eq!(e.end_line, 3);
    }
}
