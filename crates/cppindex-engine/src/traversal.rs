// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Traversal / entity extractor (spec.md §4.4) and URI assembler (§4.6).
//!
//! The traversal threads an explicit namespace context stack through a
//! recursive walk of container node kinds. It never recurses into a
//! node that cannot host a top-level entity definition.

use crate::{canon, comments};
use cppindex_core::{EntityType, ExtractedEntity, ExtractionStats};
use tree_sitter::{Node, Tree};

/// Behavior switches not fixed by spec.md's default traversal rules.
///
/// `extract_linkage_declarations` resolves the Open Question #2
/// inconsistency: whether a bare function declaration (no body) inside
/// an `extern "C" { ... }` block is extracted. Default `false` drops
/// it, matching every other non-definition declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub extract_linkage_declarations: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extract_linkage_declarations: false,
        }
    }
}

/// Join `(repo, file_path, entity_type, entity_name)` into the Global
/// URI. Pure concatenation, no escaping (spec.md §4.6).
#[must_use]
pub fn assemble_uri(
    repo_name: &str,
    file_path: &str,
    entity_type: EntityType,
    entity_name: &str,
) -> String {
    ExtractedEntity::assemble_uri(repo_name, file_path, entity_type, entity_name)
}

/// Walk `tree` and produce every entity record it contains, in source
/// order. Updates `stats.entities_extracted` and `stats.parse_errors`
/// (the two counters this stage is responsible for; `files_processed`
/// and `files_failed` belong to the caller).
#[must_use]
pub fn extract_entities(
    tree: &Tree,
    source: &[u8],
    repo_name: &str,
    file_path: &str,
    config: &ExtractionConfig,
    stats: &mut ExtractionStats,
) -> Vec<ExtractedEntity> {
    let ctx = Ctx {
        source,
        repo_name,
        file_path,
        config,
    };
    let mut out = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    walk_container(tree.root_node(), &mut stack, false, &ctx, &mut out, stats);
    out
}

struct Ctx<'a> {
    source: &'a [u8],
    repo_name: &'a str,
    file_path: &'a str,
    config: &'a ExtractionConfig,
}

/// True if `node` itself or any ancestor is a syntax-error/missing
/// node (spec.md §4.4 "error-node policy").
fn in_error_context(node: Node) -> bool {
    if node.has_error() {
        return true;
    }
    let mut current = node.parent();
    while let Some(p) = current {
        if p.is_error() || p.is_missing() {
            return true;
        }
        current = p.parent();
    }
    false
}

/// Visit every named child of a container node, dispatching each on
/// its kind. Shared by the translation unit, namespace/linkage
/// bodies, and preprocessor-conditional bodies — all of which admit
/// the same set of container-level node kinds.
fn walk_container(
    container: Node,
    stack: &mut Vec<String>,
    in_linkage: bool,
    ctx: &Ctx,
    out: &mut Vec<ExtractedEntity>,
    stats: &mut ExtractionStats,
) {
    let mut cursor = container.walk();
    for child in container.named_children(&mut cursor) {
        dispatch(child, stack, in_linkage, ctx, out, stats);
    }
}

fn dispatch(
    node: Node,
    stack: &mut Vec<String>,
    in_linkage: bool,
    ctx: &Ctx,
    out: &mut Vec<ExtractedEntity>,
    stats: &mut ExtractionStats,
) {
    match node.kind() {
        "namespace_definition" => {
            let pushed = push_namespace_segments(node, ctx.source, stack);
            if let Some(body) = node.child_by_field_name("body") {
                walk_container(body, stack, in_linkage, ctx, out, stats);
            }
            for _ in 0..pushed {
                stack.pop();
            }
        }
        "linkage_specification" => {
            if let Some(body) = node.child_by_field_name("body") {
                walk_container(body, stack, true, ctx, out, stats);
            } else {
                // A single non-braced declaration directly follows the
                // linkage string, e.g. `extern "C" void f();`.
                walk_container(node, stack, true, ctx, out, stats);
            }
        }
        "preproc_ifdef" | "preproc_if" | "preproc_ifndef" | "preproc_else" | "preproc_elif" => {
            // Transparent: same container-dispatch rules apply to
            // every nested declaration, including the `alternative`
            // chain, which tree-sitter exposes as an ordinary named
            // child of this node.
            walk_container(node, stack, in_linkage, ctx, out, stats);
        }
        "template_declaration" => {
            extract_template(node, stack, in_linkage, ctx, out, stats);
        }
        "class_specifier" | "struct_specifier" => {
            try_extract_type(node, node, stack, ctx, out, stats, false);
        }
        "function_definition" => {
            try_extract_function(node, node, stack, ctx, out, stats, false);
        }
        "declaration" => {
            handle_declaration(node, node, stack, in_linkage, ctx, out, stats, false);
        }
        _ => {}
    }
}

/// Push the name of a (possibly nested, e.g. `namespace A::B`)
/// namespace definition onto `stack`; anonymous namespaces push one
/// empty segment. Returns the number of segments pushed, so the
/// caller can pop the same count on the way back out.
fn push_namespace_segments(node: Node, source: &[u8], stack: &mut Vec<String>) -> usize {
    match node.child_by_field_name("name") {
        None => {
            stack.push(String::new());
            1
        }
        Some(name_node) if name_node.kind() == "nested_namespace_specifier" => {
            let mut cursor = name_node.walk();
            let mut count = 0;
            for child in name_node.named_children(&mut cursor) {
                if child.kind() == "namespace_identifier" {
                    stack.push(node_text(child, source));
                    count += 1;
                }
            }
            if count == 0 {
                stack.push(String::new());
                count = 1;
            }
            count
        }
        Some(name_node) => {
            stack.push(node_text(name_node, source));
            1
        }
    }
}

fn node_text(node: Node, source: &[u8]) -> String {
    String::from_utf8_lossy(&source[node.start_byte()..node.end_byte()]).into_owned()
}

/// The inner node of a `template_declaration`: its first named child
/// that is not the parameter list, a requires-clause, or a leading
/// comment.
fn find_template_inner(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|child| {
        !matches!(
            child.kind(),
            "template_parameter_list" | "requires_clause" | "comment"
        )
    })
}

fn extract_template(
    node: Node,
    stack: &mut Vec<String>,
    in_linkage: bool,
    ctx: &Ctx,
    out: &mut Vec<ExtractedEntity>,
    stats: &mut ExtractionStats,
) {
    let Some(inner) = find_template_inner(node) else {
        return;
    };
    match inner.kind() {
        "class_specifier" | "struct_specifier" => {
            try_extract_type(node, inner, stack, ctx, out, stats, true);
        }
        "function_definition" => {
            try_extract_function(node, inner, stack, ctx, out, stats, true);
        }
        "declaration" => {
            handle_declaration(node, inner, stack, in_linkage, ctx, out, stats, true);
        }
        _ => {}
    }
}

/// A bare `declaration` node: either it wraps a class/struct
/// specifier (possibly with no body — forward declaration, dropped),
/// or it is a function-declaration-only prototype, extracted only
/// inside a linkage specification and only when configured to.
/// `outer` is the node used for byte range / line range / doc-comment
/// search (the template wrapper when templated, else `decl` itself).
fn handle_declaration(
    outer: Node,
    decl: Node,
    stack: &mut Vec<String>,
    in_linkage: bool,
    ctx: &Ctx,
    out: &mut Vec<ExtractedEntity>,
    stats: &mut ExtractionStats,
    is_templated: bool,
) {
    if let Some(specifier) = find_class_or_struct_child(decl) {
        try_extract_type(outer, specifier, stack, ctx, out, stats, is_templated);
        return;
    }
    if !in_linkage || !ctx.config.extract_linkage_declarations {
        return;
    }
    let Some(declarator) = decl.child_by_field_name("declarator") else {
        return;
    };
    if is_function_declarator(declarator) {
        try_extract_function(outer, decl, stack, ctx, out, stats, is_templated);
    }
}

/// True if a declarator subtree eventually wraps a `function_declarator`
/// (descending through pointer/reference declarators that nest one).
fn is_function_declarator(mut node: Node) -> bool {
    loop {
        if node.kind() == "function_declarator" {
            return true;
        }
        match node.child_by_field_name("declarator") {
            Some(next) => node = next,
            None => return false,
        }
    }
}

fn find_class_or_struct_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "class_specifier" | "struct_specifier"))
}

/// `entity` is the `class_specifier`/`struct_specifier`; `outer` is
/// the node used for range/doc-comment purposes (may be the same
/// node, a wrapping `declaration`, or a `template_declaration`).
fn try_extract_type(
    outer: Node,
    entity: Node,
    stack: &[String],
    ctx: &Ctx,
    out: &mut Vec<ExtractedEntity>,
    stats: &mut ExtractionStats,
    is_templated: bool,
) {
    if entity.child_by_field_name("body").is_none() {
        return;
    }
    let entity_type = match entity.kind() {
        "class_specifier" => EntityType::Class,
        "struct_specifier" => EntityType::Struct,
        _ => return,
    };
    match canon::canonical_type_name(entity, ctx.source) {
        Some(name) => emit(outer, entity_type, name, stack, ctx, out, stats, is_templated),
        None => {
            if in_error_context(outer) {
                stats.parse_errors += 1;
            }
        }
    }
}

fn try_extract_function(
    outer: Node,
    entity: Node,
    stack: &[String],
    ctx: &Ctx,
    out: &mut Vec<ExtractedEntity>,
    stats: &mut ExtractionStats,
    is_templated: bool,
) {
    let Some(declarator) = entity.child_by_field_name("declarator") else {
        if in_error_context(outer) {
            stats.parse_errors += 1;
        }
        return;
    };
    match canon::canonical_function_name(declarator, ctx.source) {
        Some(name) => emit(
            outer,
            EntityType::Function,
            name,
            stack,
            ctx,
            out,
            stats,
            is_templated,
        ),
        None => {
            if in_error_context(outer) {
                stats.parse_errors += 1;
            }
        }
    }
}

fn emit(
    outer: Node,
    entity_type: EntityType,
    base_name: String,
    stack: &[String],
    ctx: &Ctx,
    out: &mut Vec<ExtractedEntity>,
    stats: &mut ExtractionStats,
    is_templated: bool,
) {
    let entity_name = canon::qualify(stack, &base_name);
    if entity_name.is_empty() {
        return;
    }
    stats.entities_extracted += 1;
    let docstring = comments::aggregate_doc_comment(outer, ctx.source);
    let code_text =
        String::from_utf8_lossy(&ctx.source[outer.start_byte()..outer.end_byte()]).into_owned();
    let start_line = outer.start_position().row + 1;
    let end_line = outer.end_position().row + 1;
    let global_uri = assemble_uri(ctx.repo_name, ctx.file_path, entity_type, &entity_name);
    out.push(ExtractedEntity {
        global_uri,
        repo_name: ctx.repo_name.to_string(),
        file_path: ctx.file_path.to_string(),
        entity_type,
        entity_name,
        docstring,
        code_text,
        start_line,
        end_line,
        is_templated,
    });
}
