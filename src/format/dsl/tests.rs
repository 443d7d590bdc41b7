// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use crate::model::NodeType;

use super::tokens::split_top_level;
use super::{parse_model, ParseError};

#[test]
fn tokenize_keeps_quoted_delimiters_literal() {
    let parts = split_top_level(r#"a, "b,c", d"#, ',');
    assert_eq!(parts, vec!["a".to_owned(), "\"b,c\"".to_owned(), "d".to_owned()]);
}

#[test]
fn tokenize_ignores_delimiters_inside_brackets() {
    let parts = split_top_level("f(a, b), g[c, d], {e, f}", ',');
    assert_eq!(parts, vec!["f(a, b)".to_owned(), "g[c, d]".to_owned(), "{e, f}".to_owned()]);
}

#[test]
fn tokenize_escaped_quote_does_not_close() {
    let parts = split_top_level(r#""a\"b,c", d"#, ',');
    assert_eq!(parts, vec![r#""a\"b,c""#.to_owned(), "d".to_owned()]);
}

#[test]
fn tokenize_unterminated_quote_runs_to_end() {
    let parts = split_top_level(r#"a, "b,c"#, ',');
    assert_eq!(parts, vec!["a".to_owned(), "\"b,c".to_owned()]);
}

#[test]
fn tokenize_unbalanced_close_is_floored() {
    let parts = split_top_level("a), b", ',');
    assert_eq!(parts, vec!["a)".to_owned(), "b".to_owned()]);
}

#[test]
fn tokenize_drops_empty_parts() {
    let parts = split_top_level("a,,  ,b", ',');
    assert_eq!(parts, vec!["a".to_owned(), "b".to_owned()]);
}

#[rstest]
#[case("dim n", "n", "n", "n")]
#[case("dim n(N)", "n", "N", "n")]
#[case("dim n(N) \"samples\"", "n", "N", "samples")]
#[case("dim i (k)", "i", "k", "i")]
#[case("dim i (k) repetitions", "i", "k", "repetitions")]
fn dim_declaration_forms(
    #[case] line: &str,
    #[case] id: &str,
    #[case] label: &str,
    #[case] description: &str,
) {
    let model = parse_model(line).expect("dim parses");
    let dim = model.dims().get(id).expect("dim exists");
    assert_eq!(dim.label(), label);
    assert_eq!(dim.description(), description);
}

#[test]
fn dim_with_invalid_identifier_fails() {
    let err = parse_model("dim 9x").expect_err("invalid dim");
    assert!(matches!(err, ParseError::InvalidDimDecl { line_no: 1, .. }));
}

#[test]
fn node_declaration_full_form() {
    let model = parse_model("latent mu \"mean\" ~ Normal(0,1)").expect("node parses");
    let node = model.node("mu").expect("mu exists");
    assert_eq!(node.node_type(), NodeType::Latent);
    assert_eq!(node.description(), "mean");
    assert_eq!(node.distribution(), "Normal(0,1)");
    assert_eq!(node.symbol(), "mu");
    assert!(node.is_auto_symbol());
}

#[test]
fn node_declaration_with_explicit_symbol() {
    let model = parse_model("observed y[n] (y_obs) ~ Normal(mu, 1)").expect("node parses");
    let node = model.node("y").expect("y exists");
    assert_eq!(node.node_type(), NodeType::Observed);
    assert_eq!(node.symbol(), "y_obs");
    assert!(!node.is_auto_symbol());
    assert_eq!(node.dims(), ["n"]);
}

#[rstest]
#[case("latent", NodeType::Latent)]
#[case("observed", NodeType::Observed)]
#[case("fixed", NodeType::Fixed)]
#[case("deterministic", NodeType::Deterministic)]
fn all_node_types_parse(#[case] keyword: &str, #[case] node_type: NodeType) {
    let model = parse_model(&format!("{keyword} v")).expect("node parses");
    assert_eq!(model.node("v").expect("v exists").node_type(), node_type);
}

#[test]
fn missing_type_keyword_is_a_line_one_error() {
    let err = parse_model("node X").expect_err("unknown keyword");
    assert!(matches!(err, ParseError::UnsupportedSyntax { line_no: 1, .. }));
    assert_eq!(err.line_no(), 1);
}

#[test]
fn error_carries_one_based_line_number() {
    let err = parse_model("dim n\n\n# comment\n???").expect_err("bad line");
    assert_eq!(err.line_no(), 4);
}

#[test]
fn edge_chain_folds_left_to_right() {
    let model = parse_model("a -> b -> c").expect("chain parses");
    let edges: Vec<(&str, &str)> = model
        .edges()
        .iter()
        .map(|edge| (edge.source().as_str(), edge.target().as_str()))
        .collect();
    assert_eq!(edges, vec![("a", "b"), ("b", "c")]);
}

#[test]
fn backward_operator_reverses_direction() {
    let model = parse_model("a <- b <- c").expect("chain parses");
    let edges: Vec<(&str, &str)> = model
        .edges()
        .iter()
        .map(|edge| (edge.source().as_str(), edge.target().as_str()))
        .collect();
    assert_eq!(edges, vec![("b", "a"), ("c", "b")]);
}

#[test]
fn dangling_operator_fails() {
    let err = parse_model("a ->").expect_err("dangling operator");
    assert!(matches!(err, ParseError::InvalidEdgeChain { line_no: 1, .. }));
}

#[test]
fn forward_reference_creates_latent_placeholder() {
    let model = parse_model("A -> B").expect("edge parses");
    let b = model.node("B").expect("placeholder exists");
    assert_eq!(b.node_type(), NodeType::Latent);
    assert_eq!(b.symbol(), "B");
    assert!(b.dims().is_empty());
}

#[test]
fn later_declaration_enriches_placeholder() {
    let source = "mu -> x\nlatent x[n] \"data\" ~ Normal(mu, 1)";
    let model = parse_model(source).expect("parses");
    let x = model.node("x").expect("x exists");
    assert_eq!(x.dims(), ["n"]);
    assert_eq!(x.description(), "data");
    assert_eq!(x.distribution(), "Normal(mu, 1)");
}

#[test]
fn reference_dims_adopted_only_when_empty() {
    let model = parse_model("latent x[n]\nx[m] -> y").expect("parses");
    assert_eq!(model.node("x").expect("x exists").dims(), ["n"]);
}

#[test]
fn reversed_dim_order_is_one_canonical_node() {
    let model = parse_model("x[i,j] -> a\nx[j,i] -> b").expect("parses");
    assert_eq!(model.nodes().len(), 3);
    let x = model.node("x").expect("x exists");
    assert_eq!(x.canonical_id(), "x[i,j]");
}

#[test]
fn duplicate_edges_and_self_loops_are_kept() {
    let model = parse_model("a -> b\na -> b\na -> a").expect("parses");
    assert_eq!(model.edges().len(), 3);
}

#[test]
fn parsing_is_idempotent() {
    let source = "\
dim n(N) \"samples\"
dim d(D)
latent w[d] ~ Normal(0, 1)
observed x[n,d]
w -> y <- x
";
    let first = parse_model(source).expect("first parse");
    let second = parse_model(source).expect("second parse");
    assert_eq!(first, second);
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let model = parse_model("# heading\n\n   \ndim n\n# trailing").expect("parses");
    assert_eq!(model.dims().len(), 1);
    assert!(model.nodes().is_empty());
}

#[test]
fn operator_inside_distribution_still_declares_node() {
    // Classification checks the type keyword before scanning for operators.
    let model = parse_model("deterministic f ~ map(x -> x)").expect("parses");
    let node = model.node("f").expect("f exists");
    assert_eq!(node.node_type(), NodeType::Deterministic);
    assert_eq!(node.distribution(), "map(x -> x)");
    assert!(model.edges().is_empty());
}
