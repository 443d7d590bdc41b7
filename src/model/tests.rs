// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use crate::format::parse_model;

use super::{containment_tree, Plate};

fn dims(raw: &[&str]) -> Vec<SmolStr> {
    raw.iter().map(|dim| SmolStr::new(dim)).collect()
}

#[test]
fn symbol_uses_label_declared_on_a_later_line() {
    let model = parse_model("latent X[i]\ndim i (k)").expect("parses");
    assert_eq!(model.node("X").expect("X exists").symbol(), "X_{k}");
}

#[test]
fn symbol_subscripts_join_labels_with_commas() {
    let model = parse_model("dim n(N)\ndim d(D)\nlatent w[n,d]").expect("parses");
    assert_eq!(model.node("w").expect("w exists").symbol(), "w_{N,D}");
}

#[test]
fn undeclared_dimension_falls_back_to_raw_id() {
    let model = parse_model("latent x[n]").expect("parses");
    assert_eq!(model.node("x").expect("x exists").symbol(), "x_{n}");
}

#[test]
fn explicit_symbol_survives_refresh() {
    let model = parse_model("latent X[i] (\\theta)\ndim i (k)").expect("parses");
    let x = model.node("X").expect("X exists");
    assert_eq!(x.symbol(), "\\theta");
    assert!(!x.is_auto_symbol());
}

#[test]
fn legacy_default_spelling_is_recomputed() {
    // An authored symbol that happens to spell the raw-id default is treated
    // as derived, so late labels still land.
    let model = parse_model("latent X[i] (X_{i})\ndim i (k)").expect("parses");
    assert_eq!(model.node("X").expect("X exists").symbol(), "X_{k}");
}

#[test]
fn bare_name_spelling_is_recomputed() {
    let model = parse_model("latent X[i] (X)\ndim i (k)").expect("parses");
    assert_eq!(model.node("X").expect("X exists").symbol(), "X_{k}");
}

#[test]
fn node_dims_are_sorted_at_insertion() {
    let model = parse_model("latent z[j,i,a]").expect("parses");
    assert_eq!(model.node("z").expect("z exists").dims(), ["a", "i", "j"]);
}

#[test]
fn containment_root_holds_dimensionless_nodes() {
    let model = parse_model("latent mu\nlatent x[n]").expect("parses");
    let root = containment_tree(&model);
    assert_eq!(root.nodes(), ["mu"]);
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0].dims(), ["n"]);
    assert_eq!(root.children()[0].nodes(), ["x"]);
}

#[test]
fn deeper_dims_container_is_a_strict_descendant() {
    let model = parse_model("latent a[i]\nlatent b[i,j]").expect("parses");
    let root = containment_tree(&model);

    let outer = root.find(&dims(&["i"])).expect("container {i}");
    let inner = root.find(&dims(&["i", "j"])).expect("container {i,j}");
    assert_eq!(inner.nodes(), ["b"]);

    // {i,j} hangs off {i}, never off the root.
    assert!(outer.find(&dims(&["i", "j"])).is_some());
    assert!(!root.children().iter().any(|child| child.dims() == dims(&["i", "j"]).as_slice()));
    assert_eq!(outer.nodes(), ["a"]);
}

#[test]
fn same_dim_set_shares_one_container() {
    let model = parse_model("latent a[i,j]\nlatent b[j,i]").expect("parses");
    let root = containment_tree(&model);
    let container = root.find(&dims(&["i", "j"])).expect("container {i,j}");
    assert_eq!(container.nodes(), ["a", "b"]);
}

#[test]
fn sibling_dims_do_not_share_containers() {
    let model = parse_model("latent a[i]\nlatent b[j]").expect("parses");
    let root = containment_tree(&model);
    assert_eq!(root.children().len(), 2);
    let i_container = root.find(&dims(&["i"])).expect("container {i}");
    assert!(i_container.children().is_empty());
}

#[test]
fn intermediate_containers_are_created_for_deep_paths() {
    // No node lives at {i}; the chain {i} → {i,j} still exists for b.
    let model = parse_model("latent b[i,j]").expect("parses");
    let root = containment_tree(&model);
    let outer = root.find(&dims(&["i"])).expect("container {i}");
    assert!(outer.nodes().is_empty());
    assert_eq!(outer.children().len(), 1);
}

#[test]
fn plate_identity_is_the_exact_sorted_dims_list() {
    let model = parse_model("latent a[i,j]\nlatent c[j,k]").expect("parses");
    let root = containment_tree(&model);
    // Sorted paths: [i]→[i,j] and [j]→[j,k]; the shared dim j does not merge
    // them, prefix identity does.
    assert!(root.find(&dims(&["i", "j"])).is_some());
    assert!(root.find(&dims(&["j", "k"])).is_some());
    assert_eq!(root.children().len(), 2);
}

fn plate_names(plate: &Plate) -> Vec<&str> {
    plate.nodes().iter().map(SmolStr::as_str).collect()
}

#[test]
fn containment_is_stable_across_declaration_order() {
    let forward = parse_model("latent a[i]\nlatent b[i,j]").expect("parses");
    let reversed = parse_model("latent b[i,j]\nlatent a[i]").expect("parses");
    let forward_tree = containment_tree(&forward);
    let reversed_tree = containment_tree(&reversed);

    let forward_outer = forward_tree.find(&dims(&["i"])).expect("container {i}");
    let reversed_outer = reversed_tree.find(&dims(&["i"])).expect("container {i}");
    assert_eq!(plate_names(forward_outer), plate_names(reversed_outer));
}
