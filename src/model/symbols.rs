// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Default math-symbol derivation for nodes.

use std::collections::BTreeMap;

use smol_str::SmolStr;

use super::graph::Dimension;

/// `name` for a dimension-less node, else the name subscripted by the
/// sorted dims, e.g. `x[i,j]`.
pub(crate) fn canonical_id(name: &SmolStr, sorted_dims: &[SmolStr]) -> String {
    if sorted_dims.is_empty() {
        return name.to_string();
    }
    let mut id = String::with_capacity(name.len() + 2 + sorted_dims.len() * 4);
    id.push_str(name);
    id.push('[');
    for (idx, dim) in sorted_dims.iter().enumerate() {
        if idx > 0 {
            id.push(',');
        }
        id.push_str(dim);
    }
    id.push(']');
    id
}

/// The derived symbol: the bare name, or the name subscripted by the
/// dimensions' display labels joined by commas. An undeclared dimension
/// falls back to its raw id as the label.
pub(crate) fn default_symbol(
    name: &SmolStr,
    sorted_dims: &[SmolStr],
    dims: &BTreeMap<SmolStr, Dimension>,
) -> String {
    if sorted_dims.is_empty() {
        return name.to_string();
    }
    subscripted(name, sorted_dims.iter().map(|dim| dim_label(dim, dims)))
}

/// Spellings a derived symbol may have carried in earlier documents: the
/// bare name, the raw-id subscript, and the current-label subscript. A
/// symbol matching any of these is treated as derived and recomputed.
pub(crate) fn default_spellings(
    name: &SmolStr,
    sorted_dims: &[SmolStr],
    dims: &BTreeMap<SmolStr, Dimension>,
) -> Vec<String> {
    let mut spellings = vec![name.to_string()];
    if !sorted_dims.is_empty() {
        spellings.push(subscripted(name, sorted_dims.iter().map(SmolStr::as_str)));
        spellings.push(subscripted(name, sorted_dims.iter().map(|dim| dim_label(dim, dims))));
    }
    spellings
}

fn dim_label<'a>(dim: &'a SmolStr, dims: &'a BTreeMap<SmolStr, Dimension>) -> &'a str {
    dims.get(dim).map(Dimension::label).unwrap_or(dim.as_str())
}

fn subscripted<'a>(name: &SmolStr, labels: impl Iterator<Item = &'a str>) -> String {
    let mut symbol = String::with_capacity(name.len() + 8);
    symbol.push_str(name);
    symbol.push_str("_{");
    for (idx, label) in labels.enumerate() {
        if idx > 0 {
            symbol.push(',');
        }
        symbol.push_str(label);
    }
    symbol.push('}');
    symbol
}
