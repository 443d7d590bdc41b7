// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use smallvec::SmallVec;
use smol_str::SmolStr;

use super::symbols;

/// A named repetition axis. Immutable once parsed; keyed by its symbol (id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    id: SmolStr,
    label: String,
    description: String,
}

impl Dimension {
    pub fn new(id: SmolStr, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self { id, label: label.into(), description: description.into() }
    }

    pub fn id(&self) -> &SmolStr {
        &self.id
    }

    /// Display math for subscripts and plate legends; defaults to the id.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeType {
    Latent,
    Observed,
    Fixed,
    Deterministic,
}

impl NodeType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "latent" => Some(Self::Latent),
            "observed" => Some(Self::Observed),
            "fixed" => Some(Self::Fixed),
            "deterministic" => Some(Self::Deterministic),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Latent => "latent",
            Self::Observed => "observed",
            Self::Fixed => "fixed",
            Self::Deterministic => "deterministic",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A modeled quantity.
///
/// Nodes are created lazily on first reference (as latent placeholders) or by
/// explicit declaration; later declarations merge into the existing record.
/// The dims list is canonicalized by sort order at insertion, never kept in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: SmolStr,
    dims: SmallVec<[SmolStr; 4]>,
    symbol: String,
    auto_symbol: bool,
    description: String,
    distribution: String,
    node_type: NodeType,
}

impl Node {
    fn placeholder(name: SmolStr) -> Self {
        let symbol = name.to_string();
        let description = name.to_string();
        Self {
            name,
            dims: SmallVec::new(),
            symbol,
            auto_symbol: true,
            description,
            distribution: String::new(),
            node_type: NodeType::Latent,
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    /// Dimension ids, canonicalized by sort order.
    pub fn dims(&self) -> &[SmolStr] {
        &self.dims
    }

    /// Identity key independent of declaration order: the name plus the
    /// sorted dims list, e.g. `x[i,j]` for both `x[i,j]` and `x[j,i]`.
    pub fn canonical_id(&self) -> String {
        symbols::canonical_id(&self.name, &self.dims)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_auto_symbol(&self) -> bool {
        self.auto_symbol
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn distribution(&self) -> &str {
        &self.distribution
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn set_type(&mut self, node_type: NodeType) {
        self.node_type = node_type;
    }

    pub fn set_distribution(&mut self, distribution: impl Into<String>) {
        self.distribution = distribution.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Adopts an explicitly authored symbol; it will survive refreshes.
    pub fn set_symbol(&mut self, symbol: impl Into<String>) {
        self.symbol = symbol.into();
        self.auto_symbol = false;
    }

    /// Marks the symbol as derived so the next refresh recomputes it from
    /// final dimension labels.
    pub fn mark_auto_symbol(&mut self) {
        self.auto_symbol = true;
    }

    fn adopt_dims(&mut self, dims: &[SmolStr]) {
        if self.dims.is_empty() && !dims.is_empty() {
            self.dims = dims.iter().cloned().collect();
            self.dims.sort();
        }
    }
}

/// A directed edge between two nodes, by node name. Duplicates and
/// self-loops are structurally permitted; no dedup or validation happens
/// upstream of the layout oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source: SmolStr,
    target: SmolStr,
}

impl Edge {
    pub fn source(&self) -> &SmolStr {
        &self.source
    }

    pub fn target(&self) -> &SmolStr {
        &self.target
    }
}

/// The canonical graph model: dimensions, nodes, and directed edges.
///
/// Rebuilt from scratch on every parse; there is no incremental mutation
/// across renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    dims: BTreeMap<SmolStr, Dimension>,
    nodes: BTreeMap<SmolStr, Node>,
    edges: Vec<Edge>,
}

impl Model {
    pub fn dims(&self) -> &BTreeMap<SmolStr, Dimension> {
        &self.dims
    }

    pub fn nodes(&self) -> &BTreeMap<SmolStr, Node> {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn insert_dimension(&mut self, dim: Dimension) {
        self.dims.insert(dim.id().clone(), dim);
    }

    /// The single get-or-create accessor every declaration and edge-chain
    /// reference routes through. A miss creates a latent placeholder whose
    /// symbol and description are the bare name; a hit with non-empty `dims`
    /// adopts them (sorted) if the existing record's dims are empty.
    pub fn ensure_node(&mut self, name: &SmolStr, dims: &[SmolStr]) -> &mut Node {
        let node =
            self.nodes.entry(name.clone()).or_insert_with(|| Node::placeholder(name.clone()));
        node.adopt_dims(dims);
        node
    }

    pub fn push_edge(&mut self, source: SmolStr, target: SmolStr) {
        self.edges.push(Edge { source, target });
    }

    /// Recomputes derived symbols against final dimension labels.
    ///
    /// Runs after the whole document has parsed because a dimension's label
    /// may be declared on a later line than a node that uses it. A node is
    /// recomputed when its symbol is flagged as derived or textually matches
    /// one of the legacy default spellings for its name/dims; any other
    /// explicitly authored symbol is left untouched.
    pub fn refresh_symbols(&mut self) {
        let Self { dims, nodes, .. } = self;
        for node in nodes.values_mut() {
            let recompute = node.auto_symbol
                || symbols::default_spellings(&node.name, &node.dims, dims)
                    .iter()
                    .any(|legacy| legacy == &node.symbol);
            if recompute {
                node.symbol = symbols::default_symbol(&node.name, &node.dims, dims);
                node.auto_symbol = true;
            }
        }
    }
}
