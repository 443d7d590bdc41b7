// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plate containment: the nested container hierarchy the layout oracle
//! consumes in hierarchical (non-crossing) mode.

use smol_str::SmolStr;

use super::graph::Model;

/// A plate container identified by its exact sorted dims list; the root has
/// an empty list. The container for `[d0..dk]` is always parented by the
/// container for `[d0..d(k-1)]`, so containment mirrors the
/// dimension-prefix relation and plates never cross.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plate {
    dims: Vec<SmolStr>,
    nodes: Vec<SmolStr>,
    children: Vec<Plate>,
}

impl Plate {
    fn new(dims: Vec<SmolStr>) -> Self {
        Self { dims, nodes: Vec::new(), children: Vec::new() }
    }

    /// Sorted dims identifying this container; empty at the root.
    pub fn dims(&self) -> &[SmolStr] {
        &self.dims
    }

    /// Names of the nodes whose full dims list equals this container's.
    pub fn nodes(&self) -> &[SmolStr] {
        &self.nodes
    }

    pub fn children(&self) -> &[Plate] {
        &self.children
    }

    /// Looks up the container with exactly `dims`, anywhere below (or at)
    /// this one.
    pub fn find(&self, dims: &[SmolStr]) -> Option<&Plate> {
        if self.dims == dims {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(dims))
    }

    fn child_entry(&mut self, dims: &[SmolStr]) -> &mut Plate {
        let position = self.children.iter().position(|child| child.dims == dims);
        match position {
            Some(idx) => &mut self.children[idx],
            None => {
                self.children.push(Plate::new(dims.to_vec()));
                self.children.last_mut().expect("just pushed")
            }
        }
    }
}

/// Builds the containment tree for `model`.
///
/// Each node's plate path is its canonical sorted dims list; containers are
/// created top-down and de-duplicated by full sorted-dims identity, so two
/// nodes with the same dims set land in the same container regardless of
/// declaration order, and a container with dims `[d]` is shared by every
/// deeper container whose sorted list starts with `d`.
pub fn containment_tree(model: &Model) -> Plate {
    let mut root = Plate::new(Vec::new());

    for node in model.nodes().values() {
        let dims = node.dims();
        let mut plate = &mut root;
        for depth in 1..=dims.len() {
            plate = plate.child_entry(&dims[..depth]);
        }
        plate.nodes.push(node.name().clone());
    }

    root
}
