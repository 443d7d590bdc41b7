// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The canonical graph model: dimensions, typed nodes, directed edges, and
//! the plate containment tree derived from them.

mod graph;
mod plates;
mod symbols;

#[cfg(test)]
mod tests;

pub use graph::{Dimension, Edge, Model, Node, NodeType};
pub use plates::{containment_tree, Plate};
