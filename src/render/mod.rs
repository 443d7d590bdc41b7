// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scene assembly: the drawable primitives a rendering surface consumes.
//!
//! The surface performs no layout of its own: plates, node boxes, edge
//! paths, arrowheads, and labels arrive fully positioned in one absolute
//! content space. Math strings are `$`-delimited for the typesetting
//! collaborator.

use smol_str::SmolStr;

use crate::layout::{node_shape_id, LayoutPoint, Reconciled, Rect};
use crate::model::{Model, NodeType};

pub mod path;


pub use path::{arrowhead, smooth_path, Arrowhead, PathCmd};

/// Margin between the content bounding box and the reconciled layout.
pub const PADDING: f64 = 20.0;

/// A plate rectangle with its legend, outermost plates first.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateBox {
    pub rect: Rect,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub name: SmolStr,
    pub rect: Rect,
    pub node_type: NodeType,
    /// `$`-delimited math symbol.
    pub symbol: String,
    pub description: String,
    /// `$`-delimited distribution expression, when one was declared.
    pub distribution: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub id: String,
    pub commands: Vec<PathCmd>,
    pub arrowhead: Option<Arrowhead>,
}

/// Everything one successful render pass produces for the surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub bounds: Rect,
    pub plates: Vec<PlateBox>,
    pub nodes: Vec<NodeBox>,
    pub edges: Vec<EdgePath>,
}

impl Scene {
    /// The math strings the typesetting collaborator receives, once per
    /// render pass.
    pub fn math_labels(&self) -> Vec<&str> {
        let mut labels = Vec::with_capacity(self.nodes.len() * 2);
        for node in &self.nodes {
            labels.push(node.symbol.as_str());
            if let Some(distribution) = &node.distribution {
                labels.push(distribution.as_str());
            }
        }
        labels
    }
}

/// Assembles the drawable scene from the model and the reconciled layout.
pub fn build_scene(model: &Model, reconciled: &Reconciled) -> Scene {
    let content = reconciled.bounds();
    let offset_x = PADDING - content.x;
    let offset_y = PADDING - content.y;
    let shift = |rect: &Rect| Rect::new(rect.x + offset_x, rect.y + offset_y, rect.width, rect.height);

    let mut plates: Vec<(usize, PlateBox)> = Vec::new();
    for (id, rect) in reconciled.shapes() {
        let Some(dims_raw) = id.strip_prefix("p:") else {
            continue;
        };
        let dims: Vec<&str> = dims_raw.split(',').collect();
        plates.push((dims.len(), PlateBox { rect: shift(rect), title: plate_title(model, &dims) }));
    }
    plates.sort_by_key(|(depth, _)| *depth);
    let plates = plates.into_iter().map(|(_, plate)| plate).collect();

    let mut nodes = Vec::with_capacity(model.nodes().len());
    for node in model.nodes().values() {
        let Some(rect) = reconciled.shape(&node_shape_id(node.name())) else {
            continue;
        };
        let distribution = if node.distribution().is_empty() {
            None
        } else {
            Some(format!("${}$", node.distribution()))
        };
        nodes.push(NodeBox {
            name: node.name().clone(),
            rect: shift(rect),
            node_type: node.node_type(),
            symbol: format!("${}$", node.symbol()),
            description: node.description().to_owned(),
            distribution,
        });
    }

    let mut edges = Vec::with_capacity(reconciled.edges().len());
    for edge in reconciled.edges() {
        let points: Vec<LayoutPoint> = edge
            .points
            .iter()
            .map(|point| LayoutPoint::new(point.x + offset_x, point.y + offset_y))
            .collect();
        edges.push(EdgePath {
            id: edge.id.clone(),
            commands: smooth_path(&points),
            arrowhead: arrowhead(&points),
        });
    }

    let bounds = Rect::new(0.0, 0.0, content.width + PADDING * 2.0, content.height + PADDING * 2.0);
    Scene { bounds, plates, nodes, edges }
}

fn plate_title(model: &Model, dims: &[&str]) -> String {
    let mut title = String::new();
    for (idx, dim_id) in dims.iter().enumerate() {
        if idx > 0 {
            title.push_str(" × ");
        }
        match model.dims().get(*dim_id) {
            Some(dim) => {
                title.push_str(dim.label());
                title.push_str(" (");
                title.push_str(dim.description());
                title.push(')');
            }
            None => title.push_str(dim_id),
        }
    }
    title
}
