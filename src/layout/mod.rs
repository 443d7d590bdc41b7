// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The layout-oracle boundary.
//!
//! The core never lays out a graph itself. It serializes the containment
//! tree, per-node sizes, and the flat edge list into a request, hands it to
//! an oracle, and gets back a tree of parent-relative positions plus routed
//! edges whose sections are expressed in container-local frames. Everything
//! here is the opaque request/response contract; [`reconcile`] turns the
//! response into one absolute coordinate space.
//!
//! The wire schema is camelCase JSON (`serde_json`), matching the external
//! engines this boundary was modeled on.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::model::{containment_tree, Model, NodeType, Plate};

pub mod layered;
mod reconcile;

#[cfg(test)]
mod tests;

pub use reconcile::{reconcile, Reconciled, ReconciledEdge, ReconcileError};

/// Uniform square side for latent/observed nodes.
pub const NODE_SIZE: f64 = 138.0;
/// Square side for "fixed" constant markers.
pub const FIXED_SIZE: f64 = 28.0;
/// Box size for deterministic nodes.
pub const DETERMINISTIC_W: f64 = 150.0;
pub const DETERMINISTIC_H: f64 = 94.0;

/// Per-node size policy, keyed by type.
pub fn node_size(node_type: NodeType) -> (f64, f64) {
    match node_type {
        NodeType::Fixed => (FIXED_SIZE, FIXED_SIZE),
        NodeType::Deterministic => (DETERMINISTIC_W, DETERMINISTIC_H),
        NodeType::Latent | NodeType::Observed => (NODE_SIZE, NODE_SIZE),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in one absolute coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> LayoutPoint {
        LayoutPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// One shape in the hierarchical request: the root, a plate container, or a
/// sized leaf node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestShape {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RequestShape>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Options forwarded verbatim to the oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub algorithm: String,
    pub direction: String,
    pub node_spacing: f64,
    pub layer_spacing: f64,
    pub edge_routing: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            algorithm: "layered".to_owned(),
            direction: "RIGHT".to_owned(),
            node_spacing: 62.0,
            layer_spacing: 84.0,
            edge_routing: "ORTHOGONAL".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub root: RequestShape,
    pub edges: Vec<RequestEdge>,
    pub options: LayoutOptions,
}

/// A positioned shape in the response. `x`/`y` are relative to the parent
/// shape, never absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedShape {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PlacedShape>,
}

/// One routed run of an edge. All points are relative to the shape named by
/// `container`, the local frame the oracle chose for this section. An edge
/// crossing plate boundaries may be split across several sections with
/// different frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSection {
    pub container: String,
    pub start_point: LayoutPoint,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bend_points: Vec<LayoutPoint>,
    pub end_point: LayoutPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedEdge {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<RouteSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResponse {
    pub root: PlacedShape,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<RoutedEdge>,
}

/// Opaque failure from the oracle; not distinguished from other render-pass
/// failures at the display boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleError {
    message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout failed: {}", self.message)
    }
}

impl std::error::Error for OracleError {}

/// The external layout collaborator. Invoked once per render pass; the call
/// is the pipeline's only suspension point and is never cancelled once
/// started.
pub trait LayoutOracle {
    fn layout(
        &self,
        request: LayoutRequest,
    ) -> impl Future<Output = Result<LayoutResponse, OracleError>> + Send;
}

/// Root shape id. Plate ids are `p:` plus the sorted dims joined by commas;
/// node ids are `n:` plus the node name; edge ids are `e:` plus the index in
/// the model's edge list.
pub const ROOT_ID: &str = "root";

pub fn node_shape_id(name: &str) -> String {
    format!("n:{name}")
}

pub fn plate_shape_id(dims: &[SmolStr]) -> String {
    let mut id = String::with_capacity(2 + dims.len() * 4);
    id.push_str("p:");
    for (idx, dim) in dims.iter().enumerate() {
        if idx > 0 {
            id.push(',');
        }
        id.push_str(dim);
    }
    id
}

pub fn edge_wire_id(index: usize) -> String {
    let mut buffer = itoa::Buffer::new();
    let mut id = String::with_capacity(8);
    id.push_str("e:");
    id.push_str(buffer.format(index));
    id
}

/// Serializes the model's containment tree, size policy, and edge list into
/// the oracle's input schema.
pub fn build_request(model: &Model) -> LayoutRequest {
    let tree = containment_tree(model);
    let root = shape_for_plate(model, &tree, ROOT_ID.to_owned());

    let edges = model
        .edges()
        .iter()
        .enumerate()
        .map(|(idx, edge)| RequestEdge {
            id: edge_wire_id(idx),
            source: node_shape_id(edge.source()),
            target: node_shape_id(edge.target()),
        })
        .collect();

    LayoutRequest { root, edges, options: LayoutOptions::default() }
}

fn shape_for_plate(model: &Model, plate: &Plate, id: String) -> RequestShape {
    let mut children = Vec::with_capacity(plate.nodes().len() + plate.children().len());

    for name in plate.nodes() {
        let node = model.node(name).expect("containment tree references known node");
        let (width, height) = node_size(node.node_type());
        children.push(RequestShape {
            id: node_shape_id(name),
            width: Some(width),
            height: Some(height),
            children: Vec::new(),
        });
    }

    for child in plate.children() {
        let child_id = plate_shape_id(child.dims());
        children.push(shape_for_plate(model, child, child_id));
    }

    RequestShape { id, width: None, height: None, children }
}
