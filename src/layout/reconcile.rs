// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flattens the oracle's hierarchical relative output into one absolute
//! coordinate space.

use std::collections::BTreeMap;
use std::fmt;

use super::{LayoutPoint, LayoutResponse, Rect, RoutedEdge};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// An edge section names a local frame that is not a shape in the
    /// response tree.
    UnknownFrame { edge_id: String, frame: String },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFrame { edge_id, frame } => {
                write!(f, "edge {edge_id} routed in unknown frame {frame}")
            }
        }
    }
}

impl std::error::Error for ReconcileError {}

/// An edge's routing points, concatenated across sections, in absolute
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledEdge {
    pub id: String,
    pub points: Vec<LayoutPoint>,
}

/// The whole response in one absolute space: every shape id mapped to its
/// absolute rectangle, every edge to an absolute point sequence, and the
/// content bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    shapes: BTreeMap<String, Rect>,
    edges: Vec<ReconciledEdge>,
    bounds: Rect,
}

impl Reconciled {
    pub fn shapes(&self) -> &BTreeMap<String, Rect> {
        &self.shapes
    }

    pub fn shape(&self, id: &str) -> Option<&Rect> {
        self.shapes.get(id)
    }

    pub fn edges(&self) -> &[ReconciledEdge] {
        &self.edges
    }

    /// The root shape's absolute rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Depth-first accumulates absolute position = parent absolute position +
/// own relative position, then rebases every edge section's points by the
/// absolute offset of its declared local frame. The oracle expresses each
/// section in a frame local to its routing container, never globally, so
/// this rebase is what makes multi-hop edges line up.
pub fn reconcile(response: &LayoutResponse) -> Result<Reconciled, ReconcileError> {
    let mut shapes = BTreeMap::new();
    flatten(&response.root, 0.0, 0.0, &mut shapes);
    let bounds = shapes[&response.root.id];

    let mut edges = Vec::with_capacity(response.edges.len());
    for edge in &response.edges {
        edges.push(rebase_edge(edge, &shapes)?);
    }

    Ok(Reconciled { shapes, edges, bounds })
}

fn flatten(
    shape: &super::PlacedShape,
    parent_x: f64,
    parent_y: f64,
    shapes: &mut BTreeMap<String, Rect>,
) {
    let x = parent_x + shape.x;
    let y = parent_y + shape.y;
    shapes.insert(shape.id.clone(), Rect::new(x, y, shape.width, shape.height));
    for child in &shape.children {
        flatten(child, x, y, shapes);
    }
}

fn rebase_edge(
    edge: &RoutedEdge,
    shapes: &BTreeMap<String, Rect>,
) -> Result<ReconciledEdge, ReconcileError> {
    let mut points: Vec<LayoutPoint> = Vec::new();

    for section in &edge.sections {
        let frame = shapes.get(&section.container).ok_or_else(|| ReconcileError::UnknownFrame {
            edge_id: edge.id.clone(),
            frame: section.container.clone(),
        })?;

        let section_points = std::iter::once(&section.start_point)
            .chain(section.bend_points.iter())
            .chain(std::iter::once(&section.end_point));
        for point in section_points {
            let absolute = LayoutPoint::new(point.x + frame.x, point.y + frame.y);
            // Consecutive sections meet at a shared waypoint; keep it once.
            if points.last() != Some(&absolute) {
                points.push(absolute);
            }
        }
    }

    Ok(ReconciledEdge { id: edge.id.clone(), points })
}
