// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A small deterministic layered placer implementing the oracle contract.
//!
//! This is the collaborator the TUI and the end-to-end tests talk to. The
//! core depends only on the request/response wire contract, never on
//! anything in this module: swapping in an external engine means
//! implementing [`LayoutOracle`] somewhere else.

use std::collections::BTreeMap;

use super::{
    LayoutOracle, LayoutPoint, LayoutRequest, LayoutResponse, OracleError, PlacedShape, Rect,
    RequestShape, RouteSection, RoutedEdge,
};

/// Padding between a plate border and its contents.
const PLATE_PADDING: f64 = 24.0;
/// Padding between the root border and the outermost shapes.
const ROOT_PADDING: f64 = 12.0;
/// Clearance used when routing a self-loop around its node.
const LOOP_CLEARANCE: f64 = 24.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredOracle;

impl LayoutOracle for LayeredOracle {
    fn layout(
        &self,
        request: LayoutRequest,
    ) -> impl std::future::Future<Output = Result<LayoutResponse, OracleError>> + Send {
        std::future::ready(solve(&request))
    }
}

#[derive(Debug, Default)]
struct Shapes {
    /// Leaf ids in request order; the order within a layer.
    leaves: Vec<String>,
    sizes: BTreeMap<String, (f64, f64)>,
    parents: BTreeMap<String, String>,
}

/// Pure placement; the async trait impl is a wrapper around this so callers
/// that want a synchronous reference layout (benches, tests) can have one.
pub fn solve(request: &LayoutRequest) -> Result<LayoutResponse, OracleError> {
    let mut shapes = Shapes::default();
    collect(&request.root, None, &mut shapes);

    let layers = assign_layers(&shapes, request)?;
    let mut absolute = place_leaves(&shapes, &layers, request);
    place_containers(&request.root, &mut absolute);

    let root_rect = absolute[&request.root.id];
    let root = relativize(&request.root, &absolute, root_rect.x, root_rect.y);
    let edges = route_edges(request, &shapes, &absolute)?;

    Ok(LayoutResponse { root, edges })
}

fn collect(shape: &RequestShape, parent: Option<&str>, shapes: &mut Shapes) {
    if let Some(parent) = parent {
        shapes.parents.insert(shape.id.clone(), parent.to_owned());
    }
    if let (Some(width), Some(height)) = (shape.width, shape.height) {
        shapes.leaves.push(shape.id.clone());
        shapes.sizes.insert(shape.id.clone(), (width, height));
    }
    for child in &shape.children {
        collect(child, Some(&shape.id), shapes);
    }
}

/// Longest-path layering from the edge list. Cycles are tolerated: the
/// relaxation is capped at one pass per leaf, after which whatever layers
/// were reached stand.
fn assign_layers(
    shapes: &Shapes,
    request: &LayoutRequest,
) -> Result<BTreeMap<String, usize>, OracleError> {
    let mut layers: BTreeMap<String, usize> =
        shapes.leaves.iter().map(|id| (id.clone(), 0)).collect();

    for edge in &request.edges {
        if !layers.contains_key(&edge.source) {
            return Err(OracleError::new(format!("unknown edge source {}", edge.source)));
        }
        if !layers.contains_key(&edge.target) {
            return Err(OracleError::new(format!("unknown edge target {}", edge.target)));
        }
    }

    for _ in 0..shapes.leaves.len() {
        let mut changed = false;
        for edge in &request.edges {
            if edge.source == edge.target {
                continue;
            }
            let source_layer = layers[&edge.source];
            let target_layer = layers[&edge.target];
            if target_layer <= source_layer {
                layers.insert(edge.target.clone(), source_layer + 1);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    Ok(layers)
}

fn place_leaves(
    shapes: &Shapes,
    layers: &BTreeMap<String, usize>,
    request: &LayoutRequest,
) -> BTreeMap<String, Rect> {
    let layer_count = layers.values().copied().max().map(|max| max + 1).unwrap_or(0);
    let mut columns: Vec<Vec<&String>> = vec![Vec::new(); layer_count];
    for id in &shapes.leaves {
        columns[layers[id]].push(id);
    }

    let spacing = &request.options;
    let mut absolute = BTreeMap::new();
    let mut column_x = 0.0;
    for column in &columns {
        let column_width = column
            .iter()
            .map(|id| shapes.sizes[id.as_str()].0)
            .fold(0.0f64, f64::max);
        let total_height: f64 = column.iter().map(|id| shapes.sizes[id.as_str()].1).sum::<f64>()
            + spacing.node_spacing * column.len().saturating_sub(1) as f64;

        let mut y = -total_height / 2.0;
        for id in column {
            let (width, height) = shapes.sizes[id.as_str()];
            let x = column_x + (column_width - width) / 2.0;
            absolute.insert((*id).clone(), Rect::new(x, y, width, height));
            y += height + spacing.node_spacing;
        }
        column_x += column_width + spacing.layer_spacing;
    }

    absolute
}

/// Bottom-up padded bounding boxes for containers, the root included.
fn place_containers(shape: &RequestShape, absolute: &mut BTreeMap<String, Rect>) {
    if shape.width.is_some() {
        return;
    }
    for child in &shape.children {
        place_containers(child, absolute);
    }

    let padding = if shape.children.is_empty() { 0.0 } else { container_padding(shape) };

    let mut bounds: Option<Rect> = None;
    for child in &shape.children {
        let child_rect = absolute[&child.id];
        bounds = Some(match bounds {
            None => child_rect,
            Some(current) => union(current, child_rect),
        });
    }

    let rect = match bounds {
        Some(inner) => Rect::new(
            inner.x - padding,
            inner.y - padding,
            inner.width + padding * 2.0,
            inner.height + padding * 2.0,
        ),
        None => Rect::new(0.0, 0.0, 0.0, 0.0),
    };
    absolute.insert(shape.id.clone(), rect);
}

fn container_padding(shape: &RequestShape) -> f64 {
    if shape.id == super::ROOT_ID {
        ROOT_PADDING
    } else {
        PLATE_PADDING
    }
}

fn union(a: Rect, b: Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    let right = a.right().max(b.right());
    let bottom = a.bottom().max(b.bottom());
    Rect::new(x, y, right - x, bottom - y)
}

fn relativize(
    shape: &RequestShape,
    absolute: &BTreeMap<String, Rect>,
    parent_x: f64,
    parent_y: f64,
) -> PlacedShape {
    let rect = absolute[&shape.id];
    let children = shape
        .children
        .iter()
        .map(|child| relativize(child, absolute, rect.x, rect.y))
        .collect();
    PlacedShape {
        id: shape.id.clone(),
        x: rect.x - parent_x,
        y: rect.y - parent_y,
        width: rect.width,
        height: rect.height,
        children,
    }
}

/// Orthogonal routes, one section per edge, expressed in the frame of the
/// source node's parent container.
fn route_edges(
    request: &LayoutRequest,
    shapes: &Shapes,
    absolute: &BTreeMap<String, Rect>,
) -> Result<Vec<RoutedEdge>, OracleError> {
    let mut edges = Vec::with_capacity(request.edges.len());

    for edge in &request.edges {
        let source = absolute[&edge.source];
        let target = absolute[&edge.target];
        let frame_id = shapes
            .parents
            .get(&edge.source)
            .cloned()
            .unwrap_or_else(|| request.root.id.clone());
        let frame = absolute[&frame_id];

        let points = if edge.source == edge.target {
            self_loop_points(source)
        } else {
            orthogonal_points(source, target)
        };

        let localized: Vec<LayoutPoint> = points
            .into_iter()
            .map(|point| LayoutPoint::new(point.x - frame.x, point.y - frame.y))
            .collect();

        let (start, rest) = localized.split_first().expect("route has at least two points");
        let (end, bends) = rest.split_last().expect("route has at least two points");
        edges.push(RoutedEdge {
            id: edge.id.clone(),
            sections: vec![RouteSection {
                container: frame_id,
                start_point: *start,
                bend_points: bends.to_vec(),
                end_point: *end,
            }],
        });
    }

    Ok(edges)
}

fn orthogonal_points(source: Rect, target: Rect) -> Vec<LayoutPoint> {
    let start = LayoutPoint::new(source.right(), source.center().y);
    let end = LayoutPoint::new(target.x, target.center().y);

    if (start.y - end.y).abs() < f64::EPSILON {
        return vec![start, end];
    }

    let mid_x = (start.x + end.x) / 2.0;
    vec![
        start,
        LayoutPoint::new(mid_x, start.y),
        LayoutPoint::new(mid_x, end.y),
        end,
    ]
}

fn self_loop_points(node: Rect) -> Vec<LayoutPoint> {
    let out_x = node.right() + LOOP_CLEARANCE;
    let over_y = node.y - LOOP_CLEARANCE;
    let center_x = node.center().x;
    vec![
        LayoutPoint::new(node.right(), node.center().y),
        LayoutPoint::new(out_x, node.center().y),
        LayoutPoint::new(out_x, over_y),
        LayoutPoint::new(center_x, over_y),
        LayoutPoint::new(center_x, node.y),
    ]
}
