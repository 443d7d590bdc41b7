// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::format::parse_model;

use super::layered;
use super::{
    build_request, reconcile, LayoutPoint, LayoutResponse, PlacedShape, ReconcileError,
    RequestShape, RouteSection, RoutedEdge, DETERMINISTIC_H, DETERMINISTIC_W, FIXED_SIZE,
    NODE_SIZE, ROOT_ID,
};

fn find_shape<'a>(shape: &'a RequestShape, id: &str) -> Option<&'a RequestShape> {
    if shape.id == id {
        return Some(shape);
    }
    shape.children.iter().find_map(|child| find_shape(child, id))
}

#[test]
fn request_mirrors_the_containment_tree() {
    let model = parse_model("latent mu\nlatent x[n]\nmu -> x").expect("parses");
    let request = build_request(&model);

    assert_eq!(request.root.id, ROOT_ID);
    let mu = find_shape(&request.root, "n:mu").expect("mu shape");
    assert!(mu.children.is_empty());

    let plate = find_shape(&request.root, "p:n").expect("plate shape");
    assert_eq!(plate.width, None);
    assert!(find_shape(plate, "n:x").is_some());

    assert_eq!(request.edges.len(), 1);
    assert_eq!(request.edges[0].id, "e:0");
    assert_eq!(request.edges[0].source, "n:mu");
    assert_eq!(request.edges[0].target, "n:x");
}

#[test]
fn node_sizes_follow_the_type_policy() {
    let model = parse_model("latent a\nobserved b\nfixed c\ndeterministic d").expect("parses");
    let request = build_request(&model);

    let size = |id: &str| {
        let shape = find_shape(&request.root, id).expect("shape");
        (shape.width.expect("width"), shape.height.expect("height"))
    };
    assert_eq!(size("n:a"), (NODE_SIZE, NODE_SIZE));
    assert_eq!(size("n:b"), (NODE_SIZE, NODE_SIZE));
    assert_eq!(size("n:c"), (FIXED_SIZE, FIXED_SIZE));
    assert_eq!(size("n:d"), (DETERMINISTIC_W, DETERMINISTIC_H));
}

#[test]
fn nested_plate_ids_join_sorted_dims() {
    let model = parse_model("latent b[j,i]").expect("parses");
    let request = build_request(&model);
    let outer = find_shape(&request.root, "p:i").expect("outer plate");
    assert!(find_shape(outer, "p:i,j").is_some());
}

#[test]
fn request_schema_is_camel_case_on_the_wire() {
    let model = parse_model("latent a").expect("parses");
    let json = serde_json::to_value(build_request(&model)).expect("serializes");
    let options = json.get("options").expect("options");
    assert!(options.get("nodeSpacing").is_some());
    assert!(options.get("layerSpacing").is_some());
    assert!(options.get("edgeRouting").is_some());
}

fn nested_response() -> LayoutResponse {
    // root at origin; plate at (100, 50) inside root; node at (10, 20)
    // inside the plate.
    LayoutResponse {
        root: PlacedShape {
            id: ROOT_ID.to_owned(),
            x: 0.0,
            y: 0.0,
            width: 400.0,
            height: 300.0,
            children: vec![PlacedShape {
                id: "p:n".to_owned(),
                x: 100.0,
                y: 50.0,
                width: 200.0,
                height: 180.0,
                children: vec![PlacedShape {
                    id: "n:x".to_owned(),
                    x: 10.0,
                    y: 20.0,
                    width: 138.0,
                    height: 138.0,
                    children: Vec::new(),
                }],
            }],
        },
        edges: vec![RoutedEdge {
            id: "e:0".to_owned(),
            sections: vec![
                RouteSection {
                    container: ROOT_ID.to_owned(),
                    start_point: LayoutPoint::new(10.0, 10.0),
                    bend_points: vec![LayoutPoint::new(60.0, 10.0)],
                    end_point: LayoutPoint::new(100.0, 119.0),
                },
                RouteSection {
                    container: "p:n".to_owned(),
                    start_point: LayoutPoint::new(0.0, 69.0),
                    bend_points: Vec::new(),
                    end_point: LayoutPoint::new(10.0, 89.0),
                },
            ],
        }],
    }
}

#[test]
fn reconcile_accumulates_parent_offsets_depth_first() {
    let reconciled = reconcile(&nested_response()).expect("reconciles");

    let plate = reconciled.shape("p:n").expect("plate rect");
    assert_eq!((plate.x, plate.y), (100.0, 50.0));

    let node = reconciled.shape("n:x").expect("node rect");
    assert_eq!((node.x, node.y), (110.0, 70.0));
    assert_eq!((node.width, node.height), (138.0, 138.0));

    assert_eq!(reconciled.bounds().size(), (400.0, 300.0));
}

#[test]
fn reconcile_rebases_each_section_into_its_frame() {
    let reconciled = reconcile(&nested_response()).expect("reconciles");
    let edge = &reconciled.edges()[0];

    // Section 1 is root-relative (offset 0,0); section 2 is plate-relative
    // (offset 100,50). The shared waypoint is kept once.
    assert_eq!(
        edge.points,
        vec![
            LayoutPoint::new(10.0, 10.0),
            LayoutPoint::new(60.0, 10.0),
            LayoutPoint::new(100.0, 119.0),
            LayoutPoint::new(110.0, 139.0),
        ]
    );
}

#[test]
fn reconcile_rejects_unknown_frames() {
    let mut response = nested_response();
    response.edges[0].sections[1].container = "p:ghost".to_owned();
    let err = reconcile(&response).expect_err("unknown frame");
    assert_eq!(
        err,
        ReconcileError::UnknownFrame { edge_id: "e:0".to_owned(), frame: "p:ghost".to_owned() }
    );
}

#[test]
fn layered_solver_honors_the_wire_contract() {
    let model = parse_model(
        "dim n(N)\nlatent mu\nlatent x[n] ~ Normal(mu, 1)\nmu -> x",
    )
    .expect("parses");
    let request = build_request(&model);
    let response = layered::solve(&request).expect("solves");
    let reconciled = reconcile(&response).expect("reconciles");

    let mu = reconciled.shape("n:mu").expect("mu rect");
    let x = reconciled.shape("n:x").expect("x rect");
    let plate = reconciled.shape("p:n").expect("plate rect");

    // Flow is rightward: the edge target sits in a later column.
    assert!(x.x > mu.right());
    // The plate contains its member with padding on every side.
    assert!(plate.x < x.x && plate.right() > x.right());
    assert!(plate.y < x.y && plate.bottom() > x.bottom());
    // The root contains everything.
    let bounds = reconciled.bounds();
    for rect in [mu, x, plate] {
        assert!(rect.x >= bounds.x && rect.right() <= bounds.right());
        assert!(rect.y >= bounds.y && rect.bottom() <= bounds.bottom());
    }

    // One routed edge whose endpoints touch the node rects.
    assert_eq!(reconciled.edges().len(), 1);
    let points = &reconciled.edges()[0].points;
    let start = points.first().expect("start");
    let end = points.last().expect("end");
    assert!((start.x - mu.right()).abs() < 1e-9);
    assert!((end.x - x.x).abs() < 1e-9);
}

#[test]
fn layered_solver_routes_self_loops() {
    let model = parse_model("a -> a").expect("parses");
    let request = build_request(&model);
    let response = layered::solve(&request).expect("solves");
    let reconciled = reconcile(&response).expect("reconciles");
    let points = &reconciled.edges()[0].points;
    assert!(points.len() >= 4);
    assert_ne!(points.first(), points.last());
}

#[test]
fn layered_solver_rejects_unknown_endpoints() {
    let model = parse_model("latent a").expect("parses");
    let mut request = build_request(&model);
    request.edges.push(super::RequestEdge {
        id: "e:0".to_owned(),
        source: "n:a".to_owned(),
        target: "n:ghost".to_owned(),
    });
    assert!(layered::solve(&request).is_err());
}

#[test]
fn layered_solver_tolerates_cycles() {
    let model = parse_model("a -> b\nb -> a").expect("parses");
    let request = build_request(&model);
    let response = layered::solve(&request).expect("solves");
    assert_eq!(response.edges.len(), 2);
}
