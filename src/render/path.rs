// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Smoothed orthogonal paths and direction-aware arrowheads from reconciled
//! point sequences.

use crate::layout::LayoutPoint;

/// Upper bound on the corner rounding radius.
pub const CORNER_RADIUS_MAX: f64 = 12.0;
/// Arrowhead length in screen units; divided by the viewport scale so the
/// drawn size is zoom-independent.
pub const ARROW_SIZE: f64 = 8.0;
/// Half-width of the arrowhead base relative to its length.
pub const ARROW_WIDTH_RATIO: f64 = 0.7;
/// How far before the terminal point the tangent is sampled.
pub const ARROW_TANGENT_ARCLENGTH: f64 = 12.0;

const COLLINEAR_EPS: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(LayoutPoint),
    LineTo(LayoutPoint),
    QuadTo { control: LayoutPoint, to: LayoutPoint },
}

/// Emits a path that runs straight through collinear consecutive segments
/// and rounds every genuine direction change with a quadratic curve of
/// radius `min(CORNER_RADIUS_MAX, half the shorter adjacent segment)`, so a
/// corner never overshoots a short segment.
pub fn smooth_path(points: &[LayoutPoint]) -> Vec<PathCmd> {
    let points = dedup_points(points);
    if points.len() < 2 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(points.len() + 2);
    commands.push(PathCmd::MoveTo(points[0]));

    for idx in 1..points.len() - 1 {
        let before = points[idx - 1];
        let corner = points[idx];
        let after = points[idx + 1];

        let (in_dx, in_dy) = (corner.x - before.x, corner.y - before.y);
        let (out_dx, out_dy) = (after.x - corner.x, after.y - corner.y);
        let cross = in_dx * out_dy - in_dy * out_dx;
        if cross.abs() < COLLINEAR_EPS {
            continue;
        }

        let in_len = (in_dx * in_dx + in_dy * in_dy).sqrt();
        let out_len = (out_dx * out_dx + out_dy * out_dy).sqrt();
        let radius = CORNER_RADIUS_MAX.min(in_len.min(out_len) / 2.0);

        let entry = LayoutPoint::new(
            corner.x - in_dx / in_len * radius,
            corner.y - in_dy / in_len * radius,
        );
        let exit = LayoutPoint::new(
            corner.x + out_dx / out_len * radius,
            corner.y + out_dy / out_len * radius,
        );
        commands.push(PathCmd::LineTo(entry));
        commands.push(PathCmd::QuadTo { control: corner, to: exit });
    }

    commands.push(PathCmd::LineTo(points[points.len() - 1]));
    commands
}

/// An arrowhead at a path's terminal point, oriented along the tangent
/// sampled [`ARROW_TANGENT_ARCLENGTH`] before the tip rather than the raw
/// chord to the previous waypoint, which misorients arrows after short
/// final segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: LayoutPoint,
    /// Unit vector pointing into the tip.
    pub direction: LayoutPoint,
}

impl Arrowhead {
    /// The isosceles triangle for this arrowhead at the given viewport
    /// scale. Dividing by the scale keeps the on-screen size fixed.
    pub fn triangle(&self, scale: f64) -> [LayoutPoint; 3] {
        let size = ARROW_SIZE / scale.max(f64::EPSILON);
        let (ux, uy) = (self.direction.x, self.direction.y);
        let half_width = size * ARROW_WIDTH_RATIO;
        let base_x = self.tip.x - ux * size;
        let base_y = self.tip.y - uy * size;
        [
            self.tip,
            LayoutPoint::new(base_x - uy * half_width, base_y + ux * half_width),
            LayoutPoint::new(base_x + uy * half_width, base_y - ux * half_width),
        ]
    }
}

pub fn arrowhead(points: &[LayoutPoint]) -> Option<Arrowhead> {
    let points = dedup_points(points);
    let tip = *points.last()?;

    let mut remaining = ARROW_TANGENT_ARCLENGTH;
    let mut sample = tip;
    for pair in points.windows(2).rev() {
        let (from, to) = (pair[0], pair[1]);
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let segment = (dx * dx + dy * dy).sqrt();
        if segment >= remaining {
            let t = remaining / segment;
            sample = LayoutPoint::new(to.x - dx * t, to.y - dy * t);
            remaining = 0.0;
            break;
        }
        remaining -= segment;
        sample = from;
    }

    let (dx, dy) = (tip.x - sample.x, tip.y - sample.y);
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f64::EPSILON {
        return None;
    }
    Some(Arrowhead { tip, direction: LayoutPoint::new(dx / length, dy / length) })
}

fn dedup_points(points: &[LayoutPoint]) -> Vec<LayoutPoint> {
    let mut deduped: Vec<LayoutPoint> = Vec::with_capacity(points.len());
    for point in points {
        if deduped.last() != Some(point) {
            deduped.push(*point);
        }
    }
    deduped
}
