// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Minimap: a fixed-size overview of the whole content bounding box with a
//! rectangle depicting the main viewport's visible region.
//!
//! The controller mirrors the viewport's Idle/Dragging state machine but is
//! fully independent of it; a press or drag yields the content point to
//! recenter the main view on.

use crate::layout::Rect;
use crate::model::NodeType;
use crate::render::Scene;

use super::viewport::Viewport;

pub const MINIMAP_WIDTH: f64 = 180.0;
pub const MINIMAP_HEIGHT: f64 = 120.0;

/// Simplified per-type node glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    /// Filled dot: fixed constants.
    Dot,
    /// Rounded rectangle: deterministic nodes.
    RoundedRect,
    /// Circle: everything else.
    Circle,
}

impl GlyphKind {
    pub fn for_node(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Fixed => Self::Dot,
            NodeType::Deterministic => Self::RoundedRect,
            NodeType::Latent | NodeType::Observed => Self::Circle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapGlyph {
    pub kind: GlyphKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Minimap {
    size: (f64, f64),
    content: Option<Rect>,
    scale: f64,
    offset: (f64, f64),
    dragging: bool,
}

impl Default for Minimap {
    fn default() -> Self {
        Self::new()
    }
}

impl Minimap {
    pub fn new() -> Self {
        Self::with_size(MINIMAP_WIDTH, MINIMAP_HEIGHT)
    }

    /// Same controller at a surface-specific overview size (e.g. terminal
    /// cells instead of pixels).
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            size: (width, height),
            content: None,
            scale: 1.0,
            offset: (0.0, 0.0),
            dragging: false,
        }
    }

    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Recomputes the uniform content→overview mapping: one scale fitting
    /// the whole bounding box, leftover margin split evenly on both axes.
    pub fn set_content_bounds(&mut self, bounds: Rect) {
        let (width, height) = self.size;
        let scale = if bounds.width > 0.0 && bounds.height > 0.0 {
            (width / bounds.width).min(height / bounds.height)
        } else {
            1.0
        };
        self.content = Some(bounds);
        self.scale = scale;
        self.offset =
            ((width - bounds.width * scale) / 2.0, (height - bounds.height * scale) / 2.0);
    }

    /// Maps a minimap-space point back to content space via the inverse
    /// scale/offset.
    pub fn to_content(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let content = self.content?;
        Some((
            content.x + (x - self.offset.0) / self.scale,
            content.y + (y - self.offset.1) / self.scale,
        ))
    }

    pub fn to_minimap(&self, content_x: f64, content_y: f64) -> Option<(f64, f64)> {
        let content = self.content?;
        Some((
            self.offset.0 + (content_x - content.x) * self.scale,
            self.offset.1 + (content_y - content.y) * self.scale,
        ))
    }

    /// A primary-button press inside the overview; returns the content
    /// point the main viewport should recenter on.
    pub fn press(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if x < 0.0 || y < 0.0 || x > self.size.0 || y > self.size.1 {
            return None;
        }
        let target = self.to_content(x, y)?;
        self.dragging = true;
        Some(target)
    }

    /// Continued drag; keeps recentering while the press is held.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.dragging {
            return None;
        }
        self.to_content(x, y)
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Node glyphs in minimap space.
    pub fn node_glyphs(&self, scene: &Scene) -> Vec<MinimapGlyph> {
        scene
            .nodes
            .iter()
            .filter_map(|node| {
                let rect = self.project_rect(&node.rect)?;
                Some(MinimapGlyph { kind: GlyphKind::for_node(node.node_type), rect })
            })
            .collect()
    }

    /// Plate outlines in minimap space.
    pub fn plate_rects(&self, scene: &Scene) -> Vec<Rect> {
        scene.plates.iter().filter_map(|plate| self.project_rect(&plate.rect)).collect()
    }

    /// The main viewport's visible content region, projected into the
    /// overview.
    pub fn viewport_rect(&self, viewport: &Viewport) -> Option<Rect> {
        self.project_rect(&viewport.visible_content_rect())
    }

    fn project_rect(&self, rect: &Rect) -> Option<Rect> {
        let (x, y) = self.to_minimap(rect.x, rect.y)?;
        Some(Rect::new(x, y, rect.width * self.scale, rect.height * self.scale))
    }
}
