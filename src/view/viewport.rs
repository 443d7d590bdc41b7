// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pan/zoom state machine for the main diagram view.
//!
//! All math is in two spaces: *content* (the reconciled absolute space) and
//! *screen* (surface units). The viewport transform is
//! `screen = content * scale + translation`.

use crate::layout::Rect;

pub const MIN_SCALE: f64 = 0.2;
pub const MAX_SCALE: f64 = 3.5;
/// Fit-to-window never zooms in beyond this.
pub const MAX_FIT_SCALE: f64 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragPhase {
    Idle,
    Dragging { origin: (f64, f64), anchor: (f64, f64) },
}

/// Explicit state threaded through the surface, never ambient globals.
/// Rebuilt content bounds only refit the view when the content *dimensions*
/// change; re-renders with an unchanged bounding box preserve pan/zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    translation: (f64, f64),
    drag: DragPhase,
    pan_enabled: bool,
    content: Option<Rect>,
    viewport_size: (f64, f64),
    refit_pending: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            translation: (0.0, 0.0),
            drag: DragPhase::Idle,
            pan_enabled: true,
            content: None,
            viewport_size: (0.0, 0.0),
            refit_pending: false,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translation(&self) -> (f64, f64) {
        self.translation
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragPhase::Dragging { .. })
    }

    pub fn set_pan_enabled(&mut self, enabled: bool) {
        self.pan_enabled = enabled;
        if !enabled {
            self.drag = DragPhase::Idle;
        }
    }

    pub fn content_bounds(&self) -> Option<Rect> {
        self.content
    }

    /// Updates the surface size. Resizes alone never refit; a refit deferred
    /// for want of a usable size runs as soon as one arrives.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = (width, height);
        if self.refit_pending && width > 0.0 && height > 0.0 {
            self.refit_pending = false;
            self.fit_to_window();
        }
    }

    /// Records the content bounding box of a successful render. A change in
    /// content dimensions triggers exactly one automatic refit; otherwise
    /// the current pan/zoom is preserved.
    pub fn set_content_bounds(&mut self, bounds: Rect) {
        let dims_changed = self.content.map(|current| current.size()) != Some(bounds.size());
        self.content = Some(bounds);
        if dims_changed {
            if self.viewport_size.0 > 0.0 && self.viewport_size.1 > 0.0 {
                self.fit_to_window();
            } else {
                self.refit_pending = true;
            }
        }
    }

    /// scale = min(viewport/content width ratio, viewport/content height
    /// ratio, [`MAX_FIT_SCALE`]); translation centers the content.
    pub fn fit_to_window(&mut self) {
        let Some(content) = self.content else {
            return;
        };
        let (view_w, view_h) = self.viewport_size;
        if view_w <= 0.0 || view_h <= 0.0 {
            self.refit_pending = true;
            return;
        }
        self.scale = (view_w / content.width).min(view_h / content.height).min(MAX_FIT_SCALE);
        self.translation = (
            (view_w - content.width * self.scale) / 2.0 - content.x * self.scale,
            (view_h - content.height * self.scale) / 2.0 - content.y * self.scale,
        );
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, primary: bool) {
        if !primary || !self.pan_enabled {
            return;
        }
        self.drag = DragPhase::Dragging { origin: self.translation, anchor: (x, y) };
    }

    /// While dragging, translation = drag-start translation + screen-space
    /// pointer delta; the delta is scale-independent.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let DragPhase::Dragging { origin, anchor } = self.drag {
            self.translation = (origin.0 + x - anchor.0, origin.1 + y - anchor.1);
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragPhase::Idle;
    }

    pub fn pointer_cancel(&mut self) {
        self.drag = DragPhase::Idle;
    }

    /// Rescales about a screen anchor so the content point currently under
    /// the anchor stays under it. The scale is clamped to
    /// [[`MIN_SCALE`], [`MAX_SCALE`]].
    pub fn zoom_at(&mut self, factor: f64, anchor_x: f64, anchor_y: f64) {
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = new_scale / self.scale;
        self.translation = (
            anchor_x - (anchor_x - self.translation.0) * ratio,
            anchor_y - (anchor_y - self.translation.1) * ratio,
        );
        self.scale = new_scale;
    }

    /// Centers the view on a content point at the current scale.
    pub fn center_on(&mut self, content_x: f64, content_y: f64) {
        let (view_w, view_h) = self.viewport_size;
        self.translation =
            (view_w / 2.0 - content_x * self.scale, view_h / 2.0 - content_y * self.scale);
    }

    /// Nudges the translation in screen space (keyboard panning).
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translation = (self.translation.0 + dx, self.translation.1 + dy);
    }

    pub fn to_content(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.translation.0) / self.scale,
            (screen_y - self.translation.1) / self.scale,
        )
    }

    pub fn to_screen(&self, content_x: f64, content_y: f64) -> (f64, f64) {
        (
            content_x * self.scale + self.translation.0,
            content_y * self.scale + self.translation.1,
        )
    }

    /// The content region currently visible through the surface.
    pub fn visible_content_rect(&self) -> Rect {
        let (x, y) = self.to_content(0.0, 0.0);
        Rect::new(x, y, self.viewport_size.0 / self.scale, self.viewport_size.1 / self.scale)
    }
}
