// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interaction state for the rendered diagram: the pan/zoom viewport and
//! the minimap overview. Both are plain state machines driven by the
//! surface's pointer events; no event wiring lives here.

mod minimap;
mod viewport;


pub use minimap::{GlyphKind, Minimap, MinimapGlyph, MINIMAP_HEIGHT, MINIMAP_WIDTH};
pub use viewport::{Viewport, MAX_FIT_SCALE, MAX_SCALE, MIN_SCALE};
