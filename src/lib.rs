// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus — plate-notation diagrams for probabilistic graphical models.
//!
//! A small DSL (dimensions, typed variable nodes, directed edges) becomes an
//! interactive plate-notation diagram: parse → canonical model → containment
//! tree → (external layout oracle) → coordinate reconciliation → drawable
//! scene, with a pan/zoom/minimap interaction layer on top.

pub mod format;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod tui;
pub mod view;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
