// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::layout::Rect;

use crate::format::parse_model;
use crate::model::containment_tree;

use super::{byte_index, cell_in_rect, demo_document};

#[test]
fn byte_index_handles_multibyte_content() {
    assert_eq!(byte_index("abc", 0), 0);
    assert_eq!(byte_index("abc", 2), 2);
    assert_eq!(byte_index("abc", 10), 3);
    assert_eq!(byte_index("αβγ", 1), 2);
    assert_eq!(byte_index("αβγ", 3), 6);
}

#[test]
fn cell_hit_testing_uses_half_open_bounds() {
    let rect = Rect::new(10, 5, 4, 3);
    assert!(cell_in_rect(10, 5, rect));
    assert!(cell_in_rect(13, 7, rect));
    assert!(!cell_in_rect(14, 5, rect));
    assert!(!cell_in_rect(10, 8, rect));
    assert!(!cell_in_rect(9, 5, rect));
}

#[test]
fn demo_document_parses_with_plates_and_edges() {
    let model = parse_model(demo_document()).expect("demo parses");
    assert!(model.dims().len() >= 2);
    assert!(model.edges().len() >= 4);

    let tree = containment_tree(&model);
    assert!(!tree.children().is_empty());
    assert!(!tree.nodes().is_empty());
}
