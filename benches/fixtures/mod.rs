// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Synthetic DSL documents for benchmarks.

use std::fmt::Write as _;

/// A document with `nodes` typed declarations spread across `dims`
/// dimensions, plus chained edges between neighbors.
pub fn document(nodes: usize, dims: usize) -> String {
    let mut doc = String::new();
    for dim in 0..dims {
        let _ = writeln!(doc, "dim d{dim}(D_{dim}) \"axis {dim}\"");
    }
    for node in 0..nodes {
        let dim = node % dims.max(1);
        match node % 4 {
            0 => {
                let _ = writeln!(doc, "latent v{node}[d{dim}] ~ Normal(0, 1)");
            }
            1 => {
                let _ = writeln!(doc, "observed v{node}[d{dim}] \"obs {node}\"");
            }
            2 => {
                let _ = writeln!(doc, "fixed v{node}");
            }
            _ => {
                let _ = writeln!(doc, "deterministic v{node}[d{dim}] (f_{node})");
            }
        }
        if node > 0 {
            let _ = writeln!(doc, "v{} -> v{node}", node - 1);
        }
    }
    doc
}
