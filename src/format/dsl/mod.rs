// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The plate DSL: line-oriented declarations of dimensions, typed nodes, and
//! directed edge chains.
//!
//! ```text
//! dim n(N) "samples"
//! latent mu "mean" ~ Normal(0,1)
//! latent x[n] ~ Normal(mu, 1)
//! mu -> x
//! ```
//!
//! Parsing is line-by-line with fixed classification priority: `dim`
//! declarations, then typed node declarations, then edge chains. Anything
//! else is a syntax error carrying its 1-based line number.

use std::fmt;

mod decl;
pub mod tokens;

#[cfg(test)]
mod tests;

use crate::model::{Model, NodeType};

use decl::EdgeDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    InvalidNodeRef {
        line_no: usize,
        raw: String,
    },
    InvalidDimDecl {
        line_no: usize,
        line: String,
    },
    InvalidNodeDecl {
        line_no: usize,
        line: String,
    },
    InvalidEdgeChain {
        line_no: usize,
        line: String,
    },
    UnsupportedSyntax {
        line_no: usize,
        line: String,
    },
}

impl ParseError {
    /// 1-based source line the failure refers to.
    pub fn line_no(&self) -> usize {
        match self {
            Self::InvalidNodeRef { line_no, .. }
            | Self::InvalidDimDecl { line_no, .. }
            | Self::InvalidNodeDecl { line_no, .. }
            | Self::InvalidEdgeChain { line_no, .. }
            | Self::UnsupportedSyntax { line_no, .. } => *line_no,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeRef { line_no, raw } => {
                write!(f, "line {line_no}: invalid node reference: \"{raw}\"")
            }
            Self::InvalidDimDecl { line_no, line } => {
                write!(f, "line {line_no}: invalid dim declaration: \"{line}\"")
            }
            Self::InvalidNodeDecl { line_no, line } => {
                write!(f, "line {line_no}: invalid node declaration: \"{line}\"")
            }
            Self::InvalidEdgeChain { line_no, line } => {
                write!(f, "line {line_no}: invalid edge chain: \"{line}\"")
            }
            Self::UnsupportedSyntax { line_no, line } => write!(
                f,
                "line {line_no}: expected a dim declaration, a typed node declaration \
                 (latent/observed/fixed/deterministic), or an edge chain: \"{line}\""
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a full DSL document into a [`Model`].
///
/// Blank lines and `#` comment lines are skipped. Forward references from
/// edge chains create placeholder nodes that later declarations enrich, and
/// node symbols are refreshed against final dimension labels after the whole
/// document has been read, so declaration order never changes the result.
pub fn parse_model(source: &str) -> Result<Model, ParseError> {
    let mut model = Model::default();

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed.starts_with("dim ") {
            let dim = decl::parse_dim_decl(trimmed, line_no)?;
            model.insert_dimension(dim);
            continue;
        }

        let keyword = trimmed.split_whitespace().next().expect("line is non-empty");
        if let Some(node_type) = NodeType::from_keyword(keyword) {
            apply_node_decl(&mut model, trimmed, node_type, line_no)?;
            continue;
        }

        if decl::line_has_operator(trimmed) {
            apply_edge_chain(&mut model, trimmed, line_no)?;
            continue;
        }

        return Err(ParseError::UnsupportedSyntax { line_no, line: trimmed.to_owned() });
    }

    model.refresh_symbols();
    Ok(model)
}

fn apply_node_decl(
    model: &mut Model,
    line: &str,
    node_type: NodeType,
    line_no: usize,
) -> Result<(), ParseError> {
    let decl = decl::parse_node_decl(line, node_type, line_no)?;

    let description = decl.description.unwrap_or_else(|| decl.reference.name.to_string());
    let node = model.ensure_node(&decl.reference.name, &decl.reference.dims);
    node.set_type(decl.node_type);
    node.set_distribution(decl.distribution);
    node.set_description(description);
    match decl.symbol {
        Some(symbol) => node.set_symbol(symbol),
        None => node.mark_auto_symbol(),
    }

    Ok(())
}

fn apply_edge_chain(model: &mut Model, line: &str, line_no: usize) -> Result<(), ParseError> {
    let chain = decl::parse_edge_chain(line, line_no)?;

    model.ensure_node(&chain.first.name, &chain.first.dims);
    let mut current = chain.first.name.clone();
    for (dir, next) in chain.links {
        model.ensure_node(&next.name, &next.dims);
        match dir {
            EdgeDir::Forward => model.push_edge(current.clone(), next.name.clone()),
            EdgeDir::Backward => model.push_edge(next.name.clone(), current.clone()),
        }
        current = next.name;
    }

    Ok(())
}
