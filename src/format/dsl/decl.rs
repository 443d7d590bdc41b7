// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grammars for the three declaration forms: dimensions, typed nodes, and
//! edge chains, plus the node-reference syntax shared by the last two.

use std::sync::OnceLock;

use regex::Regex;
use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::model::{Dimension, NodeType};

use super::tokens::{split_top_level, strip_quotes};
use super::ParseError;

/// A `name` or `name[dim, dim, ...]` occurrence in a declaration or edge
/// chain. Dims are kept in declared order here; canonicalization happens in
/// the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeRef {
    pub name: SmolStr,
    pub dims: SmallVec<[SmolStr; 4]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeDecl {
    pub reference: NodeRef,
    pub node_type: NodeType,
    /// `Some` only when the author wrote a non-empty `(symbol)` group.
    pub symbol: Option<String>,
    pub distribution: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeDir {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EdgeChain {
    pub first: NodeRef,
    pub links: Vec<(EdgeDir, NodeRef)>,
}

fn node_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)(?:\[([^\]]+)\])?$").expect("node ref regex")
    })
}

fn dim_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^dim\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:\(([^)]*)\))?\s*(.*)$")
            .expect("dim decl regex")
    })
}

fn node_decl_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*(?:\[[^\]]+\])?)").expect("node decl ref regex")
    })
}

fn symbol_group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\(([^)]*)\)").expect("symbol group regex"))
}

pub(crate) fn parse_node_ref(raw: &str, line_no: usize) -> Result<NodeRef, ParseError> {
    let trimmed = raw.trim();
    let captures = node_ref_re().captures(trimmed).ok_or_else(|| ParseError::InvalidNodeRef {
        line_no,
        raw: trimmed.to_owned(),
    })?;

    let name = SmolStr::new(&captures[1]);
    let dims = match captures.get(2) {
        Some(dims_raw) => split_top_level(dims_raw.as_str(), ',')
            .into_iter()
            .map(SmolStr::from)
            .collect(),
        None => SmallVec::new(),
    };

    Ok(NodeRef { name, dims })
}

/// `dim <symbol> [(<label>)] [<description>]`
///
/// The display label defaults to the symbol and the description to the
/// symbol as well; a quoted description is unquoted.
pub(crate) fn parse_dim_decl(line: &str, line_no: usize) -> Result<Dimension, ParseError> {
    let captures = dim_decl_re().captures(line).ok_or_else(|| ParseError::InvalidDimDecl {
        line_no,
        line: line.to_owned(),
    })?;

    let id = SmolStr::new(&captures[1]);
    let label = captures
        .get(2)
        .map(|label| label.as_str().trim())
        .filter(|label| !label.is_empty())
        .unwrap_or(id.as_str())
        .to_owned();
    let description = {
        let raw = strip_quotes(captures.get(3).map(|rest| rest.as_str()).unwrap_or(""));
        if raw.is_empty() {
            id.to_string()
        } else {
            raw.to_owned()
        }
    };

    Ok(Dimension::new(id, label, description))
}

/// `<type> <reference> [(<symbol>)] [<description>] [~ <distribution>]`
///
/// The caller has already matched the leading type keyword. The distribution
/// is everything after the first `~`; whatever text remains before it (after
/// the optional symbol group) is the quote-stripped description.
pub(crate) fn parse_node_decl(
    line: &str,
    node_type: NodeType,
    line_no: usize,
) -> Result<NodeDecl, ParseError> {
    let body = line[node_type.keyword().len()..].trim();

    let ref_match =
        node_decl_ref_re().captures(body).ok_or_else(|| ParseError::InvalidNodeDecl {
            line_no,
            line: line.to_owned(),
        })?;
    let ref_raw = ref_match.get(1).expect("group 1 always present").as_str();
    let reference = parse_node_ref(ref_raw, line_no)?;
    let mut rest = body[ref_raw.len()..].trim();

    let mut symbol = None;
    if let Some(sym_match) = symbol_group_re().captures(rest) {
        let explicit = sym_match[1].trim();
        if !explicit.is_empty() {
            symbol = Some(explicit.to_owned());
        }
        rest = rest[sym_match.get(0).expect("whole match").end()..].trim();
    }

    let mut distribution = String::new();
    if let Some(tilde) = rest.find('~') {
        distribution = rest[tilde + 1..].trim().to_owned();
        rest = rest[..tilde].trim();
    }

    let description = {
        let stripped = strip_quotes(rest);
        if stripped.is_empty() {
            None
        } else {
            Some(stripped.to_owned())
        }
    };

    Ok(NodeDecl { reference, node_type, symbol, distribution, description })
}

/// Locates the earliest directional operator in `rest`.
fn find_operator(rest: &str) -> Option<(usize, EdgeDir)> {
    let bytes = rest.as_bytes();
    let forward = memchr::memmem::find(bytes, b"->");
    let backward = memchr::memmem::find(bytes, b"<-");
    match (forward, backward) {
        (Some(f), Some(b)) if b < f => Some((b, EdgeDir::Backward)),
        (Some(f), _) => Some((f, EdgeDir::Forward)),
        (None, Some(b)) => Some((b, EdgeDir::Backward)),
        (None, None) => None,
    }
}

pub(crate) fn line_has_operator(line: &str) -> bool {
    find_operator(line).is_some()
}

/// `ref (-> | <-) ref (-> | <-) ref ...`
///
/// The chain folds left to right; each (ref, op, ref) triple emits one
/// directed edge at the model layer.
pub(crate) fn parse_edge_chain(line: &str, line_no: usize) -> Result<EdgeChain, ParseError> {
    let mut segments = Vec::new();
    let mut ops = Vec::new();
    let mut rest = line;

    while let Some((idx, dir)) = find_operator(rest) {
        segments.push(&rest[..idx]);
        ops.push(dir);
        rest = &rest[idx + 2..];
    }
    segments.push(rest);

    if segments.iter().any(|segment| segment.trim().is_empty()) {
        return Err(ParseError::InvalidEdgeChain { line_no, line: line.to_owned() });
    }

    let mut refs = segments.iter();
    let first = parse_node_ref(refs.next().expect("at least one segment"), line_no)?;
    let mut links = Vec::with_capacity(ops.len());
    for (dir, segment) in ops.into_iter().zip(refs) {
        links.push((dir, parse_node_ref(segment, line_no)?));
    }

    Ok(EdgeChain { first, links })
}
