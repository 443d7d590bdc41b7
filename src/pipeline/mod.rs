// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The render pipeline: parse → build → (await layout) → reconcile → scene.
//!
//! Edits schedule a pass after a short quiet period; a newer edit cancels a
//! pass that is still waiting out the debounce, but never one whose layout
//! call is already in flight. When two passes overlap, the one that
//! completes last overwrites the displayed state; completion order is the
//! only ordering guarantee.
//!
//! A failed pass of any stage (parse, layout, typesetting) aborts in full
//! and replaces only the error surface; the previously rendered scene stays
//! in place until the next successful pass.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::format::{parse_model, ParseError};
use crate::layout::{build_request, reconcile, LayoutOracle, OracleError, ReconcileError};
use crate::render::{build_scene, Scene};


/// Quiet period between the last edit and the pass it schedules.
pub const DEBOUNCE: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesetError {
    message: String,
}

impl TypesetError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for TypesetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "typesetting failed: {}", self.message)
    }
}

impl std::error::Error for TypesetError {}

/// The math-typesetting collaborator; invoked once per render pass with
/// every `$`-delimited string in the scene.
pub trait Typesetter {
    fn typeset(&self, math: &[&str]) -> impl Future<Output = Result<(), TypesetError>> + Send;
}

/// For surfaces that draw math strings as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTypesetter;

impl Typesetter for NoopTypesetter {
    fn typeset(&self, _math: &[&str]) -> impl Future<Output = Result<(), TypesetError>> + Send {
        std::future::ready(Ok(()))
    }
}

/// Any failure aborting a render pass. The display boundary does not
/// distinguish layout or typesetting failures from parse failures; all of
/// them surface as one message.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    Parse(ParseError),
    Layout(OracleError),
    Reconcile(ReconcileError),
    Typeset(TypesetError),
}

impl RenderError {
    /// 1-based source line, for failures that refer to one.
    pub fn line_no(&self) -> Option<usize> {
        match self {
            Self::Parse(err) => Some(err.line_no()),
            _ => None,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => fmt::Display::fmt(err, f),
            Self::Layout(err) => fmt::Display::fmt(err, f),
            Self::Reconcile(err) => fmt::Display::fmt(err, f),
            Self::Typeset(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ParseError> for RenderError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<OracleError> for RenderError {
    fn from(err: OracleError) -> Self {
        Self::Layout(err)
    }
}

impl From<ReconcileError> for RenderError {
    fn from(err: ReconcileError) -> Self {
        Self::Reconcile(err)
    }
}

impl From<TypesetError> for RenderError {
    fn from(err: TypesetError) -> Self {
        Self::Typeset(err)
    }
}

/// One full pass over a DSL document. The await on the oracle is the only
/// suspension point.
pub async fn render_pass<O: LayoutOracle, T: Typesetter>(
    source: &str,
    oracle: &O,
    typesetter: &T,
) -> Result<Scene, RenderError> {
    let model = parse_model(source)?;
    let request = build_request(&model);
    let response = oracle.layout(request).await?;
    let reconciled = reconcile(&response)?;
    let scene = build_scene(&model, &reconciled);
    typesetter.typeset(&scene.math_labels()).await?;
    Ok(scene)
}

/// What the surface draws: the last successfully rendered scene and the
/// current error message, if any. Errors never clear the prior scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayState {
    pub scene: Option<Scene>,
    pub error: Option<String>,
    /// Completed passes, successful or not; lets the surface notice fresh
    /// output without comparing scenes.
    pub completed_passes: u64,
}

/// Debounced pipeline driver. At most one pass waits out the quiet period
/// at a time; in-flight passes are never cancelled and resolve by
/// overwrite-on-completion.
pub struct RenderDriver<O, T> {
    oracle: Arc<O>,
    typesetter: Arc<T>,
    display: Arc<Mutex<DisplayState>>,
    generation: Arc<AtomicU64>,
    handle: tokio::runtime::Handle,
}

impl<O, T> RenderDriver<O, T>
where
    O: LayoutOracle + Send + Sync + 'static,
    T: Typesetter + Send + Sync + 'static,
{
    /// Must be called from within a tokio runtime.
    pub fn new(oracle: O, typesetter: T) -> Self {
        Self {
            oracle: Arc::new(oracle),
            typesetter: Arc::new(typesetter),
            display: Arc::new(Mutex::new(DisplayState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            handle: tokio::runtime::Handle::current(),
        }
    }

    /// Shared display state for the surface to draw from.
    pub fn display(&self) -> Arc<Mutex<DisplayState>> {
        Arc::clone(&self.display)
    }

    /// Schedules a render of `source` after the debounce period. A newer
    /// submit supersedes a pass still waiting; a pass already past the
    /// debounce runs to completion regardless.
    pub fn submit(&self, source: String) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generations = Arc::clone(&self.generation);
        let oracle = Arc::clone(&self.oracle);
        let typesetter = Arc::clone(&self.typesetter);
        let display = Arc::clone(&self.display);

        self.handle.spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;
            if generations.load(Ordering::SeqCst) != generation {
                return;
            }

            let result = render_pass(&source, &*oracle, &*typesetter).await;

            let mut display = display.lock().await;
            display.completed_passes += 1;
            match result {
                Ok(scene) => {
                    display.scene = Some(scene);
                    display.error = None;
                }
                Err(err) => {
                    display.error = Some(err.to_string());
                }
            }
        });
    }
}
