// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The interactive terminal UI: DSL editor on the left, diagram canvas with
//! minimap overlay on the right, one status/error line at the bottom.
//!
//! The TUI is the rendering surface and event-wiring collaborator; all
//! pan/zoom/minimap math lives in [`crate::view`] and all drawing input in
//! the [`crate::render::Scene`] primitives.

use std::error::Error;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle as CanvasRect},
        Block, Borders, Paragraph,
    },
};

use crate::layout::LayoutOracle;
use crate::model::NodeType;
use crate::pipeline::{DisplayState, RenderDriver, Typesetter};
use crate::render::{EdgePath, NodeBox, PathCmd, Scene};
use crate::view::{GlyphKind, Minimap, Viewport};

#[cfg(test)]
mod tests;

const FOCUS_COLOR: Color = Color::LightGreen;
const PLATE_COLOR: Color = Color::DarkGray;
const EDGE_COLOR: Color = Color::White;
const LATENT_COLOR: Color = Color::White;
const OBSERVED_COLOR: Color = Color::Cyan;
const FIXED_COLOR: Color = Color::Yellow;
const DETERMINISTIC_COLOR: Color = Color::Magenta;
const ERROR_COLOR: Color = Color::LightRed;

/// Terminal cells are roughly twice as tall as wide; vertical screen
/// coordinates are scaled by this so content keeps its aspect ratio.
const CELL_ASPECT: f64 = 2.0;
const MINIMAP_CELLS_W: u16 = 27;
const MINIMAP_CELLS_H: u16 = 10;
/// Quadratic corners are flattened into this many line segments.
const QUAD_SEGMENTS: usize = 8;

const DEMO_DSL: &str = "\
# Bayesian regression, plate style
dim n(N) \"samples\"
dim d(D) \"features\"

fixed alpha
fixed beta
latent tau \"noise\" ~ Gamma(alpha, beta)
latent w[d] \"weights\" ~ Normal(0, 1)
observed x[n,d] \"inputs\"
deterministic eta[n] (w^T x) \"predictor\"
observed y[n] ~ Normal(eta, tau)

alpha -> tau
beta -> tau
w -> eta
x -> eta
eta -> y
tau -> y
";

/// The built-in demo document shown by `--demo`.
pub fn demo_document() -> &'static str {
    DEMO_DSL
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    Diagram,
}

/// Runs the interactive terminal UI until the user quits.
///
/// Expects to be called off the runtime thread (`spawn_blocking`); the
/// driver's passes land on the runtime while this loop polls input.
pub fn run<O, T>(driver: RenderDriver<O, T>, initial: String) -> Result<(), Box<dyn Error>>
where
    O: LayoutOracle + Send + Sync + 'static,
    T: Typesetter + Send + Sync + 'static,
{
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(driver, initial);

    while !app.should_quit {
        app.sync_display();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

struct App<O: LayoutOracle, T: Typesetter> {
    driver: RenderDriver<O, T>,
    display: std::sync::Arc<tokio::sync::Mutex<DisplayState>>,
    lines: Vec<String>,
    cursor: (usize, usize),
    focus: Focus,
    scene: Option<Scene>,
    error: Option<String>,
    seen_passes: u64,
    viewport: Viewport,
    minimap: Minimap,
    diagram_area: Option<Rect>,
    minimap_area: Option<Rect>,
    should_quit: bool,
}

impl<O, T> App<O, T>
where
    O: LayoutOracle + Send + Sync + 'static,
    T: Typesetter + Send + Sync + 'static,
{
    fn new(driver: RenderDriver<O, T>, initial: String) -> Self {
        let display = driver.display();
        let lines: Vec<String> = if initial.is_empty() {
            vec![String::new()]
        } else {
            initial.lines().map(str::to_owned).collect()
        };
        driver.submit(initial);

        Self {
            driver,
            display,
            lines,
            cursor: (0, 0),
            focus: Focus::Editor,
            scene: None,
            error: None,
            seen_passes: 0,
            viewport: Viewport::new(),
            minimap: Minimap::with_size(
                f64::from(MINIMAP_CELLS_W),
                f64::from(MINIMAP_CELLS_H) * CELL_ASPECT,
            ),
            diagram_area: None,
            minimap_area: None,
            should_quit: false,
        }
    }

    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn submit_current(&self) {
        self.driver.submit(self.text());
    }

    /// Picks up completed passes from the pipeline. Content bounds feed the
    /// controllers only on fresh output, so pan/zoom survives re-renders.
    fn sync_display(&mut self) {
        let display = std::sync::Arc::clone(&self.display);
        let state = display.blocking_lock();
        if state.completed_passes == self.seen_passes {
            return;
        }
        self.seen_passes = state.completed_passes;
        self.error = state.error.clone();
        if state.scene != self.scene {
            self.scene = state.scene.clone();
            if let Some(scene) = &self.scene {
                self.viewport.set_content_bounds(scene.bounds);
                self.minimap.set_content_bounds(scene.bounds);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Editor => Focus::Diagram,
                Focus::Diagram => Focus::Editor,
            };
            return;
        }

        match self.focus {
            Focus::Editor => self.handle_editor_key(key),
            Focus::Diagram => self.handle_diagram_key(key),
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let (row, col) = self.cursor;
        let mut edited = true;
        match key.code {
            KeyCode::Char(ch) => {
                let line = &mut self.lines[row];
                let at = byte_index(line, col);
                line.insert(at, ch);
                self.cursor.1 += 1;
            }
            KeyCode::Enter => {
                let line = &mut self.lines[row];
                let at = byte_index(line, col);
                let tail = line.split_off(at);
                self.lines.insert(row + 1, tail);
                self.cursor = (row + 1, 0);
            }
            KeyCode::Backspace => {
                if col > 0 {
                    let line = &mut self.lines[row];
                    let at = byte_index(line, col - 1);
                    line.remove(at);
                    self.cursor.1 -= 1;
                } else if row > 0 {
                    let tail = self.lines.remove(row);
                    let prev = &mut self.lines[row - 1];
                    let prev_len = prev.chars().count();
                    prev.push_str(&tail);
                    self.cursor = (row - 1, prev_len);
                } else {
                    edited = false;
                }
            }
            KeyCode::Delete => {
                let line_len = self.lines[row].chars().count();
                if col < line_len {
                    let line = &mut self.lines[row];
                    let at = byte_index(line, col);
                    line.remove(at);
                } else if row + 1 < self.lines.len() {
                    let tail = self.lines.remove(row + 1);
                    self.lines[row].push_str(&tail);
                } else {
                    edited = false;
                }
            }
            KeyCode::Left => {
                edited = false;
                if col > 0 {
                    self.cursor.1 -= 1;
                } else if row > 0 {
                    self.cursor = (row - 1, self.lines[row - 1].chars().count());
                }
            }
            KeyCode::Right => {
                edited = false;
                if col < self.lines[row].chars().count() {
                    self.cursor.1 += 1;
                } else if row + 1 < self.lines.len() {
                    self.cursor = (row + 1, 0);
                }
            }
            KeyCode::Up => {
                edited = false;
                if row > 0 {
                    self.cursor = (row - 1, col.min(self.lines[row - 1].chars().count()));
                }
            }
            KeyCode::Down => {
                edited = false;
                if row + 1 < self.lines.len() {
                    self.cursor = (row + 1, col.min(self.lines[row + 1].chars().count()));
                }
            }
            KeyCode::Home => {
                edited = false;
                self.cursor.1 = 0;
            }
            KeyCode::End => {
                edited = false;
                self.cursor.1 = self.lines[row].chars().count();
            }
            _ => edited = false,
        }

        if edited {
            self.submit_current();
        }
    }

    fn handle_diagram_key(&mut self, key: KeyEvent) {
        const PAN_STEP: f64 = 6.0;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left => self.viewport.pan_by(PAN_STEP, 0.0),
            KeyCode::Right => self.viewport.pan_by(-PAN_STEP, 0.0),
            KeyCode::Up => self.viewport.pan_by(0.0, PAN_STEP * CELL_ASPECT),
            KeyCode::Down => self.viewport.pan_by(0.0, -PAN_STEP * CELL_ASPECT),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_centered(1.2),
            KeyCode::Char('-') => self.zoom_centered(1.0 / 1.2),
            KeyCode::Char('f') => self.viewport.fit_to_window(),
            _ => {}
        }
    }

    fn zoom_centered(&mut self, factor: f64) {
        let Some(area) = self.diagram_area else {
            return;
        };
        let center_x = f64::from(area.width) / 2.0;
        let center_y = f64::from(area.height) / 2.0 * CELL_ASPECT;
        self.viewport.zoom_at(factor, center_x, center_y);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(area) = self.diagram_area else {
            return;
        };

        let in_minimap = self
            .minimap_area
            .is_some_and(|mini| cell_in_rect(mouse.column, mouse.row, mini));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if in_minimap {
                    let (x, y) = self.minimap_point(mouse.column, mouse.row);
                    if let Some((cx, cy)) = self.minimap.press(x, y) {
                        self.viewport.center_on(cx, cy);
                    }
                } else if cell_in_rect(mouse.column, mouse.row, area) {
                    let (x, y) = self.screen_point(mouse.column, mouse.row);
                    self.viewport.pointer_down(x, y, true);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.minimap.is_dragging() {
                    let (x, y) = self.minimap_point(mouse.column, mouse.row);
                    if let Some((cx, cy)) = self.minimap.drag_to(x, y) {
                        self.viewport.center_on(cx, cy);
                    }
                } else {
                    let (x, y) = self.screen_point(mouse.column, mouse.row);
                    self.viewport.pointer_move(x, y);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.minimap.release();
                self.viewport.pointer_up();
            }
            MouseEventKind::ScrollUp => {
                let (x, y) = self.screen_point(mouse.column, mouse.row);
                self.viewport.zoom_at(1.1, x, y);
            }
            MouseEventKind::ScrollDown => {
                let (x, y) = self.screen_point(mouse.column, mouse.row);
                self.viewport.zoom_at(1.0 / 1.1, x, y);
            }
            _ => {}
        }
    }

    fn screen_point(&self, column: u16, row: u16) -> (f64, f64) {
        let area = self.diagram_area.expect("checked by caller");
        (
            f64::from(column.saturating_sub(area.x)),
            f64::from(row.saturating_sub(area.y)) * CELL_ASPECT,
        )
    }

    fn minimap_point(&self, column: u16, row: u16) -> (f64, f64) {
        let area = self.minimap_area.expect("checked by caller");
        (
            f64::from(column.saturating_sub(area.x)),
            f64::from(row.saturating_sub(area.y)) * CELL_ASPECT,
        )
    }
}

fn cell_in_rect(column: u16, row: u16, rect: Rect) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(idx, _)| idx).unwrap_or(line.len())
}

fn draw<O, T>(frame: &mut Frame<'_>, app: &mut App<O, T>)
where
    O: LayoutOracle + Send + Sync + 'static,
    T: Typesetter + Send + Sync + 'static,
{
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Min(0)])
        .split(rows[0]);

    draw_editor(frame, app, panes[0]);
    draw_diagram(frame, app, panes[1]);
    draw_status(frame, app, rows[1]);
}

fn draw_editor<O, T>(frame: &mut Frame<'_>, app: &mut App<O, T>, area: Rect)
where
    O: LayoutOracle + Send + Sync + 'static,
    T: Typesetter + Send + Sync + 'static,
{
    let border = if app.focus == Focus::Editor {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).title("DSL").border_style(border);
    let inner = block.inner(area);

    let scroll = (app.cursor.0 as u16).saturating_sub(inner.height.saturating_sub(1));
    let editor = Paragraph::new(app.lines.join("\n")).block(block).scroll((scroll, 0));
    frame.render_widget(editor, area);

    if app.focus == Focus::Editor {
        let cursor_x = inner.x + app.cursor.1.min(u16::MAX as usize) as u16;
        let cursor_y = inner.y + app.cursor.0 as u16 - scroll;
        if cursor_x < inner.x + inner.width && cursor_y < inner.y + inner.height {
            frame.set_cursor(cursor_x, cursor_y);
        }
    }
}

fn draw_diagram<O, T>(frame: &mut Frame<'_>, app: &mut App<O, T>, area: Rect)
where
    O: LayoutOracle + Send + Sync + 'static,
    T: Typesetter + Send + Sync + 'static,
{
    let border = if app.focus == Focus::Diagram {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).title("Diagram").border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.diagram_area = Some(inner);
    app.viewport
        .set_viewport_size(f64::from(inner.width), f64::from(inner.height) * CELL_ASPECT);

    let visible = app.viewport.visible_content_rect();
    let scale = app.viewport.scale();
    let scene = app.scene.as_ref();
    let canvas = Canvas::default()
        .x_bounds([visible.x, visible.right()])
        .y_bounds([-visible.bottom(), -visible.y])
        .paint(|ctx| {
            if let Some(scene) = scene {
                paint_scene(ctx, scene, scale);
            }
        });
    frame.render_widget(canvas, inner);

    draw_minimap(frame, app, inner);
}

fn draw_minimap<O, T>(frame: &mut Frame<'_>, app: &mut App<O, T>, diagram: Rect)
where
    O: LayoutOracle + Send + Sync + 'static,
    T: Typesetter + Send + Sync + 'static,
{
    if diagram.width < MINIMAP_CELLS_W + 4 || diagram.height < MINIMAP_CELLS_H + 4 {
        app.minimap_area = None;
        return;
    }
    let area = Rect::new(
        diagram.x + diagram.width - MINIMAP_CELLS_W - 1,
        diagram.y + diagram.height - MINIMAP_CELLS_H - 1,
        MINIMAP_CELLS_W,
        MINIMAP_CELLS_H,
    );
    app.minimap_area = Some(area);

    let (mini_w, mini_h) = app.minimap.size();
    let minimap = &app.minimap;
    let viewport = &app.viewport;
    let scene = app.scene.as_ref();
    let canvas = Canvas::default()
        .x_bounds([0.0, mini_w])
        .y_bounds([-mini_h, 0.0])
        .paint(|ctx| {
            let Some(scene) = scene else {
                return;
            };
            for rect in minimap.plate_rects(scene) {
                draw_rect_outline(ctx, rect, PLATE_COLOR);
            }
            for glyph in minimap.node_glyphs(scene) {
                let color = match glyph.kind {
                    GlyphKind::Dot => FIXED_COLOR,
                    GlyphKind::RoundedRect => DETERMINISTIC_COLOR,
                    GlyphKind::Circle => LATENT_COLOR,
                };
                let center = glyph.rect.center();
                ctx.draw(&Circle {
                    x: center.x,
                    y: -center.y,
                    radius: (glyph.rect.width / 2.0).max(0.3),
                    color,
                });
            }
            if let Some(rect) = minimap.viewport_rect(viewport) {
                draw_rect_outline(ctx, rect, FOCUS_COLOR);
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_status<O, T>(frame: &mut Frame<'_>, app: &App<O, T>, area: Rect)
where
    O: LayoutOracle + Send + Sync + 'static,
    T: Typesetter + Send + Sync + 'static,
{
    let line = match &app.error {
        Some(error) => Line::styled(error.clone(), Style::default().fg(ERROR_COLOR)),
        None => {
            let (nodes, edges) = app
                .scene
                .as_ref()
                .map(|scene| (scene.nodes.len(), scene.edges.len()))
                .unwrap_or((0, 0));
            Line::raw(format!(
                "scale {:.0}%  ·  {nodes} nodes / {edges} edges  ·  Tab: focus  f: fit  q: quit",
                app.viewport.scale() * 100.0
            ))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn paint_scene(ctx: &mut Context<'_>, scene: &Scene, scale: f64) {
    for plate in &scene.plates {
        draw_rect_outline(ctx, plate.rect, PLATE_COLOR);
        ctx.print(
            plate.rect.x + 2.0,
            -(plate.rect.y + 2.0),
            Line::styled(plate.title.clone(), Style::default().fg(Color::Gray)),
        );
    }

    for edge in &scene.edges {
        paint_edge(ctx, edge, scale);
    }

    for node in &scene.nodes {
        paint_node(ctx, node);
    }
}

fn paint_edge(ctx: &mut Context<'_>, edge: &EdgePath, scale: f64) {
    let mut current = None;
    for command in &edge.commands {
        match *command {
            PathCmd::MoveTo(point) => current = Some(point),
            PathCmd::LineTo(point) => {
                if let Some(from) = current {
                    draw_segment(ctx, (from.x, from.y), (point.x, point.y), EDGE_COLOR);
                }
                current = Some(point);
            }
            PathCmd::QuadTo { control, to } => {
                if let Some(from) = current {
                    let mut last = (from.x, from.y);
                    for step in 1..=QUAD_SEGMENTS {
                        let t = step as f64 / QUAD_SEGMENTS as f64;
                        let inv = 1.0 - t;
                        let x = inv * inv * from.x + 2.0 * inv * t * control.x + t * t * to.x;
                        let y = inv * inv * from.y + 2.0 * inv * t * control.y + t * t * to.y;
                        draw_segment(ctx, last, (x, y), EDGE_COLOR);
                        last = (x, y);
                    }
                }
                current = Some(to);
            }
        }
    }

    if let Some(arrowhead) = &edge.arrowhead {
        let [tip, left, right] = arrowhead.triangle(scale);
        draw_segment(ctx, (tip.x, tip.y), (left.x, left.y), EDGE_COLOR);
        draw_segment(ctx, (tip.x, tip.y), (right.x, right.y), EDGE_COLOR);
        draw_segment(ctx, (left.x, left.y), (right.x, right.y), EDGE_COLOR);
    }
}

fn paint_node(ctx: &mut Context<'_>, node: &NodeBox) {
    let rect = node.rect;
    let center = rect.center();
    match node.node_type {
        NodeType::Fixed => {
            ctx.draw(&Circle {
                x: center.x,
                y: -center.y,
                radius: rect.width / 2.0,
                color: FIXED_COLOR,
            });
            ctx.print(
                center.x,
                -(rect.bottom() + 10.0),
                Line::styled(node.symbol.clone(), Style::default().fg(FIXED_COLOR)),
            );
        }
        NodeType::Deterministic => {
            draw_rect_outline(ctx, rect, DETERMINISTIC_COLOR);
            ctx.print(center.x - 8.0, -(center.y - 12.0), Line::raw(node.description.clone()));
            ctx.print(center.x - 8.0, -(center.y + 12.0), Line::raw(node.symbol.clone()));
        }
        NodeType::Latent | NodeType::Observed => {
            let color =
                if node.node_type == NodeType::Observed { OBSERVED_COLOR } else { LATENT_COLOR };
            ctx.draw(&Circle { x: center.x, y: -center.y, radius: rect.width / 2.0, color });
            ctx.print(center.x - 8.0, -(center.y - 24.0), Line::raw(node.description.clone()));
            ctx.print(center.x - 8.0, -center.y, Line::raw(node.symbol.clone()));
            if let Some(distribution) = &node.distribution {
                ctx.print(center.x - 8.0, -(center.y + 12.0), Line::raw("~".to_owned()));
                ctx.print(center.x - 8.0, -(center.y + 24.0), Line::raw(distribution.clone()));
            }
        }
    }
}

fn draw_rect_outline(ctx: &mut Context<'_>, rect: crate::layout::Rect, color: Color) {
    ctx.draw(&CanvasRect {
        x: rect.x,
        y: -rect.bottom(),
        width: rect.width,
        height: rect.height,
        color,
    });
}

fn draw_segment(ctx: &mut Context<'_>, from: (f64, f64), to: (f64, f64), color: Color) {
    ctx.draw(&CanvasLine { x1: from.0, y1: -from.1, x2: to.0, y2: -to.1, color });
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}
