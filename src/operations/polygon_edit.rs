//! Vertex-by-vertex polygon editing and freehand curve drawing.
//!
//! Straight mode: every press inserts a vertex at the insertion index and dragging places
//! it; releasing advances the index. A right press ends the edit, a right release deletes
//! the vertex being placed. Between presses, hovering shows where the next vertex would go.
//!
//! Curve mode: the first press starts sampling, pointer travel appends vertices, the next
//! press ends the curve. When the operation stops, the curve may close itself or be merged
//! with the one other polygon in the document; only the final result stays in the history.

use egui::{CursorIcon, Pos2, Shape, Vec2};
use log::{debug, info, warn};

use super::{Operation, PointerHandler, Transition, overlay};
use crate::command::Command;
use crate::element::{EditorElement, Element, ElementProperties, PolygonElement};
use crate::geometry::{MergeParams, Polygon, merge_polylines};
use crate::input::{EventKind, PointerEvent};
use crate::state::{EditState, EditorContext};

const ADD_POLYGON: &str = "Add Polygon";
const ADJUST_POLYGON: &str = "Adjust Polygon";
const MERGE_POLYGONS: &str = "Merge Polygons";
const CLOSE_CURVE: &str = "Close Curve Polygon";

/// Where the operation is within a press/release cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonPhase {
    /// Between presses
    Up,
    /// A vertex is being placed, or a curve is being sampled
    Adjust,
    /// Curve mode, waiting for the press that starts sampling
    StartingCurve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    AddPolygon,
    AddCurve,
    EditVertex,
}

#[derive(Debug)]
pub struct PolygonEditOperation {
    mode: Mode,
    phase: PolygonPhase,
    slot: usize,
    vertex_index: usize,
    down: Option<Pos2>,
    pointer_offset: Vec2,
    ghost: Option<Pos2>,
    polygon: Polygon,
    properties: ElementProperties,
    /// State the edit is applied on top of
    base: Option<EditState>,
    recorded: bool,
}

impl PolygonEditOperation {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            phase: PolygonPhase::Up,
            slot: 0,
            vertex_index: 0,
            down: None,
            pointer_offset: Vec2::ZERO,
            ghost: None,
            polygon: Polygon::default(),
            properties: ElementProperties::default(),
            base: None,
            recorded: false,
        }
    }

    /// Draw a new polygon vertex by vertex
    pub fn add_polygon() -> Self {
        Self::with_mode(Mode::AddPolygon)
    }

    /// Draw a new freehand curve
    pub fn add_curve() -> Self {
        Self::with_mode(Mode::AddCurve)
    }

    /// Drag vertex `vertex` of the polygon at `slot`, grabbed at `down`
    pub fn edit_vertex(slot: usize, vertex: usize, down: Pos2) -> Self {
        Self {
            slot,
            vertex_index: vertex,
            down: Some(down),
            ..Self::with_mode(Mode::EditVertex)
        }
    }

    pub fn phase(&self) -> PolygonPhase {
        self.phase
    }

    pub fn is_curve_mode(&self) -> bool {
        self.mode == Mode::AddCurve
    }

    /// The polygon as edited so far
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    fn description(&self) -> &'static str {
        match self.mode {
            Mode::EditVertex => ADJUST_POLYGON,
            Mode::AddPolygon | Mode::AddCurve => ADD_POLYGON,
        }
    }

    fn element(&self, polygon: Polygon) -> EditorElement {
        EditorElement::Polygon(PolygonElement::new(polygon, self.properties))
    }

    /// The state with the current polygon written into it
    fn in_flight_state(&self) -> Option<EditState> {
        let base = self.base.as_ref()?;
        let element = self.element(self.polygon.clone());
        Some(match self.mode {
            Mode::EditVertex => base.replace_and_select(self.slot, element),
            Mode::AddPolygon | Mode::AddCurve => base.with_added_selected(element).0,
        })
    }

    /// Write the polygon into the document
    fn write(&mut self, ctx: &mut EditorContext) {
        if self.polygon.is_empty() {
            return;
        }
        let Some(state) = self.in_flight_state() else {
            return;
        };
        if self.recorded && &state == ctx.state() {
            return;
        }
        // The first entry of an edit never folds into an earlier one, so it can be
        // discarded on its own.
        let command = Command::new(self.description(), state).with_merge_disabled(!self.recorded);
        ctx.perform(command);
        self.recorded = true;
    }

    fn handle_straight(&mut self, event: &PointerEvent, pointer: Pos2, ctx: &mut EditorContext) -> Transition {
        match event.kind {
            EventKind::Down => {
                if event.is_right() {
                    return Transition::Finish;
                }
                self.ghost = None;
                let index = self.vertex_index.min(self.polygon.vertex_count());
                self.polygon = self.polygon.with_inserted(index, pointer);
                self.vertex_index = index;
                self.phase = PolygonPhase::Adjust;
                self.write(ctx);
            }
            EventKind::Drag if self.phase == PolygonPhase::Adjust => {
                if self.vertex_index < self.polygon.vertex_count() {
                    self.polygon = self.polygon.with_vertex(self.vertex_index, pointer);
                    self.write(ctx);
                }
            }
            EventKind::Up if self.phase == PolygonPhase::Adjust => {
                if event.is_right() {
                    self.polygon = self.polygon.without_vertex(self.vertex_index);
                    self.write(ctx);
                    return Transition::Finish;
                }
                self.vertex_index += 1;
                if !self.polygon.is_open() && !self.polygon.is_empty() {
                    self.vertex_index %= self.polygon.vertex_count();
                }
                self.phase = PolygonPhase::Up;
                // The grab offset only applies to the vertex that was grabbed.
                self.pointer_offset = Vec2::ZERO;
            }
            EventKind::Move if self.phase == PolygonPhase::Up => {
                self.ghost = Some(pointer);
            }
            _ => {}
        }
        Transition::Continue
    }

    fn handle_curve(&mut self, event: &PointerEvent, pointer: Pos2, ctx: &mut EditorContext) -> Transition {
        match event.kind {
            EventKind::Down => {
                if self.phase == PolygonPhase::StartingCurve && !event.is_right() {
                    self.phase = PolygonPhase::Adjust;
                    self.polygon = Polygon::open(vec![pointer]);
                    self.write(ctx);
                } else {
                    return Transition::Finish;
                }
            }
            // Touch hosts report a held pointer as a drag.
            EventKind::Move | EventKind::Drag if self.phase == PolygonPhase::Adjust => {
                let far_enough = self.polygon.last_vertex().is_none_or(|last| {
                    last.distance(pointer) > ctx.config().curve_min_sample_distance
                });
                if far_enough {
                    self.polygon = self.polygon.with_appended(pointer);
                    self.write(ctx);
                }
            }
            _ => {}
        }
        Transition::Continue
    }

    fn finish_curve(&mut self, ctx: &mut EditorContext) {
        let config = ctx.config().clone();
        let mut polygon = self.polygon.clone();
        if polygon.vertex_count() >= 3 && polygon.endpoint_gap() < config.curve_close_distance {
            polygon = polygon.with_open(false);
        }
        self.polygon = polygon.simplify(config.curve_simplify_tolerance);
        self.write(ctx);
    }

    /// Close the curve on itself, or merge it with the single other polygon
    fn attempt_merge(&mut self, ctx: &mut EditorContext) {
        if self.mode != Mode::AddCurve || !self.polygon.is_open() {
            return;
        }
        let Some(in_flight) = self.in_flight_state() else {
            return;
        };
        let slot = in_flight.element_count() - 1;

        let candidates: Vec<(usize, &PolygonElement)> = in_flight
            .elements()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != slot)
            .filter_map(|(i, element)| element.as_polygon().map(|p| (i, p)))
            .collect();

        let (description, new_state) = match candidates.as_slice() {
            [] => {
                let curve_size = self.polygon.bounds().size().max_elem() / 3.0;
                let closed = self.polygon.with_open(false);
                if self.polygon.endpoint_gap() > curve_size || !closed.is_well_defined() {
                    return;
                }
                (CLOSE_CURVE, in_flight.replace_and_select(slot, self.element(closed)))
            }
            [(other_slot, other)] => {
                debug!("Examining merge of slot {} with slot {}", slot, other_slot);
                let params = MergeParams::from(ctx.config());
                let merge = merge_polylines(&self.polygon, other.polygon(), &params);
                if let Some(reason) = merge.failure_reason() {
                    debug!("Not merging: {}", reason);
                    return;
                }
                let Some(merged) = merge.into_merged() else {
                    return;
                };
                info!("Merged curve into polygon at slot {}", other_slot);
                // Remove the higher slot first so the lower one stays valid.
                let state = in_flight.with_removed(slot).with_removed(*other_slot);
                let (state, _) = state.with_added_selected(self.element(merged));
                (MERGE_POLYGONS, state)
            }
            _ => {
                warn!("{} other polygons present, not attempting a merge", candidates.len());
                return;
            }
        };

        // Only the merged result enters the history, never the open curve.
        if let (true, Some(base)) = (self.recorded, self.base.clone()) {
            ctx.discard_last_to(base);
        }
        ctx.perform(Command::new(description, new_state).with_merge_disabled(true));
        self.recorded = true;
    }
}

impl Operation for PolygonEditOperation {
    fn name(&self) -> &'static str {
        self.description()
    }

    fn start(&mut self, ctx: &mut EditorContext) {
        let state = ctx.state().clone();
        self.recorded = false;
        self.ghost = None;
        match self.mode {
            Mode::EditVertex => {
                let Some(existing) = state.element(self.slot).as_polygon() else {
                    warn!("Slot {} is not a polygon", self.slot);
                    return;
                };
                self.polygon = existing.polygon().clone();
                self.properties = *existing.properties();
                self.phase = PolygonPhase::Adjust;
                if let Some(down) = self.down {
                    if self.vertex_index < self.polygon.vertex_count() {
                        self.pointer_offset = self.polygon.vertex(self.vertex_index) - down;
                    }
                }
            }
            Mode::AddPolygon => {
                self.polygon = Polygon::closed(Vec::new());
                self.phase = PolygonPhase::Up;
                self.vertex_index = 0;
            }
            Mode::AddCurve => {
                self.polygon = Polygon::open(Vec::new());
                self.phase = PolygonPhase::StartingCurve;
                self.vertex_index = 0;
            }
        }
        self.base = Some(state);
    }

    fn stop(&mut self, ctx: &mut EditorContext) {
        self.ghost = None;
        if self.base.is_none() {
            return;
        }

        if self.mode == Mode::AddCurve && self.polygon.is_well_defined() {
            self.finish_curve(ctx);
        }

        if !self.polygon.is_well_defined() {
            debug!("Dropping incomplete polygon");
            if let (true, Some(base)) = (self.recorded, self.base.clone()) {
                ctx.discard_last_to(base);
                self.recorded = false;
            }
            return;
        }

        self.attempt_merge(ctx);
    }

    fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::Crosshair
    }

    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }

    fn paint(&self, ctx: &EditorContext) -> Vec<Shape> {
        let Some(ghost) = self.ghost else {
            return Vec::new();
        };
        let n = self.polygon.vertex_count();
        if n == 0 {
            return overlay::ghost_vertex(ctx, ghost, &[]);
        }
        // The ghost sits between the vertex before the insertion index and the one at it.
        let index = self.vertex_index.min(n);
        let mut neighbours = Vec::with_capacity(2);
        if index > 0 {
            neighbours.push(self.polygon.vertex(index - 1));
        } else if !self.polygon.is_open() {
            neighbours.push(self.polygon.vertex(n - 1));
        }
        if index < n {
            neighbours.push(self.polygon.vertex(index));
        } else if !self.polygon.is_open() {
            neighbours.push(self.polygon.vertex(0));
        }
        overlay::ghost_vertex(ctx, ghost, &neighbours)
    }
}

impl PointerHandler for PolygonEditOperation {
    fn handle_event(&mut self, event: &PointerEvent, ctx: &mut EditorContext) -> Transition {
        if self.base.is_none() || event.kind == EventKind::Stop {
            return Transition::Finish;
        }
        let Some(location) = event.location else {
            return Transition::Continue;
        };
        let pointer = location + self.pointer_offset;
        match self.mode {
            Mode::AddCurve => self.handle_curve(event, pointer, ctx),
            Mode::AddPolygon | Mode::EditVertex => self.handle_straight(event, pointer, ctx),
        }
    }
}
