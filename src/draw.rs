//! Rectangle drawing state machine.
//!
//! `Idle -> Drawing -> Idle`, driven by pointer down/move/up over the draw
//! surface. Positions handed in here are already relative to the surface.

use tracing::{debug, trace};

use crate::geometry::{Dimensions, Point, Rect};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing {
        origin: Point,
        rect: Rect,
    },
}

/// What a pointer event did to the machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOutcome {
    /// Nothing to do in the current state.
    Ignored,
    Started { origin: Point },
    Resized(Rect),
    /// The drag ended with a box large enough to keep.
    Committed(Rect),
    /// The drag ended with a box below the minimum size.
    Discarded(Rect),
}

#[derive(Clone, Debug)]
pub struct DrawMachine {
    state: DrawState,
    min_size: f32,
}

impl DrawMachine {
    pub fn new(min_size: f32) -> Self {
        Self {
            state: DrawState::Idle,
            min_size,
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// The rectangle being dragged out, if any.
    pub fn rectangle(&self) -> Option<Rect> {
        match self.state {
            DrawState::Drawing { rect, .. } => Some(rect),
            DrawState::Idle => None,
        }
    }

    /// Pointer went down. A press during an unfinished drag restarts it from
    /// the new position.
    pub fn begin(&mut self, pos: Point, bounds: Dimensions) -> DrawOutcome {
        if self.is_drawing() {
            debug!(?pos, "pointer down during a drag, restarting");
        }
        let origin = pos.clamp_to(bounds);
        self.state = DrawState::Drawing {
            origin,
            rect: Rect::at(origin),
        };
        DrawOutcome::Started { origin }
    }

    pub fn update(&mut self, pos: Point, bounds: Dimensions) -> DrawOutcome {
        let DrawState::Drawing { origin, rect } = &mut self.state else {
            return DrawOutcome::Ignored;
        };
        let current = pos.clamp_to(bounds);
        *rect = Rect::from_corners(*origin, current);
        trace!(?rect, "rectangle resized");
        DrawOutcome::Resized(*rect)
    }

    /// Pointer released. Returns to `Idle` whatever the outcome.
    pub fn finish(&mut self) -> DrawOutcome {
        let DrawState::Drawing { rect, .. } = std::mem::take(&mut self.state) else {
            return DrawOutcome::Ignored;
        };
        if self.meets_minimum(rect) {
            DrawOutcome::Committed(rect)
        } else {
            DrawOutcome::Discarded(rect)
        }
    }

    /// Both sides of the same rectangle have to reach the minimum.
    pub fn meets_minimum(&self, rect: Rect) -> bool {
        rect.width >= self.min_size && rect.height >= self.min_size
    }
}
