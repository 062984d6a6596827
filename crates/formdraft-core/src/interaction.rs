//! Drag and resize state machine.
//!
//! Mouse and touch input share the same entry points; a sequence belongs to the
//! pointer that started it and every other pointer is ignored until release.

use crate::document::FormDocument;
use crate::input::PointerId;
use crate::widget::{HitRegion, MIN_HEIGHT, MIN_WIDTH, WidgetId};
use kurbo::{Point, Size, Vec2};

/// Captured at press time for a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub widget: WidgetId,
    pub pointer: PointerId,
    /// Pointer position minus the widget's origin at press time.
    pub offset: Vec2,
}

/// Captured at press time for a resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub widget: WidgetId,
    pub pointer: PointerId,
    pub original_size: Size,
    pub press_position: Point,
}

/// Current interaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
}

impl Interaction {
    /// The widget being manipulated, if any.
    pub fn widget(&self) -> Option<&WidgetId> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging(drag) => Some(&drag.widget),
            Interaction::Resizing(resize) => Some(&resize.widget),
        }
    }

    fn pointer(&self) -> Option<PointerId> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging(drag) => Some(drag.pointer),
            Interaction::Resizing(resize) => Some(resize.pointer),
        }
    }
}

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    Ignored,
    DragStarted(WidgetId),
    ResizeStarted(WidgetId),
    Moved(WidgetId),
    Resized(WidgetId),
    Released(WidgetId),
    EditStarted(WidgetId),
    EditCommitted(WidgetId),
}

/// Keep a widget of `size` inside `canvas`.
pub fn clamp_origin(origin: Point, size: Size, canvas: Size) -> Point {
    Point::new(
        origin.x.min(canvas.width - size.width).max(0.0),
        origin.y.min(canvas.height - size.height).max(0.0),
    )
}

/// New size for a resize by `delta` from `original`, with the widget's
/// top-left corner at `origin`.
///
/// The minimum size is applied first, then the canvas edge caps the result.
pub fn resized(original: Size, delta: Vec2, origin: Point, canvas: Size) -> Size {
    let width = (original.width + delta.x).max(MIN_WIDTH);
    let height = (original.height + delta.y).max(MIN_HEIGHT);
    Size::new(
        width.min(canvas.width - origin.x),
        height.min(canvas.height - origin.y),
    )
}

/// Drives drag and resize from pointer events.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: Interaction,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Interaction {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, Interaction::Idle)
    }

    /// The active widget, if a drag or resize is in progress.
    pub fn active_widget(&self) -> Option<&WidgetId> {
        self.state.widget()
    }

    /// Drop any in-progress interaction.
    pub fn reset(&mut self) {
        self.state = Interaction::Idle;
    }

    /// Handle a press. Only starts a sequence when idle.
    pub fn pointer_down(&mut self, document: &mut FormDocument, pointer: PointerId, position: Point) -> PointerOutcome {
        if !self.is_idle() {
            log::debug!("Ignoring press from {pointer:?} during an active interaction");
            return PointerOutcome::Ignored;
        }

        let Some((widget, region)) = document.widget_at(position) else {
            return PointerOutcome::Ignored;
        };
        let id = widget.id().clone();
        let origin = widget.origin;
        let size = widget.size;

        let outcome = match region {
            HitRegion::Body => {
                self.state = Interaction::Dragging(DragState {
                    widget: id.clone(),
                    pointer,
                    offset: position - origin,
                });
                log::debug!("Drag started on {id}");
                PointerOutcome::DragStarted(id.clone())
            }
            HitRegion::ResizeHandle => {
                self.state = Interaction::Resizing(ResizeState {
                    widget: id.clone(),
                    pointer,
                    original_size: size,
                    press_position: position,
                });
                log::debug!("Resize started on {id}");
                PointerOutcome::ResizeStarted(id.clone())
            }
            HitRegion::Field | HitRegion::DeleteControl => return PointerOutcome::Ignored,
        };

        document.bring_to_front(&id);
        outcome
    }

    /// Handle pointer motion for the active sequence.
    pub fn pointer_move(
        &mut self,
        document: &mut FormDocument,
        canvas: Size,
        pointer: PointerId,
        position: Point,
    ) -> PointerOutcome {
        if self.state.pointer() != Some(pointer) {
            return PointerOutcome::Ignored;
        }

        let outcome = match &self.state {
            Interaction::Idle => return PointerOutcome::Ignored,
            Interaction::Dragging(drag) => document.get_mut(&drag.widget).map(|widget| {
                widget.origin = clamp_origin(position - drag.offset, widget.size, canvas);
                PointerOutcome::Moved(drag.widget.clone())
            }),
            Interaction::Resizing(resize) => document.get_mut(&resize.widget).map(|widget| {
                let delta = position - resize.press_position;
                widget.size = resized(resize.original_size, delta, widget.origin, canvas);
                PointerOutcome::Resized(resize.widget.clone())
            }),
        };

        outcome.unwrap_or_else(|| {
            log::debug!("Active widget is gone, returning to idle");
            self.reset();
            PointerOutcome::Ignored
        })
    }

    /// Handle release (or cancellation) of the active pointer.
    pub fn pointer_up(&mut self, pointer: PointerId) -> PointerOutcome {
        if self.state.pointer() != Some(pointer) {
            return PointerOutcome::Ignored;
        }
        let state = std::mem::take(&mut self.state);
        match state.widget() {
            Some(id) => {
                log::debug!("Released {id}");
                PointerOutcome::Released(id.clone())
            }
            None => PointerOutcome::Ignored,
        }
    }
}
