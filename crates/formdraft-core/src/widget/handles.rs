//! Widget chrome: delete control, resize handle and hit regions.

use super::{Widget, WidgetKind};
use kurbo::{Point, Rect};

/// Side of the square delete control in the top-right corner.
pub const DELETE_CONTROL_SIZE: f64 = 20.0;
/// Side of the square resize handle in the bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f64 = 10.0;
/// Side of the check box square inside a checkbox widget.
pub const CHECKBOX_BOX_SIZE: f64 = 16.0;

const CONTENT_INSET_LEFT: f64 = 8.0;
const CONTENT_INSET_TOP: f64 = 8.0;
const CONTENT_INSET_RIGHT: f64 = DELETE_CONTROL_SIZE + 4.0;
const CONTENT_INSET_BOTTOM: f64 = RESIZE_HANDLE_SIZE + 2.0;

/// The kind of handle, which decides what pressing it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Removes the widget.
    Delete,
    /// Starts a resize from the bottom-right corner.
    Resize,
}

/// A control drawn on top of every widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    /// Area in canvas coordinates.
    pub rect: Rect,
}

impl Handle {
    pub fn new(kind: HandleKind, rect: Rect) -> Self {
        Self { kind, rect }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.rect.contains(point)
    }
}

/// Which part of a widget a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    DeleteControl,
    ResizeHandle,
    /// An inner control that handles its own presses (text field, dropdown, check box).
    Field,
    /// Anywhere else inside the widget. Pressing here starts a drag.
    Body,
}

/// Delete control and resize handle for a widget with the given bounds.
pub fn handles(bounds: Rect) -> [Handle; 2] {
    [
        Handle::new(
            HandleKind::Delete,
            Rect::new(
                bounds.x1 - DELETE_CONTROL_SIZE,
                bounds.y0,
                bounds.x1,
                bounds.y0 + DELETE_CONTROL_SIZE,
            ),
        ),
        Handle::new(
            HandleKind::Resize,
            Rect::new(
                bounds.x1 - RESIZE_HANDLE_SIZE,
                bounds.y1 - RESIZE_HANDLE_SIZE,
                bounds.x1,
                bounds.y1,
            ),
        ),
    ]
}

/// Area left for the widget's content once the chrome is accounted for.
pub fn content_rect(bounds: Rect) -> Rect {
    Rect::new(
        bounds.x0 + CONTENT_INSET_LEFT,
        bounds.y0 + CONTENT_INSET_TOP,
        bounds.x1 - CONTENT_INSET_RIGHT,
        bounds.y1 - CONTENT_INSET_BOTTOM,
    )
}

/// The inner control that consumes its own presses, if the widget has one.
pub fn field_rect(widget: &Widget) -> Option<Rect> {
    let content = content_rect(widget.bounds());
    match widget.kind() {
        WidgetKind::TextInput | WidgetKind::TextArea | WidgetKind::Dropdown => Some(content),
        WidgetKind::Checkbox => {
            let top = content.center().y - CHECKBOX_BOX_SIZE / 2.0;
            Some(Rect::new(
                content.x0,
                top,
                content.x0 + CHECKBOX_BOX_SIZE,
                top + CHECKBOX_BOX_SIZE,
            ))
        }
        WidgetKind::Button | WidgetKind::TextBlock | WidgetKind::Image => None,
    }
}

/// Classify `point` against a widget. Returns `None` outside its bounds.
pub fn hit_test(widget: &Widget, point: Point) -> Option<HitRegion> {
    if !widget.bounds().contains(point) {
        return None;
    }

    for handle in handles(widget.bounds()) {
        if handle.hit_test(point) {
            return Some(match handle.kind {
                HandleKind::Delete => HitRegion::DeleteControl,
                HandleKind::Resize => HitRegion::ResizeHandle,
            });
        }
    }

    if field_rect(widget).is_some_and(|rect| rect.contains(point)) {
        return Some(HitRegion::Field);
    }

    Some(HitRegion::Body)
}
