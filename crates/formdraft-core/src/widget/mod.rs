//! Form widgets placed on the canvas.

mod content;
mod handles;
mod kind;

pub use content::{
    CHECKBOX_LABEL, DEFAULT_BUTTON_LABEL, DEFAULT_OPTIONS, IMAGE_CAPTION, INPUT_PLACEHOLDER,
    TEXT_BLOCK_PROMPT, WidgetContent,
};
pub use handles::{
    CHECKBOX_BOX_SIZE, DELETE_CONTROL_SIZE, Handle, HandleKind, HitRegion, RESIZE_HANDLE_SIZE,
    content_rect, field_rect, handles, hit_test,
};
pub use kind::{WidgetId, WidgetKind};

use kurbo::{Point, Rect, Size};

/// Minimum widget width in pixels.
pub const MIN_WIDTH: f64 = 100.0;
/// Minimum widget height in pixels.
pub const MIN_HEIGHT: f64 = 40.0;
/// Where a freshly created widget sits before placement.
pub const DEFAULT_ORIGIN: Point = Point::new(20.0, 20.0);
/// Size of a freshly created widget.
pub const DEFAULT_SIZE: Size = Size::new(200.0, 80.0);

/// A form control on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    id: WidgetId,
    /// Top-left corner in canvas coordinates.
    pub origin: Point,
    pub size: Size,
    /// Stacking order. Higher values are drawn above lower ones.
    pub z_index: i64,
    pub content: WidgetContent,
}

impl Widget {
    /// Create a widget with default geometry and the given content.
    pub fn new(id: WidgetId, content: WidgetContent) -> Self {
        Self {
            id,
            origin: DEFAULT_ORIGIN,
            size: DEFAULT_SIZE,
            z_index: 0,
            content,
        }
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: WidgetId) {
        self.id = id;
    }

    pub fn kind(&self) -> WidgetKind {
        self.content.kind()
    }

    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Enforce the minimum size and pull the widget inside a canvas of `canvas` size.
    pub fn normalize(&mut self, canvas: Size) {
        let width = if self.size.width.is_finite() { self.size.width } else { DEFAULT_SIZE.width };
        let height = if self.size.height.is_finite() { self.size.height } else { DEFAULT_SIZE.height };
        self.size = Size::new(
            width.max(MIN_WIDTH).min(canvas.width.max(MIN_WIDTH)),
            height.max(MIN_HEIGHT).min(canvas.height.max(MIN_HEIGHT)),
        );

        let left = if self.origin.x.is_finite() { self.origin.x } else { DEFAULT_ORIGIN.x };
        let top = if self.origin.y.is_finite() { self.origin.y } else { DEFAULT_ORIGIN.y };
        self.origin = Point::new(
            left.min(canvas.width - self.size.width).max(0.0),
            top.min(canvas.height - self.size.height).max(0.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(id: u64) -> Widget {
        Widget::new(WidgetId::from_counter(id), WidgetContent::default_for(WidgetKind::Button))
    }

    #[test]
    fn test_defaults() {
        let widget = button(1);
        assert_eq!(widget.origin, Point::new(20.0, 20.0));
        assert_eq!(widget.size, Size::new(200.0, 80.0));
        assert_eq!(widget.z_index, 0);
        assert_eq!(widget.kind(), WidgetKind::Button);
        assert_eq!(widget.bounds(), Rect::new(20.0, 20.0, 220.0, 100.0));
    }

    #[test]
    fn test_normalize_enforces_minimum_size() {
        let mut widget = button(1);
        widget.size = Size::new(10.0, 5.0);
        widget.normalize(Size::new(800.0, 600.0));
        assert_eq!(widget.size, Size::new(MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn test_normalize_clamps_into_canvas() {
        let mut widget = button(1);
        widget.origin = Point::new(750.0, -30.0);
        widget.normalize(Size::new(800.0, 600.0));
        assert_eq!(widget.origin, Point::new(600.0, 0.0));
    }

    #[test]
    fn test_normalize_shrinks_oversized_widget() {
        let mut widget = button(1);
        widget.size = Size::new(2000.0, 900.0);
        widget.normalize(Size::new(800.0, 600.0));
        assert_eq!(widget.size, Size::new(800.0, 600.0));
        assert_eq!(widget.origin, Point::ZERO);
    }

    #[test]
    fn test_normalize_replaces_non_finite_geometry() {
        let mut widget = button(1);
        widget.origin = Point::new(f64::NAN, 40.0);
        widget.size = Size::new(f64::INFINITY, 60.0);
        widget.normalize(Size::new(800.0, 600.0));
        assert_eq!(widget.origin, Point::new(20.0, 40.0));
        assert_eq!(widget.size, Size::new(200.0, 60.0));
    }
}
