//! The ordered widget collection owned by a canvas.

use crate::widget::{HitRegion, Widget, WidgetId, hit_test};
use kurbo::{Point, Rect};

/// All widgets on a canvas, in document (insertion) order.
///
/// Document order is what a saved layout records; drawing and hit testing use
/// stacking order first and document order to break ties.
#[derive(Debug, Clone, Default)]
pub struct FormDocument {
    widgets: Vec<Widget>,
}

impl FormDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a widget at the end of document order.
    pub fn add(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }

    /// Remove a widget, returning it if it was present.
    pub fn remove(&mut self, id: &WidgetId) -> Option<Widget> {
        let index = self.widgets.iter().position(|w| w.id() == id)?;
        Some(self.widgets.remove(index))
    }

    pub fn clear(&mut self) {
        self.widgets.clear();
    }

    pub fn get(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: &WidgetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id() == id)
    }

    pub fn contains(&self, id: &WidgetId) -> bool {
        self.get(id).is_some()
    }

    /// Widgets in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    /// Widgets back to front: ascending stacking order, ties in document order.
    pub fn paint_order(&self) -> Vec<&Widget> {
        let mut ordered: Vec<&Widget> = self.widgets.iter().collect();
        // Stable sort keeps document order among equal stacking values.
        ordered.sort_by_key(|w| w.z_index);
        ordered
    }

    /// Highest stacking order in use, 0 for an empty document.
    pub fn max_z_index(&self) -> i64 {
        self.widgets.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    /// Raise a widget above every other one. Returns its new stacking order.
    pub fn bring_to_front(&mut self, id: &WidgetId) -> Option<i64> {
        let z = self.max_z_index().saturating_add(1);
        let widget = self.get_mut(id)?;
        widget.z_index = z;
        Some(z)
    }

    /// Topmost widget under `point` and the region that was hit.
    pub fn widget_at(&self, point: Point) -> Option<(&Widget, HitRegion)> {
        self.paint_order()
            .into_iter()
            .rev()
            .find_map(|w| hit_test(w, point).map(|region| (w, region)))
    }

    /// Bounding boxes of every widget, in document order.
    pub fn bounds(&self) -> Vec<Rect> {
        self.widgets.iter().map(Widget::bounds).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }
}
