//! Widget construction and identifier allocation.

use crate::widget::{Widget, WidgetContent, WidgetId, WidgetKind};

/// Builds widgets with default geometry and content, handing out identifiers
/// from a monotonic session counter.
#[derive(Debug, Clone, Default)]
pub struct WidgetFactory {
    counter: u64,
}

impl WidgetFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identifiers handed out so far (or the value it was raised to).
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Increment the counter and return the identifier for its new value.
    ///
    /// Past `u64::MAX` numbering restarts at 1; callers that need uniqueness
    /// check the result against the widgets they hold.
    pub fn allocate_id(&mut self) -> WidgetId {
        self.counter = match self.counter.checked_add(1) {
            Some(next) => next,
            None => {
                log::warn!("Widget id counter exhausted, restarting at 1");
                1
            }
        };
        WidgetId::from_counter(self.counter)
    }

    /// Build a widget of `kind` at the default position and size.
    ///
    /// The widget is not placed anywhere; inserting it is up to the caller.
    pub fn create(&mut self, kind: WidgetKind) -> Widget {
        let id = self.allocate_id();
        Widget::new(id, WidgetContent::default_for(kind))
    }

    /// Start numbering from scratch.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Raise the counter to at least `value`. Never lowers it.
    pub fn advance_to(&mut self, value: u64) {
        self.counter = self.counter.max(value);
    }
}
