//! In-place content editing.
//!
//! An edit session holds a draft string while the user types. Nothing touches
//! the widget until the session is committed.

use crate::widget::{Widget, WidgetContent, WidgetId};

/// Which piece of content an edit session replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    ButtonLabel,
    /// Comma-separated dropdown options.
    Options,
    CheckboxLabel,
    Text,
}

/// An open inline edit of one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    widget: WidgetId,
    target: EditTarget,
    /// Text being edited.
    pub draft: String,
}

impl EditSession {
    /// Open a session seeded with the widget's current content.
    ///
    /// Returns `None` for kinds without editable content.
    pub fn begin(widget: &Widget) -> Option<Self> {
        let (target, draft) = match &widget.content {
            WidgetContent::Button { label } => (EditTarget::ButtonLabel, label.clone()),
            WidgetContent::Dropdown { options, .. } => (EditTarget::Options, options.join(", ")),
            WidgetContent::Checkbox { label, .. } => (EditTarget::CheckboxLabel, label.clone()),
            WidgetContent::TextBlock { text } => (EditTarget::Text, text.clone()),
            WidgetContent::TextInput { .. } | WidgetContent::TextArea { .. } | WidgetContent::Image { .. } => {
                return None;
            }
        };
        Some(Self {
            widget: widget.id().clone(),
            target,
            draft,
        })
    }

    pub fn widget(&self) -> &WidgetId {
        &self.widget
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    /// Whether the draft should be edited as multi-line text.
    pub fn is_multiline(&self) -> bool {
        self.target == EditTarget::Text
    }

    /// Write the draft into `widget`. Returns false if the widget no longer
    /// matches the session.
    pub fn apply(self, widget: &mut Widget) -> bool {
        if widget.id() != &self.widget {
            return false;
        }
        match (&mut widget.content, self.target) {
            (WidgetContent::Button { label }, EditTarget::ButtonLabel) => *label = self.draft,
            (WidgetContent::Checkbox { label, .. }, EditTarget::CheckboxLabel) => *label = self.draft,
            (WidgetContent::TextBlock { text }, EditTarget::Text) => *text = self.draft,
            (WidgetContent::Dropdown { options, selected }, EditTarget::Options) => {
                *options = parse_options(&self.draft);
                *selected = 0;
            }
            _ => return false,
        }
        true
    }
}

/// Split comma-separated input into trimmed options. Empty entries are kept.
pub fn parse_options(input: &str) -> Vec<String> {
    input.split(',').map(|option| option.trim().to_string()).collect()
}
