//! Kind-specific widget content.

use super::WidgetKind;

pub const DEFAULT_BUTTON_LABEL: &str = "Button";
pub const INPUT_PLACEHOLDER: &str = "Enter text here...";
pub const DEFAULT_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];
pub const CHECKBOX_LABEL: &str = "Checkbox Label";
pub const TEXT_BLOCK_PROMPT: &str = "Double-click to edit this text block.";
pub const IMAGE_CAPTION: &str = "Image Placeholder";

/// What a widget displays. The variant determines the widget's kind.
///
/// Typed input values and the dropdown selection live here too, but they are
/// session state and never reach a saved layout.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetContent {
    Button { label: String },
    TextInput { placeholder: String, value: String },
    TextArea { placeholder: String, value: String },
    Dropdown { options: Vec<String>, selected: usize },
    Checkbox { label: String, checked: bool },
    TextBlock { text: String },
    Image { caption: String },
}

impl WidgetContent {
    /// Content of a freshly created widget of `kind`.
    pub fn default_for(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Button => WidgetContent::Button {
                label: DEFAULT_BUTTON_LABEL.to_string(),
            },
            WidgetKind::TextInput => WidgetContent::TextInput {
                placeholder: INPUT_PLACEHOLDER.to_string(),
                value: String::new(),
            },
            WidgetKind::TextArea => WidgetContent::TextArea {
                placeholder: INPUT_PLACEHOLDER.to_string(),
                value: String::new(),
            },
            WidgetKind::Dropdown => WidgetContent::Dropdown {
                options: DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect(),
                selected: 0,
            },
            WidgetKind::Checkbox => WidgetContent::Checkbox {
                label: CHECKBOX_LABEL.to_string(),
                checked: false,
            },
            WidgetKind::TextBlock => WidgetContent::TextBlock {
                text: TEXT_BLOCK_PROMPT.to_string(),
            },
            WidgetKind::Image => WidgetContent::Image {
                caption: IMAGE_CAPTION.to_string(),
            },
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetContent::Button { .. } => WidgetKind::Button,
            WidgetContent::TextInput { .. } => WidgetKind::TextInput,
            WidgetContent::TextArea { .. } => WidgetKind::TextArea,
            WidgetContent::Dropdown { .. } => WidgetKind::Dropdown,
            WidgetContent::Checkbox { .. } => WidgetKind::Checkbox,
            WidgetContent::TextBlock { .. } => WidgetKind::TextBlock,
            WidgetContent::Image { .. } => WidgetKind::Image,
        }
    }

    /// The persisted text: button label, checkbox label or text block text.
    pub fn text(&self) -> Option<&str> {
        match self {
            WidgetContent::Button { label } | WidgetContent::Checkbox { label, .. } => {
                Some(label.as_str())
            }
            WidgetContent::TextBlock { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// The currently selected dropdown option, if any.
    pub fn selected_option(&self) -> Option<&str> {
        match self {
            WidgetContent::Dropdown { options, selected } => options.get(*selected).map(String::as_str),
            _ => None,
        }
    }
}
