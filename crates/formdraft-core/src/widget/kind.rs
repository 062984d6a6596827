//! Widget identifiers and kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every generated identifier.
const ID_PREFIX: &str = "component-";

/// Unique widget identifier, `component-<n>` for generated ids.
///
/// Identifiers read back from storage are kept verbatim, so arbitrary strings
/// are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Identifier for the `n`th widget of a session.
    pub fn from_counter(n: u64) -> Self {
        Self(format!("{ID_PREFIX}{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number after the last `-`, if it parses as one.
    pub fn numeric_suffix(&self) -> Option<u64> {
        self.0.rsplit('-').next()?.parse().ok()
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The seven kinds of form control offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    Button,
    TextInput,
    TextArea,
    Dropdown,
    Checkbox,
    TextBlock,
    Image,
}

impl WidgetKind {
    /// All kinds in palette order.
    pub const ALL: [WidgetKind; 7] = [
        WidgetKind::Button,
        WidgetKind::TextInput,
        WidgetKind::TextArea,
        WidgetKind::Dropdown,
        WidgetKind::Checkbox,
        WidgetKind::TextBlock,
        WidgetKind::Image,
    ];

    /// Tag written to the `type` field of a saved layout.
    pub fn tag(self) -> &'static str {
        match self {
            WidgetKind::Button => "button-component",
            WidgetKind::TextInput => "input-component",
            WidgetKind::TextArea => "textarea-component",
            WidgetKind::Dropdown => "select-component",
            WidgetKind::Checkbox => "checkbox-component",
            WidgetKind::TextBlock => "text-component",
            WidgetKind::Image => "image-component",
        }
    }

    /// Inverse of [`WidgetKind::tag`]. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Human-readable name shown in the palette.
    pub fn label(self) -> &'static str {
        match self {
            WidgetKind::Button => "Button",
            WidgetKind::TextInput => "Text Input",
            WidgetKind::TextArea => "Text Area",
            WidgetKind::Dropdown => "Dropdown",
            WidgetKind::Checkbox => "Checkbox",
            WidgetKind::TextBlock => "Text Block",
            WidgetKind::Image => "Image",
        }
    }

    /// Whether double-clicking opens an inline editor for this kind.
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            WidgetKind::Button | WidgetKind::Dropdown | WidgetKind::Checkbox | WidgetKind::TextBlock
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_counter() {
        assert_eq!(WidgetId::from_counter(7).as_str(), "component-7");
        assert_eq!(WidgetId::from_counter(7).to_string(), "component-7");
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(WidgetId::from_counter(12).numeric_suffix(), Some(12));
        assert_eq!(WidgetId::from("my-widget-3").numeric_suffix(), Some(3));
        assert_eq!(WidgetId::from("42").numeric_suffix(), Some(42));
        assert_eq!(WidgetId::from("component-abc").numeric_suffix(), None);
        assert_eq!(WidgetId::from("component-").numeric_suffix(), None);
    }

    #[test]
    fn test_tags_are_unique_and_reversible() {
        for kind in WidgetKind::ALL {
            assert_eq!(WidgetKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(WidgetKind::from_tag("unknown"), None);
        assert_eq!(WidgetKind::from_tag("Button"), None);
    }

    #[test]
    fn test_editable_kinds() {
        let editable: Vec<_> = WidgetKind::ALL.into_iter().filter(|k| k.is_editable()).collect();
        assert_eq!(
            editable,
            vec![
                WidgetKind::Button,
                WidgetKind::Dropdown,
                WidgetKind::Checkbox,
                WidgetKind::TextBlock
            ]
        );
    }
}
