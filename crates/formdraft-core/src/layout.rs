//! Saved layout format.
//!
//! A layout is a JSON array with one object per widget:
//!
//! ```json
//! [{"id":"component-1","type":"button-component","left":"20px","top":"20px",
//!   "width":"200px","height":"80px","zIndex":3,"text":"Submit"}]
//! ```
//!
//! Reading is lenient: missing or unparseable fields fall back to the
//! defaults a freshly created widget would have.

use crate::factory::WidgetFactory;
use crate::widget::{DEFAULT_ORIGIN, DEFAULT_SIZE, Widget, WidgetContent, WidgetId, WidgetKind};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// `type` value written for widgets of no known kind.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Errors produced while reading or writing a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid layout JSON: {0}")]
    Parse(String),
    #[error("Malformed layout record {index}: {reason}")]
    Structure { index: usize, reason: String },
    #[error("Failed to serialize layout: {0}")]
    Serialize(String),
}

/// One saved widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default = "unknown_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Integer, float or numeric string on input; always an integer on output.
    #[serde(default)]
    pub z_index: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

fn unknown_type() -> String {
    UNKNOWN_TYPE.to_string()
}

/// Format a length as a CSS pixel string (`20.0` becomes `"20px"`).
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

/// Parse a CSS pixel string. Accepts a bare number too.
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Read a stacking order written as a number or a numeric string.
pub fn parse_z_index(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

impl LayoutRecord {
    /// Project a widget onto its saved form.
    pub fn from_widget(widget: &Widget) -> Self {
        let (text, checked, options) = match &widget.content {
            WidgetContent::Button { label } => (Some(label.clone()), None, None),
            WidgetContent::TextBlock { text } => (Some(text.clone()), None, None),
            WidgetContent::Checkbox { label, checked } => (Some(label.clone()), Some(*checked), None),
            WidgetContent::Dropdown { options, .. } => (None, None, Some(options.clone())),
            WidgetContent::TextInput { .. } | WidgetContent::TextArea { .. } | WidgetContent::Image { .. } => {
                (None, None, None)
            }
        };

        Self {
            id: Some(widget.id().to_string()),
            kind: widget.kind().tag().to_string(),
            left: Some(format_px(widget.origin.x)),
            top: Some(format_px(widget.origin.y)),
            width: Some(format_px(widget.size.width)),
            height: Some(format_px(widget.size.height)),
            z_index: Value::from(widget.z_index),
            text,
            checked,
            options,
        }
    }

    /// The widget kind named by `type`, if known.
    pub fn widget_kind(&self) -> Option<WidgetKind> {
        WidgetKind::from_tag(&self.kind)
    }

    /// Rebuild a widget through the factory, overriding its defaults with
    /// whatever the record carries. Unknown types yield `None`.
    ///
    /// The returned widget gets the record's identifier when one is present,
    /// otherwise a freshly allocated one.
    pub fn into_widget(self, factory: &mut WidgetFactory) -> Option<Widget> {
        let kind = self.widget_kind()?;
        let mut widget = match self.id.as_deref() {
            Some(id) if !id.is_empty() => {
                Widget::new(WidgetId::from(id), WidgetContent::default_for(kind))
            }
            _ => factory.create(kind),
        };

        let px = |field: &Option<String>, fallback: f64| field.as_deref().and_then(parse_px).unwrap_or(fallback);
        widget.origin = Point::new(px(&self.left, DEFAULT_ORIGIN.x), px(&self.top, DEFAULT_ORIGIN.y));
        widget.size = Size::new(px(&self.width, DEFAULT_SIZE.width), px(&self.height, DEFAULT_SIZE.height));
        widget.z_index = parse_z_index(&self.z_index);

        match &mut widget.content {
            WidgetContent::Button { label } => {
                if let Some(text) = self.text {
                    *label = text;
                }
            }
            WidgetContent::TextBlock { text } => {
                if let Some(saved) = self.text {
                    *text = saved;
                }
            }
            WidgetContent::Checkbox { label, checked } => {
                if let Some(text) = self.text {
                    *label = text;
                }
                *checked = self.checked.unwrap_or(false);
            }
            WidgetContent::Dropdown { options, selected } => {
                if let Some(saved) = self.options.filter(|o| !o.is_empty()) {
                    *options = saved;
                    *selected = 0;
                }
            }
            WidgetContent::TextInput { .. } | WidgetContent::TextArea { .. } | WidgetContent::Image { .. } => {}
        }

        Some(widget)
    }
}

/// Records for `widgets`, in the order given.
pub fn records<'a>(widgets: impl IntoIterator<Item = &'a Widget>) -> Vec<LayoutRecord> {
    widgets.into_iter().map(LayoutRecord::from_widget).collect()
}

/// Serialize records to the storage blob.
pub fn to_json(records: &[LayoutRecord]) -> Result<String, LayoutError> {
    serde_json::to_string(records).map_err(|e| LayoutError::Serialize(e.to_string()))
}

/// Split a stored blob into its raw entries.
///
/// Only the outer array is checked here; entries are decoded one at a time
/// with [`decode_record`] so a bad entry leaves earlier ones usable.
pub fn parse_layout(blob: &str) -> Result<Vec<Value>, LayoutError> {
    let value: Value = serde_json::from_str(blob).map_err(|e| LayoutError::Parse(e.to_string()))?;
    match value {
        Value::Array(entries) => Ok(entries),
        other => Err(LayoutError::Parse(format!("expected an array, found {}", json_type(&other)))),
    }
}

/// Decode the entry at `index`.
pub fn decode_record(index: usize, entry: Value) -> Result<LayoutRecord, LayoutError> {
    if !entry.is_object() {
        return Err(LayoutError::Structure {
            index,
            reason: format!("expected an object, found {}", json_type(&entry)),
        });
    }
    serde_json::from_value(entry).map_err(|e| LayoutError::Structure {
        index,
        reason: e.to_string(),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_px_formatting() {
        assert_eq!(format_px(20.0), "20px");
        assert_eq!(format_px(12.5), "12.5px");
        assert_eq!(format_px(0.0), "0px");
    }

    #[test]
    fn test_px_parsing() {
        assert_eq!(parse_px("20px"), Some(20.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("40"), Some(40.0));
        assert_eq!(parse_px("wide"), None);
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("NaNpx"), None);
    }

    #[test]
    fn test_z_index_parsing() {
        assert_eq!(parse_z_index(&json!(3)), 3);
        assert_eq!(parse_z_index(&json!("7")), 7);
        assert_eq!(parse_z_index(&json!(2.9)), 2);
        assert_eq!(parse_z_index(&json!("")), 0);
        assert_eq!(parse_z_index(&json!(null)), 0);
        assert_eq!(parse_z_index(&json!(true)), 0);
    }

    #[test]
    fn test_button_record_shape() {
        let mut factory = WidgetFactory::new();
        let mut button = factory.create(WidgetKind::Button);
        button.z_index = 4;
        let value = serde_json::to_value(LayoutRecord::from_widget(&button)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "component-1",
                "type": "button-component",
                "left": "20px",
                "top": "20px",
                "width": "200px",
                "height": "80px",
                "zIndex": 4,
                "text": "Button"
            })
        );
    }

    #[test]
    fn test_conditional_fields() {
        let mut factory = WidgetFactory::new();
        let checkbox = LayoutRecord::from_widget(&factory.create(WidgetKind::Checkbox));
        assert_eq!(checkbox.checked, Some(false));
        assert_eq!(checkbox.text.as_deref(), Some("Checkbox Label"));

        let dropdown = LayoutRecord::from_widget(&factory.create(WidgetKind::Dropdown));
        assert_eq!(dropdown.options.as_ref().map(Vec::len), Some(3));
        assert!(dropdown.text.is_none());

        let input = serde_json::to_value(LayoutRecord::from_widget(&factory.create(WidgetKind::TextInput))).unwrap();
        assert!(input.get("text").is_none());
        assert!(input.get("checked").is_none());
        assert!(input.get("options").is_none());
    }

    #[test]
    fn test_into_widget_restores_fields() {
        let record = decode_record(
            0,
            json!({
                "id": "component-9",
                "type": "checkbox-component",
                "left": "40px",
                "top": "60px",
                "width": "150px",
                "height": "45px",
                "zIndex": "2",
                "text": "Agree",
                "checked": true
            }),
        )
        .unwrap();
        let mut factory = WidgetFactory::new();
        let widget = record.into_widget(&mut factory).unwrap();
        assert_eq!(widget.id().as_str(), "component-9");
        assert_eq!(widget.origin, Point::new(40.0, 60.0));
        assert_eq!(widget.size, Size::new(150.0, 45.0));
        assert_eq!(widget.z_index, 2);
        assert_eq!(
            widget.content,
            WidgetContent::Checkbox { label: "Agree".to_string(), checked: true }
        );
        // The saved id was used, so nothing was allocated.
        assert_eq!(factory.counter(), 0);
    }

    #[test]
    fn test_into_widget_defaults_for_missing_fields() {
        let record = decode_record(0, json!({"type": "text-component"})).unwrap();
        let mut factory = WidgetFactory::new();
        let widget = record.into_widget(&mut factory).unwrap();
        assert_eq!(widget.id().as_str(), "component-1");
        assert_eq!(widget.origin, DEFAULT_ORIGIN);
        assert_eq!(widget.size, DEFAULT_SIZE);
        assert_eq!(widget.z_index, 0);
        assert_eq!(widget.content, WidgetContent::default_for(WidgetKind::TextBlock));
    }

    #[test]
    fn test_empty_options_keep_defaults() {
        let record = decode_record(0, json!({"type": "select-component", "options": []})).unwrap();
        let widget = record.into_widget(&mut WidgetFactory::new()).unwrap();
        assert_eq!(widget.content, WidgetContent::default_for(WidgetKind::Dropdown));
    }

    #[test]
    fn test_empty_text_is_preserved() {
        let record = decode_record(0, json!({"type": "button-component", "text": ""})).unwrap();
        let widget = record.into_widget(&mut WidgetFactory::new()).unwrap();
        assert_eq!(widget.content.text(), Some(""));
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let record = decode_record(0, json!({"id": "component-1", "type": "unknown"})).unwrap();
        assert!(record.into_widget(&mut WidgetFactory::new()).is_none());

        let record = decode_record(0, json!({})).unwrap();
        assert_eq!(record.kind, UNKNOWN_TYPE);
    }

    #[test]
    fn test_parse_layout_rejects_non_arrays() {
        assert!(matches!(parse_layout("{\"a\": 1}"), Err(LayoutError::Parse(_))));
        assert!(matches!(parse_layout("[{\"type\": "), Err(LayoutError::Parse(_))));
        assert_eq!(parse_layout("[]").unwrap().len(), 0);
    }

    #[test]
    fn test_decode_record_reports_index() {
        let err = decode_record(3, json!(42)).unwrap_err();
        assert!(matches!(err, LayoutError::Structure { index: 3, .. }));

        let err = decode_record(1, json!({"type": "button-component", "checked": "yes"})).unwrap_err();
        assert!(matches!(err, LayoutError::Structure { index: 1, .. }));
    }
}
