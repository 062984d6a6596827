//! Button components: palette entries and dialog buttons.

use egui::{Align2, Color32, CornerRadius, CursorIcon, Pos2, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::{sizing, theme};

/// A full-width palette entry.
pub struct TextButton<'a> {
    label: &'a str,
}

impl<'a> TextButton<'a> {
    /// Create a new text button.
    pub fn new(label: &'a str) -> Self {
        Self { label }
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let size = vec2(ui.available_width(), sizing::PALETTE_ITEM_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let (bg_color, stroke_color) = if response.is_pointer_button_down_on() {
                (theme::SELECTED_BG, theme::ACCENT)
            } else if response.hovered() {
                (theme::HOVER_BG, theme::BORDER)
            } else {
                (Color32::WHITE, theme::BORDER)
            };

            let painter = ui.painter();
            painter.rect(
                rect,
                CornerRadius::same(sizing::CORNER_RADIUS),
                bg_color,
                Stroke::new(1.0, stroke_color),
                StrokeKind::Inside,
            );
            painter.text(
                Pos2::new(rect.left() + 10.0, rect.center().y),
                Align2::LEFT_CENTER,
                self.label,
                egui::FontId::proportional(13.0),
                theme::TEXT,
            );
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

fn filled_button(ui: &mut Ui, label: &str, fill: Color32, hover: Color32, text: Color32, stroke: Stroke) -> bool {
    let font_id = egui::FontId::proportional(13.0);
    let galley = ui.painter().layout_no_wrap(label.to_string(), font_id.clone(), text);
    let size = vec2((galley.size().x + 24.0).max(72.0), sizing::BUTTON_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let bg = if response.hovered() { hover } else { fill };
        ui.painter()
            .rect(rect, CornerRadius::same(6), bg, stroke, StrokeKind::Inside);
        ui.painter()
            .text(rect.center(), Align2::CENTER_CENTER, label, font_id, text);
    }

    let clicked = response.clicked();
    response.on_hover_cursor(CursorIcon::PointingHand);
    clicked
}

/// Solid accent button for the default action of a dialog.
pub fn primary_btn(ui: &mut Ui, label: &str) -> bool {
    filled_button(
        ui,
        label,
        theme::ACCENT,
        Color32::from_rgb(37, 99, 235),
        Color32::WHITE,
        Stroke::NONE,
    )
}

/// Outlined neutral button.
pub fn secondary_btn(ui: &mut Ui, label: &str) -> bool {
    filled_button(
        ui,
        label,
        Color32::WHITE,
        theme::HOVER_BG,
        theme::TEXT,
        Stroke::new(1.0, theme::BORDER),
    )
}

/// Solid red button for destructive actions.
pub fn danger_btn(ui: &mut Ui, label: &str) -> bool {
    filled_button(
        ui,
        label,
        theme::DANGER,
        Color32::from_rgb(220, 38, 38),
        Color32::WHITE,
        Stroke::NONE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_button_fills_palette_row() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let before = ui.cursor().top();
                assert!(!TextButton::new("Button").show(ui));
                let used = ui.cursor().top() - before;
                assert!(used >= sizing::PALETTE_ITEM_HEIGHT);
            });
        });
    }
}
