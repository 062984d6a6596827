//! Frames for panels, toolbars and modal dialogs.

use egui::{Color32, CornerRadius, Frame, Margin, Stroke};

use crate::{sizing, theme};

/// Create a standard panel frame with shadow.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(10))
}

/// Create a toolbar panel frame (tighter vertical padding).
pub fn toolbar_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::symmetric(10, 6))
}

/// White rounded frame for modal dialogs.
pub fn modal_frame() -> Frame {
    Frame::new()
        .fill(Color32::WHITE)
        .corner_radius(CornerRadius::same(sizing::MODAL_RADIUS))
        .stroke(Stroke::new(1.0, Color32::from_gray(200)))
        .shadow(egui::epaint::Shadow {
            spread: 2,
            blur: 20,
            offset: [0, 4],
            color: Color32::from_black_alpha(40),
        })
        .inner_margin(Margin::same(24))
}
