//! Reusable egui components with Tailwind-inspired styling.
//!
//! - **Buttons**: palette entries, primary/secondary/danger dialog buttons
//! - **Frames**: panel, toolbar and modal frames
//! - **Layout**: section labels and separators

pub mod buttons;
pub mod frames;
pub mod layout;

pub use buttons::{TextButton, danger_btn, primary_btn, secondary_btn};
pub use frames::{modal_frame, panel_frame, toolbar_frame};
pub use layout::{section_label, separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Dialog and toolbar button height
    pub const BUTTON_HEIGHT: f32 = 28.0;
    /// Palette entry height
    pub const PALETTE_ITEM_HEIGHT: f32 = 32.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Modal corner radius
    pub const MODAL_RADIUS: u8 = 12;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Destructive action color (red)
    pub const DANGER: Color32 = Color32::from_rgb(239, 68, 68);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Selected background
    pub const SELECTED_BG: Color32 = Color32::from_rgb(235, 245, 255);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Canvas surface
    pub const CANVAS_BG: Color32 = Color32::WHITE;
    /// Widget outline on the canvas
    pub const WIDGET_BORDER: Color32 = Color32::from_rgb(203, 213, 225);
}
