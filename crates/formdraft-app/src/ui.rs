//! egui user interface: palette, toolbar, canvas and modal dialogs.

use egui::{
    Align2, Color32, Context, CornerRadius, CursorIcon, FontId, Frame, Key, KeyboardShortcut, Margin,
    Modifiers, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2,
};
use formdraft_core::widget::{HandleKind, content_rect, field_rect, handles};
use formdraft_core::{FormCanvas, HitRegion, Interaction, Notice, Widget, WidgetContent, WidgetId, WidgetKind};
use formdraft_widgets::{
    TextButton, danger_btn, modal_frame, panel_frame, primary_btn, secondary_btn, section_label, separator, sizing,
    theme, toolbar_frame,
};

use crate::event_handler::screen_to_canvas;

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Create a widget of this kind at a free spot.
    AddWidget(WidgetKind),
    DeleteWidget(WidgetId),
    /// The user answered the clear-all question with yes.
    ConfirmClear,
    /// The user answered the clear-all question with no.
    CancelClear,
    SaveLayout,
    LoadLayout,
    DismissNotice,
    CommitEdit,
    CancelEdit,
    SetChecked(WidgetId, bool),
    SelectOption(WidgetId, usize),
}

/// UI state that persists between frames.
#[derive(Debug, Default)]
pub struct UiState {
    /// Whether the clear-all confirmation is showing.
    pub confirm_clear_open: bool,
    /// Outcome of the last save/load/clear, shown until dismissed.
    pub notice: Option<Notice>,
    /// Give keyboard focus to the inline editor on the next frame.
    pub focus_edit: bool,
}

impl UiState {
    /// Whether a dialog currently blocks the canvas.
    pub fn modal_open(&self) -> bool {
        self.confirm_clear_open || self.notice.is_some()
    }
}

/// What one UI pass produced.
#[derive(Debug, Clone)]
pub struct UiOutput {
    /// Actions in the order they must be applied. An edit committed by losing
    /// focus comes before the click that took the focus away.
    pub actions: Vec<UiAction>,
    /// Screen area of the canvas, for mapping pointer positions.
    pub canvas_rect: Rect,
}

/// Render the whole interface.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, canvas: &mut FormCanvas) -> UiOutput {
    let toolbar_action = render_toolbar(ctx, ui_state);
    let palette_action = render_palette(ctx);
    let (canvas_actions, canvas_rect) = render_canvas(ctx, ui_state, canvas);

    let mut modal_action = None;
    if ui_state.confirm_clear_open {
        modal_action = render_confirm_dialog(ctx, ui_state);
    } else if let Some(notice) = &ui_state.notice {
        modal_action = render_notice_dialog(ctx, notice);
    }

    let mut actions = canvas_actions;
    actions.extend(palette_action);
    actions.extend(toolbar_action);
    actions.extend(modal_action);
    UiOutput { actions, canvas_rect }
}

/// Map a canvas-space rectangle to the screen.
pub fn canvas_to_screen(rect: kurbo::Rect, canvas_rect: Rect) -> Rect {
    let origin = canvas_rect.min;
    Rect::from_min_max(
        Pos2::new(origin.x + rect.x0 as f32, origin.y + rect.y0 as f32),
        Pos2::new(origin.x + rect.x1 as f32, origin.y + rect.y1 as f32),
    )
}

fn render_toolbar(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    egui::TopBottomPanel::top("toolbar")
        .frame(Frame::new().inner_margin(Margin::same(8)))
        .show(ctx, |ui| {
            toolbar_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("FormDraft").size(15.0).strong().color(theme::TEXT));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if danger_btn(ui, "Clear All") {
                            ui_state.confirm_clear_open = true;
                        }
                        if secondary_btn(ui, "Load Layout") {
                            action = Some(UiAction::LoadLayout);
                        }
                        if primary_btn(ui, "Save Layout") {
                            action = Some(UiAction::SaveLayout);
                        }
                    });
                });
            });
        });

    action
}

fn render_palette(ctx: &Context) -> Option<UiAction> {
    let mut action = None;

    egui::SidePanel::left("palette")
        .resizable(false)
        .exact_width(190.0)
        .frame(Frame::new().inner_margin(Margin::same(8)))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.spacing_mut().item_spacing = Vec2::new(0.0, 4.0);
                section_label(ui, "Components");
                separator(ui);
                for kind in WidgetKind::ALL {
                    if TextButton::new(kind.label()).show(ui) {
                        action = Some(UiAction::AddWidget(kind));
                    }
                }
            });
        });

    action
}

fn render_canvas(ctx: &Context, ui_state: &mut UiState, canvas: &mut FormCanvas) -> (Vec<UiAction>, Rect) {
    let mut actions = Vec::new();
    let mut canvas_rect = Rect::NOTHING;

    egui::CentralPanel::default()
        .frame(Frame::new().fill(theme::HOVER_BG).inner_margin(Margin::same(16)))
        .show(ctx, |ui| {
            let size = canvas.size();
            let (rect, _) = ui.allocate_exact_size(Vec2::new(size.width as f32, size.height as f32), Sense::hover());
            canvas_rect = rect;
            ui.painter().rect(
                rect,
                CornerRadius::same(sizing::CORNER_RADIUS),
                theme::CANVAS_BG,
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Outside,
            );

            // Snapshot so live controls can borrow the canvas mutably.
            let widgets: Vec<Widget> = canvas.document().paint_order().into_iter().cloned().collect();
            let editing = canvas.edit_session().map(|s| s.widget().clone());
            let active = canvas.active_widget().cloned();

            let mut widget_actions = Vec::new();
            for widget in &widgets {
                let is_editing = editing.as_ref() == Some(widget.id());
                let highlighted = is_editing || active.as_ref() == Some(widget.id());
                widget_actions.extend(draw_widget(ui, rect, canvas, widget, is_editing, highlighted));
            }

            actions.extend(draw_edit_overlay(ui, rect, ui_state, canvas));
            actions.append(&mut widget_actions);

            update_cursor(ctx, rect, canvas);
        });

    (actions, canvas_rect)
}

fn draw_widget(
    ui: &mut Ui,
    canvas_rect: Rect,
    canvas: &mut FormCanvas,
    widget: &Widget,
    is_editing: bool,
    highlighted: bool,
) -> Option<UiAction> {
    let mut action = None;
    let bounds = canvas_to_screen(widget.bounds(), canvas_rect);
    let content = canvas_to_screen(content_rect(widget.bounds()), canvas_rect);
    let painter = ui.painter().with_clip_rect(bounds);

    let border = if highlighted { theme::ACCENT } else { theme::WIDGET_BORDER };
    painter.rect(
        bounds,
        CornerRadius::same(sizing::CORNER_RADIUS),
        Color32::WHITE,
        Stroke::new(1.0, border),
        StrokeKind::Inside,
    );

    let salt = widget.id().as_str();
    match &widget.content {
        WidgetContent::Button { label } => {
            painter.rect_filled(content, CornerRadius::same(sizing::CORNER_RADIUS), theme::ACCENT);
            if !is_editing {
                painter.text(content.center(), Align2::CENTER_CENTER, label, FontId::proportional(14.0), Color32::WHITE);
            }
        }
        WidgetContent::TextInput { .. } | WidgetContent::TextArea { .. } => {
            if let Some(field) = field_rect(widget) {
                draw_text_field(ui, canvas, widget.id(), canvas_to_screen(field, canvas_rect));
            }
        }
        WidgetContent::Dropdown { options, selected } => {
            if let (Some(field), false) = (field_rect(widget), is_editing) {
                let field = canvas_to_screen(field, canvas_rect);
                let current = options.get(*selected).map(String::as_str).unwrap_or_default();
                ui.scope_builder(egui::UiBuilder::new().max_rect(field), |ui| {
                    egui::ComboBox::from_id_salt(("dropdown", salt))
                        .selected_text(current)
                        .width(field.width())
                        .show_ui(ui, |ui| {
                            for (index, option) in options.iter().enumerate() {
                                if ui.selectable_label(index == *selected, option.as_str()).clicked() {
                                    action = Some(UiAction::SelectOption(widget.id().clone(), index));
                                }
                            }
                        });
                });
            }
        }
        WidgetContent::Checkbox { label, checked } => {
            if let Some(field) = field_rect(widget) {
                let field = canvas_to_screen(field, canvas_rect);
                let mut value = *checked;
                if ui.put(field, egui::Checkbox::without_text(&mut value)).changed() {
                    action = Some(UiAction::SetChecked(widget.id().clone(), value));
                }
                if !is_editing {
                    painter.text(
                        Pos2::new(field.right() + 6.0, field.center().y),
                        Align2::LEFT_CENTER,
                        label,
                        FontId::proportional(13.0),
                        theme::TEXT,
                    );
                }
            }
        }
        WidgetContent::TextBlock { text } => {
            if !is_editing {
                let galley = painter.layout(text.clone(), FontId::proportional(13.0), theme::TEXT, content.width());
                painter.galley(content.min, galley, theme::TEXT);
            }
        }
        WidgetContent::Image { caption } => {
            painter.rect(
                content,
                CornerRadius::same(sizing::CORNER_RADIUS),
                theme::HOVER_BG,
                Stroke::new(1.0, theme::WIDGET_BORDER),
                StrokeKind::Inside,
            );
            painter.text(content.center(), Align2::CENTER_CENTER, caption, FontId::proportional(13.0), theme::TEXT_MUTED);
        }
    }

    for handle in handles(widget.bounds()) {
        let rect = canvas_to_screen(handle.rect, canvas_rect);
        match handle.kind {
            HandleKind::Delete => {
                let response = ui.interact(rect, egui::Id::new(("delete", salt)), Sense::click());
                let fill = if response.hovered() { theme::DANGER } else { Color32::from_rgb(248, 113, 113) };
                painter.rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), fill);
                painter.text(rect.center(), Align2::CENTER_CENTER, "×", FontId::proportional(14.0), Color32::WHITE);
                if response.clicked() {
                    action = Some(UiAction::DeleteWidget(widget.id().clone()));
                }
            }
            HandleKind::Resize => {
                painter.rect_filled(rect, CornerRadius::ZERO, border);
            }
        }
    }

    action
}

/// Live text field bound to the widget's runtime value.
fn draw_text_field(ui: &mut Ui, canvas: &mut FormCanvas, id: &WidgetId, rect: Rect) {
    let Some(widget) = canvas.widget_mut(id) else {
        return;
    };
    let salt = ("field", id.as_str());
    match &mut widget.content {
        WidgetContent::TextInput { placeholder, value } => {
            let edit = egui::TextEdit::singleline(value)
                .hint_text(placeholder.as_str())
                .id_salt(salt)
                .desired_width(rect.width());
            ui.put(rect, edit);
        }
        WidgetContent::TextArea { placeholder, value } => {
            let rows = ((rect.height() / 18.0).floor() as usize).max(1);
            let edit = egui::TextEdit::multiline(value)
                .hint_text(placeholder.as_str())
                .id_salt(salt)
                .desired_width(rect.width())
                .desired_rows(rows);
            ui.put(rect, edit);
        }
        _ => {}
    }
}

/// Text field over the widget being edited.
///
/// Enter commits (Shift+Enter adds a line to text blocks), Escape cancels,
/// and clicking elsewhere commits.
fn draw_edit_overlay(ui: &mut Ui, canvas_rect: Rect, ui_state: &mut UiState, canvas: &mut FormCanvas) -> Option<UiAction> {
    let id = canvas.edit_session()?.widget().clone();
    let rect = canvas_to_screen(content_rect(canvas.widget(&id)?.bounds()), canvas_rect);
    let session = canvas.edit_session_mut()?;
    let multiline = session.is_multiline();

    let edit = if multiline {
        egui::TextEdit::multiline(&mut session.draft)
            .return_key(KeyboardShortcut::new(Modifiers::SHIFT, Key::Enter))
            .desired_rows(((rect.height() / 18.0).floor() as usize).max(1))
    } else {
        egui::TextEdit::singleline(&mut session.draft)
    };
    let response = ui.put(rect, edit.id_salt(("edit", id.as_str())).desired_width(rect.width()));

    if ui_state.focus_edit {
        response.request_focus();
        ui_state.focus_edit = false;
        return None;
    }

    let (enter, escape) = ui.input(|i| (i.key_pressed(Key::Enter) && !i.modifiers.shift, i.key_pressed(Key::Escape)));
    if escape && (response.has_focus() || response.lost_focus()) {
        return Some(UiAction::CancelEdit);
    }
    if response.lost_focus() || (multiline && enter && response.has_focus()) {
        return Some(UiAction::CommitEdit);
    }
    None
}

fn update_cursor(ctx: &Context, canvas_rect: Rect, canvas: &FormCanvas) {
    let icon = match canvas.interaction() {
        Interaction::Dragging(_) => Some(CursorIcon::Grabbing),
        Interaction::Resizing(_) => Some(CursorIcon::ResizeNwSe),
        Interaction::Idle => ctx
            .pointer_hover_pos()
            .filter(|pos| canvas_rect.contains(*pos))
            .and_then(|pos| canvas.document().widget_at(screen_to_canvas(pos, canvas_rect)))
            .and_then(|(_, region)| match region {
                HitRegion::Body => Some(CursorIcon::Grab),
                HitRegion::ResizeHandle => Some(CursorIcon::ResizeNwSe),
                HitRegion::DeleteControl => Some(CursorIcon::PointingHand),
                HitRegion::Field => None,
            }),
    };
    if let Some(icon) = icon {
        ctx.set_cursor_icon(icon);
    }
}

fn modal_backdrop(ctx: &Context, id: &str) -> bool {
    let mut clicked = false;
    egui::Area::new(egui::Id::new(id))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            let screen_rect = ctx.input(|i| i.content_rect());
            let response = ui.allocate_rect(screen_rect, Sense::click());
            ui.painter().rect_filled(screen_rect, 0.0, Color32::from_black_alpha(80));
            clicked = response.clicked();
        });
    clicked
}

fn render_confirm_dialog(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    if modal_backdrop(ctx, "confirm_clear_backdrop") {
        action = Some(UiAction::CancelClear);
    }

    egui::Area::new(egui::Id::new("confirm_clear"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            modal_frame().show(ui, |ui| {
                ui.set_width(320.0);
                ui.label(egui::RichText::new("Clear canvas").size(16.0).strong().color(theme::TEXT));
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("Are you sure you want to clear all components?")
                        .size(13.0)
                        .color(theme::TEXT_MUTED),
                );
                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    if secondary_btn(ui, "Cancel") {
                        action = Some(UiAction::CancelClear);
                    }
                    if danger_btn(ui, "Clear All") {
                        action = Some(UiAction::ConfirmClear);
                    }
                });
            });
        });

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        action = Some(UiAction::CancelClear);
    }
    if action.is_some() {
        ui_state.confirm_clear_open = false;
    }
    action
}

fn render_notice_dialog(ctx: &Context, notice: &Notice) -> Option<UiAction> {
    let mut action = None;

    if modal_backdrop(ctx, "notice_backdrop") {
        action = Some(UiAction::DismissNotice);
    }

    egui::Area::new(egui::Id::new("notice"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            modal_frame().show(ui, |ui| {
                ui.set_width(300.0);
                let color = if notice.is_error() { theme::DANGER } else { theme::TEXT };
                ui.label(egui::RichText::new(notice.message()).size(15.0).strong().color(color));
                if let Some(detail) = notice.detail() {
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(detail).size(12.0).color(theme::TEXT_MUTED));
                }
                ui.add_space(16.0);
                if primary_btn(ui, "OK") {
                    action = Some(UiAction::DismissNotice);
                }
            });
        });

    if ctx.input(|i| i.key_pressed(Key::Enter) || i.key_pressed(Key::Escape)) {
        action = Some(UiAction::DismissNotice);
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_to_screen() {
        let canvas_rect = Rect::from_min_size(Pos2::new(200.0, 50.0), Vec2::new(800.0, 600.0));
        let rect = canvas_to_screen(kurbo::Rect::new(20.0, 20.0, 220.0, 100.0), canvas_rect);
        assert_eq!(rect, Rect::from_min_max(Pos2::new(220.0, 70.0), Pos2::new(420.0, 150.0)));
    }

    #[test]
    fn test_modal_open() {
        let mut state = UiState::default();
        assert!(!state.modal_open());
        state.confirm_clear_open = true;
        assert!(state.modal_open());
        state.confirm_clear_open = false;
        state.notice = Some(Notice::Saved);
        assert!(state.modal_open());
    }

    #[test]
    fn test_render_ui_without_input() {
        let ctx = Context::default();
        let mut state = UiState::default();
        let mut canvas = FormCanvas::new();
        canvas.add_widget(WidgetKind::Dropdown);
        canvas.add_widget(WidgetKind::Checkbox);
        let mut output = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            output = Some(render_ui(ctx, &mut state, &mut canvas));
        });
        let output = output.unwrap();
        assert!(output.actions.is_empty());
        assert_eq!(output.canvas_rect.size(), Vec2::new(800.0, 600.0));
    }
}
