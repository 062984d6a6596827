//! Translation of egui input into canvas pointer events.

use std::collections::HashSet;

use egui::{Event, PointerButton, TouchPhase};
use formdraft_core::{PointerEvent, PointerId};
use kurbo::Point;

/// Convert a screen position to canvas coordinates.
pub fn screen_to_canvas(pos: egui::Pos2, canvas_rect: egui::Rect) -> Point {
    Point::new((pos.x - canvas_rect.min.x) as f64, (pos.y - canvas_rect.min.y) as f64)
}

/// Turns the egui event stream into mouse and touch pointer events.
///
/// egui-winit reports a touch twice: once as a touch event and once as a
/// simulated primary-button press. The simulated copy is dropped so the canvas
/// sees each press exactly once, tagged with the touch id.
#[derive(Debug, Default)]
pub struct EventHandler {
    active_touches: HashSet<u64>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all touches, e.g. when a modal takes over input.
    pub fn reset(&mut self) {
        self.active_touches.clear();
    }

    /// Translate one frame's worth of egui events.
    ///
    /// Presses only count when they land on the canvas. Moves and releases are
    /// forwarded wherever they happen so a drag can leave the canvas.
    pub fn translate(&mut self, events: &[Event], canvas_rect: egui::Rect) -> Vec<PointerEvent> {
        let touch_frame = events.iter().any(|e| matches!(e, Event::Touch { .. }));
        let mut out = Vec::new();

        for event in events {
            match event {
                Event::Touch { id, phase, pos, .. } => {
                    let pointer = PointerId::Touch(id.0);
                    let position = screen_to_canvas(*pos, canvas_rect);
                    match phase {
                        TouchPhase::Start => {
                            self.active_touches.insert(id.0);
                            if canvas_rect.contains(*pos) {
                                out.push(PointerEvent::Down { pointer, position });
                            }
                        }
                        TouchPhase::Move => {
                            out.push(PointerEvent::Move { pointer, position });
                        }
                        TouchPhase::End => {
                            self.active_touches.remove(&id.0);
                            out.push(PointerEvent::Up { pointer, position });
                        }
                        TouchPhase::Cancel => {
                            self.active_touches.remove(&id.0);
                            out.push(PointerEvent::Cancel { pointer });
                        }
                    }
                }
                _ if touch_frame || !self.active_touches.is_empty() => {}
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let position = screen_to_canvas(*pos, canvas_rect);
                    if *pressed {
                        if canvas_rect.contains(*pos) {
                            out.push(PointerEvent::Down { pointer: PointerId::Mouse, position });
                        }
                    } else {
                        out.push(PointerEvent::Up { pointer: PointerId::Mouse, position });
                    }
                }
                Event::PointerMoved(pos) => {
                    out.push(PointerEvent::Move {
                        pointer: PointerId::Mouse,
                        position: screen_to_canvas(*pos, canvas_rect),
                    });
                }
                Event::PointerGone => {
                    out.push(PointerEvent::Cancel { pointer: PointerId::Mouse });
                }
                _ => {}
            }
        }

        out
    }
}
