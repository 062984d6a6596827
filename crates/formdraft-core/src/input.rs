//! Pointer input: unified mouse/touch events and double-click detection.

use kurbo::Point;
use std::collections::HashSet;

// Use web_time for WASM compatibility
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Which physical pointer produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    /// A touch point, identified by the platform's touch id.
    Touch(u64),
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { pointer: PointerId, position: Point },
    Move { pointer: PointerId, position: Point },
    Up { pointer: PointerId, position: Point },
    /// The platform abandoned the pointer (touch cancel, focus loss).
    Cancel { pointer: PointerId },
}

impl PointerEvent {
    pub fn pointer(&self) -> PointerId {
        match *self {
            PointerEvent::Down { pointer, .. }
            | PointerEvent::Move { pointer, .. }
            | PointerEvent::Up { pointer, .. }
            | PointerEvent::Cancel { pointer } => pointer,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => Some(position),
            PointerEvent::Cancel { .. } => None,
        }
    }
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks pointer state between events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position in canvas coordinates.
    pub pointer_position: Point,
    /// Touch points currently down.
    active_touches: HashSet<u64>,
    last_click_time: Option<Instant>,
    last_click_position: Option<Point>,
    double_click_detected: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.handle_pointer_event_at(event, Instant::now());
    }

    fn handle_pointer_event_at(&mut self, event: PointerEvent, now: Instant) {
        self.double_click_detected = false;
        if let Some(position) = event.position() {
            self.pointer_position = position;
        }

        match event {
            PointerEvent::Down { pointer, position } => {
                if let PointerId::Touch(id) = pointer {
                    self.active_touches.insert(id);
                }
                self.register_click(position, now);
            }
            PointerEvent::Up { pointer, .. } | PointerEvent::Cancel { pointer } => {
                if let PointerId::Touch(id) = pointer {
                    self.active_touches.remove(&id);
                }
            }
            PointerEvent::Move { .. } => {}
        }
    }

    fn register_click(&mut self, position: Point, now: Instant) {
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position) {
            let elapsed = now.saturating_duration_since(last_time).as_millis();
            if elapsed < DOUBLE_CLICK_TIME_MS && position.distance(last_pos) < DOUBLE_CLICK_DISTANCE {
                self.double_click_detected = true;
                // Reset so a third click does not count as another double-click
                self.last_click_time = None;
                self.last_click_position = None;
                return;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
    }

    /// Whether the most recent event completed a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }

    /// Whether more than one finger is on the surface.
    pub fn is_multi_touch(&self) -> bool {
        self.active_touches.len() > 1
    }

    /// Forget every touch point, used when the pointer stream is cut off.
    pub fn release_all(&mut self) {
        self.active_touches.clear();
    }
}
