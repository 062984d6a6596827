//! Collision-avoiding placement for new widgets.

use kurbo::{Point, Rect, Size};

/// Tunables for the placement scan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPolicy {
    /// First candidate position.
    pub start: Point,
    /// Horizontal advance after a collision.
    pub step_x: f64,
    /// Vertical advance when a row wraps.
    pub row_step: f64,
    /// A row wraps once `left` exceeds this.
    pub max_left: f64,
    /// The scan returns to the top once `top` exceeds this.
    pub max_top: f64,
    /// Heuristic candidates tried before falling back to a full-canvas sweep.
    pub max_attempts: usize,
    /// Grid spacing of the full-canvas sweep.
    pub sweep_step: f64,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            start: Point::new(20.0, 20.0),
            step_x: 20.0,
            row_step: 40.0,
            max_left: 300.0,
            max_top: 400.0,
            // 15 columns × 10 rows: every distinct heuristic candidate once.
            max_attempts: 150,
            sweep_step: 20.0,
        }
    }
}

impl PlacementPolicy {
    /// The candidate following `current` in the heuristic cycle.
    pub fn advance(&self, current: Point) -> Point {
        let mut left = current.x + self.step_x;
        let mut top = current.y;
        if left > self.max_left {
            left = self.start.x;
            top += self.row_step;
        }
        if top > self.max_top {
            top = self.start.y;
        }
        Point::new(left, top)
    }
}

/// Result of a placement scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Point,
    /// False when no free spot exists and `origin` overlaps something.
    pub is_clear: bool,
}

/// Axis-aligned overlap test. Rectangles that merely touch count as overlapping.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1 || a.y1 < b.y0 || a.y0 > b.y1)
}

fn fits(candidate: Rect, canvas: Size) -> bool {
    candidate.x0 >= 0.0
        && candidate.y0 >= 0.0
        && candidate.x1 <= canvas.width
        && candidate.y1 <= canvas.height
}

fn is_free(candidate: Rect, existing: &[Rect], canvas: Size) -> bool {
    fits(candidate, canvas) && !existing.iter().any(|&other| overlaps(candidate, other))
}

/// Find a position for a widget of `size` that overlaps none of `existing`.
///
/// Walks the heuristic cycle from `policy.start` first, then sweeps the whole
/// canvas. Always terminates; when the canvas is full the start position
/// (clamped into the canvas) is returned with `is_clear == false`.
pub fn find_position(existing: &[Rect], canvas: Size, size: Size, policy: &PlacementPolicy) -> Placement {
    let mut candidate = policy.start;
    for attempt in 0..policy.max_attempts {
        if is_free(Rect::from_origin_size(candidate, size), existing, canvas) {
            log::debug!("Placed at ({}, {}) after {} advances", candidate.x, candidate.y, attempt);
            return Placement { origin: candidate, is_clear: true };
        }
        candidate = policy.advance(candidate);
    }

    if let Some(origin) = sweep(existing, canvas, size, policy.sweep_step) {
        log::debug!("Heuristic exhausted, sweep placed at ({}, {})", origin.x, origin.y);
        return Placement { origin, is_clear: true };
    }

    let origin = Point::new(
        policy.start.x.min(canvas.width - size.width).max(0.0),
        policy.start.y.min(canvas.height - size.height).max(0.0),
    );
    log::warn!("No free space for a {}x{} widget, placing over existing ones", size.width, size.height);
    Placement { origin, is_clear: false }
}

fn sweep(existing: &[Rect], canvas: Size, size: Size, step: f64) -> Option<Point> {
    if step <= 0.0 || size.width > canvas.width || size.height > canvas.height {
        return None;
    }
    let columns = ((canvas.width - size.width) / step).floor() as usize;
    let rows = ((canvas.height - size.height) / step).floor() as usize;
    (0..=rows)
        .flat_map(|row| (0..=columns).map(move |col| Point::new(col as f64 * step, row as f64 * step)))
        .find(|&origin| is_free(Rect::from_origin_size(origin, size), existing, canvas))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size::new(800.0, 600.0);
    const WIDGET: Size = Size::new(200.0, 80.0);

    fn rect_at(x: f64, y: f64) -> Rect {
        Rect::from_origin_size(Point::new(x, y), WIDGET)
    }

    #[test]
    fn test_empty_canvas_uses_start() {
        let placement = find_position(&[], CANVAS, WIDGET, &PlacementPolicy::default());
        assert_eq!(placement.origin, Point::new(20.0, 20.0));
        assert!(placement.is_clear);
    }

    #[test]
    fn test_overlap_is_inclusive_of_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(overlaps(a, Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(!overlaps(a, Rect::new(10.5, 0.0, 20.0, 10.0)));
        assert!(!overlaps(a, Rect::new(0.0, 11.0, 10.0, 20.0)));
    }

    #[test]
    fn test_advance_wraps_row_and_top() {
        let policy = PlacementPolicy::default();
        assert_eq!(policy.advance(Point::new(20.0, 20.0)), Point::new(40.0, 20.0));
        assert_eq!(policy.advance(Point::new(300.0, 20.0)), Point::new(20.0, 60.0));
        assert_eq!(policy.advance(Point::new(300.0, 380.0)), Point::new(20.0, 20.0));
    }

    #[test]
    fn test_heuristic_cycle_has_expected_length() {
        let policy = PlacementPolicy::default();
        let mut seen = std::collections::HashSet::new();
        let mut p = policy.start;
        for _ in 0..policy.max_attempts {
            seen.insert((p.x as i64, p.y as i64));
            p = policy.advance(p);
        }
        assert_eq!(seen.len(), policy.max_attempts);
        assert_eq!(p, policy.start);
    }

    #[test]
    fn test_second_widget_moves_off_the_first() {
        let existing = [rect_at(20.0, 20.0)];
        let placement = find_position(&existing, CANVAS, WIDGET, &PlacementPolicy::default());
        assert!(placement.is_clear);
        assert!(!overlaps(Rect::from_origin_size(placement.origin, WIDGET), existing[0]));
        assert_eq!(placement.origin, Point::new(240.0, 20.0));
    }

    #[test]
    fn test_ten_widgets_never_overlap() {
        let policy = PlacementPolicy::default();
        let mut existing = Vec::new();
        for _ in 0..10 {
            let placement = find_position(&existing, CANVAS, WIDGET, &policy);
            assert!(placement.is_clear);
            let rect = Rect::from_origin_size(placement.origin, WIDGET);
            assert!(existing.iter().all(|&other| !overlaps(rect, other)));
            assert!(rect.x1 <= CANVAS.width && rect.y1 <= CANVAS.height);
            existing.push(rect);
        }
    }

    #[test]
    fn test_avoids_widgets_off_the_grid() {
        let policy = PlacementPolicy::default();
        let mut existing: Vec<Rect> = [(37.0, 53.0), (291.0, 17.0), (503.0, 131.0), (113.0, 247.0), (419.0, 361.0)]
            .into_iter()
            .map(|(x, y)| rect_at(x, y))
            .collect();

        let mut origins = Vec::new();
        for _ in 0..5 {
            let placement = find_position(&existing, CANVAS, WIDGET, &policy);
            assert!(placement.is_clear);
            let rect = Rect::from_origin_size(placement.origin, WIDGET);
            assert!(existing.iter().all(|&other| !overlaps(rect, other)));
            assert!(rect.x0 >= 0.0 && rect.y0 >= 0.0);
            assert!(rect.x1 <= CANVAS.width && rect.y1 <= CANVAS.height);
            origins.push(placement.origin);
            existing.push(rect);
        }

        // The fourth and fifth only turn up in the sweep.
        assert_eq!(origins[0], Point::new(240.0, 100.0));
        assert_eq!(origins[3], Point::new(500.0, 0.0));
    }

    #[test]
    fn test_falls_back_to_sweep() {
        // Every heuristic candidate starts left of x = 320.
        let existing = [Rect::new(0.0, 0.0, 520.0, 600.0)];
        let placement = find_position(&existing, CANVAS, WIDGET, &PlacementPolicy::default());
        assert!(placement.is_clear);
        assert_eq!(placement.origin, Point::new(540.0, 0.0));
    }

    #[test]
    fn test_full_canvas_terminates() {
        let existing = [Rect::new(0.0, 0.0, 800.0, 600.0)];
        let placement = find_position(&existing, CANVAS, WIDGET, &PlacementPolicy::default());
        assert!(!placement.is_clear);
        assert_eq!(placement.origin, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_widget_larger_than_canvas() {
        let placement = find_position(&[], Size::new(150.0, 60.0), WIDGET, &PlacementPolicy::default());
        assert!(!placement.is_clear);
        assert_eq!(placement.origin, Point::ZERO);
    }
}
