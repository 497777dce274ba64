// Per-card drag state: one instance per mounted scratch card.
use super::viewport::Point;

#[derive(Default, Debug, Clone)]
pub struct StrokeState {
    pub scratching: bool,
    pub last_point: Option<Point>,
    /// Move strokes erased since the card mounted.
    pub strokes: u32,
    /// Timestamp (ms) of the last accepted pointer-down.
    pub last_down_ms: Option<f64>,
}

impl StrokeState {
    /// Strictly inside the window counts as a double tap.
    pub fn is_double_tap(&self, now_ms: f64, window_ms: f64) -> bool {
        match self.last_down_ms {
            Some(prev) => now_ms - prev < window_ms,
            None => false,
        }
    }

    /// Starts a stroke. Without a known position the first move only
    /// places the pen.
    pub fn begin(&mut self, at: Option<Point>, now_ms: f64) {
        self.last_down_ms = Some(now_ms);
        self.scratching = true;
        self.last_point = at;
    }

    /// Moves the pen to `to`, returning where the segment starts.
    pub fn extend(&mut self, to: Point) -> Option<Point> {
        self.strokes = self.strokes.wrapping_add(1);
        self.last_point.replace(to)
    }

    pub fn end(&mut self) {
        self.scratching = false;
        self.last_point = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_tap_window_is_strict() {
        let mut s = StrokeState::default();
        assert!(!s.is_double_tap(0.0, 350.0));
        s.begin(Some(Point::new(1.0, 1.0)), 1_000.0);
        assert!(s.is_double_tap(1_349.0, 350.0));
        assert!(!s.is_double_tap(1_350.0, 350.0));
    }

    #[test]
    fn extend_chains_points() {
        let mut s = StrokeState::default();
        s.begin(Some(Point::new(0.0, 0.0)), 5.0);
        assert_eq!(s.extend(Point::new(3.0, 4.0)), Some(Point::new(0.0, 0.0)));
        assert_eq!(s.extend(Point::new(6.0, 8.0)), Some(Point::new(3.0, 4.0)));
        assert_eq!(s.strokes, 2);
        s.end();
        assert!(!s.scratching);
        assert_eq!(s.last_point, None);
        assert_eq!(s.last_down_ms, Some(5.0));
    }

    #[test]
    fn unplaced_begin_still_scratches() {
        let mut s = StrokeState::default();
        s.begin(None, 7.0);
        assert!(s.scratching);
        assert_eq!(s.extend(Point::new(2.0, 2.0)), None);
        assert_eq!(s.extend(Point::new(4.0, 2.0)), Some(Point::new(2.0, 2.0)));
    }
}
