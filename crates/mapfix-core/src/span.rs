//! Byte ranges locating syntax in rendered source text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` in rendered source text.
///
/// Spans locate diagnostics for the host and gate batched fix
/// application: fixes whose spans overlap cannot be applied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First byte covered.
    pub start: u64,
    /// One past the last byte covered.
    pub end: u64,
}

impl Span {
    /// Create a span over `[start, end)`.
    ///
    /// # Panics
    /// Panics on a reversed range.
    pub fn new(start: u64, end: u64) -> Self {
        assert!(start <= end, "reversed span: start {start} > end {end}");
        Span { start, end }
    }

    /// Whether two spans cover at least one common byte.
    ///
    /// Ranges are half-open, so a span ending exactly where another
    /// begins does not overlap it.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_call_ranges_overlap() {
        // A call nested in another call's argument sits inside the
        // outer call's range; such fixes cannot be batched.
        let outer = Span::new(0, 36);
        let inner = Span::new(16, 35);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        // `a(x)` directly followed by `.b(y)` on the same line: the
        // ranges touch at one boundary byte but share none.
        let first = Span::new(0, 4);
        let second = Span::new(4, 9);
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    #[should_panic(expected = "reversed span")]
    fn reversed_bounds_are_rejected() {
        Span::new(9, 3);
    }

    #[test]
    fn display_shows_half_open_range() {
        assert_eq!(Span::new(4, 16).to_string(), "[4, 16)");
    }

    #[test]
    fn survives_json_round_trip() {
        let span = Span::new(3, 9);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(serde_json::from_str::<Span>(&json).unwrap(), span);
    }
}
