//! Presentation helpers
//!
//! Pure functions from a clock snapshot to the numbers a clock face needs:
//! digit text, progress ring geometry, colours and rotation.

use serde::{Deserialize, Serialize};

use crate::clock::{ClockSnapshot, Side};

/// Format remaining seconds as `M:SS`, rounding up to the next whole second
pub fn format_time(seconds: f64) -> String {
    if seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.ceil() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Fraction of the total still left, clamped to `0.0..=1.0`
pub fn progress(remaining: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    (remaining / total).clamp(0.0, 1.0)
}

/// Shape of the progress ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RingArc {
    /// Nothing left to draw
    Empty,
    /// Closed circle
    Full,
    /// Clockwise arc from the top of the ring
    Arc { start_degrees: f64, end_degrees: f64 },
}

pub fn ring_arc(progress: f64) -> RingArc {
    if progress >= 1.0 {
        RingArc::Full
    } else if progress > 0.0 {
        RingArc::Arc {
            start_degrees: 270.0,
            end_degrees: progress * 360.0 - 90.0,
        }
    } else {
        RingArc::Empty
    }
}

/// RGBA colour, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED: Rgba = Rgba { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// Colours of one clock face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceColours {
    pub background: Rgba,
    pub digits: Rgba,
    pub track: Rgba,
    pub progress: Rgba,
}

pub fn face_colours(side: Side, active: bool) -> FaceColours {
    let (background, contrast) = match side {
        Side::White => (Rgba::WHITE, Rgba::BLACK),
        Side::Black => (Rgba::BLACK, Rgba::WHITE),
    };
    let highlight = if active { Rgba::RED } else { contrast };

    FaceColours {
        background,
        digits: highlight,
        track: contrast.with_alpha(0.2),
        progress: highlight,
    }
}

/// White sits across the board, so its face is upside down
pub fn face_rotation_degrees(side: Side) -> f64 {
    match side {
        Side::White => 180.0,
        Side::Black => 0.0,
    }
}

/// Everything needed to draw one side's face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideView {
    pub side: Side,
    pub text: String,
    pub remaining_seconds: f64,
    pub progress: f64,
    pub ring: RingArc,
    pub active: bool,
    pub colours: FaceColours,
    pub rotation_degrees: f64,
}

impl SideView {
    /// Build the view for `side`. The side holding the move stays highlighted
    /// while its time runs and after its flag falls.
    pub fn from_snapshot(snapshot: &ClockSnapshot, side: Side) -> Self {
        let remaining = snapshot.remaining(side);
        let progress = progress(remaining, snapshot.total(side));
        let active = (snapshot.running || snapshot.expired) && snapshot.active_side == side;

        Self {
            side,
            text: format_time(remaining),
            remaining_seconds: remaining,
            progress,
            ring: ring_arc(progress),
            active,
            colours: face_colours(side, active),
            rotation_degrees: face_rotation_degrees(side),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(1800.0), "30:00");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(9.0), "0:09");
    }

    #[test]
    fn rounds_partial_seconds_up() {
        assert_eq!(format_time(599.2), "10:00");
        assert_eq!(format_time(59.01), "1:00");
        assert_eq!(format_time(0.001), "0:01");
    }

    #[test]
    fn non_positive_time_is_zero() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(-3.7), "0:00");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress(300.0, 600.0), 0.5);
        assert_eq!(progress(-1.0, 600.0), 0.0);
        assert_eq!(progress(700.0, 600.0), 1.0);
        assert_eq!(progress(10.0, 0.0), 0.0);
    }

    #[test]
    fn ring_shapes() {
        assert_eq!(ring_arc(1.0), RingArc::Full);
        assert_eq!(ring_arc(0.0), RingArc::Empty);
        assert_eq!(
            ring_arc(0.25),
            RingArc::Arc { start_degrees: 270.0, end_degrees: 0.0 }
        );
    }

    #[test]
    fn active_face_turns_red() {
        let idle = face_colours(Side::White, false);
        assert_eq!(idle.background, Rgba::WHITE);
        assert_eq!(idle.digits, Rgba::BLACK);
        assert_eq!(idle.track, Rgba::BLACK.with_alpha(0.2));

        let active = face_colours(Side::Black, true);
        assert_eq!(active.background, Rgba::BLACK);
        assert_eq!(active.digits, Rgba::RED);
        assert_eq!(active.progress, Rgba::RED);
    }

    #[test]
    fn view_from_snapshot() {
        let snapshot = ClockSnapshot {
            white_total: 600.0,
            black_total: 600.0,
            white_remaining: 450.5,
            black_remaining: 600.0,
            active_side: Side::White,
            running: true,
            expired: false,
        };

        let white = SideView::from_snapshot(&snapshot, Side::White);
        assert_eq!(white.text, "7:31");
        assert!(white.active);
        assert_eq!(white.rotation_degrees, 180.0);

        let black = SideView::from_snapshot(&snapshot, Side::Black);
        assert!(!black.active);
        assert_eq!(black.ring, RingArc::Full);
    }
}
