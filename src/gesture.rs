use crate::config::MAX_ROTATION_DEG;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ORIGIN: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn distance(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DragState {
    pointer_id: i32,
    start_x: f64,
    start_y: f64,
}

/// Follows one pointer from press to release and publishes its cumulative
/// displacement as the card offset.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    drag: Option<DragState>,
    offset: Offset,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, pointer_id: i32, x: f64, y: f64) {
        self.drag = Some(DragState {
            pointer_id,
            start_x: x,
            start_y: y,
        });
        self.offset = Offset::ORIGIN;
    }

    /// Returns the new offset, or `None` when the move does not belong to the
    /// active drag.
    pub fn update(&mut self, pointer_id: i32, x: f64, y: f64) -> Option<Offset> {
        let drag = self.drag.as_ref()?;
        if drag.pointer_id != pointer_id {
            return None;
        }
        self.offset = Offset::new(x - drag.start_x, y - drag.start_y);
        Some(self.offset)
    }

    /// Ends the cycle and hands back the final displacement.
    pub fn end(&mut self, pointer_id: i32) -> Option<Offset> {
        match &self.drag {
            Some(drag) if drag.pointer_id == pointer_id => {
                self.drag = None;
                Some(self.offset)
            }
            _ => None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.drag.is_some()
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
    }
}

/// Linear map of `value` from `[in_start, in_end]` onto `[out_start, out_end]`,
/// clamped to the output range.
pub fn interpolate(value: f64, in_start: f64, in_end: f64, out_start: f64, out_end: f64) -> f64 {
    let span = in_end - in_start;
    if span == 0.0 {
        return out_start;
    }
    let t = ((value - in_start) / span).clamp(0.0, 1.0);
    out_start + t * (out_end - out_start)
}

pub fn rotation_deg(dx: f64, screen_width: f64) -> f64 {
    let half = screen_width / 2.0;
    interpolate(dx, -half, half, -MAX_ROTATION_DEG, MAX_ROTATION_DEG)
}

pub fn bid_badge_opacity(dx: f64, screen_width: f64) -> f64 {
    interpolate(dx, 0.0, screen_width / 4.0, 0.0, 1.0)
}

pub fn pass_badge_opacity(dx: f64, screen_width: f64) -> f64 {
    interpolate(dx, -screen_width / 4.0, 0.0, 1.0, 0.0)
}
