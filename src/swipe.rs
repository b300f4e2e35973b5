use crate::config::{FLING_DURATION_MS, FLING_OVERSHOOT_PX, SWIPE_THRESHOLD_FRACTION, TAP_SLOP_PX};
use crate::gesture::{self, GestureTracker, Offset};
use crate::model::Direction;
use crate::motion::{Motion, Spring, Timing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Commit(Direction),
    Cancel,
}

/// Classifies a released drag. Only travel strictly beyond the threshold
/// commits.
pub fn decide(dx: f64, screen_width: f64) -> SwipeOutcome {
    let threshold = screen_width * SWIPE_THRESHOLD_FRACTION;
    if dx > threshold {
        SwipeOutcome::Commit(Direction::Right)
    } else if dx < -threshold {
        SwipeOutcome::Commit(Direction::Left)
    } else {
        SwipeOutcome::Cancel
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub outcome: SwipeOutcome,
    pub travel: f64,
}

impl Release {
    /// A press that barely moved, treated as a tap on the card.
    pub fn is_tap(&self) -> bool {
        self.outcome == SwipeOutcome::Cancel && self.travel < TAP_SLOP_PX
    }
}

#[derive(Debug, Clone)]
struct ActiveMotion {
    motion: Motion,
    commit: Option<Direction>,
}

/// Drag tracking plus the release decision and the animation that follows it.
/// A committed direction is reported by [`SwipeEngine::tick`] once the card
/// has left the screen.
#[derive(Debug, Clone)]
pub struct SwipeEngine {
    screen_width: f64,
    tracker: GestureTracker,
    active: Option<ActiveMotion>,
}

impl SwipeEngine {
    pub fn new(screen_width: f64) -> Self {
        Self {
            screen_width,
            tracker: GestureTracker::new(),
            active: None,
        }
    }

    pub fn screen_width(&self) -> f64 {
        self.screen_width
    }

    pub fn set_screen_width(&mut self, screen_width: f64) {
        self.screen_width = screen_width;
    }

    pub fn threshold(&self) -> f64 {
        self.screen_width * SWIPE_THRESHOLD_FRACTION
    }

    /// Starts a drag. Refused while another pointer is dragging or a
    /// committed card is still flying out; a running spring-back is abandoned.
    pub fn press(&mut self, pointer_id: i32, x: f64, y: f64) -> bool {
        if self.is_dragging() || self.is_flinging() {
            return false;
        }
        self.active = None;
        self.tracker.begin(pointer_id, x, y);
        true
    }

    pub fn drag(&mut self, pointer_id: i32, x: f64, y: f64) -> Option<Offset> {
        self.tracker.update(pointer_id, x, y)
    }

    pub fn release(&mut self, pointer_id: i32) -> Option<Release> {
        let offset = self.tracker.end(pointer_id)?;
        let outcome = decide(offset.x, self.screen_width);
        match outcome {
            SwipeOutcome::Commit(direction) => self.fling(direction),
            SwipeOutcome::Cancel => self.spring_back(),
        }
        Some(Release {
            outcome,
            travel: offset.distance(),
        })
    }

    /// Pointer cancellation mid-drag: same as releasing short of the threshold.
    pub fn interrupt(&mut self, pointer_id: i32) -> bool {
        if self.tracker.end(pointer_id).is_none() {
            return false;
        }
        self.spring_back();
        true
    }

    /// Advances the running animation. Returns the committed direction on
    /// the frame the fling completes, with the offset already back at origin.
    pub fn tick(&mut self, dt_ms: f64) -> Option<Direction> {
        let active = self.active.as_mut()?;
        let frame = active.motion.step(dt_ms);
        self.tracker.set_offset(frame.offset);
        if !frame.finished {
            return None;
        }

        let commit = self.active.take().and_then(|done| done.commit);
        if commit.is_some() {
            self.tracker.set_offset(Offset::ORIGIN);
        }
        commit
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_tracking()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_flinging(&self) -> bool {
        matches!(&self.active, Some(active) if active.commit.is_some())
    }

    /// Whether the card is held or on its way out, so the deck must not be
    /// advanced from elsewhere.
    pub fn is_busy(&self) -> bool {
        self.is_dragging() || self.is_flinging()
    }

    pub fn offset(&self) -> Offset {
        self.tracker.offset()
    }

    pub fn rotation_deg(&self) -> f64 {
        gesture::rotation_deg(self.offset().x, self.screen_width)
    }

    pub fn bid_badge_opacity(&self) -> f64 {
        gesture::bid_badge_opacity(self.offset().x, self.screen_width)
    }

    pub fn pass_badge_opacity(&self) -> f64 {
        gesture::pass_badge_opacity(self.offset().x, self.screen_width)
    }

    fn fling(&mut self, direction: Direction) {
        let distance = self.screen_width + FLING_OVERSHOOT_PX;
        let x = match direction {
            Direction::Right => distance,
            Direction::Left => -distance,
        };
        self.active = Some(ActiveMotion {
            motion: Motion::Timing(Timing::new(
                self.offset(),
                Offset::new(x, 0.0),
                FLING_DURATION_MS,
            )),
            commit: Some(direction),
        });
    }

    fn spring_back(&mut self) {
        self.active = Some(ActiveMotion {
            motion: Motion::Spring(Spring::new(self.offset(), Offset::ORIGIN)),
            commit: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f64 = 400.0;

    fn drag_to(engine: &mut SwipeEngine, dx: f64) -> Release {
        assert!(engine.press(1, 200.0, 300.0));
        engine.drag(1, 200.0 + dx / 2.0, 301.0);
        engine.drag(1, 200.0 + dx, 302.0);
        engine.release(1).unwrap()
    }

    fn run_to_rest(engine: &mut SwipeEngine) -> Vec<Direction> {
        let mut reported = Vec::new();
        let mut frames = 0;
        while engine.is_animating() {
            if let Some(direction) = engine.tick(16.0) {
                reported.push(direction);
            }
            frames += 1;
            assert!(frames < 500, "animation never finished");
        }
        reported
    }

    #[test]
    fn decision_threshold_is_exclusive() {
        assert_eq!(decide(100.0, WIDTH), SwipeOutcome::Cancel);
        assert_eq!(decide(-100.0, WIDTH), SwipeOutcome::Cancel);
        assert_eq!(decide(100.5, WIDTH), SwipeOutcome::Commit(Direction::Right));
        assert_eq!(decide(-100.5, WIDTH), SwipeOutcome::Commit(Direction::Left));
    }

    #[test]
    fn short_drags_cancel_and_spring_home() {
        for dx in [-100.0, -60.0, -1.0, 0.0, 35.0, 100.0] {
            let mut engine = SwipeEngine::new(WIDTH);
            let release = drag_to(&mut engine, dx);
            assert_eq!(release.outcome, SwipeOutcome::Cancel);
            assert!(run_to_rest(&mut engine).is_empty());
            assert_eq!(engine.offset(), Offset::ORIGIN);
        }
    }

    #[test]
    fn commit_flings_off_screen_then_reports_once() {
        let mut engine = SwipeEngine::new(WIDTH);
        let release = drag_to(&mut engine, 150.0);
        assert_eq!(release.outcome, SwipeOutcome::Commit(Direction::Right));
        assert!(engine.is_flinging());

        let mut max_x: f64 = 0.0;
        let mut reported = Vec::new();
        while engine.is_animating() {
            if let Some(direction) = engine.tick(16.0) {
                reported.push(direction);
            } else {
                max_x = max_x.max(engine.offset().x);
            }
        }

        assert_eq!(reported, vec![Direction::Right]);
        assert!(max_x > WIDTH);
        assert_eq!(engine.offset(), Offset::ORIGIN);
        assert_eq!(engine.tick(16.0), None);
    }

    #[test]
    fn left_commit_reports_left() {
        let mut engine = SwipeEngine::new(WIDTH);
        drag_to(&mut engine, -180.0);
        assert_eq!(run_to_rest(&mut engine), vec![Direction::Left]);
    }

    #[test]
    fn interruption_behaves_like_cancel() {
        let mut engine = SwipeEngine::new(WIDTH);
        engine.press(4, 0.0, 0.0);
        engine.drag(4, 300.0, 0.0);
        assert!(engine.interrupt(4));
        assert!(run_to_rest(&mut engine).is_empty());
        assert_eq!(engine.offset(), Offset::ORIGIN);
    }

    #[test]
    fn no_new_drag_while_flinging() {
        let mut engine = SwipeEngine::new(WIDTH);
        drag_to(&mut engine, 200.0);
        assert!(!engine.press(2, 0.0, 0.0));
        engine.tick(16.0);
        assert!(engine.is_flinging());
    }

    #[test]
    fn second_pointer_cannot_steal_an_active_drag() {
        let mut engine = SwipeEngine::new(WIDTH);
        assert!(engine.press(1, 0.0, 0.0));
        engine.drag(1, 250.0, 0.0);
        assert!(engine.is_busy());

        assert!(!engine.press(2, 50.0, 50.0));
        assert_eq!(engine.offset(), Offset::new(250.0, 0.0));
        assert_eq!(engine.drag(2, 10.0, 0.0), None);

        let release = engine.release(1).unwrap();
        assert_eq!(release.outcome, SwipeOutcome::Commit(Direction::Right));
        assert_eq!(run_to_rest(&mut engine), vec![Direction::Right]);
        assert!(!engine.is_busy());
    }

    #[test]
    fn press_during_spring_back_takes_over() {
        let mut engine = SwipeEngine::new(WIDTH);
        drag_to(&mut engine, 60.0);
        engine.tick(16.0);
        assert!(engine.press(2, 10.0, 10.0));
        assert!(!engine.is_animating());
        assert_eq!(engine.offset(), Offset::ORIGIN);
    }

    #[test]
    fn tiny_release_counts_as_tap() {
        let mut engine = SwipeEngine::new(WIDTH);
        assert!(drag_to(&mut engine, 2.0).is_tap());
        let mut engine = SwipeEngine::new(WIDTH);
        assert!(!drag_to(&mut engine, 40.0).is_tap());
    }

    #[test]
    fn derived_visuals_follow_the_drag() {
        let mut engine = SwipeEngine::new(WIDTH);
        engine.press(1, 0.0, 0.0);
        engine.drag(1, 200.0, 0.0);
        assert_eq!(engine.rotation_deg(), 10.0);
        assert_eq!(engine.bid_badge_opacity(), 1.0);
        assert_eq!(engine.pass_badge_opacity(), 0.0);
    }
}
