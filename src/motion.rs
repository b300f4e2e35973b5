//! Frame-stepped card animations: the timed fling that carries a committed
//! card off screen, and the spring that returns a cancelled one.

use crate::config::{
    FRAME_MS, SPRING_DAMPING, SPRING_MASS, SPRING_REST_DISPLACEMENT, SPRING_REST_SPEED, SPRING_STIFFNESS,
};
use crate::gesture::Offset;

const SPRING_SUBSTEP_MS: f64 = 1.0;

/// Milliseconds between two clock readings, falling back to one nominal
/// frame when either reading is missing.
pub fn frame_delta(last: Option<f64>, now: Option<f64>) -> f64 {
    match (last, now) {
        (Some(last), Some(now)) => (now - last).max(0.0),
        _ => FRAME_MS,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub offset: Offset,
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    Timing(Timing),
    Spring(Spring),
}

impl Motion {
    pub fn step(&mut self, dt_ms: f64) -> Frame {
        match self {
            Motion::Timing(timing) => timing.step(dt_ms),
            Motion::Spring(spring) => spring.step(dt_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    from: Offset,
    to: Offset,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl Timing {
    pub fn new(from: Offset, to: Offset, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
        }
    }

    pub fn step(&mut self, dt_ms: f64) -> Frame {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms);
        let finished = self.elapsed_ms >= self.duration_ms;
        let progress = if self.duration_ms == 0.0 {
            1.0
        } else {
            ease_in_out(self.elapsed_ms / self.duration_ms)
        };
        let offset = Offset::new(
            self.from.x + (self.to.x - self.from.x) * progress,
            self.from.y + (self.to.y - self.from.y) * progress,
        );
        Frame { offset, finished }
    }
}

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Damped harmonic oscillator pulling the offset toward `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: Offset,
    velocity: Offset,
    target: Offset,
}

impl Spring {
    pub fn new(from: Offset, target: Offset) -> Self {
        Self {
            position: from,
            velocity: Offset::ORIGIN,
            target,
        }
    }

    pub fn step(&mut self, dt_ms: f64) -> Frame {
        let mut remaining = dt_ms.max(0.0);
        while remaining > 0.0 && !self.is_at_rest() {
            let dt = remaining.min(SPRING_SUBSTEP_MS) / 1000.0;
            remaining -= SPRING_SUBSTEP_MS;
            self.velocity.x += axis_acceleration(self.position.x, self.velocity.x, self.target.x) * dt;
            self.velocity.y += axis_acceleration(self.position.y, self.velocity.y, self.target.y) * dt;
            self.position.x += self.velocity.x * dt;
            self.position.y += self.velocity.y * dt;
        }

        let finished = self.is_at_rest();
        if finished {
            self.position = self.target;
            self.velocity = Offset::ORIGIN;
        }
        Frame {
            offset: self.position,
            finished,
        }
    }

    fn is_at_rest(&self) -> bool {
        let displacement = Offset::new(
            self.position.x - self.target.x,
            self.position.y - self.target.y,
        );
        displacement.x.abs() <= SPRING_REST_DISPLACEMENT
            && displacement.y.abs() <= SPRING_REST_DISPLACEMENT
            && self.velocity.x.abs() <= SPRING_REST_SPEED
            && self.velocity.y.abs() <= SPRING_REST_SPEED
    }
}

fn axis_acceleration(position: f64, velocity: f64, target: f64) -> f64 {
    let spring = -SPRING_STIFFNESS * (position - target);
    let damper = -SPRING_DAMPING * velocity;
    (spring + damper) / SPRING_MASS
}
