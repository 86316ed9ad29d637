//! Eased yaw rotation as a cancellable, non-reentrant per-module task.
//!
//! The registry steps every in-flight task once per frame with the frame
//! delta; tests step them by hand for deterministic results.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bevy::prelude::*;

/// Shared flag that stops a rotation task at its next step.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of advancing a rotation task by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationStep {
    Running(Quat),
    Finished(Quat),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct RotationTask {
    from: Quat,
    to: Quat,
    elapsed: f32,
    duration: f32,
    token: CancelToken,
}

impl RotationTask {
    /// Rotate `from` by `degrees` about +Y over `duration` seconds.
    pub fn new(from: Quat, degrees: f32, duration: f32) -> Self {
        Self {
            from,
            to: Quat::from_rotation_y(degrees.to_radians()) * from,
            elapsed: 0.0,
            duration: duration.max(0.0),
            token: CancelToken::new(),
        }
    }

    pub fn target(&self) -> Quat {
        self.to
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn step(&mut self, dt: f32) -> RotationStep {
        if self.token.is_cancelled() {
            return RotationStep::Cancelled;
        }
        self.elapsed += dt.max(0.0);
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return RotationStep::Finished(self.to);
        }
        let t = self.elapsed / self.duration;
        RotationStep::Running(self.from.slerp(self.to, smoothstep(t)))
    }
}

/// Ease-in/ease-out curve on [0, 1].
fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
