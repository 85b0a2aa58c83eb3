//! Deterministic curve patterns

use std::f64::consts::TAU;

use rand::RngCore;
use tikus_domain::{Offset, PatternKind};

use super::PatternGenerator;

/// Traces a circle of `radius` in `steps` moves
#[derive(Debug, Clone)]
pub struct Circle {
    radius: f64,
    steps: u32,
    step: u32,
}

impl Circle {
    /// Circle starting at angle zero
    pub fn new(radius: f64, steps: u32) -> Self {
        Self { radius, steps, step: 0 }
    }

    fn point(&self, step: u32) -> (f64, f64) {
        let theta = TAU * f64::from(step) / f64::from(self.steps);
        (self.radius * theta.cos(), self.radius * theta.sin())
    }
}

impl PatternGenerator for Circle {
    fn kind(&self) -> PatternKind {
        PatternKind::Circle
    }

    fn advance(&mut self, _rng: &mut dyn RngCore) -> Offset {
        if self.steps == 0 {
            return Offset::ZERO;
        }
        let (x0, y0) = self.point(self.step);
        let (x1, y1) = self.point(self.step + 1);
        self.step = (self.step + 1) % self.steps;
        Offset::new(x1 - x0, y1 - y0)
    }
}

/// Lissajous figure-8: `x = width·sin t`, `y = height·sin 2t`
#[derive(Debug, Clone)]
pub struct Figure8 {
    width: f64,
    height: f64,
    steps: u32,
    step: u32,
}

impl Figure8 {
    /// Figure-8 starting at the crossing point
    pub fn new(width: f64, height: f64, steps: u32) -> Self {
        Self { width, height, steps, step: 0 }
    }

    fn point(&self, step: u32) -> (f64, f64) {
        let t = TAU * f64::from(step) / f64::from(self.steps);
        (self.width * t.sin(), self.height * (2.0 * t).sin())
    }
}

impl PatternGenerator for Figure8 {
    fn kind(&self) -> PatternKind {
        PatternKind::Figure8
    }

    fn advance(&mut self, _rng: &mut dyn RngCore) -> Offset {
        if self.steps == 0 {
            return Offset::ZERO;
        }
        let (x0, y0) = self.point(self.step);
        let (x1, y1) = self.point(self.step + 1);
        self.step = (self.step + 1) % self.steps;
        Offset::new(x1 - x0, y1 - y0)
    }
}

/// Sine wave with a horizontal drift
///
/// Each step drifts `amplitude·frequency` pixels sideways and follows
/// `amplitude·sin(frequency·step)` vertically. The drift reverses after every
/// full wave period so the cursor sways back and forth instead of marching
/// off screen.
#[derive(Debug, Clone)]
pub struct Smooth {
    amplitude: f64,
    frequency: f64,
    step: u64,
}

impl Smooth {
    /// Wave starting at phase zero, heading right
    pub fn new(amplitude: f64, frequency: f64) -> Self {
        Self { amplitude, frequency, step: 0 }
    }

    fn direction(&self) -> f64 {
        let periods = (self.frequency * self.step as f64 / TAU).floor();
        if periods % 2.0 == 0.0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl PatternGenerator for Smooth {
    fn kind(&self) -> PatternKind {
        PatternKind::Smooth
    }

    fn advance(&mut self, _rng: &mut dyn RngCore) -> Offset {
        if self.amplitude == 0.0 || self.frequency == 0.0 {
            return Offset::ZERO;
        }
        let phase = self.frequency * self.step as f64;
        let dx = self.amplitude * self.frequency * self.direction();
        let dy = self.amplitude * ((phase + self.frequency).sin() - phase.sin());
        self.step += 1;
        Offset::new(dx, dy)
    }
}
