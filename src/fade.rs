//! Linear background-color interpolation over the course of one infusion.
//!
//! Channel values are accumulated as `f32` so per-tick rounding does not
//! drift over long infusions; the integer color is derived on demand.

use crate::theme::Rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundFade {
    start: Rgb,
    /// Per-tick channel decrements, `(start - end) / duration`.
    deltas: [f32; 3],
    /// Precise current channel values.
    channels: [f32; 3],
}

impl BackgroundFade {
    /// A fade at rest: the background sits on the start color and `step`
    /// has no effect until `arm` is called.
    pub fn new(start: Rgb) -> Self {
        Self {
            start,
            deltas: [0.0; 3],
            channels: [start.r as f32, start.g as f32, start.b as f32],
        }
    }

    /// Prepare a fade from the start color to `end` over `duration` ticks.
    /// A zero duration produces an inert fade.
    pub fn arm(&mut self, end: Rgb, duration: u32) {
        self.channels = [self.start.r as f32, self.start.g as f32, self.start.b as f32];
        if duration == 0 {
            self.deltas = [0.0; 3];
            return;
        }
        let d = duration as f32;
        self.deltas = [
            (self.start.r as f32 - end.r as f32) / d,
            (self.start.g as f32 - end.g as f32) / d,
            (self.start.b as f32 - end.b as f32) / d,
        ];
    }

    /// Advance the fade by one countdown tick.
    pub fn step(&mut self) {
        for (channel, delta) in self.channels.iter_mut().zip(self.deltas) {
            *channel -= delta;
        }
    }

    /// Restore the start color and disarm.
    pub fn reset(&mut self) {
        self.deltas = [0.0; 3];
        self.channels = [self.start.r as f32, self.start.g as f32, self.start.b as f32];
    }

    /// Current color, rounded to integer channels.
    pub fn color(&self) -> Rgb {
        Rgb::new(
            self.channels[0].round().clamp(0.0, 255.0) as u8,
            self.channels[1].round().clamp(0.0, 255.0) as u8,
            self.channels[2].round().clamp(0.0, 255.0) as u8,
        )
    }
}
