//! Fixed-timestep accumulator.
//!
//! Frames arrive at whatever rate the display runs; physics runs at a fixed
//! rate. The driver turns elapsed frame time into a count of fixed steps.

/// Converts variable frame time into fixed steps.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    fixed_dt: f32,
    max_steps_per_frame: u32,
    accumulator: f32,
}

impl FrameDriver {
    /// `fixed_rate` is in steps per second.
    pub fn new(fixed_rate: u32, max_steps_per_frame: u32) -> Self {
        Self {
            fixed_dt: 1.0 / fixed_rate.max(1) as f32,
            max_steps_per_frame: max_steps_per_frame.max(1),
            accumulator: 0.0,
        }
    }

    /// Length of one fixed step in seconds.
    #[inline]
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Time carried over to the next frame.
    #[inline]
    pub fn pending_time(&self) -> f32 {
        self.accumulator
    }

    /// Add a frame's worth of time and return how many fixed steps to run.
    ///
    /// Time beyond `max_steps_per_frame` steps is dropped so a long stall
    /// cannot snowball into ever longer frames.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt && steps < self.max_steps_per_frame {
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }

        if steps == self.max_steps_per_frame && self.accumulator >= self.fixed_dt {
            log::debug!("dropping {:.3}s of simulation time after a long frame", self.accumulator);
            self.accumulator %= self.fixed_dt;
        }
        steps
    }
}
