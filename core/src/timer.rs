use crate::constants::TIMER_HZ;

const MILLIS_PER_SECOND: u32 = 1_000;

/// # Timers
/// The delay and sound timers count down toward zero at 60Hz, independently of instruction
/// execution.
///
/// Elapsed wall-clock time is accumulated in units of 1/60ms so that no fraction of a tick is
/// ever lost between calls; the number of ticks over any sequence of updates is
/// `floor(total_ms * 60 / 1000)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    accumulated: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tone should currently be audible
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }

    /// Advances both timers by the 60Hz ticks that fit in the accumulated time.
    ///
    /// `speaker` is told to sound on every tick that leaves the sound timer running and to
    /// stop on the tick that brings it to zero.
    ///
    /// # Arguments
    /// * `delta_ms` milliseconds elapsed since the previous update
    /// * `speaker` receives the tone enable signal
    ///
    /// Returns the number of ticks that elapsed.
    pub fn update(&mut self, delta_ms: u32, speaker: &mut dyn FnMut(bool)) -> u32 {
        self.accumulated = self.accumulated.saturating_add(delta_ms.saturating_mul(TIMER_HZ));
        let mut ticks = 0;
        while self.accumulated >= MILLIS_PER_SECOND {
            self.accumulated -= MILLIS_PER_SECOND;
            self.tick(speaker);
            ticks += 1;
        }
        ticks
    }

    fn tick(&mut self, speaker: &mut dyn FnMut(bool)) {
        if self.delay > 0 {
            self.delay -= 1;
        }
        if self.sound > 0 {
            self.sound -= 1;
            speaker(self.sound_active());
        }
    }
}
