/// The absolute time, in seconds, at which synthesis starts
///
/// Starting past zero keeps every drop mid-cycle on the first frame.
pub const EPOCH: f64 = 2.0;

/// The absolute time of the next frame to be rendered
///
/// The clock only ever moves forward, one frame at a time. It is never
/// reset or wrapped; each drop's period provides the only repetition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisClock {
    time: f64,
    sample_rate: f64,
}

impl SynthesisClock {
    /// Create a clock starting at [`EPOCH`]
    pub fn new(sample_rate: u32) -> Self {
        Self::starting_at(EPOCH, sample_rate)
    }
    /// Create a clock starting at the given time
    pub fn starting_at(time: f64, sample_rate: u32) -> Self {
        SynthesisClock {
            time,
            sample_rate: sample_rate as f64,
        }
    }
    /// Get the current absolute time
    pub fn now(&self) -> f64 {
        self.time
    }
    /// Get the sample rate the clock advances at
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
    /// Move forward by one frame
    pub fn advance(&mut self) {
        self.time += 1.0 / self.sample_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_one_frame_at_a_time() {
        let mut clock = SynthesisClock::new(22050);
        assert_eq!(clock.now(), EPOCH);
        clock.advance();
        assert_eq!(clock.now(), EPOCH + 1.0 / 22050.0);
        for _ in 1..22050 {
            clock.advance();
        }
        assert!((clock.now() - (EPOCH + 1.0)).abs() < 1e-9);
    }
}
