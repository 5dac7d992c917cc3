//! Pull-based audio sources

use crate::{Frame, ToDuration};

/// An audio source with a static frame size and a fixed sample rate
///
/// Sources own their notion of time: every call to [`Source::next`]
/// advances it by exactly one frame at [`Source::sample_rate`].
pub trait Source {
    /// The [`Frame`] type
    type Frame: Frame;
    /// Get the sample rate the source renders at
    fn sample_rate(&self) -> f64;
    /// Get the next frame
    ///
    /// Returning [`None`] indicates the source has no frames left
    fn next(&mut self) -> Option<Self::Frame>;
    /// End the source after some duration
    ///
    /// The duration is rounded to the nearest whole frame.
    fn take(self, dur: impl ToDuration) -> Take<Self>
    where
        Self: Sized,
    {
        let frames = (dur.to_duration().as_secs_f64() * self.sample_rate()).round() as u64;
        Take {
            source: self,
            frames_left: frames,
        }
    }
    /// Borrow the source, so that adaptors consume the borrow
    /// instead of the source itself
    fn by_ref(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self
    }
}

impl<S> Source for &mut S
where
    S: Source + ?Sized,
{
    type Frame = S::Frame;
    fn sample_rate(&self) -> f64 {
        (**self).sample_rate()
    }
    fn next(&mut self) -> Option<Self::Frame> {
        (**self).next()
    }
}

/// Source returned from [`Source::take`]
#[derive(Debug, Clone)]
pub struct Take<S> {
    source: S,
    frames_left: u64,
}

impl<S> Take<S> {
    /// Get the number of frames remaining
    pub fn frames_left(&self) -> u64 {
        self.frames_left
    }
}

impl<S> Source for Take<S>
where
    S: Source,
{
    type Frame = S::Frame;
    fn sample_rate(&self) -> f64 {
        self.source.sample_rate()
    }
    fn next(&mut self) -> Option<Self::Frame> {
        if self.frames_left == 0 {
            return None;
        }
        let frame = self.source.next()?;
        self.frames_left -= 1;
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Mono;

    struct Ramp {
        value: f64,
    }

    impl Source for Ramp {
        type Frame = Mono;
        fn sample_rate(&self) -> f64 {
            10.0
        }
        fn next(&mut self) -> Option<f64> {
            self.value += 1.0;
            Some(self.value)
        }
    }

    #[test]
    fn take_stops_after_whole_frames() {
        let mut source = Ramp { value: 0.0 }.take(0.5);
        assert_eq!(source.frames_left(), 5);
        let mut frames = Vec::new();
        while let Some(frame) = source.next() {
            frames.push(frame);
        }
        assert_eq!(frames, [1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
