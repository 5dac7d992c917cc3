/// Mono [`Frame`] type
pub type Mono = f64;
/// Stereo [`Frame`] type, left channel first
pub type Stereo = [f64; 2];

/// A single multi-channel frame of rendered audio
pub trait Frame: Clone {
    /// The number of audio channels
    const CHANNELS: usize;
    /// Create a frame with a uniform amplitude across all channels
    fn uniform(amplitude: f64) -> Self;
    /// Get the amplitude of a channel
    fn get_channel(&self, index: usize) -> f64;
    /// Apply a function to each channel
    fn map(self, f: impl Fn(f64) -> f64) -> Self;
    /// Get the average amplitude
    fn avg(&self) -> f64 {
        (0..Self::CHANNELS)
            .map(|i| self.get_channel(i))
            .sum::<f64>()
            / Self::CHANNELS as f64
    }
    /// Write the frame to a device channel slice
    ///
    /// The channel counts of the frame and slice need not match.
    /// A mono slice receives the average, and slice channels beyond
    /// the frame's channel count are silenced.
    fn write_slice(&self, slice: &mut [f32]) {
        match (Self::CHANNELS, slice.len()) {
            (1, _) => slice.fill(self.get_channel(0) as f32),
            (_, 1) => slice[0] = self.avg() as f32,
            (a, b) => {
                for (i, sample) in slice.iter_mut().enumerate().take(a.min(b)) {
                    *sample = self.get_channel(i) as f32;
                }
                if b > a {
                    slice[a..].fill(0.0);
                }
            }
        }
    }
}

impl Frame for f64 {
    const CHANNELS: usize = 1;
    fn uniform(amplitude: f64) -> Self {
        amplitude
    }
    fn get_channel(&self, _index: usize) -> f64 {
        *self
    }
    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        f(self)
    }
    fn avg(&self) -> f64 {
        *self
    }
}

impl<const N: usize> Frame for [f64; N] {
    const CHANNELS: usize = N;
    fn uniform(amplitude: f64) -> Self {
        [amplitude; N]
    }
    fn get_channel(&self, index: usize) -> f64 {
        self[index]
    }
    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        self.map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_into_wider_slice_silences_extra_channels() {
        let mut slice = [9.0f32; 4];
        [0.5, -0.25].write_slice(&mut slice);
        assert_eq!(slice, [0.5, -0.25, 0.0, 0.0]);
    }

    #[test]
    fn stereo_into_mono_slice_averages() {
        let mut slice = [9.0f32; 1];
        [0.5, -0.25].write_slice(&mut slice);
        assert_eq!(slice, [0.125]);
    }
}
