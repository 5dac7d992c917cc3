use crate::{
    acoustics::Ear,
    geometry::{Cached, Geometry},
    source::Source,
    DropField, Frame, Stereo, SynthesisClock,
};

/// A rain soundscape renderer
///
/// `Rain` owns its drop field and its clock. Every rendered frame sums the
/// impact of every drop at each ear, scales the sums by the volume, and
/// advances the clock by one frame. The output is neither normalized nor
/// clipped, so many overlapping impacts may exceed `[-1, 1]`.
///
/// Rendering never allocates or locks, so it is safe to call from a
/// real-time audio callback.
#[derive(Debug, Clone)]
pub struct Rain<G = Cached> {
    field: DropField,
    clock: SynthesisClock,
    volume: f64,
    sample_rate: u32,
    geometry: G,
}

impl Rain {
    /// Create a new renderer that uses each drop's precomputed geometry
    pub fn new(field: DropField, volume: f64, sample_rate: u32) -> Self {
        Self::with_geometry(field, volume, sample_rate, Cached)
    }
}

impl<G> Rain<G>
where
    G: Geometry,
{
    /// Create a new renderer with the given geometry strategy
    pub fn with_geometry(field: DropField, volume: f64, sample_rate: u32, geometry: G) -> Self {
        Rain {
            field,
            clock: SynthesisClock::new(sample_rate),
            volume,
            sample_rate,
            geometry,
        }
    }
    /// Replace the clock, for example to start at a different time
    pub fn with_clock(self, clock: SynthesisClock) -> Self {
        Rain { clock, ..self }
    }
    /// Get the drop field
    pub fn field(&self) -> &DropField {
        &self.field
    }
    /// Get the master volume
    pub fn volume(&self) -> f64 {
        self.volume
    }
    /// Get the clock
    pub fn clock(&self) -> &SynthesisClock {
        &self.clock
    }
    /// Get the absolute time of the next frame
    pub fn time(&self) -> f64 {
        self.clock.now()
    }
    /// Get the frame at the current time without advancing
    pub fn frame(&self) -> Stereo {
        let time = self.clock.now();
        let mut sum = Stereo::uniform(0.0);
        for drop in &self.field {
            for ear in Ear::BOTH {
                sum[ear.channel()] += self.geometry.sample(drop, ear, time);
            }
        }
        Frame::map(sum, |s| s * self.volume)
    }
    /// Get the frame at the current time and advance by one frame
    pub fn next_frame(&mut self) -> Stereo {
        let frame = self.frame();
        self.clock.advance();
        frame
    }
    /// Fill an interleaved stereo buffer
    ///
    /// The buffer holds `buffer.len() / 2` frames, left sample first.
    /// A trailing half frame is silenced and does not advance the clock.
    pub fn render(&mut self, buffer: &mut [f32]) {
        self.render_channels(buffer, Stereo::CHANNELS);
    }
    /// Fill an interleaved buffer with the given number of channels
    ///
    /// Mono buffers receive the average of both ears, and channels
    /// beyond the second are silenced.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is zero.
    pub fn render_channels(&mut self, buffer: &mut [f32], channels: usize) {
        let mut frames = buffer.chunks_exact_mut(channels);
        for slice in &mut frames {
            self.next_frame().write_slice(slice);
        }
        frames.into_remainder().fill(0.0);
    }
}

impl<G> Source for Rain<G>
where
    G: Geometry,
{
    type Frame = Stereo;
    fn sample_rate(&self) -> f64 {
        self.sample_rate as f64
    }
    fn next(&mut self) -> Option<Self::Frame> {
        Some(self.next_frame())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direct, FieldParams, Raindrop};

    use super::*;

    fn field() -> DropField {
        DropField::random(12, &FieldParams::default(), Some(5)).unwrap()
    }

    #[test]
    fn empty_field_is_silent() {
        let mut rain = Rain::new(DropField::default(), 1.0, 22050);
        let mut buffer = [1.0f32; 64];
        rain.render(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn volume_scales_output() {
        let mut quiet = Rain::new(field(), 0.25, 22050);
        let mut loud = Rain::new(field(), 1.0, 22050);
        for _ in 0..2000 {
            let [ql, qr] = quiet.next_frame();
            let [ll, lr] = loud.next_frame();
            assert!((ql * 4.0 - ll).abs() <= 1e-12 + 1e-9 * ll.abs());
            assert!((qr * 4.0 - lr).abs() <= 1e-12 + 1e-9 * lr.abs());
        }
    }

    #[test]
    fn direct_and_cached_render_alike() {
        let mut cached = Rain::new(field(), 0.35, 44100);
        let mut direct = Rain::with_geometry(field(), 0.35, 44100, Direct);
        let mut a = vec![0.0f32; 4096];
        let mut b = vec![0.0f32; 4096];
        cached.render(&mut a);
        direct.render(&mut b);
        for (a, b) in a.iter().zip(&b) {
            assert!((a - b).abs() <= 1e-6 * a.abs().max(1e-6), "{a} vs {b}");
        }
        assert_eq!(cached.time(), direct.time());
    }

    #[test]
    fn odd_buffer_silences_trailing_sample() {
        let drop = Raindrop::new(0.0, 40.0, 1.0, 2.0).unwrap();
        let field = DropField::from_drops(vec![drop]);
        let clock = SynthesisClock::starting_at(0.2, 8000);
        let mut rain = Rain::new(field, 1.0, 8000).with_clock(clock);
        let mut buffer = [7.0f32; 5];
        rain.render(&mut buffer);
        assert_eq!(buffer[4], 0.0);
        assert_eq!(rain.time(), 0.2 + 1.0 / 8000.0 + 1.0 / 8000.0);
    }

    #[test]
    fn extra_channels_are_silent() {
        let mut stereo = Rain::new(field(), 0.5, 22050);
        let mut quad = Rain::new(field(), 0.5, 22050);
        let mut a = [0.0f32; 256];
        let mut b = [1.0f32; 512];
        stereo.render(&mut a);
        quad.render_channels(&mut b, 4);
        for (two, four) in a.chunks(2).zip(b.chunks(4)) {
            assert_eq!(two, &four[..2]);
            assert_eq!(&four[2..], [0.0, 0.0]);
        }
    }
}
