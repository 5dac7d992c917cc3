//! Render rain to wave files

use std::io::{Seek, Write};

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::{Frame, Geometry, Rain, Source, ToDuration};

pub use hound::Error as WaveError;

/// Write a source to a 32-bit float WAV file at the source's sample rate
///
/// Returns the number of frames written.
pub fn write_source<W, S>(writer: W, mut source: S) -> Result<u64, WaveError>
where
    W: Write + Seek,
    S: Source,
{
    let spec = WavSpec {
        channels: <S::Frame as Frame>::CHANNELS as u16,
        sample_rate: source.sample_rate().round() as u32,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::new(writer, spec)?;
    let mut frames = 0;
    while let Some(frame) = source.next() {
        for i in 0..<S::Frame as Frame>::CHANNELS {
            writer.write_sample(frame.get_channel(i) as f32)?;
        }
        frames += 1;
    }
    writer.finalize()?;
    Ok(frames)
}

/// Render some duration of rain into a WAV file
///
/// The rain's clock continues from wherever it was, so successive
/// calls write successive stretches of the same soundscape.
pub fn write_rain<W, G>(
    writer: W,
    rain: &mut Rain<G>,
    dur: impl ToDuration,
) -> Result<u64, WaveError>
where
    W: Write + Seek,
    G: Geometry,
{
    write_source(writer, rain.by_ref().take(dur))
}
