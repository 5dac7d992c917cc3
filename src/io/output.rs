use std::{sync::Arc, thread};

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, Device, FromSample, OutputCallbackInfo, Sample, SampleFormat, SampleRate,
    SizedSample, Stream, StreamConfig, StreamError, SupportedStreamConfig,
};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::{OutputError, OutputResult};
use crate::{Cached, Frame, Geometry, Rain, RainConfig, Stereo, ToDuration};

/// Get the default output device
pub fn default_output_device() -> Option<Device> {
    cpal::default_host().default_output_device()
}

/**
A builder for opening a [`RainOutput`]
*/
#[derive(Default)]
pub struct OutputBuilder {
    /// The device to use. If not set, the default device will be used.
    pub device: Option<Device>,
    /// The sample rate to request. If not set, the config's sample rate will be used.
    pub sample_rate: Option<u32>,
    /// The number of frames per callback to request. If not set, the device decides.
    pub buffer_size: Option<u32>,
}

impl OutputBuilder {
    /// Initialize a builder with the default output device
    pub fn default_output() -> Self {
        OutputBuilder {
            device: default_output_device(),
            ..Default::default()
        }
    }
    /// Set the output device
    pub fn device(self, device: Device) -> Self {
        OutputBuilder {
            device: Some(device),
            ..self
        }
    }
    /// Set the sample rate to request
    pub fn sample_rate(self, sample_rate: u32) -> Self {
        OutputBuilder {
            sample_rate: Some(sample_rate),
            ..self
        }
    }
    /// Set the number of frames per callback to request
    pub fn buffer_size(self, frames: u32) -> Self {
        OutputBuilder {
            buffer_size: Some(frames),
            ..self
        }
    }
    /// Generate rain from the config and open a paused output stream for it
    pub fn build(self, config: &RainConfig) -> OutputResult<RainOutput> {
        self.build_with(config, Cached)
    }
    /// Generate rain from the config with the given geometry strategy
    /// and open a paused output stream for it
    pub fn build_with<G>(self, config: &RainConfig, geometry: G) -> OutputResult<RainOutput>
    where
        G: Geometry + Send + 'static,
    {
        let device = match self.device {
            Some(device) => device,
            None => default_output_device().ok_or(OutputError::NoDevice)?,
        };
        let requested = self.sample_rate.unwrap_or(config.sample_rate);
        let supported = negotiate(&device, requested)?;
        let rain = config.build_with(supported.sample_rate().0, geometry)?;
        info!(
            drops = rain.field().len(),
            volume = rain.volume(),
            "generated drop field"
        );
        RainOutput::open(&device, supported, self.buffer_size, rain)
    }
}

/// Check if rain can be rendered to a device sample format
fn renderable(format: SampleFormat) -> bool {
    matches!(
        format,
        SampleFormat::F32
            | SampleFormat::F64
            | SampleFormat::I16
            | SampleFormat::I32
            | SampleFormat::U16
    )
}

/// Pick a renderable stereo stream configuration at the requested
/// sample rate, preferring `f32` samples, or fall back to the device default
fn negotiate(device: &Device, sample_rate: u32) -> OutputResult<SupportedStreamConfig> {
    let rate = SampleRate(sample_rate);
    let stereo = device
        .supported_output_configs()?
        .filter(|range| {
            range.channels() as usize == Stereo::CHANNELS
                && renderable(range.sample_format())
                && range.min_sample_rate() <= rate
                && rate <= range.max_sample_rate()
        })
        .max_by_key(|range| range.sample_format() == SampleFormat::F32);
    if let Some(range) = stereo {
        return Ok(range.with_sample_rate(rate));
    }
    let fallback = device.default_output_config()?;
    warn!(
        requested = sample_rate,
        channels = fallback.channels(),
        sample_rate = fallback.sample_rate().0,
        "no stereo configuration at the requested rate, using device default"
    );
    Ok(fallback)
}

/// Rain playing on an output device
///
/// The stream starts paused. The [`Rain`] renderer lives inside the
/// stream's callback, which is its only owner.
/// Dropping the output closes the stream.
pub struct RainOutput {
    stream: Stream,
    sample_rate: u32,
    channels: u16,
    stream_error: Arc<Mutex<Option<StreamError>>>,
}

impl RainOutput {
    /// Generate rain from the config and open it on the default output device
    pub fn with_default_device(config: &RainConfig) -> OutputResult<Self> {
        OutputBuilder::default_output().build(config)
    }
    fn open<G>(
        device: &Device,
        supported: SupportedStreamConfig,
        buffer_size: Option<u32>,
        mut rain: Rain<G>,
    ) -> OutputResult<Self>
    where
        G: Geometry + Send + 'static,
    {
        let sample_format = supported.sample_format();
        let mut config: StreamConfig = supported.into();
        if let Some(frames) = buffer_size {
            config.buffer_size = BufferSize::Fixed(frames);
        }
        let channels = config.channels as usize;
        debug!(
            ?sample_format,
            channels,
            sample_rate = config.sample_rate.0,
            buffer_size = ?config.buffer_size,
            "opening output stream"
        );
        let stream_error = Arc::new(Mutex::new(None));
        let error_slot = Arc::clone(&stream_error);
        let err_fn = move |err: StreamError| {
            error!("an error occurred on the rain output stream: {err}");
            *error_slot.lock() = Some(err);
        };
        macro_rules! output_stream {
            ($sample:ty) => {
                device.build_output_stream(
                    &config,
                    move |data: &mut [$sample], _: &OutputCallbackInfo| {
                        write_frames(&mut rain, data, channels)
                    },
                    err_fn,
                    None,
                )
            };
        }
        let stream = match sample_format {
            SampleFormat::F32 => device.build_output_stream(
                &config,
                move |data: &mut [f32], _: &OutputCallbackInfo| {
                    rain.render_channels(data, channels)
                },
                err_fn,
                None,
            ),
            SampleFormat::F64 => output_stream!(f64),
            SampleFormat::I16 => output_stream!(i16),
            SampleFormat::I32 => output_stream!(i32),
            SampleFormat::U16 => output_stream!(u16),
            format => return Err(OutputError::UnsupportedSampleFormat(format)),
        }?;
        info!(sample_rate = config.sample_rate.0, channels, "output stream open");
        Ok(RainOutput {
            stream,
            sample_rate: config.sample_rate.0,
            channels: config.channels,
            stream_error,
        })
    }
    /// Get the sample rate the stream was opened at
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
    /// Get the number of device channels
    pub fn channels(&self) -> u16 {
        self.channels
    }
    /// Start or resume playback without blocking the thread
    pub fn play(&self) -> OutputResult<()> {
        self.stream.play()?;
        info!("rain started");
        Ok(())
    }
    /// Pause playback
    ///
    /// The pause takes effect once the callback that is currently
    /// rendering, if any, has returned.
    pub fn pause(&self) -> OutputResult<()> {
        self.stream.pause()?;
        info!("rain stopped");
        Ok(())
    }
    /// Play for the given duration, blocking the thread, then pause
    pub fn play_for(&self, dur: impl ToDuration) -> OutputResult<()> {
        self.play()?;
        thread::sleep(dur.to_duration());
        self.pause()
    }
    /// Take the most recent error reported by the stream, if any
    pub fn take_stream_error(&self) -> Option<StreamError> {
        self.stream_error.lock().take()
    }
    /// Close the stream
    pub fn close(self) {
        drop(self.stream);
        info!("output stream closed");
    }
}

/// Render into a device buffer whose samples are not `f32`
fn write_frames<G, A>(rain: &mut Rain<G>, data: &mut [A], channels: usize)
where
    G: Geometry,
    A: SizedSample + FromSample<f32>,
{
    let mut frames = data.chunks_exact_mut(channels);
    for slice in &mut frames {
        let frame = rain.next_frame();
        let mut amps = [0.0f32; 8];
        let n = channels.min(amps.len());
        frame.write_slice(&mut amps[..n]);
        for (i, sample) in slice.iter_mut().enumerate() {
            let amp = amps.get(i).copied().unwrap_or(0.0);
            *sample = A::from_sample(amp);
        }
    }
    frames.into_remainder().fill(A::EQUILIBRIUM);
}
