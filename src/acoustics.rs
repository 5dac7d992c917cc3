//! The impact sound of a single raindrop as heard at one ear
//!
//! A drop retriggers every `period` seconds. Each trigger produces a sine
//! tone whose frequency sweeps exponentially while its amplitude decays
//! exponentially. The wavefront reaches each ear after a propagation delay,
//! and is softened by a distance falloff that is gentler than inverse-square
//! so that far drops stay audible.

/// Speed of sound in air, in distance units per second
pub const SPEED_OF_SOUND: f64 = 343.0;
/// Distance of each ear from the listener's central axis
pub const EAR_OFFSET: f64 = 0.075;
/// Distance falloff coefficient
pub const DISTANCE_DECAY: f64 = 1.1;

const ONSET_LAG: f64 = 0.015;
const ENVELOPE_RATE: f64 = 45.0;
const SWEEP_BASE: f64 = 45.0;
const PITCH_SCALE: f64 = 18.0;

/// One of the listener's two ears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ear {
    /// The left ear
    Left,
    /// The right ear
    Right,
}

impl Ear {
    /// Both ears, in output channel order
    pub const BOTH: [Ear; 2] = [Ear::Left, Ear::Right];
    /// Get the ear's signed lateral position
    pub fn position(self) -> f64 {
        match self {
            Ear::Left => -EAR_OFFSET,
            Ear::Right => EAR_OFFSET,
        }
    }
    /// Get the output channel index of this ear
    pub fn channel(self) -> usize {
        self as usize
    }
}

/// Get the amplitude of one drop at one ear at an absolute time
///
/// `distance` and `delay` describe the path from the drop to the ear.
/// The result is zero until the wavefront of the current cycle has
/// arrived at the ear.
pub fn impact(period: f64, pitch: f64, distance: f64, delay: f64, time: f64) -> f64 {
    let t = time.rem_euclid(period) - delay;
    if t < 0.0 {
        return 0.0;
    }
    let sweep = SWEEP_BASE.powf(1.0 + t);
    let tone = (sweep * PITCH_SCALE * pitch).sin();
    amplitude(t, distance) * tone
}

/// Get the non-oscillating part of an impact
///
/// `t` is the time since the wavefront arrived.
pub fn amplitude(t: f64, distance: f64) -> f64 {
    envelope(t) / attenuation(distance)
}

fn envelope(t: f64) -> f64 {
    ((-t - ONSET_LAG) * ENVELOPE_RATE).exp()
}

fn attenuation(distance: f64) -> f64 {
    1.0 + distance * DISTANCE_DECAY
}
