use std::time::Duration;

use crate::{DropField, FieldParams, Geometry, Rain, RainResult};

/// Everything needed to start a rain soundscape
///
/// The defaults are tuned for a steady, moderate rain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RainConfig {
    /// The number of drops in the field
    pub drop_count: usize,
    /// The master volume applied to both channels
    pub volume: f64,
    /// The sample rate to request from the output device
    pub sample_rate: u32,
    /// How long to play for
    pub duration: Duration,
    /// A seed for drop generation. If not set, drops are seeded from entropy.
    pub seed: Option<u64>,
    /// The ranges drop parameters are drawn from
    pub field: FieldParams,
}

impl Default for RainConfig {
    fn default() -> Self {
        RainConfig {
            drop_count: 80,
            volume: 0.35,
            sample_rate: 44_100,
            duration: Duration::from_secs(50),
            seed: None,
            field: FieldParams::default(),
        }
    }
}

impl RainConfig {
    /// Generate a drop field and build a renderer at the given sample rate
    pub fn build(&self, sample_rate: u32) -> RainResult<Rain> {
        let field = self.generate_field()?;
        Ok(Rain::new(field, self.volume, sample_rate))
    }
    /// Generate a drop field and build a renderer with the given geometry strategy
    pub fn build_with<G>(&self, sample_rate: u32, geometry: G) -> RainResult<Rain<G>>
    where
        G: Geometry,
    {
        let field = self.generate_field()?;
        Ok(Rain::with_geometry(field, self.volume, sample_rate, geometry))
    }
    fn generate_field(&self) -> RainResult<DropField> {
        DropField::random(self.drop_count, &self.field, self.seed)
    }
}
