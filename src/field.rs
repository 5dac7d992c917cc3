//! Raindrops and the fixed field they are scattered over

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{acoustics::Ear, EarGeometry, RainError, RainResult};

/// One recurring impact sound source
///
/// The drop's position is fixed, so its geometry relative to
/// each ear is computed once, when it is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    lateral: f64,
    forward: f64,
    pitch: f64,
    period: f64,
    ears: [EarGeometry; 2],
}

impl Raindrop {
    /// Create a new drop
    ///
    /// `lateral` is the signed offset from the listener's central axis
    /// (negative is left), `forward` the distance in front of the listener,
    /// `pitch` a multiplier on the impact's frequency sweep, and `period`
    /// the number of seconds between retriggers.
    ///
    /// Every parameter must be finite, and `forward` and `period`
    /// must be positive.
    pub fn new(lateral: f64, forward: f64, pitch: f64, period: f64) -> RainResult<Self> {
        let params = [lateral, forward, pitch, period];
        if !params.iter().all(|p| p.is_finite()) {
            return Err(RainError::InvalidDrop(format!(
                "parameters {params:?} must be finite"
            )));
        }
        if forward <= 0.0 {
            return Err(RainError::InvalidDrop(format!(
                "forward distance {forward} must be positive"
            )));
        }
        if period <= 0.0 {
            return Err(RainError::InvalidDrop(format!(
                "period {period} must be positive"
            )));
        }
        Ok(Raindrop {
            lateral,
            forward,
            pitch,
            period,
            ears: Ear::BOTH.map(|ear| EarGeometry::between(lateral, forward, ear)),
        })
    }
    /// Get the signed offset from the listener's central axis
    pub fn lateral(&self) -> f64 {
        self.lateral
    }
    /// Get the distance in front of the listener
    pub fn forward(&self) -> f64 {
        self.forward
    }
    /// Get the pitch multiplier
    pub fn pitch(&self) -> f64 {
        self.pitch
    }
    /// Get the retrigger period in seconds
    pub fn period(&self) -> f64 {
        self.period
    }
    /// Get the precomputed path to an ear
    pub fn cached(&self, ear: Ear) -> EarGeometry {
        self.ears[ear.channel()]
    }
}

/// Ranges that drop parameters are drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldParams {
    /// The closest a drop may be in front of the listener
    pub min_distance: f64,
    /// The farthest a drop may be in front of, or to the side of, the listener
    pub max_distance: f64,
    /// The lowest pitch multiplier
    pub min_pitch: f64,
    /// The highest pitch multiplier
    pub max_pitch: f64,
    /// The shortest retrigger period in seconds
    pub min_period: f64,
    /// The longest retrigger period in seconds
    pub max_period: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        FieldParams {
            min_distance: 40.0,
            max_distance: 400.0,
            min_pitch: 0.8,
            max_pitch: 1.2,
            min_period: 1.5,
            max_period: 5.5,
        }
    }
}

impl FieldParams {
    /// Check that every range is non-empty and that drops
    /// will always be in front of the listener and retrigger
    pub fn validate(&self) -> RainResult<()> {
        let ranges = [
            ("lateral", -self.max_distance, self.max_distance),
            ("distance", self.min_distance, self.max_distance),
            ("pitch", self.min_pitch, self.max_pitch),
            ("period", self.min_period, self.max_period),
        ];
        for (name, min, max) in ranges {
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(RainError::InvalidField(format!(
                    "{name} range {min}..={max} is empty or not finite"
                )));
            }
            // Uniform sampling scales the span up slightly
            if !((max - min) / (1.0 - f64::EPSILON)).is_finite() {
                return Err(RainError::InvalidField(format!(
                    "{name} range {min}..={max} is too wide"
                )));
            }
        }
        if self.min_distance <= 0.0 {
            return Err(RainError::InvalidField(format!(
                "minimum distance {} must be positive",
                self.min_distance
            )));
        }
        if self.min_period <= 0.0 {
            return Err(RainError::InvalidField(format!(
                "minimum period {} must be positive",
                self.min_period
            )));
        }
        Ok(())
    }
}

/// A fixed collection of drops, read-only once created
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropField {
    drops: Vec<Raindrop>,
}

impl DropField {
    /// Scatter `count` drops using the given random number generator
    pub fn generate<R>(count: usize, params: &FieldParams, rng: &mut R) -> RainResult<Self>
    where
        R: Rng,
    {
        params.validate()?;
        let mut drops = Vec::new();
        drops.try_reserve_exact(count)?;
        for _ in 0..count {
            drops.push(Raindrop::new(
                rng.gen_range(-params.max_distance..=params.max_distance),
                rng.gen_range(params.min_distance..=params.max_distance),
                rng.gen_range(params.min_pitch..=params.max_pitch),
                rng.gen_range(params.min_period..=params.max_period),
            )?);
        }
        Ok(DropField { drops })
    }
    /// Scatter `count` drops, seeding the generator from `seed` if
    /// given and from system entropy otherwise
    pub fn random(count: usize, params: &FieldParams, seed: Option<u64>) -> RainResult<Self> {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::generate(count, params, &mut rng)
    }
    /// Create a field from explicit drops
    ///
    /// Drops are validated when they are created, so any field
    /// built from them renders finite samples.
    pub fn from_drops(drops: Vec<Raindrop>) -> Self {
        DropField { drops }
    }
    /// Get the drops
    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }
    /// Get the number of drops
    pub fn len(&self) -> usize {
        self.drops.len()
    }
    /// Check if the field has no drops
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }
    /// Iterate over the drops
    pub fn iter(&self) -> std::slice::Iter<'_, Raindrop> {
        self.drops.iter()
    }
}

impl<'a> IntoIterator for &'a DropField {
    type Item = &'a Raindrop;
    type IntoIter = std::slice::Iter<'a, Raindrop>;
    fn into_iter(self) -> Self::IntoIter {
        self.drops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_stay_in_range() {
        let params = FieldParams::default();
        let field = DropField::random(500, &params, Some(3)).unwrap();
        assert_eq!(field.len(), 500);
        for drop in &field {
            assert!((-400.0..=400.0).contains(&drop.lateral()));
            assert!((40.0..=400.0).contains(&drop.forward()));
            assert!((0.8..=1.2).contains(&drop.pitch()));
            assert!((1.5..=5.5).contains(&drop.period()));
        }
    }

    #[test]
    fn empty_field() {
        let field = DropField::random(0, &FieldParams::default(), None).unwrap();
        assert!(field.is_empty());
    }

    #[test]
    fn same_seed_same_field() {
        let params = FieldParams::default();
        let a = DropField::random(20, &params, Some(11)).unwrap();
        let b = DropField::random(20, &params, Some(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn geometry_is_cached_at_creation() {
        let drop = Raindrop::new(30.0, 80.0, 1.0, 2.0).unwrap();
        for ear in Ear::BOTH {
            assert_eq!(drop.cached(ear), EarGeometry::between(30.0, 80.0, ear));
        }
    }

    #[test]
    fn rejects_unusable_params() {
        let behind = FieldParams {
            min_distance: 0.0,
            ..FieldParams::default()
        };
        let inverted = FieldParams {
            min_period: 6.0,
            ..FieldParams::default()
        };
        let frozen = FieldParams {
            min_period: 0.0,
            ..FieldParams::default()
        };
        let too_wide = FieldParams {
            max_distance: 1e308,
            ..FieldParams::default()
        };
        let barely_too_wide = FieldParams {
            min_pitch: -f64::MAX,
            max_pitch: f64::MAX,
            ..FieldParams::default()
        };
        for params in [behind, inverted, frozen, too_wide, barely_too_wide] {
            let res = DropField::random(4, &params, Some(0));
            assert!(matches!(res, Err(RainError::InvalidField(_))), "{params:?}");
        }
    }

    #[test]
    fn wide_but_representable_ranges_generate() {
        let params = FieldParams {
            max_distance: 1e300,
            ..FieldParams::default()
        };
        let field = DropField::random(16, &params, Some(2)).unwrap();
        assert_eq!(field.len(), 16);
    }

    #[test]
    fn drops_that_would_not_sound_are_rejected() {
        let bad = [
            (0.0, 100.0, 1.0, 0.0),
            (0.0, 100.0, 1.0, -1.5),
            (0.0, 0.0, 1.0, 2.0),
            (0.0, -40.0, 1.0, 2.0),
            (f64::NAN, 100.0, 1.0, 2.0),
            (0.0, 100.0, f64::INFINITY, 2.0),
        ];
        for (lateral, forward, pitch, period) in bad {
            let res = Raindrop::new(lateral, forward, pitch, period);
            assert!(
                matches!(res, Err(RainError::InvalidDrop(_))),
                "{lateral}, {forward}, {pitch}, {period}"
            );
        }
    }

    #[test]
    fn absurd_count_is_an_allocation_error() {
        let res = DropField::random(usize::MAX, &FieldParams::default(), Some(0));
        assert!(matches!(res, Err(RainError::Allocation(_))));
    }
}
