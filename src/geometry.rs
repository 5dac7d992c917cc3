//! Drop-to-ear geometry
//!
//! A drop's distance and propagation delay to each ear only depend on its
//! position, which never changes. [`Cached`] reads the values stored in each
//! [`Raindrop`] at construction, while [`Direct`] recomputes them on every
//! evaluation. Both produce the same samples.

use crate::{
    acoustics::{impact, Ear, SPEED_OF_SOUND},
    Raindrop,
};

/// The path from a drop to one ear
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarGeometry {
    /// Euclidean distance from the drop to the ear
    pub distance: f64,
    /// Time for the sound to travel that distance
    pub delay: f64,
}

impl EarGeometry {
    /// Compute the path from a drop at the given position to an ear
    pub fn between(lateral: f64, forward: f64, ear: Ear) -> Self {
        let offset = ear.position() - lateral;
        let distance = (offset * offset + forward * forward).sqrt();
        EarGeometry {
            distance,
            delay: distance / SPEED_OF_SOUND,
        }
    }
}

/// A strategy for resolving drop-to-ear geometry during rendering
pub trait Geometry {
    /// Get the path from a drop to an ear
    fn ear(&self, drop: &Raindrop, ear: Ear) -> EarGeometry;
    /// Get the amplitude of a drop at an ear at an absolute time
    fn sample(&self, drop: &Raindrop, ear: Ear, time: f64) -> f64 {
        let path = self.ear(drop, ear);
        impact(drop.period(), drop.pitch(), path.distance, path.delay, time)
    }
}

/// Recomputes geometry from the drop's position on every evaluation
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl Geometry for Direct {
    fn ear(&self, drop: &Raindrop, ear: Ear) -> EarGeometry {
        EarGeometry::between(drop.lateral(), drop.forward(), ear)
    }
}

/// Uses the geometry precomputed when the drop was created
#[derive(Debug, Clone, Copy, Default)]
pub struct Cached;

impl Geometry for Cached {
    fn ear(&self, drop: &Raindrop, ear: Ear) -> EarGeometry {
        drop.cached(ear)
    }
}
