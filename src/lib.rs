#![warn(missing_docs)]

/*!
This crate synthesizes a stereo rain soundscape from a field of periodically
retriggering raindrop impacts, and plays it on an audio output device.

```no_run
# #[cfg(feature = "output")]
# fn main() -> drizzle::OutputResult<()> {
use drizzle::*;

let config = RainConfig::default();
let output = OutputBuilder::default_output().build(&config)?;
output.play_for(std::time::Duration::from_secs(10))?;
output.close();
# Ok(())
# }
# #[cfg(not(feature = "output"))]
# fn main() {}
```
*/

pub mod acoustics;
mod clock;
mod config;
mod error;
pub mod field;
mod frame;
pub mod geometry;
#[cfg(feature = "output")]
mod io;
mod rain;
pub mod source;
#[cfg(feature = "wav")]
#[cfg_attr(docsrs, doc(cfg(feature = "wav")))]
pub mod wav;

#[doc(inline)]
pub use acoustics::Ear;
#[doc(inline)]
pub use field::{DropField, FieldParams, Raindrop};
#[doc(inline)]
pub use geometry::{Cached, Direct, EarGeometry, Geometry};
#[cfg(feature = "output")]
#[cfg_attr(docsrs, doc(cfg(feature = "output")))]
pub use io::*;
#[doc(inline)]
pub use source::Source;
use std::time::Duration;
pub use {clock::*, config::*, error::*, frame::*, rain::*};

/// A trait for converting to a [`Duration`]
pub trait ToDuration {
    /// Convert to a duration
    fn to_duration(self) -> Duration;
}

/// Interprets a number as seconds
impl ToDuration for f32 {
    fn to_duration(self) -> Duration {
        Duration::from_secs_f32(self)
    }
}

/// Interprets a number as seconds
impl ToDuration for f64 {
    fn to_duration(self) -> Duration {
        Duration::from_secs_f64(self)
    }
}

/// Interprets a number as seconds
impl ToDuration for u64 {
    fn to_duration(self) -> Duration {
        Duration::from_secs(self)
    }
}

impl ToDuration for Duration {
    fn to_duration(self) -> Duration {
        self
    }
}
