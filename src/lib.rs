#![forbid(unsafe_code)]

pub mod assets;
pub mod avatar;
pub mod clock;
pub mod compositor;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod range;
pub mod sample;
pub mod scene;

pub use avatar::make_circular;
pub use clock::ClockTime;
pub use compositor::{Compositor, TextStyle};
pub use config::{ConfigDoc, Configuration};
pub use error::{StridecardError, StridecardResult};
pub use pipeline::RenderPipeline;
pub use range::{NumberRange, TimeRange};
pub use sample::{Sample, Sampler};
pub use scene::Scene;
