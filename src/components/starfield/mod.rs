//! Ambient animated starfield drawn behind page content.
//!
//! Renders a nebula backdrop with twinkling, drifting stars and occasional
//! shooting stars on a full-viewport canvas:
//! - Procedural field generation sized to the viewport
//! - Parallax from page scroll and a smoothed pointer offset
//! - Self-rescheduling frame loop capped near 40 fps
//! - Configurable density, motion and color themes
//!
//! The simulation is independent of the browser. [`Starfield`] drives any
//! [`Surface`] through any [`Timer`], so the same engine runs against a
//! canvas in the page and against recording doubles in tests.
//!
//! # Example
//!
//! ```ignore
//! use cosmic_starfield::{StarfieldCanvas, StarfieldConfig};
//!
//! let config = StarfieldConfig { theme: "ember".into(), ..Default::default() };
//! view! { <StarfieldCanvas config=config /> }
//! ```

mod component;
pub mod config;
mod engine;
pub mod error;
mod field;
mod input;
mod particles;
mod render;
mod scheduler;
mod stepper;
mod surface;
pub mod theme;

pub use component::StarfieldCanvas;
pub use config::StarfieldConfig;
pub use engine::Starfield;
pub use error::StarfieldError;
pub use field::{Backdrop, Circle, Field, provision};
pub use input::{InputState, normalize_pointer};
pub use particles::{Particle, ParticleStore, RenderStyle, Streak};
pub use render::CanvasSurface;
pub use scheduler::{LoopState, ManualTimer, TickToken, Ticker, Timer};
pub use stepper::{FrameStats, step};
pub use surface::Surface;
pub use theme::{Color, Theme};
