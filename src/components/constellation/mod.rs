//! Animated particle constellation.
//!
//! Draws a field of slowly drifting balls on an HTML canvas and joins nearby
//! pairs with lines whose width falls off with squared distance:
//! - Particles bounce off the canvas edges
//! - The initial batch is proportional to the canvas area
//! - Clicking the canvas adds one more particle at the pointer
//!
//! The simulation lives in [`ConstellationState`] and draws through the
//! [`Surface`] trait, so it runs headless in tests.
//!
//! # Example
//!
//! ```ignore
//! use constellation::{ConstellationCanvas, ConstellationConfig};
//!
//! let config = ConstellationConfig { max_particles: Some(500), ..Default::default() };
//!
//! view! {
//!     <div id="portfolio" style="width: 100%; height: 400px;">
//!         <ConstellationCanvas config=config />
//!     </div>
//! }
//! ```

mod component;
mod config;
mod error;
mod particles;
mod render;
mod state;

pub use component::ConstellationCanvas;
pub use config::{ConstellationConfig, SpawnRange};
pub use error::{ConfigError, MountError};
pub use particles::{Particle, ParticleStore, seed_count};
pub use render::{CanvasSurface, LinkRule, Surface};
pub use state::{ConstellationState, FrameStats};
