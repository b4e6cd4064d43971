//! Simulation state and the per-frame step.
//!
//! [`ConstellationState`] is the single owner of the particle store and the
//! random source. The host creates it once, calls [`ConstellationState::tick`]
//! on every timer firing, and forwards clicks to
//! [`ConstellationState::spawn_at`]. Nothing here knows about the DOM; the
//! drawing target and its dimensions arrive through a [`Surface`].

use log::{debug, info};
use rand::Rng;
use rand::rngs::SmallRng;

use super::config::ConstellationConfig;
use super::error::ConfigError;
use super::particles::{Particle, ParticleStore};
use super::render::{LinkRule, Surface, draw_link, draw_particle};

/// Counters describing a single rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	/// Particles moved and drawn.
	pub particles: usize,
	/// Unordered pairs whose weight was evaluated.
	pub pairs_tested: usize,
	/// Pairs whose weight fell inside the band.
	pub links_drawn: usize,
}

/// Particle store, random source and frame counter for one surface.
pub struct ConstellationState<R: Rng = SmallRng> {
	store: ParticleStore,
	rng: R,
	config: ConstellationConfig,
	link: LinkRule,
	frame: u64,
}

impl<R: Rng> ConstellationState<R> {
	/// Create the state and seed it for a `width × height` surface.
	///
	/// Fails if `config` does not pass [`ConstellationConfig::validate`].
	pub fn new(
		config: ConstellationConfig,
		width: f64,
		height: f64,
		rng: R,
	) -> Result<Self, ConfigError> {
		let store = ParticleStore::with_capacity_limit(config.max_particles);
		let mut state = Self::with_store(config, store, rng)?;
		let seeded = state.seed(width, height);
		info!(
			"constellation: seeded {} particles for {}x{} surface",
			seeded, width, height
		);
		Ok(state)
	}

	/// Wrap an existing store without seeding.
	pub fn with_store(
		config: ConstellationConfig,
		store: ParticleStore,
		rng: R,
	) -> Result<Self, ConfigError> {
		config.validate()?;
		let link = LinkRule {
			constant: config.link_constant,
			min_weight: config.link_min_weight,
			max_weight: config.link_max_weight,
		};
		Ok(Self {
			store,
			rng,
			config,
			link,
			frame: 0,
		})
	}

	/// Append a batch proportional to the surface area. Returns how many were added.
	pub fn seed(&mut self, width: f64, height: f64) -> usize {
		self.store.seed(
			width,
			height,
			self.config.area_per_particle,
			&self.config.seed_spawn,
			&mut self.rng,
		)
	}

	/// Append one particle at the given surface coordinates.
	///
	/// Returns `false` only when a capacity limit is configured and reached.
	pub fn spawn_at(&mut self, x: f64, y: f64) -> bool {
		let added = self
			.store
			.spawn_at(x, y, &self.config.click_spawn, &mut self.rng);
		if added {
			debug!(
				"constellation: spawned particle at ({}, {}), {} total",
				x,
				y,
				self.store.len()
			);
		} else {
			debug!("constellation: store full, click at ({}, {}) ignored", x, y);
		}
		added
	}

	/// Every particle, in insertion order.
	pub fn particles(&self) -> &[Particle] {
		self.store.particles()
	}

	/// The validated configuration this state runs with.
	pub fn config(&self) -> &ConstellationConfig {
		&self.config
	}

	/// Number of frames rendered so far.
	pub fn frame(&self) -> u64 {
		self.frame
	}

	/// Advance every particle one step and render the frame.
	///
	/// Particles are processed in store order. Each one is moved, reflected
	/// against the surface bounds and drawn, then linked to every particle
	/// after it. Later particles have not moved yet at that point, so links
	/// use their previous-frame positions.
	pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
		surface.clear();
		let (width, height) = (surface.width(), surface.height());
		let outline = self.config.outline_width;

		let particles = self.store.particles_mut();
		let mut stats = FrameStats {
			particles: particles.len(),
			..FrameStats::default()
		};

		for i in 0..particles.len() {
			let (head, tail) = particles.split_at_mut(i + 1);
			let p = &mut head[i];
			p.advance();
			p.reflect(width, height);
			draw_particle(surface, p, outline);

			for q in tail.iter() {
				stats.pairs_tested += 1;
				if let Some(weight) = self.link.weight(p, q) {
					draw_link(surface, p, q, weight);
					stats.links_drawn += 1;
				}
			}
		}

		self.frame += 1;
		stats
	}
}
