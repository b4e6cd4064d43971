//! Tunable constants for the constellation, loadable from JSON.

use serde::Deserialize;

use super::error::ConfigError;

/// Longest frame delay a browser timer accepts (`setTimeout` takes an `i32`).
pub const MAX_FRAME_INTERVAL_MS: u32 = i32::MAX as u32;

/// Velocity and radius ranges used when spawning particles.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SpawnRange {
	/// Each velocity component is drawn from `[-speed, speed)`.
	pub speed: f64,
	/// Inclusive lower bound of the radius.
	pub radius_min: f64,
	/// Exclusive upper bound of the radius.
	pub radius_max: f64,
}

impl SpawnRange {
	/// Ranges for the batch seeded on load.
	pub const fn seeded() -> Self {
		Self {
			speed: 1.0,
			radius_min: 0.2,
			radius_max: 1.2,
		}
	}

	/// Ranges for a single particle spawned by a click.
	pub const fn clicked() -> Self {
		Self {
			speed: 2.0,
			radius_min: 0.2,
			radius_max: 0.7,
		}
	}

	fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
		if !(self.speed > 0.0) {
			return Err(ConfigError::InvalidSpawnRange {
				name,
				reason: "speed must be positive",
			});
		}
		if !(self.radius_min > 0.0) {
			return Err(ConfigError::InvalidSpawnRange {
				name,
				reason: "radius_min must be positive",
			});
		}
		if !(self.radius_min < self.radius_max) {
			return Err(ConfigError::InvalidSpawnRange {
				name,
				reason: "radius_min must be below radius_max",
			});
		}
		Ok(())
	}
}

/// Complete constellation configuration.
///
/// Every field is optional in JSON; missing fields keep their defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConstellationConfig {
	/// Delay between frames, in milliseconds.
	pub frame_interval_ms: u32,
	/// Surface area per seeded particle.
	pub area_per_particle: f64,
	/// Numerator of the proximity weight (`link_constant / distance²`).
	pub link_constant: f64,
	/// Links are drawn only when the weight is strictly above this.
	pub link_min_weight: f64,
	/// Links are drawn only when the weight is strictly below this.
	pub link_max_weight: f64,
	/// Stroke width of each particle's outline.
	pub outline_width: f64,
	/// Ranges for the batch seeded on load.
	pub seed_spawn: SpawnRange,
	/// Ranges for particles added by a click.
	pub click_spawn: SpawnRange,
	/// Upper bound on the store size. `None` lets it grow forever.
	pub max_particles: Option<usize>,
	/// Fixed RNG seed; random per page load when unset.
	pub rng_seed: Option<u64>,
}

impl Default for ConstellationConfig {
	fn default() -> Self {
		Self {
			frame_interval_ms: 20,
			area_per_particle: 8000.0,
			link_constant: 440.0,
			link_min_weight: 0.035,
			link_max_weight: 0.6,
			outline_width: 1.0,
			seed_spawn: SpawnRange::seeded(),
			click_spawn: SpawnRange::clicked(),
			max_particles: None,
			rng_seed: None,
		}
	}
}

impl ConstellationConfig {
	/// Parse a JSON document and validate the result.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Check the invariants the simulation relies on.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.frame_interval_ms == 0 || self.frame_interval_ms > MAX_FRAME_INTERVAL_MS {
			return Err(ConfigError::FrameIntervalOutOfRange(
				self.frame_interval_ms,
			));
		}
		if !(self.area_per_particle > 0.0) {
			return Err(ConfigError::NonPositive("area_per_particle"));
		}
		if !(self.link_constant > 0.0) {
			return Err(ConfigError::NonPositive("link_constant"));
		}
		if !(self.link_min_weight < self.link_max_weight) {
			return Err(ConfigError::EmptyLinkBand {
				min: self.link_min_weight,
				max: self.link_max_weight,
			});
		}
		self.seed_spawn.validate("seed_spawn")?;
		self.click_spawn.validate("click_spawn")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_reference_constants() {
		let config = ConstellationConfig::default();
		assert_eq!(config.frame_interval_ms, 20);
		assert_eq!(config.area_per_particle, 8000.0);
		assert_eq!(config.link_constant, 440.0);
		assert_eq!(config.seed_spawn, SpawnRange::seeded());
		assert_eq!(config.click_spawn.radius_max, 0.7);
		assert!(config.max_particles.is_none());
		assert!(config.validate().is_ok());
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config =
			ConstellationConfig::from_json(r#"{ "max_particles": 50, "rng_seed": 7 }"#).unwrap();
		assert_eq!(config.max_particles, Some(50));
		assert_eq!(config.rng_seed, Some(7));
		assert_eq!(config.link_max_weight, 0.6);
		assert_eq!(config.frame_interval_ms, 20);
	}

	#[test]
	fn empty_object_is_default() {
		let config = ConstellationConfig::from_json("{}").unwrap();
		assert_eq!(config, ConstellationConfig::default());
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = ConstellationConfig::from_json("{ not json").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn inverted_link_band_is_rejected() {
		let err =
			ConstellationConfig::from_json(r#"{ "link_min_weight": 0.7, "link_max_weight": 0.6 }"#)
				.unwrap_err();
		assert!(matches!(err, ConfigError::EmptyLinkBand { .. }));
	}

	#[test]
	fn spawn_range_needs_positive_radius() {
		let config = ConstellationConfig {
			click_spawn: SpawnRange {
				speed: 2.0,
				radius_min: 0.0,
				radius_max: 0.7,
			},
			..Default::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::InvalidSpawnRange {
				name: "click_spawn",
				..
			})
		));
	}

	#[test]
	fn zero_interval_is_rejected() {
		let config = ConstellationConfig {
			frame_interval_ms: 0,
			..Default::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::FrameIntervalOutOfRange(0))
		));
	}

	#[test]
	fn interval_beyond_timer_range_is_rejected() {
		let config = ConstellationConfig {
			frame_interval_ms: u32::MAX,
			..Default::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::FrameIntervalOutOfRange(u32::MAX))
		));

		let config = ConstellationConfig {
			frame_interval_ms: MAX_FRAME_INTERVAL_MS,
			..Default::default()
		};
		assert!(config.validate().is_ok());
	}
}
