//! Error types for configuration loading and canvas mounting.

use std::fmt;

use wasm_bindgen::JsValue;

use super::config::MAX_FRAME_INTERVAL_MS;

/// Errors produced while parsing or validating a [`ConstellationConfig`].
///
/// [`ConstellationConfig`]: super::ConstellationConfig
#[derive(Debug)]
pub enum ConfigError {
	/// The JSON document could not be deserialized.
	Parse(serde_json::Error),
	/// `frame_interval_ms` was zero or too large for a browser timer.
	FrameIntervalOutOfRange(u32),
	/// A field that must be strictly positive was not.
	NonPositive(&'static str),
	/// `link_min_weight` is not below `link_max_weight`, so no link could ever be drawn.
	EmptyLinkBand {
		/// Configured lower bound.
		min: f64,
		/// Configured upper bound.
		max: f64,
	},
	/// A spawn range cannot be sampled.
	InvalidSpawnRange {
		/// Config field holding the range.
		name: &'static str,
		/// What is wrong with it.
		reason: &'static str,
	},
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
			ConfigError::FrameIntervalOutOfRange(ms) => write!(
				f,
				"frame_interval_ms must be in 1..={}, got {}",
				MAX_FRAME_INTERVAL_MS, ms
			),
			ConfigError::NonPositive(field) => write!(f, "{} must be positive", field),
			ConfigError::EmptyLinkBand { min, max } => write!(
				f,
				"link weight band ({}, {}) is empty",
				min, max
			),
			ConfigError::InvalidSpawnRange { name, reason } => write!(f, "{}: {}", name, reason),
		}
	}
}

impl std::error::Error for ConfigError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			ConfigError::Parse(e) => Some(e),
			_ => None,
		}
	}
}

impl From<serde_json::Error> for ConfigError {
	fn from(e: serde_json::Error) -> Self {
		ConfigError::Parse(e)
	}
}

/// Errors that prevent the canvas from being wired up.
#[derive(Debug)]
pub enum MountError {
	/// No global `window` (not running in a browser).
	NoWindow,
	/// The canvas has no 2D rendering context.
	NoContext,
	/// The supplied configuration failed validation.
	Config(ConfigError),
	/// A DOM call threw.
	Js(String),
}

impl fmt::Display for MountError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MountError::NoWindow => write!(f, "no global window available"),
			MountError::NoContext => write!(f, "canvas has no 2d rendering context"),
			MountError::Config(e) => write!(f, "invalid config: {}", e),
			MountError::Js(msg) => write!(f, "DOM call failed: {}", msg),
		}
	}
}

impl std::error::Error for MountError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			MountError::Config(e) => Some(e),
			_ => None,
		}
	}
}

impl From<ConfigError> for MountError {
	fn from(e: ConfigError) -> Self {
		MountError::Config(e)
	}
}

impl From<JsValue> for MountError {
	fn from(value: JsValue) -> Self {
		MountError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}
