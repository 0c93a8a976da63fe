//! Rendering budget rule for scenes.
//!
//! Rendering is delegated to the host through [`SceneProbe`]; the judicator
//! only drives the camera and compares samples against each profile.

use std::fmt;

use lex_law::{PerformanceStandards, QualityProfile};
use lex_primitives::{Asset, AssetBody};
use thiserror::Error;

use super::Findings;
use crate::verdict::Violation;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Camera orientation in degrees: `pitch` is latitude, `yaw` longitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CameraAngle {
	pub pitch: i32,
	pub yaw: i32,
}

impl CameraAngle {
	pub const fn new(pitch: i32, yaw: i32) -> Self {
		Self { pitch, yaw }
	}
}

impl fmt::Display for CameraAngle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}, 0)", self.pitch, self.yaw)
	}
}

/// Rendering statistics at one camera orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
	pub triangles: u64,
	pub draw_calls: u64,
}

#[derive(Debug, Error)]
#[error("cannot open scene '{path}': {reason}")]
pub struct ProbeError {
	pub path: String,
	pub reason: String,
}

/// Host renderer used to sample scenes.
pub trait SceneProbe {
	fn open_scene(&mut self, path: &str) -> Result<(), ProbeError>;
	/// Selects a quality level by name. Returns false if it does not exist.
	fn set_quality_level(&mut self, name: &str) -> bool;
	fn has_main_camera(&self) -> bool;
	fn configure_camera(&mut self, field_of_view: u32, aspect_ratio: f32);
	fn orient_camera(&mut self, angle: CameraAngle);
	fn sample(&mut self) -> RenderStats;
}

/// Probe for hosts that cannot render. Every profile is skipped.
#[derive(Debug, Default)]
pub struct NullProbe;

impl SceneProbe for NullProbe {
	fn open_scene(&mut self, _path: &str) -> Result<(), ProbeError> {
		Ok(())
	}

	fn set_quality_level(&mut self, _name: &str) -> bool {
		false
	}

	fn has_main_camera(&self) -> bool {
		false
	}

	fn configure_camera(&mut self, _field_of_view: u32, _aspect_ratio: f32) {}

	fn orient_camera(&mut self, _angle: CameraAngle) {}

	fn sample(&mut self) -> RenderStats {
		RenderStats::default()
	}
}

/// Orientations visited for one profile.
///
/// Longitude runs over `0..360` and latitude over `-90..=90` in steps of
/// `interval`; each pole is visited once. A non-positive interval, or a
/// profile whose camera does not rotate, yields the default orientation only.
pub fn camera_sweep(profile: &QualityProfile) -> Vec<CameraAngle> {
	let interval = profile.rotation_interval;
	if !profile.camera_rotates {
		return vec![CameraAngle::default()];
	}
	if interval <= 0 {
		tracing::warn!(interval, quality = %profile.quality_level, "non-positive rotation interval; sampling once");
		return vec![CameraAngle::default()];
	}

	let step = interval as usize;
	let mut angles = Vec::new();
	let (mut bottom, mut top) = (false, false);
	for yaw in (0..360).step_by(step) {
		for pitch in (-90..=90).step_by(step) {
			let pole = match pitch {
				-90 => &mut bottom,
				90 => &mut top,
				_ => {
					angles.push(CameraAngle::new(pitch, yaw));
					continue;
				}
			};
			if !*pole {
				*pole = true;
				angles.push(CameraAngle::new(pitch, yaw));
			}
		}
	}
	angles
}

#[derive(Debug, Clone, Default)]
pub struct SceneJudicator {
	pub standards: PerformanceStandards,
}

impl SceneJudicator {
	pub fn compile(standards: &PerformanceStandards) -> Self {
		Self { standards: standards.clone() }
	}

	/// Samples every quality profile. A profile the probe cannot set up is
	/// skipped and leaves the findings partial.
	pub fn adjudicate(&self, asset: &Asset, probe: &mut dyn SceneProbe) -> Findings {
		let AssetBody::Scene { dependencies } = &asset.body else {
			tracing::error!(path = %asset.path, "scene judicator bound to a non-scene asset");
			return Findings::unchecked();
		};
		if let Err(error) = probe.open_scene(&asset.path) {
			tracing::error!(%error, "skipping scene");
			return Findings::unchecked();
		}

		let memory_mib = dependencies.iter().map(|d| d.memory_bytes as f64).sum::<f64>() / BYTES_PER_MIB;
		let mut violations = Vec::new();
		let mut complete = true;
		for profile in &self.standards.profiles {
			if !probe.set_quality_level(&profile.quality_level) {
				tracing::error!(quality = %profile.quality_level, "quality level not found");
				complete = false;
				continue;
			}
			if !probe.has_main_camera() {
				tracing::error!(path = %asset.path, "no main camera found in scene");
				complete = false;
				continue;
			}
			probe.configure_camera(profile.field_of_view, profile.aspect_ratio);

			for angle in camera_sweep(profile) {
				probe.orient_camera(angle);
				let stats = probe.sample();
				if stats.triangles > profile.max_triangles {
					violations.push(Violation::unfixable(format!(
						"[{}] Maximum triangle count exceeded at camera angle {angle}, Triangle Count: {}",
						profile.quality_level, stats.triangles
					)));
				}
				if stats.draw_calls > profile.max_draw_calls {
					violations.push(Violation::unfixable(format!(
						"[{}] Maximum draw call count exceeded at camera angle {angle}, Draw Call Count: {}",
						profile.quality_level, stats.draw_calls
					)));
				}
			}

			if memory_mib > f64::from(profile.memory_limit_mb) {
				violations.push(Violation::unfixable(format!(
					"[{}] Memory usage exceeded: {memory_mib:.2}MB (Limit: {}MB)",
					profile.quality_level, profile.memory_limit_mb
				)));
			}
		}
		Findings { violations, complete }
	}
}
