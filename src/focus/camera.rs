use glam::Vec3;

const NEAR_PLANE: f32 = 0.1;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
	pub position: Vec3,
	pub look_at: Vec3,
}

impl CameraPose {
	pub fn new(position: Vec3, look_at: Vec3) -> Self {
		Self { position, look_at }
	}

	fn lerp(&self, other: &Self, t: f32) -> Self {
		Self {
			position: self.position.lerp(other.position, t),
			look_at: self.look_at.lerp(other.look_at, t),
		}
	}

	/// Unit view direction; looks down -z when position and target coincide.
	pub fn forward(&self) -> Vec3 {
		(self.look_at - self.position)
			.try_normalize()
			.unwrap_or(Vec3::NEG_Z)
	}
}

/// A timed move of the camera between two poses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransition {
	pub from: CameraPose,
	pub to: CameraPose,
	pub started_at_ms: f64,
	pub duration_ms: f64,
}

impl CameraTransition {
	pub fn progress(&self, now_ms: f64) -> f64 {
		if self.duration_ms <= 0.0 {
			return 1.0;
		}
		((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0)
	}

	pub fn is_finished(&self, now_ms: f64) -> bool {
		self.progress(now_ms) >= 1.0
	}

	pub fn sample(&self, now_ms: f64) -> CameraPose {
		let t = ease_out_cubic(self.progress(now_ms));
		self.from.lerp(&self.to, t as f32)
	}
}

/// Perspective projection of world points onto a `width` x `height` canvas.
#[derive(Clone, Debug)]
pub struct Projection {
	eye: Vec3,
	right: Vec3,
	up: Vec3,
	forward: Vec3,
	focal: f32,
	cx: f32,
	cy: f32,
}

impl Projection {
	pub fn new(pose: &CameraPose, width: f64, height: f64, fov_y_deg: f32) -> Self {
		let forward = pose.forward();
		let hint = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
			Vec3::Z
		} else {
			Vec3::Y
		};
		let right = forward.cross(hint).normalize();
		let up = right.cross(forward);
		let half_fov = (fov_y_deg.to_radians() / 2.0).max(1e-3);
		Self {
			eye: pose.position,
			right,
			up,
			forward,
			focal: (height as f32 / 2.0) / half_fov.tan(),
			cx: width as f32 / 2.0,
			cy: height as f32 / 2.0,
		}
	}

	/// Screen coordinates and view depth, or `None` behind the near plane.
	pub fn project(&self, point: Vec3) -> Option<(f64, f64, f64)> {
		let d = point - self.eye;
		let depth = d.dot(self.forward);
		if depth <= NEAR_PLANE {
			return None;
		}
		let scale = self.focal / depth;
		Some((
			(self.cx + d.dot(self.right) * scale) as f64,
			(self.cy - d.dot(self.up) * scale) as f64,
			depth as f64,
		))
	}

	/// Pixels per world unit at `depth`.
	pub fn scale_at(&self, depth: f64) -> f64 {
		self.focal as f64 / depth.max(NEAR_PLANE as f64)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transition_eases_from_start_to_end() {
		let transition = CameraTransition {
			from: CameraPose::new(Vec3::ZERO, Vec3::NEG_Z),
			to: CameraPose::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO),
			started_at_ms: 1_000.0,
			duration_ms: 3_000.0,
		};
		assert_eq!(transition.sample(500.0), transition.from);
		assert_eq!(transition.sample(4_000.0), transition.to);
		assert!(transition.is_finished(4_000.0));

		let halfway = transition.sample(2_500.0);
		// Ease-out covers more than half the distance by the midpoint.
		assert!(halfway.position.z > 50.0 && halfway.position.z < 100.0);
	}

	#[test]
	fn zero_duration_jumps_immediately() {
		let transition = CameraTransition {
			from: CameraPose::new(Vec3::ZERO, Vec3::NEG_Z),
			to: CameraPose::new(Vec3::X, Vec3::ZERO),
			started_at_ms: 0.0,
			duration_ms: 0.0,
		};
		assert_eq!(transition.sample(0.0), transition.to);
	}

	#[test]
	fn look_at_target_projects_to_canvas_centre() {
		let pose = CameraPose::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
		let projection = Projection::new(&pose, 800.0, 600.0, 50.0);

		let (x, y, depth) = projection.project(Vec3::ZERO).unwrap();
		assert!((x - 400.0).abs() < 1e-3 && (y - 300.0).abs() < 1e-3);
		assert!((depth - 100.0).abs() < 1e-3);

		let (x, y, _) = projection.project(Vec3::new(10.0, 10.0, 0.0)).unwrap();
		assert!(x > 400.0, "+x is to the right");
		assert!(y < 300.0, "+y is up");

		assert!(projection.project(Vec3::new(0.0, 0.0, 200.0)).is_none());
	}

	#[test]
	fn looking_straight_down_still_projects() {
		let pose = CameraPose::new(Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO);
		let projection = Projection::new(&pose, 100.0, 100.0, 50.0);
		let (x, y, _) = projection.project(Vec3::ZERO).unwrap();
		assert!(x.is_finite() && y.is_finite());
	}
}
