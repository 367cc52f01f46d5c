use glam::Vec3;
use log::{debug, info};

use super::camera::{CameraPose, CameraTransition};
use super::signal::FocusSignal;
use crate::graph::GraphDataStore;

const INITIAL_DISTANCE: f32 = 300.0;
const MIN_DOLLY_DISTANCE: f32 = 5.0;
const MAX_DOLLY_DISTANCE: f32 = 5_000.0;
const MIN_FRAME_RADIUS: f32 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DirectorConfig {
	/// Distance kept between the camera and a focused node.
	pub standoff: f32,
	pub focus_duration_ms: f64,
	pub frame_duration_ms: f64,
	pub frame_padding: f32,
	pub fov_y_deg: f32,
}

impl Default for DirectorConfig {
	fn default() -> Self {
		Self {
			standoff: 40.0,
			focus_duration_ms: 3_000.0,
			frame_duration_ms: 400.0,
			frame_padding: 1.2,
			fov_y_deg: 50.0,
		}
	}
}

/// What a focus request did to the camera.
#[derive(Clone, Debug, PartialEq)]
pub enum FocusOutcome {
	Started(CameraTransition),
	/// A newer signal has already been seen.
	Superseded,
	/// This signal already moved the camera.
	AlreadyHandled,
	/// No node with that id in the current snapshot.
	Miss,
	/// The node exists but the simulation has not placed it yet.
	Unplaced,
}

/// Camera position on the origin-to-node ray, `standoff` beyond the node.
pub fn focus_position(node: Vec3, standoff: f32) -> Vec3 {
	let distance = node.length();
	if distance <= f32::EPSILON {
		return node + Vec3::Z * standoff;
	}
	node * (1.0 + standoff / distance)
}

/// Pose on the +z side of the centroid that keeps every point in view.
pub fn frame_pose(
	points: impl IntoIterator<Item = Vec3>,
	fov_y_deg: f32,
	padding: f32,
) -> Option<CameraPose> {
	let points: Vec<Vec3> = points.into_iter().collect();
	if points.is_empty() {
		return None;
	}
	let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
	let radius = points
		.iter()
		.map(|p| p.distance(centroid))
		.fold(MIN_FRAME_RADIUS, f32::max);
	let half_fov = (fov_y_deg.to_radians() / 2.0).max(1e-3);
	let distance = radius * padding / half_fov.sin();
	Some(CameraPose::new(centroid + Vec3::Z * distance, centroid))
}

/// Sole owner of the camera for one graph view.
///
/// Acts only on the newest focus signal it has seen, and stops auto-framing
/// on settle once a focus transition has been issued.
#[derive(Clone, Debug)]
pub struct CameraDirector {
	config: DirectorConfig,
	camera: CameraPose,
	transition: Option<CameraTransition>,
	newest_seen: Option<u64>,
	acted_on: Option<u64>,
	auto_frame_suppressed: bool,
}

impl Default for CameraDirector {
	fn default() -> Self {
		Self::new(DirectorConfig::default())
	}
}

impl CameraDirector {
	pub fn new(config: DirectorConfig) -> Self {
		Self {
			config,
			camera: CameraPose::new(Vec3::Z * INITIAL_DISTANCE, Vec3::ZERO),
			transition: None,
			newest_seen: None,
			acted_on: None,
			auto_frame_suppressed: false,
		}
	}

	pub fn config(&self) -> &DirectorConfig {
		&self.config
	}

	/// Camera pose at `now_ms`, including any in-flight transition.
	pub fn pose(&self, now_ms: f64) -> CameraPose {
		match &self.transition {
			Some(t) => t.sample(now_ms),
			None => self.camera,
		}
	}

	/// Advance to `now_ms`, retiring a finished transition.
	pub fn tick(&mut self, now_ms: f64) -> CameraPose {
		if let Some(t) = self.transition {
			if t.is_finished(now_ms) {
				self.camera = t.to;
				self.transition = None;
			}
		}
		self.pose(now_ms)
	}

	pub fn on_focus_signal(
		&mut self,
		signal: &FocusSignal,
		store: &GraphDataStore,
		now_ms: f64,
	) -> FocusOutcome {
		if self.newest_seen.is_some_and(|seen| signal.timestamp < seen) {
			debug!("Ignoring superseded focus on '{}'", signal.id);
			return FocusOutcome::Superseded;
		}
		self.newest_seen = Some(signal.timestamp);
		if self.acted_on == Some(signal.timestamp) {
			return FocusOutcome::AlreadyHandled;
		}

		let Some(node) = store.lookup(&signal.id) else {
			debug!("Focus target '{}' is not in the graph", signal.id);
			return FocusOutcome::Miss;
		};
		let Some(target) = node.position else {
			debug!("Focus target '{}' has no position yet", signal.id);
			return FocusOutcome::Unplaced;
		};

		let to = CameraPose::new(focus_position(target, self.config.standoff), target);
		let transition = self.start_transition(to, self.config.focus_duration_ms, now_ms);
		self.acted_on = Some(signal.timestamp);
		self.auto_frame_suppressed = true;
		info!("Flying camera to '{}'", signal.id);
		FocusOutcome::Started(transition)
	}

	/// Frame every placed node when the simulation settles. Returns whether a
	/// transition was issued.
	pub fn on_settle(&mut self, store: &GraphDataStore, now_ms: f64) -> bool {
		if self.auto_frame_suppressed {
			debug!("Settled after a focus request, keeping the camera where it is");
			return false;
		}
		let Some(to) = frame_pose(
			store.placed_positions(),
			self.config.fov_y_deg,
			self.config.frame_padding,
		) else {
			return false;
		};
		self.start_transition(to, self.config.frame_duration_ms, now_ms);
		debug!("Framing {} nodes", store.nodes().len());
		true
	}

	/// Scale the camera's distance to its look-at point. Cancels any
	/// in-flight transition.
	pub fn dolly(&mut self, factor: f32, now_ms: f64) {
		let pose = self.pose(now_ms);
		let offset = pose.position - pose.look_at;
		let distance = (offset.length() * factor).clamp(MIN_DOLLY_DISTANCE, MAX_DOLLY_DISTANCE);
		let direction = offset.try_normalize().unwrap_or(Vec3::Z);
		self.camera = CameraPose::new(pose.look_at + direction * distance, pose.look_at);
		self.transition = None;
	}

	fn start_transition(&mut self, to: CameraPose, duration_ms: f64, now_ms: f64) -> CameraTransition {
		let from = self.pose(now_ms);
		self.camera = from;
		let transition = CameraTransition {
			from,
			to,
			started_at_ms: now_ms,
			duration_ms,
		};
		self.transition = Some(transition);
		transition
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphDataset, GraphNode};

	fn store_with(nodes: &[(&str, Option<Vec3>)]) -> GraphDataStore {
		let nodes = nodes
			.iter()
			.map(|(id, position)| GraphNode {
				id: (*id).into(),
				group: "Company".into(),
				position: *position,
			})
			.collect();
		GraphDataStore::new(GraphDataset {
			nodes,
			links: vec![],
		})
	}

	fn signal(id: &str, timestamp: u64) -> FocusSignal {
		FocusSignal {
			id: id.into(),
			timestamp,
		}
	}

	impl CameraDirector {
		fn transition(&self) -> Option<&CameraTransition> {
			self.transition.as_ref()
		}

		fn is_auto_frame_suppressed(&self) -> bool {
			self.auto_frame_suppressed
		}
	}

	fn started(outcome: FocusOutcome) -> CameraTransition {
		match outcome {
			FocusOutcome::Started(t) => t,
			other => panic!("expected a transition, got {other:?}"),
		}
	}

	#[test]
	fn focus_position_keeps_standoff_along_origin_ray() {
		let camera = focus_position(Vec3::new(30.0, 0.0, 40.0), 40.0);
		assert!((camera - Vec3::new(54.0, 0.0, 72.0)).length() < 1e-4);
		assert!((camera.length() - 90.0).abs() < 1e-4);
	}

	#[test]
	fn focus_position_at_origin_does_not_divide_by_zero() {
		let camera = focus_position(Vec3::ZERO, 40.0);
		assert!(camera.is_finite());
		assert!((camera.length() - 40.0).abs() < 1e-4);
	}

	#[test]
	fn focus_flies_to_the_node() {
		let store = store_with(&[("Acme Corp", Some(Vec3::new(10.0, 0.0, 0.0)))]);
		let mut director = CameraDirector::default();

		let t = started(director.on_focus_signal(&signal("Acme Corp", 1), &store, 100.0));
		assert_eq!(t.to.look_at, Vec3::new(10.0, 0.0, 0.0));
		assert!((t.to.position - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);
		assert_eq!(t.duration_ms, 3_000.0);
		assert_eq!(t.started_at_ms, 100.0);
		assert!(director.is_auto_frame_suppressed());
	}

	#[test]
	fn newest_signal_wins_regardless_of_arrival_order() {
		let store = store_with(&[
			("Acme", Some(Vec3::new(10.0, 0.0, 0.0))),
			("Foo", Some(Vec3::new(0.0, 10.0, 0.0))),
		]);
		let mut director = CameraDirector::default();

		started(director.on_focus_signal(&signal("Foo", 20), &store, 0.0));
		assert_eq!(
			director.on_focus_signal(&signal("Acme", 10), &store, 5.0),
			FocusOutcome::Superseded
		);
		assert_eq!(
			director.transition().map(|t| t.to.look_at),
			Some(Vec3::new(0.0, 10.0, 0.0))
		);
	}

	#[test]
	fn same_timestamp_does_not_retrigger_but_a_new_one_does() {
		let store = store_with(&[("Acme", Some(Vec3::new(10.0, 0.0, 0.0)))]);
		let mut director = CameraDirector::default();

		started(director.on_focus_signal(&signal("Acme", 1), &store, 0.0));
		assert_eq!(
			director.on_focus_signal(&signal("Acme", 1), &store, 10.0),
			FocusOutcome::AlreadyHandled
		);
		let again = started(director.on_focus_signal(&signal("Acme", 2), &store, 20.0));
		assert_eq!(again.started_at_ms, 20.0);
	}

	#[test]
	fn miss_leaves_camera_untouched() {
		let store = store_with(&[("Acme", Some(Vec3::new(10.0, 0.0, 0.0)))]);
		let mut director = CameraDirector::default();
		started(director.on_focus_signal(&signal("Acme", 1), &store, 0.0));
		let before = director.transition().copied();

		assert_eq!(
			director.on_focus_signal(&signal("Nobody", 2), &store, 50.0),
			FocusOutcome::Miss
		);
		assert_eq!(director.transition().copied(), before);
	}

	#[test]
	fn unplaced_node_is_a_silent_miss() {
		let store = store_with(&[("Acme", None)]);
		let mut director = CameraDirector::default();
		assert_eq!(
			director.on_focus_signal(&signal("Acme", 1), &store, 0.0),
			FocusOutcome::Unplaced
		);
		assert!(director.transition().is_none());
		assert!(!director.is_auto_frame_suppressed());
	}

	#[test]
	fn signal_resolves_once_the_graph_arrives() {
		let mut director = CameraDirector::default();
		let pending = signal("Acme", 7);

		assert_eq!(
			director.on_focus_signal(&pending, &GraphDataStore::default(), 0.0),
			FocusOutcome::Miss
		);
		let store = store_with(&[("Acme", Some(Vec3::new(0.0, 0.0, 25.0)))]);
		started(director.on_focus_signal(&pending, &store, 10.0));
	}

	#[test]
	fn settle_frames_the_graph_until_a_focus_happens() {
		let store = store_with(&[
			("Acme", Some(Vec3::new(-50.0, 0.0, 0.0))),
			("Foo", Some(Vec3::new(50.0, 0.0, 0.0))),
		]);
		let mut director = CameraDirector::default();

		assert!(director.on_settle(&store, 0.0));
		let framed = director.transition().copied().unwrap();
		assert_eq!(framed.to.look_at, Vec3::ZERO);
		assert_eq!(framed.duration_ms, 400.0);

		started(director.on_focus_signal(&signal("Acme", 1), &store, 500.0));
		let focused = director.transition().copied();
		assert!(!director.on_settle(&store, 600.0));
		assert_eq!(director.transition().copied(), focused);
	}

	#[test]
	fn settle_with_nothing_placed_does_nothing() {
		let store = store_with(&[("Acme", None)]);
		let mut director = CameraDirector::default();
		assert!(!director.on_settle(&store, 0.0));
		assert!(director.transition().is_none());
	}

	#[test]
	fn new_transition_starts_from_the_in_flight_pose() {
		let store = store_with(&[
			("Acme", Some(Vec3::new(100.0, 0.0, 0.0))),
			("Foo", Some(Vec3::new(0.0, 100.0, 0.0))),
		]);
		let mut director = CameraDirector::default();
		started(director.on_focus_signal(&signal("Acme", 1), &store, 0.0));
		let mid_flight = director.pose(1_500.0);

		let redirect = started(director.on_focus_signal(&signal("Foo", 2), &store, 1_500.0));
		assert_eq!(redirect.from, mid_flight);
	}

	#[test]
	fn tick_retires_finished_transitions() {
		let store = store_with(&[("Acme", Some(Vec3::new(10.0, 0.0, 0.0)))]);
		let mut director = CameraDirector::default();
		let t = started(director.on_focus_signal(&signal("Acme", 1), &store, 0.0));

		assert!(director.tick(1_000.0) != t.to);
		assert_eq!(director.tick(3_000.0), t.to);
		assert!(director.transition().is_none());
		assert_eq!(director.pose(9_000.0), t.to);
	}

	#[test]
	fn dolly_scales_distance_and_cancels_transition() {
		let store = store_with(&[("Acme", Some(Vec3::new(10.0, 0.0, 0.0)))]);
		let mut director = CameraDirector::default();
		director.dolly(0.5, 0.0);
		assert!((director.pose(0.0).position.z - INITIAL_DISTANCE * 0.5).abs() < 1e-3);

		started(director.on_focus_signal(&signal("Acme", 1), &store, 0.0));
		director.dolly(1.1, 100.0);
		assert!(director.transition().is_none());
		assert!(director.is_auto_frame_suppressed());
	}
}
