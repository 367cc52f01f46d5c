use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use glam::Vec3;
use log::debug;

use crate::graph::{GraphDataStore, GraphDataset};

/// Ticks the simulation runs before it counts as settled.
pub const COOLDOWN_TICKS: u32 = 100;
/// Depth between neighbouring group layers.
const LAYER_SPACING: f32 = 30.0;
const SEED_RADIUS: f64 = 100.0;

#[derive(Clone, Debug, Default)]
struct NodeInfo {
	/// Index of the node in the store's snapshot.
	slot: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLink {
	pub source: usize,
	pub target: usize,
	pub label: Option<String>,
}

/// A loaded graph snapshot together with the layout simulation moving it.
pub struct GraphScene {
	graph: ForceGraph<NodeInfo, ()>,
	pub store: GraphDataStore,
	/// Links whose endpoints both exist, by store slot.
	pub links: Vec<SceneLink>,
	pub flow_time: f64,
	ticks: u32,
	running: bool,
}

impl GraphScene {
	pub fn new(dataset: GraphDataset) -> Self {
		let store = GraphDataStore::new(dataset);
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut slot_to_idx: Vec<DefaultNodeIdx> = Vec::with_capacity(store.nodes().len());
		let count = store.nodes().len().max(1) as f64;

		for slot in 0..store.nodes().len() {
			let angle = (slot as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (SEED_RADIUS * angle.cos()) as f32,
				y: (SEED_RADIUS * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo { slot },
			});
			slot_to_idx.push(idx);
		}

		let mut links = Vec::new();
		for link in &store.dataset().links {
			if let (Some(src), Some(tgt)) = (store.index_of(&link.source), store.index_of(&link.target)) {
				graph.add_edge(slot_to_idx[src], slot_to_idx[tgt], EdgeData::default());
				links.push(SceneLink {
					source: src,
					target: tgt,
					label: link.relationship.clone(),
				});
			}
		}
		debug!(
			"Scene built with {} nodes, {} of {} links resolvable",
			store.nodes().len(),
			links.len(),
			store.dataset().links.len()
		);

		let mut scene = Self {
			graph,
			store,
			links,
			flow_time: 0.0,
			ticks: 0,
			running: true,
		};
		// Place every node before anyone looks it up.
		scene.step(0.016);
		scene
	}

	/// Advance the simulation. Returns `true` on the tick it settles, once.
	pub fn tick(&mut self, dt: f32) -> bool {
		self.flow_time += dt as f64;
		if !self.running {
			return false;
		}
		self.step(dt);
		if self.ticks >= COOLDOWN_TICKS {
			self.running = false;
			return true;
		}
		false
	}

	fn step(&mut self, dt: f32) {
		self.graph.update(dt);
		self.ticks += 1;

		// Keep the layout centred on the origin.
		let (mut sx, mut sy, mut n) = (0.0f32, 0.0f32, 0usize);
		self.graph.visit_nodes(|node| {
			sx += node.x();
			sy += node.y();
			n += 1;
		});
		if n > 0 {
			let (cx, cy) = (sx / n as f32, sy / n as f32);
			self.graph.visit_nodes_mut(|node| {
				node.data.x -= cx;
				node.data.y -= cy;
			});
		}

		let groups = self.store.group_count();
		let mut placed = Vec::with_capacity(n);
		self.graph.visit_nodes(|node| {
			placed.push((node.data.user_data.slot, node.x(), node.y()));
		});
		for (slot, x, y) in placed {
			let z = layer_depth(self.store.group_index(&self.store.nodes()[slot].group), groups);
			self.store.set_position(slot, Vec3::new(x, y, z));
		}
	}
}

fn layer_depth(group: usize, groups: usize) -> f32 {
	let mid = groups.saturating_sub(1) as f32 / 2.0;
	(group as f32 - mid) * LAYER_SPACING
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphLink, GraphNode};

	impl GraphScene {
		fn is_running(&self) -> bool {
			self.running
		}
	}

	fn dataset() -> GraphDataset {
		GraphDataset {
			nodes: vec![
				GraphNode::new("Microsoft", "Company"),
				GraphNode::new("OpenAI", "Company"),
				GraphNode::new("Sam Altman", "Person"),
			],
			links: vec![
				GraphLink {
					source: "Microsoft".into(),
					target: "OpenAI".into(),
					relationship: None,
				},
				GraphLink {
					source: "Sam Altman".into(),
					target: "Nowhere".into(),
					relationship: None,
				},
			],
		}
	}

	#[test]
	fn nodes_are_placed_as_soon_as_the_scene_exists() {
		let scene = GraphScene::new(dataset());
		assert!(scene.store.nodes().iter().all(|n| n.position.is_some()));
		let resolved: Vec<_> = scene.links.iter().map(|l| (l.source, l.target)).collect();
		assert_eq!(resolved, [(0, 1)]);
	}

	#[test]
	fn groups_sit_on_separate_layers() {
		let scene = GraphScene::new(dataset());
		let z = |id: &str| scene.store.lookup(id).and_then(|n| n.position).unwrap().z;
		assert_eq!(z("Microsoft"), z("OpenAI"));
		assert_eq!(z("Microsoft"), -z("Sam Altman"));
		assert_ne!(z("Microsoft"), z("Sam Altman"));
	}

	#[test]
	fn settles_exactly_once_after_cooldown() {
		let mut scene = GraphScene::new(dataset());
		let settled: Vec<bool> = (0..COOLDOWN_TICKS * 2).map(|_| scene.tick(0.016)).collect();
		assert_eq!(settled.iter().filter(|s| **s).count(), 1);
		assert!(!scene.is_running());
	}

	#[test]
	fn empty_graph_still_settles() {
		let mut scene = GraphScene::new(GraphDataset::default());
		assert!((0..COOLDOWN_TICKS).any(|_| scene.tick(0.016)));
	}

	#[test]
	fn single_group_sits_on_the_origin_plane() {
		assert_eq!(layer_depth(0, 1), 0.0);
		assert_eq!(layer_depth(0, 3), -LAYER_SPACING);
		assert_eq!(layer_depth(2, 3), LAYER_SPACING);
	}
}
