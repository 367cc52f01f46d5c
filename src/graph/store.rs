use std::collections::HashMap;

use glam::Vec3;

use super::types::{GraphDataset, GraphNode};

/// The current graph snapshot plus an id index over it.
///
/// The snapshot is replaced wholesale on load; afterwards only node positions
/// change, written back by the layout simulation.
#[derive(Clone, Debug, Default)]
pub struct GraphDataStore {
	dataset: GraphDataset,
	index: HashMap<String, usize>,
	groups: Vec<String>,
}

impl GraphDataStore {
	pub fn new(dataset: GraphDataset) -> Self {
		let mut store = Self::default();
		store.replace(dataset);
		store
	}

	pub fn replace(&mut self, dataset: GraphDataset) {
		self.index = dataset
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.clone(), i))
			.collect();
		self.groups.clear();
		for node in &dataset.nodes {
			if !self.groups.contains(&node.group) {
				self.groups.push(node.group.clone());
			}
		}
		self.dataset = dataset;
	}

	/// Live node for `id` in the current snapshot; positions reflect the
	/// latest simulation step.
	pub fn lookup(&self, id: &str) -> Option<&GraphNode> {
		self.index.get(id).map(|&i| &self.dataset.nodes[i])
	}

	pub fn dataset(&self) -> &GraphDataset {
		&self.dataset
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.dataset.nodes
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Group ordinal in order of first appearance, used for colour and depth.
	pub fn group_index(&self, group: &str) -> usize {
		self.groups.iter().position(|g| g == group).unwrap_or(0)
	}

	pub fn group_count(&self) -> usize {
		self.groups.len()
	}

	pub fn set_position(&mut self, idx: usize, position: Vec3) {
		if let Some(node) = self.dataset.nodes.get_mut(idx) {
			node.position = Some(position);
		}
	}

	pub fn placed_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
		self.dataset.nodes.iter().filter_map(|n| n.position)
	}
}
