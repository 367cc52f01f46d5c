use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub group: String,
	/// `None` until the layout simulation has taken its first step.
	pub position: Option<Vec3>,
}

impl GraphNode {
	pub fn new(id: impl Into<String>, group: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			group: group.into(),
			position: None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub relationship: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphDataset {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphDataset {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
