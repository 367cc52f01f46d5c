use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

use super::send_json;
use crate::error::ApiError;
use crate::graph::{GraphDataset, GraphLink, GraphNode};

const DEFAULT_GROUP: &str = "Entity";

#[derive(Debug, Deserialize)]
struct GraphPayload {
	#[serde(default)]
	nodes: Vec<NodePayload>,
	#[serde(default)]
	links: Vec<LinkPayload>,
}

#[derive(Debug, Deserialize)]
struct NodePayload {
	id: String,
	#[serde(default)]
	group: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinkPayload {
	source: String,
	target: String,
	#[serde(default)]
	relationship: Option<String>,
}

impl From<GraphPayload> for GraphDataset {
	fn from(payload: GraphPayload) -> Self {
		// Duplicate ids keep their first slot but take the last payload.
		let mut slots: HashMap<String, usize> = HashMap::new();
		let mut nodes: Vec<GraphNode> = Vec::with_capacity(payload.nodes.len());
		for node in payload.nodes {
			let group = node
				.group
				.filter(|g| !g.is_empty())
				.unwrap_or_else(|| DEFAULT_GROUP.to_owned());
			match slots.get(&node.id) {
				Some(&i) => nodes[i].group = group,
				None => {
					slots.insert(node.id.clone(), nodes.len());
					nodes.push(GraphNode::new(node.id, group));
				}
			}
		}

		let links = payload
			.links
			.into_iter()
			.map(|l| GraphLink {
				source: l.source,
				target: l.target,
				relationship: l.relationship,
			})
			.collect();

		GraphDataset { nodes, links }
	}
}

/// Fetch the whole graph as one snapshot.
pub async fn fetch_graph(client: &reqwest::Client, url: &str) -> Result<GraphDataset, ApiError> {
	let payload: GraphPayload = send_json(client.get(url), url).await?;
	debug!(
		"Fetched {} nodes and {} links from {}",
		payload.nodes.len(),
		payload.links.len(),
		url
	);
	Ok(payload.into())
}
