use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, warn};

use crate::api::{HttpChatBackend, fetch_graph};
use crate::components::chat_overlay::ChatOverlay;
use crate::components::graph_view::GraphView;
use crate::config::ApiConfig;
use crate::focus::FocusSignal;
use crate::graph::GraphDataset;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<ApiConfig>().unwrap_or_else(ApiConfig::from_build_env);
	let client = reqwest::Client::new();

	// The two slots the camera director waits on.
	let dataset = RwSignal::new(None::<GraphDataset>);
	let focus = RwSignal::new(None::<FocusSignal>);

	let (graph_client, graph_url) = (client.clone(), config.graph_url.clone());
	spawn_local(async move {
		match fetch_graph(&graph_client, &graph_url).await {
			Ok(graph) => {
				if graph.is_empty() {
					warn!("Graph at {} has no nodes", graph_url);
				}
				dataset.set(Some(graph));
			}
			Err(err) => {
				error!("Failed to fetch graph: {err}");
				dataset.set(Some(GraphDataset::default()));
			}
		}
	});

	let backend = HttpChatBackend::new(client, config.chat_url);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<GraphView data=dataset focus=focus fullscreen=true />
				<div class="graph-overlay">
					<h1>"SILICON VALLEY"</h1>
					<p class="subtitle">"INSIDER KNOWLEDGE GRAPH"</p>
				</div>
				<div class="chat-layer">
					<ChatOverlay backend=backend on_focus=focus.write_only() />
				</div>
			</div>
		</ErrorBoundary>
	}
}
