//! Build-time configuration of the service endpoints.
//!
//! `INSIDER_API_BASE` sets the host/port shared by both services;
//! `INSIDER_GRAPH_URL` and `INSIDER_CHAT_URL` override single endpoints.

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	pub graph_url: String,
	pub chat_url: String,
}

impl ApiConfig {
	pub fn from_build_env() -> Self {
		Self::resolve(
			option_env!("INSIDER_API_BASE"),
			option_env!("INSIDER_GRAPH_URL"),
			option_env!("INSIDER_CHAT_URL"),
		)
	}

	fn resolve(base: Option<&str>, graph: Option<&str>, chat: Option<&str>) -> Self {
		let base = base
			.filter(|b| !b.trim().is_empty())
			.unwrap_or(DEFAULT_API_BASE)
			.trim_end_matches('/');
		Self {
			graph_url: graph
				.map(str::to_owned)
				.unwrap_or_else(|| format!("{base}/graph")),
			chat_url: chat
				.map(str::to_owned)
				.unwrap_or_else(|| format!("{base}/chat")),
		}
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::resolve(None, None, None)
	}
}
