//! HTTP clients for the graph and chat services.

mod chat;
mod graph;

pub use chat::{ChatBackend, ChatReply, ChatRequest, HistoryTurn, HttpChatBackend};
pub use graph::fetch_graph;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

async fn send_json<T: DeserializeOwned>(
	request: reqwest::RequestBuilder,
	url: &str,
) -> Result<T, ApiError> {
	let response = request.send().await.map_err(|source| ApiError::Transport {
		url: url.to_owned(),
		source,
	})?;
	let status = response.status();
	if !status.is_success() {
		return Err(ApiError::Status {
			url: url.to_owned(),
			status: status.as_u16(),
		});
	}
	response.json::<T>().await.map_err(|source| ApiError::Decode {
		url: url.to_owned(),
		source,
	})
}
