use serde::{Deserialize, Serialize};

use super::send_json;
use crate::error::ApiError;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest {
	pub question: String,
	pub history: Vec<HistoryTurn>,
}

/// One prior turn in the backend's role vocabulary (`human` / `ai`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryTurn {
	pub role: &'static str,
	pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChatReply {
	#[serde(default)]
	pub answer: String,
	/// Free-form entity reference, e.g. `"['Acme Corp', 'Foo']"`.
	#[serde(default)]
	pub entity: Option<String>,
}

/// Something that can answer a chat request.
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
	async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpChatBackend {
	client: reqwest::Client,
	url: String,
}

impl HttpChatBackend {
	pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
		Self {
			client,
			url: url.into(),
		}
	}
}

impl ChatBackend for HttpChatBackend {
	async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
		send_json(self.client.post(&self.url).json(request), &self.url).await
	}
}
