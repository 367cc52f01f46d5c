use log::{debug, warn};

use super::entity::normalize_entity;
use super::transcript::{Role, Transcript};
use crate::api::{ChatReply, ChatRequest, HistoryTurn};
use crate::error::ApiError;
use crate::focus::{FocusClock, FocusSignal};

#[derive(Clone, Debug, PartialEq)]
pub struct ChatConfig {
	/// Prior transcript entries sent along with each question.
	pub history_window: usize,
	pub greeting: String,
	pub error_notice: String,
	/// Entity values meaning "nothing to focus", compared case-insensitively.
	pub sentinels: Vec<String>,
}

impl Default for ChatConfig {
	fn default() -> Self {
		Self {
			history_window: 5,
			greeting: "System online. Connected to the knowledge graph. Ask me anything.".into(),
			error_notice: "Could not reach the knowledge graph assistant. Please try again.".into(),
			sentinels: vec!["None".into(), "Global Context".into()],
		}
	}
}

/// Running conversation with the chat backend.
///
/// An exchange is split into [`begin`](Self::begin), which records the
/// question and builds the request, and [`finish`](Self::finish), which
/// records whatever came back. Exchanges may finish in any order.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
	config: ChatConfig,
	transcript: Transcript,
	in_flight: usize,
	clock: FocusClock,
}

impl ChatSession {
	pub fn new(config: ChatConfig) -> Self {
		let mut transcript = Transcript::default();
		if !config.greeting.is_empty() {
			transcript.push(Role::System, config.greeting.clone());
		}
		Self {
			config,
			transcript,
			in_flight: 0,
			clock: FocusClock::default(),
		}
	}

	pub fn transcript(&self) -> &Transcript {
		&self.transcript
	}

	pub fn is_busy(&self) -> bool {
		self.in_flight > 0
	}

	/// Record `question` and build its request. Blank questions are ignored.
	pub fn begin(&mut self, question: &str) -> Option<ChatRequest> {
		let question = question.trim();
		if question.is_empty() {
			return None;
		}

		let history = self
			.transcript
			.tail(self.config.history_window)
			.iter()
			.map(|entry| HistoryTurn {
				role: entry.role.backend_name(),
				text: entry.text.clone(),
			})
			.collect();
		self.transcript.push(Role::User, question);
		self.in_flight += 1;

		Some(ChatRequest {
			question: question.to_owned(),
			history,
		})
	}

	/// Record the outcome of one exchange; returns a focus request when the
	/// reply names an entity.
	pub fn finish(&mut self, outcome: Result<ChatReply, ApiError>, now_ms: f64) -> Option<FocusSignal> {
		self.in_flight = self.in_flight.saturating_sub(1);

		let reply = match outcome {
			Ok(reply) => reply,
			Err(err) => {
				warn!("Chat exchange failed: {err}");
				self.transcript.push(Role::System, self.config.error_notice.clone());
				return None;
			}
		};
		self.transcript.push(Role::System, reply.answer);

		let sentinels: Vec<&str> = self.config.sentinels.iter().map(String::as_str).collect();
		let target = normalize_entity(reply.entity.as_deref()?, &sentinels)?;
		debug!("Chat reply points at '{target}'");
		Some(self.clock.signal(target, now_ms))
	}
}
