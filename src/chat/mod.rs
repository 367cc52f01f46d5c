//! Conversation with the chat backend and entity extraction from its replies.

mod entity;
mod session;
mod transcript;

use std::cell::RefCell;

use leptos::prelude::*;

pub use session::{ChatConfig, ChatSession};
pub use transcript::Role;

use crate::api::ChatBackend;
use crate::focus::FocusSignal;

/// Shared access to a [`ChatSession`] that is never held across an await.
pub trait SessionHandle {
	fn with_session<R>(&self, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R>;
}

impl SessionHandle for RwSignal<ChatSession> {
	fn with_session<R>(&self, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R> {
		self.try_update(f)
	}
}

impl SessionHandle for RefCell<ChatSession> {
	fn with_session<R>(&self, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R> {
		Some(f(&mut self.borrow_mut()))
	}
}

/// Run one question/answer exchange.
///
/// The question lands in the transcript immediately; the reply (or an error
/// notice) lands when the backend answers. Returns the focus request carried
/// by the reply, if any.
pub async fn ask<S, B>(
	session: &S,
	backend: &B,
	question: &str,
	now_ms: impl Fn() -> f64,
) -> Option<FocusSignal>
where
	S: SessionHandle,
	B: ChatBackend,
{
	let request = session.with_session(|s| s.begin(question)).flatten()?;
	let outcome = backend.send(&request).await;
	session.with_session(|s| s.finish(outcome, now_ms())).flatten()
}
