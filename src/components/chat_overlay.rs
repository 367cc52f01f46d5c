use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions};

use crate::api::HttpChatBackend;
use crate::chat::{self, ChatConfig, ChatSession, Role};
use crate::focus::FocusSignal;

/// Chat panel; replies that name an entity are published to `on_focus`.
#[component]
pub fn ChatOverlay(backend: HttpChatBackend, on_focus: WriteSignal<Option<FocusSignal>>) -> impl IntoView {
	let session = RwSignal::new(ChatSession::new(ChatConfig::default()));
	let (query, set_query) = signal(String::new());
	let bottom_ref = NodeRef::<leptos::html::Div>::new();

	// Keep the newest entry in view.
	Effect::new(move |_| {
		session.with(|s| s.transcript().len());
		if let Some(bottom) = bottom_ref.get() {
			let options = ScrollIntoViewOptions::new();
			options.set_behavior(ScrollBehavior::Smooth);
			bottom.scroll_into_view_with_scroll_into_view_options(&options);
		}
	});

	let submit = move || {
		let question = query.get_untracked();
		if question.trim().is_empty() {
			return;
		}
		set_query.set(String::new());
		let backend = backend.clone();
		spawn_local(async move {
			if let Some(signal) = chat::ask(&session, &backend, &question, js_sys::Date::now).await {
				on_focus.set(Some(signal));
			}
		});
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			submit();
		}
	};

	view! {
		<div class="chat-panel">
			<div class="chat-header">
				<h2>"INSIDER_AI"</h2>
				<Show when=move || session.with(|s| s.is_busy())>
					<span class="chat-busy">"thinking..."</span>
				</Show>
			</div>

			<div class="chat-log">
				{move || {
					session
						.with(|s| {
							s.transcript()
								.entries()
								.iter()
								.map(|entry| {
									let class = match entry.role {
										Role::User => "chat-entry chat-entry-user",
										Role::System => "chat-entry chat-entry-system",
									};
									let text = entry.text.clone();
									view! { <div class=class>{text}</div> }
								})
								.collect_view()
						})
				}}
				<div node_ref=bottom_ref />
			</div>

			<div class="chat-input">
				<input
					type="text"
					placeholder="Ask about the graph..."
					prop:value=query
					on:input=move |ev| set_query.set(event_target_value(&ev))
					on:keydown=on_keydown
				/>
			</div>
		</div>
	}
}
