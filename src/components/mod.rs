pub mod chat_overlay;
pub mod graph_view;
