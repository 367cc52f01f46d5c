/// Reduce a raw entity reference to a single node id.
///
/// Bracket and quote characters are dropped, only the first comma-separated
/// candidate is kept, and empty or sentinel results yield `None`.
pub fn normalize_entity(raw: &str, sentinels: &[&str]) -> Option<String> {
	let cleaned: String = raw
		.chars()
		.filter(|c| !matches!(c, '[' | ']' | '\'' | '"'))
		.collect();
	let first = cleaned.split(',').next().unwrap_or_default().trim();
	if first.is_empty() || sentinels.iter().any(|s| s.eq_ignore_ascii_case(first)) {
		return None;
	}
	Some(first.to_owned())
}
