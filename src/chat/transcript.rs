#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
	User,
	/// Assistant answers and local notices alike.
	System,
}

impl Role {
	/// Name of this role in the chat backend's vocabulary.
	pub fn backend_name(self) -> &'static str {
		match self {
			Role::User => "human",
			Role::System => "ai",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
	pub role: Role,
	pub text: String,
}

/// Append-only conversation log, in completion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
	entries: Vec<TranscriptEntry>,
}

impl Transcript {
	pub fn push(&mut self, role: Role, text: impl Into<String>) {
		self.entries.push(TranscriptEntry {
			role,
			text: text.into(),
		});
	}

	pub fn entries(&self) -> &[TranscriptEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// The last `n` entries, oldest first.
	pub fn tail(&self, n: usize) -> &[TranscriptEntry] {
		&self.entries[self.entries.len().saturating_sub(n)..]
	}
}
