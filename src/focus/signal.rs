/// Most recently requested focus target.
///
/// Two signals for the same `id` stay distinct events because `timestamp`
/// strictly increases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusSignal {
	pub id: String,
	pub timestamp: u64,
}

/// Mints strictly increasing millisecond timestamps, even when the wall clock
/// repeats or steps backwards.
#[derive(Clone, Debug, Default)]
pub struct FocusClock {
	last: Option<u64>,
}

impl FocusClock {
	pub fn next(&mut self, now_ms: f64) -> u64 {
		let now = if now_ms.is_finite() && now_ms > 0.0 {
			now_ms as u64
		} else {
			0
		};
		let stamp = match self.last {
			Some(last) if now <= last => last + 1,
			_ => now,
		};
		self.last = Some(stamp);
		stamp
	}

	pub fn signal(&mut self, id: String, now_ms: f64) -> FocusSignal {
		FocusSignal {
			id,
			timestamp: self.next(now_ms),
		}
	}
}
