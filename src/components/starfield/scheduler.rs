//! Frame pacing.
//!
//! The loop never runs on a fixed-rate timer. Each tick, once fully done,
//! asks the [`Timer`] for one more callback after the frame interval, so a
//! slow frame pushes the next one back instead of queueing a backlog.
//!
//! Cancellation is cooperative: every `start` opens a new generation and
//! callbacks carrying an older generation are ignored when they fire.

/// Handle passed through the timer back into the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickToken {
	generation: u64,
}

/// Something that can call back into the loop after a delay.
pub trait Timer {
	/// Call back with `token` after `delay_ms`.
	fn schedule(&mut self, delay_ms: f64, token: TickToken);
}

/// Loop lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
	/// No tick will run.
	#[default]
	Stopped,
	/// A tick is queued or running.
	Running,
}

/// Self-rescheduling ticker with a target interval.
#[derive(Clone, Debug)]
pub struct Ticker {
	interval_ms: f64,
	state: LoopState,
	generation: u64,
}

impl Ticker {
	/// Stopped ticker with `interval_ms` between ticks.
	pub fn new(interval_ms: f64) -> Self {
		Self {
			interval_ms: interval_ms.max(0.0),
			state: LoopState::Stopped,
			generation: 0,
		}
	}

	/// Current lifecycle state.
	pub fn state(&self) -> LoopState {
		self.state
	}

	/// Delay between a finished tick and the next.
	pub fn interval_ms(&self) -> f64 {
		self.interval_ms
	}

	/// Begin a new schedule with an immediate first tick.
	///
	/// Returns `false`, scheduling nothing, if already running.
	pub fn start<T: Timer + ?Sized>(&mut self, timer: &mut T) -> bool {
		if self.state == LoopState::Running {
			return false;
		}
		self.generation = self.generation.wrapping_add(1);
		self.state = LoopState::Running;
		timer.schedule(0.0, self.token());
		true
	}

	/// Halt. Any callback already queued becomes a no-op.
	pub fn stop(&mut self) -> bool {
		let was_running = self.state == LoopState::Running;
		self.state = LoopState::Stopped;
		was_running
	}

	/// Whether a firing callback should run a tick.
	pub fn accepts(&self, token: TickToken) -> bool {
		self.state == LoopState::Running && token.generation == self.generation
	}

	/// Queue the next tick after a completed one.
	pub fn reschedule<T: Timer + ?Sized>(&self, timer: &mut T) {
		if self.state == LoopState::Running {
			timer.schedule(self.interval_ms, self.token());
		}
	}

	fn token(&self) -> TickToken {
		TickToken {
			generation: self.generation,
		}
	}
}

/// Virtual clock for driving the loop without real waits.
///
/// Callbacks are queued with their due time; [`ManualTimer::advance`] moves
/// the clock forward and hands back the due tokens one at a time, in order.
#[derive(Debug, Default)]
pub struct ManualTimer {
	now_ms: f64,
	pending: Vec<(f64, TickToken)>,
}

impl ManualTimer {
	/// Clock at zero with nothing queued.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current virtual time.
	pub fn now_ms(&self) -> f64 {
		self.now_ms
	}

	/// Number of queued callbacks.
	pub fn pending(&self) -> usize {
		self.pending.len()
	}

	/// Pop the earliest callback due at or before `until_ms`, moving the
	/// clock to its due time. Returns `None` (with the clock at `until_ms`)
	/// once nothing more is due.
	pub fn next_due(&mut self, until_ms: f64) -> Option<TickToken> {
		let idx = self
			.pending
			.iter()
			.enumerate()
			.filter(|(_, (due, _))| *due <= until_ms)
			.min_by(|a, b| a.1.0.total_cmp(&b.1.0))
			.map(|(i, _)| i);

		match idx {
			Some(i) => {
				let (due, token) = self.pending.remove(i);
				self.now_ms = self.now_ms.max(due);
				Some(token)
			}
			None => {
				self.now_ms = self.now_ms.max(until_ms);
				None
			}
		}
	}

	/// Run `fire` for every callback due within the next `duration_ms`.
	/// Callbacks scheduled by `fire` itself are honored if they fall inside
	/// the window. Returns how many callbacks fired.
	pub fn advance<F>(&mut self, duration_ms: f64, mut fire: F) -> usize
	where
		F: FnMut(&mut Self, TickToken),
	{
		let until = self.now_ms + duration_ms;
		let mut fired = 0;
		while let Some(token) = self.next_due(until) {
			fire(self, token);
			fired += 1;
		}
		fired
	}
}

impl Timer for ManualTimer {
	fn schedule(&mut self, delay_ms: f64, token: TickToken) {
		self.pending.push((self.now_ms + delay_ms.max(0.0), token));
	}
}
