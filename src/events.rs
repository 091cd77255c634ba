// Events that flow from spawned operations back to the UI loop
//
// All state lives on the single-threaded event loop; spawned tasks only
// perform the simulated backend call (or a timer sleep) and report back
// through this enum over an mpsc channel. Using an enum keeps the
// task-to-loop communication type-safe and pattern-matchable.

use crate::form::SlotId;
use crate::shorten::InvalidUrlError;

/// Outcome of one simulated shorten attempt
pub type ShortenResult = Result<String, InvalidUrlError>;

/// Main event type that flows through the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A single-slot shorten finished; commit the result to that slot
    ShortenComplete { id: SlotId, result: ShortenResult },

    /// A batch shorten finished; all attempts joined, commit atomically.
    /// `had_candidates` records whether any slot had non-empty input when
    /// the batch started - it decides the banner, not the per-slot results.
    BatchComplete {
        results: Vec<(SlotId, ShortenResult)>,
        had_candidates: bool,
    },

    /// The 2-second copied indicator for a slot should be cleared, provided
    /// the slot still exists at this generation
    CopyFlashExpired { id: SlotId, generation: u64 },
}
