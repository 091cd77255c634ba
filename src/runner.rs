// Shorten operation runner
//
// Bridges the synchronous slot state and the simulated async backend.
// Starting an operation mutates the slots immediately (loading flags,
// empty-input guard), spawns the backend call, and hands back a status
// message; the spawned task reports completion as an AppEvent which the
// UI loop commits through the apply_* functions here.
//
// shorten_one commits per slot as each call finishes. shorten_all is
// fan-out/fan-in: every attempt is joined before a single atomic commit,
// so no partial batch state is ever rendered.

use crate::events::{AppEvent, ShortenResult};
use crate::form::{SlotId, SlotList, StatusMessage};
use crate::shorten::{self, InvalidUrlError};
use futures::future::join_all;
use std::ops::Range;
use tokio::sync::mpsc;

/// Spawns simulated shorten calls and routes their completions back to the
/// UI loop over the event channel.
#[derive(Clone)]
pub struct ShortenRunner {
    event_tx: mpsc::Sender<AppEvent>,
    origin: String,
    delay_ms: Range<u64>,
}

impl ShortenRunner {
    pub fn new(event_tx: mpsc::Sender<AppEvent>, origin: String, delay_ms: Range<u64>) -> Self {
        Self {
            event_tx,
            origin,
            delay_ms,
        }
    }

    /// Start a single-slot shorten.
    ///
    /// Marks the slot loading and clears its copied flag. Trimmed-empty
    /// input fails immediately without touching the simulated backend;
    /// otherwise the call is spawned and the result arrives later as
    /// [`AppEvent::ShortenComplete`]. Returns the status message to show
    /// now (cleared, or the empty-input error).
    pub fn shorten_one(&self, slots: &mut SlotList, id: SlotId) -> StatusMessage {
        let url = {
            let Some(slot) = slots.get_mut(id) else {
                return StatusMessage::none();
            };
            if slot.is_loading {
                // Already in flight; ignore the re-trigger
                return StatusMessage::none();
            }
            slot.is_loading = true;
            slot.is_copied = false;
            slot.trimmed_input().to_string()
        };

        if url.is_empty() {
            if let Some(slot) = slots.get_mut(id) {
                slot.is_loading = false;
                slot.is_valid = false;
            }
            return StatusMessage::error("URL field cannot be empty.");
        }

        tracing::debug!(id, url = %url, "shorten started");
        let tx = self.event_tx.clone();
        let origin = self.origin.clone();
        let delay_ms = self.delay_ms.clone();
        tokio::spawn(async move {
            let result = shorten::simulate_shorten(&url, &origin, delay_ms).await;
            let _ = tx.send(AppEvent::ShortenComplete { id, result }).await;
        });

        StatusMessage::none()
    }

    /// Start a batch shorten over every slot with non-empty trimmed input.
    ///
    /// Empty slots pass through unchanged - they are not marked invalid.
    /// All attempts are joined inside the spawned task and committed in one
    /// [`AppEvent::BatchComplete`]; the slots are not flagged loading
    /// individually, matching the no-intermediate-render contract. Returns
    /// the cleared status message.
    pub fn shorten_all(&self, slots: &SlotList) -> StatusMessage {
        let candidates: Vec<(SlotId, String)> = slots
            .slots()
            .iter()
            .filter(|s| !s.trimmed_input().is_empty())
            .map(|s| (s.id, s.trimmed_input().to_string()))
            .collect();
        let had_candidates = !candidates.is_empty();

        tracing::debug!(count = candidates.len(), "batch shorten started");
        let tx = self.event_tx.clone();
        let origin = self.origin.clone();
        let delay_ms = self.delay_ms.clone();
        tokio::spawn(async move {
            let attempts = candidates.into_iter().map(|(id, url)| {
                let origin = origin.clone();
                let delay_ms = delay_ms.clone();
                async move {
                    let result = shorten::simulate_shorten(&url, &origin, delay_ms).await;
                    (id, result)
                }
            });
            let results = join_all(attempts).await;
            let _ = tx
                .send(AppEvent::BatchComplete {
                    results,
                    had_candidates,
                })
                .await;
        });

        StatusMessage::none()
    }
}

/// Commit a single-slot result to the list and produce the banner message
pub fn apply_one(slots: &mut SlotList, id: SlotId, result: ShortenResult) -> StatusMessage {
    let Some(slot) = slots.get_mut(id) else {
        // Slot removed while the call was in flight; nothing to commit
        return StatusMessage::none();
    };
    slot.is_loading = false;
    match result {
        Ok(short_url) => {
            tracing::info!(id, short_url = %short_url, "shorten succeeded");
            slot.shortened_url = short_url;
            slot.is_valid = true;
            StatusMessage::success("URL shortened successfully!")
        }
        Err(err) => {
            tracing::warn!(id, "shorten failed: {err}");
            slot.is_valid = false;
            StatusMessage::error(err.to_string())
        }
    }
}

/// Commit a joined batch to the list atomically and produce the banner.
///
/// The banner reflects whether any candidates existed when the batch
/// started, not whether every candidate succeeded: failed slots are marked
/// invalid but the batch still reports success. Preserved as observed.
pub fn apply_batch(
    slots: &mut SlotList,
    results: Vec<(SlotId, ShortenResult)>,
    had_candidates: bool,
) -> StatusMessage {
    for (id, result) in results {
        let Some(slot) = slots.get_mut(id) else {
            continue;
        };
        slot.is_loading = false;
        match result {
            Ok(short_url) => {
                slot.shortened_url = short_url;
                slot.is_valid = true;
            }
            Err(InvalidUrlError) => {
                slot.is_valid = false;
            }
        }
    }

    if had_candidates {
        tracing::info!("batch shorten committed");
        StatusMessage::success("All valid URLs processed!")
    } else {
        StatusMessage::error("No URLs to shorten. Please enter at least one URL.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Severity;
    use crate::shorten::{DEFAULT_DELAY_MS, DEFAULT_ORIGIN};

    fn runner() -> (ShortenRunner, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (
            ShortenRunner::new(tx, DEFAULT_ORIGIN.to_string(), DEFAULT_DELAY_MS),
            rx,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_fails_without_backend_call() {
        let (runner, mut rx) = runner();
        let mut slots = SlotList::new();

        let msg = runner.shorten_one(&mut slots, 0);
        assert_eq!(msg.severity, Severity::Error);
        assert_eq!(msg.text, "URL field cannot be empty.");

        let slot = slots.get(0).unwrap();
        assert!(!slot.is_loading);
        assert!(!slot.is_valid);

        // No task was spawned, so no completion ever arrives
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn whitespace_only_input_counts_as_empty() {
        let (runner, _rx) = runner();
        let mut slots = SlotList::new();
        slots.edit_slot(0, "   ");

        let msg = runner.shorten_one(&mut slots, 0);
        assert_eq!(msg.severity, Severity::Error);
        assert!(!slots.get(0).unwrap().is_valid);
    }

    #[tokio::test(start_paused = true)]
    async fn shorten_one_commits_success() {
        let (runner, mut rx) = runner();
        let mut slots = SlotList::new();
        slots.edit_slot(0, "https://example.com/very/long/path");

        let msg = runner.shorten_one(&mut slots, 0);
        assert!(msg.is_empty());
        assert!(slots.get(0).unwrap().is_loading);

        let AppEvent::ShortenComplete { id, result } = rx.recv().await.unwrap() else {
            panic!("expected ShortenComplete");
        };
        let msg = apply_one(&mut slots, id, result);
        assert_eq!(msg.severity, Severity::Success);
        assert_eq!(msg.text, "URL shortened successfully!");

        let slot = slots.get(0).unwrap();
        assert!(!slot.is_loading);
        assert!(slot.is_valid);
        assert!(slot.shortened_url.starts_with("https://short.url/"));
    }

    #[tokio::test(start_paused = true)]
    async fn shorten_one_commits_failure() {
        let (runner, mut rx) = runner();
        let mut slots = SlotList::new();
        slots.edit_slot(2, "notaurl");

        runner.shorten_one(&mut slots, 2);
        let AppEvent::ShortenComplete { id, result } = rx.recv().await.unwrap() else {
            panic!("expected ShortenComplete");
        };
        let msg = apply_one(&mut slots, id, result);
        assert_eq!(msg.severity, Severity::Error);
        assert_eq!(
            msg.text,
            "Please enter a valid URL starting with http:// or https://"
        );

        let slot = slots.get(2).unwrap();
        assert!(!slot.is_loading);
        assert!(!slot.is_valid);
        assert!(slot.shortened_url.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shorten_one_ignores_retrigger_while_loading() {
        let (runner, mut rx) = runner();
        let mut slots = SlotList::new();
        slots.edit_slot(0, "https://example.com");

        runner.shorten_one(&mut slots, 0);
        runner.shorten_one(&mut slots, 0); // in flight; must not spawn again

        let first = rx.recv().await;
        assert!(first.is_some());
        assert!(rx.try_recv().is_err(), "only one completion expected");
    }

    #[tokio::test(start_paused = true)]
    async fn batch_with_no_input_reports_error_and_marks_nothing() {
        let (runner, mut rx) = runner();
        let mut slots = SlotList::new();

        runner.shorten_all(&slots);
        let AppEvent::BatchComplete {
            results,
            had_candidates,
        } = rx.recv().await.unwrap()
        else {
            panic!("expected BatchComplete");
        };
        assert!(results.is_empty());

        let msg = apply_batch(&mut slots, results, had_candidates);
        assert_eq!(msg.severity, Severity::Error);
        assert_eq!(msg.text, "No URLs to shorten. Please enter at least one URL.");
        assert!(slots.slots().iter().all(|s| s.is_valid));
    }

    #[tokio::test(start_paused = true)]
    async fn batch_mixed_inputs_reports_success_overall() {
        let (runner, mut rx) = runner();
        let mut slots = SlotList::new();
        slots.edit_slot(0, "https://a.com");
        slots.edit_slot(1, "notaurl");

        runner.shorten_all(&slots);
        let AppEvent::BatchComplete {
            results,
            had_candidates,
        } = rx.recv().await.unwrap()
        else {
            panic!("expected BatchComplete");
        };
        assert_eq!(results.len(), 2);

        let msg = apply_batch(&mut slots, results, had_candidates);
        // Banner asymmetry preserved: candidates existed, so it is a success
        assert_eq!(msg.severity, Severity::Success);
        assert_eq!(msg.text, "All valid URLs processed!");

        let good = slots.get(0).unwrap();
        assert!(good.is_valid);
        assert!(good.shortened_url.starts_with("https://short.url/"));

        let bad = slots.get(1).unwrap();
        assert!(!bad.is_valid);
        assert!(bad.shortened_url.is_empty());

        // Untouched empty slots stay valid
        assert!(slots.get(2).unwrap().is_valid);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_for_removed_slot_is_dropped() {
        let (runner, mut rx) = runner();
        let mut slots = SlotList::new();
        slots.edit_slot(3, "https://example.com");

        runner.shorten_one(&mut slots, 3);
        slots.remove_slot(3);

        let AppEvent::ShortenComplete { id, result } = rx.recv().await.unwrap() else {
            panic!("expected ShortenComplete");
        };
        let msg = apply_one(&mut slots, id, result);
        assert!(msg.is_empty());
        assert_eq!(slots.len(), 5);
        assert!(slots.slots().iter().all(|s| s.shortened_url.is_empty()));
    }
}
