// Form state - the URL slot list and the status banner
//
// This module owns the data model: a bounded, ordered list of URL-entry
// slots and a single last-write-wins status message. All operations are
// synchronous whole-state mutations; the async shorten machinery in
// `runner` commits its results through the methods here.

/// Maximum number of URL slots the form ever shows
pub const MAX_SLOTS: usize = 5;

/// Slot identifier, unique within the current list
pub type SlotId = u32;

/// Severity of a status banner message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
    /// No message is being shown
    #[default]
    None,
}

/// The single transient message surfaced after any user action.
///
/// Last-write-wins: every action overwrites the previous message, most
/// operations clear it up front. There is no queue and no auto-expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Warning,
        }
    }

    /// True when there is nothing to display
    pub fn is_empty(&self) -> bool {
        self.severity == Severity::None || self.text.is_empty()
    }
}

/// One URL-entry row with its own input, result, and status flags
#[derive(Debug, Clone)]
pub struct UrlSlot {
    /// Unique within the list; never reused while the owning slot exists
    pub id: SlotId,
    /// User-entered long URL, may be empty
    pub original_url: String,
    /// Result of the last successful shorten; cleared on edit
    pub shortened_url: String,
    /// True while a single-slot shorten is in flight
    pub is_loading: bool,
    /// True for a 2-second window after a successful clipboard copy
    pub is_copied: bool,
    /// False when the last shorten attempt failed or was submitted empty
    pub is_valid: bool,
    /// Monotonic stamp bumped on creation and edit; guards stale timers
    pub generation: u64,
}

impl UrlSlot {
    fn new(id: SlotId, generation: u64) -> Self {
        Self {
            id,
            original_url: String::new(),
            shortened_url: String::new(),
            is_loading: false,
            is_copied: false,
            is_valid: true,
            generation,
        }
    }

    /// Trimmed input, the form the shorten operations act on
    pub fn trimmed_input(&self) -> &str {
        self.original_url.trim()
    }
}

/// Bounded, ordered list of URL slots (1..=MAX_SLOTS entries).
///
/// Ids are assigned "max existing id + 1" and grow monotonically across
/// add/remove churn; only `reset_all` restarts them at zero. Generations
/// come from a separate counter that never resets, so a pending timer keyed
/// by (id, generation) can never match a slot it was not scheduled for.
#[derive(Debug, Clone)]
pub struct SlotList {
    slots: Vec<UrlSlot>,
    next_generation: u64,
}

impl SlotList {
    /// Seed the form with MAX_SLOTS empty slots, ids 0..MAX_SLOTS
    pub fn new() -> Self {
        let mut list = Self {
            slots: Vec::with_capacity(MAX_SLOTS),
            next_generation: 0,
        };
        list.seed();
        list
    }

    fn seed(&mut self) {
        self.slots.clear();
        for id in 0..MAX_SLOTS as SlotId {
            let generation = self.take_generation();
            self.slots.push(UrlSlot::new(id, generation));
        }
    }

    fn take_generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        generation
    }

    fn max_id(&self) -> SlotId {
        self.slots.iter().map(|s| s.id).max().unwrap_or(0)
    }

    pub fn slots(&self) -> &[UrlSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, id: SlotId) -> Option<&UrlSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut UrlSlot> {
        self.slots.iter_mut().find(|s| s.id == id)
    }

    /// True if any slot has a single-slot shorten in flight
    pub fn any_loading(&self) -> bool {
        self.slots.iter().any(|s| s.is_loading)
    }

    /// Append one empty slot with a fresh id, up to MAX_SLOTS.
    ///
    /// At the limit this is a no-op apart from the warning message.
    pub fn add_slot(&mut self) -> StatusMessage {
        if self.slots.len() >= MAX_SLOTS {
            return StatusMessage::warning("Maximum 5 URL fields allowed.");
        }
        let id = self.max_id() + 1;
        let generation = self.take_generation();
        self.slots.push(UrlSlot::new(id, generation));
        StatusMessage::info("New URL field added.")
    }

    /// Remove the slot matching `id`, then refill back up to MAX_SLOTS.
    ///
    /// Fresh ids start at one greater than the maximum id present before
    /// the removal and increment per refilled slot, so the list stays
    /// unique even when refilling from a short list. The visible list
    /// therefore never shrinks below MAX_SLOTS once a removal has occurred.
    pub fn remove_slot(&mut self, id: SlotId) -> StatusMessage {
        let mut next_id = self.max_id() + 1;
        self.slots.retain(|s| s.id != id);
        while self.slots.len() < MAX_SLOTS {
            let generation = self.take_generation();
            self.slots.push(UrlSlot::new(next_id, generation));
            next_id += 1;
        }
        self.slots.truncate(MAX_SLOTS);
        StatusMessage::info("URL field removed.")
    }

    /// Replace a slot's input text.
    ///
    /// Editing always resets validity, clears any previous result and
    /// copied flag, and bumps the generation so pending copy-flash timers
    /// for the old content are dropped.
    pub fn edit_slot(&mut self, id: SlotId, text: impl Into<String>) {
        let generation = self.take_generation();
        if let Some(slot) = self.get_mut(id) {
            slot.original_url = text.into();
            slot.is_valid = true;
            slot.shortened_url.clear();
            slot.is_copied = false;
            slot.generation = generation;
        }
    }

    /// Replace the entire list with MAX_SLOTS fresh empty slots (ids 0..4)
    pub fn reset_all(&mut self) -> StatusMessage {
        self.seed();
        StatusMessage::info("All fields cleared.")
    }

    /// Mark a slot copied and return the generation the copy was made at
    pub fn set_copied(&mut self, id: SlotId) -> Option<u64> {
        let slot = self.get_mut(id)?;
        slot.is_copied = true;
        Some(slot.generation)
    }

    /// Clear the copied flag if the slot still exists at `generation`.
    ///
    /// Stale resets (slot removed, edited, or the whole list reset since
    /// the copy) are dropped silently.
    pub fn clear_copied_if_current(&mut self, id: SlotId, generation: u64) {
        if let Some(slot) = self.get_mut(id) {
            if slot.generation == generation {
                slot.is_copied = false;
            }
        }
    }
}

impl Default for SlotList {
    fn default() -> Self {
        Self::new()
    }
}
