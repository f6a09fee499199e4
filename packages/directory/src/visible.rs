//! Visible-set refresh merging and stale-response guarding.
//!
//! The member list is polled periodically. A naive replace would
//! reshuffle marker order (breaking placement ordinals) and could yank
//! an open selection out from under the user, so refreshes are merged:
//! surviving members keep their slot, new members append, departed
//! members drop out.
//!
//! Network responses can also complete out of order — a slow reverse
//! geocode must not overwrite newer state. [`RequestGeneration`] issues
//! a token per request and only the latest token's result is applied.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::Member;

/// The visible member set, in stable insertion order.
#[derive(Debug, Default)]
pub struct VisibleSet {
    members: Vec<Member>,
}

impl VisibleSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Merges a refreshed snapshot into the current set.
    ///
    /// Members present in both keep their current position and take the
    /// snapshot's data; members only in the snapshot append in snapshot
    /// order; members absent from the snapshot are removed. Unrelated
    /// session state (selection, filters) held elsewhere survives
    /// untouched because ids keep their identity.
    pub fn merge(&mut self, snapshot: Vec<Member>) {
        let mut incoming: Vec<Option<Member>> = snapshot.into_iter().map(Some).collect();

        let mut merged: Vec<Member> = Vec::with_capacity(incoming.len());
        for current in self.members.drain(..) {
            if let Some(slot) = incoming
                .iter_mut()
                .find(|m| m.as_ref().is_some_and(|m| m.id == current.id))
            {
                if let Some(updated) = slot.take() {
                    merged.push(updated);
                }
            }
            // Absent from the snapshot: dropped.
        }

        merged.extend(incoming.into_iter().flatten());
        self.members = merged;
    }
}

/// Monotonic token source for guarding against stale async results.
#[derive(Debug, Default)]
pub struct RequestGeneration(AtomicU64);

impl RequestGeneration {
    /// Creates a fresh generation counter.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Starts a new request, invalidating all earlier tokens.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a token still belongs to the latest request.
    pub fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn member(id: &str) -> Member {
        Member {
            id: id.to_string(),
            display_name: id.to_string(),
            location: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn merge_preserves_order_of_survivors() {
        let mut set = VisibleSet::new();
        set.merge(vec![member("a"), member("b"), member("c")]);

        // Refresh arrives reordered, with "b" gone and "d" new.
        set.merge(vec![member("c"), member("d"), member("a")]);

        let ids: Vec<&str> = set.members().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn merge_takes_snapshot_data() {
        let mut set = VisibleSet::new();
        set.merge(vec![member("a")]);

        let mut updated = member("a");
        updated.display_name = "renamed".to_string();
        set.merge(vec![updated]);

        assert_eq!(set.members()[0].display_name, "renamed");
    }

    #[test]
    fn merge_into_empty() {
        let mut set = VisibleSet::new();
        set.merge(vec![member("x")]);
        assert_eq!(set.members().len(), 1);
    }

    #[test]
    fn merge_empty_snapshot_clears() {
        let mut set = VisibleSet::new();
        set.merge(vec![member("a"), member("b")]);
        set.merge(Vec::new());
        assert!(set.members().is_empty());
    }

    #[test]
    fn stale_token_is_rejected() {
        let generation = RequestGeneration::new();
        let slow = generation.begin();
        let fast = generation.begin();

        // The slow request finishes after the fast one started.
        assert!(!generation.is_current(slow));
        assert!(generation.is_current(fast));
    }

    #[test]
    fn token_valid_until_superseded() {
        let generation = RequestGeneration::new();
        let token = generation.begin();
        assert!(generation.is_current(token));
        generation.begin();
        assert!(!generation.is_current(token));
    }
}
