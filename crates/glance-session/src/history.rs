//! Client-side projection of the history store.
//!
//! Entries are ordered most recent first. The collection changes only by
//! appending a newly created record, removing a deleted one, or replacing
//! everything from a store listing. Appends stay "unconfirmed" until a
//! listing includes them, and a listing never drops an unconfirmed append.

use std::collections::{HashMap, HashSet};

use glance_core::entities::SessionRecord;
use glance_core::ids::RecordId;

use crate::view::ViewState;

/// Handle for one listing request. Listings are applied only if no newer
/// listing has been applied already.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
struct Entry {
    record: SessionRecord,
    confirmed: bool,
}

#[derive(Debug, Default)]
pub struct HistorySync {
    entries: Vec<Entry>,
    /// Ids whose deletion the store acknowledged, with the last listing
    /// generation issued before the delete landed. A listing up to that
    /// generation may still contain the id and must not bring it back.
    deleted: HashMap<RecordId, u64>,
    issued_generation: u64,
    applied_generation: u64,
}

impl HistorySync {
    /// Insert at the head. A record whose id is already present is ignored.
    pub fn append(&mut self, record: SessionRecord) -> bool {
        self.deleted.remove(&record.id);
        if self.contains(&record.id) {
            tracing::debug!(id = %record.id, "history append ignored: id already present");
            return false;
        }
        self.entries.insert(
            0,
            Entry {
                record,
                confirmed: false,
            },
        );
        true
    }

    /// Remove the entry with `id`. If the view is replaying that record it
    /// is reset to idle first, so the view never points at a missing record.
    pub(crate) fn remove(&mut self, id: &RecordId, view: &mut ViewState) -> bool {
        if view.is_replaying(id) {
            view.reset_to_idle();
        }
        self.deleted.insert(id.clone(), self.issued_generation);
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.record.id != id);
        before != self.entries.len()
    }

    pub fn begin_refresh(&mut self) -> ListTicket {
        self.issued_generation += 1;
        ListTicket {
            generation: self.issued_generation,
        }
    }

    /// Whether a listing response for `ticket` should still be applied.
    #[must_use]
    pub const fn is_current(&self, ticket: ListTicket) -> bool {
        ticket.generation > self.applied_generation
    }

    /// Replace the collection from a store listing. Returns `false` if the
    /// listing was superseded by a newer one and discarded.
    pub fn apply_listing(&mut self, ticket: ListTicket, listed: Vec<SessionRecord>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.applied_generation = ticket.generation;

        // A local append is confirmed by a listed record with the same id or
        // produced from the same uploaded document.
        let listed_ids: HashSet<RecordId> = listed
            .iter()
            .flat_map(|r| std::iter::once(r.id.clone()).chain(r.document_id.clone()))
            .collect();
        let retained = self
            .entries
            .drain(..)
            .filter(|entry| !entry.confirmed && !listed_ids.contains(&entry.record.id));

        // Once a listing issued after the delete no longer has the id, the
        // tombstone has nothing left to guard against.
        let generation = ticket.generation;
        self.deleted.retain(|id, deleted_at| {
            generation <= *deleted_at || listed.iter().any(|record| &record.id == id)
        });

        let mut entries: Vec<Entry> = listed
            .into_iter()
            .filter(|record| !self.deleted.contains_key(&record.id))
            .map(|record| Entry {
                record,
                confirmed: true,
            })
            .chain(retained)
            .collect();
        dedup_by_id(&mut entries);
        entries.sort_by(|a, b| b.record.created_at.cmp(&a.record.created_at));
        self.entries = entries;
        true
    }

    /// The store could not be listed: keep only local appends it has not
    /// confirmed yet. Returns `false` if the failed listing was superseded.
    pub fn apply_listing_failure(&mut self, ticket: ListTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.applied_generation = ticket.generation;
        self.entries.retain(|entry| !entry.confirmed);
        true
    }

    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.entries.iter().any(|entry| &entry.record.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&SessionRecord> {
        self.entries
            .iter()
            .find(|entry| &entry.record.id == id)
            .map(|entry| &entry.record)
    }

    /// Look up by record id, falling back to the id of the uploaded
    /// document. A local append keyed by its document id is replaced by the
    /// store's row once a listing confirms it, and callers may still hold
    /// the old id.
    #[must_use]
    pub fn find(&self, id: &RecordId) -> Option<&SessionRecord> {
        self.get(id).or_else(|| {
            self.entries
                .iter()
                .find(|entry| entry.record.document_id.as_ref() == Some(id))
                .map(|entry| &entry.record)
        })
    }

    /// Whether a listing has returned the entry with `id`, which makes `id`
    /// an identifier the store knows.
    #[must_use]
    pub fn is_confirmed(&self, id: &RecordId) -> bool {
        self.entries
            .iter()
            .any(|entry| &entry.record.id == id && entry.confirmed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the collection, most recent first.
    #[must_use]
    pub fn records(&self) -> Vec<SessionRecord> {
        self.entries.iter().map(|entry| entry.record.clone()).collect()
    }
}

fn dedup_by_id(entries: &mut Vec<Entry>) {
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.record.id.clone()));
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use glance_core::document::Document;
    use glance_core::enums::MachineState;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str, minutes: i64) -> SessionRecord {
        SessionRecord {
            id: RecordId::new(id),
            document_id: None,
            document_name: format!("{id}.pdf"),
            created_at: Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap()
                + Duration::minutes(minutes),
            summary_text: format!("summary {id}"),
            advantages: vec![],
            disadvantages: vec![],
            insights: vec![],
            questions: vec![],
        }
    }

    fn ids(history: &HistorySync) -> Vec<String> {
        history
            .records()
            .into_iter()
            .map(|r| r.id.to_string())
            .collect()
    }

    #[test]
    fn duplicate_append_is_a_no_op() {
        let mut history = HistorySync::default();
        assert!(history.append(record("a", 0)));
        assert!(!history.append(record("a", 0)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn append_inserts_at_head() {
        let mut history = HistorySync::default();
        history.append(record("a", 0));
        history.append(record("b", 1));
        assert_eq!(ids(&history), vec!["b", "a"]);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut history = HistorySync::default();
        let mut view = ViewState::default();
        history.append(record("a", 0));
        assert!(!history.remove(&RecordId::new("zzz"), &mut view));
        assert_eq!(ids(&history), vec!["a"]);
        assert_eq!(view.state, MachineState::Idle);
    }

    #[test]
    fn removing_replayed_record_resets_view() {
        let mut history = HistorySync::default();
        let mut view = ViewState::default();
        let a = record("a", 0);
        history.append(a.clone());
        view.begin_replay(&a);

        assert!(history.remove(&a.id, &mut view));
        assert_eq!(view.state, MachineState::Idle);
        assert!(view.result.is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn removing_other_record_keeps_upload_view() {
        let mut history = HistorySync::default();
        let mut view = ViewState::default();
        history.append(record("a", 0));
        view.begin_upload(Document::new("b.pdf", "application/pdf", b"x".to_vec()).unwrap());

        history.remove(&RecordId::new("a"), &mut view);
        assert_eq!(view.state, MachineState::FileStaged);
        assert!(view.staged.is_some());
    }

    #[test]
    fn listing_replaces_and_sorts_newest_first() {
        let mut history = HistorySync::default();
        let ticket = history.begin_refresh();
        assert!(history.apply_listing(
            ticket,
            vec![record("old", 0), record("new", 10), record("mid", 5)]
        ));
        assert_eq!(ids(&history), vec!["new", "mid", "old"]);
    }

    #[test]
    fn listing_keeps_unconfirmed_append() {
        let mut history = HistorySync::default();
        let ticket = history.begin_refresh();
        history.append(record("fresh", 20));
        history.apply_listing(ticket, vec![record("a", 0)]);
        assert_eq!(ids(&history), vec!["fresh", "a"]);
    }

    #[test]
    fn listing_drops_confirmed_entry_missing_from_store() {
        let mut history = HistorySync::default();
        let first = history.begin_refresh();
        history.apply_listing(first, vec![record("a", 0), record("b", 1)]);

        let second = history.begin_refresh();
        history.apply_listing(second, vec![record("b", 1)]);
        assert_eq!(ids(&history), vec!["b"]);
    }

    #[test]
    fn confirmed_append_is_dropped_once_store_forgets_it() {
        let mut history = HistorySync::default();
        history.append(record("fresh", 20));
        let confirm = history.begin_refresh();
        history.apply_listing(confirm, vec![record("fresh", 20)]);

        let later = history.begin_refresh();
        history.apply_listing(later, vec![]);
        assert!(history.is_empty());
    }

    #[test]
    fn listing_confirms_append_by_document_id() {
        let mut history = HistorySync::default();
        let mut uploaded = record("paper-1", 0);
        uploaded.document_id = Some(RecordId::new("paper-1"));
        history.append(uploaded);

        let mut listed = record("summary-1", 0);
        listed.document_id = Some(RecordId::new("paper-1"));
        let ticket = history.begin_refresh();
        history.apply_listing(ticket, vec![listed]);
        assert_eq!(ids(&history), vec!["summary-1"]);
    }

    #[test]
    fn stale_listing_is_discarded() {
        let mut history = HistorySync::default();
        let older = history.begin_refresh();
        let newer = history.begin_refresh();

        assert!(history.apply_listing(newer, vec![record("b", 1)]));
        assert!(!history.apply_listing(older, vec![record("a", 0), record("b", 1)]));
        assert_eq!(ids(&history), vec!["b"]);
    }

    #[test]
    fn listing_issued_before_delete_does_not_resurrect_record() {
        let mut history = HistorySync::default();
        let mut view = ViewState::default();
        let first = history.begin_refresh();
        history.apply_listing(first, vec![record("a", 0), record("b", 1)]);

        let in_flight = history.begin_refresh();
        history.remove(&RecordId::new("a"), &mut view);
        history.apply_listing(in_flight, vec![record("a", 0), record("b", 1)]);
        assert_eq!(ids(&history), vec!["b"]);
    }

    #[test]
    fn tombstone_is_pruned_once_a_later_listing_omits_the_id() {
        let mut history = HistorySync::default();
        let mut view = ViewState::default();
        let first = history.begin_refresh();
        history.apply_listing(first, vec![record("a", 0), record("b", 1)]);

        let in_flight = history.begin_refresh();
        history.remove(&RecordId::new("a"), &mut view);
        history.apply_listing(in_flight, vec![record("a", 0), record("b", 1)]);
        assert!(history.deleted.contains_key(&RecordId::new("a")));

        let after = history.begin_refresh();
        history.apply_listing(after, vec![record("b", 1)]);
        assert!(history.deleted.is_empty());
        assert_eq!(ids(&history), vec!["b"]);
    }

    #[test]
    fn find_falls_back_to_document_id() {
        let mut history = HistorySync::default();
        let mut listed = record("summary-1", 0);
        listed.document_id = Some(RecordId::new("paper-1"));
        let ticket = history.begin_refresh();
        history.apply_listing(ticket, vec![listed]);

        let found = history.find(&RecordId::new("paper-1")).map(|r| r.id.to_string());
        assert_eq!(found.as_deref(), Some("summary-1"));
        assert!(history.get(&RecordId::new("paper-1")).is_none());
        assert!(history.is_confirmed(&RecordId::new("summary-1")));
    }

    #[test]
    fn local_append_is_unconfirmed_until_listed() {
        let mut history = HistorySync::default();
        history.append(record("fresh", 0));
        assert!(!history.is_confirmed(&RecordId::new("fresh")));

        let ticket = history.begin_refresh();
        history.apply_listing(ticket, vec![record("fresh", 0)]);
        assert!(history.is_confirmed(&RecordId::new("fresh")));
    }

    #[test]
    fn append_after_remove_of_same_id_wins() {
        let mut history = HistorySync::default();
        let mut view = ViewState::default();
        history.remove(&RecordId::new("a"), &mut view);
        assert!(history.append(record("a", 0)));
        assert_eq!(ids(&history), vec!["a"]);
    }

    #[test]
    fn listing_failure_keeps_only_unconfirmed_appends() {
        let mut history = HistorySync::default();
        let first = history.begin_refresh();
        history.apply_listing(first, vec![record("a", 0)]);
        history.append(record("fresh", 5));

        let failed = history.begin_refresh();
        assert!(history.apply_listing_failure(failed));
        assert_eq!(ids(&history), vec!["fresh"]);
    }
}
