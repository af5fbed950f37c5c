#![forbid(unsafe_code)]

//! Applies a graph [`ChangeSet`] to the row mirror and the section.
//!
//! The [`Reconciler`] is the only writer of the mirror's structure. One
//! [`apply`](Reconciler::apply) call runs to completion in a fixed order:
//!
//! 1. removals: drop the entry, detach its row
//! 2. additions (ascending index): build a row, insert at the clamped index
//! 3. reorder (when the change set reports moves): detach every row and
//!    rebuild the mirror and the section in canonical order
//! 4. renames: refresh row text from the canonical property
//!
//! # Invariants
//!
//! 1. After `apply`, when the change set describes every change since the
//!    mirror was last in canonical order, `mirror.ordered_ids()` equals the
//!    canonical order and the section's children match the mirror's rows.
//! 2. Applying an already-applied change set changes nothing (present ids
//!    are skipped, absent ids are ignored).

use ahash::AHashMap;
use bboard_core::change_set::ChangeSet;
use bboard_core::property::{Property, PropertyId};

use crate::mirror::PropertyMirror;
use crate::row::{BlackboardRow, RowHandle, Section};

/// Counts of what one reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Entries removed from the mirror.
    pub removed: usize,
    /// Rows built and inserted.
    pub added: usize,
    /// Additions skipped because the id was already mirrored.
    pub skipped: usize,
    /// Whether the mirror was rebuilt in canonical order.
    pub reordered: bool,
    /// Rows whose text was refreshed.
    pub renamed: usize,
    /// Canonical ids with no mirror entry during a reorder.
    pub missing: usize,
}

impl ReconcileReport {
    /// Whether the pass touched anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.removed == 0 && self.added == 0 && !self.reordered && self.renamed == 0
    }
}

/// Builds rows and keeps the mirror in step with the graph.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    next_row: u64,
}

impl Reconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn build_row(&mut self, property: &Property) -> BlackboardRow {
        let handle = RowHandle::new(self.next_row);
        self.next_row += 1;
        BlackboardRow::new(handle, property)
    }

    /// Apply `changes` against `canonical`, the graph's current property order.
    pub fn apply(
        &mut self,
        changes: ChangeSet,
        canonical: &[Property],
        mirror: &mut PropertyMirror<BlackboardRow>,
        section: &mut Section,
    ) -> ReconcileReport {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "blackboard.reconcile",
            removed = changes.removed.len(),
            added = changes.added.len(),
            moved = changes.has_moves(),
            canonical = canonical.len()
        )
        .entered();

        let mut report = ReconcileReport::default();

        for id in &changes.removed {
            if let Some(row) = mirror.remove_by_id(*id) {
                section.detach(row.handle());
                report.removed += 1;
            }
        }

        for added in &changes.added {
            let id = added.property.id();
            if mirror.contains(id) {
                report.skipped += 1;
                continue;
            }
            let row = self.build_row(&added.property);
            let index = added.index.min(mirror.len());
            let handle = row.handle();
            mirror.insert_at(id, row, index);
            section.insert(index, handle);
            report.added += 1;
        }

        if changes.has_moves() {
            report.missing = Self::reorder(canonical, mirror, section);
            report.reordered = true;
        }

        for id in &changes.renamed {
            let Some(property) = canonical.iter().find(|p| p.id() == *id) else {
                continue;
            };
            if let Some(row) = mirror.get_mut(*id)
                && row.text() != property.display_name()
            {
                row.set_text(property.display_name());
                report.renamed += 1;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "blackboard.reconcile.done",
            removed = report.removed,
            added = report.added,
            skipped = report.skipped,
            reordered = report.reordered,
            renamed = report.renamed
        );

        report
    }

    /// Rebuild mirror and section in canonical order. Returns the number of
    /// canonical ids that had no entry.
    fn reorder(
        canonical: &[Property],
        mirror: &mut PropertyMirror<BlackboardRow>,
        section: &mut Section,
    ) -> usize {
        section.detach_all();
        let drained = mirror.drain();
        let order: Vec<PropertyId> = drained.iter().map(|(id, _)| *id).collect();
        let mut rows: AHashMap<PropertyId, BlackboardRow> = drained.into_iter().collect();

        let mut missing = 0;
        for property in canonical {
            let id = property.id();
            let row = rows.remove(&id);
            debug_assert!(row.is_some(), "canonical property {id} has no mirror entry");
            match row {
                Some(row) => {
                    section.push(row.handle());
                    mirror.push(id, row);
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(message = "blackboard.reconcile.missing", %id);
                    missing += 1;
                }
            }
        }

        // Entries the graph no longer lists stay, after the canonical ones.
        for id in order {
            if let Some(row) = rows.remove(&id) {
                section.push(row.handle());
                mirror.push(id, row);
            }
        }

        missing
    }
}
