//! The overlap (rewrite-position) index.
//!
//! Grounded function-for-function on `ccl_overlap_index.c`. That file keys
//! its tree on a term's "fingerprint" (a cheap structural hash used to narrow
//! a balanced tree search) and stores the actual term at each node to guard
//! against fingerprint collisions. Because this crate's [`Term`] is already
//! hash-consed (two structurally equal terms are the same allocation, see
//! `term.rs`), the fingerprint-plus-collision-check dance collapses to a
//! single hash map keyed directly on the interned term -- there is no
//! separate collision case to handle, since pointer equality already *is*
//! structural equality here.
//!
//! The index maps each subterm occurring in some indexed clause to the set
//! of (clause, position) pairs where it occurs -- one entry per occurrence,
//! not per clause, so a term occurring twice in the same clause is recorded
//! twice. Insertion and deletion come in two flavors, mirroring the
//! original's separate into/from trees: "into" positions are every
//! non-variable subterm of a maximal literal's maximal side(s) (candidates
//! for paramodulation to rewrite *into*), while "from" positions are just the
//! tops of a maximal, positive, unselected literal's maximal side(s)
//! (candidates to paramodulate *from*, since an inference only ever rewrites
//! using a whole equation side, never a proper subterm of one).

mod subterm_occurrence;

pub use subterm_occurrence::SubtermOccurrenceMap;

use rustc_hash::FxHashMap;

use crate::clause::{Clause, ClauseId};
use crate::position::{self, CompactPos};
use crate::term::Term;

/// Maps an indexed subterm to every clause/position occurrence recorded for
/// it. Corresponds to the root `OverlapIndex_p` tree in the original.
#[derive(Debug, Default)]
pub struct OverlapIndex {
    entries: FxHashMap<Term, SubtermOccurrenceMap>,
}

impl OverlapIndex {
    pub fn new() -> OverlapIndex {
        OverlapIndex::default()
    }

    /// Number of distinct subterms currently indexed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every occurrence recorded for `term`, if any. Corresponds to a
    /// successful tree lookup in `OverlapIndexFind`.
    pub fn occurrences(&self, term: &Term) -> Option<&SubtermOccurrenceMap> {
        self.entries.get(term)
    }

    /// Records that `term` occurs at `pos` within `clause`. Corresponds to
    /// `OverlapIndexInsertPos`.
    pub fn insert_pos(&mut self, term: &Term, clause: ClauseId, pos: CompactPos) {
        self.entries.entry(term.clone()).or_default().insert(clause, pos);
    }

    /// Removes a single recorded occurrence of `term` at `pos` within
    /// `clause`. Prunes the entry for `term` entirely once its occurrence set
    /// becomes empty, mirroring the original's node-removal-on-empty-bucket
    /// behavior. Corresponds to `OverlapIndexDeletePos`.
    pub fn delete_pos(&mut self, term: &Term, clause: ClauseId, pos: CompactPos) {
        if let Some(occs) = self.entries.get_mut(term) {
            occs.remove(clause, pos);
            if occs.is_empty() {
                self.entries.remove(term);
            }
        }
    }

    /// Removes every occurrence of `clause` recorded under `term`, regardless
    /// of position. Corresponds to `OverlapIndexDeleteClauseOcc`.
    pub fn delete_clause_occ(&mut self, term: &Term, clause: ClauseId) {
        if let Some(occs) = self.entries.get_mut(term) {
            occs.remove_clause(clause);
            if occs.is_empty() {
                self.entries.remove(term);
            }
        }
    }

    /// Indexes every "into" position of `clause`: the non-variable subterms
    /// of every maximal literal's maximal side(s). Corresponds to
    /// `OverlapIndexInsertIntoClause`.
    pub fn insert_into_clause(&mut self, clause: &Clause) {
        for (pos, term) in position::collect_into_terms_pos(clause) {
            self.insert_pos(&term, clause.id(), pos);
        }
    }

    /// Removes every "into" position of `clause` previously recorded by
    /// [`OverlapIndex::insert_into_clause`]. Corresponds to
    /// `OverlapIndexDeleteIntoClause`.
    pub fn delete_into_clause(&mut self, clause: &Clause) {
        for (pos, term) in position::collect_into_terms_pos(clause) {
            self.delete_pos(&term, clause.id(), pos);
        }
    }

    /// Indexes every "from" position of `clause`: the tops of every maximal,
    /// positive, unselected literal's maximal side(s). Corresponds to
    /// `OverlapIndexInsertFromClause`.
    pub fn insert_from_clause(&mut self, clause: &Clause) {
        for (pos, term) in position::collect_from_terms_pos(clause) {
            self.insert_pos(&term, clause.id(), pos);
        }
    }

    /// Removes every "from" position of `clause` previously recorded by
    /// [`OverlapIndex::insert_from_clause`]. Corresponds to
    /// `OverlapIndexDeleteFromClause`.
    pub fn delete_from_clause(&mut self, clause: &Clause) {
        for (pos, term) in position::collect_from_terms_pos(clause) {
            self.delete_pos(&term, clause.id(), pos);
        }
    }
}
