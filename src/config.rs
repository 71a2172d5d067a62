//! Run configuration, proof-recording hook, and call-count telemetry.
//!
//! `SubsumptionConfig` replaces the original's process-global
//! `StrongUnitForwardSubsumption` flag with an explicit per-run struct, since
//! this crate avoids global mutable state entirely. `DocSink` stands in for the
//! original's `DocClauseQuote` proof-recording side channel; `NullDocSink` is
//! the default no-op, used whenever nobody is watching for a derivation
//! trace. `SubsumptionStats` mirrors `ClauseClauseSubsumptionCalls`/
//! `ClauseClauseSubsumptionCallsRec`, the original's pair of global counters,
//! as plain `Cell<usize>` fields on a struct a caller owns, rather than as
//! process-global statics -- consistent with the single-threaded,
//! no-shared-mutable-state model this crate follows throughout.

use std::cell::Cell;

use crate::clause::Clause;
use crate::subsumption::fv_index::DEFAULT_SYMBOL_LIMIT;

/// Tunables for a single subsumption run.
#[derive(Debug, Clone, Copy)]
pub struct SubsumptionConfig {
    /// If true, unit-clause-*set* forward subsumption (`unit_clause_set_subsumes_clause`)
    /// walks congruent subterm pairs, probing the whole unit set at each
    /// level, instead of a single top-level lookup -- corresponds to the
    /// original's `StrongUnitForwardSubsumption` flag. Per-literal unit
    /// subsumption (`literal_subsumes_clause`) is unaffected by this flag: it
    /// always uses descent for positive literals and top-only matching for
    /// negative ones.
    pub strong_unit_forward_subsumption: bool,
    /// Number of distinct function symbols that get their own slot in a
    /// feature vector before falling back to the shared overflow bucket; see
    /// [`crate::subsumption::fv_index`].
    pub symbol_limit: usize,
}

impl Default for SubsumptionConfig {
    fn default() -> SubsumptionConfig {
        SubsumptionConfig {
            strong_unit_forward_subsumption: true,
            symbol_limit: DEFAULT_SYMBOL_LIMIT,
        }
    }
}

/// Observes subsumption and simplify-reflect events for proof reconstruction.
/// Corresponds to the original's `DocClauseQuote` calls scattered through
/// `ccl_subsumption.c`; implementations that don't care about proof output
/// use [`NullDocSink`].
pub trait DocSink {
    fn clause_subsumed(&mut self, _subsumer: &Clause, _subsumed: &Clause) {}
    fn simplify_reflected(&mut self, _unit: &Clause, _target: &Clause, _literal_index: usize) {}
}

/// A [`DocSink`] that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDocSink;

impl DocSink for NullDocSink {}

/// Call-count telemetry for a subsumption run, mirroring the original's
/// `ClauseClauseSubsumptionCalls`/`ClauseClauseSubsumptionCallsRec` globals.
#[derive(Debug, Default)]
pub struct SubsumptionStats {
    /// Number of top-level clause/clause subsumption attempts.
    pub clause_clause_calls: Cell<usize>,
    /// Number of recursive descents made by the multiset matcher across all
    /// attempts (backtracking branches included).
    pub clause_clause_calls_recursive: Cell<usize>,
}

impl SubsumptionStats {
    pub fn new() -> SubsumptionStats {
        SubsumptionStats::default()
    }

    pub fn record_call(&self) {
        self.clause_clause_calls.set(self.clause_clause_calls.get() + 1);
    }

    pub fn record_recursive_call(&self) {
        self.clause_clause_calls_recursive
            .set(self.clause_clause_calls_recursive.get() + 1);
    }
}
