//! Set-level subsumption drivers and simplify-reflect.
//!
//! Grounded on `ccl_subsumption.c`'s exported set-level API:
//! `ClauseSetSubsumesClause` / `clause_set_subsumes_clause`,
//! `ClauseSetFindSubsumedClause(s)` / `clauseset_find_subsumed_clause(s)`,
//! `ClauseSetFindUnitSubsumedClause`, `ClausePositiveSimplifyReflect` and
//! `ClauseNegativeSimplifyReflect`. `ClauseSet` bundles the ordered clause
//! list the original keeps plus the optional [`FvIndex`] that
//! `clause_set_subsumes_clause_indexed`/`clauseset_find_subsumed_clauses_indexed`
//! consult when present; every driver here falls back to a full scan when no
//! index has been built, exactly as the original's non-indexed entry points do.

use crate::clause::{Clause, ClauseId};
use crate::config::{DocSink, SubsumptionConfig, SubsumptionStats};

use super::fv_index::FvIndex;
use super::multiset::clause_subsumes_clause;
use super::unit::{probe_units_top, strong_probe_units, unit_clause_subsumes_clause};

/// An ordered set of clauses, optionally backed by a [`FvIndex`] for pruning.
#[derive(Default)]
pub struct ClauseSet {
    clauses: Vec<Clause>,
    index: Option<FvIndex>,
}

impl ClauseSet {
    pub fn new() -> ClauseSet {
        ClauseSet::default()
    }

    /// As [`ClauseSet::new`], but maintains a feature-vector index alongside
    /// the clause list so the `*_indexed` drivers below can prune candidates
    /// instead of scanning every clause.
    pub fn with_index() -> ClauseSet {
        ClauseSet {
            clauses: Vec::new(),
            index: Some(FvIndex::new()),
        }
    }

    /// As [`ClauseSet::with_index`], with an explicit feature-vector
    /// `symbol_limit` instead of [`super::fv_index::DEFAULT_SYMBOL_LIMIT`].
    pub fn with_index_and_symbol_limit(symbol_limit: usize) -> ClauseSet {
        ClauseSet {
            clauses: Vec::new(),
            index: Some(FvIndex::with_symbol_limit(symbol_limit)),
        }
    }

    pub fn insert(&mut self, clause: Clause) {
        if let Some(index) = &mut self.index {
            index.insert(&clause);
        }
        self.clauses.push(clause);
    }

    pub fn remove(&mut self, id: ClauseId) -> Option<Clause> {
        let pos = self.clauses.iter().position(|c| c.id() == id)?;
        let clause = self.clauses.remove(pos);
        if let Some(index) = &mut self.index {
            index.remove(&clause);
        }
        Some(clause)
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn get(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.id() == id)
    }

    fn candidate_subsumers<'a>(&'a self, query: &Clause) -> Box<dyn Iterator<Item = &'a Clause> + 'a> {
        match &self.index {
            Some(index) => {
                let fv = index.feature_vector_of(query);
                let ids: std::collections::HashSet<_> = index.candidates_that_may_subsume(&fv).into_iter().collect();
                Box::new(self.clauses.iter().filter(move |c| ids.contains(&c.id())))
            }
            None => Box::new(self.clauses.iter()),
        }
    }

    fn candidate_subsumed<'a>(&'a self, query: &Clause) -> Box<dyn Iterator<Item = &'a Clause> + 'a> {
        match &self.index {
            Some(index) => {
                let fv = index.feature_vector_of(query);
                let ids: std::collections::HashSet<_> =
                    index.candidates_that_may_be_subsumed(&fv).into_iter().collect();
                Box::new(self.clauses.iter().filter(move |c| ids.contains(&c.id())))
            }
            None => Box::new(self.clauses.iter()),
        }
    }

    /// Does some clause in this set subsume `query`? Corresponds to
    /// `ClauseSetSubsumesClause`/`clause_set_subsumes_clause(_indexed)`,
    /// including its `DocClauseQuote` proof-recording hit: `sink` is notified
    /// with the subsuming clause and `query` the moment a hit is found.
    pub fn subsumes_clause(&self, query: &Clause, config: &SubsumptionConfig, stats: &SubsumptionStats, sink: &mut dyn DocSink) -> bool {
        self.candidate_subsumers(query).any(|candidate| {
            if candidate.id() == query.id() {
                return false;
            }
            let hit = clause_subsumes_clause(candidate, query, config, stats);
            if hit {
                sink.clause_subsumed(candidate, query);
            }
            hit
        })
    }

    /// Finds the first clause in this set subsumed by `query`. Corresponds
    /// to `ClauseSetFindSubsumedClause`/`clauseset_find_subsumed_clause(s_indexed)`.
    pub fn find_subsumed_clause(&self, query: &Clause, config: &SubsumptionConfig, stats: &SubsumptionStats) -> Option<ClauseId> {
        self.candidate_subsumed(query).find_map(|candidate| {
            if candidate.id() == query.id() {
                return None;
            }
            clause_subsumes_clause(query, candidate, config, stats).then_some(candidate.id())
        })
    }

    /// Finds every clause in this set subsumed by `query`. Corresponds to
    /// `ClauseSetFindSubsumedClauses`/`clauseset_find_subsumed_clauses(_indexed)`.
    pub fn find_subsumed_clauses(&self, query: &Clause, config: &SubsumptionConfig, stats: &SubsumptionStats) -> Vec<ClauseId> {
        self.candidate_subsumed(query)
            .filter(|candidate| {
                if candidate.id() == query.id() {
                    return false;
                }
                clause_subsumes_clause(query, candidate, config, stats)
            })
            .map(Clause::id)
            .collect()
    }

    /// Finds the first unit clause in this set that subsumes `query`.
    /// Corresponds to `ClauseSetFindUnitSubsumedClause`.
    pub fn find_unit_subsuming_clause(&self, query: &Clause, config: &SubsumptionConfig) -> Option<ClauseId> {
        self.clauses
            .iter()
            .filter(|c| c.len() == 1 && c.id() != query.id())
            .find(|unit| unit_clause_subsumes_clause(unit, query, config))
            .map(Clause::id)
    }
}

/// Simplifies `target` by repeatedly dropping a negative literal `s' != t'`
/// whenever some positive unit clause `s = t` in `units` rewrites onto it --
/// directly (`s = s'`, `t = t'`, or the swap) or via congruence descent
/// through a shared context, exactly as `eqn_subsumes` does for a single
/// equation, but probing the whole unit set at each congruence step when
/// `config.strong_unit_forward_subsumption` is set (weak: a single top-level
/// probe only). `units` must hold positive unit clauses only. A removed
/// literal's witness [`Clause::is_set_of_support`] is propagated onto
/// `target`. Returns `true` iff `target` ends up empty. Corresponds to
/// `ClausePositiveSimplifyReflect`.
pub fn positive_simplify_reflect(units: &ClauseSet, target: &mut Clause, config: &SubsumptionConfig, sink: &mut dyn DocSink) -> bool {
    let mut i = 0;
    while i < target.len() {
        let witness = {
            let lit = &target.literals()[i];
            if lit.is_positive() {
                None
            } else {
                let (t1, t2) = lit.sides();
                let same_sign = units.clauses().iter().filter(|u| u.len() == 1 && u.literals()[0].is_positive());
                let found = if config.strong_unit_forward_subsumption {
                    strong_probe_units(same_sign, t1, t2)
                } else {
                    probe_units_top(same_sign, t1, t2)
                };
                found.cloned()
            }
        };
        match witness {
            Some(witness) => {
                sink.simplify_reflected(&witness, target, i);
                target.remove_literal(i);
                if witness.is_set_of_support() {
                    target.set_set_of_support(true);
                }
            }
            None => i += 1,
        }
    }
    target.is_empty()
}

/// Simplifies `target` by repeatedly dropping a positive literal `s' = t'`
/// whenever some negative unit clause `s != t` in `units` top-matches it
/// (either orientation) -- no congruence descent, unconditionally, since the
/// original has no "strong" negative variant of this check. `units` must hold
/// negative unit clauses only. Returns `true` iff `target` ends up empty.
/// Corresponds to `ClauseNegativeSimplifyReflect`.
pub fn negative_simplify_reflect(units: &ClauseSet, target: &mut Clause, sink: &mut dyn DocSink) -> bool {
    let mut i = 0;
    while i < target.len() {
        let witness = {
            let lit = &target.literals()[i];
            if !lit.is_positive() {
                None
            } else {
                let (t1, t2) = lit.sides();
                let same_sign = units.clauses().iter().filter(|u| u.len() == 1 && !u.literals()[0].is_positive());
                probe_units_top(same_sign, t1, t2).cloned()
            }
        };
        match witness {
            Some(witness) => {
                sink.simplify_reflected(&witness, target, i);
                target.remove_literal(i);
                if witness.is_set_of_support() {
                    target.set_set_of_support(true);
                }
            }
            None => i += 1,
        }
    }
    target.is_empty()
}
