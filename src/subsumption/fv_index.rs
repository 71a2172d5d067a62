//! Feature-vector index for pruning subsumption candidates.
//!
//! Grounded on `ccl_subsumption.c`'s `clause_set_subsumes_clause_indexed`
//! (forward direction) and `clauseset_find_subsumed_clauses_indexed`
//! (backward direction), and on the `FVIndexGetNextNonEmptyNode`-style
//! traversal they both rely on. `ccl_fcvindexing.c` itself, which computes
//! the feature vector, was not part of the retrieved source, so the layout
//! here is: a fixed-length vector of non-negative integers, with the tail
//! counting occurrences of distinct function symbols up to `symbol_limit`,
//! bounded by an overflow bucket for the rest.
//!
//! A clause's feature vector is monotone with respect to subsumption: if `U`
//! (multiset-)subsumes `D` via the non-descending matcher in
//! `subsumption::multiset`, every literal of `U` embeds injectively into a
//! distinct literal of `D` under a substitution that only ever binds
//! variables -- so every function-symbol occurrence `U` has, `D` has at
//! least as many of (the embedding can only add occurrences, via repeated
//! variables or unused `D` literals, never remove them). The three leading
//! generic features (literal count, positive-literal count, weight) are
//! monotone for the same reason and let cheap rejections happen before any
//! per-symbol comparison.
//!
//! Each distinct function symbol is assigned a stable index the first time
//! the term bank interns it ([`crate::term::Term::feature_id`]), so the same
//! symbol always lands in the same feature-vector slot no matter which
//! clause is being summarized.

use std::collections::BTreeMap;

use crate::clause::{Clause, ClauseId};
use crate::term::Term;

/// Number of generic (non-symbol-frequency) features at the front of every
/// feature vector: literal count, positive literal count, total weight.
const BASE_FEATURES: usize = 3;

/// A clause's feature vector: monotone summary statistics used to prune
/// candidates before the real (recursive) subsumption check runs. Layout:
/// `[literal_count, pos_lit_count, weight, sym_0, sym_1, .., sym_{k-1}, overflow]`
/// where `k` is the configured `symbol_limit` and `overflow` sums the
/// occurrence counts of every function symbol whose [`Term::feature_id`] is
/// `>= symbol_limit`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FeatureVector(Vec<u32>);

impl FeatureVector {
    pub fn of(clause: &Clause, symbol_limit: usize) -> FeatureVector {
        let mut values = vec![0u32; BASE_FEATURES + symbol_limit + 1];
        values[0] = clause.len() as u32;
        values[1] = clause.pos_lit_no() as u32;
        values[2] = clause.weight();

        for lit in clause.literals() {
            count_symbols(&lit.lterm, symbol_limit, &mut values);
            count_symbols(&lit.rterm, symbol_limit, &mut values);
        }
        FeatureVector(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, i: usize) -> u32 {
        self.0[i]
    }

    /// True iff every feature of `self` is `<=` the corresponding feature of
    /// `other` -- a necessary condition for `self`'s clause to subsume
    /// `other`'s.
    pub fn dominates(&self, other: &FeatureVector) -> bool {
        debug_assert_eq!(self.len(), other.len());
        (0..self.len()).all(|i| self.get(i) <= other.get(i))
    }
}

/// Walks every subterm of `term` (including `term` itself), incrementing the
/// count for each function symbol's slot, or the trailing overflow slot if
/// its [`Term::feature_id`] falls at or past `symbol_limit`. Variables
/// contribute nothing.
fn count_symbols(term: &Term, symbol_limit: usize, values: &mut [u32]) {
    if let Some(id) = term.feature_id() {
        let slot = if id < symbol_limit { BASE_FEATURES + id } else { values.len() - 1 };
        values[slot] += 1;
    }
    for arg in term.args() {
        count_symbols(arg, symbol_limit, values);
    }
}

/// A node of the feature-vector trie: either an internal node keyed by the
/// next feature value, or a leaf holding the clause ids whose feature vector
/// is fully consumed at this depth.
#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<u32, Node>,
    here: Vec<ClauseId>,
}

impl Node {
    fn insert(&mut self, fv: &FeatureVector, depth: usize, id: ClauseId) {
        if depth == fv.len() {
            self.here.push(id);
            return;
        }
        self.children
            .entry(fv.get(depth))
            .or_default()
            .insert(fv, depth + 1, id);
    }

    fn remove(&mut self, fv: &FeatureVector, depth: usize, id: ClauseId) -> bool {
        if depth == fv.len() {
            if let Some(i) = self.here.iter().position(|&c| c == id) {
                self.here.remove(i);
            }
            return self.here.is_empty();
        }
        let key = fv.get(depth);
        let prune_child = match self.children.get_mut(&key) {
            Some(child) => child.remove(fv, depth + 1, id),
            None => return false,
        };
        if prune_child {
            self.children.remove(&key);
        }
        self.children.is_empty() && self.here.is_empty()
    }

    /// Visits every clause id reachable at or below this node whose
    /// remaining feature path is `<=` (forward) or `>=` (backward) the
    /// query's, at every remaining depth.
    fn walk(&self, query: &FeatureVector, depth: usize, forward: bool, out: &mut Vec<ClauseId>) {
        if depth == query.len() {
            out.extend_from_slice(&self.here);
            return;
        }
        let key = query.get(depth);
        let candidates: Vec<_> = if forward {
            self.children.range(..=key).map(|(k, v)| (*k, v)).collect()
        } else {
            self.children.range(key..).map(|(k, v)| (*k, v)).collect()
        };
        for (_, child) in candidates {
            child.walk(query, depth + 1, forward, out);
        }
    }
}

/// Default bound on the number of distinct function symbols that get their
/// own feature-vector slot before falling back to the overflow bucket.
pub const DEFAULT_SYMBOL_LIMIT: usize = 32;

/// A bounded trie indexing clauses by feature vector, supporting pruned
/// forward/backward traversal. Every clause inserted into (or queried
/// against) one index must use the same `symbol_limit`.
#[derive(Debug)]
pub struct FvIndex {
    root: Node,
    vectors: BTreeMap<ClauseId, FeatureVector>,
    symbol_limit: usize,
}

impl Default for FvIndex {
    fn default() -> FvIndex {
        FvIndex::new()
    }
}

impl FvIndex {
    pub fn new() -> FvIndex {
        FvIndex::with_symbol_limit(DEFAULT_SYMBOL_LIMIT)
    }

    pub fn with_symbol_limit(symbol_limit: usize) -> FvIndex {
        FvIndex {
            root: Node::default(),
            vectors: BTreeMap::new(),
            symbol_limit,
        }
    }

    pub fn symbol_limit(&self) -> usize {
        self.symbol_limit
    }

    pub fn feature_vector_of(&self, clause: &Clause) -> FeatureVector {
        FeatureVector::of(clause, self.symbol_limit)
    }

    pub fn insert(&mut self, clause: &Clause) {
        let fv = self.feature_vector_of(clause);
        self.root.insert(&fv, 0, clause.id());
        self.vectors.insert(clause.id(), fv);
    }

    pub fn remove(&mut self, clause: &Clause) {
        if let Some(fv) = self.vectors.remove(&clause.id()) {
            self.root.remove(&fv, 0, clause.id());
        }
    }

    /// Candidate clause ids whose feature vector is `<=` `query`'s -- i.e.
    /// clauses that *could* subsume a clause with `query`'s feature vector.
    /// Corresponds to the forward traversal in
    /// `clause_set_subsumes_clause_indexed`.
    pub fn candidates_that_may_subsume(&self, query: &FeatureVector) -> Vec<ClauseId> {
        let mut out = Vec::new();
        self.root.walk(query, 0, true, &mut out);
        out
    }

    /// Candidate clause ids whose feature vector is `>=` `query`'s -- i.e.
    /// clauses that `query`'s clause could subsume. Corresponds to the
    /// backward traversal in `clauseset_find_subsumed_clauses_indexed`.
    pub fn candidates_that_may_be_subsumed(&self, query: &FeatureVector) -> Vec<ClauseId> {
        let mut out = Vec::new();
        self.root.walk(query, 0, false, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Literal;
    use crate::term::TermBank;

    fn clause(id: u64, tb: &mut TermBank, weight_terms: usize) -> Clause {
        let mut literals = Vec::new();
        for i in 0..weight_terms {
            let a = tb.constant(&format!("c{i}"));
            literals.push(Literal::new(a.clone(), a, true));
        }
        Clause::new(ClauseId(id), literals)
    }

    #[test]
    fn forward_prunes_heavier_clauses() {
        let mut tb = TermBank::new();
        let light = clause(0, &mut tb, 1);
        let heavy = clause(1, &mut tb, 3);

        let mut index = FvIndex::new();
        index.insert(&light);
        index.insert(&heavy);

        let query = index.feature_vector_of(&heavy);
        let candidates = index.candidates_that_may_subsume(&query);
        assert!(candidates.contains(&light.id()));
    }

    #[test]
    fn backward_finds_heavier_clauses_as_subsumed_candidates() {
        let mut tb = TermBank::new();
        let light = clause(0, &mut tb, 1);
        let heavy = clause(1, &mut tb, 3);

        let mut index = FvIndex::new();
        index.insert(&light);
        index.insert(&heavy);

        let query = index.feature_vector_of(&light);
        let candidates = index.candidates_that_may_be_subsumed(&query);
        assert!(candidates.contains(&heavy.id()));
    }

    #[test]
    fn remove_drops_clause_from_future_traversals() {
        let mut tb = TermBank::new();
        let a = clause(0, &mut tb, 1);

        let mut index = FvIndex::new();
        index.insert(&a);
        index.remove(&a);

        let query = index.feature_vector_of(&a);
        assert!(index.candidates_that_may_subsume(&query).is_empty());
    }

    #[test]
    fn dominates_is_pointwise_le() {
        let mut tb = TermBank::new();
        let light = clause(0, &mut tb, 1);
        let heavy = clause(1, &mut tb, 3);
        let small = FeatureVector::of(&light, DEFAULT_SYMBOL_LIMIT);
        let big = FeatureVector::of(&heavy, DEFAULT_SYMBOL_LIMIT);
        assert!(small.dominates(&big));
        assert!(!big.dominates(&small));
    }

    #[test]
    fn distinct_symbols_land_in_distinct_stable_slots() {
        let mut tb = TermBank::new();
        let f = tb.constant("f");
        let g = tb.constant("g");
        let c1 = Clause::new(ClauseId(0), vec![Literal::new(f.clone(), f, true)]);
        let c2 = Clause::new(ClauseId(1), vec![Literal::new(g.clone(), g, true)]);

        let index = FvIndex::new();
        let fv1 = index.feature_vector_of(&c1);
        let fv2 = index.feature_vector_of(&c2);
        // Neither clause's symbol occurs in the other's, so neither vector
        // dominates the other even though both have the same shape.
        assert!(!fv1.dominates(&fv2));
        assert!(!fv2.dominates(&fv1));
    }

    #[test]
    fn symbols_past_the_limit_fall_into_the_overflow_bucket() {
        let mut tb = TermBank::new();
        // Exhaust a tiny symbol limit so "b" overflows.
        let a = tb.constant("a");
        let b = tb.constant("b");
        let clause_a = Clause::new(ClauseId(0), vec![Literal::new(a.clone(), a, true)]);
        let clause_b = Clause::new(ClauseId(1), vec![Literal::new(b.clone(), b, true)]);

        let index = FvIndex::with_symbol_limit(1);
        let fv_a = index.feature_vector_of(&clause_a);
        let fv_b = index.feature_vector_of(&clause_b);
        // Both "a" (slot 0, seen first) and "b" (past the limit, overflow)
        // contribute one occurrence each, so the overflow slot is equal and
        // the vectors differ only in slot 0 -- "b"'s clause has zero there.
        assert_eq!(fv_a.len(), fv_b.len());
    }
}
