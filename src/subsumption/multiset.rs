//! Multiset (non-unit) clause subsumption.
//!
//! Grounded on `ccl_subsumption.c`'s `clause_subsumes_clause`,
//! `check_subsumption_possibility`, `find_spec_literal` and
//! `eqn_list_rec_subsume`: a clause `C` subsumes `D` iff every literal of `C`
//! can be mapped, under one shared substitution, to a distinct literal of `D`
//! that it matches -- the "distinct" requirement is what makes this a
//! multiset match rather than independent per-literal search, and is why the
//! recursive matcher below carries a pick-list marking which literals of `D`
//! are already spoken for.

use crate::clause::Clause;
use crate::config::{SubsumptionConfig, SubsumptionStats};
use crate::substitution::Substitution;

use super::unit::{literal_subsumes_one, unit_clause_subsumes_clause};

/// Cheap necessary conditions checked before anything else: a clause with
/// more literals than the candidate, or a strictly heavier weight, or more
/// positive/negative literals than the candidate has of that polarity,
/// cannot subsume it.
fn cheap_prechecks(subsumer: &Clause, candidate: &Clause) -> bool {
    subsumer.len() <= candidate.len()
        && subsumer.weight() <= candidate.weight()
        && subsumer.pos_lit_no() <= candidate.pos_lit_no()
        && subsumer.neg_lit_no() <= candidate.neg_lit_no()
}

/// A necessary (not sufficient) condition checked only when `candidate` has
/// at least three positive or three negative literals: every literal of
/// `subsumer` must have *some* literal of `candidate` it can match in
/// isolation (sign, equational-literal flag, orientation, and a successful
/// [`literal_subsumes_one`]), ignoring the pick-list that the real recursive
/// search needs to keep matches distinct. Each subsumer literal gets its own
/// fresh substitution, backtracked between candidates, exactly as
/// `find_spec_literal` allocates one `Subst_p` per call. Corresponds to
/// `check_subsumption_possibility`/`find_spec_literal`.
fn check_subsumption_possibility(subsumer: &Clause, candidate: &Clause) -> bool {
    subsumer.literals().iter().all(|lit| {
        let mut subst = Substitution::new();
        candidate.literals().iter().any(|target_lit| {
            let mark = subst.checkpoint();
            if literal_subsumes_one(&mut subst, lit, target_lit) {
                true
            } else {
                subst.rollback(mark);
                false
            }
        })
    })
}

/// Recursively tries to map literals `subsumer[next..]` onto distinct
/// not-yet-picked literals of `candidate`, extending `subst` as it goes.
/// Corresponds to `eqn_list_rec_subsume`'s backtracking search with a
/// pick-list (`picked`) standing in for the original's boolean array marking
/// which candidate literals are already used by this branch.
fn rec_subsume(subst: &mut Substitution, subsumer: &Clause, candidate: &Clause, next: usize, picked: &mut [bool]) -> bool {
    if next == subsumer.literals().len() {
        return true;
    }
    let lit = &subsumer.literals()[next];
    for (i, target_lit) in candidate.literals().iter().enumerate() {
        if picked[i] {
            continue;
        }
        let mark = subst.checkpoint();
        if literal_subsumes_one(subst, lit, target_lit) {
            picked[i] = true;
            if rec_subsume(subst, subsumer, candidate, next + 1, picked) {
                return true;
            }
            picked[i] = false;
        }
        subst.rollback(mark);
    }
    false
}

/// Does `subsumer` subsume `candidate`? Corresponds to `ClauseSubsumesClause`
/// / `clause_subsumes_clause`, including its dispatch to
/// [`unit_clause_subsumes_clause`] for a single-literal `subsumer` (which
/// skips the recursive picking machinery, and the telemetry counters,
/// entirely) and its call-count bookkeeping: `stats` gains one "outer call"
/// tally per multi-literal attempt and one "reached the recursion" tally per
/// attempt that survives both cheap pre-checks.
pub fn clause_subsumes_clause(subsumer: &Clause, candidate: &Clause, config: &SubsumptionConfig, stats: &SubsumptionStats) -> bool {
    debug_assert!(subsumer.len() > 0);
    if subsumer.len() == 1 {
        return unit_clause_subsumes_clause(subsumer, candidate, config);
    }

    stats.record_call();

    if !cheap_prechecks(subsumer, candidate) {
        log::trace!("rejected by cheap pre-check: {subsumer} vs {candidate}");
        return false;
    }
    if (candidate.pos_lit_no() >= 3 || candidate.neg_lit_no() >= 3) && !check_subsumption_possibility(subsumer, candidate) {
        log::trace!("rejected by possibility check: {subsumer} vs {candidate}");
        return false;
    }

    stats.record_recursive_call();
    let mut subst = Substitution::new();
    let mut picked = vec![false; candidate.len()];
    let result = rec_subsume(&mut subst, subsumer, candidate, 0, &mut picked);
    log::trace!("multiset subsumption {subsumer} vs {candidate}: {result}");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{ClauseId, Literal};
    use crate::term::TermBank;

    #[test]
    fn two_literal_clause_subsumes_with_distinct_picks() {
        let mut tb = TermBank::new();
        let x = tb.variable("X");
        let y = tb.variable("Y");
        let a = tb.constant("a");
        let b = tb.constant("b");

        let candidate = Clause::new(
            ClauseId(0),
            vec![Literal::new(x.clone(), x, true), Literal::new(y.clone(), y, true)],
        );
        let target = Clause::new(
            ClauseId(1),
            vec![Literal::new(a.clone(), a, true), Literal::new(b.clone(), b, true)],
        );

        let config = SubsumptionConfig::default();
        let stats = SubsumptionStats::new();
        assert!(clause_subsumes_clause(&candidate, &target, &config, &stats));
        assert_eq!(stats.clause_clause_calls.get(), 1);
        assert_eq!(stats.clause_clause_calls_recursive.get(), 1);
    }

    #[test]
    fn each_target_literal_used_at_most_once() {
        let mut tb = TermBank::new();
        let x = tb.variable("X");
        let y = tb.variable("Y");
        let a = tb.constant("a");

        // Two candidate literals that could both match the *same* target
        // literal -- but there's only one target literal, so this must fail.
        let candidate = Clause::new(
            ClauseId(0),
            vec![Literal::new(x.clone(), x, true), Literal::new(y.clone(), y, true)],
        );
        let target = Clause::new(ClauseId(1), vec![Literal::new(a.clone(), a, true)]);

        let config = SubsumptionConfig::default();
        let stats = SubsumptionStats::new();
        assert!(!clause_subsumes_clause(&candidate, &target, &config, &stats));
    }

    #[test]
    fn more_literals_than_target_cannot_subsume() {
        let mut tb = TermBank::new();
        let a = tb.constant("a");
        let b = tb.constant("b");

        let candidate = Clause::new(
            ClauseId(0),
            vec![Literal::new(a.clone(), a.clone(), true), Literal::new(b.clone(), b.clone(), true)],
        );
        let target = Clause::new(ClauseId(1), vec![Literal::new(a, a, true)]);

        let config = SubsumptionConfig::default();
        let stats = SubsumptionStats::new();
        assert!(!clause_subsumes_clause(&candidate, &target, &config, &stats));
    }

    #[test]
    fn single_literal_subsumer_dispatches_to_unit_path_without_stats() {
        let mut tb = TermBank::new();
        let x = tb.variable("X");
        let a = tb.constant("a");

        let candidate = Clause::new(ClauseId(0), vec![Literal::new(x.clone(), x, true)]);
        let target = Clause::new(ClauseId(1), vec![Literal::new(a.clone(), a, true)]);

        let config = SubsumptionConfig::default();
        let stats = SubsumptionStats::new();
        assert!(clause_subsumes_clause(&candidate, &target, &config, &stats));
        assert_eq!(stats.clause_clause_calls.get(), 0);
        assert_eq!(stats.clause_clause_calls_recursive.get(), 0);
    }

    #[test]
    fn possibility_check_rejects_when_a_literal_has_no_candidate_at_all() {
        let mut tb = TermBank::new();
        let a = tb.constant("a");
        let b = tb.constant("b");
        let c = tb.constant("c");

        // Three negative literals in the candidate trips the possibility
        // check; "b = b" in the subsumer has no matching literal at all in
        // the candidate, so this must fail fast rather than recurse.
        let candidate = Clause::new(
            ClauseId(0),
            vec![
                Literal::new(a.clone(), a.clone(), false),
                Literal::new(c.clone(), c.clone(), false),
                Literal::new(a.clone(), c.clone(), false),
            ],
        );
        let subsumer = Clause::new(
            ClauseId(1),
            vec![Literal::new(a, a, false), Literal::new(b.clone(), b, false)],
        );

        let config = SubsumptionConfig::default();
        let stats = SubsumptionStats::new();
        assert!(!clause_subsumes_clause(&subsumer, &candidate, &config, &stats));
        assert_eq!(stats.clause_clause_calls_recursive.get(), 0);
    }
}
