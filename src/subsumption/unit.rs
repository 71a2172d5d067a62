//! Unit-clause subsumption.
//!
//! Grounded on `ccl_subsumption.c`'s `eqn_topsubsumes_termpair`,
//! `eqn_subsumes_termpair`, `LiteralSubsumesClause`,
//! `unit_clause_set_strongsubsumes_termpair` and
//! `unit_clause_set_subsumes_clause`.
//!
//! `LiteralSubsumesClause`'s negative/negative branch in the original source
//! returns `false` the moment it finds a top-matching negative literal,
//! instead of `true` as every other branch does (quite possibly a
//! transcription bug in the original, but one this crate reproduces verbatim
//! rather than "fix") -- see `negative_negative_top_match_short_circuits_to_false`
//! below.

use crate::clause::{Clause, Literal};
use crate::config::SubsumptionConfig;
use crate::substitution::Substitution;
use crate::term::Term;

/// Tries to match `(pl, pr)` onto `(tl, tr)` directly, or onto the swapped
/// pairing `(tr, tl)`. Each attempt is atomic: a failed attempt leaves no
/// partial bindings behind. Corresponds to `eqn_topsubsumes_termpair`.
fn eqn_topsubsumes(subst: &mut Substitution, pl: &Term, pr: &Term, tl: &Term, tr: &Term) -> bool {
    if subst.try_match_pair(pl, tl, pr, tr) {
        return true;
    }
    subst.try_match_pair(pl, tr, pr, tl)
}

/// As [`eqn_topsubsumes`], but if the fixed equation `(el, er)` fails to
/// top-match `(t1, t2)`, and `t1`/`t2` themselves share a top symbol, home in
/// on the single argument position where `t1` and `t2` differ from *each
/// other* and retry there -- so a fixed unit `f(x) = g(x)` subsumes
/// `h(f(a)) = h(g(a))` by descending from `(h(f(a)), h(g(a)))` to
/// `(f(a), g(a))`, where it top-matches. If `t1` and `t2` turn out to be
/// already-identical at some depth (no argument position differs), the pair
/// is trivially subsumed (a literal `t = t` is a tautology, vacuously
/// subsumed by anything). Corresponds to `eqn_subsumes_termpair`: note that
/// `el`/`er` never themselves descend, only the target pair `t1`/`t2` does.
fn eqn_subsumes(subst: &mut Substitution, el: &Term, er: &Term, t1: &Term, t2: &Term) -> bool {
    let mut t1 = t1.clone();
    let mut t2 = t2.clone();
    loop {
        if eqn_topsubsumes(subst, el, er, &t1, &t2) {
            return true;
        }
        if !t1.same_top(&t2) || t1.arity() == 0 {
            return false;
        }
        let mut differing = None;
        for (i, (a, b)) in t1.args().iter().zip(t2.args()).enumerate() {
            if a != b {
                if differing.is_some() {
                    return false;
                }
                differing = Some(i);
            }
        }
        match differing {
            None => return true,
            Some(i) => {
                t1 = t1.args()[i].clone();
                t2 = t2.args()[i].clone();
            }
        }
    }
}

/// If `pattern` and `target` share a top symbol and differ in exactly one
/// argument position, tries to match that one differing pair; every other
/// argument pair must already be syntactically identical (pointer-equal,
/// since terms are hash-consed). Returns `false` if they differ in zero or
/// more than one position, or don't share a top symbol at all. Used by the
/// unit-clause-*set* strong walk ([`unit_clause_set_subsumes_clause`]),
/// which needs to advance a pair of terms one congruence step at a time
/// between set-wide probes.
fn single_differing_arg(pattern: &Term, target: &Term) -> Option<(Term, Term)> {
    if pattern.is_variable() || target.is_variable() || !pattern.same_top(target) {
        return None;
    }
    let mut differing = None;
    for (i, (p, t)) in pattern.args().iter().zip(target.args()).enumerate() {
        if p != t {
            if differing.is_some() {
                return None;
            }
            differing = Some(i);
        }
    }
    differing.map(|i| (pattern.args()[i].clone(), target.args()[i].clone()))
}

/// Does `lit` subsume some literal of `clause`? Corresponds to
/// `LiteralSubsumesClause`, including its pinned negative/negative quirk: as
/// soon as a negative literal of `lit`'s polarity top-matches a negative
/// literal of `clause`, this returns `false` rather than `true` -- so a unit
/// negative equation never reports subsuming a clause via this path. Positive
/// literals use descent (`eqn_subsumes`); negative literals use a top-only
/// match (`eqn_topsubsumes`) -- unconditionally: unlike unit-clause-*set*
/// subsumption ([`unit_clause_set_subsumes_clause`]), this single-literal
/// primitive has no strong/weak configuration knob.
pub fn literal_subsumes_clause(subst: &mut Substitution, lit: &Literal, clause: &Clause) -> bool {
    for target in clause.literals() {
        if lit.is_positive() != target.is_positive() {
            continue;
        }
        let (pl, pr) = lit.sides();
        let (tl, tr) = target.sides();
        let mark = subst.checkpoint();
        let matched = if lit.is_positive() {
            eqn_subsumes(subst, pl, pr, tl, tr)
        } else {
            eqn_topsubsumes(subst, pl, pr, tl, tr)
        };
        if matched {
            if lit.is_positive() {
                return true;
            }
            // Pinned quirk (see module docs): negative/negative top match
            // short-circuits the whole clause to "not subsumed".
            subst.rollback(mark);
            return false;
        }
        subst.rollback(mark);
    }
    false
}

/// Does the single-literal `unit` subsume `target`? `unit` must have exactly
/// one literal. Corresponds to `UnitClauseSubsumesClause`.
pub fn unit_clause_subsumes_clause(unit: &Clause, target: &Clause, _config: &SubsumptionConfig) -> bool {
    debug_assert_eq!(unit.len(), 1, "unit_clause_subsumes_clause requires a unit clause");
    let mut subst = Substitution::new();
    literal_subsumes_clause(&mut subst, &unit.literals()[0], target)
}

/// Matches a single literal of a multi-literal subsumer against a single
/// candidate literal of the target clause, for the recursive multiset
/// matcher in `subsumption::multiset`. Unlike [`literal_subsumes_clause`]'s
/// primitives, this is a *plain* pattern match with no congruence descent:
/// sign and the equational-literal flag must agree, and the swapped pairing
/// is only tried when `u_lit` is not
/// [`Literal::is_oriented`] -- an oriented literal has already committed to
/// one direction. Corresponds to the per-candidate match inside
/// `eqn_list_rec_subsume`.
pub(crate) fn literal_subsumes_one(subst: &mut Substitution, u_lit: &Literal, d_lit: &Literal) -> bool {
    if u_lit.is_positive() != d_lit.is_positive() || u_lit.is_equational() != d_lit.is_equational() {
        return false;
    }
    if u_lit.is_oriented() && !d_lit.is_oriented() {
        return false;
    }
    let (pl, pr) = u_lit.sides();
    let (tl, tr) = d_lit.sides();
    if subst.try_match_pair(pl, tl, pr, tr) {
        return true;
    }
    if u_lit.is_oriented() {
        return false;
    }
    subst.try_match_pair(pl, tr, pr, tl)
}

/// Probes every unit in `units` for one whose equation top-matches `(t1,
/// t2)` (either orientation), with no descent -- the plain "single lookup"
/// case used both directly by the weak variant of
/// [`unit_clause_set_subsumes_clause`] and by the strong variant at each
/// congruence step.
pub(crate) fn probe_units_top<'a>(units: impl IntoIterator<Item = &'a Clause>, t1: &Term, t2: &Term) -> Option<&'a Clause> {
    units.into_iter().find(|unit| {
        let eqn = &unit.literals()[0];
        let mut subst = Substitution::new();
        eqn_topsubsumes(&mut subst, &eqn.lterm, &eqn.rterm, t1, t2)
    })
}

/// The strong variant of positive unit-set forward subsumption: walks
/// `(t1, t2)` down congruent pairs exactly as [`eqn_subsumes`] does for a
/// single equation, but re-probes the *whole* unit set at each level instead
/// of matching against one fixed equation. Corresponds to
/// `unit_clause_set_strongsubsumes_termpair`.
pub(crate) fn strong_probe_units<'a>(
    units: impl IntoIterator<Item = &'a Clause> + Clone,
    t1: &Term,
    t2: &Term,
) -> Option<&'a Clause> {
    let mut t1 = t1.clone();
    let mut t2 = t2.clone();
    loop {
        if let Some(unit) = probe_units_top(units.clone(), &t1, &t2) {
            return Some(unit);
        }
        match single_differing_arg(&t1, &t2) {
            Some((next1, next2)) => {
                t1 = next1;
                t2 = next2;
            }
            None => return None,
        }
    }
}

/// Finds a unit clause in `units` that subsumes `target`, if any. Corresponds
/// to `UnitClauseSetSubsumesClause` / `unit_clause_set_subsumes_clause`.
///
/// This is deliberately *not* built from [`literal_subsumes_clause`]: the
/// original's `unit_clause_set_subsumes_clause` walks `target`'s literals
/// and, for each, searches the set for a top-matching unit of the same
/// polarity -- a plain top-match search with no "return false on
/// negative/negative match" quirk. That quirk belongs only to
/// `LiteralSubsumesClause`, which this function never calls. For a positive
/// target literal, `config.strong_unit_forward_subsumption` chooses between
/// the congruence-descent set-wide walk (strong) and a single top-level
/// probe (weak); a negative target literal always gets a single top-level
/// probe against the set's negative units, since the original has no
/// "strong" negative variant.
pub fn unit_clause_set_subsumes_clause<'a>(
    units: impl IntoIterator<Item = &'a Clause> + Clone,
    target: &Clause,
    config: &SubsumptionConfig,
) -> Option<&'a Clause> {
    for target_lit in target.literals() {
        let same_sign = units.clone().into_iter().filter(|u| {
            debug_assert_eq!(u.len(), 1, "unit_clause_set_subsumes_clause requires unit clauses");
            u.literals()[0].is_positive() == target_lit.is_positive()
        });
        let found = if target_lit.is_positive() && config.strong_unit_forward_subsumption {
            strong_probe_units(same_sign, &target_lit.lterm, &target_lit.rterm)
        } else {
            probe_units_top(same_sign, &target_lit.lterm, &target_lit.rterm)
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::ClauseId;
    use crate::term::TermBank;

    #[test]
    fn positive_unit_subsumes_matching_positive_literal() {
        let mut tb = TermBank::new();
        let x = tb.variable("X");
        let a = tb.constant("a");

        let unit = Clause::new(ClauseId(0), vec![Literal::new(x.clone(), x, true)]);
        let target = Clause::new(ClauseId(1), vec![Literal::new(a.clone(), a, true)]);

        let config = SubsumptionConfig::default();
        assert!(unit_clause_subsumes_clause(&unit, &target, &config));
    }

    #[test]
    fn polarity_mismatch_never_subsumes() {
        let mut tb = TermBank::new();
        let a = tb.constant("a");

        let unit = Clause::new(ClauseId(0), vec![Literal::new(a.clone(), a.clone(), true)]);
        let target = Clause::new(ClauseId(1), vec![Literal::new(a.clone(), a, false)]);

        let config = SubsumptionConfig::default();
        assert!(!unit_clause_subsumes_clause(&unit, &target, &config));
    }

    #[test]
    fn negative_negative_top_match_short_circuits_to_false() {
        let mut tb = TermBank::new();
        let x = tb.variable("X");
        let a = tb.constant("a");

        // unit: X != X (trivially matches anything at the top)
        let unit = Clause::new(ClauseId(0), vec![Literal::new(x.clone(), x, false)]);
        // target has a negative literal that the unit top-matches.
        let target = Clause::new(ClauseId(1), vec![Literal::new(a.clone(), a, false)]);

        let config = SubsumptionConfig::default();
        // Per the pinned quirk this is `false`, not `true`, even though the
        // literal genuinely top-matches.
        assert!(!unit_clause_subsumes_clause(&unit, &target, &config));
    }

    #[test]
    fn descent_matches_single_differing_argument() {
        let mut tb = TermBank::new();
        let x = tb.variable("X");
        let y = tb.variable("Y");
        let a = tb.constant("a");
        let b = tb.constant("b");
        let c = tb.constant("c");

        let pl = tb.function("f", &[a.clone(), x.clone()]);
        let pr = tb.function("f", &[a.clone(), y.clone()]);
        let unit = Clause::new(ClauseId(0), vec![Literal::new(pl, pr, true)]);

        let tl = tb.function("f", &[a.clone(), b]);
        let tr = tb.function("f", &[a, c]);
        let target = Clause::new(ClauseId(1), vec![Literal::new(tl, tr, true)]);

        let config = SubsumptionConfig::default();
        assert!(unit_clause_subsumes_clause(&unit, &target, &config));
    }

    #[test]
    fn unit_set_strong_walk_finds_subsumer_several_levels_down() {
        let mut tb = TermBank::new();
        let x = tb.variable("X");
        let a = tb.constant("a");

        // f(X) = g(X) lets us rewrite under h(_) at depth 1.
        let fx = tb.function("f", &[x.clone()]);
        let gx = tb.function("g", &[x]);
        let units = vec![Clause::new(ClauseId(0), vec![Literal::new(fx, gx, true)])];

        let hfa = tb.function("h", &[tb.function("f", &[a.clone()])]);
        let hga = tb.function("h", &[tb.function("g", &[a])]);
        let target = Clause::new(ClauseId(1), vec![Literal::new(hfa, hga, true)]);

        let config = SubsumptionConfig {
            strong_unit_forward_subsumption: true,
            ..SubsumptionConfig::default()
        };
        assert!(unit_clause_set_subsumes_clause(units.iter(), &target, &config).is_some());
    }

    #[test]
    fn unit_set_weak_lookup_does_not_descend() {
        let mut tb = TermBank::new();
        let x = tb.variable("X");
        let a = tb.constant("a");

        let fx = tb.function("f", &[x.clone()]);
        let gx = tb.function("g", &[x]);
        let units = vec![Clause::new(ClauseId(0), vec![Literal::new(fx, gx, true)])];

        let hfa = tb.function("h", &[tb.function("f", &[a.clone()])]);
        let hga = tb.function("h", &[tb.function("g", &[a])]);
        let target = Clause::new(ClauseId(1), vec![Literal::new(hfa, hga, true)]);

        let config = SubsumptionConfig {
            strong_unit_forward_subsumption: false,
            ..SubsumptionConfig::default()
        };
        // The weak lookup only tries (h(f(a)), h(g(a))) at the top -- it
        // never descends to (f(a), g(a)), so it must fail here even though
        // the strong walk (previous test) succeeds on the same input.
        assert!(unit_clause_set_subsumes_clause(units.iter(), &target, &config).is_none());
    }
}
