//! A checkpointed, append-only substitution stack.
//!
//! Grounded on `ccl_subsumption.c`'s `SubstComputeMatch`/`SubstBacktrackToPos`
//! contract and, for the truncate-to-rollback discipline, on
//! `libraries/sabre/src/utilities/configuration_stack.rs`'s `jump_back`.
//! Every top-level entry point checkpoints before it starts binding and
//! rolls back to that mark on every exit path, including failure -- so two
//! calls into the same [`Substitution`] never see each other's bindings.

use crate::term::Term;

/// A position in the binding stack, returned by [`Substitution::checkpoint`]
/// and consumed by [`Substitution::rollback`].
pub type Mark = usize;

/// An append-only stack of variable bindings with checkpoint/rollback.
#[derive(Default)]
pub struct Substitution {
    bindings: Vec<(Term, Term)>,
}

impl Substitution {
    pub fn new() -> Substitution {
        Substitution::default()
    }

    /// Records the current stack depth for a later [`Substitution::rollback`].
    pub fn checkpoint(&self) -> Mark {
        self.bindings.len()
    }

    /// Unbinds every variable bound since `mark` was taken. `mark` must come
    /// from a prior call to [`Substitution::checkpoint`] on this substitution.
    pub fn rollback(&mut self, mark: Mark) {
        debug_assert!(mark <= self.bindings.len(), "rollback mark is not a valid prior checkpoint");
        self.bindings.truncate(mark);
    }

    /// Looks up the current binding of `var`, if any. `var` must be a
    /// variable term; the most recent binding wins (there should only ever
    /// be one live binding per variable at a time).
    fn lookup(&self, var: &Term) -> Option<&Term> {
        self.bindings.iter().rev().find(|(v, _)| v == var).map(|(_, t)| t)
    }

    fn bind(&mut self, var: Term, term: Term) {
        self.bindings.push((var, term));
    }

    /// Attempts to extend the substitution so that `pattern` matches `target`
    /// (first-order pattern matching: only `pattern`'s variables may be
    /// bound; `target` is treated as ground with respect to them). Returns
    /// `true` on success, having bound zero or more variables; on failure the
    /// substitution is left exactly as a caller would find it after
    /// `rollback`ing to the checkpoint taken at the start of this call --
    /// callers that need atomicity across several `try_match` calls must
    /// checkpoint/rollback around the whole sequence themselves (see
    /// `subsumption::multiset`).
    pub fn try_match(&mut self, pattern: &Term, target: &Term) -> bool {
        if pattern.is_variable() {
            match self.lookup(pattern) {
                Some(bound) => bound == target,
                None => {
                    self.bind(pattern.clone(), target.clone());
                    true
                }
            }
        } else {
            if target.is_variable() || !pattern.same_top(target) {
                return false;
            }
            debug_assert_eq!(pattern.arity(), target.arity());
            pattern
                .args()
                .iter()
                .zip(target.args())
                .all(|(p, t)| self.try_match(p, t))
        }
    }

    /// Matches a pair of sides at once (`pl⇝tl ∧ pr⇝tr`), rolling back fully
    /// if either side fails -- used by `eqn_topsubsumes`.
    pub fn try_match_pair(&mut self, pl: &Term, tl: &Term, pr: &Term, tr: &Term) -> bool {
        let mark = self.checkpoint();
        if self.try_match(pl, tl) && self.try_match(pr, tr) {
            true
        } else {
            self.rollback(mark);
            false
        }
    }
}
