//! Compact subterm positions.
//!
//! The original (`ccl_overlap_index.c`'s `term_collect_into_terms_pos`,
//! `eqn_collect_into_terms_pos` and `ClauseCollectIntoTermsPos`/
//! `ClauseCollectFromTermsPos`) names a subterm by a single running integer
//! offset across the whole clause: walking literal by literal, each literal
//! contributes its [`Literal::weight`] worth of address space before the next
//! one starts, and within a literal each function symbol occurrence consumes
//! a fixed [`DEFAULT_FWEIGHT`] before its arguments begin, with each argument
//! then advancing the running offset by its own [`Term::weight`]. A compact
//! position is exactly that offset -- no separate side/path is carried, since
//! the offset alone is enough to walk back down to the named subterm (see
//! [`subterm_at`]).

use crate::clause::{Clause, Literal};
use crate::term::{Term, DEFAULT_FWEIGHT};

/// A clause-wide compact position: the cumulative-weight offset of a subterm,
/// counted from the start of the clause's literal list. Two equal positions
/// always name the same subterm of the same clause.
pub type CompactPos = usize;

/// Depth-first collection of every non-variable subterm of `term`, starting
/// at `pos`, paired with its position. Corresponds to
/// `term_collect_into_terms_pos`: the term itself is recorded at `pos`, then
/// each argument is visited starting `DEFAULT_FWEIGHT` past its parent,
/// advancing by the *previous* argument's real weight between siblings.
fn collect_term_into(term: &Term, pos: CompactPos, out: &mut Vec<(CompactPos, Term)>) {
    if term.is_variable() {
        return;
    }
    out.push((pos, term.clone()));
    let mut arg_pos = pos + DEFAULT_FWEIGHT;
    for arg in term.args() {
        collect_term_into(arg, arg_pos, out);
        arg_pos += arg.weight() as usize;
    }
}

/// As [`collect_term_into`], but only the terms, not their positions.
/// Corresponds to `term_collect_into_terms`.
fn collect_term_into_terms(term: &Term, out: &mut Vec<Term>) {
    if term.is_variable() {
        return;
    }
    out.push(term.clone());
    for arg in term.args() {
        collect_term_into_terms(arg, out);
    }
}

/// Every non-variable subterm of a literal's maximal side(s), starting at
/// `lit_pos`. A non-oriented literal contributes both sides (`rterm` starting
/// `lterm.weight()` past `lit_pos`); an oriented one contributes only
/// `lterm`. Corresponds to `eqn_collect_into_terms_pos`.
fn collect_literal_into(lit: &Literal, lit_pos: CompactPos, out: &mut Vec<(CompactPos, Term)>) {
    collect_term_into(&lit.lterm, lit_pos, out);
    if !lit.is_oriented() {
        collect_term_into(&lit.rterm, lit_pos + lit.lterm.weight() as usize, out);
    }
}

fn collect_literal_into_terms(lit: &Literal, out: &mut Vec<Term>) {
    collect_term_into_terms(&lit.lterm, out);
    if !lit.is_oriented() {
        collect_term_into_terms(&lit.rterm, out);
    }
}

/// Every `(position, term)` pair a paramodulation inference may rewrite
/// *into*: the non-variable subterms of every maximal literal's maximal
/// side(s). Corresponds to `ClauseCollectIntoTermsPos`.
pub fn collect_into_terms_pos(clause: &Clause) -> Vec<(CompactPos, Term)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    for lit in clause.literals() {
        if lit.is_maximal() {
            collect_literal_into(lit, pos, &mut out);
        }
        pos += lit.weight() as usize;
    }
    out
}

/// As [`collect_into_terms_pos`], without positions. Corresponds to
/// `ClauseCollectIntoTerms`.
pub fn collect_into_terms(clause: &Clause) -> Vec<Term> {
    let mut out = Vec::new();
    for lit in clause.literals() {
        if lit.is_maximal() {
            collect_literal_into_terms(lit, &mut out);
        }
    }
    out
}

/// Every `(position, term)` pair a paramodulation inference may rewrite
/// *from*: just the top of a maximal, positive, unselected literal's maximal
/// side(s) -- no descent into arguments, since "from" positions are whole
/// equality sides, not arbitrary subterms. Corresponds to
/// `ClauseCollectFromTermsPos`.
pub fn collect_from_terms_pos(clause: &Clause) -> Vec<(CompactPos, Term)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    for lit in clause.literals() {
        if lit.is_maximal() && lit.is_positive() && !lit.is_selected() {
            out.push((pos, lit.lterm.clone()));
            if !lit.is_oriented() {
                out.push((pos + lit.lterm.weight() as usize, lit.rterm.clone()));
            }
        }
        pos += lit.weight() as usize;
    }
    out
}

/// As [`collect_from_terms_pos`], without positions. Corresponds to
/// `ClauseCollectFromTerms`.
pub fn collect_from_terms(clause: &Clause) -> Vec<Term> {
    let mut out = Vec::new();
    for lit in clause.literals() {
        if lit.is_maximal() && lit.is_positive() && !lit.is_selected() {
            out.push(lit.lterm.clone());
            if !lit.is_oriented() {
                out.push(lit.rterm.clone());
            }
        }
    }
    out
}

/// Resolves a [`CompactPos`] back to the subterm of `clause` it names, or
/// `None` if it doesn't name a valid subterm (out of range, or falling in the
/// address-space gap a function symbol's [`DEFAULT_FWEIGHT`] reserves before
/// its first argument when the symbol's own weight differs from it).
/// Corresponds to `ClauseCPosGetSubterm`/`TermCPosGetSubterm`.
pub fn subterm_at(clause: &Clause, pos: CompactPos) -> Option<Term> {
    let mut offset = 0usize;
    for lit in clause.literals() {
        let lit_weight = lit.weight() as usize;
        if pos < offset + lit_weight {
            let local = pos - offset;
            let l_weight = lit.lterm.weight() as usize;
            return if local < l_weight {
                term_at(&lit.lterm, local)
            } else {
                term_at(&lit.rterm, local - l_weight)
            };
        }
        offset += lit_weight;
    }
    None
}

/// Resolves a position relative to `term`'s own start (`0` names `term`
/// itself) back to a subterm.
fn term_at(term: &Term, local: usize) -> Option<Term> {
    if local == 0 {
        return Some(term.clone());
    }
    if term.is_variable() {
        return None;
    }
    let mut rel = local.checked_sub(DEFAULT_FWEIGHT)?;
    for arg in term.args() {
        let w = arg.weight() as usize;
        if rel < w {
            return term_at(arg, rel);
        }
        rel -= w;
    }
    None
}
