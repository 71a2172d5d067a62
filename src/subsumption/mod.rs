//! Clause subsumption: unit fast path, general multiset matcher,
//! feature-vector pruning, and set-level drivers with simplify-reflect.
//!
//! See `ccl_subsumption.c` for the original this module is grounded on.

pub mod driver;
pub mod fv_index;
pub mod multiset;
pub mod unit;

pub use driver::{negative_simplify_reflect, positive_simplify_reflect, ClauseSet};
pub use fv_index::{FeatureVector, FvIndex};
pub use multiset::clause_subsumes_clause;
pub use unit::{literal_subsumes_clause, unit_clause_set_subsumes_clause, unit_clause_subsumes_clause};
