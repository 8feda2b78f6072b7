// SPDX-License-Identifier: Apache-2.0

//! Symbolic alternating finite automata
//!
//! # Overview
//!
//! This crate implements automata that generalize finite automata along two
//! axes: transition guards are *predicates* from an abstract
//! [Boolean algebra](crate::boolean_algebras) over the symbol domain rather
//! than concrete symbols, and transition targets are
//! [positive Boolean formulas](crate::state_expressions) over states rather
//! than single successor states.
//!
//! The [safa](crate::safa) module provides construction, word acceptance,
//! normalization to pairwise-disjoint guards, and language union and
//! intersection. The [equivalence](crate::equivalence) module decides
//! language equivalence of two automata by a bisimulation-up-to-congruence
//! search whose visited relation is discharged through a SAT solver.
//!
//! The core is parameterized by the predicate theory: any type implementing
//! [BooleanAlgebra](crate::boolean_algebras::BooleanAlgebra) can supply the
//! guards. A concrete algebra over character intervals is provided in
//! [character_sets](crate::character_sets).
//!

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod boolean_algebras;
pub mod character_sets;
pub mod equivalence;
pub mod errors;
pub mod safa;
pub mod state_expressions;

mod state_sets;
