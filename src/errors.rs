// SPDX-License-Identifier: Apache-2.0

//!
//! Error codes
//!

use thiserror::Error;

///
/// Error codes produced by operations on automata and Boolean algebras
///
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum Error {
    /// The satisfiability oracle of a Boolean algebra exceeded its budget.
    ///
    /// Surfaced unchanged by every operation that queries the oracle:
    /// automaton construction, normalization, Boolean products, and
    /// equivalence checking. Not recoverable: partial results are discarded.
    #[error("satisfiability solver exceeded its budget")]
    SolverTimeout,

    /// An argument violates a structural precondition.
    ///
    /// Produced when a substitution table has no entry for a state that
    /// occurs in the expression being rewritten.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
}
