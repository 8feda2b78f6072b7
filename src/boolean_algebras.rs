// SPDX-License-Identifier: Apache-2.0

//!
//! Boolean algebras of predicates
//!
//! Transition guards of a symbolic automaton are not concrete symbols but
//! *predicates* over an abstract symbol domain. This module defines the
//! capability set an automaton needs from such a predicate theory: closure
//! under conjunction, disjunction and negation, a satisfiability oracle, and
//! evaluation of a predicate on a concrete symbol.
//!
//! The module also defines [minterms](Minterm). Given predicates
//! p<sub>0</sub>, ..., p<sub>n-1</sub>, a minterm is a satisfiable
//! conjunction that picks one polarity for each p<sub>i</sub>. The minterms
//! of a predicate list partition the symbol domain: they are pairwise
//! disjoint, their union is the full domain, and every satisfiable polarity
//! combination occurs exactly once. Minterm enumeration is what lets an
//! automaton be rebuilt with pairwise-disjoint guards
//! (see [normalize](crate::safa::Safa::normalize)).
//!
//! A concrete algebra over character intervals is provided in
//! [character_sets](crate::character_sets).
//!

use crate::errors::Error;

///
/// A minterm over a list of input predicates
///
/// Records the refined predicate (the satisfiable conjunction) together with
/// the polarity chosen for each input: `is_positive(i)` holds iff input
/// predicate i was taken positively.
///
#[derive(Debug, Clone)]
pub struct Minterm<P> {
    guard: P,
    positive: Box<[bool]>,
}

impl<P> Minterm<P> {
    /// The refined predicate: conjunction of the positive inputs and the
    /// negations of all the others.
    pub fn guard(&self) -> &P {
        &self.guard
    }

    /// Polarity of input predicate i
    ///
    /// # Panics
    ///
    /// If i is not smaller than the number of input predicates.
    pub fn is_positive(&self, i: usize) -> bool {
        self.positive[i]
    }

    /// Indices of the inputs taken positively, in increasing order
    pub fn positives(&self) -> impl Iterator<Item = usize> + '_ {
        self.positive
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(i, _)| i)
    }

    /// Check whether no input was taken positively
    pub fn all_negative(&self) -> bool {
        !self.positive.iter().any(|&b| b)
    }
}

///
/// Capability set of a Boolean algebra of predicates
///
/// The automaton core never inspects the structure of a predicate; it only
/// combines predicates through this trait. The constructors `mk_and`,
/// `mk_or`, `mk_not`, `mk_true`, and `mk_false` are total. The
/// satisfiability oracle may give up: [is_satisfiable](Self::is_satisfiable)
/// reports [Error::SolverTimeout] when its budget is exceeded, and every
/// automaton operation propagates that error unchanged. Deadlines are the
/// algebra's responsibility; the core performs no internal polling.
///
pub trait BooleanAlgebra {
    /// Predicates over the symbol domain
    type Pred: Clone;

    /// The symbol domain
    type Sym;

    /// The predicate satisfied by every symbol
    fn mk_true(&self) -> Self::Pred;

    /// The predicate satisfied by no symbol
    fn mk_false(&self) -> Self::Pred;

    /// Conjunction of two predicates
    fn mk_and(&self, p: &Self::Pred, q: &Self::Pred) -> Self::Pred;

    /// Disjunction of two predicates
    fn mk_or(&self, p: &Self::Pred, q: &Self::Pred) -> Self::Pred;

    /// Negation of a predicate
    fn mk_not(&self, p: &Self::Pred) -> Self::Pred;

    /// Check whether some symbol satisfies p
    ///
    /// # Errors
    ///
    /// [Error::SolverTimeout] if the oracle exceeds its budget.
    fn is_satisfiable(&self, p: &Self::Pred) -> Result<bool, Error>;

    /// Check whether symbol x satisfies p
    fn evaluate(&self, p: &Self::Pred, x: &Self::Sym) -> bool;

    ///
    /// Enumerate the minterms of a predicate list
    ///
    /// The result partitions the symbol domain:
    /// - returned guards are pairwise unsatisfiable when conjoined
    /// - the disjunction of the returned guards is the full domain
    /// - every satisfiable polarity combination of the inputs is
    ///   represented exactly once
    ///
    /// An empty input list produces the single minterm `true` with no
    /// positive entries.
    ///
    /// The provided implementation splits the domain by each input in turn
    /// and prunes unsatisfiable branches, so it calls the oracle at most
    /// 2<sup>|preds|+1</sup> times. Algebras with a cheaper native
    /// enumeration may override it.
    ///
    /// # Errors
    ///
    /// [Error::SolverTimeout] if the oracle exceeds its budget.
    ///
    fn minterms(&self, preds: &[Self::Pred]) -> Result<Vec<Minterm<Self::Pred>>, Error> {
        let mut terms: Vec<(Self::Pred, Vec<bool>)> =
            vec![(self.mk_true(), vec![false; preds.len()])];
        for (i, p) in preds.iter().enumerate() {
            let negated = self.mk_not(p);
            let mut refined = Vec::with_capacity(2 * terms.len());
            for (guard, polarity) in terms {
                let pos = self.mk_and(&guard, p);
                if self.is_satisfiable(&pos)? {
                    let mut pos_polarity = polarity.clone();
                    pos_polarity[i] = true;
                    refined.push((pos, pos_polarity));
                }
                let neg = self.mk_and(&guard, &negated);
                if self.is_satisfiable(&neg)? {
                    refined.push((neg, polarity));
                }
            }
            terms = refined;
        }
        Ok(terms
            .into_iter()
            .map(|(guard, polarity)| Minterm {
                guard,
                positive: polarity.into_boxed_slice(),
            })
            .collect())
    }
}
