// SPDX-License-Identifier: Apache-2.0

//!
//! Language equivalence of symbolic alternating automata
//!
//! Two automata are language-equivalent iff they accept the same words.
//! The decision procedure is a forward worklist search over pairs of
//! [state expressions](crate::state_expressions), each denoting the current
//! configuration of one automaton. A configuration is accepting iff the
//! expression has a model in the automaton's final-state set.
//!
//! For every popped pair, the left automaton's
//! transition tables are enumerated under the `true` constraint and the
//! right automaton's tables are refined under each left guard, so the
//! product only grows with jointly reachable guard combinations. A pair of
//! successors with different acceptance statuses is a counterexample; a
//! pair already subsumed by the [SimilarityRelation] is skipped; anything
//! else is recorded and queued. The search terminates because only finitely
//! many semantically distinct expressions exist over the two finite state
//! sets, and the relation's congruence closure eventually subsumes every
//! new pair.
//!
//! Two relations are provided. [SatRelation] decides membership in the
//! congruence closure of the recorded pairs by propositional reasoning,
//! discharged through an incremental SAT solver. [SyntacticRelation] is
//! plain pair-set membership: sound but weaker, so the search may revisit
//! semantically equal expressions with different shapes.
//!

use std::collections::{HashSet, VecDeque};

use tracing::debug;
use varisat::{ExtendFormula, Lit, Solver, Var};

use crate::boolean_algebras::BooleanAlgebra;
use crate::errors::Error;
use crate::safa::Safa;
use crate::state_expressions::{StateExpr, StateExpression};

///
/// Monotone relation on pairs of state expressions
///
/// The equivalence search records every pair of configurations it has
/// visited and skips pairs the relation already subsumes. A relation is
/// sound as long as `is_member` never answers true for a pair outside the
/// congruence closure of the recorded pairs; answering false too often only
/// slows the search down.
///
pub trait SimilarityRelation {
    /// Record a pair
    ///
    /// # Errors
    ///
    /// [Error::SolverTimeout] if the backing solver exceeds its budget.
    fn add(&mut self, left: &StateExpr, right: &StateExpr) -> Result<(), Error>;

    /// Check whether a pair is subsumed by the recorded pairs
    ///
    /// # Errors
    ///
    /// [Error::SolverTimeout] if the backing solver exceeds its budget.
    fn is_member(&mut self, left: &StateExpr, right: &StateExpr) -> Result<bool, Error>;
}

///
/// Pair-set similarity relation
///
/// `is_member` is syntactic equality against the recorded pairs. Always
/// sound; never times out.
///
#[derive(Debug, Default)]
pub struct SyntacticRelation {
    pairs: HashSet<(StateExpr, StateExpr)>,
}

impl SyntacticRelation {
    /// Create an empty relation
    pub fn new() -> Self {
        SyntacticRelation::default()
    }
}

impl SimilarityRelation for SyntacticRelation {
    fn add(&mut self, left: &StateExpr, right: &StateExpr) -> Result<(), Error> {
        self.pairs.insert((left.clone(), right.clone()));
        Ok(())
    }

    fn is_member(&mut self, left: &StateExpr, right: &StateExpr) -> Result<bool, Error> {
        Ok(self.pairs.contains(&(left.clone(), right.clone())))
    }
}

///
/// SAT-backed similarity relation
///
/// Each recorded pair (L, R) is asserted as the biconditional L ⇔ R over
/// propositional variables: one variable per left-automaton state, one per
/// right-automaton state (offset past the left arena), with connectives
/// translated by Tseitin encoding. A membership query for (L, R) asks the
/// solver whether the recorded biconditionals admit a valuation where L and
/// R disagree; unsatisfiability means the pair is in the congruence
/// closure. Queries are activated through a fresh assumption literal, so
/// the solver stays incremental across the whole search.
///
pub struct SatRelation {
    solver: Solver<'static>,
    // right-automaton state s maps to variable right_offset + s
    right_offset: usize,
    // next fresh variable index (Tseitin and activation literals)
    next_var: usize,
    // literal forced true, used to translate constant expressions
    true_lit: Lit,
}

impl std::fmt::Debug for SatRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SatRelation")
            .field("right_offset", &self.right_offset)
            .field("next_var", &self.next_var)
            .finish()
    }
}

impl SatRelation {
    ///
    /// Create an empty relation
    ///
    /// `left_states` and `right_states` are the arena sizes
    /// (`max_state_id + 1`) of the two automata being compared.
    ///
    pub fn new(left_states: usize, right_states: usize) -> Self {
        let mut solver = Solver::new();
        let true_lit = Lit::positive(Var::from_index(left_states + right_states));
        solver.add_clause(&[true_lit]);
        SatRelation {
            solver,
            right_offset: left_states,
            next_var: left_states + right_states + 1,
            true_lit,
        }
    }

    fn fresh_lit(&mut self) -> Lit {
        let lit = Lit::positive(Var::from_index(self.next_var));
        self.next_var += 1;
        lit
    }

    // Translate an expression to a literal, with state atoms mapped to
    // variable offset + s and connectives defined by Tseitin clauses.
    fn encode(&mut self, e: &StateExpression, offset: usize) -> Lit {
        match e {
            StateExpression::True => self.true_lit,
            StateExpression::False => !self.true_lit,
            StateExpression::Atom(s) => Lit::positive(Var::from_index(offset + s)),
            StateExpression::Or(a, b) => {
                let a = self.encode(a, offset);
                let b = self.encode(b, offset);
                let out = self.fresh_lit();
                // out <-> (a | b)
                self.solver.add_clause(&[!out, a, b]);
                self.solver.add_clause(&[out, !a]);
                self.solver.add_clause(&[out, !b]);
                out
            }
            StateExpression::And(a, b) => {
                let a = self.encode(a, offset);
                let b = self.encode(b, offset);
                let out = self.fresh_lit();
                // out <-> (a & b)
                self.solver.add_clause(&[!out, a]);
                self.solver.add_clause(&[!out, b]);
                self.solver.add_clause(&[out, !a, !b]);
                out
            }
        }
    }
}

impl SimilarityRelation for SatRelation {
    fn add(&mut self, left: &StateExpr, right: &StateExpr) -> Result<(), Error> {
        let l = self.encode(left, 0);
        let r = self.encode(right, self.right_offset);
        // l <-> r
        self.solver.add_clause(&[!l, r]);
        self.solver.add_clause(&[l, !r]);
        Ok(())
    }

    fn is_member(&mut self, left: &StateExpr, right: &StateExpr) -> Result<bool, Error> {
        let l = self.encode(left, 0);
        let r = self.encode(right, self.right_offset);
        // activation literal: query -> (l xor r)
        let query = self.fresh_lit();
        self.solver.add_clause(&[!query, l, r]);
        self.solver.add_clause(&[!query, !l, !r]);
        self.solver.assume(&[query]);
        match self.solver.solve() {
            // a model where l and r disagree: the pair is not subsumed
            Ok(sat) => Ok(!sat),
            Err(_) => Err(Error::SolverTimeout),
        }
    }
}

///
/// Check whether two automata accept the same language
///
/// Equivalent to [check_equivalence] with a fresh [SatRelation].
///
/// # Errors
///
/// [Error::SolverTimeout] if the algebra's oracle or the SAT solver
/// exceeds its budget. The partial relation is discarded.
///
pub fn is_equivalent<P, A>(left: &Safa<P>, right: &Safa<P>, ba: &A) -> Result<bool, Error>
where
    P: Clone,
    A: BooleanAlgebra<Pred = P>,
{
    let mut similar = SatRelation::new(left.max_state_id() + 1, right.max_state_id() + 1);
    check_equivalence(left, right, ba, &mut similar)
}

///
/// Check whether two automata accept the same language, using the given
/// similarity relation
///
/// Returns false as soon as a reachable pair of configurations disagrees on
/// acceptance; returns true when the worklist drains without finding one.
///
/// # Errors
///
/// [Error::SolverTimeout] if the algebra's oracle or the relation's solver
/// exceeds its budget.
///
pub fn check_equivalence<P, A, R>(
    left_aut: &Safa<P>,
    right_aut: &Safa<P>,
    ba: &A,
    similar: &mut R,
) -> Result<bool, Error>
where
    P: Clone,
    A: BooleanAlgebra<Pred = P>,
    R: SimilarityRelation,
{
    let left_final = |s| left_aut.is_final(s);
    let right_final = |s| right_aut.is_final(s);

    let left_initial = StateExpression::atom(left_aut.initial_state());
    let right_initial = StateExpression::atom(right_aut.initial_state());

    // the loop only compares successors, so the empty word is checked here
    if left_initial.has_model(&left_final) != right_initial.has_model(&right_final) {
        debug!("acceptance mismatch on the empty word");
        return Ok(false);
    }

    similar.add(&left_initial, &right_initial)?;
    let mut worklist = VecDeque::new();
    worklist.push_back((left_initial, right_initial));

    while let Some((left, right)) = worklist.pop_front() {
        // left tables are unconstrained; right tables are refined under
        // each left guard, so every satisfiable left choice is matched by a
        // right-side partition of the same region
        let left_moves = left_aut.transition_tables(&left.states(), ba, &ba.mk_true())?;
        for (left_guard, left_table) in &left_moves {
            let left_succ = left.substitute_table(left_table)?;
            let left_accepts = left_succ.has_model(&left_final);

            let right_moves = right_aut.transition_tables(&right.states(), ba, left_guard)?;
            for (_, right_table) in &right_moves {
                let right_succ = right.substitute_table(right_table)?;
                let right_accepts = right_succ.has_model(&right_final);
                if left_accepts != right_accepts {
                    debug!(left = %left_succ, right = %right_succ, "acceptance mismatch");
                    return Ok(false);
                }
                if !similar.is_member(&left_succ, &right_succ)? {
                    similar.add(&left_succ, &right_succ)?;
                    debug!(left = %left_succ, right = %right_succ, "new pair");
                    worklist.push_back((left_succ.clone(), right_succ.clone()));
                }
            }
        }
    }
    Ok(true)
}
