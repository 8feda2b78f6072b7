// SPDX-License-Identifier: Apache-2.0

//!
//! Symbolic alternating finite automata
//!
//! States are indexed by an integer from 0 to [max_state_id](Safa::max_state_id).
//!
//! A transition carries a *guard* (a predicate from a
//! [Boolean algebra](crate::boolean_algebras::BooleanAlgebra) over the symbol
//! domain) and a *target*, which is not a single state but a
//! [positive Boolean formula](crate::state_expressions) over states: `Or`
//! expresses nondeterministic choice, `And` universal branching. A word is
//! accepted if the alternating run starting from the initial state can
//! resolve every conjunction into runs that all end in final states.
//!
//! Automata are immutable once built. [Safa::new] drops transitions with
//! unsatisfiable guards and then normalizes the automaton: for every source
//! state, the outgoing guards of a normalized automaton are pairwise
//! disjoint (a minterm partition of the symbol domain restricted to the
//! guards actually used). Normalization preserves the language and is
//! idempotent up to expression equivalence.
//!
//! Boolean language operations are provided by
//! [union_with](Safa::union_with) and
//! [intersection_with](Safa::intersection_with). Language equivalence of
//! two automata is decided in [equivalence](crate::equivalence).
//!

use std::cmp::max;
use std::fmt::Display;

use tracing::trace;

use crate::boolean_algebras::BooleanAlgebra;
use crate::errors::Error;
use crate::state_expressions::{StateExpr, StateExpression};
use crate::state_sets::StateSet;

///
/// Transition of an alternating automaton
///
/// A transition has a source state, a guard predicate over the symbol
/// domain, and a target state expression.
///
#[derive(Debug, Clone)]
pub struct Transition<P> {
    from: usize,
    guard: P,
    to: StateExpr,
}

impl<P> Transition<P> {
    /// Create a transition
    pub fn new(from: usize, guard: P, to: StateExpr) -> Self {
        Transition { from, guard, to }
    }

    /// Source state
    pub fn source(&self) -> usize {
        self.from
    }

    /// Guard predicate
    pub fn guard(&self) -> &P {
        &self.guard
    }

    /// Target state expression
    pub fn target(&self) -> &StateExpr {
        &self.to
    }
}

impl<P: Display> Display for Transition<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\u{03B4}(s{}, {}) = {}", self.from, self.guard, self.to)
    }
}

// Boolean operation applied by binary_op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoolOp {
    Intersection,
    Union,
}

///
/// Symbolic alternating finite automaton
///
/// Generic over the guard predicate type `P`. The Boolean algebra that
/// interprets the guards is passed to every operation that needs it; the
/// automaton itself only stores predicates.
///
#[derive(Debug, Clone)]
pub struct Safa<P> {
    // index of the initial state
    initial_state: usize,
    // every state mentioned by a transition, the initial state, and the final states
    states: StateSet,
    final_states: StateSet,
    // moves[s] = transitions out of s; the array has max_state_id + 1 entries
    moves: Vec<Vec<Transition<P>>>,
    transition_count: usize,
    max_state_id: usize,
}

impl<P: Clone> Safa<P> {
    ///
    /// Build an automaton from a transition list, then normalize it
    ///
    /// The state set is the union of `initial_state`, `final_states`, and
    /// every state a transition mentions (as source or as an atom of its
    /// target). Transitions with unsatisfiable guards are dropped.
    ///
    /// # Errors
    ///
    /// [Error::SolverTimeout] if the algebra's oracle exceeds its budget.
    ///
    pub fn new<A>(
        transitions: Vec<Transition<P>>,
        initial_state: usize,
        final_states: &[usize],
        ba: &A,
    ) -> Result<Self, Error>
    where
        A: BooleanAlgebra<Pred = P>,
    {
        let raw = Self::build_raw(transitions, initial_state, final_states, ba, true)?;
        raw.normalize(ba)
    }

    ///
    /// The automaton accepting the empty language
    ///
    /// One state (the initial state), no transitions, no final states.
    ///
    pub fn empty() -> Self {
        let mut states = StateSet::with_bound(1);
        states.insert(0);
        Safa {
            initial_state: 0,
            states,
            final_states: StateSet::with_bound(1),
            moves: vec![Vec::new()],
            transition_count: 0,
            max_state_id: 0,
        }
    }

    // Build without normalizing.
    // With check_sat set, transitions with unsatisfiable guards are dropped;
    // trusted rebuilds (normalize's own output) skip the oracle.
    fn build_raw<A>(
        transitions: Vec<Transition<P>>,
        initial_state: usize,
        final_states: &[usize],
        ba: &A,
        check_sat: bool,
    ) -> Result<Self, Error>
    where
        A: BooleanAlgebra<Pred = P>,
    {
        let mut aut = Safa {
            initial_state,
            states: StateSet::new(),
            final_states: StateSet::new(),
            moves: Vec::new(),
            transition_count: 0,
            max_state_id: initial_state,
        };
        aut.states.insert(initial_state);
        for &s in final_states {
            aut.states.insert(s);
            aut.final_states.insert(s);
            aut.max_state_id = max(aut.max_state_id, s);
        }
        for t in transitions {
            aut.add_transition(t, ba, check_sat)?;
        }
        if aut.moves.len() <= aut.max_state_id {
            aut.moves.resize_with(aut.max_state_id + 1, Vec::new);
        }
        Ok(aut)
    }

    // Add a transition, updating the state set and max_state_id
    fn add_transition<A>(&mut self, t: Transition<P>, ba: &A, check_sat: bool) -> Result<(), Error>
    where
        A: BooleanAlgebra<Pred = P>,
    {
        if check_sat && !ba.is_satisfiable(&t.guard)? {
            // unsatisfiable guards are silently dropped
            return Ok(());
        }
        self.transition_count += 1;
        self.max_state_id = max(self.max_state_id, t.from);
        self.states.insert(t.from);
        for s in t.to.states() {
            self.states.insert(s);
            self.max_state_id = max(self.max_state_id, s);
        }
        if self.moves.len() <= t.from {
            self.moves.resize_with(t.from + 1, Vec::new);
        }
        self.moves[t.from].push(t);
        Ok(())
    }

    /// The initial state
    pub fn initial_state(&self) -> usize {
        self.initial_state
    }

    /// Number of states in the automaton
    pub fn state_count(&self) -> usize {
        self.states.card()
    }

    /// Number of transitions in the automaton
    pub fn transition_count(&self) -> usize {
        self.transition_count
    }

    /// The maximum state id
    ///
    /// Per-state arrays are sized `max_state_id + 1`.
    pub fn max_state_id(&self) -> usize {
        self.max_state_id
    }

    /// Iterator over the final states
    pub fn final_states(&self) -> impl Iterator<Item = usize> + '_ {
        self.final_states.iter()
    }

    /// Check whether state s is final
    pub fn is_final(&self, s: usize) -> bool {
        self.final_states.contains(s)
    }

    /// Iterator over the state ids
    pub fn states(&self) -> impl Iterator<Item = usize> + '_ {
        self.states.iter()
    }

    /// The transitions out of state s
    pub fn moves_from(&self, s: usize) -> &[Transition<P>] {
        self.moves.get(s).map_or(&[], |v| v.as_slice())
    }

    /// Iterator over all transitions
    pub fn moves(&self) -> impl Iterator<Item = &Transition<P>> {
        self.moves.iter().flatten()
    }

    ///
    /// States reachable from the initial state, in discovery order
    ///
    /// A state is reachable if it is the initial state or an atom of the
    /// target expression of a transition leaving a reachable state. States
    /// kept alive only by the final-state set are not included.
    ///
    pub fn reachable_states(&self) -> Vec<usize> {
        let mut visited = StateSet::with_bound(self.max_state_id + 1);
        visited.insert(self.initial_state);
        let mut pending = vec![self.initial_state];
        while let Some(s) = pending.pop() {
            for t in self.moves_from(s) {
                for q in t.to.states() {
                    if !visited.contains(q) {
                        visited.insert(q);
                        pending.push(q);
                    }
                }
            }
        }
        visited.iter().collect()
    }

    ///
    /// Check whether the automaton accepts a word
    ///
    /// Runs the automaton backward: starting from the final-state set, each
    /// symbol (taken in reverse order) maps the current state set C to the
    /// set of states with a transition whose guard the symbol satisfies and
    /// whose target has a model in C. The word is accepted if the initial
    /// state survives to the front.
    ///
    pub fn accepts<A>(&self, word: &[A::Sym], ba: &A) -> bool
    where
        A: BooleanAlgebra<Pred = P>,
    {
        let mut current = self.final_states.clone();
        for x in word.iter().rev() {
            let mut previous = StateSet::with_bound(self.max_state_id + 1);
            for t in self.moves() {
                if ba.evaluate(&t.guard, x) && t.to.has_model(&|s| current.contains(s)) {
                    previous.insert(t.from);
                }
            }
            if previous.is_empty() {
                return false;
            }
            current = previous;
        }
        current.contains(self.initial_state)
    }

    ///
    /// Enumerate the transition tables from a set of states
    ///
    /// Returns a list of pairs `(guard, table)` such that:
    /// - for each pair and each state s in `states`, s moves to `table[s]`
    ///   on reading a symbol satisfying the guard
    /// - the guards are pairwise disjoint and partition `constraint`: each
    ///   satisfiable combination of one region chosen per state occurs
    ///   exactly once
    ///
    /// The regions of a state are its outgoing guards plus the residual
    /// region where none of them applies; in the residual region the state
    /// moves to `False`. Normalized automata keep no explicit transition
    /// for that region (see [normalize](Self::normalize)), but a
    /// configuration caught there is stuck, and the equivalence search has
    /// to observe that to tell a missing move from a rejecting one.
    ///
    /// Tables have `max_state_id + 1` entries; entries for states outside
    /// `states` are `None`.
    ///
    pub(crate) fn transition_tables<A>(
        &self,
        states: &[usize],
        ba: &A,
        constraint: &P,
    ) -> Result<Vec<(P, Box<[Option<StateExpr>]>)>, Error>
    where
        A: BooleanAlgebra<Pred = P>,
    {
        let blank: Box<[Option<StateExpr>]> = vec![None; self.max_state_id + 1].into_boxed_slice();
        let mut tables = vec![(constraint.clone(), blank)];
        for &s in states {
            // region where no outgoing guard of s applies
            let mut residual = ba.mk_true();
            for t in self.moves_from(s) {
                residual = ba.mk_and(&residual, &ba.mk_not(&t.guard));
            }
            let mut refined = Vec::new();
            for (guard, table) in &tables {
                for t in self.moves_from(s) {
                    let conj = ba.mk_and(guard, &t.guard);
                    if ba.is_satisfiable(&conj)? {
                        let mut table = table.clone();
                        table[s] = Some(t.to.clone());
                        refined.push((conj, table));
                    }
                }
                let conj = ba.mk_and(guard, &residual);
                if ba.is_satisfiable(&conj)? {
                    let mut table = table.clone();
                    table[s] = Some(StateExpression::mk_false());
                    refined.push((conj, table));
                }
            }
            tables = refined;
        }
        Ok(tables)
    }

    ///
    /// Rebuild the automaton with pairwise-disjoint guards
    ///
    /// For every state, the guards of its outgoing transitions are replaced
    /// by their [minterms](crate::boolean_algebras::BooleanAlgebra::minterms);
    /// each minterm's transition targets the disjunction of the targets
    /// whose original guard it refines. Minterms under which no original
    /// guard holds produce no transition.
    ///
    /// The language is preserved and the operation is idempotent up to
    /// expression equivalence.
    ///
    /// # Errors
    ///
    /// [Error::SolverTimeout] if the algebra's oracle exceeds its budget.
    ///
    pub fn normalize<A>(&self, ba: &A) -> Result<Self, Error>
    where
        A: BooleanAlgebra<Pred = P>,
    {
        let mut transitions = Vec::new();
        for s in self.states.iter() {
            let from_s = self.moves_from(s);
            let guards: Vec<P> = from_s.iter().map(|t| t.guard.clone()).collect();
            let minterms = ba.minterms(&guards)?;
            trace!(state = s, minterms = minterms.len(), "normalizing state");
            for m in &minterms {
                let mut target: Option<StateExpr> = None;
                for i in m.positives() {
                    target = Some(match &target {
                        None => from_s[i].to.clone(),
                        Some(acc) => StateExpression::or(acc, &from_s[i].to),
                    });
                }
                if let Some(target) = target {
                    transitions.push(Transition::new(s, m.guard().clone(), target));
                }
            }
        }
        let final_states: Vec<usize> = self.final_states.iter().collect();
        // minterm guards are satisfiable by construction: trusted rebuild
        Self::build_raw(transitions, self.initial_state, &final_states, ba, false)
    }

    ///
    /// Intersection with another automaton, as a new automaton
    ///
    /// The result accepts exactly the words accepted by both inputs.
    ///
    /// # Errors
    ///
    /// [Error::SolverTimeout] if the algebra's oracle exceeds its budget.
    ///
    pub fn intersection_with<A>(&self, other: &Self, ba: &A) -> Result<Self, Error>
    where
        A: BooleanAlgebra<Pred = P>,
    {
        Self::binary_op(self, other, ba, BoolOp::Intersection)
    }

    ///
    /// Union with another automaton, as a new automaton
    ///
    /// The result accepts exactly the words accepted by either input.
    ///
    /// # Errors
    ///
    /// [Error::SolverTimeout] if the algebra's oracle exceeds its budget.
    ///
    pub fn union_with<A>(&self, other: &Self, ba: &A) -> Result<Self, Error>
    where
        A: BooleanAlgebra<Pred = P>,
    {
        Self::binary_op(self, other, ba, BoolOp::Union)
    }

    // Boolean combination of two automata.
    //
    // aut2's states are renamed past aut1's arena. A fresh initial state
    // receives fused copies of both initial states' transitions: for a
    // union, the clones are taken as they are (nondeterministic choice);
    // for an intersection, each satisfiable pairwise guard conjunction
    // targets the conjunction of the pair's targets. Final states are the
    // renamed union of the inputs' final states; the fresh initial state is
    // accepting exactly when the combined initial states are, so the empty
    // word is treated like every other word.
    fn binary_op<A>(aut1: &Self, aut2: &Self, ba: &A, op: BoolOp) -> Result<Self, Error>
    where
        A: BooleanAlgebra<Pred = P>,
    {
        let offset = aut1.max_state_id + 1;
        let initial_state = aut1.max_state_id + aut2.max_state_id + 2;

        let mut final_states: Vec<usize> = aut1.final_states.iter().collect();
        final_states.extend(aut2.final_states.iter().map(|s| s + offset));
        let initial_accepting = match op {
            BoolOp::Union => {
                aut1.is_final(aut1.initial_state) || aut2.is_final(aut2.initial_state)
            }
            BoolOp::Intersection => {
                aut1.is_final(aut1.initial_state) && aut2.is_final(aut2.initial_state)
            }
        };
        if initial_accepting {
            final_states.push(initial_state);
        }

        // copy all transitions, renaming aut2's states
        let mut transitions: Vec<Transition<P>> = aut1.moves().cloned().collect();
        for t in aut2.moves() {
            transitions.push(Transition::new(
                t.from + offset,
                t.guard.clone(),
                t.to.offset(offset),
            ));
        }

        match op {
            BoolOp::Union => {
                for t in aut1.moves_from(aut1.initial_state) {
                    transitions.push(Transition::new(initial_state, t.guard.clone(), t.to.clone()));
                }
                for t in aut2.moves_from(aut2.initial_state) {
                    transitions.push(Transition::new(
                        initial_state,
                        t.guard.clone(),
                        t.to.offset(offset),
                    ));
                }
            }
            BoolOp::Intersection => {
                for t1 in aut1.moves_from(aut1.initial_state) {
                    for t2 in aut2.moves_from(aut2.initial_state) {
                        let guard = ba.mk_and(&t1.guard, &t2.guard);
                        if ba.is_satisfiable(&guard)? {
                            let target = StateExpression::and(&t1.to, &t2.to.offset(offset));
                            transitions.push(Transition::new(initial_state, guard, target));
                        }
                    }
                }
            }
        }

        Self::new(transitions, initial_state, &final_states, ba)
    }
}

impl<P: Display + Clone> Display for Safa<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} states", self.state_count())?;
        writeln!(f, "initial state: s{}", self.initial_state)?;
        write!(f, "final states:")?;
        for s in self.final_states.iter() {
            write!(f, " s{}", s)?;
        }
        writeln!(f)?;
        writeln!(f, "transitions:")?;
        for t in self.moves() {
            writeln!(f, "  {}", t)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::character_sets::{CharAlgebra, CharPred, MAX_CHAR};

    fn chars(s: &str) -> Vec<u32> {
        s.chars().map(|c| c as u32).collect()
    }

    fn only(c: char) -> CharPred {
        CharPred::singleton(c as u32)
    }

    // Automaton accepting exactly the word "ab":
    //   s0 -['a']-> s1, s1 -['b']-> s2, s2 final
    fn word_ab() -> Safa<CharPred> {
        let transitions = vec![
            Transition::new(0, only('a'), StateExpression::atom(1)),
            Transition::new(1, only('b'), StateExpression::atom(2)),
        ];
        Safa::new(transitions, 0, &[2], &CharAlgebra).unwrap()
    }

    #[test]
    fn accepts_single_word() {
        let ba = CharAlgebra;
        let aut = word_ab();

        assert_eq!(aut.state_count(), 3);
        assert_eq!(aut.max_state_id(), 2);
        assert!(aut.is_final(2));
        assert!(!aut.is_final(0));
        assert_eq!(aut.final_states().collect::<Vec<_>>(), vec![2]);

        println!("{}", aut);

        assert!(aut.accepts(&chars("ab"), &ba));
        assert!(!aut.accepts(&chars("a"), &ba));
        assert!(!aut.accepts(&chars("ba"), &ba));
        assert!(!aut.accepts(&chars("abb"), &ba));
        assert!(!aut.accepts(&chars(""), &ba));
    }

    #[test]
    fn empty_automaton_rejects_everything() {
        let ba = CharAlgebra;
        let aut: Safa<CharPred> = Safa::empty();
        assert_eq!(aut.state_count(), 1);
        assert_eq!(aut.max_state_id(), 0);
        assert_eq!(aut.transition_count(), 0);
        assert!(!aut.accepts(&chars(""), &ba));
        assert!(!aut.accepts(&chars("a"), &ba));
        assert!(!aut.accepts(&chars("xyz"), &ba));
    }

    #[test]
    fn unsatisfiable_transitions_are_dropped() {
        let ba = CharAlgebra;
        let transitions = vec![
            Transition::new(0, only('a'), StateExpression::atom(1)),
            Transition::new(0, CharPred::empty(), StateExpression::atom(2)),
        ];
        let aut = Safa::new(transitions, 0, &[1], &ba).unwrap();
        assert_eq!(aut.transition_count(), 1);
        // state 2 was only mentioned by the dropped transition
        assert_eq!(aut.state_count(), 2);
    }

    #[test]
    fn empty_word_acceptance_depends_on_initial_being_final() {
        let ba = CharAlgebra;
        // s0 -[true]-> (s0 | s1), both states final
        let transitions = vec![Transition::new(
            0,
            CharPred::full(),
            StateExpression::or(&StateExpression::atom(0), &StateExpression::atom(1)),
        )];
        let aut = Safa::new(transitions, 0, &[0, 1], &ba).unwrap();
        assert!(aut.accepts(&chars("x"), &ba));
        assert!(aut.accepts(&chars(""), &ba));

        // same transitions but only s1 is final: the empty word is rejected
        let transitions = vec![Transition::new(
            0,
            CharPred::full(),
            StateExpression::or(&StateExpression::atom(0), &StateExpression::atom(1)),
        )];
        let aut = Safa::new(transitions, 0, &[1], &ba).unwrap();
        assert!(aut.accepts(&chars("x"), &ba));
        assert!(!aut.accepts(&chars(""), &ba));
    }

    #[test]
    fn normalization_splits_overlapping_guards() {
        let ba = CharAlgebra;
        // two overlapping guards out of s0: [1, MAX] and [0, 9]
        let transitions = vec![
            Transition::new(0, CharPred::range(1, MAX_CHAR), StateExpression::atom(1)),
            Transition::new(0, CharPred::range(0, 9), StateExpression::atom(2)),
        ];
        let aut = Safa::new(transitions, 0, &[1, 2], &ba).unwrap();

        // three minterm classes remain: [0,0] -> s2, [1,9] -> s1|s2, [10,MAX] -> s1
        let from0 = aut.moves_from(0);
        assert_eq!(from0.len(), 3);

        // guards are pairwise disjoint
        for (i, t) in from0.iter().enumerate() {
            for u in &from0[i + 1..] {
                let both = ba.mk_and(t.guard(), u.guard());
                assert!(!ba.is_satisfiable(&both).unwrap());
            }
        }

        let overlap = from0
            .iter()
            .find(|t| t.guard() == &CharPred::range(1, 9))
            .unwrap();
        assert_eq!(overlap.target().states(), vec![1, 2]);

        assert!(aut.accepts(&[5], &ba));
        assert!(aut.accepts(&[0], &ba));
        assert!(aut.accepts(&[20], &ba));
        assert!(!aut.accepts(&[5, 5], &ba));
    }

    #[test]
    fn normalization_is_idempotent() {
        let ba = CharAlgebra;
        let transitions = vec![
            Transition::new(0, CharPred::range('a' as u32, 'm' as u32), StateExpression::atom(1)),
            Transition::new(0, CharPred::range('g' as u32, 'z' as u32), StateExpression::atom(2)),
            Transition::new(1, CharPred::full(), StateExpression::atom(2)),
        ];
        let aut = Safa::new(transitions, 0, &[2], &ba).unwrap();
        let renormalized = aut.normalize(&ba).unwrap();

        assert_eq!(aut.transition_count(), renormalized.transition_count());
        assert_eq!(aut.state_count(), renormalized.state_count());
        for (t, u) in aut.moves().zip(renormalized.moves()) {
            assert_eq!(t.source(), u.source());
            assert_eq!(t.guard(), u.guard());
            assert_eq!(t.target().states(), u.target().states());
        }
    }

    #[test]
    fn intersection_of_prefix_and_suffix_constraints() {
        let ba = CharAlgebra;
        let sigma = CharPred::full();

        // "starts with a" on 3-letter words: s0 -a-> s1 -Σ-> s2 -Σ-> s3
        let starts_a = Safa::new(
            vec![
                Transition::new(0, only('a'), StateExpression::atom(1)),
                Transition::new(1, sigma.clone(), StateExpression::atom(2)),
                Transition::new(2, sigma.clone(), StateExpression::atom(3)),
            ],
            0,
            &[3],
            &ba,
        )
        .unwrap();

        // "ends with b" on 3-letter words: s0 -Σ-> s1 -Σ-> s2 -b-> s3
        let ends_b = Safa::new(
            vec![
                Transition::new(0, sigma.clone(), StateExpression::atom(1)),
                Transition::new(1, sigma.clone(), StateExpression::atom(2)),
                Transition::new(2, only('b'), StateExpression::atom(3)),
            ],
            0,
            &[3],
            &ba,
        )
        .unwrap();

        let both = starts_a.intersection_with(&ends_b, &ba).unwrap();
        assert!(both.accepts(&chars("aab"), &ba));
        assert!(both.accepts(&chars("abb"), &ba));
        assert!(!both.accepts(&chars("bab"), &ba));
        assert!(!both.accepts(&chars("aaa"), &ba));
        assert!(!both.accepts(&chars("ab"), &ba));
        assert!(!both.accepts(&chars("aabb"), &ba));

        let either = starts_a.union_with(&ends_b, &ba).unwrap();
        assert!(either.accepts(&chars("aaa"), &ba));
        assert!(either.accepts(&chars("bab"), &ba));
        assert!(either.accepts(&chars("aab"), &ba));
        assert!(!either.accepts(&chars("baa"), &ba));
    }

    #[test]
    fn reachability() {
        let ba = CharAlgebra;
        let transitions = vec![
            Transition::new(0, only('a'), StateExpression::atom(1)),
            // s3 and s4 are disconnected from s0
            Transition::new(3, only('b'), StateExpression::atom(4)),
        ];
        let aut = Safa::new(transitions, 0, &[1, 4], &ba).unwrap();
        let reachable = aut.reachable_states();
        assert!(reachable.contains(&0));
        assert!(reachable.contains(&1));
        assert!(!reachable.contains(&3));
        assert!(!reachable.contains(&4));
    }

    #[test]
    fn transition_tables_refine_by_constraint() {
        let ba = CharAlgebra;
        let aut = word_ab();

        // from {s0} under the full constraint: the 'a' region moves to s1,
        // the residual region is stuck
        let tables = aut.transition_tables(&[0], &ba, &ba.mk_true()).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(&tables[0].0, &only('a'));
        assert_eq!(tables[0].1.len(), aut.max_state_id() + 1);
        assert_eq!(tables[0].1[0], Some(StateExpression::atom(1)));
        assert!(tables[0].1[1].is_none());
        assert_eq!(&tables[1].0, &only('a').complement());
        assert_eq!(tables[1].1[0], Some(StateExpression::mk_false()));

        // a constraint disjoint from every guard leaves only the stuck region
        let tables = aut.transition_tables(&[0], &ba, &only('z')).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(&tables[0].0, &only('z'));
        assert_eq!(tables[0].1[0], Some(StateExpression::mk_false()));

        // a state with no outgoing transitions is stuck everywhere
        let tables = aut.transition_tables(&[0, 2], &ba, &ba.mk_true()).unwrap();
        assert_eq!(tables.len(), 2);
        for (_, table) in &tables {
            assert_eq!(table[2], Some(StateExpression::mk_false()));
        }

        // guards partition the constraint: pairwise disjoint, full cover
        let mut cover = ba.mk_false();
        for (i, (g, _)) in tables.iter().enumerate() {
            for (h, _) in &tables[i + 1..] {
                assert!(!ba.is_satisfiable(&ba.mk_and(g, h)).unwrap());
            }
            cover = ba.mk_or(&cover, g);
        }
        assert_eq!(cover, ba.mk_true());
    }
}
