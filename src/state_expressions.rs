// SPDX-License-Identifier: Apache-2.0

//!
//! Positive Boolean formulas over states
//!
//! The successor of a transition in an alternating automaton is not a single
//! state but a formula: `Or` for nondeterministic choice, `And` for
//! universal branching, with states as atoms. Negation is absent, so the
//! formulas are monotone: enlarging a valuation never falsifies them.
//!
//! Expressions are immutable values shared through [Rc] handles (type
//! [StateExpr]). The constructors [or](StateExpression::or) and
//! [and](StateExpression::and) fold constants, so `True` and `False` only
//! occur as complete expressions, never under a connective, and
//! [states](StateExpression::states) lists exactly the atoms of the formula.
//!
//! Two expressions may denote the same Boolean function without being equal
//! as trees. No canonicalization is performed here; semantic comparison is
//! the job of the similarity relations in
//! [equivalence](crate::equivalence).
//!

use std::fmt::Display;
use std::rc::Rc;

use crate::errors::Error;

///
/// Positive Boolean formula whose atoms are state ids
///
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum StateExpression {
    /// The unsatisfiable formula
    False,
    /// The valid formula
    True,
    /// A single state
    Atom(usize),
    /// Disjunction
    Or(StateExpr, StateExpr),
    /// Conjunction
    And(StateExpr, StateExpr),
}

/// Shared handle to a state expression
pub type StateExpr = Rc<StateExpression>;

impl StateExpression {
    /// The constant true expression
    pub fn mk_true() -> StateExpr {
        Rc::new(StateExpression::True)
    }

    /// The constant false expression
    pub fn mk_false() -> StateExpr {
        Rc::new(StateExpression::False)
    }

    /// Atomic expression for state s
    pub fn atom(s: usize) -> StateExpr {
        Rc::new(StateExpression::Atom(s))
    }

    ///
    /// Disjunction of two expressions
    ///
    /// Constants are folded: `or(True, e) = True` and `or(False, e) = e`.
    ///
    pub fn or(a: &StateExpr, b: &StateExpr) -> StateExpr {
        match (a.as_ref(), b.as_ref()) {
            (StateExpression::True, _) | (_, StateExpression::True) => Self::mk_true(),
            (StateExpression::False, _) => b.clone(),
            (_, StateExpression::False) => a.clone(),
            _ => Rc::new(StateExpression::Or(a.clone(), b.clone())),
        }
    }

    ///
    /// Conjunction of two expressions
    ///
    /// Constants are folded: `and(False, e) = False` and `and(True, e) = e`.
    ///
    pub fn and(a: &StateExpr, b: &StateExpr) -> StateExpr {
        match (a.as_ref(), b.as_ref()) {
            (StateExpression::False, _) | (_, StateExpression::False) => Self::mk_false(),
            (StateExpression::True, _) => b.clone(),
            (_, StateExpression::True) => a.clone(),
            _ => Rc::new(StateExpression::And(a.clone(), b.clone())),
        }
    }

    ///
    /// Rename every atom s to s + k
    ///
    /// Equivalent to `substitute(s -> atom(s + k))` but cheaper: shared
    /// subtrees are rebuilt without going through the constructors'
    /// constant analysis.
    ///
    pub fn offset(&self, k: usize) -> StateExpr {
        match self {
            StateExpression::False => Self::mk_false(),
            StateExpression::True => Self::mk_true(),
            StateExpression::Atom(s) => Self::atom(s + k),
            StateExpression::Or(a, b) => Rc::new(StateExpression::Or(a.offset(k), b.offset(k))),
            StateExpression::And(a, b) => Rc::new(StateExpression::And(a.offset(k), b.offset(k))),
        }
    }

    ///
    /// The atoms of this expression, sorted and without duplicates
    ///
    pub fn states(&self) -> Vec<usize> {
        fn collect(e: &StateExpression, acc: &mut Vec<usize>) {
            match e {
                StateExpression::False | StateExpression::True => (),
                StateExpression::Atom(s) => acc.push(*s),
                StateExpression::Or(a, b) | StateExpression::And(a, b) => {
                    collect(a, acc);
                    collect(b, acc);
                }
            }
        }

        let mut acc = Vec::new();
        collect(self, &mut acc);
        acc.sort_unstable();
        acc.dedup();
        acc
    }

    ///
    /// Check whether a valuation satisfies this expression
    ///
    /// The valuation is the characteristic function of the set of states
    /// assigned true.
    ///
    pub fn has_model<F>(&self, valuation: &F) -> bool
    where
        F: Fn(usize) -> bool,
    {
        match self {
            StateExpression::False => false,
            StateExpression::True => true,
            StateExpression::Atom(s) => valuation(*s),
            StateExpression::Or(a, b) => a.has_model(valuation) || b.has_model(valuation),
            StateExpression::And(a, b) => a.has_model(valuation) && b.has_model(valuation),
        }
    }

    ///
    /// Replace every atom s by sigma(s)
    ///
    /// Homomorphic over `Or` and `And` and the identity on constants.
    /// The result is rebuilt through the folding constructors, so constant
    /// images simplify away.
    ///
    pub fn substitute<F>(&self, sigma: &F) -> StateExpr
    where
        F: Fn(usize) -> StateExpr,
    {
        match self {
            StateExpression::False => Self::mk_false(),
            StateExpression::True => Self::mk_true(),
            StateExpression::Atom(s) => sigma(*s),
            StateExpression::Or(a, b) => Self::or(&a.substitute(sigma), &b.substitute(sigma)),
            StateExpression::And(a, b) => Self::and(&a.substitute(sigma), &b.substitute(sigma)),
        }
    }

    ///
    /// Replace every atom s by table\[s\]
    ///
    /// # Errors
    ///
    /// [Error::IllegalArgument] if some atom has no entry in the table.
    /// Callers are expected to build the table from the atoms returned by
    /// [states](Self::states).
    ///
    pub fn substitute_table(&self, table: &[Option<StateExpr>]) -> Result<StateExpr, Error> {
        match self {
            StateExpression::False => Ok(Self::mk_false()),
            StateExpression::True => Ok(Self::mk_true()),
            StateExpression::Atom(s) => match table.get(*s) {
                Some(Some(e)) => Ok(e.clone()),
                _ => Err(Error::IllegalArgument(format!(
                    "no substitution for state {}",
                    s
                ))),
            },
            StateExpression::Or(a, b) => Ok(Self::or(
                &a.substitute_table(table)?,
                &b.substitute_table(table)?,
            )),
            StateExpression::And(a, b) => Ok(Self::and(
                &a.substitute_table(table)?,
                &b.substitute_table(table)?,
            )),
        }
    }
}

impl Display for StateExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateExpression::False => write!(f, "false"),
            StateExpression::True => write!(f, "true"),
            StateExpression::Atom(s) => write!(f, "s{}", s),
            StateExpression::Or(a, b) => write!(f, "({} | {})", a, b),
            StateExpression::And(a, b) => write!(f, "({} & {})", a, b),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn valuation(states: &'static [usize]) -> impl Fn(usize) -> bool {
        move |s| states.contains(&s)
    }

    #[test]
    fn constant_folding() {
        let a = StateExpression::atom(1);
        let t = StateExpression::mk_true();
        let u = StateExpression::mk_false();

        assert_eq!(StateExpression::or(&a, &t), t);
        assert_eq!(StateExpression::or(&u, &a), a);
        assert_eq!(StateExpression::and(&a, &u), u);
        assert_eq!(StateExpression::and(&t, &a), a);
    }

    #[test]
    fn states_are_sorted_and_unique() {
        let e = StateExpression::and(
            &StateExpression::or(&StateExpression::atom(4), &StateExpression::atom(1)),
            &StateExpression::or(&StateExpression::atom(1), &StateExpression::atom(3)),
        );
        assert_eq!(e.states(), vec![1, 3, 4]);
        assert!(StateExpression::mk_true().states().is_empty());
    }

    #[test]
    fn models() {
        // (s0 | s1) & s2
        let e = StateExpression::and(
            &StateExpression::or(&StateExpression::atom(0), &StateExpression::atom(1)),
            &StateExpression::atom(2),
        );
        assert!(e.has_model(&valuation(&[0, 2])));
        assert!(e.has_model(&valuation(&[1, 2])));
        assert!(e.has_model(&valuation(&[0, 1, 2])));
        assert!(!e.has_model(&valuation(&[0, 1])));
        assert!(!e.has_model(&valuation(&[2])));
        assert!(!e.has_model(&valuation(&[])));
    }

    #[test]
    fn offset_renames_atoms() {
        let e = StateExpression::or(&StateExpression::atom(0), &StateExpression::atom(2));
        let shifted = e.offset(5);
        assert_eq!(shifted.states(), vec![5, 7]);
        assert!(shifted.has_model(&valuation(&[7])));
        assert!(!shifted.has_model(&valuation(&[2])));
    }

    #[test]
    fn substitution_is_homomorphic() {
        // s0 & s1 with s0 -> (s2 | s3), s1 -> true
        let e = StateExpression::and(&StateExpression::atom(0), &StateExpression::atom(1));
        let image = e.substitute(&|s| {
            if s == 0 {
                StateExpression::or(&StateExpression::atom(2), &StateExpression::atom(3))
            } else {
                StateExpression::mk_true()
            }
        });
        // the true image folds away
        assert_eq!(image.states(), vec![2, 3]);
        assert!(image.has_model(&valuation(&[3])));
    }

    #[test]
    fn table_substitution_checks_coverage() {
        let e = StateExpression::or(&StateExpression::atom(0), &StateExpression::atom(2));
        let table = vec![Some(StateExpression::atom(5)), None, None];
        let err = e.substitute_table(&table).unwrap_err();
        assert!(matches!(err, Error::IllegalArgument(_)));

        let table = vec![
            Some(StateExpression::atom(5)),
            None,
            Some(StateExpression::mk_false()),
        ];
        let image = e.substitute_table(&table).unwrap();
        assert_eq!(image, StateExpression::atom(5));
    }

    #[test]
    fn display() {
        let e = StateExpression::and(
            &StateExpression::or(&StateExpression::atom(0), &StateExpression::atom(1)),
            &StateExpression::atom(2),
        );
        assert_eq!(e.to_string(), "((s0 | s1) & s2)");
    }
}
