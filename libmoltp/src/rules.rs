//! The inference rules of the prefixed sequent calculus.
//!
//! The nine decomposition rules (R2–R10) rewrite a single sequent at
//! its fixed positions: the *last* formula of the left side or the
//! *first* formula of the right side. "Not applicable" is an ordinary
//! outcome, not an error. R1 is the resolution rule closing a proof
//! across the saturated sequents.

use crate::{
    formula::{Conn, Formula, WorldSymbol},
    sequent::Sequent,
    unify::{Relation, Unification},
    worlds::WorldsKeeper,
};

/// An inference rule, dispatched by total match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
}

/// The decomposition rules in application order.
pub(crate) const DECOMPOSITION: [Rule; 9] = [
    Rule::R2,
    Rule::R3,
    Rule::R4,
    Rule::R5,
    Rule::R6,
    Rule::R7,
    Rule::R8,
    Rule::R9,
    Rule::R10,
];

/// The outcome of a successful R1 step.
#[derive(Debug)]
pub(crate) struct Resolution {
    /// The resolvent, with the unifier applied to the remaining parts.
    pub(crate) sequent: Sequent,

    /// Pool position of the sequent contributing its left-side atom.
    pub(crate) left_premise: usize,

    /// Pool position of the sequent contributing its right-side atom.
    pub(crate) right_premise: usize,

    pub(crate) unifier: Unification,
}

impl Rule {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::R4 => "R4",
            Self::R5 => "R5",
            Self::R6 => "R6",
            Self::R7 => "R7",
            Self::R8 => "R8",
            Self::R9 => "R9",
            Self::R10 => "R10",
        }
    }

    /// Apply this decomposition rule to `s`, returning the derived
    /// sequent or `None` when the rule does not apply.
    pub(crate) fn apply(&self, s: &Sequent, worlds: &mut WorldsKeeper) -> Option<Sequent> {
        match self {
            // R1 resolves across sequents; see [`Rule::resolve`].
            Self::R1 => None,

            // S,|p->q|_i <- T  =>  S,|q|_i <- |p|_i,T
            Self::R2 => {
                let f = last_with(&s.left, Conn::Implies)?;
                let mut left = s.left[..s.left.len() - 1].to_vec();
                left.push(f.operands[1].reindexed(f.index.clone()));
                let mut right = vec![f.operands[0].reindexed(f.index.clone())];
                right.extend(s.right.iter().cloned());
                Some(Sequent::new(left, right))
            }

            // S <- |p->q|_i,T  =>  S <- |q|_i,T
            Self::R3 => {
                let f = first_with(&s.right, Conn::Implies)?;
                let mut right = vec![f.operands[1].reindexed(f.index.clone())];
                right.extend(s.right[1..].iter().cloned());
                Some(Sequent::new(s.left.clone(), right))
            }

            // S <- |p->q|_i,T  =>  S,|p|_i <- T
            Self::R4 => {
                let f = first_with(&s.right, Conn::Implies)?;
                let mut left = s.left.clone();
                left.push(f.operands[0].reindexed(f.index.clone()));
                Some(Sequent::new(left, s.right[1..].to_vec()))
            }

            // S,|Not p|_i <- T  =>  S <- |p|_i,T
            Self::R5 => {
                let f = last_with(&s.left, Conn::Not)?;
                let mut right = vec![f.operands[0].reindexed(f.index.clone())];
                right.extend(s.right.iter().cloned());
                Some(Sequent::new(s.left[..s.left.len() - 1].to_vec(), right))
            }

            // S <- |Not p|_i,T  =>  S,|p|_i <- T
            Self::R6 => {
                let f = first_with(&s.right, Conn::Not)?;
                let mut left = s.left.clone();
                left.push(f.operands[0].reindexed(f.index.clone()));
                Some(Sequent::new(left, s.right[1..].to_vec()))
            }

            // S <- |Box p|_i,T  =>  S <- |p|_{c:i},T for a fresh ground
            // world: an integer constant under a ground prefix, a Skolem
            // application over the free variables otherwise.
            Self::R7 => {
                let f = first_with(&s.right, Conn::Box)?;
                let sym = if f.index.is_ground() {
                    worlds.fresh_constant()
                } else {
                    worlds.skolem_function(f)
                };
                let mut right = vec![f.operands[0].reindexed(f.index.prefixed(sym))];
                right.extend(s.right[1..].iter().cloned());
                Some(Sequent::new(s.left.clone(), right))
            }

            // S,|Box p|_i <- T  =>  S,|p|_{w:i} <- T for a fresh world
            // variable; under a non-ground prefix the head variable is
            // reused with a bumped counter.
            Self::R8 => {
                let f = last_with(&s.left, Conn::Box)?;
                let sym = if f.index.is_ground() {
                    worlds.fresh_variable()
                } else {
                    bumped(f.index.current().expect("prefixed formulas carry an index"))
                };
                let mut left = s.left[..s.left.len() - 1].to_vec();
                left.push(f.operands[0].reindexed(f.index.prefixed(sym)));
                Some(Sequent::new(left, s.right.clone()))
            }

            // S <- |Forall x.p|_i,T  =>  S <- |p[x:=c]|_i,T
            Self::R9 => {
                let f = first_with(&s.right, Conn::Forall)?;
                let mut right = vec![instantiated(f, |w| w.fresh_constant(), worlds)];
                right.extend(s.right[1..].iter().cloned());
                Some(Sequent::new(s.left.clone(), right))
            }

            // S,|Forall x.p|_i <- T  =>  S,|p[x:=w]|_i <- T
            Self::R10 => {
                let f = last_with(&s.left, Conn::Forall)?;
                let mut left = s.left[..s.left.len() - 1].to_vec();
                left.push(instantiated(f, |w| w.fresh_variable(), worlds));
                Some(Sequent::new(left, s.right.clone()))
            }
        }
    }

    /// The R1 step: scan ordered pairs of `pool` for a left-side atom
    /// unifying with a right-side atom, and emit the resolvent of the
    /// first pair found.
    ///
    /// A pair of a sequent with itself can neither close a proof nor
    /// shrink the pool, so self-pairs are skipped.
    pub(crate) fn resolve(relation: &Relation, pool: &[Sequent]) -> Option<Resolution> {
        for (i, s1) in pool.iter().enumerate() {
            let Some(f1) = s1.left.last() else { continue };
            if !f1.is_atom() {
                continue;
            }

            for (j, s2) in pool.iter().enumerate() {
                if i == j {
                    continue;
                }
                let Some(f2) = s2.right.first() else { continue };
                if !f2.is_atom() {
                    continue;
                }
                let Some(u) = relation.munify(f1, f2) else {
                    continue;
                };

                let mut left: Vec<Formula> = s1.left[..s1.left.len() - 1]
                    .iter()
                    .map(|f| u.apply(f))
                    .collect();
                left.extend(s2.left.iter().map(|f| u.apply(f)));

                let mut right: Vec<Formula> =
                    s1.right.iter().map(|f| u.apply(f)).collect();
                right.extend(s2.right[1..].iter().map(|f| u.apply(f)));

                return Some(Resolution {
                    sequent: Sequent::new(left, right),
                    left_premise: i,
                    right_premise: j,
                    unifier: u,
                });
            }
        }
        None
    }
}

/// The last formula of `side` when its connective is `conn`.
fn last_with(side: &[Formula], conn: Conn) -> Option<&Formula> {
    side.last().filter(|f| f.conn == conn)
}

/// The first formula of `side` when its connective is `conn`.
fn first_with(side: &[Formula], conn: Conn) -> Option<&Formula> {
    side.first().filter(|f| f.conn == conn)
}

/// Reuse a world variable with an incremented counter: `w` becomes
/// `w1`, `w1` becomes `w2`.
fn bumped(head: &WorldSymbol) -> WorldSymbol {
    let digits = head
        .value
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    let (base, counter) = head.value.split_at(head.value.len() - digits);
    let n: u32 = counter.parse().unwrap_or(0);
    WorldSymbol::new(format!("{base}{}", n + 1), false)
}

/// Instantiate a binder: substitute each bound variable with a symbol
/// minted by `fresh`, keeping the binder's world index on the body.
fn instantiated(
    f: &Formula,
    fresh: impl Fn(&mut WorldsKeeper) -> WorldSymbol,
    worlds: &mut WorldsKeeper,
) -> Formula {
    let mut body = f.body().clone();
    for var in f.bound_vars() {
        let sym = fresh(worlds);
        body = body.subst_term(var, &sym.value);
    }
    body.reindexed(f.index.clone())
}
