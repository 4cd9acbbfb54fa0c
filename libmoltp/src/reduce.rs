//! Rewriting formulas into the {Implies, Not, Box, Forall} basis.

use crate::formula::{Conn, Formula};

/// Rewrite `f` bottom-up into the minimal connective basis, eliminating
/// Diamond, Iff, And, Or and Exists through the standard equivalences.
///
/// The rewrite is idempotent: reducing an already-reduced formula is a
/// no-op.
pub(crate) fn reduce(f: Formula) -> Formula {
    let Formula {
        conn,
        operands,
        args,
        index,
    } = f;

    let mut operands: Vec<Formula> = operands.into_iter().map(reduce).collect();

    let mut out = match conn {
        // Diamond A => Not (Box (Not A))
        Conn::Diamond => {
            let a = operands.pop().expect("Diamond carries one operand");
            negated(Formula::compound(Conn::Box, vec![negated(a)]))
        }

        // A Iff B => Not ((A -> B) -> Not (B -> A))
        Conn::Iff => {
            let b = operands.pop().expect("Iff carries two operands");
            let a = operands.pop().expect("Iff carries two operands");
            let fwd = Formula::compound(Conn::Implies, vec![a.clone(), b.clone()]);
            let back = Formula::compound(Conn::Implies, vec![b, a]);
            negated(Formula::compound(Conn::Implies, vec![fwd, negated(back)]))
        }

        // A And B => Not (A -> Not B)
        Conn::And => {
            let b = operands.pop().expect("And carries two operands");
            let a = operands.pop().expect("And carries two operands");
            negated(Formula::compound(Conn::Implies, vec![a, negated(b)]))
        }

        // A Or B => Not A -> B
        Conn::Or => {
            let b = operands.pop().expect("Or carries two operands");
            let a = operands.pop().expect("Or carries two operands");
            Formula::compound(Conn::Implies, vec![negated(a), b])
        }

        // Exists xs . A => Not (Forall xs . Not A)
        Conn::Exists => {
            let body = operands.pop().expect("Exists carries a body operand");
            operands.push(negated(body));
            negated(Formula {
                conn: Conn::Forall,
                operands,
                args,
                index: Default::default(),
            })
        }

        conn => Formula {
            conn,
            operands,
            args,
            index: Default::default(),
        },
    };

    out.index = index;
    out
}

fn negated(f: Formula) -> Formula {
    Formula::compound(Conn::Not, vec![f])
}
