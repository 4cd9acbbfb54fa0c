//! Re-encoding sequents into the LaTeX surface syntax for display and
//! JSON consumers.

use serde::Serialize;

use crate::{
    formula::{Conn, Formula},
    sequent::Sequent,
};

/// The wire form of a [`Sequent`], with both sides re-encoded in the
/// LaTeX surface syntax.
#[derive(Debug, Clone, Serialize)]
pub struct RawSequent {
    /// The sequent identifier (`S1`, `S2`, …).
    pub name: String,

    /// The left side, comma-joined.
    pub left: String,

    /// The right side, comma-joined.
    pub right: String,

    /// The justification entries, comma-joined.
    pub just: String,
}

/// Re-encode `s` into its LaTeX wire form.
pub fn encode(s: &Sequent) -> RawSequent {
    RawSequent {
        name: s.name.clone(),
        left: encode_side(&s.left),
        right: encode_side(&s.right),
        just: s.justification.join(","),
    }
}

fn encode_side(side: &[Formula]) -> String {
    side.iter()
        .map(encode_formula)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The surface spelling of a connective.
fn spelling(conn: &Conn) -> &str {
    match conn {
        Conn::Atom(name) => name,
        Conn::Not => "\\lnot",
        Conn::And => "\\land",
        Conn::Or => "\\lor",
        Conn::Implies => "\\to",
        Conn::Iff => "\\iff",
        Conn::Box => "\\Box",
        Conn::Diamond => "\\Diamond",
        Conn::Forall => "\\forall",
        Conn::Exists => "\\exists",
    }
}

fn encode_formula(f: &Formula) -> String {
    let bare = encode_bare(f);
    if f.index.symbols.is_empty() {
        bare
    } else {
        format!("|{bare}|_{{{}}}", f.index)
    }
}

fn encode_bare(f: &Formula) -> String {
    match f.conn {
        Conn::Forall | Conn::Exists => {
            let vars = f.bound_vars().join(", ");
            format!(
                "( {} ( {vars} ) {} )",
                spelling(&f.conn),
                encode_formula(f.body())
            )
        }
        _ => match f.operands.len() {
            0 => {
                if f.args.is_empty() {
                    spelling(&f.conn).to_owned()
                } else {
                    format!("{}({})", spelling(&f.conn), f.args.join(","))
                }
            }
            1 => format!("( {} {} )", spelling(&f.conn), encode_formula(&f.operands[0])),
            2 => format!(
                "( {} {} {} )",
                encode_formula(&f.operands[0]),
                spelling(&f.conn),
                encode_formula(&f.operands[1])
            ),
            _ => unreachable!("only binders carry more than two operands"),
        },
    }
}
