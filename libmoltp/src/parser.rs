//! Shunting-Yard parsing of the token stream into a formula tree.

use crate::{
    formula::{is_ground_term, Conn, Formula, WorldIndex, WorldSymbol},
    token::{Arity, BracketKind, OpToken, Token},
    Error,
};

/// A postfix-stream element produced by the Shunting-Yard pass.
#[derive(Debug)]
enum Postfix {
    Atom { name: String, args: Vec<String> },
    Op(OpToken),
    Binder { op: OpToken, vars: Vec<String> },
    Index(String),
}

/// An element of the operator stack.
#[derive(Debug)]
enum Pending {
    Op(OpToken),
    Open(BracketKind),
    Binder { op: OpToken, vars: Vec<String> },
}

/// Operator precedence, lowest binding first. Binders sit above
/// everything and are only ever popped by a closing bracket or the end
/// of input, so they scope over the remainder of their group.
fn precedence(op: OpToken) -> u8 {
    match op {
        OpToken::Iff => 1,
        OpToken::Implies => 2,
        OpToken::And => 3,
        OpToken::Or => 4,
        OpToken::Box | OpToken::Diamond | OpToken::Not => 5,
        OpToken::Forall | OpToken::Exists => 6,
    }
}

/// True for the right-associative operators: implication and the unary
/// modalities.
fn right_associative(op: OpToken) -> bool {
    matches!(op.arity(), Arity::Unary) || op == OpToken::Implies
}

/// Parse `tokens` into a single formula tree.
pub(crate) fn parse(tokens: Vec<Token>) -> Result<Formula, Error> {
    build(shunt(tokens)?)
}

/// The Shunting-Yard pass: infix tokens to a postfix stream.
fn shunt(tokens: Vec<Token>) -> Result<Vec<Postfix>, Error> {
    let mut out = Vec::new();
    let mut ops: Vec<Pending> = Vec::new();
    let mut iter = tokens.into_iter().peekable();

    while let Some(t) = iter.next() {
        match t {
            Token::Atom { name, args } => out.push(Postfix::Atom { name, args }),

            Token::Index(value) => out.push(Postfix::Index(value)),

            Token::Op(op) if op.arity() == Arity::Multi => {
                // A binder owns its comma-separated variable list.
                let mut vars = vec![binder_var(iter.next())?];
                while iter.peek() == Some(&Token::Comma) {
                    iter.next();
                    vars.push(binder_var(iter.next())?);
                }
                ops.push(Pending::Binder { op, vars });
            }

            Token::Op(op) => {
                while let Some(Pending::Op(top)) = ops.last() {
                    let wins = precedence(*top) > precedence(op)
                        || (precedence(*top) == precedence(op) && !right_associative(op));
                    if !wins {
                        break;
                    }
                    out.push(Postfix::Op(*top));
                    ops.pop();
                }
                ops.push(Pending::Op(op));
            }

            Token::Open(kind) => ops.push(Pending::Open(kind)),

            Token::Close(kind) => loop {
                match ops.pop() {
                    Some(Pending::Op(op)) => out.push(Postfix::Op(op)),
                    Some(Pending::Binder { op, vars }) => out.push(Postfix::Binder { op, vars }),
                    Some(Pending::Open(k)) if k == kind => break,
                    Some(Pending::Open(_)) | None => return Err(Error::UnbalancedBracket),
                }
            },

            // A comma outside a binder variable list separates nothing.
            Token::Comma => {
                while let Some(Pending::Op(top)) = ops.last() {
                    out.push(Postfix::Op(*top));
                    ops.pop();
                }
                if !matches!(ops.last(), Some(Pending::Open(_))) {
                    return Err(Error::UnbalancedBracket);
                }
            }
        }
    }

    while let Some(p) = ops.pop() {
        match p {
            Pending::Op(op) => out.push(Postfix::Op(op)),
            Pending::Binder { op, vars } => out.push(Postfix::Binder { op, vars }),
            Pending::Open(_) => return Err(Error::UnbalancedBracket),
        }
    }

    Ok(out)
}

/// The next token must be a bare atom naming a binder variable.
fn binder_var(t: Option<Token>) -> Result<String, Error> {
    match t {
        Some(Token::Atom { name, args }) if args.is_empty() => Ok(name),
        _ => Err(Error::MissingOperand),
    }
}

/// Consume the postfix stream into a formula tree.
fn build(postfix: Vec<Postfix>) -> Result<Formula, Error> {
    let mut stack: Vec<Formula> = Vec::new();

    for p in postfix {
        match p {
            Postfix::Atom { name, args } => stack.push(Formula::atom(name, args)),

            Postfix::Op(op) => {
                let conn = connective(op);
                let node = match op.arity() {
                    Arity::Unary => {
                        let operand = stack.pop().ok_or(Error::MissingOperand)?;
                        Formula::compound(conn, vec![operand])
                    }
                    Arity::Binary => {
                        let rhs = stack.pop().ok_or(Error::MissingOperand)?;
                        let lhs = stack.pop().ok_or(Error::MissingOperand)?;
                        Formula::compound(conn, vec![lhs, rhs])
                    }
                    Arity::Multi => unreachable!("binders are shunted as Postfix::Binder"),
                };
                stack.push(node);
            }

            Postfix::Binder { op, vars } => {
                let body = stack.pop().ok_or(Error::MissingOperand)?;
                stack.push(Formula::binder(connective(op), &vars, body));
            }

            Postfix::Index(value) => {
                let top = stack.last_mut().ok_or(Error::OrphanIndex)?;
                top.index = WorldIndex::root(WorldSymbol::new("0", true))
                    .prefixed(WorldSymbol::new(value.clone(), is_ground_term(&value)));
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(f), true) => Ok(f),
        _ => Err(Error::MissingOperand),
    }
}

fn connective(op: OpToken) -> Conn {
    match op {
        OpToken::Box => Conn::Box,
        OpToken::Diamond => Conn::Diamond,
        OpToken::Not => Conn::Not,
        OpToken::And => Conn::And,
        OpToken::Or => Conn::Or,
        OpToken::Implies => Conn::Implies,
        OpToken::Iff => Conn::Iff,
        OpToken::Forall => Conn::Forall,
        OpToken::Exists => Conn::Exists,
    }
}
