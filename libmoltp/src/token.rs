//! Lexing of the LaTeX-like surface syntax into a token stream.

use crate::Error;

/// The three bracket families of the surface syntax.
///
/// An opening bracket must be closed by a bracket of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BracketKind {
    Round,
    Square,
    Curly,
}

/// A surface operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpToken {
    /// `\Box`
    Box,
    /// `\Diamond`
    Diamond,
    /// `\lnot`
    Not,
    /// `\land`
    And,
    /// `\lor`
    Or,
    /// `\to`
    Implies,
    /// `\iff`
    Iff,
    /// `\forall`
    Forall,
    /// `\exists`
    Exists,
}

/// Operator arity classes driving the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Unary,
    Binary,
    /// A binder taking a variable list and a body.
    Multi,
}

impl OpToken {
    pub(crate) fn arity(&self) -> Arity {
        match self {
            Self::Box | Self::Diamond | Self::Not => Arity::Unary,
            Self::And | Self::Or | Self::Implies | Self::Iff => Arity::Binary,
            Self::Forall | Self::Exists => Arity::Multi,
        }
    }
}

/// A single token of the surface syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// An opening bracket.
    Open(BracketKind),

    /// A closing bracket.
    Close(BracketKind),

    /// An operator.
    Op(OpToken),

    /// A world index written `_c` or `_{…}`.
    Index(String),

    /// An atom: a single-letter predicate symbol with an optional
    /// argument list of single characters.
    Atom {
        name: String,
        args: Vec<String>,
    },

    /// A comma separating binder variables.
    Comma,
}

/// The escape spellings (without the leading backslash) and their
/// operators. Each match consumes exactly the listed characters.
const SPELLINGS: [(&str, OpToken); 9] = [
    ("Box", OpToken::Box),
    ("Diamond", OpToken::Diamond),
    ("lnot", OpToken::Not),
    ("land", OpToken::And),
    ("lor", OpToken::Or),
    ("to", OpToken::Implies),
    ("iff", OpToken::Iff),
    ("forall", OpToken::Forall),
    ("exists", OpToken::Exists),
];

/// Tokenize `input` into the surface token stream.
///
/// Whitespace is insignificant and skipped.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    let chars: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            '(' => {
                out.push(Token::Open(BracketKind::Round));
                pos += 1;
            }
            ')' => {
                out.push(Token::Close(BracketKind::Round));
                pos += 1;
            }
            '[' => {
                out.push(Token::Open(BracketKind::Square));
                pos += 1;
            }
            ']' => {
                out.push(Token::Close(BracketKind::Square));
                pos += 1;
            }
            '{' => {
                out.push(Token::Open(BracketKind::Curly));
                pos += 1;
            }
            '}' => {
                out.push(Token::Close(BracketKind::Curly));
                pos += 1;
            }
            ',' => {
                out.push(Token::Comma);
                pos += 1;
            }
            '\\' => {
                let rest: String = chars[pos + 1..].iter().collect();
                let Some((spelling, op)) = SPELLINGS
                    .iter()
                    .find(|(spelling, _)| rest.starts_with(spelling))
                else {
                    let word: String =
                        rest.chars().take_while(char::is_ascii_alphabetic).collect();
                    return Err(Error::BadToken(format!("\\{word}")));
                };
                out.push(Token::Op(*op));
                pos += 1 + spelling.len();
            }
            '_' => {
                pos += 1;
                let value = match chars.get(pos) {
                    Some('{') => {
                        let start = pos + 1;
                        let mut end = start;
                        while end < chars.len() && chars[end] != '}' {
                            end += 1;
                        }
                        if end == chars.len() {
                            return Err(Error::UnterminatedIndex);
                        }
                        pos = end + 1;
                        chars[start..end].iter().collect()
                    }
                    Some(c) => {
                        pos += 1;
                        c.to_string()
                    }
                    None => return Err(Error::UnterminatedIndex),
                };
                out.push(Token::Index(value));
            }
            c if c.is_ascii_alphabetic() => {
                pos += 1;
                let mut args = Vec::new();
                if chars.get(pos) == Some(&'(') {
                    if let Some(next) = scan_args(&chars, pos, &mut args)? {
                        pos = next;
                    } else {
                        args.clear();
                    }
                }
                out.push(Token::Atom {
                    name: c.to_string(),
                    args,
                });
            }
            c => return Err(Error::BadToken(c.to_string())),
        }
    }

    Ok(out)
}

/// Scan an atom argument list `(c,c,…)` starting at the opening bracket
/// `open`.
///
/// Returns the position past the closing bracket, or `None` when the
/// bracket does not open an argument list (and should be re-read as a
/// grouping bracket). Running out of input inside the list is an error.
fn scan_args(
    chars: &[char],
    open: usize,
    args: &mut Vec<String>,
) -> Result<Option<usize>, Error> {
    let mut pos = open + 1;
    loop {
        // One single-character argument, then a separator or the close.
        match chars.get(pos) {
            Some(c) if c.is_ascii_alphanumeric() => args.push(c.to_string()),
            Some(_) => return Ok(None),
            None => return Err(Error::UnterminatedAtomArgs),
        }
        pos += 1;

        match chars.get(pos) {
            Some(',') => pos += 1,
            Some(')') => return Ok(Some(pos + 1)),
            Some(_) => return Ok(None),
            None => return Err(Error::UnterminatedAtomArgs),
        }
    }
}
