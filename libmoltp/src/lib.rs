//! A theorem prover for quantified modal logic.
//!
//! Given a single formula in a LaTeX-like surface syntax, the prover
//! searches for a refutation proof in a prefixed sequent calculus: the
//! formula is tokenized, parsed, rewritten into the minimal connective
//! basis {Implies, Not, Box, Forall} and seeded as the sequent
//! `S1 = ⊢ F` at the root world `0`. Nine decomposition rules reduce
//! the worklist to saturation and a resolution rule closes the proof by
//! unifying atoms across the saturated sequents, world indices
//! included.
//!
//! ```
//! use libmoltp::{prove, RawFormula};
//!
//! let raw = RawFormula {
//!     oid: 0,
//!     formula: "\\Box a \\to \\Box \\Box a".to_owned(),
//! };
//!
//! for sequent in prove(&raw).unwrap() {
//!     println!("{sequent}");
//! }
//! ```
//!
//! The default frame relation is serial; see [`Relation`] for the
//! extension point to other frame conditions.

//   Copyright 2025 Dom Dwyer <dom@itsallbroken.com>
//
//   Licensed under the Apache License, Version 2.0 (the "License");
//   you may not use this file except in compliance with the License.
//   You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
//   Unless required by applicable law or agreed to in writing, software
//   distributed under the License is distributed on an "AS IS" BASIS,
//   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//   See the License for the specific language governing permissions and
//   limitations under the License.

mod encode;
mod formula;
mod parser;
mod prover;
mod reduce;
mod rules;
mod sequent;
#[cfg(test)]
mod test_utils;
mod token;
mod unify;
mod worlds;

use serde::Deserialize;
use thiserror::Error;

pub use encode::{encode, RawSequent};
pub use prover::Prover;
pub use sequent::Sequent;
pub use unify::Relation;

/// Errors during lexing, parsing or proof search.
#[derive(Debug, Error)]
pub enum Error {
    /// The input contains a token outside the surface syntax.
    #[error("unrecognised token {0:?}")]
    BadToken(String),

    /// A `_{` world index is never closed.
    #[error("unterminated world index")]
    UnterminatedIndex,

    /// An atom argument list is never closed.
    #[error("unterminated atom argument list")]
    UnterminatedAtomArgs,

    /// A bracket is unmatched or closed by a different bracket kind.
    #[error("unbalanced bracket")]
    UnbalancedBracket,

    /// An operator is applied to fewer operands than its arity.
    #[error("operator is missing an operand")]
    MissingOperand,

    /// A world index is attached to no formula.
    #[error("world index is attached to no formula")]
    OrphanIndex,

    /// The search saturated without closing a proof.
    #[error("no proof found")]
    NoProofFound {
        /// The partial derivation for diagnostic display.
        solution: Vec<Sequent>,
    },
}

/// A single unproved formula in the LaTeX surface syntax.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFormula {
    /// Caller-assigned identifier, echoed back untouched.
    pub oid: i64,

    /// The formula text. Whitespace is insignificant.
    pub formula: String,
}

/// Prove `raw` over the default (serial) frame relation.
///
/// Returns the ordered derivation: the decomposed sequents in
/// processing order, the saturated sequents, the resolution steps and
/// finally the closing sequent with both sides empty.
///
/// # Errors
///
/// See [`Error`]; a failed search returns [`Error::NoProofFound`]
/// carrying the partial derivation.
pub fn prove(raw: &RawFormula) -> Result<Vec<Sequent>, Error> {
    Prover::default().prove(raw)
}
