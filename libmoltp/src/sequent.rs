//! Sequents: named, justified judgements over prefixed formulas.

use std::fmt;

use crate::formula::Formula;

/// A single sequent of a derivation.
///
/// Both sides are ordered multisets: the decomposition rules target the
/// last formula of the left side and the first formula of the right
/// side, so insertion order determines the proof trace. A sequent is
/// immutable once named; rules derive new sequents instead of mutating.
#[derive(Debug, Clone)]
pub struct Sequent {
    /// The stable identifier (`S1`, `S2`, …) assigned at creation.
    pub name: String,

    /// The rule name followed by the parent sequent names (and, for
    /// resolution steps, the rendered unifier).
    pub justification: Vec<String>,

    pub(crate) left: Vec<Formula>,
    pub(crate) right: Vec<Formula>,
}

impl Sequent {
    /// An anonymous sequent; the proof-search driver names it on
    /// emission.
    pub(crate) fn new(left: Vec<Formula>, right: Vec<Formula>) -> Self {
        Self {
            name: String::new(),
            justification: Vec::new(),
            left,
            right,
        }
    }

    /// True when both sides are empty: the closing sequent of a proof.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

pub(crate) fn side_to_string(side: &[Formula]) -> String {
    side.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Sequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} <- {} [{}]",
            self.name,
            side_to_string(&self.left),
            side_to_string(&self.right),
            self.justification.join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{Conn, Formula, WorldIndex, WorldSymbol};

    fn prefixed_atom(name: &str) -> Formula {
        let mut f = Formula::atom(name, Vec::new());
        f.index = WorldIndex::root(WorldSymbol::new("0", true));
        f
    }

    #[test]
    fn test_display_shapes() {
        let boxed = Formula::compound(Conn::Box, vec![Formula::atom("a", Vec::new())])
            .reindexed(WorldIndex::root(WorldSymbol::new("0", true)));

        let mut s = Sequent::new(vec![boxed], Vec::new());
        s.name = "S3".to_owned();
        s.justification = vec!["R4".to_owned(), "S1".to_owned()];
        assert_eq!(s.to_string(), "S3: |( Box a )|_{0} <-  [R4 S1]");

        let mut s = Sequent::new(Vec::new(), vec![prefixed_atom("a")]);
        s.name = "S2".to_owned();
        s.justification = vec!["R3".to_owned(), "S1".to_owned()];
        assert_eq!(s.to_string(), "S2:  <- |a|_{0} [R3 S1]");
    }

    #[test]
    fn test_display_multiple_formulas_and_empty_justification() {
        let mut s = Sequent::new(
            vec![prefixed_atom("a"), prefixed_atom("b")],
            vec![prefixed_atom("c")],
        );
        s.name = "S1".to_owned();
        assert_eq!(s.to_string(), "S1: |a|_{0}, |b|_{0} <- |c|_{0} []");
    }

    #[test]
    fn test_empty_sequent() {
        let mut s = Sequent::new(Vec::new(), Vec::new());
        s.name = "S7".to_owned();
        s.justification = vec!["R1".to_owned(), "S4".to_owned(), "S6".to_owned()];
        assert!(s.is_empty());
        assert_eq!(s.to_string(), "S7:  <-  [R1 S4 S6]");
    }
}
