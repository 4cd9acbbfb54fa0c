//! End-to-end proof search over the canonical formulas.

include!("../src/test_utils.rs"); // Pull in private assert_trace!

use insta as _;
use log as _;
use serde as _;
use serde_json as _;
use thiserror as _;

use libmoltp::{prove, Error, RawFormula, Sequent};

fn raw(formula: &str) -> RawFormula {
    RawFormula {
        oid: 0,
        formula: formula.to_owned(),
    }
}

/// Assert the structural invariants every derivation trace must hold:
/// sequent names are exactly `S1..SN`, justifications reference only
/// earlier sequents, and every world index terminates at the ground
/// root `0`.
fn assert_invariants(solution: &[Sequent]) {
    let mut seen = std::collections::HashSet::new();
    for s in solution {
        for entry in &s.justification {
            let is_name = entry.strip_prefix('S').is_some_and(|n| {
                !n.is_empty() && n.chars().all(|c| c.is_ascii_digit())
            });
            if is_name {
                assert!(seen.contains(entry), "{} references unseen {entry}", s.name);
            }
        }
        assert!(seen.insert(s.name.clone()), "duplicate name {}", s.name);
    }

    for n in 1..=solution.len() {
        assert!(seen.contains(&format!("S{n}")), "missing name S{n}");
    }

    for s in solution {
        let line = s.to_string();
        let mut rest = line.as_str();
        while let Some(at) = rest.find("_{") {
            let index = &rest[at + 2..];
            let end = index.find('}').expect("world index is closed");
            let index = &index[..end];
            assert!(
                index == "0" || index.ends_with(":0"),
                "index {index} of {} does not terminate at the root",
                s.name
            );
            rest = &rest[at + 2 + end..];
        }
    }
}

/// The classical K axiom distributes Box over implication. Its closure
/// takes two chained resolution steps through the mixed sequent S5.
#[test]
fn test_k_axiom() {
    let solution = assert_trace!(
        "\\Box(a\\to b)\\to(\\Box a\\to\\Box b)",
        [
            "S1:  <- |( ( Box ( a Implies b ) ) Implies ( ( Box a ) Implies ( Box b ) ) )|_{0} []",
            "S3: |( Box ( a Implies b ) )|_{0} <-  [R4 S1]",
            "S4: |( a Implies b )|_{w:0} <-  [R8 S3]",
            "S2:  <- |( ( Box a ) Implies ( Box b ) )|_{0} [R3 S1]",
            "S7: |( Box a )|_{0} <-  [R4 S2]",
            "S6:  <- |( Box b )|_{0} [R3 S2]",
            "S5: |b|_{w:0} <- |a|_{w:0} [R2 S4]",
            "S8: |a|_{v:0} <-  [R8 S7]",
            "S9:  <- |b|_{1:0} [R7 S6]",
            "S10:  <- |a|_{1:0} [R1 S5 S9 {w/1}]",
            "S11:  <-  [R1 S8 S10 {v/1}]",
        ]
    );
    assert_invariants(&solution);
}

#[test]
fn test_box_to_box_box() {
    let solution = assert_trace!(
        "\\Box a \\to \\Box \\Box a",
        [
            "S1:  <- |( ( Box a ) Implies ( Box ( Box a ) ) )|_{0} []",
            "S3: |( Box a )|_{0} <-  [R4 S1]",
            "S2:  <- |( Box ( Box a ) )|_{0} [R3 S1]",
            "S5:  <- |( Box a )|_{1:0} [R7 S2]",
            "S4: |a|_{w:0} <-  [R8 S3]",
            "S6:  <- |a|_{2:1:0} [R7 S5]",
            "S7:  <-  [R1 S4 S6 {w/2}]",
        ]
    );
    assert_invariants(&solution);
}

#[test]
fn test_box_box_to_diamond_diamond() {
    let solution = assert_trace!(
        "\\Box \\Box a \\to \\Diamond \\Diamond a",
        [
            "S1:  <- |( ( Box ( Box a ) ) Implies ( Not ( Box ( Not ( Not ( Box ( Not a ) ) ) ) ) ) )|_{0} []",
            "S3: |( Box ( Box a ) )|_{0} <-  [R4 S1]",
            "S4: |( Box a )|_{w:0} <-  [R8 S3]",
            "S2:  <- |( Not ( Box ( Not ( Not ( Box ( Not a ) ) ) ) ) )|_{0} [R3 S1]",
            "S6: |( Box ( Not ( Not ( Box ( Not a ) ) ) ) )|_{0} <-  [R6 S2]",
            "S7: |( Not ( Not ( Box ( Not a ) ) ) )|_{v:0} <-  [R8 S6]",
            "S8:  <- |( Not ( Box ( Not a ) ) )|_{v:0} [R5 S7]",
            "S9: |( Box ( Not a ) )|_{v:0} <-  [R6 S8]",
            "S10: |( Not a )|_{v1:v:0} <-  [R8 S9]",
            "S5: |a|_{w1:w:0} <-  [R8 S4]",
            "S11:  <- |a|_{v1:v:0} [R5 S10]",
            "S12:  <-  [R1 S5 S11 {w1/v1}]",
        ]
    );
    assert_invariants(&solution);
}

#[test]
fn test_diamond_box_to_box_diamond() {
    let solution = assert_trace!(
        "\\Diamond \\Box a \\to \\Box \\Diamond a",
        [
            "S1:  <- |( ( Not ( Box ( Not ( Box a ) ) ) ) Implies ( Box ( Not ( Box ( Not a ) ) ) ) )|_{0} []",
            "S3: |( Not ( Box ( Not ( Box a ) ) ) )|_{0} <-  [R4 S1]",
            "S4:  <- |( Box ( Not ( Box a ) ) )|_{0} [R5 S3]",
            "S5:  <- |( Not ( Box a ) )|_{1:0} [R7 S4]",
            "S6: |( Box a )|_{1:0} <-  [R6 S5]",
            "S2:  <- |( Box ( Not ( Box ( Not a ) ) ) )|_{0} [R3 S1]",
            "S8:  <- |( Not ( Box ( Not a ) ) )|_{2:0} [R7 S2]",
            "S9: |( Box ( Not a ) )|_{2:0} <-  [R6 S8]",
            "S10: |( Not a )|_{v:2:0} <-  [R8 S9]",
            "S7: |a|_{w:1:0} <-  [R8 S6]",
            "S11:  <- |a|_{v:2:0} [R5 S10]",
            "S12:  <-  [R1 S7 S11 {w/v}]",
        ]
    );
    assert_invariants(&solution);
}

#[test]
fn test_barcan_direction() {
    let solution = assert_trace!(
        "(\\forall x \\Box p(x)) \\to \\Box (\\forall x p(x))",
        [
            "S1:  <- |( ( Forall ( x ) ( Box p(x) ) ) Implies ( Box ( Forall ( x ) p(x) ) ) )|_{0} []",
            "S3: |( Forall ( x ) ( Box p(x) ) )|_{0} <-  [R4 S1]",
            "S4: |( Box p(w) )|_{0} <-  [R10 S3]",
            "S2:  <- |( Box ( Forall ( x ) p(x) ) )|_{0} [R3 S1]",
            "S6:  <- |( Forall ( x ) p(x) )|_{1:0} [R7 S2]",
            "S5: |p(w)|_{v:0} <-  [R8 S4]",
            "S7:  <- |p(2)|_{1:0} [R9 S6]",
            "S8:  <-  [R1 S5 S7 {v/1,w/2}]",
        ]
    );
    assert_invariants(&solution);
}

#[test]
fn test_converse_barcan_direction() {
    let solution = assert_trace!(
        "\\Box (\\forall x p(x)) \\to (\\forall x \\Box p(x))",
        [
            "S1:  <- |( ( Box ( Forall ( x ) p(x) ) ) Implies ( Forall ( x ) ( Box p(x) ) ) )|_{0} []",
            "S3: |( Box ( Forall ( x ) p(x) ) )|_{0} <-  [R4 S1]",
            "S4: |( Forall ( x ) p(x) )|_{w:0} <-  [R8 S3]",
            "S2:  <- |( Forall ( x ) ( Box p(x) ) )|_{0} [R3 S1]",
            "S6:  <- |( Box p(1) )|_{0} [R9 S2]",
            "S5: |p(v)|_{w:0} <-  [R10 S4]",
            "S7:  <- |p(1)|_{2:0} [R7 S6]",
            "S8:  <-  [R1 S5 S7 {v/1,w/2}]",
        ]
    );
    assert_invariants(&solution);
}

#[test]
fn test_identity_closes_with_empty_unifier() {
    let solution = assert_trace!(
        "a \\to a",
        [
            "S1:  <- |( a Implies a )|_{0} []",
            "S3: |a|_{0} <-  [R4 S1]",
            "S2:  <- |a|_{0} [R3 S1]",
            "S4:  <-  [R1 S3 S2 {}]",
        ]
    );
    assert_invariants(&solution);
}

/// Atoms with distinct non-numeric arguments never unify, so the
/// search exhausts and reports the partial derivation.
#[test]
fn test_no_proof_distinct_arguments() {
    let got = prove(&raw("p(x) \\to p(y)")).unwrap_err();
    let Error::NoProofFound { solution } = got else {
        panic!("want NoProofFound, got {got}");
    };

    let lines: Vec<String> = solution.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        [
            "S1:  <- |( p(x) Implies p(y) )|_{0} []",
            "S3: |p(x)|_{0} <-  [R4 S1]",
            "S2:  <- |p(y)|_{0} [R3 S1]",
        ]
    );
}

/// A single saturated sequent leaves nothing to resolve.
#[test]
fn test_no_proof_single_saturated_sequent() {
    let got = prove(&raw("\\lnot a")).unwrap_err();
    let Error::NoProofFound { solution } = got else {
        panic!("want NoProofFound, got {got}");
    };

    let lines: Vec<String> = solution.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        [
            "S1:  <- |( Not a )|_{0} []",
            "S2: |a|_{0} <-  [R6 S1]",
        ]
    );
}

/// The eliminated connectives never survive normalisation into a
/// derivation.
#[test]
fn test_traces_stay_in_the_reduced_basis() {
    let formulas = [
        "\\Diamond a \\to \\Diamond a",
        "(a \\land b) \\to (b \\lor a) \\iff c",
        "(\\exists x p(x)) \\to (\\exists x p(x))",
    ];

    for formula in formulas {
        let solution = match prove(&raw(formula)) {
            Ok(solution) => solution,
            Err(Error::NoProofFound { solution }) => solution,
            Err(e) => panic!("{formula}: {e}"),
        };
        for s in &solution {
            let line = s.to_string();
            for gone in ["Diamond", "Iff", "And", "Or", "Exists"] {
                assert!(!line.contains(gone), "{gone} survived in {line}");
            }
        }
    }
}

/// Whitespace placement is insignificant.
#[test]
fn test_whitespace_insensitive() {
    let dense = prove(&raw("\\Boxa\\to\\Box\\Boxa")).unwrap();
    let spaced = prove(&raw(" \\Box a \\to \\Box \\Box a ")).unwrap();

    let dense: Vec<String> = dense.iter().map(ToString::to_string).collect();
    let spaced: Vec<String> = spaced.iter().map(ToString::to_string).collect();
    assert_eq!(dense, spaced);
}
