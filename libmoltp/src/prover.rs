//! The proof-search driver.

use log::debug;

use crate::{
    formula::WorldIndex,
    parser::parse,
    reduce::reduce,
    rules::{Rule, DECOMPOSITION},
    sequent::Sequent,
    token::tokenize,
    unify::Relation,
    worlds::WorldsKeeper,
    Error, RawFormula,
};

/// A theorem prover for quantified modal logic over a fixed frame
/// relation.
///
/// A [`Prover`] holds no mutable state: every [`Prover::prove`] call
/// owns a fresh worlds-keeper, worklists and name counter, so proofs
/// are deterministic and independent provers may run concurrently.
#[derive(Debug, Default)]
pub struct Prover {
    relation: Relation,
}

impl Prover {
    /// A prover searching for proofs over frames satisfying `relation`.
    pub fn new(relation: Relation) -> Self {
        Self { relation }
    }

    /// Attempt to prove `raw`, returning the ordered sequence of
    /// sequents forming the derivation.
    ///
    /// # Errors
    ///
    /// Lexing and parsing failures surface as their respective error
    /// kinds; an exhausted search returns [`Error::NoProofFound`]
    /// carrying the partial derivation.
    pub fn prove(&self, raw: &RawFormula) -> Result<Vec<Sequent>, Error> {
        let f = reduce(parse(tokenize(&raw.formula)?)?);

        let mut worlds = WorldsKeeper::default();
        let f = f.reindexed(WorldIndex::root(worlds.fresh_constant()));

        let mut names = Names::default();
        let mut seed = Sequent::new(Vec::new(), vec![f]);
        seed.name = names.next();
        debug!("proving {seed}");

        self.search(vec![seed], &mut worlds, &mut names)
    }

    /// Run the search loop: decompose the worklist to saturation, then
    /// resolve the saturated sequents with R1 until the proof closes.
    fn search(
        &self,
        mut unreduced: Vec<Sequent>,
        worlds: &mut WorldsKeeper,
        names: &mut Names,
    ) -> Result<Vec<Sequent>, Error> {
        let mut solution: Vec<Sequent> = Vec::new();
        let mut reduced: Vec<Sequent> = Vec::new();

        while let Some(s) = unreduced.pop() {
            let mut children = Vec::new();

            for rule in DECOMPOSITION {
                let Some(mut child) = rule.apply(&s, worlds) else {
                    continue;
                };
                child.name = names.next();
                child.justification = vec![rule.name().to_owned(), s.name.clone()];
                debug!("{} applied to {}: {child}", rule.name(), s.name);

                if child.is_empty() {
                    solution.push(s);
                    solution.append(&mut reduced);
                    solution.push(child);
                    return Ok(solution);
                }
                children.push(child);
            }

            if children.is_empty() {
                debug!("{} is saturated", s.name);
                reduced.push(s);
            } else {
                solution.push(s);
                unreduced.extend(children);
            }
        }

        if reduced.len() > 1 {
            if let Some(closing) = self.resolve(&reduced, &mut solution, names) {
                solution.push(closing);
                return Ok(solution);
            }
        } else {
            solution.extend(reduced);
        }

        Err(Error::NoProofFound { solution })
    }

    /// The resolution phase over the saturated `pool`.
    ///
    /// Each round resolves the first unifying pair; a non-empty
    /// resolvent replaces its two premises in the pool (which therefore
    /// strictly shrinks) and the scan restarts. Returns the closing
    /// sequent once a resolvent with both sides empty is derived.
    ///
    /// Whether closing or not, every sequent the phase touches is
    /// appended to `solution`: first the saturated pool, then each
    /// resolvent in derivation order.
    fn resolve(
        &self,
        pool: &[Sequent],
        solution: &mut Vec<Sequent>,
        names: &mut Names,
    ) -> Option<Sequent> {
        solution.extend(pool.iter().cloned());
        let mut pool = pool.to_vec();

        loop {
            let r = Rule::resolve(&self.relation, &pool)?;
            let mut resolvent = r.sequent;
            resolvent.name = names.next();
            resolvent.justification = vec![
                Rule::R1.name().to_owned(),
                pool[r.left_premise].name.clone(),
                pool[r.right_premise].name.clone(),
                r.unifier.to_string(),
            ];
            debug!(
                "R1 resolved {} with {} under {}: {resolvent}",
                pool[r.left_premise].name, pool[r.right_premise].name, r.unifier
            );

            if resolvent.is_empty() {
                return Some(resolvent);
            }

            let (a, b) = (
                r.left_premise.min(r.right_premise),
                r.left_premise.max(r.right_premise),
            );
            pool.remove(b);
            pool.remove(a);
            pool.push(resolvent.clone());
            solution.push(resolvent);
        }
    }
}

/// The monotonically increasing sequent name source (`S1`, `S2`, …).
#[derive(Debug, Default)]
struct Names(usize);

impl Names {
    fn next(&mut self) -> String {
        self.0 += 1;
        format!("S{}", self.0)
    }
}
