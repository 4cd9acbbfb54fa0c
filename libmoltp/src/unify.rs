//! Modal first-order unification: term unification on atom arguments
//! composed with world-index unification under the frame relation.

use std::{collections::BTreeMap, fmt};

use crate::formula::{is_ground_term, Conn, Formula, WorldIndex, WorldSymbol};

/// The accessibility relation of the frame.
///
/// Serial frames (every world sees a successor) are the default; other
/// frame conditions hang additional cases off this struct.
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    /// Accessibility is total on successors.
    pub serial: bool,
}

impl Default for Relation {
    fn default() -> Self {
        Self { serial: true }
    }
}

/// A finite substitution from variable names (term or world variables)
/// to the symbols replacing them.
///
/// The ordered map keeps the rendered form `{k/v,…}` deterministic.
#[derive(Debug, Clone, Default)]
pub(crate) struct Unification {
    map: BTreeMap<String, WorldSymbol>,
}

impl fmt::Display for Unification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.map.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{k}/{v}")?;
        }
        f.write_str("}")
    }
}

impl Unification {
    /// Record `old -> new`, failing on a conflicting existing binding.
    fn bind(&mut self, old: &str, new: WorldSymbol) -> bool {
        match self.map.get(old) {
            Some(existing) => *existing == new,
            None => {
                self.map.insert(old.to_owned(), new);
                true
            }
        }
    }

    /// Compose the bindings: a binding whose target is itself bound is
    /// chased to its final value.
    fn composed(mut self) -> Self {
        let snapshot = self.map.clone();
        for v in self.map.values_mut() {
            let mut fuel = snapshot.len();
            while !v.ground && fuel > 0 {
                match snapshot.get(&v.value) {
                    Some(next) if *next != *v => *v = next.clone(),
                    _ => break,
                }
                fuel -= 1;
            }
        }
        self
    }

    /// Apply the substitution to `f`, rewriting bound world symbols and
    /// bound atom arguments throughout the tree.
    pub(crate) fn apply(&self, f: &Formula) -> Formula {
        let mut f = f.clone();
        self.apply_mut(&mut f);
        f
    }

    fn apply_mut(&self, f: &mut Formula) {
        for s in &mut f.index.symbols {
            if !s.ground {
                if let Some(new) = self.map.get(&s.value) {
                    *s = new.clone();
                }
            }
        }
        for arg in &mut f.args {
            if let Some(new) = self.map.get(arg) {
                *arg = new.value.clone();
            }
        }
        for op in &mut f.operands {
            self.apply_mut(op);
        }
    }
}

impl Relation {
    /// Unify two atomic prefixed formulas.
    ///
    /// Argument lists unify pairwise (numeric strings are ground
    /// individual constants, anything else a variable); the world
    /// indices unify under the frame relation; the two substitutions
    /// compose into the returned unifier.
    pub(crate) fn munify(&self, p: &Formula, q: &Formula) -> Option<Unification> {
        match (&p.conn, &q.conn) {
            (Conn::Atom(a), Conn::Atom(b)) if a == b => {}
            _ => return None,
        }
        if p.args.len() != q.args.len() {
            return None;
        }

        let mut u = Unification::default();
        for (a, b) in p.args.iter().zip(&q.args) {
            if a == b {
                continue;
            }
            let ok = match (is_ground_term(a), is_ground_term(b)) {
                (false, true) => u.bind(a, WorldSymbol::new(b.clone(), true)),
                (true, false) => u.bind(b, WorldSymbol::new(a.clone(), true)),
                // Distinct constants, or distinct variables, never meet.
                _ => false,
            };
            if !ok {
                return None;
            }
        }

        let w = self.wunify(&p.index, &q.index)?;
        for (k, v) in w.map {
            if !u.bind(&k, v) {
                return None;
            }
        }

        Some(u.composed())
    }

    /// Unify two world indices under the frame relation.
    ///
    /// Both paths must share the ground root `"0"`; the current-world
    /// symbols are then matched according to the permitted
    /// substitutions of the relation.
    pub(crate) fn wunify(&self, i: &WorldIndex, j: &WorldIndex) -> Option<Unification> {
        let (ri, rj) = (i.start()?, j.start()?);
        if ri.value != "0" || rj.value != "0" {
            return None;
        }

        let (ci, cj) = (i.current()?, j.current()?);
        if ci.value == cj.value {
            return Some(Unification::default());
        }

        let mut u = Unification::default();
        match (ci.ground, cj.ground) {
            // Distinct ground worlds never unify.
            (true, true) => return None,

            (true, false) if self.serial => {
                u.bind(&cj.value, ci.clone());
            }
            (false, true) if self.serial => {
                u.bind(&ci.value, cj.clone());
            }
            (false, false) if self.serial => {
                u.bind(&ci.value, cj.clone());
            }
            _ => return None,
        }

        Some(u)
    }
}
