//! The formula tree shared by the parser, normaliser and inference rules.

use std::fmt;

/// The connective tagging a [`Formula`] node.
///
/// `Atom` is the only leaf kind and the only kind carrying an argument
/// list; every other connective carries operands instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Conn {
    /// An atomic formula identified by its predicate symbol.
    Atom(String),
    Not,
    And,
    Or,
    Implies,
    Iff,
    Box,
    Diamond,
    Forall,
    Exists,
}

impl Conn {
    /// The printed name of this connective, matching the solution trace
    /// output format.
    pub(crate) fn name(&self) -> &str {
        match self {
            Self::Atom(name) => name,
            Self::Not => "Not",
            Self::And => "And",
            Self::Or => "Or",
            Self::Implies => "Implies",
            Self::Iff => "Iff",
            Self::Box => "Box",
            Self::Diamond => "Diamond",
            Self::Forall => "Forall",
            Self::Exists => "Exists",
        }
    }
}

/// A single world in an accessibility path.
///
/// Ground symbols are constants: the root `"0"`, the minted integers
/// `"1"`, `"2"`, … and fully-applied Skolem functions such as `f(w)`.
/// Non-ground symbols are world variables awaiting instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WorldSymbol {
    pub(crate) value: String,
    pub(crate) ground: bool,
}

impl WorldSymbol {
    pub(crate) fn new(value: impl Into<String>, ground: bool) -> Self {
        Self {
            value: value.into(),
            ground,
        }
    }
}

impl fmt::Display for WorldSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// The accessibility path of a prefixed formula, current world first.
///
/// A non-empty index always terminates with the ground root `"0"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct WorldIndex {
    pub(crate) symbols: Vec<WorldSymbol>,
}

impl WorldIndex {
    /// The index holding only `sym`.
    pub(crate) fn root(sym: WorldSymbol) -> Self {
        Self {
            symbols: vec![sym],
        }
    }

    /// The world the formula is currently evaluated at.
    pub(crate) fn current(&self) -> Option<&WorldSymbol> {
        self.symbols.first()
    }

    /// The terminal symbol of the path (the root world).
    pub(crate) fn start(&self) -> Option<&WorldSymbol> {
        self.symbols.last()
    }

    /// True when every symbol along the path is ground.
    pub(crate) fn is_ground(&self) -> bool {
        self.symbols.iter().all(|s| s.ground)
    }

    /// A new index reaching `sym` through `self`.
    pub(crate) fn prefixed(&self, sym: WorldSymbol) -> Self {
        let mut symbols = Vec::with_capacity(self.symbols.len() + 1);
        symbols.push(sym);
        symbols.extend(self.symbols.iter().cloned());
        Self { symbols }
    }
}

impl fmt::Display for WorldIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

/// A node of the formula tree.
///
/// Invariants: only [`Conn::Atom`] nodes carry `args`; only non-atom
/// nodes carry `operands`. For binders (Forall/Exists) the last operand
/// is the body and every preceding operand is a bound-variable leaf.
/// The world index is populated on the outermost (prefixed) node only;
/// operand subtrees keep an empty index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Formula {
    pub(crate) conn: Conn,
    pub(crate) operands: Vec<Formula>,
    pub(crate) args: Vec<String>,
    pub(crate) index: WorldIndex,
}

/// True for the numeric strings denoting ground individual constants.
pub(crate) fn is_ground_term(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

impl Formula {
    /// An atomic formula with the given predicate symbol and arguments.
    pub(crate) fn atom(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            conn: Conn::Atom(name.into()),
            operands: Vec::new(),
            args,
            index: WorldIndex::default(),
        }
    }

    /// A compound formula applying `conn` to `operands`.
    pub(crate) fn compound(conn: Conn, operands: Vec<Formula>) -> Self {
        Self {
            conn,
            operands,
            args: Vec::new(),
            index: WorldIndex::default(),
        }
    }

    /// A binder over `vars` with `body` as its final operand.
    pub(crate) fn binder(conn: Conn, vars: &[String], body: Formula) -> Self {
        let mut operands: Vec<Formula> = vars
            .iter()
            .map(|v| Self::atom(v.clone(), Vec::new()))
            .collect();
        operands.push(body);
        Self::compound(conn, operands)
    }

    pub(crate) fn is_atom(&self) -> bool {
        matches!(self.conn, Conn::Atom(_))
    }

    fn is_binder(&self) -> bool {
        matches!(self.conn, Conn::Forall | Conn::Exists)
    }

    /// The names of the bound variables of a binder node.
    pub(crate) fn bound_vars(&self) -> Vec<&str> {
        debug_assert!(self.is_binder());
        self.operands[..self.operands.len() - 1]
            .iter()
            .map(|v| v.conn.name())
            .collect()
    }

    /// The body of a binder node.
    pub(crate) fn body(&self) -> &Formula {
        debug_assert!(self.is_binder());
        self.operands.last().expect("binder carries a body operand")
    }

    /// An independent copy of this formula carrying `index` instead of
    /// its own prefix.
    ///
    /// This is the only mutation rules ever perform: the spine is fresh,
    /// the operand subtrees are structurally immutable after parsing and
    /// safe to share.
    pub(crate) fn reindexed(&self, index: WorldIndex) -> Self {
        let mut f = self.clone();
        f.index = index;
        f
    }

    /// Replace every occurrence of the term variable `var` with `value`
    /// throughout the tree.
    pub(crate) fn subst_term(&self, var: &str, value: &str) -> Self {
        let mut f = self.clone();
        f.subst_term_mut(var, value);
        f
    }

    fn subst_term_mut(&mut self, var: &str, value: &str) {
        if let Conn::Atom(name) = &mut self.conn {
            // A bare variable leaf is renamed outright.
            if name == var {
                *name = value.to_owned();
            }
        }
        for arg in &mut self.args {
            if arg == var {
                *arg = value.to_owned();
            }
        }
        for op in &mut self.operands {
            op.subst_term_mut(var, value);
        }
    }

    /// The free term variables of the tree in order of first occurrence.
    pub(crate) fn free_term_vars(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut bound = Vec::new();
        self.collect_free_vars(&mut bound, &mut out);
        out
    }

    fn collect_free_vars(&self, bound: &mut Vec<String>, out: &mut Vec<String>) {
        for arg in &self.args {
            if !is_ground_term(arg)
                && !bound.iter().any(|b| b == arg)
                && !out.iter().any(|o| o == arg)
            {
                out.push(arg.clone());
            }
        }
        if self.is_binder() {
            let vars: Vec<String> = self.bound_vars().iter().map(|v| (*v).to_owned()).collect();
            let depth = bound.len();
            bound.extend(vars);
            self.body().collect_free_vars(bound, out);
            bound.truncate(depth);
        } else {
            for op in &self.operands {
                op.collect_free_vars(bound, out);
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare = self.bare_form();
        if self.index.symbols.is_empty() {
            f.write_str(&bare)
        } else {
            write!(f, "|{bare}|_{{{}}}", self.index)
        }
    }
}

impl Formula {
    /// The formula body without its world-index decoration.
    fn bare_form(&self) -> String {
        if self.is_binder() {
            let vars = self.bound_vars().join(", ");
            return format!("( {} ( {vars} ) {} )", self.conn.name(), self.body());
        }
        match self.operands.len() {
            0 => {
                if self.args.is_empty() {
                    self.conn.name().to_owned()
                } else {
                    format!("{}({})", self.conn.name(), self.args.join(","))
                }
            }
            1 => format!("( {} {} )", self.conn.name(), self.operands[0]),
            2 => format!(
                "( {} {} {} )",
                self.operands[0],
                self.conn.name(),
                self.operands[1]
            ),
            _ => unreachable!("only binders carry more than two operands"),
        }
    }
}
