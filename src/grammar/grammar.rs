use std::collections::{HashMap, HashSet};
use std::fmt;

use super::{EPSILON, EPSILON_ALIASES};

/// Right-hand side of a CNF rule. Symbols are indices into the grammar's
/// terminal or non-terminal tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Empty,
    Terminal(usize),
    Binary(usize, usize),
}

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub productions: Vec<Production>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            productions: Vec::new(),
        }
    }
}

/// Something `Grammar::build` dropped or will never consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarWarning {
    BodyTooLong {
        non_terminal: String,
        body: Vec<String>,
    },
    EmptyBodyOnNonStart {
        non_terminal: String,
    },
}

impl fmt::Display for GrammarWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarWarning::BodyTooLong { non_terminal, body } => write!(
                f,
                "{} -> {}: body has {} symbols, ignored",
                non_terminal,
                body.join(" "),
                body.len()
            ),
            GrammarWarning::EmptyBodyOnNonStart { non_terminal } => write!(
                f,
                "{} -> {}: empty body on a non-start symbol, ignored",
                non_terminal, EPSILON
            ),
        }
    }
}

/// Lookups the recognizer needs from a grammar.
pub trait RuleIndex {
    /// Non-terminals `A` with `A -> token`.
    fn terminal_derivers(&self, token: &str) -> &HashSet<usize>;
    /// Non-terminals `A` with `A -> left right`.
    fn binary_derivers(&self, left: usize, right: usize) -> &HashSet<usize>;
    fn derives_empty(&self) -> bool;
    fn start_symbol(&self) -> usize;
}

/// An immutable CNF grammar with its lookup indices.
#[derive(Debug, Clone)]
pub struct Grammar {
    non_terminals: Vec<NonTerminal>,
    terminals: Vec<String>,
    non_terminal_table: HashMap<String, usize>,
    terminal_table: HashMap<String, usize>,
    start_symbol: usize,
    terminal_index: HashMap<usize, HashSet<usize>>,
    binary_index: HashMap<(usize, usize), HashSet<usize>>,
    warnings: Vec<GrammarWarning>,
    no_derivers: HashSet<usize>,
}

impl Grammar {
    /// Builds a grammar from `(non-terminal, bodies)` pairs.
    ///
    /// Bodies of length 0 (or a single `ε`, `ϵ` or `""`) are empty productions,
    /// length 1 are terminals and length 2 are pairs of non-terminals.
    /// Longer bodies are dropped and reported through [`Grammar::warnings`].
    /// Repeated left-hand sides are merged.
    pub fn build<I, N, S>(rules: I, start_symbol: &str) -> Self
    where
        I: IntoIterator<Item = (N, Vec<Vec<S>>)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let mut g = Self {
            non_terminals: Vec::new(),
            terminals: Vec::new(),
            non_terminal_table: HashMap::new(),
            terminal_table: HashMap::new(),
            start_symbol: 0,
            terminal_index: HashMap::new(),
            binary_index: HashMap::new(),
            warnings: Vec::new(),
            no_derivers: HashSet::new(),
        };

        // left sides first, so declaration order is kept
        let rules: Vec<(usize, Vec<Vec<S>>)> = rules
            .into_iter()
            .map(|(left, bodies)| (g.add_non_terminal(left.as_ref()), bodies))
            .collect();
        g.start_symbol = g.add_non_terminal(start_symbol);

        for (left, bodies) in rules {
            for body in bodies {
                let body: Vec<&str> = body.iter().map(|s| s.as_ref()).collect();
                let production = match body.as_slice() {
                    [] => Production::Empty,
                    [s] if EPSILON_ALIASES.contains(s) => Production::Empty,
                    [t] => Production::Terminal(g.add_terminal(t)),
                    [b, c] => Production::Binary(g.add_non_terminal(b), g.add_non_terminal(c)),
                    _ => {
                        g.warnings.push(GrammarWarning::BodyTooLong {
                            non_terminal: g.non_terminals[left].name.clone(),
                            body: body.iter().map(|s| s.to_string()).collect(),
                        });
                        continue;
                    }
                };
                if production == Production::Empty && left != g.start_symbol {
                    g.warnings.push(GrammarWarning::EmptyBodyOnNonStart {
                        non_terminal: g.non_terminals[left].name.clone(),
                    });
                }
                g.add_production(left, production);
            }
        }

        g.build_indices();
        g
    }

    fn add_non_terminal(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.non_terminal_table.get(name) {
            return idx;
        }
        let idx = self.non_terminals.len();
        self.non_terminals
            .push(NonTerminal::new(idx, name.to_string()));
        self.non_terminal_table.insert(name.to_string(), idx);
        idx
    }

    fn add_terminal(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.terminal_table.get(name) {
            return idx;
        }
        let idx = self.terminals.len();
        self.terminals.push(name.to_string());
        self.terminal_table.insert(name.to_string(), idx);
        idx
    }

    fn add_production(&mut self, left: usize, production: Production) {
        let productions = &mut self.non_terminals[left].productions;
        if !productions.contains(&production) {
            productions.push(production);
        }
    }

    fn build_indices(&mut self) {
        for nt in &self.non_terminals {
            for production in &nt.productions {
                match *production {
                    Production::Terminal(t) => {
                        self.terminal_index.entry(t).or_default().insert(nt.index);
                    }
                    Production::Binary(b, c) => {
                        self.binary_index
                            .entry((b, c))
                            .or_default()
                            .insert(nt.index);
                    }
                    Production::Empty => {}
                }
            }
        }
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.non_terminals.iter()
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.terminals.iter()
    }

    pub fn get_non_terminal_index(&self, name: &str) -> Option<usize> {
        self.non_terminal_table.get(name).cloned()
    }

    pub fn get_terminal_index(&self, name: &str) -> Option<usize> {
        self.terminal_table.get(name).cloned()
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        self.non_terminals[index].name.as_str()
    }

    pub fn get_terminal_name(&self, index: usize) -> &str {
        self.terminals[index].as_str()
    }

    pub fn start_symbol_name(&self) -> &str {
        self.get_symbol_name(self.start_symbol)
    }

    pub fn productions(&self, name: &str) -> Option<&[Production]> {
        self.get_non_terminal_index(name)
            .map(|idx| self.non_terminals[idx].productions.as_slice())
    }

    pub fn warnings(&self) -> &[GrammarWarning] {
        &self.warnings
    }

    pub fn production_to_vec_str(&self, production: &Production) -> Vec<&str> {
        match *production {
            Production::Empty => vec![EPSILON],
            Production::Terminal(t) => vec![self.get_terminal_name(t)],
            Production::Binary(b, c) => vec![self.get_symbol_name(b), self.get_symbol_name(c)],
        }
    }

    /// Names of the non-terminals in `set`, sorted.
    pub fn symbol_names(&self, set: &HashSet<usize>) -> Vec<&str> {
        let mut names: Vec<&str> = set.iter().map(|idx| self.get_symbol_name(*idx)).collect();
        names.sort();
        names
    }
}

impl RuleIndex for Grammar {
    fn terminal_derivers(&self, token: &str) -> &HashSet<usize> {
        self.terminal_table
            .get(token)
            .and_then(|t| self.terminal_index.get(t))
            .unwrap_or(&self.no_derivers)
    }

    fn binary_derivers(&self, left: usize, right: usize) -> &HashSet<usize> {
        self.binary_index
            .get(&(left, right))
            .unwrap_or(&self.no_derivers)
    }

    fn derives_empty(&self) -> bool {
        self.non_terminals[self.start_symbol]
            .productions
            .contains(&Production::Empty)
    }

    fn start_symbol(&self) -> usize {
        self.start_symbol
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .non_terminal_iter()
            .filter(|nt| !nt.productions.is_empty())
            .map(|nt| {
                let rights = nt
                    .productions
                    .iter()
                    .map(|p| self.production_to_vec_str(p).join(" "))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} -> {}", nt.name, rights)
            })
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}
