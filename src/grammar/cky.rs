use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use super::{
    grammar::RuleIndex,
    trace::{DefaultTrace, TableTrace},
    Grammar,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognizeError {
    #[error("recognition cancelled before span length {span}")]
    Cancelled { span: usize },
}

/// Upper-triangular CKY table. `cell(i, j)` holds the non-terminals that
/// derive tokens `i..=j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CkyTable {
    n: usize,
    cells: Vec<HashSet<usize>>,
}

impl CkyTable {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![HashSet::new(); n * (n + 1) / 2],
        }
    }

    /// Number of tokens the table spans.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(i <= j && j < self.n, "cell ({}, {}) out of table", i, j);
        // row i starts after rows of length n, n-1, ..., n-i+1
        i * (2 * self.n - i + 1) / 2 + (j - i)
    }

    pub fn cell(&self, i: usize, j: usize) -> &HashSet<usize> {
        &self.cells[self.offset(i, j)]
    }

    fn cell_mut(&mut self, i: usize, j: usize) -> &mut HashSet<usize> {
        let offset = self.offset(i, j);
        &mut self.cells[offset]
    }

    /// Whether `start` derives the whole input. Always false for an empty
    /// table; the empty sentence is decided by the grammar alone.
    pub fn accepts(&self, start: usize) -> bool {
        self.n > 0 && self.cell(0, self.n - 1).contains(&start)
    }
}

fn fill_base<G, T>(grammar: &G, tokens: &[T]) -> CkyTable
where
    G: RuleIndex + ?Sized,
    T: AsRef<str>,
{
    let mut table = CkyTable::new(tokens.len());
    for (p, token) in tokens.iter().enumerate() {
        table
            .cell_mut(p, p)
            .extend(grammar.terminal_derivers(token.as_ref()));
    }
    table
}

/// Fills every cell of length `span`. All shorter spans must be complete.
fn fill_span<G>(grammar: &G, table: &mut CkyTable, span: usize)
where
    G: RuleIndex + ?Sized,
{
    let n = table.len();
    for i in 0..=(n - span) {
        let j = i + span - 1;
        let mut derived: HashSet<usize> = HashSet::new();
        for k in i..j {
            let left = table.cell(i, k);
            let right = table.cell(k + 1, j);
            if left.is_empty() || right.is_empty() {
                continue;
            }
            for &b in left {
                for &c in right {
                    derived.extend(grammar.binary_derivers(b, c));
                }
            }
        }
        *table.cell_mut(i, j) = derived;
    }
}

/// Runs the full bottom-up fill and returns the table.
pub fn fill_table<G, T>(grammar: &G, tokens: &[T]) -> CkyTable
where
    G: RuleIndex + ?Sized,
    T: AsRef<str>,
{
    let mut trace = DefaultTrace::default();
    let mut table = fill_base(grammar, tokens);
    if !table.is_empty() {
        trace.trace_span(&table, 1);
    }
    for span in 2..=table.len() {
        fill_span(grammar, &mut table, span);
        trace.trace_span(&table, span);
    }
    table
}

/// Whether `tokens` is in the language of `grammar`.
pub fn recognize<G, T>(grammar: &G, tokens: &[T]) -> bool
where
    G: RuleIndex + ?Sized,
    T: AsRef<str>,
{
    if tokens.is_empty() {
        return grammar.derives_empty();
    }
    fill_table(grammar, tokens).accepts(grammar.start_symbol())
}

/// Like [`recognize`], but gives up once `cancel` is set. The flag is read
/// before each span length from 2 upward, so single-token input always
/// completes.
pub fn recognize_cancellable<G, T>(
    grammar: &G,
    tokens: &[T],
    cancel: &AtomicBool,
) -> Result<bool, RecognizeError>
where
    G: RuleIndex + ?Sized,
    T: AsRef<str>,
{
    if tokens.is_empty() {
        return Ok(grammar.derives_empty());
    }
    let mut trace = DefaultTrace::default();
    let mut table = fill_base(grammar, tokens);
    trace.trace_span(&table, 1);
    for span in 2..=table.len() {
        if cancel.load(Ordering::Relaxed) {
            return Err(RecognizeError::Cancelled { span });
        }
        fill_span(grammar, &mut table, span);
        trace.trace_span(&table, span);
    }
    Ok(table.accepts(grammar.start_symbol()))
}

/// Splits a sentence into tokens: on whitespace, or one token per
/// non-whitespace character.
pub fn tokenize(sentence: &str, by_char: bool) -> Vec<&str> {
    if by_char {
        sentence
            .char_indices()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, c)| &sentence[i..i + c.len_utf8()])
            .collect()
    } else {
        sentence.split_whitespace().collect()
    }
}

impl Grammar {
    pub fn recognize<T: AsRef<str>>(&self, tokens: &[T]) -> bool {
        recognize(self, tokens)
    }

    pub fn cky_table<T: AsRef<str>>(&self, tokens: &[T]) -> CkyTable {
        fill_table(self, tokens)
    }
}
