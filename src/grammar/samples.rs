//! Two reference grammars and the sentences the demo runs against them.
//! Sentences are read one character per token.

use crate::Grammar;

pub type StaticRules = Vec<(&'static str, Vec<Vec<&'static str>>)>;

pub const G1_SENTENCES: &[&str] = &["a", "b", "aa", "ab", "ba", "aba", "aaa", "bab", "abab"];
pub const G2_SENTENCES: &[&str] = &["ab", "bb", "a", "b", "abb", "bab", "abab", "bbbb", "aabb"];

/// S -> a | X A | A X | b
/// A -> R B
/// B -> A X | b | a
/// X -> a
/// R -> X B
pub fn g1_rules() -> StaticRules {
    vec![
        ("S", vec![vec!["a"], vec!["X", "A"], vec!["A", "X"], vec!["b"]]),
        ("A", vec![vec!["R", "B"]]),
        ("B", vec![vec!["A", "X"], vec!["b"], vec!["a"]]),
        ("X", vec![vec!["a"]]),
        ("R", vec![vec!["X", "B"]]),
    ]
}

/// S -> A B | C D | C B | S S
/// A -> B C | a
/// B -> S C | b
/// C -> D D | b
/// D -> B A
pub fn g2_rules() -> StaticRules {
    vec![
        (
            "S",
            vec![
                vec!["A", "B"],
                vec!["C", "D"],
                vec!["C", "B"],
                vec!["S", "S"],
            ],
        ),
        ("A", vec![vec!["B", "C"], vec!["a"]]),
        ("B", vec![vec!["S", "C"], vec!["b"]]),
        ("C", vec![vec!["D", "D"], vec!["b"]]),
        ("D", vec![vec!["B", "A"]]),
    ]
}

pub fn g1() -> Grammar {
    Grammar::build(g1_rules(), "S")
}

pub fn g2() -> Grammar {
    Grammar::build(g2_rules(), "S")
}

/// Each sample grammar with a title and its sentences.
pub fn all() -> Vec<(&'static str, Grammar, &'static [&'static str])> {
    vec![("G1", g1(), G1_SENTENCES), ("G2", g2(), G2_SENTENCES)]
}
