extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::cky::{recognize, recognize_cancellable, tokenize, CkyTable, RecognizeError};
pub use grammar::grammar::{GrammarWarning, Production, RuleIndex};
pub use grammar::parse::GrammarError;
pub use grammar::Grammar;

fn error_json(e: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

/// One sentence per line, whitespace separated tokens.
#[wasm_bindgen]
pub fn recognize_to_json(grammar: &str, sentences: &str) -> String {
    let g = crate::Grammar::parse(grammar);
    match g {
        Ok(g) => {
            let sentences: Vec<&str> = sentences
                .lines()
                .filter(|l| !l.trim().is_empty())
                .collect();
            match g.to_recognition_output_vec(&sentences, false).to_json() {
                Ok(json) => json,
                Err(e) => error_json(e),
            }
        }
        Err(e) => error_json(e),
    }
}



#[cfg(test)]
mod recognize_tests {
    use crate::grammar::{grammar::RuleIndex, samples};
    use crate::{recognize, tokenize, Grammar};

    fn run(g: &Grammar, sentences: &[&str]) -> Vec<bool> {
        sentences
            .iter()
            .map(|s| g.recognize(&tokenize(s, true)))
            .collect()
    }

    #[test]
    fn g1_reference_sentences() {
        assert_eq!(
            run(&samples::g1(), samples::G1_SENTENCES),
            vec![true, true, false, false, false, false, false, false, false]
        );
    }

    #[test]
    fn g1_longer_sentences() {
        let g = samples::g1();
        assert!(g.recognize(&tokenize("aaab", true)));
        assert!(g.recognize(&tokenize("aaba", true)));
        assert!(!g.recognize(&tokenize("baab", true)));
    }

    #[test]
    fn g2_reference_sentences() {
        assert_eq!(
            run(&samples::g2(), samples::G2_SENTENCES),
            vec![true, true, false, false, false, false, true, true, true]
        );
    }

    #[test]
    fn empty_sentence_needs_empty_start_rule() {
        assert!(!samples::g1().recognize::<&str>(&[]));
        assert!(!samples::g2().recognize::<&str>(&[]));

        let g = Grammar::build(vec![("S", vec![vec![], vec!["a"]])], "S");
        assert!(g.recognize::<&str>(&[]));
        assert!(g.recognize(&["a"]));

        let g = Grammar::build(vec![("S", vec![vec!["ε"]])], "S");
        assert!(g.recognize::<&str>(&[]));
    }

    #[test]
    fn empty_string_body_is_an_empty_production() {
        let g = Grammar::build(vec![("S", vec![vec![""], vec!["a"]])], "S");

        assert!(g.derives_empty());
        assert!(g.recognize::<&str>(&[]));
        assert!(!g.recognize(&[""]));
        assert!(g.recognize(&["a"]));
        assert!(g.get_terminal_index("").is_none());
        assert_eq!(g.to_string(), "S -> ε, a");
        assert!(g.warnings().is_empty());

        let g = Grammar::build(vec![("S", vec![vec!["a"]]), ("A", vec![vec![""]])], "S");
        assert!(!g.derives_empty());
        assert_eq!(g.warnings().len(), 1);
    }

    #[test]
    fn single_token_only_uses_start_unit_rules() {
        let g = Grammar::build(
            vec![("S", vec![vec!["a"]]), ("T", vec![vec!["b"]])],
            "S",
        );
        assert!(g.recognize(&["a"]));
        assert!(!g.recognize(&["b"]));
        assert!(!g.recognize(&["c"]));
    }

    #[test]
    fn unknown_start_symbol_derives_nothing() {
        let g = Grammar::build(samples::g1_rules(), "Z");
        assert!(!g.derives_empty());
        for sentence in samples::G1_SENTENCES {
            assert!(!g.recognize(&tokenize(sentence, true)));
        }
    }

    #[test]
    fn only_the_productive_split_counts() {
        // S -> A T, T -> B B: only the split after the first token works
        let g = Grammar::build(
            vec![
                ("S", vec![vec!["A", "T"]]),
                ("T", vec![vec!["B", "B"]]),
                ("A", vec![vec!["a"]]),
                ("B", vec![vec!["b"]]),
            ],
            "S",
        );
        assert!(g.recognize(&["a", "b", "b"]));
        assert!(!g.recognize(&["b", "b", "a"]));
        assert!(!g.recognize(&["a", "b"]));
        assert!(!g.recognize(&["a", "b", "b", "b"]));
    }

    #[test]
    fn duplicating_productions_changes_nothing() {
        let mut doubled = samples::g2_rules();
        doubled.extend(samples::g2_rules());
        for (_, bodies) in doubled.iter_mut() {
            let copy = bodies.clone();
            bodies.extend(copy);
        }
        let g = samples::g2();
        let g_doubled = Grammar::build(doubled, "S");

        for sentence in ["ab", "bb", "abab", "bbbb", "aabb", "abba", "bbb", "ababab"] {
            let tokens = tokenize(sentence, true);
            assert_eq!(g.recognize(&tokens), g_doubled.recognize(&tokens), "{}", sentence);
        }
    }

    #[test]
    fn rule_order_does_not_matter() {
        let mut reversed = samples::g1_rules();
        reversed.reverse();
        for (_, bodies) in reversed.iter_mut() {
            bodies.reverse();
        }
        let g = samples::g1();
        let g_reversed = Grammar::build(reversed, "S");

        for sentence in ["a", "aa", "aaab", "aaba", "abab", "aaaab", "aabab", "aaaaaa"] {
            let tokens = tokenize(sentence, true);
            assert_eq!(g.recognize(&tokens), g_reversed.recognize(&tokens), "{}", sentence);
        }
    }

    #[test]
    fn recognizer_takes_any_rule_index() {
        let g = samples::g2();
        let shared: &dyn RuleIndex = &g;
        assert!(recognize(shared, &["a", "b"]));
        assert!(!recognize(shared, &["b", "a"]));
    }

    #[test]
    fn grammar_is_shared_across_threads() {
        let g = std::sync::Arc::new(samples::g2());
        let handles: Vec<_> = samples::G2_SENTENCES
            .iter()
            .map(|&sentence| {
                let g = std::sync::Arc::clone(&g);
                std::thread::spawn(move || g.recognize(&tokenize(sentence, true)))
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(
            results,
            vec![true, true, false, false, false, false, true, true, true]
        );
    }

    #[test]
    fn word_tokens() {
        let g = Grammar::parse(
            "S -> NP VP\n\
             NP -> Det N\n\
             VP -> V NP\n\
             Det -> the\n\
             N -> dog | cat\n\
             V -> saw",
        )
        .unwrap();
        assert!(g.recognize(&tokenize("the dog saw the cat", false)));
        assert!(!g.recognize(&tokenize("the dog saw the", false)));
        assert!(!g.recognize(&tokenize("dog the saw the cat", false)));
    }
}

#[cfg(test)]
mod output_tests {
    use crate::grammar::samples;
    use crate::{tokenize, Grammar};

    #[test]
    fn recognition_plaintext() {
        let g = samples::g1();
        let out = g.to_recognition_output_vec(&["a", "ab", "aaab"], true);
        assert_eq!(out.to_plaintext(), "a -> true\nab -> false\naaab -> true");
        assert_eq!(out.accepted(), vec![true, false, true]);
    }

    #[test]
    fn recognition_json() {
        let g = samples::g2();
        let out = g.to_recognition_output_vec(&["a b"], false);
        let v: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
        assert_eq!(v["data"][0]["sentence"], "a b");
        assert_eq!(v["data"][0]["tokens"], serde_json::json!(["a", "b"]));
        assert_eq!(v["data"][0]["accepted"], true);
    }

    #[test]
    fn recognize_to_json_reports_errors() {
        let v: serde_json::Value =
            serde_json::from_str(&crate::recognize_to_json("S -> a -> b", "a")).unwrap();
        assert_eq!(v["error"], "Line 1: too many \"->\"");

        let v: serde_json::Value =
            serde_json::from_str(&crate::recognize_to_json("S -> A B\nA -> a\nB -> b", "a b\n\nb a"))
                .unwrap();
        assert_eq!(v["data"].as_array().unwrap().len(), 2);
        assert_eq!(v["data"][0]["accepted"], true);
        assert_eq!(v["data"][1]["accepted"], false);
    }

    #[test]
    fn productions_plaintext() {
        let g = Grammar::parse("S -> A B | ε\nLong -> a\nA -> a\nB -> b").unwrap();
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            "   S -> A B, ε\n\
             Long -> a\n\
             \x20  A -> a\n\
             \x20  B -> b"
        );
    }

    #[test]
    fn productions_latex() {
        let g = Grammar::parse("S -> A B | ε").unwrap();
        let latex = g.to_production_output_vec().to_latex();
        assert!(latex.starts_with("\\[\\begin{array}{cll}"));
        assert!(latex.contains("S & \\rightarrow &A \\ B \\mid "));
    }

    #[test]
    fn table_plaintext() {
        let g = samples::g2();
        let out = g.to_cky_table_output(tokenize("ab", true));
        assert_eq!(
            out.to_plaintext(),
            "  | a |   b\n\
             a | A |   S\n\
             b |   | B C\n\
             accepted: true"
        );
    }

    #[test]
    fn table_plaintext_places_every_cell() {
        let g = samples::g2();
        let out = g.to_cky_table_output(tokenize("abb", true));
        assert_eq!(
            out.to_plaintext(),
            "  | a |   b |   b\n\
             a | A |   S |   B\n\
             b |   | B C | A S\n\
             b |   |     | B C\n\
             accepted: false"
        );
    }

    #[test]
    fn table_of_empty_input() {
        let g = Grammar::parse("S -> ε | A A\nA -> a").unwrap();
        let out = g.to_cky_table_output(Vec::new());
        assert_eq!(out.to_plaintext(), "\naccepted: true");
        let v: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
        assert_eq!(v["cells"], serde_json::json!([]));
    }

    #[test]
    fn productions_json() {
        let g = Grammar::parse("S -> A B | ε\nA -> a\nB -> b").unwrap();
        let json = g.to_production_output_vec().to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["start"], "S");
        assert_eq!(v["productions"][0]["left"], "S");
        assert_eq!(
            v["productions"][0]["rights"],
            serde_json::json!([["A", "B"], ["ε"]])
        );
    }

    #[test]
    fn table_json() {
        let g = samples::g1();
        let out = g.to_cky_table_output(tokenize("ab", true));
        let v: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
        assert_eq!(v["cells"].as_array().unwrap().len(), 3);
        assert_eq!(v["cells"][1]["start"], 0);
        assert_eq!(v["cells"][1]["end"], 1);
        assert_eq!(v["cells"][1]["symbols"], serde_json::json!(["R"]));
        assert_eq!(v["accepted"], false);
    }
}
