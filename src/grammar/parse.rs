use thiserror::Error;

use crate::Grammar;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Line {0}: too many \"->\"")]
    TooManyArrows(usize),
    #[error("Line {0}: left side contains whitespace")]
    LeftSideWhitespace(usize),
    #[error("Line {0}: empty left side")]
    EmptyLeftSide(usize),
    #[error("Line {0}: cannot find left side")]
    MissingLeftSide(usize),
    #[error("grammar has no rules and no start symbol")]
    NoStartSymbol,
}

type RawRules<'a> = Vec<(&'a str, Vec<Vec<&'a str>>)>;

impl Grammar {
    /// Reads `A -> B C | a` style rules. The first left side is the start
    /// symbol.
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let rules = parse_rules(grammar)?;
        let start = rules.first().ok_or(GrammarError::NoStartSymbol)?.0;
        Ok(Self::build(rules, start))
    }

    pub fn parse_with_start(grammar: &str, start_symbol: &str) -> Result<Self, GrammarError> {
        Ok(Self::build(parse_rules(grammar)?, start_symbol))
    }
}

fn parse_rules(grammar: &str) -> Result<RawRules<'_>, GrammarError> {
    let mut rules: RawRules = Vec::new();

    for (i, line) in grammar.lines().enumerate() {
        if line.chars().all(|c| c.is_whitespace()) {
            continue;
        }
        let parts: Vec<&str> = line.split("->").collect();
        if parts.len() > 2 {
            return Err(GrammarError::TooManyArrows(i + 1));
        }
        let rights = if parts.len() == 2 {
            let left = parts[0].trim();
            if left.is_empty() {
                return Err(GrammarError::EmptyLeftSide(i + 1));
            } else if left.split_whitespace().count() != 1 {
                return Err(GrammarError::LeftSideWhitespace(i + 1));
            }
            rules.push((left, Vec::new()));
            parts[1].trim()
        } else {
            match (rules.last(), parts[0].trim().strip_prefix('|')) {
                (Some(_), Some(rest)) => rest.trim(),
                _ => return Err(GrammarError::MissingLeftSide(i + 1)),
            }
        };

        let bodies = &mut rules.last_mut().ok_or(GrammarError::MissingLeftSide(i + 1))?.1;
        for right in rights.split('|') {
            bodies.push(right.split_whitespace().collect());
        }
    }

    Ok(rules)
}
