pub mod cky;
pub mod grammar;
pub mod parse;
pub mod pretty_print;
pub mod samples;
mod trace;
pub use grammar::Grammar;

pub const EPSILON: &str = "ε";
pub const EPSILON_ALIASES: [&str; 3] = [EPSILON, "ϵ", ""];
