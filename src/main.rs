use std::{fs, io::BufRead, process};

use cky_recognizer::grammar::samples;
use cky_recognizer::{tokenize, Grammar};

fn print_help() {
    println!("Usage: cky-recognizer outputs [options] [grammar file]");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  recognize: Whether each sentence is in the language");
    println!("  table: CKY table of each sentence");
    println!("  demo: Run the sample grammars G1 and G2 (no grammar needed)");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("  -c: One token per character instead of whitespace separated");
    println!("  -S <symbol>: Start symbol (default: first left side)");
    println!("  -s <sentence>: Sentence to check, may be repeated");
    println!("Without -s, sentences are read from stdin, one per line.");
}

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn read_stdin_lines() -> Vec<String> {
    std::io::stdin()
        .lock()
        .lines()
        .map(|l| l.unwrap_or_else(|e| fail(format!("failed to read stdin: {}", e))))
        .collect()
}

fn main() {
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "recognize", "table", "demo"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    let mut by_char = false;
    let mut start_symbol: Option<&str> = None;
    let mut sentences: Vec<String> = Vec::new();

    while i < args.len() && args[i].starts_with('-') {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-l" => output_format = OutputFormat::LaTeX,
            "-j" => output_format = OutputFormat::JSON,
            "-c" => by_char = true,
            "-S" | "-s" if i + 1 < args.len() => {
                if args[i] == "-S" {
                    start_symbol = Some(args[i + 1].as_str());
                } else {
                    sentences.push(args[i + 1].clone());
                }
                i += 1;
            }
            _ => {
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    if outputs == ["demo"] {
        run_demo(&output_format);
        return;
    }

    let grammar_from_stdin = i == args.len();
    let input: String = if grammar_from_stdin {
        read_stdin_lines().join("\n")
    } else {
        fs::read_to_string(args[i].as_str())
            .unwrap_or_else(|e| fail(format!("failed to read {}: {}", args[i], e)))
    };

    let g = match start_symbol {
        Some(start) => Grammar::parse_with_start(&input, start),
        None => Grammar::parse(&input),
    }
    .unwrap_or_else(|e| fail(e));

    for warning in g.warnings() {
        eprintln!("warning: {}", warning);
    }

    let needs_sentences = outputs.iter().any(|&o| o == "recognize" || o == "table");
    if needs_sentences && sentences.is_empty() {
        if grammar_from_stdin {
            fail("the grammar was read from stdin, give sentences with -s");
        }
        sentences = read_stdin_lines()
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect();
    }
    let sentences: Vec<&str> = sentences.iter().map(|s| s.as_str()).collect();

    for output in outputs {
        if output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json().unwrap_or_else(|e| fail(e)),
                }
            );
        }
        if output == "recognize" {
            let t = g.to_recognition_output_vec(&sentences, by_char);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json().unwrap_or_else(|e| fail(e)),
                }
            );
        }
        if output == "table" {
            for sentence in &sentences {
                let t = g.to_cky_table_output(tokenize(sentence, by_char));
                println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => t.to_plaintext(),
                        OutputFormat::LaTeX => t.to_latex(),
                        OutputFormat::JSON => t.to_json().unwrap_or_else(|e| fail(e)),
                    }
                );
            }
        }
        if output == "demo" {
            run_demo(&output_format);
        }
    }
}

fn run_demo(output_format: &OutputFormat) {
    for (title, g, sentences) in samples::all() {
        let productions = g.to_production_output_vec();
        let results = g.to_recognition_output_vec(sentences, true);
        match output_format {
            OutputFormat::Plain => {
                println!("\nGrammar {}", title);
                println!("{}", productions.to_plaintext());
                println!("{}", results.to_plaintext());
            }
            OutputFormat::LaTeX => {
                println!("{}", productions.to_latex());
                println!("{}", results.to_latex());
            }
            OutputFormat::JSON => {
                println!("{}", results.to_json().unwrap_or_else(|e| fail(e)));
            }
        }
    }
}
