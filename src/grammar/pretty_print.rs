use crowbook_text_processing::escape;
use serde::Serialize;

use super::{
    cky::{fill_table, CkyTable},
    grammar::RuleIndex,
    Grammar, EPSILON,
};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        format!(
            "{:>width$} -> {}",
            self.left,
            self.rights
                .iter()
                .map(|right| right.join(" "))
                .collect::<Vec<_>>()
                .join(", "),
            width = left_width
        )
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\epsilon")
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    start: &'a str,
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .non_terminal_iter()
            .filter(|nt| !nt.productions.is_empty())
            .map(|nt| ProductionOutput {
                left: nt.name.as_str(),
                rights: nt
                    .productions
                    .iter()
                    .map(|p| self.production_to_vec_str(p))
                    .collect(),
            })
            .collect();
        ProductionOutputVec {
            start: self.start_symbol_name(),
            productions,
        }
    }
}

#[derive(Serialize)]
struct RecognitionOutput<'a> {
    sentence: &'a str,
    tokens: Vec<&'a str>,
    accepted: bool,
}

#[derive(Serialize)]
pub struct RecognitionOutputVec<'a> {
    data: Vec<RecognitionOutput<'a>>,
}

impl RecognitionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|r| format!("{} -> {}", r.sentence, r.accepted))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|r| format!("\\texttt{{{}}} & {}", escape::tex(r.sentence), r.accepted))
            .collect::<Vec<_>>()
            .join("\\\\\n");

        "\\begin{tabular}{l|c}\n".to_string()
            + "Sentence & Accepted\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn accepted(&self) -> Vec<bool> {
        self.data.iter().map(|r| r.accepted).collect()
    }
}

impl Grammar {
    pub fn to_recognition_output_vec<'a>(
        &self,
        sentences: &[&'a str],
        by_char: bool,
    ) -> RecognitionOutputVec<'a> {
        let data = sentences
            .iter()
            .map(|&sentence| {
                let tokens = super::cky::tokenize(sentence, by_char);
                let accepted = self.recognize(&tokens);
                RecognitionOutput {
                    sentence,
                    tokens,
                    accepted,
                }
            })
            .collect();
        RecognitionOutputVec { data }
    }
}

#[derive(Serialize)]
struct CellOutput<'a> {
    start: usize,
    end: usize,
    symbols: Vec<&'a str>,
}

#[derive(Serialize)]
pub struct CkyTableOutput<'a> {
    tokens: Vec<&'a str>,
    cells: Vec<CellOutput<'a>>,
    accepted: bool,
}

impl CkyTableOutput<'_> {
    fn symbols_at(&self, i: usize, j: usize) -> Option<&Vec<&str>> {
        let n = self.tokens.len();
        if i > j || j >= n {
            return None;
        }
        // stored row by row, same layout as CkyTable
        self.cells
            .get(i * (2 * n - i + 1) / 2 + (j - i))
            .map(|c| &c.symbols)
    }

    /// Row `i`, column `j` holds the cell for tokens `i..=j`.
    pub fn to_plaintext(&self) -> String {
        let n = self.tokens.len();
        let mut output: Vec<Vec<String>> = Vec::new();
        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.tokens.iter().map(|t| t.to_string()));
        output.push(header);

        for i in 0..n {
            let mut line: Vec<String> = vec![self.tokens[i].to_string()];
            line.extend((0..n).map(|j| match self.symbols_at(i, j) {
                Some(symbols) if symbols.is_empty() => "-".to_string(),
                Some(symbols) => symbols.join(" "),
                None => String::new(),
            }));
            output.push(line);
        }

        let width: Vec<usize> = (0..=n)
            .map(|j| {
                output
                    .iter()
                    .map(|line| line[j].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>();
        lines.push(format!("accepted: {}", self.accepted));
        lines.join("\n")
    }

    pub fn to_latex(&self) -> String {
        let n = self.tokens.len();
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\n",
            "|l".repeat(n)
        )];
        header.extend(
            self.tokens
                .iter()
                .map(|&t| format!("\\text{{{}}}", escape::tex(t))),
        );
        let header = header.join(" & ");

        let rows = (0..n)
            .map(|i| {
                let mut line = vec![format!("\\text{{{}}}", escape::tex(self.tokens[i]))];
                line.extend((0..n).map(|j| match self.symbols_at(i, j) {
                    Some(symbols) if symbols.is_empty() => "\\emptyset".to_string(),
                    Some(symbols) => symbols
                        .iter()
                        .map(|s| escape::tex(*s))
                        .collect::<Vec<_>>()
                        .join(",\\ "),
                    None => String::new(),
                }));
                line.join(" & ")
            })
            .collect::<Vec<_>>()
            .join("\\\\\n");

        header + "\\\\\\hline\n" + &rows + "\n\\end{array}\\]"
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Grammar {
    pub fn to_cky_table_output<'a>(&'a self, tokens: Vec<&'a str>) -> CkyTableOutput<'a> {
        let table: CkyTable = fill_table(self, &tokens);
        let n = table.len();
        let mut cells = Vec::new();
        for i in 0..n {
            for j in i..n {
                cells.push(CellOutput {
                    start: i,
                    end: j,
                    symbols: self.symbol_names(table.cell(i, j)),
                });
            }
        }
        let accepted = if tokens.is_empty() {
            self.derives_empty()
        } else {
            table.accepts(self.start_symbol())
        };
        CkyTableOutput {
            tokens,
            cells,
            accepted,
        }
    }
}
