use super::cky::CkyTable;

pub(super) trait TableTrace: Default {
    /// Output the cells of span length `span` once they are all filled.
    ///
    /// There is no means to return an error and a failure to output the
    ///   trace should not interrupt the fill.
    fn trace_span(&mut self, table: &CkyTable, span: usize);
}

#[derive(Debug, PartialEq, Default)]
#[cfg_attr(feature = "cky-trace-stderr", allow(dead_code))]
pub(super) struct VoidTrace;

impl TableTrace for VoidTrace {
    fn trace_span(&mut self, _table: &CkyTable, _span: usize) {
        // Do nothing at all.
    }
}

/// Cells are printed as sorted non-terminal indices; the recognizer only
/// sees a [`super::grammar::RuleIndex`], never symbol names.
#[derive(Debug, PartialEq, Default)]
#[cfg_attr(not(feature = "cky-trace-stderr"), allow(dead_code))]
pub(super) struct HumanReadableTrace;

impl TableTrace for HumanReadableTrace {
    fn trace_span(&mut self, table: &CkyTable, span: usize) {
        eprint!("[fill_table] span {span} of {n}\n", n = table.len());
        for i in 0..=(table.len() - span) {
            let j = i + span - 1;
            let mut cell: Vec<usize> = table.cell(i, j).iter().cloned().collect();
            cell.sort();
            eprint!("|  ({i}, {j}) => {cell:?}\n");
        }
        eprint!(
            "= note: this trace was output as a debugging aid \
                because `cfg(feature = \"cky-trace-stderr\")`.\n\n",
        );
    }
}

#[cfg(feature = "cky-trace-stderr")]
pub(super) type DefaultTrace = HumanReadableTrace;
#[cfg(not(feature = "cky-trace-stderr"))]
pub(super) type DefaultTrace = VoidTrace;
