use std::fmt::Write;

const CHART_TITLE: &str = "Live Cells";
const BAR_CHAR: char = '#';

/// Text bar chart of live cells per generation, one line per generation.
/// The longest bar is `width` characters wide.
pub fn live_cell_chart(counts: &[usize], width: usize) -> String {
    let max = counts.iter().copied().max().unwrap_or(0);
    let label_width = counts.len().saturating_sub(1).to_string().len();
    let mut chart = format!("{CHART_TITLE}\n");
    for (generation, &count) in counts.iter().enumerate() {
        let bar = if max == 0 { 0 } else { count * width / max };
        let bar: String = std::iter::repeat_n(BAR_CHAR, bar).collect();
        // Writing to a String cannot fail.
        let _ = writeln!(chart, "{generation:>label_width$} | {bar} {count}");
    }
    chart
}
