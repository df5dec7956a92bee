//! # Table Components
//!
//! Plain-text tables for displaying data consistently

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Configuration for table styling
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Spaces between columns
    pub spacing: usize,
    /// Spaces before every line
    pub indent: usize,
    /// Draw a rule under the header row
    pub header_rule: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            spacing: 2,
            indent: 0,
            header_rule: true,
        }
    }
}

/// Text table with auto-sized columns.
///
/// ```rust
/// use stocksim::ui::tables::{Align, Table};
///
/// let mut table = Table::new(&["Symbol", "Price"]).align(1, Align::Right);
/// table.row(vec!["AAPL".into(), "$190.00".into()]);
/// assert_eq!(table.render(), "Symbol    Price\n------  -------\nAAPL    $190.00\n");
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    config: TableConfig,
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self::with_config(headers, TableConfig::default())
    }

    pub fn with_config(headers: &[&str], config: TableConfig) -> Self {
        Self {
            config,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            aligns: vec![Align::Left; headers.len()],
            rows: Vec::new(),
        }
    }

    pub fn align(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.aligns.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Right-align every listed column (numbers)
    pub fn numeric(mut self, columns: &[usize]) -> Self {
        for &column in columns {
            self = self.align(column, Align::Right);
        }
        self
    }

    /// Missing cells render empty; extra cells are dropped.
    pub fn row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(self.headers[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        self.push_line(&mut out, &self.headers, &widths);
        if self.config.header_rule {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            self.push_line(&mut out, &rule, &widths);
        }
        for row in &self.rows {
            self.push_line(&mut out, row, &widths);
        }
        out
    }

    fn push_line(&self, out: &mut String, cells: &[String], widths: &[usize]) {
        let gap = " ".repeat(self.config.spacing);
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.aligns)
            .map(|((cell, width), align)| match align {
                Align::Left => format!("{:<width$}", cell, width = width),
                Align::Right => format!("{:>width$}", cell, width = width),
            })
            .collect();
        out.push_str(&" ".repeat(self.config.indent));
        out.push_str(line.join(&gap).trim_end());
        out.push('\n');
    }
}

/// Render a table, or the empty state when it has no rows
pub fn render_table(table: &Table, empty_text: &str, empty_hint: Option<&str>) -> String {
    if table.is_empty() {
        render_empty_state(empty_text, empty_hint)
    } else {
        table.render()
    }
}

/// Render an empty state message
pub fn render_empty_state(primary_text: &str, secondary_text: Option<&str>) -> String {
    match secondary_text {
        Some(secondary) => format!("{}\n{}\n", primary_text, secondary),
        None => format!("{}\n", primary_text),
    }
}

/// Render stats summary (e.g., "Total: X | Unlocked: Y")
pub fn render_stats_summary(stats: &[(&str, String)]) -> String {
    stats
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Label/value pairs, labels padded to a common width
pub fn render_key_values(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{:<width$}  {}\n", k, v, width = width))
        .collect()
}
