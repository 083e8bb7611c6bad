//! Table operations the agent may invoke.
//!
//! The model drives retrieval through a fixed verb set executed against the
//! read-only workbook. Execution problems (unknown table, unknown column, no
//! matches) are reported back as observations so the model can correct
//! course, rather than aborting the question.

use serde::{Deserialize, Serialize};

use crate::workbook::{Sheet, Workbook};

/// Maximum rows rendered into one observation.
const MAX_RENDERED_ROWS: usize = 20;

/// A filter clause: keep rows whose cell in `column` contains `contains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    /// Column to filter on.
    pub column: String,
    /// Substring the cell must contain (case-insensitive).
    pub contains: String,
}

/// One action the model may request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AgentAction {
    /// List every table with its label and dimensions.
    ListTables,
    /// Show the column names of one table.
    Columns { table: String },
    /// Show the rows whose cell in `column` contains the text.
    Filter {
        table: String,
        column: String,
        contains: String,
    },
    /// Sum the numeric values of a column, optionally over filtered rows.
    Sum {
        table: String,
        column: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<FilterClause>,
    },
    /// Show the first rows of a table.
    Preview {
        table: String,
        #[serde(default = "default_preview_rows")]
        rows: usize,
    },
}

fn default_preview_rows() -> usize {
    5
}

/// Protocol section appended to the instruction block, documenting the verbs.
pub const ACTION_PROTOCOL: &str = r#"### How to query the tables
You cannot see table contents directly. To inspect them, reply with exactly one
JSON action in a ```json fenced block and wait for the observation:

{"action": "list_tables"}
    List every table with its label, sheet name, and dimensions.
{"action": "columns", "table": "TotalSales"}
    Show the column names of one table. Run this before filtering it.
{"action": "filter", "table": "TotalSales", "column": "Totalname", "contains": "Oseltamivir"}
    Show the rows whose cell in the column contains the text.
{"action": "sum", "table": "TotalSales", "column": "2025", "filter": {"column": "Totalname", "contains": "Oseltamivir"}}
    Sum the numeric values of a column, optionally over the filtered rows only.
{"action": "preview", "table": "TotalSales", "rows": 5}
    Show the first rows of a table.

A table may be referenced by its sheet name or by its label ("Table 3").
When you have verified the figures, reply with the final answer beginning with
'Final Answer:'."#;

/// Execute an action against the workbook, returning the observation text.
pub fn execute(workbook: &Workbook, action: &AgentAction) -> String {
    match action {
        AgentAction::ListTables => workbook
            .iter()
            .enumerate()
            .map(|(i, sheet)| {
                format!(
                    "Table {}: sheet \"{}\" ({} rows x {} columns)",
                    i + 1,
                    sheet.name,
                    sheet.row_count(),
                    sheet.column_count()
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),

        AgentAction::Columns { table } => with_table(workbook, table, |sheet| {
            format!("Columns of \"{}\": {}", sheet.name, sheet.headers.join(", "))
        }),

        AgentAction::Filter {
            table,
            column,
            contains,
        } => with_table(workbook, table, |sheet| {
            let Some(col) = sheet.column_index(column) else {
                return unknown_column(sheet, column);
            };
            let hits = sheet.rows_where_contains(col, contains);
            if hits.is_empty() {
                return format!(
                    "No rows of \"{}\" contain \"{}\" in column \"{}\".",
                    sheet.name, contains, column
                );
            }
            format!(
                "{} matching rows in \"{}\":\n{}",
                hits.len(),
                sheet.name,
                render_rows(sheet, &hits)
            )
        }),

        AgentAction::Sum {
            table,
            column,
            filter,
        } => with_table(workbook, table, |sheet| {
            let Some(value_col) = sheet.column_index(column) else {
                return unknown_column(sheet, column);
            };

            let rows: Vec<usize> = match filter {
                Some(clause) => {
                    let Some(filter_col) = sheet.column_index(&clause.column) else {
                        return unknown_column(sheet, &clause.column);
                    };
                    let hits = sheet.rows_where_contains(filter_col, &clause.contains);
                    if hits.is_empty() {
                        return format!(
                            "No rows of \"{}\" contain \"{}\" in column \"{}\"; nothing to sum.",
                            sheet.name, clause.contains, clause.column
                        );
                    }
                    hits
                }
                None => (0..sheet.row_count()).collect(),
            };

            let (total, counted) = sheet.sum_column(value_col, &rows);
            // Raw matched rows precede the aggregate for auditability.
            format!(
                "{}\nSum of \"{}\" over {} rows ({} numeric): {}",
                render_rows(sheet, &rows),
                column,
                rows.len(),
                counted,
                format_number(total)
            )
        }),

        AgentAction::Preview { table, rows } => with_table(workbook, table, |sheet| {
            let indices: Vec<usize> = (0..sheet.row_count().min(*rows)).collect();
            format!(
                "First {} of {} rows in \"{}\":\n{}",
                indices.len(),
                sheet.row_count(),
                sheet.name,
                render_rows(sheet, &indices)
            )
        }),
    }
}

/// Resolve a table reference: sheet name, "Table N" label, bare 1-based
/// index, or a name fragment.
fn resolve<'a>(workbook: &'a Workbook, reference: &str) -> Option<&'a Sheet> {
    if let Some(sheet) = workbook.sheet(reference) {
        return Some(sheet);
    }
    let lowered = reference.trim().to_lowercase();
    let label = lowered
        .strip_prefix("table")
        .or_else(|| lowered.strip_prefix("df"))
        .unwrap_or(&lowered);
    if let Ok(n) = label.trim().parse::<usize>() {
        if n >= 1 {
            return workbook.sheet_at(n - 1);
        }
    }
    workbook.sheet_containing(reference)
}

fn with_table(workbook: &Workbook, reference: &str, f: impl FnOnce(&Sheet) -> String) -> String {
    match resolve(workbook, reference) {
        Some(sheet) => f(sheet),
        None => format!(
            "No table matches \"{}\". Available tables: {}",
            reference,
            workbook.sheet_names().join(", ")
        ),
    }
}

fn unknown_column(sheet: &Sheet, column: &str) -> String {
    format!(
        "Table \"{}\" has no column \"{}\". Its columns are: {}",
        sheet.name,
        column,
        sheet.headers.join(", ")
    )
}

fn render_rows(sheet: &Sheet, indices: &[usize]) -> String {
    let mut out = sheet.headers.join(" | ");
    for &i in indices.iter().take(MAX_RENDERED_ROWS) {
        if let Some(row) = sheet.rows.get(i) {
            out.push('\n');
            out.push_str(&row.join(" | "));
        }
    }
    if indices.len() > MAX_RENDERED_ROWS {
        out.push_str(&format!(
            "\n... {} more rows not shown",
            indices.len() - MAX_RENDERED_ROWS
        ));
    }
    out
}

fn format_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
