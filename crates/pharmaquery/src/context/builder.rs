//! Instruction block assembly.
//!
//! Pure string templating: everything the agent knows about the workbook,
//! the routing rules, and the output contract is assembled here. Answer
//! fidelity depends entirely on this block being accurate and complete.

use super::ANSWER_SENTINEL;
use super::rules::RoutingRules;

/// Builds the instruction block handed to the agent, bound to a rule set and
/// the fiscal year used when a question names none.
#[derive(Debug, Clone)]
pub struct InstructionContext {
    rules: RoutingRules,
    default_year: u16,
}

impl InstructionContext {
    /// Create a context from a rule set and a default fiscal year.
    pub fn new(rules: RoutingRules, default_year: u16) -> Self {
        Self {
            rules,
            default_year,
        }
    }

    /// The routing rules this context carries.
    pub fn rules(&self) -> &RoutingRules {
        &self.rules
    }

    /// The fiscal year used when a question names none.
    pub fn default_year(&self) -> u16 {
        self.default_year
    }

    /// Render the instruction block for the given sheets.
    ///
    /// One positional label line per sheet in load order, the routing rules
    /// verbatim, the retrieval discipline, and the output constraints.
    pub fn render(&self, sheet_names: &[&str]) -> String {
        let mapping = sheet_names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("Table {} corresponds to sheet: {}", i + 1, name))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are a rigorous pharmaceutical industry analyst. You have access to the
following tables, one per sheet of the sales workbook:

{mapping}

### Step 1: identify the query subject
A question may name a Totalname (a brand family), a generic drug name, or a
specific branded product name.

### Step 2: select the table (apply top to bottom, first match wins)
{rules}

### Step 3: retrieval discipline
- Never quote a figure from memory. Every number must come from an executed
  table operation.
- Confirm a table's column names before filtering it.
- Filter rows by substring containment so spelling variants still match.
- If several rows match, sum the values instead of picking one row.

### Output constraints
1. When the question does not name a year, answer for fiscal year {year}.
2. Your final reply must begin with '{sentinel}'.
3. Show the matched raw rows first, then state the conclusion.
"#,
            rules = self.rules.to_instruction_lines(),
            year = self.default_year,
            sentinel = ANSWER_SENTINEL,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_labels_every_sheet_in_order() {
        let context = InstructionContext::new(RoutingRules::defaults(), 2025);
        let block = context.render(&["TotalSales", "DrugCatalog", "ProductSales"]);

        let first = block
            .find("Table 1 corresponds to sheet: TotalSales")
            .expect("first label");
        let second = block
            .find("Table 2 corresponds to sheet: DrugCatalog")
            .expect("second label");
        let third = block
            .find("Table 3 corresponds to sheet: ProductSales")
            .expect("third label");
        assert!(first < second && second < third);
    }

    #[test]
    fn test_render_contains_rules_verbatim() {
        let rules = RoutingRules::defaults();
        let context = InstructionContext::new(rules.clone(), 2025);
        let block = context.render(&["TotalSales"]);

        for rule in rules.iter() {
            assert!(block.contains(&rule.sheet_keyword));
            assert!(block.contains(&rule.category));
        }
    }

    #[test]
    fn test_render_states_year_and_sentinel() {
        let context = InstructionContext::new(RoutingRules::defaults(), 2025);
        let block = context.render(&["TotalSales"]);

        assert!(block.contains("fiscal year 2025"));
        assert!(block.contains(ANSWER_SENTINEL));
        assert!(block.contains("sum the values"));
    }
}
