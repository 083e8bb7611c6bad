//! Business rules for routing a question to the right sheet.
//!
//! The rules are configuration data, not control flow: they can be edited in
//! a JSON file without touching the orchestration code. Evaluation order is
//! top to bottom, first match wins.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PharmaQueryError, Result};

/// One pattern→table business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    /// The query category this rule recognizes, as shown to the model.
    pub category: String,
    /// Keywords that signal the category in a question (case-insensitive).
    pub triggers: Vec<String>,
    /// Substring of the target sheet's name.
    pub sheet_keyword: String,
}

/// Ordered set of routing rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingRules {
    rules: Vec<RoutingRule>,
}

impl RoutingRules {
    /// Build from an explicit rule list.
    pub fn new(rules: Vec<RoutingRule>) -> Self {
        Self { rules }
    }

    /// The default pharma sales rule set.
    ///
    /// Channel-specific questions are listed before the generic-name
    /// fallback so that "first match wins" encodes the same decision
    /// procedure as the prose rules: channel words route to the per-channel
    /// sheet, everything else about a generic name routes to the combined
    /// sheet.
    pub fn defaults() -> Self {
        Self::new(vec![
            RoutingRule {
                category: "total sales for a Totalname (a brand family total)".to_string(),
                triggers: vec!["totalname".to_string()],
                sheet_keyword: "TotalSales".to_string(),
            },
            RoutingRule {
                category: "the body part or treatment area a generic drug applies to".to_string(),
                triggers: vec![
                    "body part".to_string(),
                    "body area".to_string(),
                    "treatment area".to_string(),
                ],
                sheet_keyword: "DrugCatalog".to_string(),
            },
            RoutingRule {
                category: "sales for a generic drug name with a sales channel mentioned \
                           (hospital or retail)"
                    .to_string(),
                triggers: vec![
                    "hospital".to_string(),
                    "retail".to_string(),
                    "channel".to_string(),
                ],
                sheet_keyword: "GenericSalesByChannel".to_string(),
            },
            RoutingRule {
                category: "sales for a generic drug name with no channel mentioned".to_string(),
                triggers: vec!["generic".to_string()],
                sheet_keyword: "GenericSalesCombined".to_string(),
            },
            RoutingRule {
                category: "sales for a specific branded product name".to_string(),
                triggers: vec!["product".to_string(), "brand".to_string()],
                sheet_keyword: "ProductSales".to_string(),
            },
        ])
    }

    /// Load a rule set from a JSON file (an array of rules).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PharmaQueryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Iterate over the rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &RoutingRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Deterministic pre-router: the first rule whose trigger appears in the
    /// question, case-insensitive. Used as a non-binding hint for the agent,
    /// not as enforcement.
    pub fn route(&self, question: &str) -> Option<&RoutingRule> {
        let question = question.to_lowercase();
        self.rules.iter().find(|rule| {
            rule.triggers
                .iter()
                .any(|trigger| question.contains(&trigger.to_lowercase()))
        })
    }

    /// Render the rules as instruction lines for the prompt, verbatim and in
    /// evaluation order.
    pub fn to_instruction_lines(&self) -> String {
        self.rules
            .iter()
            .map(|rule| {
                format!(
                    "- If the question asks about {} -> use the table whose sheet name \
                     contains \"{}\".",
                    rule.category, rule.sheet_keyword
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for RoutingRules {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_first_match_wins() {
        let rules = RoutingRules::defaults();

        let rule = rules
            .route("What were OseltamivirX's Totalname sales in 2025?")
            .expect("should route");
        assert_eq!(rule.sheet_keyword, "TotalSales");

        // Channel words outrank the bare generic-name rule.
        let rule = rules
            .route("Generic oseltamivir sales in the hospital channel?")
            .expect("should route");
        assert_eq!(rule.sheet_keyword, "GenericSalesByChannel");

        let rule = rules
            .route("What are the generic name sales for oseltamivir?")
            .expect("should route");
        assert_eq!(rule.sheet_keyword, "GenericSalesCombined");

        assert!(rules.route("hello there").is_none());
    }

    #[test]
    fn test_rules_round_trip_as_json() {
        let rules = RoutingRules::defaults();
        let json = serde_json::to_string(&rules).unwrap();
        // Transparent representation: a plain array, editable by hand.
        assert!(json.starts_with('['));
        let parsed: RoutingRules = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rules);
    }

    #[test]
    fn test_instruction_lines_contain_every_rule() {
        let rules = RoutingRules::defaults();
        let lines = rules.to_instruction_lines();
        for rule in rules.iter() {
            assert!(lines.contains(&rule.sheet_keyword));
            assert!(lines.contains(&rule.category));
        }
        assert_eq!(lines.lines().count(), rules.len());
    }
}
