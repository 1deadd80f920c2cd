use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Guardrails,
    Evals,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Guardrails, Category::Evals];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Guardrails => "guardrails",
            Category::Evals => "evals",
        }
    }

    /// Noun used when prompting for this category.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Category::Guardrails => "guardrail",
            Category::Evals => "evaluation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown category '{s}'. Expected one of: guardrails, evals"))
    }
}

/// Catalog entry from the static seed; the source entity for item details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Slug-style identifier, e.g. "prompt-injection-defense".
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub title: String,
    pub scenario: String,
    #[serde(default)]
    pub code_snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub overview: String,
    pub why_it_matters: String,
    pub implementation_steps: Vec<String>,
    pub examples: Vec<Example>,
    pub risks_and_pitfalls: Vec<String>,
    pub metrics_or_checks: Vec<String>,
}
