//! Static catalog seed, compiled into the binary.

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::catalog::models::{Category, ItemSummary};

const CATALOG_JSON: &str = include_str!("../../seed/catalog.json");

/// Catalog items with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ItemSummary>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Parses the embedded seed document.
    pub fn load() -> Result<Self> {
        Self::from_json(CATALOG_JSON).context("Embedded catalog seed is invalid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<ItemSummary> = serde_json::from_str(json)?;
        Ok(Self::from_items(items))
    }

    pub fn from_items(items: Vec<ItemSummary>) -> Self {
        let by_id = items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id.clone(), index))
            .collect();
        Self { items, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&ItemSummary> {
        self.by_id.get(id).map(|&index| &self.items[index])
    }

    /// Items of `category`, in seed order.
    pub fn in_category(&self, category: Category) -> Vec<ItemSummary> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_seed_parses() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.in_category(Category::Guardrails).len(), 10);
        assert_eq!(catalog.in_category(Category::Evals).len(), 9);
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.by_id.len(), catalog.items.len());
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::load().unwrap();
        let item = catalog.get("prompt-injection-defense").unwrap();
        assert_eq!(item.category, Category::Guardrails);
        assert_eq!(item.title, "Prompt Injection Defense");
        assert!(catalog.get("does-not-exist").is_none());
    }
}
