//! Item detail generation for catalog entries.

use serde_json::json;

use crate::catalog::models::{ItemDetail, ItemSummary};
use crate::catalog::prompts::{ITEM_DETAIL_PROMPT_TEMPLATE, ITEM_DETAIL_SYSTEM};
use crate::content::assemble::{object_list, text, text_list};
use crate::content::parser::payload_from;
use crate::content::{ContentKind, Payload};
use crate::llm_client::prompts::{tag_list, JSON_OBJECT_INSTRUCTION};

pub const DEFAULT_IMPLEMENTATION_STEPS: [&str; 5] =
    ["Step 1", "Step 2", "Step 3", "Step 4", "Step 5"];
pub const DEFAULT_RISKS: [&str; 3] = ["Risk 1", "Risk 2", "Risk 3"];
pub const DEFAULT_METRICS: [&str; 3] = ["Metric 1", "Metric 2", "Metric 3"];

pub struct ItemDetails;

impl ContentKind for ItemDetails {
    type Source = ItemSummary;
    type Output = ItemDetail;

    const LABEL: &'static str = "item detail";
    const SYSTEM_PROMPT: &'static str = ITEM_DETAIL_SYSTEM;
    const MAX_TOKENS: u32 = 2048;

    fn cache_key(item: &ItemSummary) -> String {
        format!("{}:{}", item.category, item.id)
    }

    fn build_prompt(item: &ItemSummary) -> String {
        ITEM_DETAIL_PROMPT_TEMPLATE
            .replace("{category_label}", item.category.prompt_label())
            .replace("{title}", &item.title)
            .replace("{short_description}", &item.short_description)
            .replace("{tags}", &tag_list(&item.tags))
            .replace("{json_instruction}", JSON_OBJECT_INSTRUCTION)
    }

    fn fallback_payload(item: &ItemSummary) -> Payload {
        payload_from(json!({
            "overview": format!("{}: {}", item.title, item.short_description),
            "why_it_matters": "This is a critical component of agentic security that helps protect AI systems.",
            "implementation_steps": [
                "Identify the scope and requirements",
                "Design the architecture and integration points",
                "Implement core logic",
                "Add configuration and policy controls",
                "Write unit and integration tests",
            ],
            "examples": [],
            "risks_and_pitfalls": [
                "Incomplete coverage may leave gaps",
                "Over-aggressive rules can block legitimate use",
                "Maintenance burden increases with complexity",
            ],
            "metrics_or_checks": [
                "Coverage percentage of protected surfaces",
                "False-positive rate",
                "Mean time to detection",
            ],
        }))
    }

    fn assemble(payload: &Payload, item: &ItemSummary) -> ItemDetail {
        ItemDetail {
            id: item.id.clone(),
            title: item.title.clone(),
            category: item.category,
            overview: text(payload, "overview", ""),
            why_it_matters: text(payload, "why_it_matters", ""),
            implementation_steps: text_list(
                payload,
                "implementation_steps",
                &DEFAULT_IMPLEMENTATION_STEPS,
            ),
            examples: object_list(payload, "examples"),
            risks_and_pitfalls: text_list(payload, "risks_and_pitfalls", &DEFAULT_RISKS),
            metrics_or_checks: text_list(payload, "metrics_or_checks", &DEFAULT_METRICS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Category;
    use crate::content::{ContentCache, DiskStore};
    use crate::llm_client::testing::ScriptedGenerator;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn injection_defense() -> ItemSummary {
        ItemSummary {
            id: "prompt-injection-defense".to_string(),
            title: "Prompt Injection Defense".to_string(),
            short_description: "Detect and block adversarial instructions.".to_string(),
            category: Category::Guardrails,
            tags: vec!["security".to_string(), "injection".to_string()],
        }
    }

    #[test]
    fn test_cache_key_is_category_and_id() {
        assert_eq!(
            ItemDetails::cache_key(&injection_defense()),
            "guardrails:prompt-injection-defense"
        );
    }

    #[test]
    fn test_prompt_embeds_item_fields() {
        let prompt = ItemDetails::build_prompt(&injection_defense());
        assert!(prompt.contains("following guardrail:"));
        assert!(prompt.contains("Title: Prompt Injection Defense"));
        assert!(prompt.contains("Tags: security, injection"));
        assert!(prompt.contains("\"implementation_steps\""));
        assert!(!prompt.contains("{title}"));
        assert!(!prompt.contains("{json_instruction}"));
    }

    #[test]
    fn test_empty_payload_assembles_with_named_defaults() {
        let detail = ItemDetails::assemble(&Payload::new(), &injection_defense());
        assert_eq!(detail.id, "prompt-injection-defense");
        assert_eq!(detail.overview, "");
        assert_eq!(detail.implementation_steps, DEFAULT_IMPLEMENTATION_STEPS.to_vec());
        assert_eq!(detail.risks_and_pitfalls, DEFAULT_RISKS.to_vec());
        assert_eq!(detail.metrics_or_checks, DEFAULT_METRICS.to_vec());
        assert!(detail.examples.is_empty());
    }

    #[test]
    fn test_identity_fields_override_payload() {
        let payload = payload_from(json!({"id": "other", "title": "Spoofed", "category": "evals"}));
        let detail = ItemDetails::assemble(&payload, &injection_defense());
        assert_eq!(detail.id, "prompt-injection-defense");
        assert_eq!(detail.title, "Prompt Injection Defense");
        assert_eq!(detail.category, Category::Guardrails);
    }

    #[test]
    fn test_malformed_example_is_dropped() {
        let payload = payload_from(json!({
            "examples": [
                {"title": "Good", "scenario": "A user pastes hostile text", "code_snippet": "check(x)"},
                {"title": "Missing scenario"},
                {"title": "No snippet", "scenario": "Still valid"}
            ]
        }));
        let detail = ItemDetails::assemble(&payload, &injection_defense());
        let titles: Vec<&str> = detail.examples.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Good", "No snippet"]);
    }

    #[test]
    fn test_fallback_assembles_fully() {
        let item = injection_defense();
        let detail = ItemDetails::assemble(&ItemDetails::fallback_payload(&item), &item);
        assert_eq!(
            detail.overview,
            "Prompt Injection Defense: Detect and block adversarial instructions."
        );
        assert_eq!(detail.implementation_steps.len(), 5);
        assert_eq!(detail.risks_and_pitfalls.len(), 3);
        assert_eq!(detail.metrics_or_checks.len(), 3);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let item = injection_defense();
        assert_eq!(
            ItemDetails::fallback_payload(&item),
            ItemDetails::fallback_payload(&item)
        );
    }

    #[tokio::test]
    async fn test_fenced_reply_then_cached_reply() {
        let dir = tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying("```json\n{\"overview\":\"x\"}\n```"));
        let cache: ContentCache<ItemDetails> = ContentCache::new(
            DiskStore::new(dir.path().join("detail_cache.json")),
            llm.clone(),
            "gpt-4o-mini",
        );
        let item = injection_defense();

        let first = cache.get_or_generate(&item).await.unwrap();
        assert_eq!(first.overview, "x");
        assert_eq!(first.implementation_steps, DEFAULT_IMPLEMENTATION_STEPS.to_vec());

        let second = cache.get_or_generate(&item).await.unwrap();
        assert_eq!(second.overview, "x");
        assert_eq!(second, first);
        assert_eq!(llm.calls(), 1);

        let requests = llm.requests();
        assert_eq!(requests[0].max_tokens, 2048);
        assert_eq!(requests[0].system, ITEM_DETAIL_SYSTEM);
    }
}
