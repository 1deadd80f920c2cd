//! Article generation, keyed by a stable id derived from the topic.
//!
//! The generation timestamp and topic are stamped into the payload before it
//! is persisted, so a stored article can be rebuilt from its entry alone.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::articles::models::{Article, ArticleSection, ArticleSummary};
use crate::articles::prompts::{ARTICLE_PROMPT_TEMPLATE, ARTICLE_SYSTEM};
use crate::content::assemble::{as_payload, object_list, object_list_or, text};
use crate::content::parser::payload_from;
use crate::content::store::StoreError;
use crate::content::{ContentCache, ContentKind, Payload};
use crate::llm_client::prompts::JSON_OBJECT_INSTRUCTION;

pub const MIN_TOPIC_CHARS: usize = 3;

/// A validated article topic and the id it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleTopic {
    pub id: String,
    pub topic: String,
}

impl ArticleTopic {
    pub fn new(raw: &str) -> Result<Self, String> {
        let topic = raw.trim();
        if topic.chars().count() < MIN_TOPIC_CHARS {
            return Err(format!(
                "Topic must be at least {MIN_TOPIC_CHARS} characters"
            ));
        }
        Ok(Self {
            id: article_id(topic),
            topic: topic.to_string(),
        })
    }
}

/// First 8 hex chars of a name-based UUID over the normalized topic.
/// Equal topics (ignoring case and surrounding whitespace) share an id.
pub fn article_id(topic: &str) -> String {
    let normalized = topic.trim().to_lowercase();
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, normalized.as_bytes());
    uuid.simple().to_string()[..8].to_string()
}

pub struct Articles;

impl ContentKind for Articles {
    type Source = ArticleTopic;
    type Output = Article;

    const LABEL: &'static str = "article";
    const SYSTEM_PROMPT: &'static str = ARTICLE_SYSTEM;
    const MAX_TOKENS: u32 = 4096;

    fn cache_key(source: &ArticleTopic) -> String {
        source.id.clone()
    }

    fn build_prompt(source: &ArticleTopic) -> String {
        ARTICLE_PROMPT_TEMPLATE
            .replace("{topic}", &source.topic)
            .replace("{json_instruction}", JSON_OBJECT_INSTRUCTION)
    }

    fn fallback_payload(source: &ArticleTopic) -> Payload {
        let topic = &source.topic;
        payload_from(json!({
            "title": format!("Understanding {topic}"),
            "subtitle": format!("A deep dive into {topic} and why it matters."),
            "sections": [
                {"heading": "Introduction", "body": format!("In this article, we explore **{topic}** and its significance in modern software engineering.")},
                {"heading": "Core Concepts", "body": format!("The fundamental ideas behind {topic} include several key principles that practitioners should understand.")},
                {"heading": "Implementation", "body": format!("Implementing {topic} requires careful planning and a structured approach.")},
                {"heading": "Best Practices", "body": format!("When working with {topic}, following established best practices ensures reliable outcomes.")},
            ],
            "conclusion": format!("Understanding {topic} is essential for building robust systems. The key takeaway is to start small, iterate, and measure your progress."),
            "diagram_nodes": [
                {"id": "node_1", "label": "Start", "description": "Entry point for the system", "x": 50, "y": 50, "node_type": "input"},
                {"id": "node_2", "label": "Validate Input", "description": "Checks and sanitizes incoming data", "x": 300, "y": 50, "node_type": "default"},
                {"id": "node_3", "label": "Process", "description": "Core processing logic", "x": 550, "y": 50, "node_type": "default"},
                {"id": "node_4", "label": "Output", "description": "Returns the final result", "x": 800, "y": 50, "node_type": "output"},
            ],
            "diagram_edges": [
                {"id": "edge_1_2", "source": "node_1", "target": "node_2", "label": "raw input", "animated": true, "edge_type": "smoothstep"},
                {"id": "edge_2_3", "source": "node_2", "target": "node_3", "label": "validated data", "animated": true, "edge_type": "smoothstep"},
                {"id": "edge_3_4", "source": "node_3", "target": "node_4", "label": "result", "animated": true, "edge_type": "smoothstep"},
            ],
        }))
    }

    fn annotate(source: &ArticleTopic, payload: &mut Payload, generated_at: DateTime<Utc>) {
        payload.insert("topic".to_string(), Value::String(source.topic.clone()));
        payload.insert(
            "created_at".to_string(),
            Value::String(generated_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
    }

    fn assemble(payload: &Payload, source: &ArticleTopic) -> Article {
        Article {
            id: source.id.clone(),
            topic: source.topic.clone(),
            title: text(payload, "title", source.topic.as_str()),
            subtitle: text(payload, "subtitle", ""),
            sections: object_list_or(payload, "sections", || {
                vec![ArticleSection {
                    heading: "Introduction".to_string(),
                    body: format!("An exploration of {}.", source.topic),
                }]
            }),
            diagram_nodes: object_list(payload, "diagram_nodes"),
            diagram_edges: object_list(payload, "diagram_edges"),
            conclusion: text(payload, "conclusion", ""),
            created_at: text(payload, "created_at", ""),
        }
    }
}

/// Rebuilds an article from a stored payload; the topic comes from the payload itself.
fn assemble_stored(id: &str, payload: &Payload) -> Article {
    let source = ArticleTopic {
        id: id.to_string(),
        topic: text(payload, "topic", ""),
    };
    Articles::assemble(payload, &source)
}

impl ContentCache<Articles> {
    /// Summaries of every fresh article, newest first.
    pub async fn list_articles(&self) -> Vec<ArticleSummary> {
        let mut summaries: Vec<ArticleSummary> = self
            .fresh_entries()
            .await
            .iter()
            .map(|(id, entry)| ArticleSummary::from(&assemble_stored(id, &as_payload(&entry.data))))
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    /// A stored article by id. An expired entry is evicted and reads as absent.
    pub async fn get_article(&self, id: &str) -> Result<Option<Article>, StoreError> {
        Ok(self
            .lookup(id)
            .await?
            .map(|payload| assemble_stored(id, &payload)))
    }
}
