use serde::{Deserialize, Serialize};

fn default_node_type() -> String {
    "default".to_string()
}

fn default_edge_type() -> String {
    "smoothstep".to_string()
}

fn default_animated() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSection {
    pub heading: String,
    /// Markdown body.
    pub body: String,
}

/// React Flow node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub x: f64,
    pub y: f64,
    /// input | output | default | decision
    #[serde(default = "default_node_type")]
    pub node_type: String,
}

/// React Flow edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_animated")]
    pub animated: bool,
    /// smoothstep | bezier | straight
    #[serde(default = "default_edge_type")]
    pub edge_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub topic: String,
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<ArticleSection>,
    pub diagram_nodes: Vec<DiagramNode>,
    pub diagram_edges: Vec<DiagramEdge>,
    pub conclusion: String,
    /// RFC 3339 generation timestamp.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub topic: String,
    pub title: String,
    pub created_at: String,
}

impl From<&Article> for ArticleSummary {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            topic: article.topic.clone(),
            title: article.title.clone(),
            created_at: article.created_at.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ArticleGenerateRequest {
    pub topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_defaults() {
        let node: DiagramNode =
            serde_json::from_str(r#"{"id": "n1", "label": "Start", "x": 50, "y": 30}"#).unwrap();
        assert_eq!(node.node_type, "default");
        assert_eq!(node.description, "");
        assert_eq!(node.x, 50.0);
    }

    #[test]
    fn test_edge_defaults() {
        let edge: DiagramEdge =
            serde_json::from_str(r#"{"id": "e1", "source": "n1", "target": "n2"}"#).unwrap();
        assert!(edge.animated);
        assert_eq!(edge.edge_type, "smoothstep");
        assert_eq!(edge.label, "");
    }

    #[test]
    fn test_node_without_position_is_rejected() {
        assert!(serde_json::from_str::<DiagramNode>(r#"{"id": "n1", "label": "Start"}"#).is_err());
    }
}
