use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profession {
    /// Slug-style identifier, e.g. "software-engineer".
    pub id: String,
    pub title: String,
    pub short_description: String,
    #[serde(default)]
    pub icon_emoji: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Job market a career answer is tailored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Usa,
    India,
}

impl Region {
    /// Case-insensitive; anything unrecognised, or nothing at all, is `Usa`.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_lowercase()).as_deref() {
            Some("india") => Region::India,
            _ => Region::Usa,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Usa => "usa",
            Region::India => "india",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Usa => "United States",
            Region::India => "India",
        }
    }

    /// Market-specific guidance appended to region-aware prompts.
    pub fn market_details(&self) -> &'static str {
        match self {
            Region::Usa => {
                "Use USD for salaries (e.g. $60,000 - $180,000/year). \
                 Reference US universities, certifications (AWS, PMP, CPA, bar exam, USMLE), \
                 and job markets (SF, NYC, Seattle, Austin)."
            }
            Region::India => {
                "ALWAYS use Indian Rupees (₹) for salaries in lakhs per annum (LPA) or crores format \
                 (e.g. ₹4-8 LPA for freshers, ₹15-40 LPA for mid-level, ₹50 LPA-1.5 Cr for senior). \
                 Reference Indian institutions (IITs, IIMs, AIIMS, NITs, NLUs, BITS Pilani), \
                 entrance exams (JEE, CAT, GATE, NEET, UPSC), Indian certifications (CA from ICAI, CS from ICSI), \
                 Indian companies (TCS, Infosys, Wipro, Flipkart, Razorpay, FAANG India offices), \
                 IT hubs (Bangalore, Hyderabad, Pune, Chennai, Gurugram/Noida), \
                 Indian learning platforms (NPTEL/SWAYAM, UpGrad, Great Learning, Unacademy), \
                 and government/PSU job routes where relevant."
            }
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPathStage {
    pub stage: String,
    pub years: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerDetail {
    pub id: String,
    pub title: String,
    pub overview: String,
    pub salary_range: String,
    pub key_skills: Vec<String>,
    pub education_requirements: String,
    pub career_path: Vec<CareerPathStage>,
    pub day_in_the_life: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub future_outlook: String,
    pub image_url: String,
}

fn default_edge_stage() -> String {
    "Mid-Career".to_string()
}

fn default_difficulty() -> String {
    "moderate".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerTransitionEdge {
    pub id: String,
    /// Source profession id.
    pub source: String,
    /// Target profession id.
    pub target: String,
    pub label: String,
    #[serde(default = "default_edge_stage")]
    pub stage: String,
    /// easy | moderate | hard
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerTransitionGraph {
    pub nodes: Vec<Profession>,
    pub edges: Vec<CareerTransitionEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionStep {
    pub order: u32,
    pub title: String,
    /// Education | Certification | Course | Skill | Experience | Networking | Portfolio
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resources: Vec<String>,
    /// required | recommended | optional
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    "recommended".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionPlan {
    pub source_id: String,
    pub source_title: String,
    pub target_id: String,
    pub target_title: String,
    pub summary: String,
    pub estimated_duration: String,
    pub difficulty: String,
    pub steps: Vec<TransitionStep>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CareerChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct CareerChatResponse {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_normalize() {
        assert_eq!(Region::normalize(Some("INDIA")), Region::India);
        assert_eq!(Region::normalize(Some(" india ")), Region::India);
        assert_eq!(Region::normalize(Some("usa")), Region::Usa);
        assert_eq!(Region::normalize(Some("mars")), Region::Usa);
        assert_eq!(Region::normalize(None), Region::Usa);
    }

    #[test]
    fn test_edge_defaults() {
        let edge: CareerTransitionEdge = serde_json::from_str(
            r#"{"id": "a-b", "source": "a", "target": "b", "label": "skills"}"#,
        )
        .unwrap();
        assert_eq!(edge.stage, "Mid-Career");
        assert_eq!(edge.difficulty, "moderate");
    }

    #[test]
    fn test_step_requires_order_and_title() {
        assert!(serde_json::from_str::<TransitionStep>(r#"{"title": "Learn SQL"}"#).is_err());
        let step: TransitionStep =
            serde_json::from_str(r#"{"order": 1, "title": "Learn SQL"}"#).unwrap();
        assert_eq!(step.priority, "recommended");
        assert!(step.resources.is_empty());
    }
}
