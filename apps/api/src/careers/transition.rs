//! Step-by-step transition plans between two professions.

use serde_json::json;

use crate::careers::models::{Profession, TransitionPlan};
use crate::careers::prompts::{TRANSITION_PLAN_PROMPT_TEMPLATE, TRANSITION_PLAN_SYSTEM};
use crate::content::assemble::{object_list, text, text_list};
use crate::content::parser::payload_from;
use crate::content::{ContentKind, Payload};
use crate::llm_client::prompts::{tag_list, JSON_OBJECT_INSTRUCTION};

pub const DEFAULT_DURATION: &str = "1-2 years";
pub const DEFAULT_DIFFICULTY: &str = "moderate";
pub const DEFAULT_TIPS: [&str; 3] = [
    "Leverage your transferable skills from your current role.",
    "Network with professionals already in the target field.",
    "Start with small projects to build portfolio evidence.",
];

/// An ordered pair of distinct professions.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    pub from: Profession,
    pub to: Profession,
}

impl TransitionRequest {
    pub fn new(from: Profession, to: Profession) -> Result<Self, String> {
        if from.id == to.id {
            return Err("Source and target professions must be different".to_string());
        }
        Ok(Self { from, to })
    }
}

pub struct TransitionPlans;

impl ContentKind for TransitionPlans {
    type Source = TransitionRequest;
    type Output = TransitionPlan;

    const LABEL: &'static str = "transition plan";
    const SYSTEM_PROMPT: &'static str = TRANSITION_PLAN_SYSTEM;
    const MAX_TOKENS: u32 = 4096;

    fn cache_key(source: &TransitionRequest) -> String {
        format!("{}__to__{}", source.from.id, source.to.id)
    }

    fn build_prompt(source: &TransitionRequest) -> String {
        TRANSITION_PLAN_PROMPT_TEMPLATE
            .replace("{from_title}", &source.from.title)
            .replace("{from_description}", &source.from.short_description)
            .replace("{from_tags}", &tag_list(&source.from.tags))
            .replace("{to_title}", &source.to.title)
            .replace("{to_description}", &source.to.short_description)
            .replace("{to_tags}", &tag_list(&source.to.tags))
            .replace("{json_instruction}", JSON_OBJECT_INSTRUCTION)
    }

    fn fallback_payload(source: &TransitionRequest) -> Payload {
        payload_from(json!({
            "summary": format!(
                "Transitioning from {} to {} requires learning new skills while leveraging your existing experience.",
                source.from.title, source.to.title
            ),
            "estimated_duration": DEFAULT_DURATION,
            "difficulty": DEFAULT_DIFFICULTY,
            "steps": [
                {
                    "order": 1, "title": "Assess Transferable Skills", "category": "Skill",
                    "duration": "1-2 weeks",
                    "description": "Identify skills from your current role that transfer to the new career.",
                    "resources": ["LinkedIn Skills Assessment"], "priority": "required"
                },
                {
                    "order": 2, "title": "Research the Target Field", "category": "Education",
                    "duration": "2-4 weeks",
                    "description": "Learn about the day-to-day, required qualifications, and job market for the target profession.",
                    "resources": ["Bureau of Labor Statistics", "LinkedIn Career Explorer"], "priority": "required"
                },
                {
                    "order": 3, "title": "Build Foundation Skills", "category": "Course",
                    "duration": "3-6 months",
                    "description": "Take courses to build the core skills required for the new profession.",
                    "resources": ["Coursera", "Udemy", "edX"], "priority": "required"
                },
                {
                    "order": 4, "title": "Earn a Relevant Certification", "category": "Certification",
                    "duration": "2-4 months",
                    "description": "Get certified to validate your new skills and improve your resume.",
                    "resources": [], "priority": "recommended"
                },
                {
                    "order": 5, "title": "Build a Portfolio", "category": "Portfolio",
                    "duration": "2-3 months",
                    "description": "Create projects that demonstrate your new skills to potential employers.",
                    "resources": ["GitHub", "Personal Website"], "priority": "required"
                },
                {
                    "order": 6, "title": "Network in the New Field", "category": "Networking",
                    "duration": "Ongoing",
                    "description": "Attend meetups, conferences, and connect with professionals in your target field.",
                    "resources": ["LinkedIn", "Meetup.com"], "priority": "recommended"
                },
            ],
            "tips": [
                "Start small: take on side projects before making the full switch.",
                "Find a mentor in the target profession.",
                "Update your resume to highlight transferable skills.",
            ],
        }))
    }

    fn assemble(payload: &Payload, source: &TransitionRequest) -> TransitionPlan {
        TransitionPlan {
            source_id: source.from.id.clone(),
            source_title: source.from.title.clone(),
            target_id: source.to.id.clone(),
            target_title: source.to.title.clone(),
            summary: text(
                payload,
                "summary",
                format!("Transition from {} to {}.", source.from.title, source.to.title),
            ),
            estimated_duration: text(payload, "estimated_duration", DEFAULT_DURATION),
            difficulty: text(payload, "difficulty", DEFAULT_DIFFICULTY),
            steps: object_list(payload, "steps"),
            tips: text_list(payload, "tips", &DEFAULT_TIPS),
        }
    }
}
