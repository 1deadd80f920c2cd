//! Region-aware career detail generation.

use serde_json::json;

use crate::careers::models::{CareerDetail, CareerPathStage, Profession, Region};
use crate::careers::prompts::{CAREER_DETAIL_PROMPT_TEMPLATE, CAREER_DETAIL_SYSTEM};
use crate::content::assemble::{object_list_or, text, text_list};
use crate::content::parser::payload_from;
use crate::content::{ContentKind, Payload};
use crate::llm_client::prompts::{tag_list, JSON_OBJECT_INSTRUCTION};

pub const DEFAULT_SALARY_RANGE: &str = "Varies by experience and location";
pub const DEFAULT_KEY_SKILLS: [&str; 5] = ["Skill 1", "Skill 2", "Skill 3", "Skill 4", "Skill 5"];
pub const DEFAULT_EDUCATION: &str = "Varies by specialization.";
pub const DEFAULT_DAY_IN_THE_LIFE: &str =
    "A typical day involves a variety of tasks and responsibilities.";
pub const DEFAULT_PROS: [&str; 3] = ["Great career growth", "Competitive salary", "Meaningful work"];
pub const DEFAULT_CONS: [&str; 3] = [
    "Can be stressful",
    "Requires continuous learning",
    "Work-life balance challenges",
];
pub const DEFAULT_OUTLOOK: &str = "The outlook for this profession remains positive.";

/// URL under which the profession's illustration is served.
pub fn image_url_for(profession_id: &str) -> String {
    format!("/api/v1/careers/{profession_id}/image")
}

fn default_career_path() -> Vec<CareerPathStage> {
    [
        ("Entry Level", "0-2 years", "Starting position"),
        ("Mid Level", "3-5 years", "Growing responsibilities"),
        ("Senior Level", "6-10 years", "Leadership and mentoring"),
        ("Expert / Director", "10+ years", "Strategic direction"),
    ]
    .into_iter()
    .map(|(stage, years, description)| CareerPathStage {
        stage: stage.to_string(),
        years: years.to_string(),
        description: description.to_string(),
    })
    .collect()
}

/// A profession as seen from one job market.
#[derive(Debug, Clone)]
pub struct CareerRequest {
    pub profession: Profession,
    pub region: Region,
    pub image_url: String,
}

impl CareerRequest {
    pub fn new(profession: Profession, region: Region) -> Self {
        let image_url = image_url_for(&profession.id);
        Self {
            profession,
            region,
            image_url,
        }
    }
}

pub struct CareerDetails;

impl ContentKind for CareerDetails {
    type Source = CareerRequest;
    type Output = CareerDetail;

    const LABEL: &'static str = "career detail";
    const SYSTEM_PROMPT: &'static str = CAREER_DETAIL_SYSTEM;
    const MAX_TOKENS: u32 = 4096;

    /// US entries keep the bare profession id.
    fn cache_key(source: &CareerRequest) -> String {
        match source.region {
            Region::Usa => source.profession.id.clone(),
            region => format!("{}:{}", source.profession.id, region),
        }
    }

    fn build_prompt(source: &CareerRequest) -> String {
        let profession = &source.profession;
        CAREER_DETAIL_PROMPT_TEMPLATE
            .replace("{title}", &profession.title)
            .replace("{short_description}", &profession.short_description)
            .replace("{tags}", &tag_list(&profession.tags))
            .replace("{region_name}", source.region.display_name())
            .replace("{region_details}", source.region.market_details())
            .replace("{json_instruction}", JSON_OBJECT_INSTRUCTION)
    }

    fn fallback_payload(source: &CareerRequest) -> Payload {
        let title = &source.profession.title;
        payload_from(json!({
            "overview": source.profession.short_description,
            "salary_range": DEFAULT_SALARY_RANGE,
            "key_skills": ["Communication", "Problem-Solving", "Critical Thinking", "Adaptability", "Teamwork"],
            "education_requirements": "Typically requires a bachelor's degree in a relevant field.",
            "career_path": [
                {"stage": "Entry Level", "years": "0-2 years", "description": "Learning fundamentals and building skills."},
                {"stage": "Mid Level", "years": "3-5 years", "description": "Taking on more responsibility and specializing."},
                {"stage": "Senior Level", "years": "6-10 years", "description": "Leading projects and mentoring others."},
                {"stage": "Expert / Director", "years": "10+ years", "description": "Setting strategic direction."},
            ],
            "day_in_the_life": format!("A day as a {title} involves a mix of focused work, collaboration, and continuous learning."),
            "pros": ["Rewarding work", "Good compensation", "Growth opportunities"],
            "cons": ["Can be demanding", "Requires continuous learning", "Competitive field"],
            "future_outlook": format!("The demand for {title} professionals is expected to remain strong."),
        }))
    }

    fn assemble(payload: &Payload, source: &CareerRequest) -> CareerDetail {
        let profession = &source.profession;
        CareerDetail {
            id: profession.id.clone(),
            title: profession.title.clone(),
            overview: text(payload, "overview", profession.short_description.as_str()),
            salary_range: text(payload, "salary_range", DEFAULT_SALARY_RANGE),
            key_skills: text_list(payload, "key_skills", &DEFAULT_KEY_SKILLS),
            education_requirements: text(payload, "education_requirements", DEFAULT_EDUCATION),
            career_path: object_list_or(payload, "career_path", default_career_path),
            day_in_the_life: text(payload, "day_in_the_life", DEFAULT_DAY_IN_THE_LIFE),
            pros: text_list(payload, "pros", &DEFAULT_PROS),
            cons: text_list(payload, "cons", &DEFAULT_CONS),
            future_outlook: text(payload, "future_outlook", DEFAULT_OUTLOOK),
            image_url: source.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentCache, DiskStore};
    use crate::llm_client::testing::ScriptedGenerator;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn data_scientist() -> Profession {
        Profession {
            id: "data-scientist".to_string(),
            title: "Data Scientist".to_string(),
            short_description: "Extract insights from data.".to_string(),
            icon_emoji: "📊".to_string(),
            tags: vec!["Technology".to_string(), "Analytics".to_string()],
        }
    }

    #[test]
    fn test_cache_key_by_region() {
        let usa = CareerRequest::new(data_scientist(), Region::Usa);
        let india = CareerRequest::new(data_scientist(), Region::India);
        assert_eq!(CareerDetails::cache_key(&usa), "data-scientist");
        assert_eq!(CareerDetails::cache_key(&india), "data-scientist:india");
    }

    #[test]
    fn test_prompt_carries_region_instructions() {
        let prompt = CareerDetails::build_prompt(&CareerRequest::new(data_scientist(), Region::India));
        assert!(prompt.contains("Region: India"));
        assert!(prompt.contains("Indian Rupees"));
        assert!(prompt.contains("Tags: Technology, Analytics"));
        assert!(!prompt.contains("{region_name}"));
    }

    #[test]
    fn test_empty_payload_uses_named_defaults() {
        let request = CareerRequest::new(data_scientist(), Region::Usa);
        let detail = CareerDetails::assemble(&Payload::new(), &request);
        assert_eq!(detail.overview, "Extract insights from data.");
        assert_eq!(detail.salary_range, DEFAULT_SALARY_RANGE);
        assert_eq!(detail.key_skills, DEFAULT_KEY_SKILLS.to_vec());
        assert_eq!(detail.career_path, default_career_path());
        assert_eq!(detail.pros, DEFAULT_PROS.to_vec());
        assert_eq!(detail.cons, DEFAULT_CONS.to_vec());
        assert_eq!(detail.image_url, "/api/v1/careers/data-scientist/image");
    }

    #[test]
    fn test_empty_career_path_uses_default_stages() {
        let request = CareerRequest::new(data_scientist(), Region::Usa);
        let payload = payload_from(json!({"career_path": []}));
        let detail = CareerDetails::assemble(&payload, &request);
        assert_eq!(detail.career_path.len(), 4);
        assert_eq!(detail.career_path[3].stage, "Expert / Director");
    }

    #[test]
    fn test_image_url_is_never_taken_from_payload() {
        let request = CareerRequest::new(data_scientist(), Region::Usa);
        let payload = payload_from(json!({"image_url": "https://elsewhere.test/x.png"}));
        let detail = CareerDetails::assemble(&payload, &request);
        assert_eq!(detail.image_url, "/api/v1/careers/data-scientist/image");
    }

    #[tokio::test]
    async fn test_regions_are_cached_separately() {
        let dir = tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::new(vec![
            Ok(r#"{"salary_range": "$90k - $200k"}"#.to_string()),
            Ok(r#"{"salary_range": "₹8-40 LPA"}"#.to_string()),
        ]));
        let cache: ContentCache<CareerDetails> = ContentCache::new(
            DiskStore::new(dir.path().join("career_cache.json")),
            llm.clone(),
            "gpt-4o-mini",
        );

        let usa = cache
            .get_or_generate(&CareerRequest::new(data_scientist(), Region::Usa))
            .await
            .unwrap();
        let india = cache
            .get_or_generate(&CareerRequest::new(data_scientist(), Region::India))
            .await
            .unwrap();
        let usa_again = cache
            .get_or_generate(&CareerRequest::new(data_scientist(), Region::Usa))
            .await
            .unwrap();

        assert_eq!(usa.salary_range, "$90k - $200k");
        assert_eq!(india.salary_range, "₹8-40 LPA");
        assert_eq!(usa_again, usa);
        assert_eq!(llm.calls(), 2);
    }
}
