// LLM prompt constants for the career counselor.

use crate::careers::models::{Profession, Region};
use crate::llm_client::prompts::tag_list;

pub const CAREER_DETAIL_SYSTEM: &str = "You are an experienced career counselor and workforce \
    analyst. You provide accurate, well-researched, and encouraging career guidance. \
    Return valid JSON only.";

/// Career detail prompt template.
/// Replace: {title}, {short_description}, {tags}, {region_name}, {region_details}, {json_instruction}
pub const CAREER_DETAIL_PROMPT_TEMPLATE: &str = r#"Generate a comprehensive career guide for the following profession:

Title: {title}
Short description: {short_description}
Tags: {tags}
Region: {region_name}

Region-specific instructions:
{region_details}

{json_instruction}

- "overview": string (3-5 sentences providing a rich overview of this career)
- "salary_range": string (realistic {region_name} market range in local currency)
- "key_skills": array of 8-10 strings (most important skills for this career)
- "education_requirements": string (2-3 sentences about typical degrees, certifications and institutions in {region_name})
- "career_path": array of 4-6 objects, each with:
    - "stage": string (e.g. "Junior Developer", "Senior Engineer", "Tech Lead")
    - "years": string (e.g. "0-2 years", "3-5 years")
    - "description": string (1-2 sentences about what this stage involves)
- "day_in_the_life": string (2-3 paragraph narrative about a typical workday, vivid and realistic)
- "pros": array of 5-7 strings (advantages of this career)
- "cons": array of 4-6 strings (challenges or disadvantages)
- "future_outlook": string (2-3 sentences about market trends, growth projections and how AI affects this profession)
"#;

pub const TRANSITION_PLAN_SYSTEM: &str = "You are an experienced career transition coach and \
    workforce strategist. You help professionals navigate career changes with practical, \
    step-by-step plans. Return valid JSON only, no markdown fences.";

/// Transition plan prompt template.
/// Replace: {from_title}, {from_description}, {from_tags}, {to_title}, {to_description}, {to_tags}, {json_instruction}
pub const TRANSITION_PLAN_PROMPT_TEMPLATE: &str = r#"Create a comprehensive career transition plan for someone moving from:

CURRENT PROFESSION: {from_title}
  Description: {from_description}
  Skills/Tags: {from_tags}

TARGET PROFESSION: {to_title}
  Description: {to_description}
  Skills/Tags: {to_tags}

{json_instruction}

- "summary": string (2-3 sentences: which transferable skills help, which gaps exist)
- "estimated_duration": string (realistic total, e.g. "1-2 years", "6-12 months")
- "difficulty": string (one of "easy", "moderate", "hard")
- "steps": array of 8-12 objects, each with:
    - "order": integer (1-based, sequential)
    - "title": string (short action title, e.g. "Master Python & Data Libraries")
    - "category": string (one of: "Education", "Certification", "Course", "Skill", "Experience", "Networking", "Portfolio")
    - "duration": string (e.g. "2-3 months")
    - "description": string (2-3 sentences on what to do and why it matters for this transition)
    - "resources": array of 1-3 strings (specific courses, platforms, books or certifications by name)
    - "priority": string (one of "required", "recommended", "optional")
- "tips": array of 3-5 strings (practical advice for this specific transition)

Order the steps chronologically and build on transferable skills from the current profession.
"#;

/// System instruction for the per-profession counselor chat.
pub fn chat_system_prompt(profession: &Profession, region: Region) -> String {
    let region_name = region.display_name();
    format!(
        "You are an experienced, empathetic career counselor specializing in the \
         '{title}' profession **in {region_name}**. Your goal is to help the user understand \
         this career path in the context of the {region_name} market.\n\n\
         Profession overview: {description}\n\
         Relevant tags: {tags}\n\
         Region: {region_name}\n\n\
         IMPORTANT region-specific instructions:\n{details}\n\n\
         Guidelines:\n\
         - Answer questions about salary expectations (in local currency), required skills, \
         education paths (using the {region_name} education system and institutions), work-life \
         balance, career growth, industry trends, and day-to-day responsibilities **specific to \
         {region_name}**.\n\
         - Always mention region-specific companies, institutions, certifications, and job markets.\n\
         - Be encouraging but honest: mention both opportunities and challenges.\n\
         - Provide specific, actionable advice when possible.\n\
         - If the user asks about a different profession, briefly acknowledge it but steer back \
         to {title} or suggest they explore the other profession card.\n\
         - Keep responses concise (2-4 paragraphs) unless the user asks for more detail.\n\
         - Use a warm, professional tone.",
        title = profession.title,
        description = profession.short_description,
        tags = tag_list(&profession.tags),
        details = region.market_details(),
    )
}

/// Image prompt for a profession card illustration.
pub fn career_image_prompt(title: &str) -> String {
    format!(
        "Professional, modern illustration of a {title} at work. Clean minimal vector art style, \
         soft ambient lighting, muted corporate color palette with subtle gradients, no text or \
         words in the image. The scene should feel aspirational and approachable."
    )
}
