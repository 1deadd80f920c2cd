// LLM prompt constants for catalog item details.

/// System prompt for item detail generation.
pub const ITEM_DETAIL_SYSTEM: &str = "You are an expert in AI/LLM security, agentic frameworks, \
    and evaluation. When asked, you produce detailed, actionable technical content in valid JSON.";

/// Item detail prompt template.
/// Replace: {category_label}, {title}, {short_description}, {tags}, {json_instruction}
pub const ITEM_DETAIL_PROMPT_TEMPLATE: &str = r#"Generate a detailed technical write-up for the following {category_label}:

Title: {title}
Short description: {short_description}
Tags: {tags}

{json_instruction}
- "overview": string (2-4 sentences)
- "why_it_matters": string (2-4 sentences)
- "implementation_steps": array of 5-8 actionable bullet strings
- "examples": array of 2-4 objects, each with:
    - "title": string (short label, e.g. "Blocking a prompt injection attack")
    - "scenario": string (2-4 sentence real-world scenario describing when/how this applies)
    - "code_snippet": string (Python or pseudocode snippet demonstrating the concept; use \n for newlines)
- "risks_and_pitfalls": array of 3-6 bullet strings
- "metrics_or_checks": array of 3-6 bullet strings
"#;
