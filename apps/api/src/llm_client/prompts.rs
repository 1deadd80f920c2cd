// Shared prompt fragments.
// Each content type keeps its own prompts.rs alongside it; this file holds
// the cross-cutting pieces they append.

/// Output contract appended to every JSON-producing prompt.
pub const JSON_OBJECT_INSTRUCTION: &str =
    "Return ONLY a valid JSON object (no markdown fences) with these exact keys:";

/// Joins tags for inline display inside a prompt.
pub fn tag_list(tags: &[String]) -> String {
    tags.join(", ")
}
