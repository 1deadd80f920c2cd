// LLM prompt constants for long-form articles.

pub const ARTICLE_SYSTEM: &str = "You are a senior technical writer and architect who publishes \
    in-depth, publication-ready Medium articles about AI, LLM security, agentic frameworks, and \
    software engineering. Your articles are detailed, practical, and include real-world examples, \
    code snippets, and clear architecture diagrams. Return valid JSON only.";

/// Article prompt template.
/// Replace: {topic}, {json_instruction}
pub const ARTICLE_PROMPT_TEMPLATE: &str = r#"Write a comprehensive, in-depth Medium-style technical article about: "{topic}"

The article must be publication-ready and detailed enough for a senior engineer audience.

{json_instruction}

- "title": string (engaging Medium-style title)
- "subtitle": string (1-2 sentence hook)
- "sections": array of 6-8 objects, each with:
    - "heading": string
    - "body": string (4-6 paragraphs of markdown: **bold** key terms, *italic* emphasis,
      "-" bullet lists, inline `code`, concrete examples and short Python/pseudocode snippets)
- "conclusion": string (3-4 paragraphs: key takeaways, outlook, next steps)
- "diagram_nodes": array of 10-14 objects forming an architecture/workflow diagram:
    - "id": string (unique, e.g. "node_1")
    - "label": string (2-4 words)
    - "description": string (one short sentence)
    - "x": number (layered columns: entry x=50, processing x=300, core x=550, output x=800)
    - "y": number (rows 140px apart, starting at y=30)
    - "node_type": "input" | "output" | "decision" | "default"
- "diagram_edges": array of 12-18 objects connecting the nodes:
    - "id": string (unique, e.g. "edge_1_2")
    - "source": string (node id)
    - "target": string (node id)
    - "label": string (2-5 words describing what flows along the edge)
    - "animated": boolean (true on the happy path, false for errors, fallbacks and loops)
    - "edge_type": "smoothstep" | "bezier" | "straight"

Diagram rules:
1. Flow left-to-right or top-to-bottom: entry points first, outputs last.
2. At least 2 decision points with separate success and failure paths.
3. At least 1 feedback or retry loop.
4. Nodes in the same column at least 140px apart vertically.
5. Every edge label says what flows along it, never just "next".
"#;
