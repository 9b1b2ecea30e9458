// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Common instruction appended to every prompt built from résumé facts.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Only state facts that appear in the context above. \
    Do NOT invent employers, degrees, dates, projects, or numbers. \
    If the context does not cover something, speak about it in general terms \
    without making up specifics.";

/// Keeps answers in spoken register: no markdown, no lists, no headings.
pub const SPOKEN_STYLE_INSTRUCTION: &str = "\
    Respond in plain flowing sentences as if speaking aloud. \
    Do NOT use markdown, bullet points, numbered lists, or headings.";
