// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// System prompt fragment that keeps replies as plain prose.
pub const PLAIN_TEXT_SYSTEM: &str = "\
    Respond in plain text only. \
    Do NOT use markdown headings, code fences, or bullet syntax. \
    Do NOT include apologies or commentary about being an AI.";

/// Instruction that forbids inventing facts the user did not supply.
pub const GROUNDING_INSTRUCTION: &str = "\
    Only use facts present in the material provided. \
    Do NOT invent employers, dates, metrics, or credentials. \
    If the material is thin, say less rather than fabricate.";
