// Shared prompt constants for every text-generation call.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt used when a caller does not supply its own.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an expert resume writer and ATS optimization specialist.";

/// Default completion budget for a single call.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default sampling temperature for a single call.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
