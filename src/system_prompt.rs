//! Fixed instructions sent to the collaborator with every symptom query

use crate::llm::{LlmMessage, LlmRequest};

/// Persona and answer structure for the rural medical assistant
const GUIDANCE_PROMPT: &str = r"You are an AI medical assistant for rural villages with limited healthcare access.
Provide helpful, practical medical advice. Always include:
1. Potential causes in simple terms
2. Home care suggestions with available resources
3. Clear warning signs when to seek real medical help
4. Prevention tips

Always clarify you're not a real doctor. Be empathetic and consider limited resources.";

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

/// Build the single-turn request for a symptom description.
pub fn guidance_request(symptoms: &str) -> LlmRequest {
    LlmRequest {
        system: Some(GUIDANCE_PROMPT.to_string()),
        messages: vec![LlmMessage::user(symptoms)],
        max_tokens: Some(MAX_TOKENS),
        temperature: Some(TEMPERATURE),
    }
}
