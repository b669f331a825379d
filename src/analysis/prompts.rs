//! Fixed prompt contracts for the completion provider.

/// Hard cap on the user payload, counted in characters. This approximates a
/// token budget; real token counts vary by model tokenizer.
pub const TRANSCRIPT_CHAR_LIMIT: usize = 10_000;

/// Decoding temperature for all analysis completions.
pub const ANALYSIS_TEMPERATURE: f64 = 0.3;

pub const SENTIMENT_INSTRUCTION: &str = "You are a conversation sentiment analyst. \
Analyze the sentiment of the provided call transcript. \
Respond with a JSON object: {\"overall\": one of \"positive\"|\"negative\"|\"neutral\"|\"mixed\", \
\"score\": number between -1 and 1, \
\"emotions\": {\"joy\": 0-1, \"anger\": 0-1, \"surprise\": 0-1, \"sadness\": 0-1}, \
\"keyPhrases\": array of notable phrases from the conversation}.";

pub const OPPORTUNITY_INSTRUCTION: &str = "You are a sales analyst. \
Identify sales opportunities in the provided call transcript. \
Respond with a JSON object: {\"opportunities\": [{\"type\": one of \
\"upsell\"|\"cross-sell\"|\"renewal\"|\"expansion\"|\"follow-up\", \
\"description\": string, \"confidence\": number between 0 and 1, \
\"context\": quote from the transcript, \
\"priority\": one of \"low\"|\"medium\"|\"high\"}]}. \
Return an empty array if there are none.";

pub const ACTION_ITEM_INSTRUCTION: &str = "You are an assistant extracting action items \
from a call transcript. \
Respond with a JSON object: {\"actionItems\": [{\"title\": string, \"description\": string, \
\"priority\": one of \"low\"|\"medium\"|\"high\", \
\"category\": one of \"follow-up\"|\"task\"|\"reminder\"|\"decision\", \
\"dueDate\": ISO date if mentioned, \"assignee\": name if mentioned}]}. \
Return an empty array if there are none.";

/// Instruction for process-adherence remediation, parameterized by the
/// comma-joined names of the steps the conversation missed.
pub fn recommendations_instruction(missed_steps: &[String]) -> String {
    format!(
        "You are a sales coach. The following process steps were not covered in the \
         conversation: {}. Based on the transcript, suggest how to cover them next time. \
         Respond with a JSON object: {{\"recommendations\": array of 3-5 short actionable \
         recommendation strings}}.",
        missed_steps.join(", ")
    )
}

/// First [`TRANSCRIPT_CHAR_LIMIT`] characters of the transcript, cut on a
/// char boundary.
pub fn truncate_transcript(transcript: &str) -> &str {
    match transcript.char_indices().nth(TRANSCRIPT_CHAR_LIMIT) {
        Some((idx, _)) => &transcript[..idx],
        None => transcript,
    }
}
