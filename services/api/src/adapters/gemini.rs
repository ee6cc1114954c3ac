//! services/api/src/adapters/gemini.rs
//!
//! This module contains the adapter for the reading-generation LLM.
//! It implements the `ReadingGenerationService` port from the `core` crate
//! against the Gemini `generateContent` REST endpoint, asking for a
//! schema-constrained JSON response and validating it at the boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tarot_core::domain::ReadingRequest;
use tarot_core::ports::{GenerationError, ReadingGenerationService, ReadingResult};
use tarot_core::{Reading, ReadingSection};
use tracing::{info, warn};

//=========================================================================================
// Instruction Rendering
//=========================================================================================

/// Renders the full natural-language instruction for one reading request.
///
/// The template states the reader persona and target language, embeds the
/// verbatim question, the optional personal-details block, and the three
/// positional card blocks, then spells out the required JSON output shape.
pub fn render_instruction(request: &ReadingRequest) -> String {
    let question = &request.question;
    let language = &request.language_name;

    let mut prompt = format!(
        "You are a wise and empathetic tarot reader. Your primary goal is to provide a clear, \
         insightful, and supportive answer to the user's specific question, using the tarot \
         cards as a guide. Your tone is like a caring counselor, using beautiful, narrative \
         language that always ties back to the user's query. You are speaking in {language}.\n\
         \n\
         **CRITICAL INSTRUCTION: Every part of your response MUST directly address the user's \
         question. Do not give generic card meanings. Interpret the cards ONLY in the context \
         of the question.**\n\
         \n\
         The user's question is: **\"{question}\"**\n\n"
    );

    if let Some(user) = &request.user_info {
        let middle = user
            .middle_name
            .as_deref()
            .map(|m| format!("{m} "))
            .unwrap_or_default();
        prompt.push_str(&format!(
            "User's personal details for a deeper connection:\n\
             - **Name:** {first} {middle}{last}\n\
             - **Date of Birth:** {dob}\n",
            first = user.first_name,
            last = user.last_name,
            dob = user.dob.format("%Y-%m-%d"),
        ));
        // The day/night flag only exists for Wednesday-born users; never
        // assume it is present.
        if let Some(shift) = user.wednesday_shift {
            prompt.push_str(&format!(
                "- **Birth Time on Wednesday:** {} (This is significant in some astrological \
                 traditions, especially Thai astrology.)\n",
                shift.as_str()
            ));
        }
        prompt.push_str(
            "*Subtly weave their energetic signature (Zodiac/Life Path, and if applicable, \
             their Wednesday birth time) into the narrative as it relates to their question.*\n\n",
        );
    }

    prompt.push_str(&format!(
        "Here are the cards chosen to illuminate the answer to \"{question}\":\n\n"
    ));
    for (index, (label, hint, card)) in [
        (&request.labels.past, "Foundation related to the question", &request.past_card),
        (&request.labels.present, "Heart of the matter concerning the question", &request.present_card),
        (&request.labels.future, "Potential path regarding the question", &request.future_card),
    ]
    .into_iter()
    .enumerate()
    {
        prompt.push_str(&format!(
            "{n}.  **{label} ({hint}):** {name}\n\
             \u{20}   *   Upright Meaning: {up}\n\
             \u{20}   *   Reversed Meaning: {rev}\n\n",
            n = index + 1,
            name = card.card_name,
            up = card.card_meaning_up,
            rev = card.card_meaning_rev,
        ));
    }

    prompt.push_str(&format!(
        "**Response Generation Instructions:**\n\
         \n\
         Generate a response in the specified JSON format. The entire response must be in \
         {language}. The language should be fluid, reassuring, and insightful, focusing \
         entirely on answering the user's question. For the 'body' of each section, ensure \
         the text is broken into 2-3 paragraphs for readability, using a double line break \
         as a separator. Do not use markdown formatting.\n\
         \n\
         **JSON Output Structure:**\n\
         - **initialSummary**: Start with a direct answer to \"{question}\". Synthesize the \
         story of the three cards to give a clear, immediate summary. This should be a \
         concise single paragraph.\n\
         - **past**: An object with \"title\" (using {past}) and \"body\". Explain how this \
         card's energy has influenced the situation surrounding **your question**. How did \
         the past lead to this query? Format the body with 2-3 paragraphs.\n\
         - **present**: An object with \"title\" (using {present}) and \"body\". Describe \
         what is currently happening in relation to **your question**. What does this card \
         reveal about the current dynamics of your situation? Format the body with 2-3 \
         paragraphs.\n\
         - **future**: An object with \"title\" (using {future}) and \"body\". Illuminate \
         the potential outcome concerning **your question**. What direction is this heading? \
         What should you be aware of? Format the body with 2-3 paragraphs.\n\
         - **conclusion**: An object with \"title\" (using {conclusion}) and \"body\". Bring \
         the story to a close with empowering advice specifically for **your question**. \
         What is the key takeaway? Format the body as a concise, actionable single paragraph.\n",
        past = request.labels.past,
        present = request.labels.present,
        future = request.labels.future,
        conclusion = request.labels.conclusion,
    ));

    prompt
}

//=========================================================================================
// Wire Types (Gemini generateContent)
//=========================================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// The text of the first candidate part, if the service produced any.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
    }
}

/// Fortune-telling prose trips default moderation, so every category is
/// relaxed to the most permissive allowed threshold. This mirrors the
/// original service configuration and is not a security boundary.
fn safety_settings() -> Vec<SafetySetting> {
    const BLOCK_NONE: &str = "BLOCK_NONE";
    [
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: BLOCK_NONE,
    })
    .collect()
}

/// The output schema the service is asked to conform to: a summary plus four
/// titled sections, every string required.
fn response_schema() -> Value {
    let section = json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "body": { "type": "STRING" },
        },
        "required": ["title", "body"],
    });
    json!({
        "type": "OBJECT",
        "properties": {
            "initialSummary": { "type": "STRING" },
            "past": section,
            "present": section,
            "future": section,
            "conclusion": section,
        },
        "required": ["initialSummary", "past", "present", "future", "conclusion"],
    })
}

//=========================================================================================
// Response Validation
//=========================================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReading {
    initial_summary: Option<String>,
    past: Option<RawSection>,
    present: Option<RawSection>,
    future: Option<RawSection>,
    conclusion: Option<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    title: Option<String>,
    body: Option<String>,
}

fn required_text(value: Option<String>, field: &str) -> Result<String, GenerationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(GenerationError::Schema(format!(
            "the response is missing the required field '{field}'"
        ))),
    }
}

fn required_section(
    section: Option<RawSection>,
    field: &str,
) -> Result<ReadingSection, GenerationError> {
    let section = section.ok_or_else(|| {
        GenerationError::Schema(format!(
            "the response is missing the required field '{field}'"
        ))
    })?;
    Ok(ReadingSection {
        title: required_text(section.title, &format!("{field}.title"))?,
        body: required_text(section.body, &format!("{field}.body"))?,
    })
}

/// Parses and validates the candidate text against the required reading
/// shape. A success passes the structure through unchanged; any missing or
/// empty field is a schema failure naming that field.
fn parse_reading(text: &str) -> Result<Reading, GenerationError> {
    let raw: RawReading = serde_json::from_str(text).map_err(|e| {
        GenerationError::Schema(format!("the response was not valid JSON: {e}"))
    })?;

    Ok(Reading {
        initial_summary: required_text(raw.initial_summary, "initialSummary")?,
        past: required_section(raw.past, "past")?,
        present: required_section(raw.present, "present")?,
        future: required_section(raw.future, "future")?,
        conclusion: required_section(raw.conclusion, "conclusion")?,
    })
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ReadingGenerationService` against Gemini.
#[derive(Clone)]
pub struct GeminiReadingAdapter {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiReadingAdapter {
    /// Creates a new `GeminiReadingAdapter`. The `http` client carries the
    /// request timeout configured at startup.
    pub fn new(http: reqwest::Client, api_base: String, api_key: String, model: String) -> Self {
        Self {
            http,
            api_base,
            api_key,
            model,
        }
    }

    async fn generate_inner(
        &self,
        request: &ReadingRequest,
    ) -> Result<Reading, GenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );

        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: render_instruction(request),
                }],
            }],
            safety_settings: safety_settings(),
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Transport(format!(
                "the service answered with HTTP {status}: {body}"
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Schema(e.to_string()))?;
        let text = envelope.first_text().ok_or_else(|| {
            GenerationError::Schema("the service returned no candidate text".to_string())
        })?;

        parse_reading(&text)
    }
}

//=========================================================================================
// `ReadingGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ReadingGenerationService for GeminiReadingAdapter {
    /// Generates a reading, flattening every internal failure into the
    /// caller-visible `ReadingResult::Failure`.
    async fn generate(&self, request: &ReadingRequest) -> ReadingResult {
        info!(
            model = %self.model,
            locale = %request.locale,
            "requesting tarot reading generation"
        );
        match self.generate_inner(request).await {
            Ok(reading) => ReadingResult::Success(reading),
            Err(err) => {
                warn!(error = %err, "reading generation failed");
                ReadingResult::from(err)
            }
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tarot_core::domain::{
        CardSnapshot, Locale, SpreadLabels, UserProfile, WednesdayShift,
    };

    fn snapshot(name: &str) -> CardSnapshot {
        CardSnapshot {
            card_name: name.to_string(),
            card_meaning_up: format!("{name} upright"),
            card_meaning_rev: format!("{name} reversed"),
        }
    }

    fn request(user_info: Option<UserProfile>) -> ReadingRequest {
        ReadingRequest {
            question: "Will I find love?".to_string(),
            past_card: snapshot("The Fool"),
            present_card: snapshot("The Tower"),
            future_card: snapshot("The Sun"),
            labels: SpreadLabels {
                past: "Past".to_string(),
                present: "Present".to_string(),
                future: "Future".to_string(),
                conclusion: "Conclusion".to_string(),
            },
            user_info,
            locale: Locale::En,
            language_name: "English".to_string(),
        }
    }

    fn profile(shift: Option<WednesdayShift>) -> UserProfile {
        UserProfile {
            first_name: "Anna".to_string(),
            middle_name: None,
            last_name: "Lee".to_string(),
            dob: NaiveDate::from_ymd_opt(1995, 3, 1).unwrap(),
            wednesday_shift: shift,
        }
    }

    #[test]
    fn instruction_embeds_question_cards_and_language() {
        let prompt = render_instruction(&request(None));
        assert!(prompt.contains("You are speaking in English."));
        assert!(prompt.contains("The user's question is: **\"Will I find love?\"**"));
        assert!(prompt.contains("**Past (Foundation related to the question):** The Fool"));
        assert!(prompt.contains("Upright Meaning: The Fool upright"));
        assert!(prompt.contains("Reversed Meaning: The Fool reversed"));
        assert!(prompt.contains("**Future (Potential path regarding the question):** The Sun"));
        assert!(prompt.contains("- **conclusion**: An object with \"title\" (using Conclusion)"));
    }

    #[test]
    fn instruction_omits_personal_details_without_a_profile() {
        let prompt = render_instruction(&request(None));
        assert!(!prompt.contains("User's personal details"));
        assert!(!prompt.contains("Birth Time on Wednesday"));
    }

    #[test]
    fn instruction_includes_profile_and_dob() {
        let prompt = render_instruction(&request(Some(profile(None))));
        assert!(prompt.contains("- **Name:** Anna Lee"));
        assert!(prompt.contains("- **Date of Birth:** 1995-03-01"));
        // A Wednesday dob without the flag renders no birth-time line.
        assert!(!prompt.contains("Birth Time on Wednesday"));
    }

    #[test]
    fn instruction_includes_wednesday_shift_only_when_present() {
        let prompt = render_instruction(&request(Some(profile(Some(WednesdayShift::Night)))));
        assert!(prompt.contains("- **Birth Time on Wednesday:** night"));
    }

    #[test]
    fn instruction_renders_middle_name_between_first_and_last() {
        let mut user = profile(None);
        user.middle_name = Some("Marie".to_string());
        let prompt = render_instruction(&request(Some(user)));
        assert!(prompt.contains("- **Name:** Anna Marie Lee"));
    }

    #[test]
    fn wire_request_serializes_to_camel_case() {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            safety_settings: safety_settings(),
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };
        let value = serde_json::to_value(&payload).unwrap();

        let settings = value["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), 4);
        for setting in settings {
            assert_eq!(setting["threshold"], "BLOCK_NONE");
        }
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        let required = value["generationConfig"]["responseSchema"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(
            required,
            &vec![
                json!("initialSummary"),
                json!("past"),
                json!("present"),
                json!("future"),
                json!("conclusion")
            ]
        );
    }

    fn valid_reading_json() -> Value {
        json!({
            "initialSummary": "Love is near.",
            "past": { "title": "Past", "body": "First.\n\nSecond." },
            "present": { "title": "Present", "body": "First.\n\nSecond." },
            "future": { "title": "Future", "body": "First.\n\nSecond." },
            "conclusion": { "title": "Conclusion", "body": "Go gently." },
        })
    }

    #[test]
    fn valid_response_passes_through_unchanged() {
        let reading = parse_reading(&valid_reading_json().to_string()).unwrap();
        assert_eq!(reading.initial_summary, "Love is near.");
        assert_eq!(reading.past.title, "Past");
        assert_eq!(reading.past.body, "First.\n\nSecond.");
        assert_eq!(reading.conclusion.body, "Go gently.");
    }

    #[test]
    fn missing_conclusion_is_a_schema_error_naming_the_field() {
        let mut value = valid_reading_json();
        value.as_object_mut().unwrap().remove("conclusion");
        let err = parse_reading(&value.to_string()).unwrap_err();
        assert!(matches!(err, GenerationError::Schema(_)));
        assert!(err.to_string().contains("conclusion"));
    }

    #[test]
    fn empty_section_body_is_rejected() {
        let mut value = valid_reading_json();
        value["present"]["body"] = json!("   ");
        let err = parse_reading(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("present.body"));
    }

    #[test]
    fn unparseable_text_is_a_schema_error() {
        let err = parse_reading("the spirits are silent").unwrap_err();
        assert!(matches!(err, GenerationError::Schema(_)));
    }

    #[test]
    fn schema_errors_flatten_into_a_failure_result() {
        let err = parse_reading("{}").unwrap_err();
        let result = ReadingResult::from(err);
        match result {
            ReadingResult::Failure { message } => assert!(!message.is_empty()),
            ReadingResult::Success(_) => panic!("expected a failure result"),
        }
    }

    #[test]
    fn envelope_text_extraction() {
        let envelope: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"a\":1}" } ] } }
            ]
        }))
        .unwrap();
        assert_eq!(envelope.first_text().unwrap(), "{\"a\":1}");

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.first_text().is_none());
    }
}
