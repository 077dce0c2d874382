//! Payload model for the upstream transcription service callbacks.
//!
//! Events are ephemeral: they carry no identity beyond arrival order and are
//! never persisted. A payload may contain a transcript URL, a serialized
//! chapter summary, both, or neither.

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub file: Option<FilePayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    #[serde(default)]
    pub transcript_url: Option<String>,
    #[serde(default)]
    pub system_prompt_responses: Option<SystemPromptResponses>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SystemPromptResponses {
    #[serde(rename = "CHAPTERS", default)]
    pub chapters: Option<PromptResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    #[serde(default)]
    pub response_text: Option<String>,
}

impl WebhookEvent {
    pub fn transcript_url(&self) -> Option<&str> {
        self.file.as_ref()?.transcript_url.as_deref()
    }

    /// The raw CHAPTERS summary block, itself serialized JSON.
    pub fn summary_text(&self) -> Option<&str> {
        self.file
            .as_ref()?
            .system_prompt_responses
            .as_ref()?
            .chapters
            .as_ref()?
            .response_text
            .as_deref()
    }
}

/// Parsed form of the CHAPTERS summary block.
#[derive(Debug, Deserialize)]
pub struct SummaryBlock {
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub notes: String,
}

impl SummaryBlock {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse summary block")
    }

    /// Renders the chapters into the plain-text digest stored as the result.
    pub fn digest(&self) -> String {
        let mut out = String::new();
        for (i, chapter) in self.chapters.iter().enumerate() {
            out.push_str(&format!("Chapter {}: {}\n", i + 1, chapter.title));
            out.push_str(&format!("{} -> {}\n", chapter.start, chapter.end));
            out.push_str(&chapter.notes);
            out.push_str("\n\n");
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_with_transcript_url() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"file": {"transcriptUrl": "http://x/t.json"}}"#,
        )
        .unwrap();

        assert_eq!(event.transcript_url(), Some("http://x/t.json"));
        assert_eq!(event.summary_text(), None);
    }

    #[test]
    fn test_event_with_summary_block() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{
                "file": {
                    "systemPromptResponses": {
                        "CHAPTERS": {"responseText": "{\"chapters\": []}"}
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(event.summary_text(), Some("{\"chapters\": []}"));
        assert_eq!(event.transcript_url(), None);
    }

    #[test]
    fn test_empty_event() {
        let event: WebhookEvent = serde_json::from_str("{}").unwrap();
        assert!(event.file.is_none());
        assert_eq!(event.transcript_url(), None);
        assert_eq!(event.summary_text(), None);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"file": {"transcriptUrl": "http://x/t.json", "name": "rec.webm"}, "team": "abc"}"#,
        )
        .unwrap();

        assert_eq!(event.transcript_url(), Some("http://x/t.json"));
    }

    #[test]
    fn test_summary_digest_format() {
        let block = SummaryBlock::parse(
            r#"{
                "chapters": [
                    {"title": "Intro", "start": "00:00", "end": "01:30", "notes": "Welcome round."},
                    {"title": "Roadmap", "start": "01:30", "end": "10:00", "notes": "Q3 planning."}
                ]
            }"#,
        )
        .unwrap();

        let digest = block.digest();
        assert_eq!(
            digest,
            "Chapter 1: Intro\n00:00 -> 01:30\nWelcome round.\n\nChapter 2: Roadmap\n01:30 -> 10:00\nQ3 planning."
        );
    }

    #[test]
    fn test_malformed_summary_block_is_an_error() {
        assert!(SummaryBlock::parse("not json").is_err());
        assert!(SummaryBlock::parse(r#"{"chapters": "nope"}"#).is_err());
    }
}
