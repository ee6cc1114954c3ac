//! crates/tarot_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or rendering format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported UI locale. Determines which catalog text is selected for
/// drawn cards and which language the generation service answers in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Th,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Th => "th",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of catalog text carried in every supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub th: String,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Th => &self.th,
        }
    }
}

/// One immutable record in the 78-card catalog.
///
/// Loaded once at startup and shared read-only by every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: String,
    pub name: LocalizedText,
    pub meaning_up: LocalizedText,
    pub meaning_rev: LocalizedText,
    pub keywords: Vec<String>,
    pub image: String,
}

/// The slice of card text embedded in a reading request, already localized
/// for the requesting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub card_name: String,
    pub card_meaning_up: String,
    pub card_meaning_rev: String,
}

impl CardSnapshot {
    pub fn from_card(card: &CardDefinition, locale: Locale) -> Self {
        Self {
            card_name: card.name.get(locale).to_string(),
            card_meaning_up: card.meaning_up.get(locale).to_string(),
            card_meaning_rev: card.meaning_rev.get(locale).to_string(),
        }
    }
}

/// The localized display labels for the four parts of a three-card spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadLabels {
    pub past: String,
    pub present: String,
    pub future: String,
    pub conclusion: String,
}

/// Whether a Wednesday-born user was born during the day or at night.
/// Significant in Thai astrology; only meaningful for a Wednesday birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WednesdayShift {
    Day,
    Night,
}

impl WednesdayShift {
    pub fn as_str(self) -> &'static str {
        match self {
            WednesdayShift::Day => "day",
            WednesdayShift::Night => "night",
        }
    }
}

/// Optional personal details used to deepen a reading. All fields are
/// validated by the caller's form layer; the core carries them as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub dob: NaiveDate,
    pub wednesday_shift: Option<WednesdayShift>,
}

/// The immutable, fully validated input for one reading generation.
/// Built once per submitted question and completed draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRequest {
    pub question: String,
    pub past_card: CardSnapshot,
    pub present_card: CardSnapshot,
    pub future_card: CardSnapshot,
    pub labels: SpreadLabels,
    pub user_info: Option<UserProfile>,
    pub locale: Locale,
    pub language_name: String,
}

/// One titled section of a generated reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingSection {
    pub title: String,
    pub body: String,
}

/// A complete, schema-validated reading returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub initial_summary: String,
    pub past: ReadingSection,
    pub present: ReadingSection,
    pub future: ReadingSection,
    pub conclusion: ReadingSection,
}
