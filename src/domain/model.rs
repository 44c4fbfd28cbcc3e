use crate::utils::error::{InterpretError, Result};
use serde::{Deserialize, Serialize};

/// Question used when the caller did not ask anything specific.
pub const DEFAULT_QUESTION: &str = "general guidance";

/// One drawn card: a name plus the keywords it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub name: String,
    pub keywords: String,
}

impl Card {
    pub fn new(name: impl Into<String>, keywords: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InterpretError::validation("Card name cannot be empty"));
        }
        Ok(Self {
            name,
            keywords: keywords.into(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Past,
    Present,
    Future,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Past, Position::Present, Position::Future];

    /// Field name in the request body.
    pub fn key(self) -> &'static str {
        match self {
            Position::Past => "past",
            Position::Present => "present",
            Position::Future => "future",
        }
    }

    /// Section heading used in the rendered interpretation.
    pub fn heading(self) -> &'static str {
        match self {
            Position::Past => "Le Passé",
            Position::Present => "Le Présent",
            Position::Future => "Le Futur",
        }
    }
}

/// A validated three-card draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spread {
    pub past: Card,
    pub present: Card,
    pub future: Card,
    pub question: String,
}

impl Spread {
    pub fn new(past: Card, present: Card, future: Card, question: Option<String>) -> Self {
        let question = question
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .unwrap_or_else(|| DEFAULT_QUESTION.to_string());

        Self {
            past,
            present,
            future,
            question,
        }
    }

    pub fn card(&self, position: Position) -> &Card {
        match position {
            Position::Past => &self.past,
            Position::Present => &self.present,
            Position::Future => &self.future,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawKeywords {
    Text(String),
    List(Vec<String>),
}

impl RawKeywords {
    fn into_text(self) -> String {
        match self {
            RawKeywords::Text(text) => text,
            RawKeywords::List(items) => items.join(", "),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
    pub name: Option<String>,
    pub keywords: Option<RawKeywords>,
}

/// Inbound request body, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadRequest {
    pub past: Option<RawCard>,
    pub present: Option<RawCard>,
    pub future: Option<RawCard>,
    pub question: Option<String>,
}

impl SpreadRequest {
    pub fn from_value(body: &serde_json::Value) -> Result<Self> {
        if !body.is_object() {
            return Err(InterpretError::validation(
                "Request body must be a JSON object",
            ));
        }

        serde_json::from_value(body.clone())
            .map_err(|e| InterpretError::validation(format!("Invalid spread data: {}", e)))
    }

    /// Checks that every position holds a usable card and builds the spread.
    pub fn into_spread(self) -> Result<Spread> {
        let past = Self::take_card(Position::Past, self.past)?;
        let present = Self::take_card(Position::Present, self.present)?;
        let future = Self::take_card(Position::Future, self.future)?;

        Ok(Spread::new(past, present, future, self.question))
    }

    fn take_card(position: Position, raw: Option<RawCard>) -> Result<Card> {
        let raw = raw.ok_or_else(|| {
            InterpretError::validation(format!(
                "Missing card data: `{}` is required",
                position.key()
            ))
        })?;

        let name = raw.name.unwrap_or_default();
        let keywords = raw.keywords.map(RawKeywords::into_text).unwrap_or_default();

        Card::new(name, keywords).map_err(|_| {
            InterpretError::validation(format!(
                "Invalid card data: `{}` needs a non-empty name",
                position.key()
            ))
        })
    }
}

/// Where an interpretation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "mistral")]
    Remote,
    #[serde(rename = "local")]
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretationResult {
    pub html: String,
    pub source: Source,
}

/// Success envelope returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretationResponse {
    pub interpretation: String,
    pub source: Source,
}

impl From<InterpretationResult> for InterpretationResponse {
    fn from(result: InterpretationResult) -> Self {
        Self {
            interpretation: result.html,
            source: result.source,
        }
    }
}

/// Error envelope; `details` is only filled for unexpected faults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
