// src/services/ai_parse.rs
// DOCUMENTATION: Strict parsing of generative-AI output
// PURPOSE: Turn free text into validated items, or an explicit failure that
// selects the fallback branch

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Outcome of parsing a generated answer
#[derive(Debug, Clone, PartialEq)]
pub enum AiParse<T> {
    /// At least one item survived validation
    Parsed(Vec<T>),
    /// Nothing usable; carries the reason for logging
    ParseFailure(String),
}

/// Personalized text for one searched place
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct PersonalizedReason {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub reason: String,

    #[serde(default)]
    pub menu: Option<String>,
}

/// Restaurant proposed by the generative backend without a prior search
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AiRestaurant {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1))]
    pub reason: String,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub price: Option<String>,

    /// Number or preformatted string
    #[serde(default)]
    pub rating: Option<Value>,

    #[serde(default)]
    pub food_type: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Outermost `[...]` span: first '[' through last ']'
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse the first JSON array in `text`, keeping only items that
/// deserialize and pass validation
pub fn parse_ai_array<T>(text: &str) -> AiParse<T>
where
    T: DeserializeOwned + Validate,
{
    let Some(raw) = extract_json_array(text) else {
        return AiParse::ParseFailure("no JSON array in response".to_string());
    };

    let values: Vec<Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => return AiParse::ParseFailure(format!("invalid JSON array: {}", e)),
    };

    let total = values.len();
    let items: Vec<T> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<T>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::debug!("Dropping malformed AI item: {}", e);
                None
            }
        })
        .filter(|item| match item.validate() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Dropping invalid AI item: {}", e);
                false
            }
        })
        .collect();

    if items.is_empty() {
        AiParse::ParseFailure(format!("none of {} items were usable", total))
    } else {
        AiParse::Parsed(items)
    }
}
