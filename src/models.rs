use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntry {
    pub id: String,
    pub name: String,
    pub mood: String,
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub milestone: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

/// In-memory backend collections. Created empty at process start.
#[derive(Debug, Clone, Default)]
pub struct BackendData {
    pub tracking: Vec<TrackingEntry>,
    pub contacts: Vec<ContactMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suggestion {
    #[serde(rename = "tip")]
    Tip,
    #[serde(rename = "track")]
    Track,
    #[serde(rename = "faq:breastfeeding")]
    FaqBreastfeeding,
    #[serde(rename = "faq:sleep")]
    FaqSleep,
    #[serde(rename = "faq:postpartum")]
    FaqPostpartum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub reply: String,
    pub suggestions: Vec<Suggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub mood: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub tip: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FaqQuery {
    pub topic: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FaqResponse {
    pub topic: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sleep_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub milestone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackResponse {
    pub status: String,
    pub entry: TrackingEntry,
}

#[derive(Debug, Deserialize)]
pub struct TrackingQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackingResponse {
    pub entries: Vec<TrackingEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default, alias = "desc")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "id")]
    pub product_id: String,
    #[serde(rename = "qty", default = "min_quantity", deserialize_with = "clamped_quantity")]
    pub quantity: u8,
}

pub const MIN_QUANTITY: u8 = 1;
pub const MAX_QUANTITY: u8 = 99;

pub fn clamp_quantity(quantity: u32) -> u8 {
    quantity.clamp(u32::from(MIN_QUANTITY), u32::from(MAX_QUANTITY)) as u8
}

fn min_quantity() -> u8 {
    MIN_QUANTITY
}

/// Any number (or numeric string) clamped into the cart range; other values count as one.
fn clamped_quantity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(number_of(value)
        .map(|quantity| quantity.clamp(f64::from(MIN_QUANTITY), f64::from(MAX_QUANTITY)) as u8)
        .unwrap_or(MIN_QUANTITY))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: String,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub form_id: String,
    pub data: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub who: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Accepts a JSON number or a numeric string; anything else becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(number_of(value))
}

fn number_of(value: Option<serde_json::Value>) -> Option<f64> {
    match value {
        Some(serde_json::Value::Number(number)) => number.as_f64(),
        Some(serde_json::Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

/// Strings pass through, numbers and booleans are stringified, anything else is `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        Some(serde_json::Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}
