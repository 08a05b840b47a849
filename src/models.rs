//! Request payloads accepted by the export endpoint.
//!
//! Two JSON shapes are accepted for backward compatibility. Both are converted right
//! away into an [`ItineraryDocument`]; nothing past this module sees the raw payload.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::document::{ItineraryDocument, Section};
use crate::error::PayloadError;

const GENERATED_AT_FORMAT: &str = "%d %b %Y";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItineraryPayload {
    Structured(StructuredPayload),
    Legacy(LegacyPayload),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPayload {
    pub itinerary: StructuredItinerary,
    #[serde(default)]
    pub traveller_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub operator_name: Option<String>,
    #[serde(default)]
    pub operator_country: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredItinerary {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub destination: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub days_count: Option<u32>,
    pub travel_date: Option<String>,
    pub budget_range: Option<String>,
    pub days: Vec<String>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPayload {
    pub days: Vec<LegacyDay>,
    #[serde(default, alias = "itineraryFor")]
    pub customer_name: Option<String>,
    #[serde(default, alias = "customerEmail")]
    pub email: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub operator_name: Option<String>,
    #[serde(default)]
    pub operator_country: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyDay {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub day: Option<u32>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub locations: Vec<String>,
    pub bullets: Vec<String>,
    pub lodge: Option<String>,
    pub meals: Option<String>,
}

impl ItineraryPayload {
    /// Rejects bodies without any day list before trying either shape.
    pub fn from_json(value: Value) -> Result<Self, PayloadError> {
        let structured_days = value.get("itinerary").and_then(|i| i.get("days")).is_some_and(Value::is_array);
        let legacy_days = value.get("days").is_some_and(Value::is_array);
        if !structured_days && !legacy_days {
            return Err(PayloadError::MissingDays);
        }
        serde_json::from_value(value).map_err(|e| PayloadError::Malformed(e.to_string()))
    }

    pub fn into_document(self, generated_at: DateTime<Utc>) -> Result<ItineraryDocument, PayloadError> {
        let mut document = match self {
            Self::Structured(payload) => payload.into_document()?,
            Self::Legacy(payload) => payload.into_document()?,
        };
        document.generated_at = Some(generated_at.format(GENERATED_AT_FORMAT).to_string());
        Ok(document.sanitized())
    }
}

impl StructuredPayload {
    fn into_document(self) -> Result<ItineraryDocument, PayloadError> {
        let it = self.itinerary;
        if it.days.is_empty() {
            return Err(PayloadError::MissingDays);
        }

        let days_count = it.days_count.map(|n| if n == 1 { "1 day".to_string() } else { format!("{n} days") });
        let subtitle = [
            present(&it.destination),
            days_count.as_deref(),
            present(&it.travel_date),
            present(&it.budget_range),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" \u{00B7} ");

        let mut sections = Vec::with_capacity(it.days.len() + 3);
        if let Some(summary) = present(&it.summary) {
            sections.push(Section::new("Overview", summary));
        }
        sections.extend(
            it.days
                .iter()
                .enumerate()
                .map(|(i, body)| Section::new(format!("Day {}", i + 1), body.as_str())),
        );
        for (heading, items) in [("Included", &it.includes), ("Not included", &it.excludes)] {
            if items.iter().any(|item| !item.trim().is_empty()) {
                sections.push(Section::new(heading, "").with_bullets(items.iter().cloned()));
            }
        }

        Ok(ItineraryDocument {
            title: it.title.unwrap_or_default(),
            subtitle,
            customer_name: self.traveller_name,
            customer_email: self.email,
            operator_name: self.operator_name,
            operator_country: self.operator_country,
            contact: contact_line(&self.contact_phone, &self.contact_email),
            sections,
            ..Default::default()
        })
    }
}

impl LegacyPayload {
    fn into_document(self) -> Result<ItineraryDocument, PayloadError> {
        if self.days.is_empty() {
            return Err(PayloadError::MissingDays);
        }
        let sections = self
            .days
            .iter()
            .enumerate()
            .map(|(i, day)| day.to_section(i + 1))
            .collect();

        Ok(ItineraryDocument {
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle.unwrap_or_default(),
            customer_name: self.customer_name,
            customer_email: self.email,
            operator_name: self.operator_name,
            operator_country: self.operator_country,
            contact: contact_line(&self.contact_phone, &self.contact_email),
            sections,
            ..Default::default()
        })
    }
}

impl LegacyDay {
    /// One section per day: a metadata line, then each bullet as its own paragraph.
    fn to_section(&self, position: usize) -> Section {
        let number = self.day.map(|d| d as usize).unwrap_or(position);
        let heading = match present(&self.title) {
            Some(title) => format!("Day {number} - {title}"),
            None => format!("Day {number}"),
        };

        let locations: Vec<&str> = self.locations.iter().map(|l| l.trim()).filter(|l| !l.is_empty()).collect();
        let mut meta = Vec::new();
        if let Some(date) = present(&self.date) {
            meta.push(format!("Date: {date}"));
        }
        if !locations.is_empty() {
            meta.push(format!("Locations: {}", locations.join(", ")));
        }
        if let Some(lodge) = present(&self.lodge) {
            meta.push(format!("Lodge: {lodge}"));
        }
        if let Some(meals) = present(&self.meals) {
            meta.push(format!("Meals: {meals}"));
        }

        let mut paragraphs = Vec::with_capacity(self.bullets.len() + 1);
        if !meta.is_empty() {
            paragraphs.push(meta.join(" | "));
        }
        paragraphs.extend(
            self.bullets
                .iter()
                .map(|b| b.trim())
                .filter(|b| !b.is_empty())
                .map(|b| format!("- {b}")),
        );
        Section::new(heading, paragraphs.join("\n\n"))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn contact_line(phone: &Option<String>, email: &Option<String>) -> Option<String> {
    let parts: Vec<&str> = [present(phone), present(email)].into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}
