//! Response shapes produced by the document summarization service.
//!
//! Both shapes are validated at the network boundary, right after
//! deserialization, so calling code only ever sees summaries that satisfy the
//! length and format bounds below.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Minimal summary shape: an optional model-assigned id plus the summary text.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SummarySimple {
    /// Identifier the model attaches to its own output; callers ignore it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Summary of the document.
    #[validate(length(
        min = 10,
        max = 6000,
        message = "Summary must be between 10 and 6000 characters long"
    ))]
    pub summary: String,
}

/// Richer summary shape with document metadata, stakeholders, and dates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBrief {
    /// The ID or number of the document/request; empty when the model could
    /// not find one.
    #[validate(custom(function = validate_document_id))]
    pub document_id: String,
    /// The type of request, when the model could classify it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    /// Summary of the request.
    #[validate(length(
        min = 10,
        max = 6000,
        message = "Summary must be between 10 and 6000 characters long"
    ))]
    pub short_summary: String,
    /// Key stakeholders named in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub key_stakeholders: Option<Vec<Stakeholder>>,
    /// Important dates mentioned in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub important_dates: Option<Vec<ImportantDate>>,
}

/// A person or party referenced by the summarized document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholder {
    /// Name of the stakeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Role of the stakeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Email of the stakeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Stakeholder email must be a valid address"))]
    pub email: Option<String>,
    /// Phone number of the stakeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A date the summarized document calls out.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImportantDate {
    /// Date of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Description of the date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// An empty document id is allowed; anything else must land in 2..=64 chars.
fn validate_document_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let length = value.chars().count();
    if (2..=64).contains(&length) {
        Ok(())
    } else {
        let mut error = ValidationError::new("length");
        error.message = Some("The document id must be empty or between 2 and 64 characters".into());
        Err(error)
    }
}
