//! Lead records.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An attorney or firm lead as produced by the ingestion layer.
///
/// Every field is optional: sources rarely agree on what they publish, and a
/// missing value is modelled as `None` rather than an empty string. Identity for
/// deduplication is derived only from `firm_name`, `attorney_name`,
/// `attorney_email`, `attorney_phone` and `firm_website`.
///
/// Fields owned by other components (segment, region, status, timestamps and
/// the like) are kept verbatim in [`Lead::extra`] so that a record survives a
/// read → dedupe → write cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Storage identifier assigned by the persistence layer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Firm name as published by the source.
    #[serde(default, alias = "firm", skip_serializing_if = "Option::is_none")]
    pub firm_name: Option<String>,

    /// Firm website URL.
    #[serde(default, alias = "website", skip_serializing_if = "Option::is_none")]
    pub firm_website: Option<String>,

    /// Attorney full name, possibly with honorifics and suffixes.
    #[serde(default, alias = "attorney", skip_serializing_if = "Option::is_none")]
    pub attorney_name: Option<String>,

    /// Attorney title ("Partner", "Associate", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attorney_title: Option<String>,

    /// Attorney email address.
    #[serde(default, alias = "email", skip_serializing_if = "Option::is_none")]
    pub attorney_email: Option<String>,

    /// Attorney phone number in any rendering.
    #[serde(default, alias = "phone", skip_serializing_if = "Option::is_none")]
    pub attorney_phone: Option<String>,

    /// Practice areas, comma-separated.
    #[serde(
        default,
        deserialize_with = "deserialize_practice_areas",
        skip_serializing_if = "Option::is_none"
    )]
    pub practice_areas: Option<String>,

    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or province.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Postal code.
    #[serde(default, alias = "zip", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    /// URL the lead was collected from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Human-readable source name ("DC Bar", "Google Maps", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    /// Source confidence in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Fields owned by other components, carried through untouched.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Lead {
    /// Creates an empty lead.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the firm name.
    #[must_use]
    pub fn with_firm_name(mut self, firm_name: impl Into<String>) -> Self {
        self.firm_name = Some(firm_name.into());
        self
    }

    /// Sets the attorney name.
    #[must_use]
    pub fn with_attorney_name(mut self, attorney_name: impl Into<String>) -> Self {
        self.attorney_name = Some(attorney_name.into());
        self
    }

    /// Sets the attorney email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.attorney_email = Some(email.into());
        self
    }

    /// Sets the attorney phone.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.attorney_phone = Some(phone.into());
        self
    }

    /// Sets the firm website.
    #[must_use]
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.firm_website = Some(website.into());
        self
    }

    /// Sets the practice areas from a comma-separated string.
    #[must_use]
    pub fn with_practice_areas(mut self, practice_areas: impl Into<String>) -> Self {
        self.practice_areas = Some(practice_areas.into());
        self
    }

    /// Sets the city and state.
    #[must_use]
    pub fn with_location(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }

    /// Returns a human-readable label for logs and reports.
    ///
    /// # Example
    ///
    /// ```rust
    /// use leadmatch::Lead;
    ///
    /// let lead = Lead::new().with_firm_name("Smith Law").with_attorney_name("John Smith");
    /// assert_eq!(lead.display_name(), "John Smith at Smith Law");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        let firm = non_blank(self.firm_name.as_deref());
        match (non_blank(self.attorney_name.as_deref()), firm) {
            (Some(attorney), Some(firm)) => format!("{attorney} at {firm}"),
            (Some(attorney), None) => attorney.to_string(),
            (None, Some(firm)) => firm.to_string(),
            (None, None) => "(unnamed lead)".to_string(),
        }
    }

    /// Returns the practice areas as a list, trimmed, with empty entries dropped.
    #[must_use]
    pub fn practice_areas_list(&self) -> Vec<String> {
        self.practice_areas
            .as_deref()
            .map(|areas| {
                areas
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl AsRef<Self> for Lead {
    fn as_ref(&self) -> &Self {
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts practice areas either as a comma-separated string or as a list.
fn deserialize_practice_areas<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PracticeAreas {
        Joined(String),
        List(Vec<String>),
    }

    let value = Option::<PracticeAreas>::deserialize(deserializer)?;
    Ok(value.and_then(|areas| {
        let joined = match areas {
            PracticeAreas::Joined(s) => s,
            PracticeAreas::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        };
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }))
}
