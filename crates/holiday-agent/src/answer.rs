//! Typed forms of the JSON answers the prompts ask for.
//!
//! The model is only asked for these shapes; [`parse_answer`] is where they
//! are enforced.

use crate::error::{AgentError, Result};
use crate::normalize::normalize;
use chrono::NaiveDate;
use holiday_tools::HolidayListing;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub trait Answer: DeserializeOwned + Serialize {
    /// Name used in validation errors.
    const KIND: &'static str;

    /// Checks beyond the JSON shape.
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HolidayEntry {
    pub date: String,
    pub name: String,
}

impl HolidayEntry {
    pub fn new(date: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
        }
    }
}

/// `{"Result": [{"date": "YYYY-MM-DD", "name": "..."}]}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HolidayListAnswer {
    #[serde(rename = "Result")]
    pub result: Vec<HolidayEntry>,
}

impl HolidayListAnswer {
    pub fn contains(&self, entry: &HolidayEntry) -> bool {
        self.result.iter().any(|e| e == entry)
    }
}

impl Answer for HolidayListAnswer {
    const KIND: &'static str = "HolidayListAnswer";

    fn validate(&self) -> std::result::Result<(), String> {
        for entry in &self.result {
            NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d")
                .map_err(|e| format!("date {:?} of {:?}: {}", entry.date, entry.name, e))?;
        }
        Ok(())
    }
}

impl From<&HolidayListing> for HolidayListAnswer {
    fn from(listing: &HolidayListing) -> Self {
        Self {
            result: listing
                .holidays
                .iter()
                .map(|h| HolidayEntry::new(&h.iso_date, &h.name))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddDecision {
    pub add: bool,
    pub reason: String,
}

/// `{"Result": {"add": bool, "reason": "..."}}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddHolidayAnswer {
    #[serde(rename = "Result")]
    pub result: AddDecision,
}

impl Answer for AddHolidayAnswer {
    const KIND: &'static str = "AddHolidayAnswer";
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Score {
    pub score: i64,
}

/// `{"Result": {"score": int}}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreAnswer {
    #[serde(rename = "Result")]
    pub result: Score,
}

impl Answer for ScoreAnswer {
    const KIND: &'static str = "ScoreAnswer";
}

/// Normalizes `raw` and parses it strictly as `T`.
pub fn parse_answer<T: Answer>(raw: &str) -> Result<T> {
    let text = normalize(raw);
    let answer: T = serde_json::from_str(text)
        .map_err(|e| AgentError::invalid_answer(T::KIND, e.to_string(), raw))?;
    answer
        .validate()
        .map_err(|reason| AgentError::invalid_answer(T::KIND, reason, raw))?;
    Ok(answer)
}

/// Whether `candidate` should be added to `listing`: only when no entry has
/// the same date and name.
pub fn decide_addition(listing: &HolidayListAnswer, candidate: &HolidayEntry) -> AddHolidayAnswer {
    let result = if listing.contains(candidate) {
        AddDecision {
            add: false,
            reason: format!(
                "{} ({}) is already in the holiday list.",
                candidate.name, candidate.date
            ),
        }
    } else {
        AddDecision {
            add: true,
            reason: format!(
                "{} ({}) is not in the holiday list yet.",
                candidate.name, candidate.date
            ),
        }
    };
    AddHolidayAnswer { result }
}
