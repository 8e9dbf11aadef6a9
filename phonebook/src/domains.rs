use std::{fmt, str::FromStr};

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

// 2 or 3 leading digits, a hyphen, then the rest of the number.
static NUMBER_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2,3}-\d+$").unwrap());

/// Store-assigned identifier. Inbound path segments must go through
/// [`FromStr`] so an unparsable id is reported as such instead of being
/// mistaken for a missing record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Deserialize, serde::Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    pub fn assign() -> Self {
        Self(Uuid::now_v7())
    }
}

impl FromStr for PersonId {
    type Err = MalformedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self).map_err(|_| MalformedId)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("malformatted id")]
pub struct MalformedId;

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, sqlx::FromRow)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub number: String,
}

/// Candidate person as posted by a client. Both fields are optional at the
/// serde level so that presence checks produce the phonebook's own error
/// messages instead of a deserialization failure.
#[derive(Debug, Default, serde::Deserialize)]
pub struct NewPerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

impl NewPerson {
    /// Validates in order, short-circuiting on the first failure, and
    /// assigns a fresh id on success.
    pub fn try_into_person(self) -> Result<Person> {
        let name = self.name.unwrap_or_default();
        let number = self.number.unwrap_or_default();

        anyhow::ensure!(
            !name.is_empty() && !number.is_empty(),
            "name or number missing"
        );
        anyhow::ensure!(name.len() >= 3, "name must be at least 3 characters long");
        validate_number(&number)?;

        Ok(Person {
            id: PersonId::assign(),
            name,
            number,
        })
    }
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct NumberChange {
    #[serde(default)]
    pub number: Option<String>,
}

pub fn validate_number(number: &str) -> Result<()> {
    anyhow::ensure!(NUMBER_FORMAT.is_match(number), "invalid number format");
    Ok(())
}
