//! The driver record and its field types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use frota_cpf::Cpf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::DriverId;

/// Employment status of a driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    #[default]
    Ativo,
    Afastado,
    Ferias,
    Inativo,
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DriverStatus::Ativo => "ATIVO",
            DriverStatus::Afastado => "AFASTADO",
            DriverStatus::Ferias => "FERIAS",
            DriverStatus::Inativo => "INATIVO",
        };
        f.write_str(s)
    }
}

/// The CNH category was not `E`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("only CNH category E is allowed, got '{0}'")]
pub struct CnhCategoryError(pub String);

/// CNH (driver's license) category.
///
/// The fleet operates articulated vehicles only, so category `E` is the
/// single category the registry accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CnhCategory {
    E,
}

impl CnhCategory {
    /// Parses a category from form input; anything but `E` is rejected.
    pub fn parse(s: &str) -> Result<Self, CnhCategoryError> {
        match s.trim() {
            "E" => Ok(CnhCategory::E),
            other => Err(CnhCategoryError(other.to_string())),
        }
    }
}

impl fmt::Display for CnhCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("E")
    }
}

impl FromStr for CnhCategory {
    type Err = CnhCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A registered driver.
///
/// The CPF is held in canonical form only (11 digits, no punctuation); the
/// punctuated form is derived on display via [`Cpf::formatted`]. Contact
/// and address fields are free-form; the registry does not validate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub full_name: String,
    pub cpf: Cpf,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub cnh_number: Option<String>,
    #[serde(default)]
    pub cnh_category: Option<CnhCategory>,
    #[serde(default)]
    pub admission_date: Option<NaiveDate>,
    /// Monthly salary in centavos. Stored as integer cents so arithmetic
    /// stays exact; divide by 100 at the display layer.
    #[serde(default)]
    pub salary_cents: Option<i64>,
    pub status: DriverStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// Creates a new active driver with a fresh ID and current timestamps.
    /// Optional fields start empty.
    #[must_use]
    pub fn new(full_name: impl Into<String>, cpf: Cpf, birth_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: DriverId::new(),
            full_name: full_name.into(),
            cpf,
            birth_date,
            email: None,
            phone: None,
            city: None,
            state: None,
            cnh_number: None,
            cnh_category: None,
            admission_date: None,
            salary_cents: None,
            status: DriverStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Age in whole years on the given date.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            age -= 1;
        }
        age
    }

    /// Age in whole years today (UTC).
    #[must_use]
    pub fn age(&self) -> i32 {
        self.age_on(Utc::now().date_naive())
    }
}
