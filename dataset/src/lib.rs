//! Employee promotion dataset: CSV ingestion and value normalization.
//!
//! The table is loaded once at startup and treated as immutable for the
//! lifetime of the process. Coded values (`0`/`1` flags, `f`/`m` gender)
//! are mapped to their closed label sets during deserialization, so the
//! rest of the system only ever sees normalized labels.

use std::{fmt, io, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("dataset row {row}: {source}")]
    Decode {
        row: u64,
        #[source]
        source: csv::Error,
    },
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Binary outcome flag normalized from `0`/`1` source codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Flag {
    Yes,
    No,
}

impl Flag {
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Yes => "Yes",
            Flag::No => "No",
        }
    }

    pub fn is_yes(self) -> bool {
        matches!(self, Flag::Yes)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(Flag::No),
            1 => Ok(Flag::Yes),
            other => Err(serde::de::Error::custom(format!(
                "invalid flag code {other}, expected 0 or 1"
            ))),
        }
    }
}

/// Gender normalized from the `f`/`m` source codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        match code.as_str() {
            "f" => Ok(Gender::Female),
            "m" => Ok(Gender::Male),
            other => Err(serde::de::Error::custom(format!(
                "invalid gender code {other:?}, expected \"f\" or \"m\""
            ))),
        }
    }
}

/// One employee row, already normalized. Extra source columns are ignored.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Employee {
    #[serde(rename = "employee_id")]
    pub id: u32,
    pub department: String,
    pub region: String,
    pub education: String,
    pub gender: Gender,
    pub recruitment_channel: String,
    pub age: u32,
    pub date_of_birth: NaiveDate,
    pub join_date: NaiveDate,
    pub length_of_service: u32,
    #[serde(rename = "KPIs_met >80%")]
    pub kpi_met: Flag,
    #[serde(rename = "awards_won?")]
    pub awards_won: Flag,
    #[serde(rename = "is_promoted")]
    pub promoted: Flag,
}

/// Immutable in-memory employee table. Load-once, read-many.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<Employee>,
}

impl Dataset {
    pub fn from_records(records: Vec<Employee>) -> Self {
        Self { records }
    }

    /// Read and normalize a CSV file. Any malformed row aborts the load;
    /// there is no partial recovery.
    pub fn from_csv_path(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader(reader: impl io::Read) -> DatasetResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<Employee>().enumerate() {
            // Header occupies line 1, so data rows start at line 2.
            let row = row.map_err(|source| DatasetError::Decode {
                row: index as u64 + 2,
                source,
            })?;
            records.push(row);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.records.iter()
    }
}
