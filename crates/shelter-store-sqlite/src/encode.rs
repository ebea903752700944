//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that text order
//! matches time order. UUIDs are stored as hyphenated lowercase strings.
//! Booleans and ages use native SQLite integers.

use chrono::{DateTime, SecondsFormat, Utc};
use shelter_core::person::{BloodType, Person};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── BloodType ───────────────────────────────────────────────────────────────

pub fn encode_blood_type(bt: BloodType) -> &'static str { bt.into() }

pub fn decode_blood_type(s: &str) -> Result<BloodType> {
  s.parse()
    .map_err(|_| Error::UnknownBloodType(s.to_owned()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawPerson::from_row`].
pub const PERSON_COLUMNS: &str = "person_id, name, age, blood_type, skills, \
                                  is_injured, is_infected, can_work, \
                                  observation, created_at";

/// Raw values read directly from a `people` row.
pub struct RawPerson {
  pub person_id:   String,
  pub name:        String,
  pub age:         i32,
  pub blood_type:  String,
  pub skills:      String,
  pub is_injured:  bool,
  pub is_infected: bool,
  pub can_work:    bool,
  pub observation: Option<String>,
  pub created_at:  String,
}

impl RawPerson {
  /// Read a row selected with [`PERSON_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:   row.get(0)?,
      name:        row.get(1)?,
      age:         row.get(2)?,
      blood_type:  row.get(3)?,
      skills:      row.get(4)?,
      is_injured:  row.get(5)?,
      is_infected: row.get(6)?,
      can_work:    row.get(7)?,
      observation: row.get(8)?,
      created_at:  row.get(9)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:          decode_uuid(&self.person_id)?,
      name:        self.name,
      age:         self.age,
      blood_type:  decode_blood_type(&self.blood_type)?,
      skills:      self.skills,
      is_injured:  self.is_injured,
      is_infected: self.is_infected,
      can_work:    self.can_work,
      observation: self.observation,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn timestamps_sort_as_text() {
    let early = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let later = early + chrono::Duration::nanoseconds(1_500);
    let (a, b) = (encode_dt(early), encode_dt(later));
    assert_eq!(a.len(), b.len());
    assert!(a < b);
    assert_eq!(decode_dt(&b).unwrap(), later);
  }

  #[test]
  fn blood_type_column_roundtrip() {
    assert_eq!(encode_blood_type(BloodType::AbNegative), "AB-");
    assert_eq!(decode_blood_type("O+").unwrap(), BloodType::OPositive);
    assert!(matches!(
      decode_blood_type("Z"),
      Err(Error::UnknownBloodType(s)) if s == "Z"
    ));
  }
}
