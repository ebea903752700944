//! Person types: the one entity in the roster.
//!
//! A [`Person`] is the stored document. [`NewPerson`] is what a caller may
//! supply on create; [`PersonPatch`] is a partial update. Neither input type
//! can carry `id` or `created_at`: both are assigned server-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Result, validate};

// ─── Blood type ──────────────────────────────────────────────────────────────

/// ABO/Rh blood group. Serialised as its conventional label (`"AB-"`).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum BloodType {
  #[default]
  #[serde(rename = "A+")]
  #[strum(serialize = "A+")]
  APositive,
  #[serde(rename = "A-")]
  #[strum(serialize = "A-")]
  ANegative,
  #[serde(rename = "B+")]
  #[strum(serialize = "B+")]
  BPositive,
  #[serde(rename = "B-")]
  #[strum(serialize = "B-")]
  BNegative,
  #[serde(rename = "O+")]
  #[strum(serialize = "O+")]
  OPositive,
  #[serde(rename = "O-")]
  #[strum(serialize = "O-")]
  ONegative,
  #[serde(rename = "AB+")]
  #[strum(serialize = "AB+")]
  AbPositive,
  #[serde(rename = "AB-")]
  #[strum(serialize = "AB-")]
  AbNegative,
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A stored roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  /// Store-assigned; never changes.
  pub id:          Uuid,
  pub name:        String,
  pub age:         i32,
  pub blood_type:  BloodType,
  pub skills:      String,
  pub is_injured:  bool,
  pub is_infected: bool,
  pub can_work:    bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub observation: Option<String>,
  /// Stamped once by the API layer on create; never changes.
  pub created_at:  DateTime<Utc>,
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::PersonStore::insert_person`].
///
/// `name`, `age` and `skills` must be present in the JSON body; everything
/// else falls back to the roster defaults. Unknown keys (a client-sent `id`
/// or `createdAt` included) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
  pub name:        String,
  #[serde(deserialize_with = "whole_number")]
  pub age:         i32,
  #[serde(default)]
  pub blood_type:  BloodType,
  pub skills:      String,
  #[serde(default)]
  pub is_injured:  bool,
  #[serde(default)]
  pub is_infected: bool,
  #[serde(default)]
  pub can_work:    bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub observation: Option<String>,
}

impl NewPerson {
  /// Convenience constructor with all optional fields set to their defaults.
  pub fn new(name: impl Into<String>, age: i32, skills: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      age,
      blood_type: BloodType::default(),
      skills: skills.into(),
      is_injured: false,
      is_infected: false,
      can_work: false,
      observation: None,
    }
  }

  /// Check the required-field and length rules.
  pub fn validate(&self) -> Result<()> {
    validate::required_text("name", &self.name)?;
    validate::required_text("skills", &self.skills)?;
    validate::observation(self.observation.as_deref())
  }

  /// Materialise the stored document once the store has picked an id.
  pub fn into_person(self, id: Uuid, created_at: DateTime<Utc>) -> Person {
    Person {
      id,
      name: self.name,
      age: self.age,
      blood_type: self.blood_type,
      skills: self.skills,
      is_injured: self.is_injured,
      is_infected: self.is_infected,
      can_work: self.can_work,
      observation: self.observation,
      created_at,
    }
  }
}

// ─── PersonPatch ─────────────────────────────────────────────────────────────

/// A partial update. Every `Some` field overwrites the stored value; every
/// `None` field is left alone. The merge itself is performed by the store.
///
/// A JSON `null` on a required field is a deserialization error. On
/// `observation` it is `Some(None)` and clears the stored text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPatch {
  #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
  pub name:        Option<String>,
  #[serde(
    default,
    deserialize_with = "non_null_whole_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub age:         Option<i32>,
  #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
  pub blood_type:  Option<BloodType>,
  #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
  pub skills:      Option<String>,
  #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
  pub is_injured:  Option<bool>,
  #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
  pub is_infected: Option<bool>,
  #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
  pub can_work:    Option<bool>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
  pub observation: Option<Option<String>>,
}

impl PersonPatch {
  /// A patch that only sets `is_infected`.
  pub fn infected(is_infected: bool) -> Self {
    Self { is_infected: Some(is_infected), ..Self::default() }
  }

  /// Check the fields present in the patch.
  ///
  /// Stored records always satisfy the rules, so a patch that passes here
  /// yields a valid record once merged.
  pub fn validate(&self) -> Result<()> {
    if let Some(name) = &self.name {
      validate::required_text("name", name)?;
    }
    if let Some(skills) = &self.skills {
      validate::required_text("skills", skills)?;
    }
    validate::observation(self.observation.as_ref().and_then(Option::as_deref))
  }
}

// ─── Serde helpers ───────────────────────────────────────────────────────────

/// A present key whose value may not be `null`.
fn non_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer)?
    .map(Some)
    .ok_or_else(|| de::Error::custom("must not be null"))
}

/// A present key whose `null` means "clear".
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

/// Any JSON number with no fractional part, e.g. `30` or `30.0`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
  Int(i64),
  Float(f64),
}

impl Number {
  fn whole<E: de::Error>(self) -> std::result::Result<i32, E> {
    let n = match self {
      Number::Int(n) => n,
      Number::Float(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
      Number::Float(f) => {
        return Err(E::custom(format_args!("expected a whole number, got {f}")));
      }
    };
    i32::try_from(n).map_err(|_| E::custom(format_args!("{n} is out of range")))
  }
}

fn whole_number<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
  D: Deserializer<'de>,
{
  Number::deserialize(deserializer)?.whole()
}

fn non_null_whole_number<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
  D: Deserializer<'de>,
{
  non_null::<D, Number>(deserializer)?
    .map(Number::whole)
    .transpose()
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use chrono::TimeZone;
  use serde_json::json;
  use strum::IntoEnumIterator;

  use super::*;
  use crate::Error;

  fn alice() -> Person {
    NewPerson::new("Alice", 30, "medic").into_person(
      Uuid::new_v4(),
      Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
    )
  }

  #[test]
  fn blood_type_labels_roundtrip() {
    let labels: Vec<&str> = BloodType::iter().map(Into::into).collect();
    assert_eq!(labels, ["A+", "A-", "B+", "B-", "O+", "O-", "AB+", "AB-"]);
    for bt in BloodType::iter() {
      assert_eq!(BloodType::from_str(bt.as_ref()).unwrap(), bt);
      let encoded = serde_json::to_value(bt).unwrap();
      assert_eq!(encoded, json!(bt.to_string()));
    }
  }

  #[test]
  fn unknown_blood_type_is_rejected() {
    let err = serde_json::from_value::<BloodType>(json!("C+"));
    assert!(err.is_err());
  }

  #[test]
  fn new_person_defaults_optional_fields() {
    let input: NewPerson = serde_json::from_value(json!({
      "name": "Bob",
      "age": 41,
      "skills": "carpentry",
    }))
    .unwrap();
    assert_eq!(input.blood_type, BloodType::APositive);
    assert!(!input.is_injured && !input.is_infected && !input.can_work);
    assert_eq!(input.observation, None);
  }

  #[test]
  fn new_person_requires_name_age_and_skills() {
    for missing in ["name", "age", "skills"] {
      let mut body = json!({ "name": "Bob", "age": 41, "skills": "carpentry" });
      body.as_object_mut().unwrap().remove(missing);
      assert!(
        serde_json::from_value::<NewPerson>(body).is_err(),
        "accepted body without {missing}"
      );
    }
  }

  #[test]
  fn new_person_ignores_client_id_and_created_at() {
    let input: NewPerson = serde_json::from_value(json!({
      "id": "not-even-a-uuid",
      "createdAt": "1999-01-01T00:00:00Z",
      "name": "Bob",
      "age": 41,
      "skills": "carpentry",
    }))
    .unwrap();
    assert_eq!(input, NewPerson::new("Bob", 41, "carpentry"));
  }

  #[test]
  fn new_person_validation() {
    assert!(NewPerson::new("Bob", 41, "carpentry").validate().is_ok());
    assert_eq!(
      NewPerson::new("  ", 41, "carpentry").validate(),
      Err(Error::Required("name"))
    );
    assert_eq!(
      NewPerson::new("Bob", 41, "").validate(),
      Err(Error::Required("skills"))
    );

    let mut long = NewPerson::new("Bob", 41, "carpentry");
    long.observation = Some("x".repeat(245));
    assert!(matches!(long.validate(), Err(Error::TooLong { .. })));
    long.observation = Some("x".repeat(244));
    assert!(long.validate().is_ok());
  }

  #[test]
  fn person_serialises_camel_case() {
    let p = alice();
    let v = serde_json::to_value(&p).unwrap();
    for key in [
      "id", "name", "age", "bloodType", "skills", "isInjured", "isInfected",
      "canWork", "createdAt",
    ] {
      assert!(v.get(key).is_some(), "missing {key}: {v}");
    }
    assert!(v.get("observation").is_none());
  }

  #[test]
  fn patch_drops_id_and_created_at() {
    let patch: PersonPatch = serde_json::from_value(json!({
      "id": Uuid::new_v4(),
      "createdAt": "1999-01-01T00:00:00Z",
      "age": 31,
    }))
    .unwrap();
    assert_eq!(patch, PersonPatch { age: Some(31), ..PersonPatch::default() });
  }

  #[test]
  fn age_accepts_whole_valued_numbers_only() {
    let body = |age: serde_json::Value| json!({ "name": "Bob", "age": age, "skills": "x" });

    let input: NewPerson = serde_json::from_value(body(json!(30.0))).unwrap();
    assert_eq!(input.age, 30);
    let input: NewPerson = serde_json::from_value(body(json!(-4))).unwrap();
    assert_eq!(input.age, -4);

    for bad in [json!(30.5), json!("30"), json!(1e12), json!(null)] {
      assert!(
        serde_json::from_value::<NewPerson>(body(bad.clone())).is_err(),
        "accepted age {bad}"
      );
    }

    let patch: PersonPatch = serde_json::from_value(json!({ "age": 41.0 })).unwrap();
    assert_eq!(patch.age, Some(41));
    assert!(serde_json::from_value::<PersonPatch>(json!({ "age": 41.25 })).is_err());
  }

  #[test]
  fn patch_refuses_null_on_required_fields() {
    for field in [
      "name", "age", "bloodType", "skills", "isInjured", "isInfected", "canWork",
    ] {
      let mut body = serde_json::Map::new();
      body.insert(field.to_owned(), serde_json::Value::Null);
      let err = serde_json::from_value::<PersonPatch>(body.into())
        .expect_err(field)
        .to_string();
      assert!(err.contains("must not be null"), "{field}: {err}");
    }
  }

  #[test]
  fn patch_observation_distinguishes_null_from_missing() {
    let missing: PersonPatch = serde_json::from_value(json!({})).unwrap();
    assert_eq!(missing.observation, None);

    let cleared: PersonPatch = serde_json::from_value(json!({ "observation": null })).unwrap();
    assert_eq!(cleared.observation, Some(None));
    assert!(cleared.validate().is_ok());
    assert_eq!(serde_json::to_value(&cleared).unwrap(), json!({ "observation": null }));

    let set: PersonPatch = serde_json::from_value(json!({ "observation": "cough" })).unwrap();
    assert_eq!(set.observation, Some(Some("cough".into())));

    let long = PersonPatch { observation: Some(Some("x".repeat(245))), ..PersonPatch::default() };
    assert!(matches!(long.validate(), Err(Error::TooLong { .. })));
  }

  #[test]
  fn patch_validation_checks_present_fields_only() {
    assert!(PersonPatch::default().validate().is_ok());
    assert!(PersonPatch::infected(true).validate().is_ok());

    let blank_name = PersonPatch { name: Some(String::new()), ..PersonPatch::default() };
    assert_eq!(blank_name.validate(), Err(Error::Required("name")));

    let blank_skills = PersonPatch { skills: Some(" ".into()), ..PersonPatch::default() };
    assert_eq!(blank_skills.validate(), Err(Error::Required("skills")));
  }
}
