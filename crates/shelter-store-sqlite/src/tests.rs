//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use shelter_core::{
  person::{BloodType, NewPerson, PersonPatch},
  store::{PersonStore, RECENT_LIMIT},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn t0() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() }

fn alice() -> NewPerson {
  let mut input = NewPerson::new("Alice", 30, "medic");
  input.blood_type = BloodType::ONegative;
  input.can_work = true;
  input
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_person() {
  let s = store().await;

  let created = s.insert_person(alice(), t0()).await.unwrap();
  assert_eq!(created.name, "Alice");
  assert_eq!(created.created_at, t0());

  let fetched = s.get_person(created.id).await.unwrap();
  assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn created_at_keeps_sub_second_precision() {
  let s = store().await;
  let at = t0() + Duration::nanoseconds(123_456_789);

  let created = s.insert_person(alice(), at).await.unwrap();
  let fetched = s.get_person(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.created_at, at);
}

#[tokio::test]
async fn observation_roundtrip() {
  let s = store().await;
  let mut input = alice();
  input.observation = Some("bitten on the left arm".into());

  let created = s.insert_person(input, t0()).await.unwrap();
  let fetched = s.get_person(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.observation.as_deref(), Some("bitten on the left arm"));
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  let result = s.get_person(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn ids_are_unique() {
  let s = store().await;
  let a = s.insert_person(alice(), t0()).await.unwrap();
  let b = s.insert_person(alice(), t0()).await.unwrap();
  assert_ne!(a.id, b.id);
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_people_in_storage_order() {
  let s = store().await;
  assert!(s.list_people().await.unwrap().is_empty());

  // Insert out of time order; listing follows insertion.
  let names = ["Carol", "Alice", "Bob"];
  let times = [t0() + Duration::hours(2), t0(), t0() + Duration::hours(1)];
  for (name, at) in names.into_iter().zip(times) {
    s.insert_person(NewPerson::new(name, 20, "cooking"), at)
      .await
      .unwrap();
  }

  let listed: Vec<String> = s
    .list_people()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name)
    .collect();
  assert_eq!(listed, names);
}

#[tokio::test]
async fn list_recent_is_capped_and_newest_first() {
  let s = store().await;
  for i in 0..8 {
    s.insert_person(
      NewPerson::new(format!("p{i}"), 20, "scouting"),
      t0() + Duration::minutes(i),
    )
    .await
    .unwrap();
  }

  let recent = s.list_recent(RECENT_LIMIT).await.unwrap();
  let names: Vec<&str> = recent.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, ["p7", "p6", "p5", "p4", "p3"]);
  assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn list_recent_breaks_ties_by_insertion_order() {
  let s = store().await;
  s.insert_person(NewPerson::new("old", 20, "x"), t0()).await.unwrap();
  for name in ["tie-a", "tie-b", "tie-c"] {
    s.insert_person(NewPerson::new(name, 20, "x"), t0() + Duration::hours(1))
      .await
      .unwrap();
  }

  let names: Vec<String> = s
    .list_recent(RECENT_LIMIT)
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name)
    .collect();
  assert_eq!(names, ["tie-a", "tie-b", "tie-c", "old"]);
}

#[tokio::test]
async fn list_recent_with_fewer_than_limit() {
  let s = store().await;
  s.insert_person(alice(), t0()).await.unwrap();
  assert_eq!(s.list_recent(RECENT_LIMIT).await.unwrap().len(), 1);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_changes_only_patched_fields() {
  let s = store().await;
  let before = s.insert_person(alice(), t0()).await.unwrap();

  let after = s
    .update_person(before.id, PersonPatch::infected(true))
    .await
    .unwrap()
    .expect("person exists");

  assert!(after.is_infected);
  let mut expected = before.clone();
  expected.is_infected = true;
  assert_eq!(after, expected);
  assert_eq!(s.get_person(before.id).await.unwrap(), Some(expected));
}

#[tokio::test]
async fn update_every_field() {
  let s = store().await;
  let before = s.insert_person(alice(), t0()).await.unwrap();

  let patch = PersonPatch {
    name:        Some("Alicia".into()),
    age:         Some(31),
    blood_type:  Some(BloodType::AbPositive),
    skills:      Some("surgeon".into()),
    is_injured:  Some(true),
    is_infected: Some(true),
    can_work:    Some(false),
    observation: Some(Some("promoted".into())),
  };
  let after = s.update_person(before.id, patch).await.unwrap().unwrap();

  assert_eq!(after.id, before.id);
  assert_eq!(after.created_at, before.created_at);
  assert_eq!(after.name, "Alicia");
  assert_eq!(after.age, 31);
  assert_eq!(after.blood_type, BloodType::AbPositive);
  assert_eq!(after.skills, "surgeon");
  assert!(after.is_injured && after.is_infected && !after.can_work);
  assert_eq!(after.observation.as_deref(), Some("promoted"));
}

#[tokio::test]
async fn empty_patch_returns_unchanged_record() {
  let s = store().await;
  let before = s.insert_person(alice(), t0()).await.unwrap();
  let after = s
    .update_person(before.id, PersonPatch::default())
    .await
    .unwrap();
  assert_eq!(after, Some(before));
}

#[tokio::test]
async fn update_clears_observation_only_when_set_to_null() {
  let s = store().await;
  let mut input = alice();
  input.observation = Some("bitten on the left arm".into());
  let before = s.insert_person(input, t0()).await.unwrap();

  let kept = s
    .update_person(before.id, PersonPatch { age: Some(33), ..Default::default() })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(kept.observation.as_deref(), Some("bitten on the left arm"));

  let cleared = s
    .update_person(before.id, PersonPatch {
      observation: Some(None),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(cleared.observation, None);
  assert_eq!(cleared.age, 33);
  assert_eq!(s.get_person(before.id).await.unwrap(), Some(cleared));
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let result = s
    .update_person(Uuid::new_v4(), PersonPatch::infected(true))
    .await
    .unwrap();
  assert!(result.is_none());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_record() {
  let s = store().await;
  let p = s.insert_person(alice(), t0()).await.unwrap();

  assert!(s.delete_person(p.id).await.unwrap());
  assert!(s.get_person(p.id).await.unwrap().is_none());
  assert!(s.list_people().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_person(Uuid::new_v4()).await.unwrap());

  let p = s.insert_person(alice(), t0()).await.unwrap();
  assert!(s.delete_person(p.id).await.unwrap());
  assert!(!s.delete_person(p.id).await.unwrap());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_records() {
  let path = std::env::temp_dir().join(format!("shelter-{}.db", Uuid::new_v4()));

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert_person(alice(), t0()).await.unwrap().id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get_person(id).await.unwrap();
  assert_eq!(fetched.map(|p| p.name).as_deref(), Some("Alice"));

  drop(s);
  let _ = std::fs::remove_file(&path);
}
