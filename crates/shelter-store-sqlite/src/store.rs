//! [`SqliteStore`]: the SQLite implementation of [`PersonStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use shelter_core::{
  person::{NewPerson, Person, PersonPatch},
  store::PersonStore,
};

use crate::{
  Result,
  encode::{PERSON_COLUMNS, RawPerson, encode_blood_type, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT {PERSON_COLUMNS} ...` with the given tail and parameters.
  async fn query_people(
    &self,
    tail: &'static str,
    limit: Option<i64>,
  ) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {PERSON_COLUMNS} FROM people {tail}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = match limit {
          Some(n) => stmt
            .query_map(rusqlite::params![n], RawPerson::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawPerson::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  async fn insert_person(
    &self,
    input: NewPerson,
    created_at: DateTime<Utc>,
  ) -> Result<Person> {
    let person = input.into_person(Uuid::new_v4(), created_at);

    let id_str      = encode_uuid(person.id);
    let name        = person.name.clone();
    let age         = person.age;
    let blood_type  = encode_blood_type(person.blood_type);
    let skills      = person.skills.clone();
    let is_injured  = person.is_injured;
    let is_infected = person.is_infected;
    let can_work    = person.can_work;
    let observation = person.observation.clone();
    let at_str      = encode_dt(person.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (
             person_id, name, age, blood_type, skills,
             is_injured, is_infected, can_work, observation, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            name,
            age,
            blood_type,
            skills,
            is_injured,
            is_infected,
            can_work,
            observation,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM people WHERE person_id = ?1"),
            rusqlite::params![id_str],
            RawPerson::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_people(&self) -> Result<Vec<Person>> {
    self.query_people("ORDER BY seq", None).await
  }

  async fn list_recent(&self, limit: usize) -> Result<Vec<Person>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    self
      .query_people("ORDER BY created_at DESC, seq ASC LIMIT ?1", Some(limit))
      .await
  }

  async fn update_person(
    &self,
    id: Uuid,
    patch: PersonPatch,
  ) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);
    let blood_type = patch.blood_type.map(encode_blood_type);
    // `Some(None)` clears the column; `None` leaves it alone.
    let set_observation = patch.observation.is_some();
    let observation = patch.observation.flatten();

    // Merge and read back in one transaction.
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE people SET
             name        = COALESCE(?2, name),
             age         = COALESCE(?3, age),
             blood_type  = COALESCE(?4, blood_type),
             skills      = COALESCE(?5, skills),
             is_injured  = COALESCE(?6, is_injured),
             is_infected = COALESCE(?7, is_infected),
             can_work    = COALESCE(?8, can_work),
             observation = CASE WHEN ?10 THEN ?9 ELSE observation END
           WHERE person_id = ?1",
          rusqlite::params![
            id_str,
            patch.name,
            patch.age,
            blood_type,
            patch.skills,
            patch.is_injured,
            patch.is_infected,
            patch.can_work,
            observation,
            set_observation,
          ],
        )?;

        if changed == 0 {
          return Ok(None);
        }

        let raw = tx.query_row(
          &format!("SELECT {PERSON_COLUMNS} FROM people WHERE person_id = ?1"),
          rusqlite::params![id_str],
          RawPerson::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn delete_person(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM people WHERE person_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}
