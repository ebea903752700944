//! SQL schema for the roster store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per person. `seq` is the storage order used for listing and for
-- breaking created_at ties.
CREATE TABLE IF NOT EXISTS people (
    seq          INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id    TEXT    NOT NULL UNIQUE,
    name         TEXT    NOT NULL,
    age          INTEGER NOT NULL,
    blood_type   TEXT    NOT NULL DEFAULT 'A+',
    skills       TEXT    NOT NULL,
    is_injured   INTEGER NOT NULL DEFAULT 0,
    is_infected  INTEGER NOT NULL DEFAULT 0,
    can_work     INTEGER NOT NULL DEFAULT 0,
    observation  TEXT,
    created_at   TEXT    NOT NULL   -- RFC 3339 UTC, fixed-width nanoseconds
);

CREATE INDEX IF NOT EXISTS people_created_idx ON people(created_at);

PRAGMA user_version = 1;
";
