//! SQL schema and the versioned migration runner.
//!
//! Each entry in [`MIGRATIONS`] is one schema version; the current version
//! lives in `PRAGMA user_version`. On open, every batch above the recorded
//! version runs inside its own transaction before the version is bumped.

/// Version 1: the five active tables plus the append-only history table.
const V1: &str = "
CREATE TABLE assets (
    asset_id   INTEGER PRIMARY KEY,
    name       TEXT NOT NULL,
    kind       TEXT NOT NULL,
    location   TEXT NOT NULL,
    created_at TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- One table per maintenance-item kind, all the same shape.
-- asset_id is a soft reference: no FOREIGN KEY on purpose.
CREATE TABLE pms (
    item_id     INTEGER PRIMARY KEY,
    asset_id    INTEGER NOT NULL,
    description TEXT NOT NULL,
    frequency   TEXT,            -- recurrence label or NULL
    due_at      TEXT,            -- ISO 8601 UTC or NULL
    created_at  TEXT NOT NULL
);

CREATE TABLE work_orders (
    item_id     INTEGER PRIMARY KEY,
    asset_id    INTEGER NOT NULL,
    description TEXT NOT NULL,
    frequency   TEXT,
    due_at      TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE operator_checks (
    item_id     INTEGER PRIMARY KEY,
    asset_id    INTEGER NOT NULL,
    description TEXT NOT NULL,
    frequency   TEXT,
    due_at      TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE breakdowns (
    item_id     INTEGER PRIMARY KEY,
    asset_id    INTEGER NOT NULL,
    description TEXT NOT NULL,
    frequency   TEXT,
    due_at      TEXT,
    created_at  TEXT NOT NULL
);

-- Strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE completed_history (
    entry_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    kind         TEXT NOT NULL,      -- 'pm' | 'work_order'
    item_id      INTEGER NOT NULL,
    asset_id     INTEGER NOT NULL,
    description  TEXT NOT NULL,
    completed_at TEXT NOT NULL
);

CREATE INDEX pms_asset_idx             ON pms(asset_id);
CREATE INDEX work_orders_asset_idx     ON work_orders(asset_id);
CREATE INDEX operator_checks_asset_idx ON operator_checks(asset_id);
CREATE INDEX breakdowns_asset_idx      ON breakdowns(asset_id);
CREATE INDEX history_completed_idx     ON completed_history(completed_at);
";

/// All migrations, oldest first. `MIGRATIONS.len()` is the target version.
const MIGRATIONS: &[&str] = &[V1];

/// Bring a connection up to the target schema version.
pub fn migrate(conn: &mut rusqlite::Connection) -> rusqlite::Result<()> {
  // Connection-level pragmas apply on every open, not per version.
  conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")?;

  let version: i64 =
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

  for (index, ddl) in MIGRATIONS.iter().enumerate().skip(version as usize) {
    let tx = conn.transaction()?;
    tx.execute_batch(ddl)?;
    tx.pragma_update(None, "user_version", (index + 1) as i64)?;
    tx.commit()?;
  }

  Ok(())
}
