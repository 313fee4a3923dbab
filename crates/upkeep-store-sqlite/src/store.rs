//! [`SqliteStore`] — the SQLite implementation of [`MaintenanceStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use upkeep_core::{
  asset::{Asset, NewAsset},
  history::CompletedEntry,
  item::{ItemKind, MaintenanceItem, NewItem, ScheduledItem},
  schedule,
  store::MaintenanceStore,
};

use crate::{
  Error, Result,
  encode::{RawAsset, RawEntry, RawItem, encode_dt, item_table},
  schema,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Upkeep store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run pending migrations.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.migrate().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.migrate().await?;
    Ok(store)
  }

  async fn migrate(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        schema::migrate(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Whether `id` is already taken in `table`.
  async fn id_taken(&self, table: &'static str, column: &'static str, id: i64) -> Result<bool> {
    let taken: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT 1 FROM {table} WHERE {column} = ?1"),
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(taken)
  }
}

// ─── MaintenanceStore impl ───────────────────────────────────────────────────

impl MaintenanceStore for SqliteStore {
  type Error = Error;

  // ── Assets ────────────────────────────────────────────────────────────────

  async fn add_asset(&self, input: NewAsset) -> Result<Asset> {
    input.validate()?;

    if self.id_taken("assets", "asset_id", input.asset_id).await? {
      return Err(Error::DuplicateAsset(input.asset_id));
    }

    let asset = Asset {
      asset_id:   input.asset_id,
      name:       input.name,
      kind:       input.kind,
      location:   input.location,
      created_at: Utc::now(),
    };

    let id       = asset.asset_id;
    let name     = asset.name.clone();
    let kind     = asset.kind.clone();
    let location = asset.location.clone();
    let at_str   = encode_dt(asset.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO assets (asset_id, name, kind, location, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id, name, kind, location, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(asset)
  }

  async fn get_asset(&self, id: i64) -> Result<Option<Asset>> {
    let raw: Option<RawAsset> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT asset_id, name, kind, location, created_at
               FROM assets WHERE asset_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawAsset {
                  asset_id:   row.get(0)?,
                  name:       row.get(1)?,
                  kind:       row.get(2)?,
                  location:   row.get(3)?,
                  created_at: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAsset::into_asset).transpose()
  }

  async fn list_assets(&self) -> Result<Vec<Asset>> {
    let raws: Vec<RawAsset> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT asset_id, name, kind, location, created_at
           FROM assets ORDER BY asset_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawAsset {
              asset_id:   row.get(0)?,
              name:       row.get(1)?,
              kind:       row.get(2)?,
              location:   row.get(3)?,
              created_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAsset::into_asset).collect()
  }

  async fn delete_asset(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM assets WHERE asset_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(removed > 0)
  }

  // ── Maintenance items ─────────────────────────────────────────────────────

  async fn add_item(&self, kind: ItemKind, input: NewItem) -> Result<MaintenanceItem> {
    input.validate(kind)?;

    let table = item_table(kind);
    if self.id_taken(table, "item_id", input.item_id).await? {
      return Err(Error::DuplicateItem {
        kind,
        item_id: input.item_id,
      });
    }

    let created_at = Utc::now();
    let due_at = Some(input.resolve_due(created_at));
    let item = MaintenanceItem {
      item_id:     input.item_id,
      asset_id:    input.asset_id,
      description: input.description,
      due_at,
      frequency:   input.frequency,
      created_at,
    };

    let item_id       = item.item_id;
    let asset_id      = item.asset_id;
    let description   = item.description.clone();
    let frequency_str = item.frequency.map(|f| f.as_label());
    let due_str       = item.due_at.map(encode_dt);
    let created_str   = encode_dt(item.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO {table} (item_id, asset_id, description, frequency, due_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
          ),
          rusqlite::params![item_id, asset_id, description, frequency_str, due_str, created_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(item)
  }

  async fn get_item(&self, kind: ItemKind, id: i64) -> Result<Option<MaintenanceItem>> {
    let table = item_table(kind);

    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT item_id, asset_id, description, frequency, due_at, created_at
                 FROM {table} WHERE item_id = ?1"
              ),
              rusqlite::params![id],
              |row| {
                Ok(RawItem {
                  item_id:     row.get(0)?,
                  asset_id:    row.get(1)?,
                  description: row.get(2)?,
                  frequency:   row.get(3)?,
                  due_at:      row.get(4)?,
                  created_at:  row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn list_items(
    &self,
    kind: ItemKind,
    as_of: Option<DateTime<Utc>>,
  ) -> Result<Vec<ScheduledItem>> {
    let table = item_table(kind);
    let as_of_resolved = as_of.unwrap_or_else(Utc::now);

    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT item_id, asset_id, description, frequency, due_at, created_at
           FROM {table} ORDER BY item_id"
        ))?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawItem {
              item_id:     row.get(0)?,
              asset_id:    row.get(1)?,
              description: row.get(2)?,
              frequency:   row.get(3)?,
              due_at:      row.get(4)?,
              created_at:  row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| {
        let item = raw.into_item()?;
        let status = schedule::classify(item.due_at, as_of_resolved);
        Ok(ScheduledItem { item, status })
      })
      .collect()
  }

  async fn delete_item(&self, kind: ItemKind, id: i64) -> Result<bool> {
    let table = item_table(kind);
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!("DELETE FROM {table} WHERE item_id = ?1"),
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(removed > 0)
  }

  // ── Completion ────────────────────────────────────────────────────────────

  async fn complete_item(&self, kind: ItemKind, id: i64) -> Result<Option<CompletedEntry>> {
    if !kind.archivable() {
      return Err(upkeep_core::Error::NotArchivable(kind).into());
    }

    let table        = item_table(kind);
    let kind_str     = kind.as_str();
    let completed_at = Utc::now();
    let at_str       = encode_dt(completed_at);

    // The source-table delete and the history insert must commit together.
    let archived: Option<(i64, i64, String)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let row: Option<(i64, String)> = tx
          .query_row(
            &format!("SELECT asset_id, description FROM {table} WHERE item_id = ?1"),
            rusqlite::params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;

        let Some((asset_id, description)) = row else {
          return Ok(None);
        };

        tx.execute(
          &format!("DELETE FROM {table} WHERE item_id = ?1"),
          rusqlite::params![id],
        )?;
        tx.execute(
          "INSERT INTO completed_history (kind, item_id, asset_id, description, completed_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![kind_str, id, asset_id, description, at_str],
        )?;
        let entry_id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(Some((entry_id, asset_id, description)))
      })
      .await?;

    Ok(archived.map(|(entry_id, asset_id, description)| CompletedEntry {
      entry_id,
      kind,
      item_id: id,
      asset_id,
      description,
      completed_at,
    }))
  }

  async fn list_history(&self) -> Result<Vec<CompletedEntry>> {
    let raws: Vec<RawEntry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT entry_id, kind, item_id, asset_id, description, completed_at
           FROM completed_history
           ORDER BY completed_at DESC, entry_id DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawEntry {
              entry_id:     row.get(0)?,
              kind:         row.get(1)?,
              item_id:      row.get(2)?,
              asset_id:     row.get(3)?,
              description:  row.get(4)?,
              completed_at: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEntry::into_entry).collect()
  }
}
