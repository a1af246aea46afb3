//! [`SqliteStore`] — the SQLite implementation of [`FactStore`].

use std::path::Path;

use chrono::{Duration, Utc};
use chronicle_core as core;
use chronicle_core::{
  fact::{Fact, NewFact},
  revision::NewRevision,
  source::{Source, SourceRef},
  store::{Caller, FactFilter, FactStore, RevisionEffects},
  view::{CategoryStats, FactPage, FactView},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    FactRow, RawFact, RawFactView, RawRevision, RawSource, RevisionRow,
    decode_category, encode_category, encode_confidence, encode_dt,
    encode_importance, encode_tier, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Chronicle fact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
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

  /// Open an in-memory store — useful for testing.
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
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

const FACT_COLS: &str =
  "f.fact_id, f.headline, f.current_value, f.category, f.importance, \
   f.confidence, f.tags, f.last_updated, f.active";

fn map_fact_row(row: &rusqlite::Row) -> rusqlite::Result<RawFact> {
  Ok(RawFact {
    fact_id:       row.get(0)?,
    headline:      row.get(1)?,
    current_value: row.get(2)?,
    category:      row.get(3)?,
    importance:    row.get(4)?,
    confidence:    row.get(5)?,
    tags:          row.get(6)?,
    last_updated:  row.get(7)?,
    active:        row.get(8)?,
  })
}

fn map_revision_row(row: &rusqlite::Row) -> rusqlite::Result<RawRevision> {
  Ok(RawRevision {
    revision_id:    row.get(0)?,
    fact_id:        row.get(1)?,
    previous_value: row.get(2)?,
    new_value:      row.get(3)?,
    delta:          row.get(4)?,
    why_it_matters: row.get(5)?,
    revision_type:  row.get(6)?,
    recorded_at:    row.get(7)?,
    source_name:    row.get(8)?,
    source_url:     row.get(9)?,
    source_tier:    row.get(10)?,
  })
}

// ─── Write helpers ───────────────────────────────────────────────────────────
//
// These run inside a `tokio_rusqlite` closure against either the bare
// connection or an open transaction (`Transaction` derefs to `Connection`).

fn insert_fact_row(
  conn: &rusqlite::Connection,
  row: &FactRow,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO facts (
       fact_id, headline, current_value, category, importance,
       confidence, tags, last_updated, active
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    rusqlite::params![
      row.fact_id,
      row.headline,
      row.current_value,
      row.category,
      row.importance,
      row.confidence,
      row.tags,
      row.last_updated,
      row.active,
    ],
  )?;
  Ok(())
}

fn insert_revision_row(
  conn: &rusqlite::Connection,
  row: &RevisionRow,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO revisions (
       revision_id, fact_id, previous_value, new_value, delta,
       why_it_matters, revision_type, recorded_at,
       source_name, source_url, source_tier
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    rusqlite::params![
      row.revision_id,
      row.fact_id,
      row.previous_value,
      row.new_value,
      row.delta,
      row.why_it_matters,
      row.revision_type,
      row.recorded_at,
      row.source_name,
      row.source_url,
      row.source_tier,
    ],
  )?;
  Ok(())
}

/// Resolve an outlet by name, inserting it if absent, and return its id.
/// `INSERT OR IGNORE` makes the conflict path a no-op, so the first write
/// wins and concurrent duplicate attempts stay safe.
fn upsert_source_row(
  conn: &rusqlite::Connection,
  name: &str,
  url: Option<&str>,
  tier: &str,
) -> rusqlite::Result<String> {
  conn.execute(
    "INSERT OR IGNORE INTO sources (source_id, name, url, tier)
     VALUES (?1, ?2, ?3, ?4)",
    rusqlite::params![encode_uuid(Uuid::new_v4()), name, url, tier],
  )?;
  conn.query_row(
    "SELECT source_id FROM sources WHERE name = ?1",
    rusqlite::params![name],
    |r| r.get(0),
  )
}

fn link_source_row(
  conn: &rusqlite::Connection,
  fact_id: &str,
  source_id: &str,
  retrieved_at: &str,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT OR IGNORE INTO fact_sources (fact_id, source_id, retrieved_at)
     VALUES (?1, ?2, ?3)",
    rusqlite::params![fact_id, source_id, retrieved_at],
  )?;
  Ok(())
}

// ─── Hydration ───────────────────────────────────────────────────────────────

fn fact_exists(
  conn: &rusqlite::Connection,
  fact_id: &str,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM facts WHERE fact_id = ?1",
        rusqlite::params![fact_id],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

fn read_fact(
  conn: &rusqlite::Connection,
  fact_id: &str,
) -> rusqlite::Result<Option<RawFact>> {
  conn
    .query_row(
      &format!("SELECT {FACT_COLS} FROM facts f WHERE f.fact_id = ?1"),
      rusqlite::params![fact_id],
      map_fact_row,
    )
    .optional()
}

fn mark_set(
  conn: &rusqlite::Connection,
  sql: &str,
  user_id: &str,
  fact_id: &str,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(sql, rusqlite::params![user_id, fact_id], |_| Ok(true))
      .optional()?
      .unwrap_or(false),
  )
}

/// Assemble everything hydration needs for one fact. Pure read; the caller
/// decodes the result outside the connection closure.
fn fetch_view(
  conn: &rusqlite::Connection,
  fact_id: &str,
  user: Option<&str>,
) -> rusqlite::Result<Option<RawFactView>> {
  let fact = match read_fact(conn, fact_id)? {
    Some(f) => f,
    None => return Ok(None),
  };

  // Timeline, newest first. rowid breaks same-timestamp ties in favour of
  // the later insert.
  let mut stmt = conn.prepare(
    "SELECT revision_id, fact_id, previous_value, new_value, delta,
            why_it_matters, revision_type, recorded_at,
            source_name, source_url, source_tier
     FROM revisions
     WHERE fact_id = ?1
     ORDER BY recorded_at DESC, rowid DESC",
  )?;
  let timeline = stmt
    .query_map(rusqlite::params![fact_id], map_revision_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  // The link table is the source of truth for currently attributed outlets.
  let mut stmt = conn.prepare(
    "SELECT s.source_id, s.name, s.url, s.tier
     FROM sources s
     JOIN fact_sources fs ON fs.source_id = s.source_id
     WHERE fs.fact_id = ?1
     ORDER BY s.name",
  )?;
  let sources = stmt
    .query_map(rusqlite::params![fact_id], |row| {
      Ok(RawSource {
        source_id: row.get(0)?,
        name:      row.get(1)?,
        url:       row.get(2)?,
        tier:      row.get(3)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  // Outgoing edges only; links are always written bidirectionally.
  let mut stmt = conn.prepare(
    "SELECT related_id FROM fact_relations WHERE fact_id = ?1",
  )?;
  let related = stmt
    .query_map(rusqlite::params![fact_id], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<String>>>()?;

  let (bookmarked, muted) = match user {
    Some(u) => (
      mark_set(
        conn,
        "SELECT 1 FROM bookmarks WHERE user_id = ?1 AND fact_id = ?2",
        u,
        fact_id,
      )?,
      mark_set(
        conn,
        "SELECT 1 FROM mutes WHERE user_id = ?1 AND fact_id = ?2",
        u,
        fact_id,
      )?,
    ),
    None => (false, false),
  };

  Ok(Some(RawFactView { fact, timeline, sources, related, bookmarked, muted }))
}

/// Hydrate a list of fact ids, preserving the given order.
fn fetch_views(
  conn: &rusqlite::Connection,
  ids: &[String],
  user: Option<&str>,
) -> rusqlite::Result<Vec<RawFactView>> {
  let mut views = Vec::with_capacity(ids.len());
  for id in ids {
    if let Some(v) = fetch_view(conn, id, user)? {
      views.push(v);
    }
  }
  Ok(views)
}

fn decode_views(raws: Vec<RawFactView>) -> Result<Vec<FactView>> {
  raws.into_iter().map(RawFactView::into_view).collect()
}

fn caller_id(caller: Caller) -> Option<String> {
  caller.user_id().map(encode_uuid)
}

/// Escape LIKE metacharacters so a query matches them literally.
fn escape_like(query: &str) -> String {
  let mut out = String::with_capacity(query.len());
  for c in query.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

// ─── FactStore impl ──────────────────────────────────────────────────────────

impl FactStore for SqliteStore {
  type Error = Error;

  // ── Source registry ───────────────────────────────────────────────────────

  async fn upsert_source(&self, source: SourceRef) -> Result<Source> {
    let tier = encode_tier(source.tier).to_owned();

    let raw: RawSource = self
      .conn
      .call(move |conn| {
        let id = upsert_source_row(
          conn,
          &source.name,
          source.url.as_deref(),
          &tier,
        )?;
        Ok(conn.query_row(
          "SELECT source_id, name, url, tier FROM sources WHERE source_id = ?1",
          rusqlite::params![id],
          |row| {
            Ok(RawSource {
              source_id: row.get(0)?,
              name:      row.get(1)?,
              url:       row.get(2)?,
              tier:      row.get(3)?,
            })
          },
        )?)
      })
      .await?;

    raw.into_source()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create_fact(
    &self,
    input: NewFact,
    initial: NewRevision,
    sources: Vec<SourceRef>,
    caller: Caller,
  ) -> Result<FactView> {
    // Reject before any write: at least one attribution is mandatory, and
    // the accompanying revision must be a first entry.
    if sources.is_empty() {
      return Err(Error::Core(core::Error::EmptySourceList));
    }
    initial.check_initial().map_err(Error::Core)?;

    let now = Utc::now();
    let fact = Fact {
      fact_id:       Uuid::new_v4(),
      headline:      input.headline,
      current_value: input.current_value,
      category:      input.category,
      importance:    input.importance,
      confidence:    input.confidence,
      tags:          input.tags,
      last_updated:  now,
      active:        true,
    };
    let revision = initial.into_revision(fact.fact_id, now);

    let fact_row = FactRow::from_fact(&fact)?;
    let revision_row = RevisionRow::from_revision(&revision);
    let fact_id = fact.fact_id;
    let fact_id_str = encode_uuid(fact_id);
    let now_str = encode_dt(now);
    let source_rows: Vec<(String, Option<String>, String)> = sources
      .into_iter()
      .map(|s| (s.name, s.url, encode_tier(s.tier).to_owned()))
      .collect();
    let user = caller_id(caller);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        insert_fact_row(&tx, &fact_row)?;
        insert_revision_row(&tx, &revision_row)?;
        for (name, url, tier) in &source_rows {
          let source_id = upsert_source_row(&tx, name, url.as_deref(), tier)?;
          link_source_row(&tx, &fact_id_str, &source_id, &now_str)?;
        }
        let view = fetch_view(&tx, &fact_id_str, user.as_deref())?;
        tx.commit()?;
        Ok(view)
      })
      .await?;

    raw.ok_or(Error::FactNotFound(fact_id))?.into_view()
  }

  async fn add_revision(
    &self,
    fact_id: Uuid,
    revision: NewRevision,
    effects: RevisionEffects,
    caller: Caller,
  ) -> Result<Option<FactView>> {
    revision.check_followup().map_err(Error::Core)?;

    let now = Utc::now();
    let built = revision.into_revision(fact_id, now);
    let revision_row = RevisionRow::from_revision(&built);

    let fact_id_str = encode_uuid(fact_id);
    let now_str = encode_dt(now);
    let new_value = effects.current_value;
    let new_confidence =
      effects.confidence.map(|c| encode_confidence(c).to_owned());
    let new_importance =
      effects.importance.map(|i| encode_importance(i).to_owned());
    let user = caller_id(caller);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if !fact_exists(&tx, &fact_id_str)? {
          return Ok(None);
        }

        insert_revision_row(&tx, &revision_row)?;

        // Advance the projection: only fields the caller named change.
        tx.execute(
          "UPDATE facts SET
             last_updated  = ?2,
             current_value = COALESCE(?3, current_value),
             confidence    = COALESCE(?4, confidence),
             importance    = COALESCE(?5, importance)
           WHERE fact_id = ?1",
          rusqlite::params![
            fact_id_str,
            now_str,
            new_value,
            new_confidence,
            new_importance,
          ],
        )?;

        let source_id = upsert_source_row(
          &tx,
          &revision_row.source_name,
          revision_row.source_url.as_deref(),
          &revision_row.source_tier,
        )?;
        link_source_row(&tx, &fact_id_str, &source_id, &now_str)?;

        let view = fetch_view(&tx, &fact_id_str, user.as_deref())?;
        tx.commit()?;
        Ok(view)
      })
      .await?;

    raw.map(RawFactView::into_view).transpose()
  }

  async fn link_related(&self, fact_id: Uuid, related_id: Uuid) -> Result<()> {
    let a = encode_uuid(fact_id);
    let b = encode_uuid(related_id);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR IGNORE INTO fact_relations (fact_id, related_id)
           VALUES (?1, ?2)",
          rusqlite::params![a, b],
        )?;
        tx.execute(
          "INSERT OR IGNORE INTO fact_relations (fact_id, related_id)
           VALUES (?1, ?2)",
          rusqlite::params![b, a],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn deactivate_fact(&self, fact_id: Uuid) -> Result<bool> {
    let id = encode_uuid(fact_id);
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE facts SET active = 0 WHERE fact_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── User overlay ──────────────────────────────────────────────────────────

  async fn toggle_bookmark(
    &self,
    user_id: Uuid,
    fact_id: Uuid,
  ) -> Result<Option<bool>> {
    let user = encode_uuid(user_id);
    let fact = encode_uuid(fact_id);
    let now = encode_dt(Utc::now());

    Ok(
      self
        .conn
        .call(move |conn| {
          if !fact_exists(conn, &fact)? {
            return Ok(None);
          }
          let deleted = conn.execute(
            "DELETE FROM bookmarks WHERE user_id = ?1 AND fact_id = ?2",
            rusqlite::params![user, fact],
          )?;
          if deleted > 0 {
            return Ok(Some(false));
          }
          conn.execute(
            "INSERT OR IGNORE INTO bookmarks (user_id, fact_id, created_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![user, fact, now],
          )?;
          Ok(Some(true))
        })
        .await?,
    )
  }

  async fn toggle_mute(
    &self,
    user_id: Uuid,
    fact_id: Uuid,
  ) -> Result<Option<bool>> {
    let user = encode_uuid(user_id);
    let fact = encode_uuid(fact_id);
    let now = encode_dt(Utc::now());

    Ok(
      self
        .conn
        .call(move |conn| {
          if !fact_exists(conn, &fact)? {
            return Ok(None);
          }
          let deleted = conn.execute(
            "DELETE FROM mutes WHERE user_id = ?1 AND fact_id = ?2",
            rusqlite::params![user, fact],
          )?;
          if deleted > 0 {
            return Ok(Some(false));
          }
          conn.execute(
            "INSERT OR IGNORE INTO mutes (user_id, fact_id, created_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![user, fact, now],
          )?;
          Ok(Some(true))
        })
        .await?,
    )
  }

  async fn user_bookmarks(&self, user_id: Uuid) -> Result<Vec<FactView>> {
    let user = encode_uuid(user_id);

    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT fact_id FROM bookmarks
           WHERE user_id = ?1
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let ids = stmt
          .query_map(rusqlite::params![user], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(fetch_views(conn, &ids, Some(user.as_str()))?)
      })
      .await?;

    decode_views(raws)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_fact(
    &self,
    fact_id: Uuid,
    caller: Caller,
  ) -> Result<Option<FactView>> {
    let id = encode_uuid(fact_id);
    let user = caller_id(caller);

    let raw = self
      .conn
      .call(move |conn| Ok(fetch_view(conn, &id, user.as_deref())?))
      .await?;

    raw.map(RawFactView::into_view).transpose()
  }

  async fn list_facts(
    &self,
    filter: FactFilter,
    caller: Caller,
  ) -> Result<FactPage> {
    let category = filter.category.map(|c| encode_category(c).to_owned());
    let importance = filter.importance.map(|i| encode_importance(i).to_owned());
    let confidence = filter.confidence.map(|c| encode_confidence(c).to_owned());
    let limit = filter.limit as i64;
    let offset = filter.offset as i64;
    let user = caller_id(caller);

    // One predicate, used by both the count and the page query so `total`
    // always reflects the same filter.
    const PREDICATE: &str = "f.active = 1
       AND (?1 IS NULL OR f.category = ?1)
       AND (?2 IS NULL OR f.importance = ?2)
       AND (?3 IS NULL OR f.confidence = ?3)";

    let (raws, total) = self
      .conn
      .call(move |conn| {
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM facts f WHERE {PREDICATE}"),
          rusqlite::params![category, importance, confidence],
          |r| r.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT f.fact_id FROM facts f
           WHERE {PREDICATE}
           ORDER BY f.last_updated DESC
           LIMIT ?4 OFFSET ?5"
        ))?;
        let ids = stmt
          .query_map(
            rusqlite::params![category, importance, confidence, limit, offset],
            |row| row.get(0),
          )?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok((fetch_views(conn, &ids, user.as_deref())?, total))
      })
      .await?;

    Ok(FactPage { items: decode_views(raws)?, total: total as u64 })
  }

  async fn trending(&self, limit: usize, caller: Caller) -> Result<Vec<FactView>> {
    let cutoff = encode_dt(Utc::now() - Duration::hours(24));
    let limit = limit as i64;
    let user = caller_id(caller);

    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT f.fact_id
           FROM facts f
           JOIN revisions r ON r.fact_id = f.fact_id
           WHERE f.active = 1 AND r.recorded_at >= ?1
           GROUP BY f.fact_id
           ORDER BY COUNT(*) DESC
           LIMIT ?2",
        )?;
        let mut ids = stmt
          .query_map(rusqlite::params![cutoff, limit], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        // Quiet window: fall back to recency rather than an empty feed.
        if ids.is_empty() {
          let mut stmt = conn.prepare(
            "SELECT fact_id FROM facts
             WHERE active = 1
             ORDER BY last_updated DESC
             LIMIT ?1",
          )?;
          ids = stmt
            .query_map(rusqlite::params![limit], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        }

        Ok(fetch_views(conn, &ids, user.as_deref())?)
      })
      .await?;

    decode_views(raws)
  }

  async fn disputed(&self, caller: Caller) -> Result<Vec<FactView>> {
    let user = caller_id(caller);

    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT fact_id FROM facts
           WHERE active = 1 AND confidence = 'disputed'
           ORDER BY last_updated DESC",
        )?;
        let ids = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(fetch_views(conn, &ids, user.as_deref())?)
      })
      .await?;

    decode_views(raws)
  }

  async fn search(&self, query: &str, caller: Caller) -> Result<Vec<FactView>> {
    // SQLite LIKE is case-insensitive for ASCII. Metacharacters in the
    // query are literal text, so they must be escaped.
    let pattern = format!("%{}%", escape_like(query));
    let user = caller_id(caller);

    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT fact_id FROM facts
           WHERE active = 1
             AND (headline LIKE ?1 ESCAPE '\\'
                  OR current_value LIKE ?1 ESCAPE '\\'
                  OR tags LIKE ?1 ESCAPE '\\')
           ORDER BY last_updated DESC",
        )?;
        let mut ids = stmt
          .query_map(rusqlite::params![pattern], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        // Union in facts reached only through their revision text, appended
        // after the fact-level matches, deduplicated by fact id.
        let mut stmt = conn.prepare(
          "SELECT DISTINCT r.fact_id
           FROM revisions r
           JOIN facts f ON f.fact_id = r.fact_id
           WHERE f.active = 1
             AND (r.delta LIKE ?1 ESCAPE '\\'
                  OR r.why_it_matters LIKE ?1 ESCAPE '\\'
                  OR r.new_value LIKE ?1 ESCAPE '\\')",
        )?;
        let revision_ids = stmt
          .query_map(rusqlite::params![pattern], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        for id in revision_ids {
          if !ids.contains(&id) {
            ids.push(id);
          }
        }

        Ok(fetch_views(conn, &ids, user.as_deref())?)
      })
      .await?;

    decode_views(raws)
  }

  async fn category_stats(&self) -> Result<Vec<CategoryStats>> {
    let cutoff = encode_dt(Utc::now() - Duration::hours(24));

    let rows: Vec<(String, i64, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT category,
                  COUNT(*) AS total,
                  SUM(CASE WHEN last_updated >= ?1 THEN 1 ELSE 0 END)
           FROM facts
           WHERE active = 1
           GROUP BY category
           ORDER BY total DESC, category",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![cutoff], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(category, count, updates_today)| {
        Ok(CategoryStats {
          category:      decode_category(&category)?,
          count:         count as u64,
          updates_today: updates_today as u64,
        })
      })
      .collect()
  }
}
