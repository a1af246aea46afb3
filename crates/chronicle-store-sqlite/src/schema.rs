//! SQL schema for the Chronicle SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS facts (
    fact_id       TEXT PRIMARY KEY,
    headline      TEXT NOT NULL,
    current_value TEXT NOT NULL,   -- projection; changed only by explicit writes
    category      TEXT NOT NULL,
    importance    TEXT NOT NULL,
    confidence    TEXT NOT NULL,
    tags          TEXT NOT NULL DEFAULT '[]',
    last_updated  TEXT NOT NULL,   -- ISO 8601 UTC; monotonically non-decreasing
    active        INTEGER NOT NULL DEFAULT 1
);

-- The revision ledger is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS revisions (
    revision_id    TEXT PRIMARY KEY,
    fact_id        TEXT NOT NULL REFERENCES facts(fact_id),
    previous_value TEXT,            -- NULL only on the initial revision
    new_value      TEXT NOT NULL,
    delta          TEXT NOT NULL,
    why_it_matters TEXT NOT NULL,
    revision_type  TEXT NOT NULL,
    recorded_at    TEXT NOT NULL,
    source_name    TEXT NOT NULL,   -- inline attribution, per-use
    source_url     TEXT,
    source_tier    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sources (
    source_id TEXT PRIMARY KEY,
    name      TEXT NOT NULL UNIQUE,
    url       TEXT,
    tier      TEXT NOT NULL
);

-- Outlets currently backing a fact. Re-linking an existing pair is a no-op.
CREATE TABLE IF NOT EXISTS fact_sources (
    fact_id      TEXT NOT NULL REFERENCES facts(fact_id),
    source_id    TEXT NOT NULL REFERENCES sources(source_id),
    retrieved_at TEXT NOT NULL,
    UNIQUE (fact_id, source_id)
);

-- Undirected relations, stored as two directed rows written together.
CREATE TABLE IF NOT EXISTS fact_relations (
    fact_id    TEXT NOT NULL REFERENCES facts(fact_id),
    related_id TEXT NOT NULL REFERENCES facts(fact_id),
    UNIQUE (fact_id, related_id)
);

-- Per-user overlays: presence of a row means the mark is set.
CREATE TABLE IF NOT EXISTS bookmarks (
    user_id    TEXT NOT NULL,
    fact_id    TEXT NOT NULL REFERENCES facts(fact_id),
    created_at TEXT NOT NULL,
    UNIQUE (user_id, fact_id)
);

CREATE TABLE IF NOT EXISTS mutes (
    user_id    TEXT NOT NULL,
    fact_id    TEXT NOT NULL REFERENCES facts(fact_id),
    created_at TEXT NOT NULL,
    UNIQUE (user_id, fact_id)
);

CREATE INDEX IF NOT EXISTS revisions_fact_idx     ON revisions(fact_id);
CREATE INDEX IF NOT EXISTS revisions_recorded_idx ON revisions(recorded_at);
CREATE INDEX IF NOT EXISTS facts_updated_idx      ON facts(last_updated);
CREATE INDEX IF NOT EXISTS facts_category_idx     ON facts(category);
CREATE INDEX IF NOT EXISTS bookmarks_user_idx     ON bookmarks(user_id);

PRAGMA user_version = 1;
";
