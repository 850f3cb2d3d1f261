//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The planner and simulator never touch storage; callers load the
//! configuration here and pass it in as a value.

use crate::{
    config::{PayoffConfig, CONFIG_KEY, CONFIG_SCHEMA_VERSION},
    error::{PayoffError, PayoffResult},
    planner::Projection,
};
use chrono::SecondsFormat;
use rusqlite::{params, Connection, OptionalExtension};

/// Minimal key/value seam for settings blobs.
pub trait KeyValueStore {
    fn get_value(&self, key: &str) -> PayoffResult<Option<String>>;
    fn put_value(&self, key: &str, value: &str) -> PayoffResult<()>;
}

pub struct PayoffStore {
    conn: Connection,
}

impl PayoffStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> PayoffResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PayoffResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PayoffResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        self.conn
            .execute_batch(include_str!("../../migrations/002_projections.sql"))?;
        Ok(())
    }

    // ── Projection ─────────────────────────────────────────────

    pub fn save_projection(&self, projection: &Projection) -> PayoffResult<()> {
        let payload = serde_json::to_string(projection)?;
        self.conn.execute(
            "INSERT INTO projection
               (projection_id, currency, created_at, extra_payment, debt_free, months_to_debt_free, payload)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                projection.projection_id,
                projection.currency,
                projection.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
                projection.extra_payment,
                projection.debt_free,
                projection.months_to_debt_free.map(i64::from),
                payload,
            ],
        )?;
        log::info!(
            "Projection {} saved ({} months, {})",
            projection.projection_id,
            projection.schedule.len(),
            projection.currency
        );
        Ok(())
    }

    pub fn projection_by_id(&self, projection_id: &str) -> PayoffResult<Projection> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM projection WHERE projection_id = ?1",
                params![projection_id],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(PayoffError::ProjectionNotFound {
                projection_id: projection_id.to_string(),
            }),
        }
    }

    /// Saved projections for `currency`, oldest first.
    pub fn projections_for_currency(&self, currency: &str) -> PayoffResult<Vec<Projection>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload FROM projection
             WHERE currency = ?1
             ORDER BY created_at ASC, rowid ASC",
        )?;
        let payloads = stmt
            .query_map(params![currency], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        payloads
            .iter()
            .map(|json| serde_json::from_str::<Projection>(json).map_err(PayoffError::from))
            .collect()
    }
}

impl KeyValueStore for PayoffStore {
    fn get_value(&self, key: &str) -> PayoffResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_value(&self, key: &str, value: &str) -> PayoffResult<()> {
        self.conn.execute(
            "INSERT INTO config_kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

// ── Configuration blob ─────────────────────────────────────────

/// Load the payoff configuration.
///
/// A missing blob, or one written under another schema version, yields the
/// default configuration. A blob that is not valid JSON is an error.
pub fn load_config<S: KeyValueStore + ?Sized>(store: &S) -> PayoffResult<PayoffConfig> {
    let Some(raw) = store.get_value(CONFIG_KEY)? else {
        return Ok(PayoffConfig::default());
    };

    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let version = value.get("version").and_then(serde_json::Value::as_u64);
    if version != Some(u64::from(CONFIG_SCHEMA_VERSION)) {
        log::warn!(
            "Discarding payoff config with schema version {:?} (current {CONFIG_SCHEMA_VERSION})",
            version
        );
        return Ok(PayoffConfig::default());
    }

    Ok(serde_json::from_value(value)?)
}

/// Persist the configuration, stamped with the current schema version.
pub fn save_config<S: KeyValueStore + ?Sized>(store: &S, config: &PayoffConfig) -> PayoffResult<()> {
    let stamped = PayoffConfig {
        version: CONFIG_SCHEMA_VERSION,
        ..config.clone()
    };
    store.put_value(CONFIG_KEY, &serde_json::to_string(&stamped)?)
}
