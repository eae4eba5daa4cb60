use crate::errors::{AppError, AppResult};
use crate::threat::ThreatMatch;
use chrono::prelude::*;
use rusqlite::{Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";


pub fn connect(path: &Path) -> AppResult<Connection> {
    let conn = Connection::open(path)
        .map_err(|_| AppError::DatabasePathIncorrect(path.to_string_lossy().into()))?;

    create_threat_matches_table(&conn)?;

    Ok(conn)
}

pub fn connect_in_memory() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;

    create_threat_matches_table(&conn)?;

    Ok(conn)
}

fn create_threat_matches_table(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS threat_matches \
        ( \
            url_hash TEXT PRIMARY KEY, \
            matches TEXT NOT NULL, \
            expires_at TEXT NOT NULL \
        )",
        [],
    )?;

    Ok(())
}


pub fn persist_matches(
    conn: &Connection,
    url: &str,
    matches: &[ThreatMatch],
    expires_at: DateTime<Utc>
) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO threat_matches (url_hash, matches, expires_at) VALUES (?1, ?2, ?3)",
        (sha256(url), serde_json::to_string(matches)?, timestamp(expires_at)),
    )?;

    Ok(())
}


pub fn find_matches(
    conn: &Connection,
    url: &str,
    now: DateTime<Utc>
) -> AppResult<Option<Vec<ThreatMatch>>> {
    let serialised: Option<String> = conn
        .query_row(
            "SELECT matches FROM threat_matches WHERE url_hash = ?1 AND expires_at > ?2",
            (sha256(url), timestamp(now)),
            |row| row.get(0),
        )
        .optional()?;

    match serialised {
        Some(data) => Ok(Some(serde_json::from_str(&data)?)),
        None => Ok(None),
    }
}

fn timestamp(time: DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

fn sha256(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text);
    let sha = hasher.finalize();

    sha.iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<String>>()
        .join("")
}

#[cfg(test)]
fn matches() -> Vec<ThreatMatch> {
    use crate::threat::{PlatformType, ThreatDescriptor, ThreatEntryType, ThreatType};

    vec![
        ThreatMatch::new(
            "http://bad1url.org",
            ThreatDescriptor {
                threat_type: ThreatType::Malware,
                platform_type: PlatformType::AnyPlatform,
                threat_entry_type: ThreatEntryType::UrlExpression,
            }
        )
    ]
}
