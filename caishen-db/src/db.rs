use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::str::FromStr;

use caishen_core::date::{days_ago_string, today_string};
use caishen_core::models::{DrawingResult, LotteryKind, Ticket};

// red_6 et blue_2 sont NULL selon la loterie : 双色球 n'a qu'un bleu,
// 大乐透 n'a que cinq rouges.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS picks (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    kind       TEXT NOT NULL,
    date       TEXT NOT NULL,
    red_1      INTEGER NOT NULL,
    red_2      INTEGER NOT NULL,
    red_3      INTEGER NOT NULL,
    red_4      INTEGER NOT NULL,
    red_5      INTEGER NOT NULL,
    red_6      INTEGER,
    blue_1     INTEGER NOT NULL,
    blue_2     INTEGER,
    purchased  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS drawings (
    kind       TEXT NOT NULL,
    period     INTEGER NOT NULL,
    date       TEXT NOT NULL,
    red_1      INTEGER NOT NULL,
    red_2      INTEGER NOT NULL,
    red_3      INTEGER NOT NULL,
    red_4      INTEGER NOT NULL,
    red_5      INTEGER NOT NULL,
    red_6      INTEGER,
    blue_1     INTEGER NOT NULL,
    blue_2     INTEGER,
    PRIMARY KEY (kind, period)
);
";

/// Nombre de sélections achetées conservées par loterie.
const HISTORY_LIMIT: u32 = 10;

/// Rétention de l'historique acheté, en jours.
const RETENTION_DAYS: i64 = 30;

pub fn db_path() -> std::path::PathBuf {
    if let Ok(path) = std::env::var("CAISHEN_DB") {
        return std::path::PathBuf::from(path);
    }
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("caishen.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

fn row_numbers(
    red: [u8; 5],
    red_6: Option<u8>,
    blue_1: u8,
    blue_2: Option<u8>,
) -> (Vec<u8>, Vec<u8>) {
    let mut reds: Vec<u8> = red.to_vec();
    if let Some(r) = red_6 {
        reds.push(r);
    }
    let mut blues = vec![blue_1];
    if let Some(b) = blue_2 {
        blues.push(b);
    }
    (reds, blues)
}

/// Remplace la sélection courante (non achetée) du jour du ticket.
pub fn save_current_pick(conn: &Connection, kind: LotteryKind, ticket: &Ticket) -> Result<()> {
    conn.execute(
        "DELETE FROM picks WHERE kind = ?1 AND date = ?2 AND purchased = 0",
        rusqlite::params![kind.as_str(), ticket.date],
    )
    .context("Échec de la purge de la sélection courante")?;

    conn.execute(
        "INSERT INTO picks (kind, date, red_1, red_2, red_3, red_4, red_5, red_6, blue_1, blue_2, purchased)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            kind.as_str(),
            ticket.date,
            ticket.red[0],
            ticket.red[1],
            ticket.red[2],
            ticket.red[3],
            ticket.red[4],
            ticket.red.get(5).copied(),
            ticket.blue[0],
            ticket.blue.get(1).copied(),
            ticket.purchased as i32,
        ],
    )
    .context("Échec de l'insertion de la sélection")?;
    Ok(())
}

/// Sélection courante (non achetée) pour une date donnée.
pub fn current_pick(conn: &Connection, kind: LotteryKind, date: &str) -> Result<Option<Ticket>> {
    let mut stmt = conn.prepare(
        "SELECT date, red_1, red_2, red_3, red_4, red_5, red_6, blue_1, blue_2, purchased
         FROM picks WHERE kind = ?1 AND date = ?2 AND purchased = 0
         ORDER BY id DESC LIMIT 1",
    )?;
    let mut rows = stmt.query_map(rusqlite::params![kind.as_str(), date], map_ticket_row)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

fn map_ticket_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ticket> {
    let red = [
        row.get::<_, u8>(1)?,
        row.get::<_, u8>(2)?,
        row.get::<_, u8>(3)?,
        row.get::<_, u8>(4)?,
        row.get::<_, u8>(5)?,
    ];
    let red_6: Option<u8> = row.get(6)?;
    let blue_1: u8 = row.get(7)?;
    let blue_2: Option<u8> = row.get(8)?;
    let (red, blue) = row_numbers(red, red_6, blue_1, blue_2);
    Ok(Ticket {
        red,
        blue,
        date: row.get(0)?,
        purchased: row.get::<_, i32>(9)? != 0,
    })
}

/// Marque la sélection du jour comme achetée : elle bascule dans
/// l'historique personnel. Retourne false si rien n'était à marquer.
pub fn mark_purchased(conn: &Connection, kind: LotteryKind, date: &str) -> Result<bool> {
    let changed = conn
        .execute(
            "UPDATE picks SET purchased = 1 WHERE kind = ?1 AND date = ?2 AND purchased = 0",
            rusqlite::params![kind.as_str(), date],
        )
        .context("Échec du marquage d'achat")?;
    Ok(changed > 0)
}

/// Historique acheté, du plus récent au plus ancien.
pub fn fetch_history(conn: &Connection, kind: LotteryKind, limit: u32) -> Result<Vec<Ticket>> {
    let mut stmt = conn.prepare(
        "SELECT date, red_1, red_2, red_3, red_4, red_5, red_6, blue_1, blue_2, purchased
         FROM picks WHERE kind = ?1 AND purchased = 1
         ORDER BY date DESC, id DESC LIMIT ?2",
    )?;
    let tickets = stmt
        .query_map(rusqlite::params![kind.as_str(), limit], map_ticket_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tickets)
}

pub fn count_picks(conn: &Connection, kind: LotteryKind) -> Result<u32> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM picks WHERE kind = ?1",
        [kind.as_str()],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Purge des données périmées : sélections non achetées d'un autre jour,
/// historique au-delà de la rétention, et au-delà du plafond d'entrées.
/// Retourne le nombre de lignes supprimées.
pub fn prune_expired(conn: &Connection, kind: LotteryKind) -> Result<usize> {
    let today = today_string();
    let cutoff = days_ago_string(RETENTION_DAYS);

    let mut removed = conn.execute(
        "DELETE FROM picks WHERE kind = ?1 AND purchased = 0 AND date != ?2",
        rusqlite::params![kind.as_str(), today],
    )?;
    removed += conn.execute(
        "DELETE FROM picks WHERE kind = ?1 AND purchased = 1 AND date < ?2",
        rusqlite::params![kind.as_str(), cutoff],
    )?;
    removed += conn.execute(
        "DELETE FROM picks WHERE kind = ?1 AND purchased = 1 AND id NOT IN (
             SELECT id FROM picks WHERE kind = ?1 AND purchased = 1
             ORDER BY date DESC, id DESC LIMIT ?2
         )",
        rusqlite::params![kind.as_str(), HISTORY_LIMIT],
    )?;
    Ok(removed)
}

/// Insère ou rafraîchit un tirage officiel (clé : loterie + période).
pub fn upsert_drawing(conn: &Connection, kind: LotteryKind, drawing: &DrawingResult) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO drawings (kind, period, date, red_1, red_2, red_3, red_4, red_5, red_6, blue_1, blue_2)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            kind.as_str(),
            drawing.period,
            drawing.date,
            drawing.red[0],
            drawing.red[1],
            drawing.red[2],
            drawing.red[3],
            drawing.red[4],
            drawing.red.get(5).copied(),
            drawing.blue[0],
            drawing.blue.get(1).copied(),
        ],
    )
    .context("Échec de l'insertion du tirage")?;
    Ok(())
}

/// Tirages officiels en cache, période la plus récente d'abord.
pub fn fetch_drawings(conn: &Connection, kind: LotteryKind, limit: u32) -> Result<Vec<DrawingResult>> {
    let mut stmt = conn.prepare(
        "SELECT period, date, red_1, red_2, red_3, red_4, red_5, red_6, blue_1, blue_2
         FROM drawings WHERE kind = ?1
         ORDER BY period DESC LIMIT ?2",
    )?;
    let drawings = stmt
        .query_map(rusqlite::params![kind.as_str(), limit], |row| {
            let red = [
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, u8>(5)?,
                row.get::<_, u8>(6)?,
            ];
            let red_6: Option<u8> = row.get(7)?;
            let blue_1: u8 = row.get(8)?;
            let blue_2: Option<u8> = row.get(9)?;
            let (red, blue) = row_numbers(red, red_6, blue_1, blue_2);
            Ok(DrawingResult {
                period: row.get(0)?,
                date: row.get(1)?,
                red,
                blue,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(drawings)
}

/// Loteries présentes dans la table des sélections.
pub fn kinds_with_picks(conn: &Connection) -> Result<Vec<LotteryKind>> {
    let mut stmt = conn.prepare("SELECT DISTINCT kind FROM picks ORDER BY kind")?;
    let kinds = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    kinds
        .iter()
        .map(|s| LotteryKind::from_str(s))
        .collect::<Result<Vec<_>>>()
}
