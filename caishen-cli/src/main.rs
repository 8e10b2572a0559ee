mod display;
mod fetch;
mod zodiac;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use caishen_core::date::{days_between, is_today, today_string};
use caishen_core::generator::generate_for_date;
use caishen_core::models::LotteryKind;
use caishen_core::prize::classify;
use caishen_db::db::{
    count_picks, current_pick, db_path, fetch_drawings, fetch_history, kinds_with_picks,
    mark_purchased, migrate, open_db, prune_expired, save_current_pick, upsert_drawing,
};
use caishen_db::rusqlite::Connection;

use crate::display::{
    copy_line, display_check, display_drawings, display_history, display_ticket, display_zodiac,
    CheckRow,
};
use crate::zodiac::ZodiacCalendar;

#[derive(Parser)]
#[command(
    name = "caishen",
    about = "Assistant quotidien pour les loteries chinoises 双色球 et 大乐透"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Afficher (ou générer) la sélection du jour
    Today {
        /// Loterie visée
        #[arg(value_enum)]
        kind: LotteryKind,
    },

    /// Marquer la sélection du jour comme achetée
    Buy {
        #[arg(value_enum)]
        kind: LotteryKind,
    },

    /// Historique personnel des sélections achetées
    History {
        #[arg(value_enum)]
        kind: LotteryKind,

        /// Nombre d'entrées à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Récupérer et mettre en cache les derniers tirages officiels
    Results {
        #[arg(value_enum)]
        kind: LotteryKind,
    },

    /// Comparer l'historique personnel aux tirages en cache
    Check {
        /// Loterie visée (toutes par défaut)
        #[arg(value_enum)]
        kind: Option<LotteryKind>,
    },

    /// Panneau zodiaque et calendrier lunaire du jour
    Zodiac,

    /// Afficher le chemin de la base de données
    DbPath,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Today { kind } => cmd_today(&conn, kind),
        Command::Buy { kind } => cmd_buy(&conn, kind),
        Command::History { kind, last } => cmd_history(&conn, kind, last),
        Command::Results { kind } => cmd_results(&conn, kind),
        Command::Check { kind } => cmd_check(&conn, kind),
        Command::Zodiac => {
            let calendar = ZodiacCalendar::today();
            display_zodiac(&calendar);
            Ok(())
        }
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn cmd_today(conn: &Connection, kind: LotteryKind) -> Result<()> {
    prune_expired(conn, kind)?;
    let today = today_string();

    let ticket = match current_pick(conn, kind, &today)? {
        Some(existing) => existing,
        None => {
            // La génération est déterministe par date : relancer la
            // commande redonne les mêmes numéros.
            let fresh = generate_for_date(kind, &today)?;
            save_current_pick(conn, kind, &fresh)?;
            fresh
        }
    };

    display_ticket(kind, &ticket);
    Ok(())
}

fn cmd_buy(conn: &Connection, kind: LotteryKind) -> Result<()> {
    prune_expired(conn, kind)?;
    let today = today_string();

    if mark_purchased(conn, kind, &today)? {
        let history = fetch_history(conn, kind, 1)?;
        if let Some(ticket) = history.first() {
            println!("Sélection du {} marquée comme achetée. ★", today);
            println!("Presse-papiers : {}", copy_line(ticket));
        }
        return Ok(());
    }

    let history = fetch_history(conn, kind, 1)?;
    match history.first() {
        Some(ticket) if is_today(&ticket.date) => {
            println!("Déjà achetée aujourd'hui.");
            println!("Presse-papiers : {}", copy_line(ticket));
        }
        _ => println!(
            "Aucune sélection à acheter. Lancez d'abord : caishen today {}",
            kind
        ),
    }
    Ok(())
}

fn cmd_history(conn: &Connection, kind: LotteryKind, last: u32) -> Result<()> {
    prune_expired(conn, kind)?;
    if count_picks(conn, kind)? == 0 {
        println!(
            "Aucune sélection enregistrée. Lancez d'abord : caishen today {}",
            kind
        );
        return Ok(());
    }
    let history = fetch_history(conn, kind, last)?;
    display_history(kind, &history);
    Ok(())
}

fn cmd_results(conn: &Connection, kind: LotteryKind) -> Result<()> {
    let drawings = fetch::fetch_recent(kind);
    for drawing in &drawings {
        upsert_drawing(conn, kind, drawing)?;
    }
    display_drawings(kind, &drawings);
    Ok(())
}

fn cmd_check(conn: &Connection, kind: Option<LotteryKind>) -> Result<()> {
    let kinds = match kind {
        Some(k) => vec![k],
        None => kinds_with_picks(conn)?,
    };
    if kinds.is_empty() {
        println!("Aucune sélection enregistrée. Lancez d'abord : caishen today <loterie>");
        return Ok(());
    }

    for kind in kinds {
        let drawings = fetch_drawings(conn, kind, 5)?;
        if drawings.is_empty() {
            println!(
                "Aucun tirage en cache pour {}. Lancez d'abord : caishen results {}",
                kind.display_name(),
                kind
            );
            continue;
        }

        let history = fetch_history(conn, kind, 10)?;
        let mut rows = Vec::new();
        for drawing in &drawings {
            // Fenêtre du popup : sélections datées de 0 à 7 jours avant
            // le tirage, 3 au plus par période.
            let mut kept = 0;
            for ticket in &history {
                let in_window = matches!(
                    days_between(&ticket.date, &drawing.date),
                    Some(diff) if (0..=7).contains(&diff)
                );
                if !in_window {
                    continue;
                }
                if kept == 3 {
                    break;
                }
                kept += 1;
                rows.push(CheckRow {
                    ticket,
                    drawing,
                    prize: classify(Some(ticket), Some(drawing), kind),
                });
            }
        }
        display_check(kind, &rows);
    }
    Ok(())
}
