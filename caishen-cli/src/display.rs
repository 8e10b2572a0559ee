use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use caishen_core::date::format_date_short;
use caishen_core::models::{DrawingResult, LotteryKind, PrizeTier, Ticket};

use crate::zodiac::ZodiacCalendar;

fn format_balls(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Ligne au format presse-papiers du popup : « 07 09 11 | 15 ».
pub fn copy_line(ticket: &Ticket) -> String {
    let red = ticket
        .red
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ");
    let blue = ticket
        .blue
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} | {}", red, blue)
}

pub fn display_ticket(kind: LotteryKind, ticket: &Ticket) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Rouges", "Bleus", "Statut"]);

    let status = if ticket.purchased {
        Cell::new("已购买 ★").fg(Color::Yellow)
    } else {
        Cell::new("未购买")
    };

    table.add_row(vec![
        Cell::new(&ticket.date),
        Cell::new(format_balls(&ticket.red)).fg(Color::Red),
        Cell::new(format_balls(&ticket.blue)).fg(Color::Blue),
        status,
    ]);

    println!("\n🎫 {} — sélection du jour\n", kind.display_name());
    println!("{table}");
    println!("Presse-papiers : {}", copy_line(ticket));
}

pub fn display_history(kind: LotteryKind, history: &[Ticket]) {
    if history.is_empty() {
        println!("Aucun historique pour {}.", kind.display_name());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Rouges", "Bleus"]);

    for ticket in history {
        table.add_row(vec![
            Cell::new(&ticket.date),
            Cell::new(format_balls(&ticket.red)).fg(Color::Red),
            Cell::new(format_balls(&ticket.blue)).fg(Color::Blue),
        ]);
    }

    println!("\n★ {} — historique acheté\n", kind.display_name());
    println!("{table}");
}

pub fn display_drawings(kind: LotteryKind, drawings: &[DrawingResult]) {
    if drawings.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Période", "Date", "Rouges", "Bleus"]);

    for drawing in drawings {
        table.add_row(vec![
            Cell::new(drawing.period),
            Cell::new(&drawing.date),
            Cell::new(format_balls(&drawing.red)).fg(Color::Red),
            Cell::new(format_balls(&drawing.blue)).fg(Color::Blue),
        ]);
    }

    println!("\n🏮 {} — tirages officiels\n", kind.display_name());
    println!("{table}");
}

/// Comparaison d'un ticket personnel avec un tirage : une ligne par paire
/// retenue, rang de gain colorisé.
pub struct CheckRow<'a> {
    pub ticket: &'a Ticket,
    pub drawing: &'a DrawingResult,
    pub prize: Option<PrizeTier>,
}

pub fn display_check(kind: LotteryKind, rows: &[CheckRow<'_>]) {
    if rows.is_empty() {
        println!(
            "Rien à comparer pour {} : aucun numéro personnel dans la fenêtre des tirages.",
            kind.display_name()
        );
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Période",
            "Tirage",
            "Mes numéros",
            "Date",
            "Gain",
        ]);

    let mut winners = 0;
    for row in rows {
        let prize_cell = match row.prize {
            Some(tier) => {
                winners += 1;
                Cell::new(tier.label(kind)).fg(Color::Green)
            }
            None => Cell::new("—").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(row.drawing.period),
            Cell::new(format!(
                "{} + {}",
                format_balls(&row.drawing.red),
                format_balls(&row.drawing.blue)
            )),
            Cell::new(format!(
                "{} + {}",
                format_balls(&row.ticket.red),
                format_balls(&row.ticket.blue)
            )),
            Cell::new(format_date_short(&row.ticket.date)),
            prize_cell,
        ]);
    }

    println!("\n🧧 {} — mes numéros face aux tirages\n", kind.display_name());
    println!("{table}");
    if winners > 0 {
        println!("{} gain(s) sur {} comparaison(s).", winners, rows.len());
    } else {
        println!("Aucun gain sur {} comparaison(s).", rows.len());
    }
}

pub fn display_zodiac(calendar: &ZodiacCalendar) {
    let zodiac = calendar.zodiac();
    println!("\n{} 年份生肖 : {}", zodiac.icon, zodiac.name);
    println!("农历 : {}", calendar.year_name());
    println!("{}", calendar.almanac_line());
}
