use crate::models::{DrawingResult, LotteryKind, PrizeTier, Ticket};

// Barèmes officiels : (rouges concordants, bleus concordants) -> rang.
// Première règle concordante retenue, toute autre combinaison est perdante.
// Les deux tables sont indépendantes — aucune formule commune n'existe.

const SSQ_TABLE: &[(usize, usize, PrizeTier)] = &[
    (6, 1, PrizeTier::First),
    (6, 0, PrizeTier::Second),
    (5, 1, PrizeTier::Third),
    (5, 0, PrizeTier::Fourth),
    (4, 1, PrizeTier::Fourth),
    (4, 0, PrizeTier::Fifth),
    (3, 1, PrizeTier::Fifth),
    (2, 1, PrizeTier::Sixth),
    (1, 1, PrizeTier::Sixth),
    (0, 1, PrizeTier::Sixth),
];

const DLT_TABLE: &[(usize, usize, PrizeTier)] = &[
    (5, 2, PrizeTier::First),
    (5, 1, PrizeTier::Second),
    (5, 0, PrizeTier::Third),
    (4, 2, PrizeTier::Fourth),
    (4, 1, PrizeTier::Fifth),
    (3, 2, PrizeTier::Sixth),
    (4, 0, PrizeTier::Seventh),
    (3, 1, PrizeTier::Eighth),
    (2, 2, PrizeTier::Eighth),
    (3, 0, PrizeTier::Ninth),
    (1, 2, PrizeTier::Ninth),
    (2, 1, PrizeTier::Ninth),
    (0, 2, PrizeTier::Ninth),
];

fn table_for(kind: LotteryKind) -> &'static [(usize, usize, PrizeTier)] {
    match kind {
        LotteryKind::Ssq => SSQ_TABLE,
        LotteryKind::Dlt => DLT_TABLE,
    }
}

/// Cardinal de l'intersection, indépendant des positions.
fn match_count(mine: &[u8], drawn: &[u8]) -> usize {
    mine.iter().filter(|n| drawn.contains(n)).count()
}

/// Classe un ticket face à un tirage officiel. Une entrée absente n'est
/// pas une erreur : aucun numéro personnel pour cette date, donc aucun
/// gain.
pub fn classify(
    ticket: Option<&Ticket>,
    drawing: Option<&DrawingResult>,
    kind: LotteryKind,
) -> Option<PrizeTier> {
    let (ticket, drawing) = match (ticket, drawing) {
        (Some(t), Some(d)) => (t, d),
        _ => return None,
    };

    let red_matches = match_count(&ticket.red, &drawing.red);
    let blue_matches = match_count(&ticket.blue, &drawing.blue);

    table_for(kind)
        .iter()
        .find(|&&(r, b, _)| r == red_matches && b == blue_matches)
        .map(|&(_, _, tier)| tier)
}
