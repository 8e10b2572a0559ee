use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use caishen_core::models::{validate_numbers, DrawingResult, LotteryKind};

// Points d'accès officiels interrogés par le popup d'origine. Les deux
// renvoient les 5 dernières périodes.
const SSQ_URL: &str = "https://www.cwl.gov.cn/cwl_admin/front/cwlkj/search/kjxx/findDrawNotice?name=ssq&issueCount=5&issueStart=&issueEnd=&dayStart=&dayEnd=&pageNo=1&pageSize=5&week=&systemType=PC";
const DLT_URL: &str = "https://webapi.sporttery.cn/gateway/lottery/getHistoryPageListV1.qry?gameNo=85&provinceId=0&pageSize=5&isVerify=1&pageNo=1&termLimits=5";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("requête HTTP échouée : {0}")]
    Http(#[from] reqwest::Error),
    #[error("le serveur a répondu {status}")]
    Server { status: u16 },
    #[error("JSON invalide : {0}")]
    Json(#[from] serde_json::Error),
    #[error("charge utile inattendue : {0}")]
    Payload(String),
}

#[derive(Deserialize)]
struct SsqResponse {
    state: i32,
    #[serde(default)]
    result: Vec<SsqItem>,
}

#[derive(Deserialize)]
struct SsqItem {
    code: String,
    date: String,
    red: String,
    blue: String,
}

#[derive(Deserialize)]
struct DltResponse {
    success: bool,
    value: Option<DltValue>,
}

#[derive(Deserialize)]
struct DltValue {
    list: Vec<DltItem>,
}

#[derive(Deserialize)]
struct DltItem {
    #[serde(rename = "lotteryDrawNum")]
    draw_num: String,
    #[serde(rename = "lotteryDrawTime")]
    draw_time: String,
    #[serde(rename = "lotteryDrawResult")]
    draw_result: String,
}

/// Tirages récents, depuis le réseau si possible, sinon repli sur le jeu
/// statique embarqué. Le repli vit ici, jamais dans le coeur : l'appelant
/// reçoit toujours des tirages exploitables.
pub fn fetch_recent(kind: LotteryKind) -> Vec<DrawingResult> {
    match fetch_live(kind) {
        Ok(drawings) => {
            info!(count = drawings.len(), "tirages officiels récupérés");
            drawings
                .into_iter()
                .filter(|d| match validate_numbers(kind, &d.red, &d.blue) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(period = d.period, error = %e, "tirage invalide ignoré");
                        false
                    }
                })
                .collect()
        }
        Err(e) => {
            warn!(error = %e, "récupération échouée, repli sur les données statiques");
            fallback_data(kind)
        }
    }
}

fn fetch_live(kind: LotteryKind) -> Result<Vec<DrawingResult>, FetchError> {
    let url = match kind {
        LotteryKind::Ssq => SSQ_URL,
        LotteryKind::Dlt => DLT_URL,
    };
    info!(url, "récupération des tirages officiels");

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Server {
            status: status.as_u16(),
        });
    }
    let body = resp.text()?;

    match kind {
        LotteryKind::Ssq => parse_ssq(&body),
        LotteryKind::Dlt => parse_dlt(&body),
    }
}

fn parse_ssq(body: &str) -> Result<Vec<DrawingResult>, FetchError> {
    let resp: SsqResponse = serde_json::from_str(body)?;
    if resp.state != 0 {
        return Err(FetchError::Payload(format!("state = {}", resp.state)));
    }

    resp.result
        .iter()
        .take(5)
        .map(|item| {
            let period = item
                .code
                .parse()
                .map_err(|_| FetchError::Payload(format!("période illisible : '{}'", item.code)))?;
            // La date porte un suffixe jour de semaine : "2025-08-21(四)".
            let date = item
                .date
                .split('(')
                .next()
                .unwrap_or(&item.date)
                .trim()
                .to_string();
            let red = parse_numbers(&item.red, ',')?;
            let blue = parse_numbers(&item.blue, ',')?;
            Ok(DrawingResult {
                period,
                date,
                red,
                blue,
            })
        })
        .collect()
}

fn parse_dlt(body: &str) -> Result<Vec<DrawingResult>, FetchError> {
    let resp: DltResponse = serde_json::from_str(body)?;
    if !resp.success {
        return Err(FetchError::Payload("success = false".to_string()));
    }
    let value = resp
        .value
        .ok_or_else(|| FetchError::Payload("champ value absent".to_string()))?;

    value
        .list
        .iter()
        .take(5)
        .map(|item| {
            let period = item.draw_num.parse().map_err(|_| {
                FetchError::Payload(format!("période illisible : '{}'", item.draw_num))
            })?;
            // "04 09 17 30 33 05 09" : 5 rouges puis 2 bleus.
            let numbers = parse_numbers(&item.draw_result, ' ')?;
            if numbers.len() != 7 {
                return Err(FetchError::Payload(format!(
                    "7 numéros attendus, {} reçus",
                    numbers.len()
                )));
            }
            Ok(DrawingResult {
                period,
                date: item.draw_time.trim().to_string(),
                red: numbers[..5].to_vec(),
                blue: numbers[5..].to_vec(),
            })
        })
        .collect()
}

fn parse_numbers(raw: &str, sep: char) -> Result<Vec<u8>, FetchError> {
    raw.split(sep)
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(|n| {
            n.parse::<u8>()
                .map_err(|_| FetchError::Payload(format!("numéro illisible : '{}'", n)))
        })
        .collect()
}

/// Jeu de tirages embarqué, utilisé quand le réseau fait défaut.
pub fn fallback_data(kind: LotteryKind) -> Vec<DrawingResult> {
    let raw: &[(u32, &str, &[u8], &[u8])] = match kind {
        LotteryKind::Ssq => &[
            (2025096, "2025-08-21", &[7, 9, 11, 12, 16, 29], &[15]),
            (2025095, "2025-08-19", &[15, 16, 22, 23, 26, 32], &[4]),
            (2025094, "2025-08-17", &[11, 13, 17, 19, 23, 29], &[16]),
            (2025093, "2025-08-14", &[9, 11, 12, 24, 25, 26], &[10]),
            (2025092, "2025-08-12", &[2, 11, 14, 17, 23, 24], &[12]),
        ],
        LotteryKind::Dlt => &[
            (25094, "2025-08-18", &[4, 9, 17, 30, 33], &[5, 9]),
            (25093, "2025-08-15", &[7, 14, 20, 27, 33], &[5, 11]),
            (25092, "2025-08-13", &[2, 9, 16, 23, 30], &[1, 7]),
            (25091, "2025-08-10", &[4, 11, 17, 24, 32], &[6, 9]),
            (25090, "2025-08-08", &[6, 13, 19, 26, 35], &[2, 12]),
        ],
    };

    raw.iter()
        .map(|&(period, date, red, blue)| DrawingResult {
            period,
            date: date.to_string(),
            red: red.to_vec(),
            blue: blue.to_vec(),
        })
        .collect()
}
