use crate::models::{Mechanic, OpeningHours};
use serde::Deserialize;
use std::fs;
use tracing::{info, warn};

/// roster 文件两种形态: 裸数组或 { "mechanics": [...] }
#[derive(Deserialize)]
#[serde(untagged)]
enum RosterFile {
    Bare(Vec<Mechanic>),
    Wrapped { mechanics: Vec<Mechanic> },
}

/// 内置roster (爱尔兰四家车行), 文件加载失败时的兜底数据
pub fn builtin_roster() -> Vec<Mechanic> {
    vec![
        Mechanic {
            id: "kells-001".to_string(),
            name: "Kells Mobile Mechanic".to_string(),
            area: "Kells".to_string(),
            county: "Meath".to_string(),
            phones: vec!["089 219 3220".to_string(), "089 499 3928".to_string()],
            hours: Some(OpeningHours {
                days: vec![1, 2, 3, 4, 5],
                open: "10:30".to_string(),
                close: "16:30".to_string(),
            }),
            services: vec![
                "engine".to_string(),
                "diagnostics".to_string(),
                "brakes".to_string(),
                "electrical".to_string(),
                "suspension".to_string(),
                "tyres".to_string(),
            ],
            rating: Some(4.8),
            jobs: Some(128),
            response_mins: Some(22),
            travel_km: Some(35),
        },
        Mechanic {
            id: "dublin-001".to_string(),
            name: "Dublin City Garage".to_string(),
            area: "Dublin".to_string(),
            county: "Dublin".to_string(),
            phones: vec!["01 555 0199".to_string()],
            hours: Some(OpeningHours {
                days: vec![1, 2, 3, 4, 5, 6],
                open: "08:30".to_string(),
                close: "18:00".to_string(),
            }),
            services: vec![
                "diagnostics".to_string(),
                "brakes".to_string(),
                "service".to_string(),
                "tyres".to_string(),
                "clutch".to_string(),
            ],
            rating: Some(4.6),
            jobs: Some(540),
            response_mins: Some(35),
            travel_km: Some(18),
        },
        Mechanic {
            id: "drogheda-001".to_string(),
            name: "Drogheda Auto Assist".to_string(),
            area: "Drogheda".to_string(),
            county: "Louth".to_string(),
            phones: vec!["041 555 0201".to_string()],
            hours: Some(OpeningHours {
                days: vec![1, 2, 3, 4, 5],
                open: "09:00".to_string(),
                close: "17:00".to_string(),
            }),
            services: vec![
                "engine".to_string(),
                "electrical".to_string(),
                "diagnostics".to_string(),
                "service".to_string(),
            ],
            rating: Some(4.7),
            jobs: Some(312),
            response_mins: Some(28),
            travel_km: Some(22),
        },
        Mechanic {
            id: "navan-001".to_string(),
            name: "Navan Workshop".to_string(),
            area: "Navan".to_string(),
            county: "Meath".to_string(),
            phones: vec!["046 555 0118".to_string()],
            hours: Some(OpeningHours {
                days: vec![1, 2, 3, 4, 5],
                open: "09:00".to_string(),
                close: "17:30".to_string(),
            }),
            services: vec![
                "brakes".to_string(),
                "suspension".to_string(),
                "tyres".to_string(),
                "service".to_string(),
            ],
            rating: Some(4.5),
            jobs: Some(220),
            response_mins: Some(45),
            travel_km: Some(28),
        },
    ]
}

fn read_roster_file(path: &str) -> Result<Vec<Mechanic>, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    let parsed: RosterFile = serde_json::from_str(&raw)?;
    Ok(match parsed {
        RosterFile::Bare(list) => list,
        RosterFile::Wrapped { mechanics } => mechanics,
    })
}

/// 加载roster: 优先读 JSON 文件, 失败或为空则回退到内置数据 (永不报错)
pub fn load_roster(path: Option<&str>) -> Vec<Mechanic> {
    if let Some(path) = path {
        match read_roster_file(path) {
            Ok(list) if !list.is_empty() => {
                info!("Loaded {} mechanics from {}", list.len(), path);
                return list;
            }
            Ok(_) => {
                warn!("Roster file {} is empty, falling back to builtin roster", path);
            }
            Err(e) => {
                warn!("Failed to load roster from {}: {}, falling back to builtin roster", path, e);
            }
        }
    }
    builtin_roster()
}
