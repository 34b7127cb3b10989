use crate::models::{MatchStats, Mechanic, ScoredMechanic, ServiceRequest};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};

/// 关键词辅助表: (自由文本关键词, 服务标签)
/// 关键词出现在 category 或 description 中且车行提供该服务时 +10
pub const KEYWORD_ASSIST: &[(&str, &str)] = &[
    ("brake", "brakes"),
    ("battery", "electrical"),
    ("start", "electrical"),
    ("engine", "engine"),
    ("oil", "engine"),
    ("noise", "diagnostics"),
    ("tyre", "tyres"),
    ("suspension", "suspension"),
    ("clutch", "clutch"),
];

fn norm(s: &str) -> String {
    s.to_lowercase().trim().to_string()
}

/// "HH:MM" -> 当日分钟数; 格式错误返回 None (1-2位小时, 恰好2位分钟)
pub fn time_to_minutes(hhmm: &str) -> Option<u32> {
    let (h, m) = hhmm.split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    Some(h * 60 + m)
}

/// `now` 时刻是否营业: 星期在 days 中 (0=周日) 且分钟数落在 [open, close] 闭区间.
/// hours 缺失或时间串解析失败一律按不营业处理.
pub fn is_open_at(mechanic: &Mechanic, now: &NaiveDateTime) -> bool {
    let Some(hours) = &mechanic.hours else {
        return false;
    };
    let day = now.weekday().num_days_from_sunday() as u8;
    if !hours.days.contains(&day) {
        return false;
    }
    let (Some(open), Some(close)) = (time_to_minutes(&hours.open), time_to_minutes(&hours.close))
    else {
        return false;
    };
    let cur = now.hour() * 60 + now.minute();
    cur >= open && cur <= close
}

/// 加权求和打分, 纯函数, 相同输入必得相同结果.
///
/// - 县完全匹配 +60, 否则车行县名包含请求县名 +35 (二选一, 方向固定)
/// - 城市/区域相等或互相包含 +25
/// - category 命中服务标签 +35
/// - 关键词辅助表每命中一条 +10
/// - 当前营业 +12, 否则 -4
/// - 评分加成 round(rating * 2), 工单量加成 min(12, jobs / 60)
pub fn score(mechanic: &Mechanic, request: &ServiceRequest, now: &NaiveDateTime) -> i64 {
    let mut score = 0i64;

    let county = norm(&request.location.county);
    let city = norm(&request.location.city);
    let m_county = norm(&mechanic.county);
    let m_area = norm(&mechanic.area);

    if !county.is_empty() && !m_county.is_empty() {
        if county == m_county {
            score += 60;
        } else if m_county.contains(&county) {
            score += 35;
        }
    }

    if !city.is_empty()
        && !m_area.is_empty()
        && (city == m_area || m_area.contains(&city) || city.contains(&m_area))
    {
        score += 25;
    }

    let cat = norm(&request.category);
    let desc = norm(&request.description);
    let services: Vec<String> = mechanic.services.iter().map(|s| norm(s)).collect();

    if !cat.is_empty() && services.iter().any(|s| *s == cat) {
        score += 35;
    }

    for (keyword, tag) in KEYWORD_ASSIST {
        let hit = (!cat.is_empty() && cat.contains(*keyword))
            || (!desc.is_empty() && desc.contains(*keyword));
        if hit && services.iter().any(|s| s == tag) {
            score += 10;
        }
    }

    if is_open_at(mechanic, now) {
        score += 12;
    } else {
        score -= 4;
    }

    let rating = mechanic.rating.unwrap_or(0.0);
    if rating != 0.0 {
        score += (rating * 2.0).round() as i64;
    }

    let jobs = mechanic.jobs.unwrap_or(0);
    if jobs != 0 {
        score += i64::min(12, (jobs / 60) as i64);
    }

    score
}

/// 对整个roster打分并按分数降序排列.
/// 稳定排序: 同分保持输入顺序. 不过滤, 展示层自行取 top-N.
pub fn rank(request: &ServiceRequest, roster: &[Mechanic], now: &NaiveDateTime) -> Vec<ScoredMechanic> {
    let mut ranked: Vec<ScoredMechanic> = roster
        .iter()
        .map(|m| ScoredMechanic {
            score: score(m, request, now),
            open_now: is_open_at(m, now),
            mechanic: m.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// 匹配服务: 持有只读roster, 每次提交独立完成一次排名
pub struct MatcherService {
    roster: Vec<Mechanic>,
    top_n: usize,
}

impl MatcherService {
    pub fn new(roster: Vec<Mechanic>, top_n: usize) -> Self {
        Self { roster, top_n }
    }

    pub fn roster_size(&self) -> usize {
        self.roster.len()
    }

    /// 按当前本地时间匹配
    pub fn match_request(&self, request: &ServiceRequest) -> (Vec<ScoredMechanic>, MatchStats) {
        let now = Local::now().naive_local();
        self.match_request_at(request, &now)
    }

    /// 显式传入时刻, 结果完全确定
    pub fn match_request_at(
        &self,
        request: &ServiceRequest,
        now: &NaiveDateTime,
    ) -> (Vec<ScoredMechanic>, MatchStats) {
        let ranked = rank(request, &self.roster, now);
        let open_now_count = ranked.iter().filter(|m| m.open_now).count();
        let top: Vec<ScoredMechanic> = ranked.into_iter().take(self.top_n).collect();

        let stats = MatchStats {
            roster_size: self.roster.len(),
            returned: top.len(),
            top_score: top.first().map(|m| m.score),
            open_now_count,
        };

        tracing::info!(
            "Matched request: county={} category={} returned={}/{} top_score={:?}",
            request.location.county,
            request.category,
            stats.returned,
            stats.roster_size,
            stats.top_score
        );

        (top, stats)
    }
}
