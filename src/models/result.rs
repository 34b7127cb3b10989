use crate::models::Mechanic;
use serde::{Deserialize, Serialize};

/// 匹配结果条目: roster记录 + 排名分数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMechanic {
    pub score: i64,
    pub open_now: bool,
    pub mechanic: Mechanic,
}

/// 单次匹配统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStats {
    pub roster_size: usize,
    pub returned: usize,
    pub top_score: Option<i64>,
    pub open_now_count: usize,
}
