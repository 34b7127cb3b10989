use serde::{Deserialize, Serialize};

/// 营业时间 (weekday索引 0=周日, open/close 为 "HH:MM" 24小时制)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHours {
    pub days: Vec<u8>,
    pub open: String,
    pub close: String,
}

/// 修车师傅/车行记录 (静态roster, 匹配期间只读)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mechanic {
    pub id: String,
    pub name: String,
    pub area: String,
    pub county: String,
    #[serde(default)]
    pub phones: Vec<String>,
    /// 缺失或格式错误按"不营业"处理, 不报错
    #[serde(default)]
    pub hours: Option<OpeningHours>,
    #[serde(default)]
    pub services: Vec<String>,
    /// 评分 0-5, 缺失视为 0 (无加分)
    #[serde(default)]
    pub rating: Option<f64>,
    /// 已完成工单数, 缺失视为 0
    #[serde(default)]
    pub jobs: Option<u32>,
    #[serde(default)]
    pub response_mins: Option<u32>,
    #[serde(default)]
    pub travel_km: Option<u32>,
}
