use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 求助位置 (县 + 城市/区域)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub city: String,
}

/// 车辆描述
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: String,
}

/// 用户提交的维修求助请求, 创建后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub vehicle: Vehicle,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_urgency")]
    pub urgency: String,
    #[serde(default = "default_contact")]
    pub contact: String,
    #[serde(default)]
    pub phone: String,
}

fn default_urgency() -> String {
    "standard".to_string()
}

fn default_contact() -> String {
    "call".to_string()
}

/// 字段级校验错误
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// 电话号码规范化: 只保留数字和 '+'
pub fn normalize_phone(v: &str) -> String {
    v.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

impl ServiceRequest {
    /// 提交时校验: 必填字段非空, 电话数字位数 >= 7, year 可解析为数字
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let required: [(&str, &str); 4] = [
            ("county", &self.location.county),
            ("category", &self.category),
            ("description", &self.description),
            ("phone", &self.phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, "This field is required."));
            }
        }

        let phone = self.phone.trim();
        if !phone.is_empty() {
            let digits = normalize_phone(phone).chars().filter(|c| c.is_ascii_digit()).count();
            if digits < 7 {
                errors.push(FieldError::new("phone", "Enter a valid phone number."));
            }
        }

        let year = self.vehicle.year.trim();
        if !year.is_empty() && year.parse::<f64>().map_or(true, |n| !n.is_finite()) {
            errors.push(FieldError::new("year", "Enter a valid number."));
        }

        errors
    }
}

/// 收件箱条目: 请求 + 分配的ID和创建时间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRequest {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub request: ServiceRequest,
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

impl StoredRequest {
    /// 分配ID并打上时间戳 (格式: r-<毫秒base36>-<4位随机base36>)
    pub fn assign(request: ServiceRequest) -> Self {
        let now = Utc::now();
        let millis = now.timestamp_millis().max(0) as u128;
        let mut rng = rand::rng();
        let suffix: String = (0..4)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect();
        Self {
            id: format!("r-{}-{}", to_base36(millis), suffix),
            created_at: now,
            request,
        }
    }

    /// 请求的纯文本渲染 (用于"复制请求"导出)
    pub fn to_text(&self) -> String {
        let req = &self.request;
        let location = [req.location.city.as_str(), req.location.county.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let car = [
            req.vehicle.make.as_str(),
            req.vehicle.model.as_str(),
            req.vehicle.year.as_str(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

        [
            format!("Request ID: {}", self.id),
            format!("Created: {}", self.created_at.format("%Y-%m-%d %H:%M:%S")),
            format!("Location: {}", location),
            format!("Car: {}", car),
            format!("Category: {}", req.category),
            format!("Urgency: {}", req.urgency),
            format!("Contact: {}", req.contact),
            format!("Phone: {}", req.phone),
            format!("Description: {}", req.description),
        ]
        .join("\n")
    }

    /// 描述预览 (收件箱列表用, 截取前 max 个字符)
    pub fn preview(&self, max: usize) -> String {
        self.request.description.chars().take(max).collect()
    }
}
