use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub roster: RosterConfig,
    pub matcher: MatcherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// roster JSON 文件路径, 未设置则用内置数据
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// 提交响应中返回的匹配条数
    pub top_n: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            roster: RosterConfig { path: None },
            matcher: MatcherConfig { top_n: 3 },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            roster: RosterConfig {
                path: std::env::var("ROSTER_FILE").ok(),
            },
            matcher: MatcherConfig {
                top_n: std::env::var("MATCH_TOP_N")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(3),
            },
        }
    }
}
