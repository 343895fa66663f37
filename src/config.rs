use crate::error::{AppResult, ConfigError};
use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 REST 地址，为空时使用离线目录快照
    pub api_base_url: String,
    /// 管理端接口使用的 bearer token（可选）
    pub api_token: Option<String>,
    /// 请求超时（秒），0 表示使用 reqwest 默认行为
    pub request_timeout_secs: u64,
    /// 离线目录快照（TOML）
    pub catalog_file: String,
    /// 会话文件
    pub session_file: String,
    /// 视口宽度（像素），用于计算每屏展示数量
    pub viewport_width: u32,
    /// 宽屏下每屏展示数量（3 或 4，视区块而定）
    pub wide_items_per_view: usize,
    /// 管理端表格每页条数
    pub page_size: usize,
    /// 鉴权失败后跳转登录页前的等待时间（毫秒）
    pub auth_redirect_delay_ms: u64,
    /// 管理员登录页路由
    pub login_route: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 筛选输入 ---
    pub search_keyword: String,
    pub search_provider: String,
    pub search_categories: Vec<String>,
    pub min_questions: u32,
    pub route_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            api_token: None,
            request_timeout_secs: 0,
            catalog_file: "data/catalog.toml".to_string(),
            session_file: ".session.json".to_string(),
            viewport_width: 1280,
            wide_items_per_view: 3,
            page_size: 10,
            auth_redirect_delay_ms: 2000,
            login_route: "/admin/login".to_string(),
            verbose_logging: false,
            search_keyword: String::new(),
            search_provider: "all".to_string(),
            search_categories: Vec::new(),
            min_questions: 0,
            route_path: String::new(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值回退为默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            api_token: std::env::var("API_TOKEN").ok().filter(|v| !v.is_empty()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            catalog_file: std::env::var("CATALOG_FILE").unwrap_or(default.catalog_file),
            session_file: std::env::var("SESSION_FILE").unwrap_or(default.session_file),
            viewport_width: std::env::var("VIEWPORT_WIDTH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.viewport_width),
            wide_items_per_view: std::env::var("WIDE_ITEMS_PER_VIEW").ok().and_then(|v| v.parse().ok()).unwrap_or(default.wide_items_per_view),
            page_size: std::env::var("PAGE_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.page_size),
            auth_redirect_delay_ms: std::env::var("AUTH_REDIRECT_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.auth_redirect_delay_ms),
            login_route: std::env::var("LOGIN_ROUTE").unwrap_or(default.login_route),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            search_keyword: std::env::var("SEARCH_KEYWORD").unwrap_or(default.search_keyword),
            search_provider: std::env::var("SEARCH_PROVIDER").unwrap_or(default.search_provider),
            search_categories: std::env::var("SEARCH_CATEGORIES").map(|v| split_list(&v)).unwrap_or(default.search_categories),
            min_questions: std::env::var("MIN_QUESTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.min_questions),
            route_path: std::env::var("ROUTE_PATH").unwrap_or(default.route_path),
        }
    }

    /// 严格模式：数值类环境变量存在但无法解析时返回错误
    pub fn try_from_env() -> AppResult<Self> {
        let mut config = Self::from_env();
        config.request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", "u64")?.unwrap_or(config.request_timeout_secs);
        config.viewport_width = parse_var("VIEWPORT_WIDTH", "u32")?.unwrap_or(config.viewport_width);
        config.wide_items_per_view = parse_var("WIDE_ITEMS_PER_VIEW", "usize")?.unwrap_or(config.wide_items_per_view);
        config.page_size = parse_var("PAGE_SIZE", "usize")?.unwrap_or(config.page_size);
        config.auth_redirect_delay_ms = parse_var("AUTH_REDIRECT_DELAY_MS", "u64")?.unwrap_or(config.auth_redirect_delay_ms);
        config.verbose_logging = parse_var("VERBOSE_LOGGING", "bool")?.unwrap_or(config.verbose_logging);
        config.min_questions = parse_var("MIN_QUESTIONS", "u32")?.unwrap_or(config.min_questions);
        Ok(config)
    }

    /// 是否配置了后端地址
    pub fn has_backend(&self) -> bool {
        !self.api_base_url.trim().is_empty()
    }
}

fn parse_var<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}

/// 逗号分隔的列表，忽略空项
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_skips_blanks() {
        assert_eq!(
            split_list(" Cloud, ,Security,"),
            vec!["Cloud".to_string(), "Security".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_default_has_no_backend() {
        let config = Config::default();
        assert!(!config.has_backend());
        assert_eq!(config.search_provider, "all");
    }
}
