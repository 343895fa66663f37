use std::time::Duration;
use thiserror::Error;

/// 应用程序错误类型
///
/// 每个错误只作用于触发它的那一次操作，没有"致命"错误。
#[derive(Debug, Error)]
pub enum AppError {
    /// 网络 / 解析错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 表单校验错误（不会发到网络）
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 鉴权失败（401 / 403 或缺少管理员会话）
    #[error("鉴权错误: {0}")]
    Auth(#[from] AuthError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 会话锁在另一个线程 panic 后不可用
    #[error("会话状态不可用")]
    SessionPoisoned,
}

/// 后端 API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非 2xx 响应
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 未配置后端地址
    #[error("未配置后端地址")]
    MissingBaseUrl,
}

/// 表单校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} 不能为空")]
    Required { field: &'static str },
    #[error("邮箱格式不正确: {value}")]
    InvalidEmail { value: String },
    #[error("手机号格式不正确: {value}")]
    InvalidPhone { value: String },
    #[error("两次输入的密码不一致")]
    PasswordMismatch,
    #[error("密码长度至少为 {min} 位")]
    PasswordTooShort { min: usize },
    #[error("请先完成人机验证")]
    MissingCaptcha,
}

/// 鉴权错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// 后端返回 401
    #[error("登录已失效 ({endpoint})")]
    Unauthorized { endpoint: String },
    /// 后端返回 403
    #[error("无权访问 ({endpoint})")]
    Forbidden { endpoint: String },
    /// 本地没有管理员会话
    #[error("未登录管理员账号")]
    NotSignedIn,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("会话文件解析失败 ({path}): {source}")]
    SessionParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 鉴权失败后的处理方式：延迟一段时间后跳转到登录页
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRedirect {
    pub route: String,
    pub delay: Duration,
}

// ========== 便捷方法 ==========

impl AppError {
    /// 是否为鉴权失败
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }

    /// 鉴权失败时给出跳转指令，其余错误返回 None
    pub fn redirect(&self, login_route: &str, delay: Duration) -> Option<AuthRedirect> {
        self.is_auth_failure().then(|| AuthRedirect {
            route: login_route.to_string(),
            delay,
        })
    }

    /// 用于页面横幅展示的文案
    pub fn banner(&self) -> String {
        match self {
            AppError::Api(ApiError::BadResponse {
                message: Some(msg), ..
            }) => msg.clone(),
            AppError::Api(_) => "网络异常，请稍后再试".to_string(),
            AppError::Validation(e) => e.to_string(),
            AppError::Auth(_) => "登录已失效，即将跳转到登录页".to_string(),
            other => other.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
