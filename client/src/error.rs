use std::fmt;

// =========================================================
// 错误类别枚举
// =========================================================

/// 错误类别
///
/// 界面层对所有类别一视同仁（只展示消息），类别仅用于日志与测试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 请求未能到达服务端（断网、CORS、DNS 等）
    Network,
    /// 服务端返回了非 2xx 状态码
    Status,
    /// 2xx 响应体无法解析为期望的类型
    Decode,
    /// 请求体序列化失败
    Serialization,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Status => "HTTP_STATUS",
            ApiErrorKind::Decode => "RESPONSE_DECODE_ERROR",
            ApiErrorKind::Serialization => "REQUEST_ENCODE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 边界层的统一错误
///
/// - kind: 错误类别
/// - message: 面向用户的消息（`Display` 只输出它）
/// - status: 服务端状态码（仅 `Status` 类别有值）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Status,
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Serialization, message)
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status
    }

    /// 服务端拒绝了凭据（401）
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
