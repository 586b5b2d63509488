//! 会话 Cookie 的生成与读取
//!
//! Token 同时写入一个 `token` Cookie（根路径，固定有效期），供路由守卫检查。

use wms_shared::TOKEN_COOKIE;

/// 写入会话 Cookie 的字符串，形如 `token=<t>; path=/; max-age=86400`
pub fn session_cookie(token: &str, max_age_secs: u64) -> String {
    format!("{}={}; path=/; max-age={}", TOKEN_COOKIE, token, max_age_secs)
}

/// 立即过期的会话 Cookie，用于注销
pub fn expired_session_cookie() -> String {
    format!("{}=; path=/; max-age=0", TOKEN_COOKIE)
}

/// 从 Cookie 头（`a=1; b=2`）中读取指定名称的值
pub fn read<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

/// 会话 Cookie 是否存在且非空
pub fn has_session(header: &str) -> bool {
    read(header, TOKEN_COOKIE).is_some_and(|v| !v.is_empty())
}

/// 解析后的 Set-Cookie 写入指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieWrite {
    pub name: String,
    pub value: String,
    pub max_age: Option<u64>,
}

impl CookieWrite {
    /// 解析 `document.cookie = ...` 形式的写入字符串
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        let max_age = parts
            .filter_map(|attr| attr.trim().split_once('='))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("max-age"))
            .and_then(|(_, v)| v.trim().parse().ok());

        Some(Self {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
            max_age,
        })
    }

    /// 该写入是否会删除 Cookie
    pub fn is_removal(&self) -> bool {
        self.max_age == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_cookie_among_others() {
        let header = "theme=dark; token=abc.def; lang=en";
        assert_eq!(read(header, "token"), Some("abc.def"));
        assert_eq!(read(header, "missing"), None);
        assert!(has_session(header));
        assert!(!has_session("token="));
        assert!(!has_session(""));
    }

    #[test]
    fn session_cookie_round_trips_through_parser() {
        let write = CookieWrite::parse(&session_cookie("t0k", 86_400)).unwrap();
        assert_eq!(write.name, "token");
        assert_eq!(write.value, "t0k");
        assert_eq!(write.max_age, Some(86_400));
        assert!(!write.is_removal());

        let expired = CookieWrite::parse(&expired_session_cookie()).unwrap();
        assert!(expired.is_removal());
    }
}
