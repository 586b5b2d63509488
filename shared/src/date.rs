//! 时间文本模块
//!
//! 服务端返回的 `created_at` 可能是 RFC 3339，也可能是 SQL 的
//! `YYYY-MM-DD HH:MM:SS` 格式。这里统一解析为 `NaiveDateTime` 并提供展示格式。

use chrono::{DateTime, NaiveDateTime};

const SQL_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 展示格式，例如 `01 May 2024 08:30`
pub const DISPLAY_FORMAT: &str = "%d %b %Y %H:%M";

/// 解析服务端时间文本
///
/// 带时区的时间按其自身偏移取本地时刻，不做时区换算。
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    SQL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// 转换为展示文本，解析失败时原样返回
pub fn display(s: &str) -> String {
    parse(s)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sql_and_rfc3339() {
        assert_eq!(display("2024-05-01 08:30:00"), "01 May 2024 08:30");
        assert_eq!(display("2024-05-01T08:30:00.000Z"), "01 May 2024 08:30");
        assert_eq!(display("2024-05-01T08:30:00+07:00"), "01 May 2024 08:30");
    }

    #[test]
    fn falls_back_to_raw_text() {
        assert_eq!(display("yesterday"), "yesterday");
        assert!(parse("").is_none());
    }
}
