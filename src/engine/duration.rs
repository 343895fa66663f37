//! 报名时长计算
//!
//! 仅用于展示：按 30 天一个月近似，四舍五入，最小为 0。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const MS_PER_DAY: f64 = 86_400_000.0;
const DAYS_PER_MONTH: f64 = 30.0;

/// 解析常见的日期格式，失败返回 None
///
/// 支持 `YYYY-MM-DD`、RFC 3339、`YYYY-MM-DDTHH:MM:SS`、`YYYY-MM-DD HH:MM:SS`。
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 两个日期之间的整月数
///
/// 任一日期缺失或无法解析时返回 0。
pub fn months_between(enrolled: Option<&str>, expiry: Option<&str>) -> u32 {
    let (Some(start), Some(end)) = (enrolled.and_then(parse_date), expiry.and_then(parse_date)) else {
        return 0;
    };

    let days = (end - start).num_milliseconds() as f64 / MS_PER_DAY;
    let months = (days / DAYS_PER_MONTH).round();
    if months <= 0.0 {
        0
    } else {
        months as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_is_three_months() {
        assert_eq!(months_between(Some("2024-01-01"), Some("2024-04-01")), 3);
    }

    #[test]
    fn test_invalid_or_missing_dates_are_zero() {
        assert_eq!(months_between(Some("not a date"), Some("2024-04-01")), 0);
        assert_eq!(months_between(None, Some("2024-04-01")), 0);
        assert_eq!(months_between(Some("2024-01-01"), Some("")), 0);
    }

    #[test]
    fn test_expiry_before_enrollment_floors_at_zero() {
        assert_eq!(months_between(Some("2024-06-01"), Some("2024-01-01")), 0);
    }

    #[test]
    fn test_rounding_and_formats() {
        // 44 天 ≈ 1.47 个月
        assert_eq!(months_between(Some("2024-01-01"), Some("2024-02-14")), 1);
        // 45 天 = 1.5 个月，四舍五入为 2
        assert_eq!(months_between(Some("2024-01-01"), Some("2024-02-15")), 2);
        assert_eq!(
            months_between(Some("2024-01-01T00:00:00Z"), Some("2025-01-01 00:00:00")),
            12
        );
    }
}
