//! 时间展示模块
//!
//! 后端以不带时区的 ISO-8601 字符串（UTC）返回所有时间戳，
//! 这里提供表格与详情视图使用的统一格式化。
//! 使用 chrono 而非 js_sys::Date，保证本 crate 可在宿主机上编译测试。

use chrono::NaiveDateTime;

/// 表格列用的短格式：`2025-08-07`
pub fn format_date(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// 详情视图用的完整格式：`2025-08-07 14:30`
pub fn format_datetime(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// 预估时长的展示，去掉多余的小数位：`2 小时` / `1.5 小时`
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{} 小时", hours as i64)
    } else {
        format!("{} 小时", hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 7)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(format_date(&ts()), "2025-08-07");
        assert_eq!(format_datetime(&ts()), "2025-08-07 14:30");
    }

    #[test]
    fn test_hours_formatting() {
        assert_eq!(format_hours(2.0), "2 小时");
        assert_eq!(format_hours(1.5), "1.5 小时");
    }

    #[test]
    fn test_naive_timestamp_parses_backend_payload() {
        // 后端（Pydantic）输出不带时区后缀的 UTC 时间
        let parsed: NaiveDateTime = serde_json::from_str("\"2025-08-07T14:30:05\"").unwrap();
        assert_eq!(format_datetime(&parsed), "2025-08-07 14:30");
    }
}
