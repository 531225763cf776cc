//! 时间工具函数 — 业务时区转换
//!
//! 所有日期→时间戳转换统一在这里完成，repository 层只接收 `i64` Unix millis。
//! 月份参数约定为 1-based（1 = 一月）。

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期 + 时分秒 → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(hour, min, sec).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// 自然月的闭区间 `[start, end]` (Unix millis, 业务时区)
///
/// `start` = 当月 1 日 00:00:00.000；`end` = 次月 1 日 00:00:00.000 的前一毫秒。
/// `month` 为 1-based，超出 1..=12 返回验证错误。
pub fn month_range_millis(month: u32, year: i32, tz: Tz) -> AppResult<(i64, i64)> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation(format!(
            "Month must be 1..=12, got {}",
            month
        )));
    }

    let start_date = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid month {}-{}", year, month)))?;

    let next_month_date = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::validation(format!("Invalid month {}-{}", year, month)))?;

    let start = day_start_millis(start_date, tz);
    let end = day_start_millis(next_month_date, tz) - 1;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn january_2024_range_in_utc() {
        let (start, end) = month_range_millis(1, 2024, chrono_tz::UTC).unwrap();
        // 2024-01-01T00:00:00.000Z
        assert_eq!(start, 1_704_067_200_000);
        // 2024-01-31T23:59:59.999Z, one millisecond before February
        assert_eq!(end, 1_706_745_600_000 - 1);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let (start, end) = month_range_millis(12, 2023, chrono_tz::UTC).unwrap();
        let jan_first_2024 = 1_704_067_200_000;
        assert_eq!(end, jan_first_2024 - 1);
        assert!(start < end);
    }

    #[test]
    fn leap_february_includes_the_29th() {
        let tz = chrono_tz::UTC;
        let (start, end) = month_range_millis(2, 2024, tz).unwrap();
        let feb_29_noon = tz
            .with_ymd_and_hms(2024, 2, 29, 12, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert!(start <= feb_29_noon && feb_29_noon <= end);
    }

    #[test]
    fn range_respects_business_timezone() {
        let (start_utc, _) = month_range_millis(1, 2024, chrono_tz::UTC).unwrap();
        let (start_madrid, _) =
            month_range_millis(1, 2024, chrono_tz::Europe::Madrid).unwrap();
        // Madrid is UTC+1 in January, so its month starts one hour earlier
        assert_eq!(start_utc - start_madrid, 3_600_000);
    }

    #[test]
    fn month_zero_and_thirteen_are_rejected() {
        assert!(month_range_millis(0, 2024, chrono_tz::UTC).is_err());
        assert!(month_range_millis(13, 2024, chrono_tz::UTC).is_err());
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert!(parse_date("2024-06-01").is_ok());
        assert!(parse_date("01/06/2024").is_err());
    }
}
