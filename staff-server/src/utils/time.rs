//! 时间工具函数 (业务时区)
//!
//! "今天" 一律按业务时区 (`BUSINESS_TZ`) 计算，请假开始日期与之比较。

use chrono::NaiveDate;
use chrono_tz::Tz;
use shared::error::ValidationError;

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

/// 业务时区的今天
pub fn today_in(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// 解析时区名，失败回退 UTC
pub fn parse_tz(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or_else(|e| {
        tracing::warn!("Invalid BUSINESS_TZ '{}': {}, falling back to UTC", name, e);
        Tz::UTC
    })
}
