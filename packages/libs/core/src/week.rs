//! 일요일 날짜 유틸리티
//!
//! 수상자는 매주 일요일 날짜 기준으로 등록됩니다.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{Error, Result};

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// `today`가 속한 주의 일요일 (오늘이 일요일이면 오늘)
pub fn current_sunday(today: NaiveDate) -> NaiveDate {
    let days_since_sunday = today.weekday().num_days_from_sunday();
    today
        .checked_sub_days(Days::new(days_since_sunday as u64))
        .unwrap_or(today)
}

/// 등록/수정/삭제용 일요일 검증
pub fn require_sunday(date: NaiveDate) -> Result<NaiveDate> {
    if is_sunday(date) {
        Ok(date)
    } else {
        Err(Error::NotSunday {
            date: date.to_string(),
            weekday: format!("{:?}", date.weekday()),
        })
    }
}
