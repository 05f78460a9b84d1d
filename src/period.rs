//! Fiscal-year bucketing. A contribution year runs from July 1st to June 30th
//! and is identified by the timestamp of its first second, July 1 00:00:01 UTC.

use crate::error::{GhstatsError, Result};
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

/// Month a contribution year starts in.
pub const START_MONTH: u32 = 7;

fn july_first(year: i32) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, START_MONTH, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 1))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| GhstatsError::InvalidDate(format!("No July 1st in year {year}")))
}

/// Start of the contribution year `timestamp` falls in.
pub fn bucket_start(timestamp: &DateTime<Utc>) -> Result<DateTime<Utc>> {
    let year = if timestamp.month() < START_MONTH {
        timestamp.year() - 1
    } else {
        timestamp.year()
    };
    july_first(year)
}

/// Every bucket start from the one holding `start` to the one holding `end`, both included.
pub fn bucket_range(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Result<Vec<DateTime<Utc>>> {
    let first = bucket_start(start)?;
    let last = bucket_start(end)?;
    if first > last {
        return Err(GhstatsError::InvalidDate(format!(
            "Invalid range: start ({start}) is after end ({end})"
        )));
    }

    let mut buckets = Vec::new();
    let mut current = first;
    while current <= last {
        buckets.push(current);
        current = current
            .checked_add_months(Months::new(12))
            .ok_or_else(|| GhstatsError::InvalidDate(format!("Year overflow after {current}")))?;
    }
    Ok(buckets)
}

/// Buckets from the repository creation through one year past `now`.
pub fn report_range(created_at: &DateTime<Utc>, now: &DateTime<Utc>) -> Result<Vec<DateTime<Utc>>> {
    let horizon = now
        .checked_add_months(Months::new(12))
        .ok_or_else(|| GhstatsError::InvalidDate(format!("Year overflow after {now}")))?;
    bucket_range(created_at, &horizon)
}

/// Label such as `7/2014 - 6/2015`.
pub fn format_bucket_label(bucket: &DateTime<Utc>) -> String {
    format!(
        "{}/{} - {}/{}",
        bucket.month(),
        bucket.year(),
        bucket.month() - 1,
        bucket.year() + 1
    )
}

/// Index of the bucket whose start is closest to `timestamp`.
///
/// This is a nearest-neighbour lookup, not interval containment: a timestamp
/// just before a boundary goes to the following bucket when that start is
/// closer. On an exact tie the earlier bucket wins.
pub fn nearest_index(buckets: &[DateTime<Utc>], timestamp: &DateTime<Utc>) -> Option<usize> {
    let after = buckets.partition_point(|start| start < timestamp);
    if after == 0 {
        return if buckets.is_empty() { None } else { Some(0) };
    }
    if after == buckets.len() {
        return Some(after - 1);
    }

    let before_gap = *timestamp - buckets[after - 1];
    let after_gap = buckets[after] - *timestamp;
    if after_gap < before_gap {
        Some(after)
    } else {
        Some(after - 1)
    }
}

pub fn nearest_bucket(buckets: &[DateTime<Utc>], timestamp: &DateTime<Utc>) -> Option<DateTime<Utc>> {
    nearest_index(buckets, timestamp).map(|index| buckets[index])
}
