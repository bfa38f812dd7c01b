use crate::errors::PipelineError;
use crate::models::{DailyCount, RawDayCount, SeriesMeta, TrendSeries};
use crate::upstream::Endpoint;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

// Two chart panels, fast-growing counts on top.
pub const SERIES: &[SeriesMeta] = &[
    SeriesMeta {
        key: "confirmed",
        label: "确诊",
        color: "#E51017",
        panel: 1,
    },
    SeriesMeta {
        key: "suspected",
        label: "疑似",
        color: "#FA893A",
        panel: 1,
    },
    SeriesMeta {
        key: "dead",
        label: "死亡",
        color: "#0A0603",
        panel: 2,
    },
    SeriesMeta {
        key: "cured",
        label: "治愈",
        color: "#307D47",
        panel: 2,
    },
];

/// Parses upstream day labels such as `1/23` and binds them to `year`.
/// Fully qualified `2020-1-23` and `2020/1/23` are accepted too.
pub fn normalize_date(raw: &str, year: i32) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split(['/', '-', '.']).collect();
    let (year, month, day) = match parts.as_slice() {
        [month, day] => (year, *month, *day),
        [year, month, day] => (year.parse().ok()?, *month, *day),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

// 2020-1-23, no zero padding
pub fn date_label(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

pub fn decode_records(records: &[Value]) -> Result<Vec<RawDayCount>, PipelineError> {
    records
        .iter()
        .map(|record| {
            RawDayCount::deserialize(record)
                .map_err(|err| PipelineError::malformed(Endpoint::Trend, err))
        })
        .collect()
}

// A later record for an already-seen date replaces the earlier one.
pub fn daily_counts(records: &[RawDayCount], year: i32) -> Result<Vec<DailyCount>, PipelineError> {
    let mut by_date = BTreeMap::new();

    for record in records {
        let date = normalize_date(&record.date, year).ok_or_else(|| {
            PipelineError::malformed(Endpoint::Trend, format!("unparseable date {:?}", record.date))
        })?;
        let count = DailyCount {
            date,
            confirmed: record.confirm,
            suspected: record.suspect,
            dead: record.dead,
            cured: record.heal,
        };
        if by_date.insert(date, count).is_some() {
            warn!(date = %date_label(date), "duplicate date in daily counts, keeping the later record");
        }
    }

    Ok(by_date.into_values().collect())
}

pub fn build_series(records: &[RawDayCount], year: i32) -> Result<TrendSeries, PipelineError> {
    let counts = daily_counts(records, year)?;

    let mut series = TrendSeries {
        dates: Vec::with_capacity(counts.len()),
        confirmed: Vec::with_capacity(counts.len()),
        suspected: Vec::with_capacity(counts.len()),
        dead: Vec::with_capacity(counts.len()),
        cured: Vec::with_capacity(counts.len()),
    };
    for count in counts {
        series.dates.push(date_label(count.date));
        series.confirmed.push(count.confirmed);
        series.suspected.push(count.suspected);
        series.dead.push(count.dead);
        series.cured.push(count.cured);
    }
    Ok(series)
}
