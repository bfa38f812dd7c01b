use crate::errors::PipelineError;
use crate::models::{CounterDisplay, GlobalVars, Totals};
use crate::upstream::Endpoint;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn counter(value: u64) -> String {
    format!("{value:05}")
}

fn update_time(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Builds the totals from the first global-variables entry, stamped with
/// the local refresh time `now`. Later entries are never read.
pub fn publish(global_vars: &[Value], now: NaiveDateTime) -> Result<Totals, PipelineError> {
    let first = global_vars
        .first()
        .ok_or_else(|| PipelineError::malformed(Endpoint::Trend, "global variables array is empty"))?;
    let vars = GlobalVars::deserialize(first)
        .map_err(|err| PipelineError::malformed(Endpoint::Trend, err))?;

    let as_of = now.format(TIMESTAMP_FORMAT).to_string();
    Ok(Totals {
        confirmed: vars.confirm_count,
        suspected: vars.suspect_count,
        dead: vars.dead_count,
        cured: vars.cure,
        upstream_update_time: vars.update_time.as_ref().and_then(update_time),
        display: CounterDisplay {
            confirmed: counter(vars.confirm_count),
            suspected: counter(vars.suspect_count),
            dead: counter(vars.dead_count),
            cured: counter(vars.cure),
            update_text: format!("更新时间：{as_of}"),
        },
        as_of,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 2, 3)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn formats_counters_and_timestamp() {
        let vars = json!({
            "confirmCount": 17238,
            "suspectCount": 21558,
            "deadCount": 361,
            "cure": 475,
            "update_time": "2020-02-03 08:50:12"
        });

        let totals = publish(&[vars], now()).unwrap();
        assert_eq!(totals.confirmed, 17238);
        assert_eq!(totals.display.dead, "00361");
        assert_eq!(totals.display.cured, "00475");
        assert_eq!(totals.display.suspected, "21558");
        assert_eq!(totals.as_of, "2020-02-03 09:05:07");
        assert_eq!(totals.display.update_text, "更新时间：2020-02-03 09:05:07");
        assert_eq!(totals.upstream_update_time.as_deref(), Some("2020-02-03 08:50:12"));
    }

    #[test]
    fn wide_values_are_not_truncated() {
        assert_eq!(counter(0), "00000");
        assert_eq!(counter(123456), "123456");
    }

    #[test]
    fn numeric_update_time_is_kept() {
        let vars = json!({
            "confirmCount": 1, "suspectCount": 0, "deadCount": 0, "cure": 0,
            "update_time": 1580700612
        });
        let totals = publish(&[vars], now()).unwrap();
        assert_eq!(totals.upstream_update_time.as_deref(), Some("1580700612"));
    }

    #[test]
    fn only_first_entry_is_read() {
        let first = json!({"confirmCount": 5, "suspectCount": 4, "deadCount": 3, "cure": 2});
        let totals = publish(&[first, json!({"foo": 1})], now()).unwrap();
        assert_eq!(totals.display.confirmed, "00005");

        let err = publish(&[json!({"foo": 1})], now()).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedResponse { .. }));
    }

    #[test]
    fn empty_globals_are_malformed() {
        let err = publish(&[], now()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedResponse { endpoint: Endpoint::Trend, .. }
        ));
    }
}
