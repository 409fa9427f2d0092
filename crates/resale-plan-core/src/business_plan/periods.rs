use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ResalePlanError;
use crate::ResalePlanResult;

/// One calendar quarter intersected with the holding interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// 1-based position in the schedule
    pub index: usize,
    /// Quarter label, e.g. "Q3 2024"
    pub label: String,
    /// First day of the period (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive)
    pub end_date: NaiveDate,
    /// Inclusive day count
    pub days: u32,
}

/// Split `[purchase_date, sale_date]` into calendar-quarter periods.
///
/// The first and last periods are clipped to the interval; the day counts are
/// inclusive of both ends, so they sum to the holding period plus one.
pub fn generate_periods(
    purchase_date: NaiveDate,
    sale_date: NaiveDate,
) -> ResalePlanResult<Vec<Period>> {
    let mut periods = Vec::new();
    if sale_date < purchase_date {
        return Ok(periods);
    }

    let mut year = purchase_date.year();
    'years: loop {
        for quarter in 1..=4u32 {
            let (q_start, q_end) = quarter_bounds(year, quarter)?;
            if q_start > sale_date {
                break 'years;
            }
            if q_end < purchase_date {
                continue;
            }
            let start_date = q_start.max(purchase_date);
            let end_date = q_end.min(sale_date);
            let days = (end_date - start_date).num_days() + 1;
            periods.push(Period {
                index: periods.len() + 1,
                label: format!("Q{quarter} {year}"),
                start_date,
                end_date,
                days: days as u32,
            });
        }
        year += 1;
    }

    Ok(periods)
}

/// First and last day of a calendar quarter.
fn quarter_bounds(year: i32, quarter: u32) -> ResalePlanResult<(NaiveDate, NaiveDate)> {
    let first_month = (quarter - 1) * 3 + 1;
    let start = NaiveDate::from_ymd_opt(year, first_month, 1);
    let end = if quarter < 4 {
        // Day before the first day of the next quarter
        NaiveDate::from_ymd_opt(year, first_month + 3, 1).and_then(|d| d.pred_opt())
    } else {
        NaiveDate::from_ymd_opt(year, 12, 31)
    };
    match (start, end) {
        (Some(s), Some(e)) => Ok((s, e)),
        _ => Err(ResalePlanError::DateError(format!(
            "Q{quarter} {year} is out of the supported date range"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_leap_year() {
        let periods = generate_periods(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let days: Vec<u32> = periods.iter().map(|p| p.days).collect();
        assert_eq!(days, vec![91, 91, 92, 92]);
        assert_eq!(periods[0].label, "Q1 2024");
        assert_eq!(periods[3].label, "Q4 2024");
        assert_eq!(periods[1].start_date, date(2024, 4, 1));
        assert_eq!(periods[1].end_date, date(2024, 6, 30));
    }

    #[test]
    fn test_clipped_first_and_last_periods() {
        let periods = generate_periods(date(2024, 2, 15), date(2024, 8, 10)).unwrap();
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0].start_date, date(2024, 2, 15));
        assert_eq!(periods[0].end_date, date(2024, 3, 31));
        assert_eq!(periods[0].days, 46);
        assert_eq!(periods[2].label, "Q3 2024");
        assert_eq!(periods[2].start_date, date(2024, 7, 1));
        assert_eq!(periods[2].end_date, date(2024, 8, 10));
        assert_eq!(periods[2].days, 41);
    }

    #[test]
    fn test_crosses_year_boundary() {
        let periods = generate_periods(date(2023, 11, 20), date(2024, 1, 5)).unwrap();
        let labels: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Q4 2023", "Q1 2024"]);
        assert_eq!(periods[1].days, 5);
    }

    #[test]
    fn test_single_day_interval() {
        let periods = generate_periods(date(2024, 3, 31), date(2024, 3, 31)).unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].days, 1);
    }

    #[test]
    fn test_reversed_interval_is_empty() {
        let periods = generate_periods(date(2024, 3, 31), date(2024, 3, 1)).unwrap();
        assert!(periods.is_empty());
    }

    #[test]
    fn test_tiling_over_many_starts() {
        let mut start = date(2022, 1, 1);
        for holding in [1u64, 30, 89, 90, 200, 365, 366, 731, 1000] {
            for _ in 0..40 {
                let end = start.checked_add_days(Days::new(holding)).unwrap();
                let periods = generate_periods(start, end).unwrap();
                let total: u64 = periods.iter().map(|p| u64::from(p.days)).sum();
                assert!(total.abs_diff(holding) <= 1, "{start} + {holding}: {total}");
                assert_eq!(periods.first().unwrap().start_date, start);
                assert_eq!(periods.last().unwrap().end_date, end);
                for pair in periods.windows(2) {
                    assert_eq!(pair[0].end_date.succ_opt().unwrap(), pair[1].start_date);
                    assert_eq!(pair[0].index + 1, pair[1].index);
                }
                start = start.checked_add_days(Days::new(17)).unwrap();
            }
        }
    }
}
