use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A named time-window selector for scoping revenue and profit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PeriodMode {
    /// No time filtering at all.
    All,
    /// The trailing 30 days, both ends inclusive.
    Last30,
    /// The current calendar month.
    Month,
    /// An explicit `[from, to]` range supplied by the caller.
    Custom,
}

/// A concrete reporting window. `None` on a side means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Period {
    /// The window that matches everything.
    pub fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Membership test for the reference date of a record.
    ///
    /// A record with no date never matches a bounded window, but does match
    /// the fully unbounded one.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        match date {
            Some(day) => {
                self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
            }
            None => self.from.is_none() && self.to.is_none(),
        }
    }
}

/// Resolves a period mode into a concrete window.
///
/// `today` is always passed in explicitly; this function never reads a wall
/// clock, so the relative modes stay reproducible in tests. The custom
/// bounds are only consulted in `Custom` mode and pass through verbatim,
/// `None` meaning unbounded on that side.
pub fn derive_period(
    mode: PeriodMode,
    custom_from: Option<NaiveDate>,
    custom_to: Option<NaiveDate>,
    today: NaiveDate,
) -> Period {
    match mode {
        PeriodMode::All => Period::unbounded(),
        PeriodMode::Last30 => Period {
            from: today.checked_sub_days(Days::new(30)),
            to: Some(today),
        },
        PeriodMode::Month => Period {
            from: first_day_of_month(today),
            to: last_day_of_month(today),
        },
        PeriodMode::Custom => Period {
            from: custom_from,
            to: custom_to,
        },
    }
}

fn first_day_of_month(day: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(day.year(), day.month(), 1)
}

/// Last calendar day of `day`'s month: the first day of the following month,
/// stepped back by one.
fn last_day_of_month(day: NaiveDate) -> Option<NaiveDate> {
    let (next_year, next_month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|first| first.pred_opt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn all_mode_is_unbounded() {
        let period = derive_period(PeriodMode::All, None, None, date(2024, 3, 15));
        assert_eq!(period, Period::unbounded());
    }

    #[test]
    fn last30_runs_back_from_today_inclusive() {
        let period = derive_period(PeriodMode::Last30, None, None, date(2024, 3, 15));
        assert_eq!(period.from, Some(date(2024, 2, 14)));
        assert_eq!(period.to, Some(date(2024, 3, 15)));
        assert!(period.contains(Some(date(2024, 2, 14))));
        assert!(period.contains(Some(date(2024, 3, 15))));
        assert!(!period.contains(Some(date(2024, 2, 13))));
    }

    #[test]
    fn month_mode_covers_the_whole_calendar_month() {
        let period = derive_period(PeriodMode::Month, None, None, date(2024, 3, 15));
        assert_eq!(period.from, Some(date(2024, 3, 1)));
        assert_eq!(period.to, Some(date(2024, 3, 31)));
    }

    #[test]
    fn month_mode_handles_leap_february() {
        let period = derive_period(PeriodMode::Month, None, None, date(2024, 2, 10));
        assert_eq!(period.to, Some(date(2024, 2, 29)));

        let period = derive_period(PeriodMode::Month, None, None, date(2023, 2, 10));
        assert_eq!(period.to, Some(date(2023, 2, 28)));
    }

    #[test]
    fn month_mode_handles_december_rollover() {
        let period = derive_period(PeriodMode::Month, None, None, date(2023, 12, 5));
        assert_eq!(period.from, Some(date(2023, 12, 1)));
        assert_eq!(period.to, Some(date(2023, 12, 31)));
    }

    #[test]
    fn custom_mode_passes_bounds_through() {
        let period = derive_period(
            PeriodMode::Custom,
            Some(date(2024, 1, 1)),
            None,
            date(2024, 3, 15),
        );
        assert_eq!(period.from, Some(date(2024, 1, 1)));
        assert_eq!(period.to, None);
        // Open on the right: anything after `from` matches.
        assert!(period.contains(Some(date(2030, 1, 1))));
        assert!(!period.contains(Some(date(2023, 12, 31))));
    }

    #[test]
    fn bounded_window_is_inclusive_on_both_ends() {
        let period = derive_period(
            PeriodMode::Custom,
            Some(date(2024, 2, 1)),
            Some(date(2024, 2, 29)),
            date(2024, 3, 15),
        );
        assert!(period.contains(Some(date(2024, 2, 1))));
        assert!(period.contains(Some(date(2024, 2, 29))));
        assert!(!period.contains(Some(date(2024, 3, 1))));
    }

    #[test]
    fn missing_date_only_matches_the_unbounded_window() {
        assert!(Period::unbounded().contains(None));

        let bounded = Period {
            from: Some(date(2024, 1, 1)),
            to: None,
        };
        assert!(!bounded.contains(None));

        let bounded = Period {
            from: None,
            to: Some(date(2024, 12, 31)),
        };
        assert!(!bounded.contains(None));
    }
}
