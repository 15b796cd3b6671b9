//! Consecutive-day streak computation.
//!
//! Two rules coexist deliberately:
//!
//! - The **user check-in streak** advances incrementally from
//!   `streak.lastCheckIn` on each new check-in. A same-day duplicate is
//!   rejected before it ever reaches this module, so the date diff here is
//!   always at least one day.
//! - **Habit streaks** are recomputed from scratch over all completed
//!   records on every toggle, because a toggle can remove an arbitrary past
//!   day, which an incremental counter cannot unwind.
//!
//! In both cases `longest` is a high-water mark: raised when `current`
//! passes it and never recomputed retroactively. A single lone event always
//! counts as a streak of 1, no matter how old it is; staleness only resolves
//! on the next event.

use chrono::NaiveDate;

use crate::models::Streak;

/// Length of the maximal run of consecutive calendar days ending at the most
/// recent date in `dates`.
///
/// Duplicates are tolerated; they neither extend nor break the run. Empty
/// input yields 0.
pub fn consecutive_run(dates: &[NaiveDate]) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut run = 1u32;
    let mut cursor = *sorted.last().expect("non-empty after dedup");

    for date in sorted.iter().rev().skip(1) {
        if (cursor - *date).num_days() == 1 {
            run += 1;
            cursor = *date;
        } else {
            break;
        }
    }

    run
}

/// Advance a user streak for a check-in on `today`.
///
/// Exactly one day since the last check-in extends the run; a longer gap
/// resets it to 1; the first check-in ever starts it at 1.
pub fn advance(streak: &mut Streak, today: NaiveDate) {
    match streak.last_check_in {
        Some(last) => {
            let gap = (today - last).num_days();
            if gap == 1 {
                streak.current += 1;
            } else if gap > 1 {
                streak.current = 1;
            }
            // gap <= 0 cannot happen: duplicate dates are rejected upstream
        }
        None => {
            streak.current = 1;
        }
    }

    if streak.current > streak.longest {
        streak.longest = streak.current;
    }
    streak.last_check_in = Some(today);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_set_has_no_run() {
        assert_eq!(consecutive_run(&[]), 0);
    }

    #[test]
    fn test_single_date_counts_regardless_of_age() {
        assert_eq!(consecutive_run(&[d(2020, 1, 1)]), 1);
    }

    #[test]
    fn test_unbroken_run_counts_all_days() {
        let dates = vec![d(2026, 3, 1), d(2026, 3, 2), d(2026, 3, 3), d(2026, 3, 4)];
        assert_eq!(consecutive_run(&dates), 4);
    }

    #[test]
    fn test_run_stops_at_first_gap() {
        // 10, 11 .. gap .. 14, 15, 16 -> run ending at 16 is 3
        let dates = vec![
            d(2026, 3, 10),
            d(2026, 3, 11),
            d(2026, 3, 14),
            d(2026, 3, 15),
            d(2026, 3, 16),
        ];
        assert_eq!(consecutive_run(&dates), 3);
    }

    #[test]
    fn test_order_and_duplicates_do_not_matter() {
        let dates = vec![d(2026, 3, 3), d(2026, 3, 1), d(2026, 3, 2), d(2026, 3, 3)];
        assert_eq!(consecutive_run(&dates), 3);
    }

    #[test]
    fn test_month_boundary_is_consecutive() {
        let dates = vec![d(2026, 2, 27), d(2026, 2, 28), d(2026, 3, 1)];
        assert_eq!(consecutive_run(&dates), 3);
    }

    #[test]
    fn test_advance_counts_consecutive_days() {
        let mut streak = Streak::default();
        for day in 1..=5 {
            advance(&mut streak, d(2026, 4, day));
        }
        assert_eq!(streak.current, 5);
        assert_eq!(streak.longest, 5);
        assert_eq!(streak.last_check_in, Some(d(2026, 4, 5)));
    }

    #[test]
    fn test_advance_gap_resets_current_keeps_longest() {
        let mut streak = Streak::default();
        advance(&mut streak, d(2026, 4, 1));
        advance(&mut streak, d(2026, 4, 2));
        advance(&mut streak, d(2026, 4, 3));
        assert_eq!(streak.current, 3);

        // Two-day gap
        advance(&mut streak, d(2026, 4, 6));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 3);

        // Longest never decreases while a new run builds
        advance(&mut streak, d(2026, 4, 7));
        assert_eq!(streak.current, 2);
        assert_eq!(streak.longest, 3);
    }

    #[test]
    fn test_first_check_in_starts_at_one() {
        let mut streak = Streak::default();
        advance(&mut streak, d(2026, 4, 20));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 1);
    }
}
