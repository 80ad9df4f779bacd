//! Consecutive-day streak computation for habit completions.
//!
//! A streak is the length of the unbroken run of calendar days ending at
//! `today` for which a completion exists. Dates after `today` are kept in the
//! completion list but never count toward the run.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Result of applying one completion to a habit's completion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// Sorted ascending, duplicate-free.
    pub completions: Vec<NaiveDate>,
    pub streak: u32,
    /// `false` when `new_date` was already recorded.
    pub inserted: bool,
}

/// Adds `new_date` to `existing` and recomputes the streak relative to `today`.
///
/// `existing` may be in any order and may contain duplicates; the returned
/// list is always canonical. Recording an already present date leaves the
/// list unchanged.
pub fn record_completion(
    existing: &[NaiveDate],
    new_date: NaiveDate,
    today: NaiveDate,
) -> CompletionOutcome {
    let mut dates: BTreeSet<NaiveDate> = existing.iter().copied().collect();
    let inserted = dates.insert(new_date);
    let completions: Vec<NaiveDate> = dates.into_iter().collect();
    let streak = current_streak(&completions, today);

    CompletionOutcome {
        completions,
        streak,
        inserted,
    }
}

/// Walks backward from `today` and counts consecutive days present in
/// `sorted`, which must be sorted ascending without duplicates.
pub fn current_streak(sorted: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;

    // A run can never be longer than the number of distinct dates.
    for _ in 0..sorted.len() {
        if sorted.binary_search(&day).is_err() {
            break;
        }
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }

    streak
}
