//! Due-date scheduling: the recurrence calculator and the status classifier.
//!
//! Due dates are stored with full timestamp precision (the hourly recurrence
//! needs it), but classification compares calendar dates only, in UTC.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ─── Recurrence ──────────────────────────────────────────────────────────────

/// How far in the future the next due date falls.
///
/// The mapping is a fixed lookup, not a calendar-aware recurrence engine:
/// "6 months" is 182 days regardless of which months are involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
  #[serde(rename = "1hr")]
  OneHour,
  #[serde(rename = "24hrs")]
  OneDay,
  #[serde(rename = "7days")]
  SevenDays,
  #[serde(rename = "6months")]
  SixMonths,
  #[serde(rename = "12months")]
  TwelveMonths,
}

impl Frequency {
  /// The label stored in the `frequency` column and accepted over the wire.
  /// Must match the serde renames above.
  pub fn as_label(&self) -> &'static str {
    match self {
      Self::OneHour => "1hr",
      Self::OneDay => "24hrs",
      Self::SevenDays => "7days",
      Self::SixMonths => "6months",
      Self::TwelveMonths => "12months",
    }
  }

  /// Parse a stored label. Unrecognised labels yield `None` rather than an
  /// error; callers treat that as "no recurrence" (see [`next_due_from_label`]).
  pub fn parse(label: &str) -> Option<Self> {
    match label {
      "1hr" => Some(Self::OneHour),
      "24hrs" => Some(Self::OneDay),
      "7days" => Some(Self::SevenDays),
      "6months" => Some(Self::SixMonths),
      "12months" => Some(Self::TwelveMonths),
      _ => None,
    }
  }

  /// The next due instant after `reference`. Minute precision is kept, which
  /// only matters for [`Frequency::OneHour`].
  pub fn next_due(&self, reference: DateTime<Utc>) -> DateTime<Utc> {
    let delta = match self {
      Self::OneHour => Duration::hours(1),
      Self::OneDay => Duration::days(1),
      Self::SevenDays => Duration::days(7),
      Self::SixMonths => Duration::days(182),
      Self::TwelveMonths => Duration::days(365),
    };
    reference + delta
  }
}

/// Label-based variant of [`Frequency::next_due`]: an unrecognised label
/// leaves the reference instant unchanged instead of failing.
pub fn next_due_from_label(label: &str, reference: DateTime<Utc>) -> DateTime<Utc> {
  match Frequency::parse(label) {
    Some(freq) => freq.next_due(reference),
    None => reference,
  }
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Where a due date sits relative to "today", computed at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
  Overdue,
  DueToday,
  Upcoming,
}

/// Classify a due instant against a reference instant by calendar date (UTC).
/// An absent due date has no status.
pub fn classify(due_at: Option<DateTime<Utc>>, as_of: DateTime<Utc>) -> Option<DueStatus> {
  let due = due_at?.date_naive();
  let today = as_of.date_naive();
  Some(match due.cmp(&today) {
    std::cmp::Ordering::Less => DueStatus::Overdue,
    std::cmp::Ordering::Equal => DueStatus::DueToday,
    std::cmp::Ordering::Greater => DueStatus::Upcoming,
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
  }

  #[test]
  fn classify_covers_all_three_orderings() {
    let today = at(2024, 6, 15, 12, 0);

    assert_eq!(
      classify(Some(at(2024, 6, 14, 12, 0)), today),
      Some(DueStatus::Overdue)
    );
    assert_eq!(
      classify(Some(at(2024, 6, 15, 12, 0)), today),
      Some(DueStatus::DueToday)
    );
    assert_eq!(
      classify(Some(at(2024, 6, 16, 12, 0)), today),
      Some(DueStatus::Upcoming)
    );
  }

  #[test]
  fn classify_ignores_time_of_day() {
    // Due at 23:59 today is still DueToday at 00:01, not Upcoming.
    let due = at(2024, 6, 15, 23, 59);
    let early = at(2024, 6, 15, 0, 1);
    assert_eq!(classify(Some(due), early), Some(DueStatus::DueToday));

    // Due at 00:01 is Overdue by 23:59 the next day even though less than
    // 24 hours have elapsed.
    let due = at(2024, 6, 15, 0, 1);
    let late = at(2024, 6, 16, 23, 59);
    assert_eq!(classify(Some(due), late), Some(DueStatus::Overdue));
  }

  #[test]
  fn classify_absent_due_date_has_no_status() {
    assert_eq!(classify(None, at(2024, 6, 15, 12, 0)), None);
  }

  #[test]
  fn one_hour_keeps_minute_precision() {
    let reference = at(2024, 1, 1, 9, 37);
    assert_eq!(Frequency::OneHour.next_due(reference), at(2024, 1, 1, 10, 37));
  }

  #[test]
  fn one_day_adds_exactly_one_day() {
    let reference = at(2024, 2, 28, 8, 0);
    assert_eq!(Frequency::OneDay.next_due(reference), at(2024, 2, 29, 8, 0));
  }

  #[test]
  fn seven_days_from_jan_first_lands_on_jan_eighth() {
    let reference = at(2024, 1, 1, 0, 0);
    assert_eq!(
      Frequency::SevenDays.next_due(reference),
      at(2024, 1, 8, 0, 0)
    );
  }

  #[test]
  fn month_frequencies_are_fixed_day_counts() {
    let reference = at(2024, 1, 1, 0, 0);
    assert_eq!(
      Frequency::SixMonths.next_due(reference),
      reference + Duration::days(182)
    );
    assert_eq!(
      Frequency::TwelveMonths.next_due(reference),
      reference + Duration::days(365)
    );
  }

  #[test]
  fn unrecognised_label_falls_back_to_reference() {
    let reference = at(2024, 3, 10, 14, 30);
    assert_eq!(next_due_from_label("fortnightly", reference), reference);
    assert_eq!(
      next_due_from_label("7days", reference),
      reference + Duration::days(7)
    );
  }

  #[test]
  fn labels_round_trip_through_parse() {
    for freq in [
      Frequency::OneHour,
      Frequency::OneDay,
      Frequency::SevenDays,
      Frequency::SixMonths,
      Frequency::TwelveMonths,
    ] {
      assert_eq!(Frequency::parse(freq.as_label()), Some(freq));
    }
    assert_eq!(Frequency::parse("yearly"), None);
  }
}
