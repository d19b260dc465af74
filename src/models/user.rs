use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Activity aggregates assumed for a user with no play history:
/// an average, single-session player.
pub const DEFAULT_AVG_SCORE: f64 = 500.0;
pub const DEFAULT_SESSION_COUNT: usize = 1;
pub const DEFAULT_MAX_SCORE: f64 = 500.0;

/// User profile as read from the `Users` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub birth_date: NaiveDate,
    pub gender: Option<String>,
}

impl UserProfile {
    /// Whole years between the birth date and `today`
    ///
    /// One year is subtracted when `today` falls before the birthday in the
    /// current year. A birth date after `today` is an invalid profile.
    pub fn age_on(&self, today: NaiveDate) -> AppResult<u32> {
        calculate_age(self.birth_date, today)
    }
}

pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> AppResult<u32> {
    let before_birthday = (today.month(), today.day()) < (birth_date.month(), birth_date.day());
    let years = today.year() - birth_date.year() - i32::from(before_birthday);

    u32::try_from(years).map_err(|_| {
        AppError::InvalidProfile(format!(
            "birth date {} is after {}",
            birth_date, today
        ))
    })
}

/// A single row of `GameRating` for a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingRecord {
    pub user_id: String,
    pub game_id: String,
    pub category_id: String,
    pub category_name: String,
    pub rating_value: f64,
}

/// A single row of `UserGame`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaySession {
    pub user_id: String,
    pub game_id: String,
    pub score: f64,
}

/// Aggregated play statistics for one user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlayActivity {
    pub avg_score: f64,
    pub session_count: usize,
    pub max_score: f64,
}

impl Default for PlayActivity {
    fn default() -> Self {
        Self {
            avg_score: DEFAULT_AVG_SCORE,
            session_count: DEFAULT_SESSION_COUNT,
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl PlayActivity {
    /// Mean, count and max of session scores; defaults when there are none
    pub fn from_sessions(sessions: &[PlaySession]) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }

        let total: f64 = sessions.iter().map(|s| s.score).sum();
        let max_score = sessions
            .iter()
            .map(|s| s.score)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            avg_score: total / sessions.len() as f64,
            session_count: sessions.len(),
            max_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(score: f64) -> PlaySession {
        PlaySession {
            user_id: "u1".to_string(),
            game_id: "g1".to_string(),
            score,
        }
    }

    #[test]
    fn test_age_day_before_birthday() {
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 14)).unwrap(), 23);
    }

    #[test]
    fn test_age_on_and_after_birthday() {
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 15)).unwrap(), 24);
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 12, 1)).unwrap(), 24);
    }

    #[test]
    fn test_age_leap_day_birthday() {
        // Feb 29 birthday counts as reached only on Mar 1 in non-leap years
        assert_eq!(calculate_age(date(2004, 2, 29), date(2023, 2, 28)).unwrap(), 18);
        assert_eq!(calculate_age(date(2004, 2, 29), date(2023, 3, 1)).unwrap(), 19);
    }

    #[test]
    fn test_age_future_birth_date_is_invalid() {
        let result = calculate_age(date(2030, 1, 1), date(2024, 6, 14));
        assert!(matches!(result, Err(AppError::InvalidProfile(_))));
    }

    #[test]
    fn test_activity_defaults_for_empty_history() {
        let activity = PlayActivity::from_sessions(&[]);
        assert_eq!(activity.avg_score, 500.0);
        assert_eq!(activity.session_count, 1);
        assert_eq!(activity.max_score, 500.0);
    }

    #[test]
    fn test_activity_aggregates() {
        let activity = PlayActivity::from_sessions(&[session(100.0), session(300.0), session(200.0)]);
        assert_eq!(activity.avg_score, 200.0);
        assert_eq!(activity.session_count, 3);
        assert_eq!(activity.max_score, 300.0);
    }
}
