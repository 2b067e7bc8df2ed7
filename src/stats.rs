//! Dashboard Aggregates
//!
//! Pure derivation of the dashboard numbers from a mirror snapshot.
//! Recomputed on every query; nothing is cached.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::models::{MetricStatus, Priority};
use crate::store::AppState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_metrics: usize,
    pub on_track_metrics: usize,
    pub total_rocks: usize,
    pub completed_rocks: usize,
    /// Rounded mean of rock progress, 0 with no rocks
    pub avg_rock_progress: u32,
    pub total_issues: usize,
    pub high_priority_issues: usize,
    pub total_people: usize,
    /// People with all three GWC flags
    pub right_people_right_seats: usize,
    pub total_meetings: usize,
    /// Meetings strictly after `now`
    pub upcoming_meetings: usize,
    pub total_todos: usize,
    pub pending_todos: usize,
    pub core_values_count: usize,
}

pub fn compute_stats(state: &AppState, now: DateTime<Utc>) -> DashboardStats {
    let avg_rock_progress = if state.rocks.is_empty() {
        0
    } else {
        let sum: u32 = state.rocks.iter().map(|r| u32::from(r.progress)).sum();
        (f64::from(sum) / state.rocks.len() as f64).round() as u32
    };

    DashboardStats {
        total_metrics: state.metrics.len(),
        on_track_metrics: state
            .metrics
            .iter()
            .filter(|m| m.status == MetricStatus::OnTrack)
            .count(),
        total_rocks: state.rocks.len(),
        completed_rocks: state.rocks.iter().filter(|r| r.is_complete()).count(),
        avg_rock_progress,
        total_issues: state.issues.len(),
        high_priority_issues: state
            .issues
            .iter()
            .filter(|i| i.priority == Priority::High)
            .count(),
        total_people: state.people.len(),
        right_people_right_seats: state.people.iter().filter(|p| p.is_right_seat()).count(),
        total_meetings: state.meetings.len(),
        upcoming_meetings: state
            .meetings
            .iter()
            .filter_map(|m| parse_meeting_date(&m.date))
            .filter(|date| *date > now)
            .count(),
        total_todos: state.todos.len(),
        pending_todos: state.todos.iter().filter(|t| !t.completed).count(),
        core_values_count: state.vision.core_values.len(),
    }
}

/// Parse a meeting start time.
///
/// RFC 3339 carries its own offset; `YYYY-MM-DDTHH:MM[:SS]` (what a
/// datetime-local input produces) is local time; a bare date is UTC midnight.
pub fn parse_meeting_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoreValue, Issue, Meeting, Metric, Person, Rock, Todo};
    use chrono::Duration;

    fn rock(progress: u8) -> Rock {
        Rock {
            progress,
            ..Default::default()
        }
    }

    #[test]
    fn test_average_rock_progress() {
        let mut state = AppState::default();
        assert_eq!(compute_stats(&state, Utc::now()).avg_rock_progress, 0);

        state.rocks = vec![rock(40), rock(60)];
        assert_eq!(compute_stats(&state, Utc::now()).avg_rock_progress, 50);

        state.rocks = vec![rock(33), rock(34)];
        assert_eq!(compute_stats(&state, Utc::now()).avg_rock_progress, 34);

        state.rocks = vec![rock(100), rock(0), rock(0)];
        let stats = compute_stats(&state, Utc::now());
        assert_eq!(stats.avg_rock_progress, 33);
        assert_eq!(stats.completed_rocks, 1);
    }

    #[test]
    fn test_counts() {
        let now = Utc::now();
        let mut state = AppState {
            metrics: vec![
                Metric {
                    status: MetricStatus::OnTrack,
                    ..Default::default()
                },
                Metric {
                    status: MetricStatus::Behind,
                    ..Default::default()
                },
            ],
            issues: vec![
                Issue {
                    priority: Priority::High,
                    ..Default::default()
                },
                Issue {
                    priority: Priority::Low,
                    ..Default::default()
                },
                Issue::default(),
            ],
            people: vec![
                Person {
                    get_it: true,
                    want_it: true,
                    capacity: true,
                    ..Default::default()
                },
                Person {
                    get_it: true,
                    ..Default::default()
                },
            ],
            todos: vec![
                Todo {
                    completed: true,
                    ..Default::default()
                },
                Todo::default(),
            ],
            meetings: vec![
                Meeting {
                    date: (now + Duration::days(2)).to_rfc3339(),
                    ..Default::default()
                },
                Meeting {
                    date: (now - Duration::days(2)).to_rfc3339(),
                    ..Default::default()
                },
                Meeting {
                    date: "not a date".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        state.vision.core_values.push(CoreValue::default());

        let stats = compute_stats(&state, now);
        assert_eq!(stats.total_metrics, 2);
        assert_eq!(stats.on_track_metrics, 1);
        assert_eq!(stats.total_issues, 3);
        assert_eq!(stats.high_priority_issues, 1);
        assert_eq!(stats.total_people, 2);
        assert_eq!(stats.right_people_right_seats, 1);
        assert_eq!(stats.total_todos, 2);
        assert_eq!(stats.pending_todos, 1);
        assert_eq!(stats.total_meetings, 3);
        assert_eq!(stats.upcoming_meetings, 1);
        assert_eq!(stats.core_values_count, 1);
    }

    #[test]
    fn test_meeting_exactly_now_is_not_upcoming() {
        let now = Utc::now();
        let state = AppState {
            meetings: vec![Meeting {
                date: now.to_rfc3339(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(compute_stats(&state, now).upcoming_meetings, 0);
    }

    #[test]
    fn test_parse_meeting_date_formats() {
        let utc = parse_meeting_date("2024-05-01T10:00:00Z").unwrap();
        assert_eq!(utc.to_rfc3339(), "2024-05-01T10:00:00+00:00");

        let local = parse_meeting_date("2024-05-01T10:00").unwrap();
        let expected = Local
            .with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(local, expected);

        assert!(parse_meeting_date("2024-05-01").is_some());
        assert!(parse_meeting_date("").is_none());
        assert!(parse_meeting_date("next tuesday").is_none());
    }
}
