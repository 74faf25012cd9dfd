use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::models::{DaySchedule, SessionKind, Topic};

/// Cap on a single study block. Keeps any one topic from monopolizing a day
/// early in the horizon.
const MAX_BLOCK_HOURS: f64 = 2.0;

/// Smallest block worth scheduling. A day with less free time than this is
/// considered full.
const MIN_BLOCK_HOURS: f64 = 1.0;

/// Fixed spaced-repetition offset: a review lands this many days after the
/// day a topic was first studied.
const REVIEW_OFFSET_DAYS: usize = 2;

const REVIEW_HOURS: f64 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("exam date must be in the future")]
    ExamDateNotInFuture,

    #[error(
        "not enough study time before the exam to cover every topic; \
         increase your daily hours or pick a later exam date"
    )]
    InsufficientCapacity,
}

/// Build a day-by-day study schedule from today (inclusive) through the day
/// before the exam.
///
/// Topics are taken in priority order (High first; equal priorities keep
/// input order) and packed greedily onto the earliest day with at least one
/// free hour, in blocks of up to two hours. After all topics are placed, a
/// one-hour review is attempted two days after each topic's first block,
/// and silently skipped when that day is missing or full.
///
/// All-or-nothing: any failure returns an error and no partial schedule.
pub fn build_schedule(
    today: NaiveDate,
    exam_date: NaiveDate,
    daily_hours: f64,
    topics: &[Topic],
) -> Result<Vec<DaySchedule>, ScheduleError> {
    let total_days = (exam_date - today).num_days();
    if total_days <= 0 {
        return Err(ScheduleError::ExamDateNotInFuture);
    }

    let mut days: Vec<DaySchedule> = (0..total_days)
        .map(|i| DaySchedule {
            date: today + Duration::days(i),
            day_number: i + 1,
            topics: Vec::new(),
            total_scheduled_hours: 0.0,
            available_hours: daily_hours,
        })
        .collect();

    let mut ordered: Vec<&Topic> = topics.iter().collect();
    ordered.sort_by_key(|t| t.priority.rank());

    // (topic name, index of the day its first block landed on)
    let mut anchors: Vec<(String, usize)> = Vec::with_capacity(ordered.len());

    for topic in ordered {
        let mut remaining = topic.hours;
        let mut anchor: Option<usize> = None;

        while remaining > 0.0 {
            let day_idx = days
                .iter()
                .position(|d| d.free_hours() >= MIN_BLOCK_HOURS)
                .ok_or(ScheduleError::InsufficientCapacity)?;

            let free = days[day_idx].free_hours();
            let block = remaining.min(MAX_BLOCK_HOURS).min(free);
            days[day_idx].add_session(&topic.name, block, SessionKind::New);

            if anchor.is_none() {
                anchor = Some(day_idx);
            }
            remaining -= block;
        }

        if let Some(idx) = anchor {
            anchors.push((topic.name.clone(), idx));
        }
    }

    for (name, anchor) in anchors {
        if let Some(day) = days.get_mut(anchor + REVIEW_OFFSET_DAYS) {
            if day.free_hours() >= MIN_BLOCK_HOURS {
                day.add_session(&name, REVIEW_HOURS, SessionKind::Review);
            }
        }
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn topic(name: &str, priority: Priority, hours: f64) -> Topic {
        Topic {
            id: 0,
            name: name.to_string(),
            priority,
            hours,
            created_at: String::new(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_hours_for(days: &[DaySchedule], name: &str) -> f64 {
        days.iter()
            .flat_map(|d| &d.topics)
            .filter(|t| t.topic_name == name)
            .flat_map(|t| &t.sessions)
            .filter(|s| s.kind == SessionKind::New)
            .map(|s| s.hours)
            .sum()
    }

    fn review_days_for(days: &[DaySchedule], name: &str) -> Vec<i64> {
        days.iter()
            .filter(|d| {
                d.topics.iter().any(|t| {
                    t.topic_name == name
                        && t.sessions.iter().any(|s| s.kind == SessionKind::Review)
                })
            })
            .map(|d| d.day_number)
            .collect()
    }

    fn first_new_day(days: &[DaySchedule], name: &str) -> Option<i64> {
        days.iter()
            .find(|d| {
                d.topics.iter().any(|t| {
                    t.topic_name == name
                        && t.sessions.iter().any(|s| s.kind == SessionKind::New)
                })
            })
            .map(|d| d.day_number)
    }

    mod failure_tests {
        use super::*;

        #[test]
        fn exam_today_fails() {
            let today = date(2026, 3, 1);
            let result = build_schedule(today, today, 2.0, &[topic("Algebra", Priority::High, 2.0)]);
            assert_eq!(result.unwrap_err(), ScheduleError::ExamDateNotInFuture);
        }

        #[test]
        fn exam_in_past_fails() {
            let result = build_schedule(
                date(2026, 3, 10),
                date(2026, 3, 1),
                2.0,
                &[topic("Algebra", Priority::High, 2.0)],
            );
            assert_eq!(result.unwrap_err(), ScheduleError::ExamDateNotInFuture);
        }

        #[test]
        fn more_hours_than_horizon_capacity_fails() {
            // 3 days x 2h = 6h capacity, 10h requested
            let result = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 4),
                2.0,
                &[topic("Physics", Priority::High, 10.0)],
            );
            assert_eq!(result.unwrap_err(), ScheduleError::InsufficientCapacity);
        }

        #[test]
        fn capacity_failure_returns_no_partial_schedule() {
            let result = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 2),
                1.0,
                &[
                    topic("Fits", Priority::High, 1.0),
                    topic("Does Not Fit", Priority::Low, 5.0),
                ],
            );
            assert!(result.is_err());
        }
    }

    mod allocation_tests {
        use super::*;

        #[test]
        fn horizon_runs_from_today_to_day_before_exam() {
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 5),
                2.0,
                &[topic("Algebra", Priority::High, 1.0)],
            )
            .unwrap();

            assert_eq!(days.len(), 4);
            assert_eq!(days[0].date, date(2026, 3, 1));
            assert_eq!(days[3].date, date(2026, 3, 4));
            let numbers: Vec<i64> = days.iter().map(|d| d.day_number).collect();
            assert_eq!(numbers, vec![1, 2, 3, 4]);
        }

        #[test]
        fn single_topic_left_packs_in_capped_blocks() {
            // 5h topic, 2h/day, 3-day horizon: blocks of 2, 2, 1
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 4),
                2.0,
                &[topic("Calculus", Priority::High, 5.0)],
            )
            .unwrap();

            let new_blocks: Vec<f64> = days
                .iter()
                .map(|d| {
                    d.topics
                        .iter()
                        .flat_map(|t| &t.sessions)
                        .filter(|s| s.kind == SessionKind::New)
                        .map(|s| s.hours)
                        .sum()
                })
                .collect();
            assert_eq!(new_blocks, vec![2.0, 2.0, 1.0]);

            // Review lands on anchor day 1 + 2 = day 3, which still has an
            // hour free after its 1h block
            assert_eq!(review_days_for(&days, "Calculus"), vec![3]);
            assert_eq!(days[2].total_scheduled_hours, 2.0);
        }

        #[test]
        fn new_hours_sum_to_requested_hours() {
            let topics = vec![
                topic("Calculus", Priority::High, 4.5),
                topic("History", Priority::Medium, 3.0),
                topic("Biology", Priority::Low, 2.5),
            ];
            let days =
                build_schedule(date(2026, 3, 1), date(2026, 3, 11), 3.0, &topics).unwrap();

            for t in &topics {
                assert_eq!(new_hours_for(&days, &t.name), t.hours, "topic {}", t.name);
            }
        }

        #[test]
        fn no_day_exceeds_available_hours() {
            let topics = vec![
                topic("A", Priority::High, 5.0),
                topic("B", Priority::Medium, 4.0),
                topic("C", Priority::Low, 3.0),
            ];
            let days =
                build_schedule(date(2026, 3, 1), date(2026, 3, 8), 2.5, &topics).unwrap();

            for day in &days {
                assert!(
                    day.total_scheduled_hours <= day.available_hours,
                    "day {} overbooked: {} > {}",
                    day.day_number,
                    day.total_scheduled_hours,
                    day.available_hours
                );
            }
        }

        #[test]
        fn high_priority_starts_no_later_than_lower_priorities() {
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 8),
                2.0,
                &[
                    topic("Low Topic", Priority::Low, 2.0),
                    topic("High Topic", Priority::High, 2.0),
                    topic("Medium Topic", Priority::Medium, 2.0),
                ],
            )
            .unwrap();

            let high = first_new_day(&days, "High Topic").unwrap();
            let medium = first_new_day(&days, "Medium Topic").unwrap();
            let low = first_new_day(&days, "Low Topic").unwrap();
            assert!(high <= medium);
            assert!(medium <= low);
        }

        #[test]
        fn equal_priority_topics_keep_input_order() {
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 8),
                2.0,
                &[
                    topic("First", Priority::Medium, 2.0),
                    topic("Second", Priority::Medium, 2.0),
                ],
            )
            .unwrap();

            assert!(first_new_day(&days, "First").unwrap() <= first_new_day(&days, "Second").unwrap());
            // Both start day 1 would violate capacity; stable sort puts First on day 1
            assert_eq!(first_new_day(&days, "First"), Some(1));
        }

        #[test]
        fn high_priority_fully_scheduled_before_low_begins() {
            // High 3h, Low 2h, 2h/day, 3 days:
            // High: day 1 (2h), day 2 (1h); Low: day 2 (1h), day 3 (1h)
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 4),
                2.0,
                &[
                    topic("High Topic", Priority::High, 3.0),
                    topic("Low Topic", Priority::Low, 2.0),
                ],
            )
            .unwrap();

            assert_eq!(new_hours_for(&days[..1], "High Topic"), 2.0);
            assert_eq!(new_hours_for(&days[1..2], "High Topic"), 1.0);
            assert_eq!(new_hours_for(&days[1..2], "Low Topic"), 1.0);
            assert_eq!(new_hours_for(&days[2..3], "Low Topic"), 1.0);
        }

        #[test]
        fn fractional_hours_are_allocated_exactly() {
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 5),
                2.0,
                &[topic("Statistics", Priority::High, 2.5)],
            )
            .unwrap();

            assert_eq!(new_hours_for(&days, "Statistics"), 2.5);
        }

        #[test]
        fn day_with_under_one_free_hour_is_skipped() {
            // First topic leaves 0.5h on day 1; second topic must start day 2
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 5),
                2.5,
                &[
                    topic("A", Priority::High, 2.0),
                    topic("B", Priority::Medium, 2.0),
                ],
            )
            .unwrap();

            assert_eq!(first_new_day(&days, "B"), Some(2));
            assert_eq!(days[0].free_hours(), 0.5);
        }
    }

    mod review_tests {
        use super::*;

        #[test]
        fn review_lands_two_days_after_anchor() {
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 8),
                3.0,
                &[topic("Chemistry", Priority::High, 2.0)],
            )
            .unwrap();

            assert_eq!(review_days_for(&days, "Chemistry"), vec![3]);
        }

        #[test]
        fn review_is_one_hour() {
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 8),
                3.0,
                &[topic("Chemistry", Priority::High, 2.0)],
            )
            .unwrap();

            let review: Vec<f64> = days[2]
                .topics
                .iter()
                .flat_map(|t| &t.sessions)
                .filter(|s| s.kind == SessionKind::Review)
                .map(|s| s.hours)
                .collect();
            assert_eq!(review, vec![1.0]);
        }

        #[test]
        fn review_skipped_when_day_outside_horizon() {
            // 2-day horizon: anchor day 1, review day would be day 3
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 3),
                2.0,
                &[topic("Chemistry", Priority::High, 2.0)],
            )
            .unwrap();

            assert!(review_days_for(&days, "Chemistry").is_empty());
        }

        #[test]
        fn review_skipped_when_day_is_full() {
            // Day 3 completely filled with new material; review for the day-1
            // anchor cannot be placed and is dropped, not moved
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 4),
                2.0,
                &[
                    topic("A", Priority::High, 2.0),
                    topic("B", Priority::Medium, 4.0),
                ],
            )
            .unwrap();

            assert!(review_days_for(&days, "A").is_empty());
        }

        #[test]
        fn review_merges_into_existing_topic_entry() {
            // Topic spans days 1-3, review also lands on day 3: one entry,
            // two sessions
            let days = build_schedule(
                date(2026, 3, 1),
                date(2026, 3, 4),
                2.0,
                &[topic("Calculus", Priority::High, 5.0)],
            )
            .unwrap();

            assert_eq!(days[2].topics.len(), 1);
            let entry = &days[2].topics[0];
            assert_eq!(entry.sessions.len(), 2);
            assert_eq!(entry.sessions[0].kind, SessionKind::New);
            assert_eq!(entry.sessions[1].kind, SessionKind::Review);
            assert_eq!(entry.total_hours, 2.0);
        }
    }
}
