//! Schedule text to activity parser

use std::sync::OnceLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Duration assigned when a day line carries no parseable duration
pub const DEFAULT_DURATION_MINUTES: i64 = 45;

/// Classification of a scheduled activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Study,
    Review,
    Practice,
    Checkpoint,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Study => "study",
            ActivityType::Review => "review",
            ActivityType::Practice => "practice",
            ActivityType::Checkpoint => "checkpoint",
        }
    }

    /// Classify a day description by keyword match
    fn classify(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("review") {
            ActivityType::Review
        } else if lower.contains("practice") || lower.contains("exercise") {
            ActivityType::Practice
        } else if lower.contains("test") || lower.contains("quiz") {
            ActivityType::Checkpoint
        } else {
            ActivityType::Study
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dated activity extracted from schedule text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedActivity {
    /// Owning course
    pub course_id: i64,
    /// Week number from the most recently seen week header
    pub week_number: i64,
    /// Position in the whole schedule, starting at 1 (not reset per week)
    pub day_number: i64,
    /// 1-7, derived from `day_number`
    pub day_of_week: i64,
    /// Calendar date: start date plus `day_number - 1` days
    pub scheduled_date: NaiveDate,
    /// Full source line, bullet markers stripped
    pub title: String,
    /// Always empty; reserved for generated content summaries
    pub description: String,
    /// Parsed from the line text, or [`DEFAULT_DURATION_MINUTES`]
    pub duration_minutes: i64,
    /// Keyword classification of the description
    pub activity_type: ActivityType,
}

fn week_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)week\s*(\d+)\s*\(").unwrap())
}

fn day_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[-*•]?\s*day\s+(\d+)\s*:\s*(.*\S)").unwrap())
}

fn hours_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:hours?|hrs?)").unwrap())
}

fn minutes_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*min(?:ute)?s?").unwrap())
}

/// Parse generated schedule text into dated activities.
///
/// Scans line by line, tracking the current week header, a global day
/// counter, and whether the scan is inside a checkpoint section. Day lines
/// before any week header are dropped; checkpoint sections (which run until
/// the next week header) never produce activities - those are extracted
/// separately by [`parse_checkpoints`](super::parse_checkpoints). The
/// function is total: malformed input yields fewer activities, never an
/// error. Callers must treat an empty result as a possible outcome.
///
/// Dates are contiguous: activity `n` lands on `start_date + (n - 1)` days.
pub fn parse_schedule(
    text: &str,
    course_id: i64,
    start_date: NaiveDate,
) -> Vec<ParsedActivity> {
    let mut activities = Vec::new();
    let mut current_week: Option<i64> = None;
    let mut day_counter: i64 = 0;
    let mut in_checkpoint = false;
    let mut skipped: usize = 0;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        // Week headers take priority over everything else and close any
        // open checkpoint section
        if let Some(caps) = week_header_re().captures(line) {
            if let Ok(week) = caps[1].parse::<i64>() {
                current_week = Some(week);
                in_checkpoint = false;
                continue;
            }
        }

        // Checkpoint and test lines are handled by the checkpoint pass
        let lower = line.to_lowercase();
        if lower.contains("checkpoint") {
            in_checkpoint = true;
            continue;
        }
        if lower.contains("test")
            || lower.starts_with("questions:")
            || lower.starts_with("solutions:")
        {
            continue;
        }

        if in_checkpoint {
            skipped += 1;
            continue;
        }

        let (day_match, week) = match (day_line_re().captures(line), current_week) {
            (Some(caps), Some(week)) => (caps, week),
            _ => {
                skipped += 1;
                continue;
            }
        };

        let description = day_match[2].trim();
        day_counter += 1;

        activities.push(ParsedActivity {
            course_id,
            week_number: week,
            day_number: day_counter,
            day_of_week: (day_counter - 1) % 7 + 1,
            scheduled_date: start_date + Duration::days(day_counter - 1),
            title: strip_bullet(line),
            description: String::new(),
            duration_minutes: extract_duration_minutes(description),
            activity_type: ActivityType::classify(description),
        });
    }

    debug!(
        emitted = activities.len(),
        skipped, "parsed schedule text into activities"
    );

    activities
}

/// Strip a leading bullet marker and surrounding whitespace
fn strip_bullet(line: &str) -> String {
    line.trim_start_matches(['-', '*', '•', ' ']).trim().to_string()
}

/// Extract a duration from day-line text.
///
/// An hour expression wins over a minute expression when both appear;
/// unparseable text falls back to [`DEFAULT_DURATION_MINUTES`].
fn extract_duration_minutes(text: &str) -> i64 {
    if let Some(caps) = hours_re().captures(text) {
        if let Ok(hours) = caps[1].parse::<f64>() {
            return (hours * 60.0).round() as i64;
        }
    }

    if let Some(caps) = minutes_re().captures(text) {
        if let Ok(minutes) = caps[1].parse::<i64>() {
            return minutes;
        }
    }

    DEFAULT_DURATION_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SCHEDULE: &str = r#"Week 1 (Sep 1-7)
- Day 1: Intro (30 min)
- Day 2: Practice loops (1 hour)
"#;

    fn start() -> NaiveDate {
        // A Monday
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    #[test]
    fn test_parse_sample_schedule() {
        let activities = parse_schedule(SAMPLE_SCHEDULE, 1, start());
        assert_eq!(activities.len(), 2);

        let first = &activities[0];
        assert_eq!(first.week_number, 1);
        assert_eq!(first.day_number, 1);
        assert_eq!(first.scheduled_date, NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
        assert_eq!(first.duration_minutes, 30);
        assert_eq!(first.activity_type, ActivityType::Study);
        assert_eq!(first.title, "Day 1: Intro (30 min)");
        assert!(first.description.is_empty());

        let second = &activities[1];
        assert_eq!(second.week_number, 1);
        assert_eq!(second.day_number, 2);
        assert_eq!(second.scheduled_date, NaiveDate::from_ymd_opt(2024, 9, 3).unwrap());
        assert_eq!(second.duration_minutes, 60);
        assert_eq!(second.activity_type, ActivityType::Practice);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(parse_schedule("", 1, start()).is_empty());
        assert!(parse_schedule("   \n\n  ", 1, start()).is_empty());
    }

    #[test]
    fn test_day_line_before_week_header_is_dropped() {
        let text = "- Day 1: Orphaned task\nWeek 1 (Sep 1-7)\n- Day 2: Kept task\n";
        let activities = parse_schedule(text, 1, start());
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].title, "Day 2: Kept task");
        // The counter only advances for accepted lines
        assert_eq!(activities[0].day_number, 1);
    }

    #[test]
    fn test_day_counter_spans_weeks() {
        let text = "Week 1 (Sep 1-7)\n\
                    - Day 1: One\n\
                    - Day 2: Two\n\
                    Week 2 (Sep 8-14)\n\
                    - Day 3: Three\n";
        let activities = parse_schedule(text, 1, start());
        assert_eq!(activities.len(), 3);
        assert_eq!(activities[2].week_number, 2);
        // Global counter, not reset at the week boundary
        assert_eq!(activities[2].day_number, 3);
        assert_eq!(
            activities[2].scheduled_date,
            NaiveDate::from_ymd_opt(2024, 9, 4).unwrap()
        );
    }

    #[test]
    fn test_dates_are_contiguous_and_anchored() {
        let mut text = String::from("Week 1 (Sep 1-7)\n");
        for n in 1..=10 {
            text.push_str(&format!("- Day {}: Task number {}\n", n, n));
        }
        let activities = parse_schedule(&text, 1, start());
        assert_eq!(activities.len(), 10);
        for (i, activity) in activities.iter().enumerate() {
            let n = i as i64 + 1;
            assert_eq!(activity.day_number, n);
            assert_eq!(activity.scheduled_date, start() + Duration::days(n - 1));
            assert_eq!(activity.day_of_week, (n - 1) % 7 + 1);
        }
        // Day 8 wraps back to day-of-week 1
        assert_eq!(activities[7].day_of_week, 1);
    }

    #[test]
    fn test_checkpoint_sections_are_skipped() {
        let text = "Week 1 (Sep 1-7)\n\
                    - Day 1: Intro\n\
                    Checkpoint 1: Fundamentals\n\
                    Questions: What is a variable?\n\
                    Solutions: A named storage location.\n\
                    Week 2 (Sep 8-14)\n\
                    - Day 2: Variables\n";
        let activities = parse_schedule(text, 1, start());
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[1].title, "Day 2: Variables");
        assert_eq!(activities[1].week_number, 2);
    }

    #[test]
    fn test_day_line_inside_checkpoint_section_is_skipped() {
        // A checkpoint section swallows day lines until the next week header
        let text = "Week 1 (Sep 1-7)\n\
                    Checkpoint 1: Midterm\n\
                    Day 5: solve the practice sheet\n";
        assert!(parse_schedule(text, 1, start()).is_empty());
    }

    #[test]
    fn test_day_line_containing_checkpoint_is_skipped() {
        // A line containing "checkpoint" never becomes an activity, even
        // with a valid day pattern in it
        let text = "Week 1 (Sep 1-7)\n- Day 1: Checkpoint preparation\n";
        assert!(parse_schedule(text, 1, start()).is_empty());
    }

    #[test]
    fn test_duration_free_description_defaults() {
        let text = "Week 1 (Sep 1-7)\n- Day 3: Review material\n";
        let activities = parse_schedule(text, 1, start());
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(activities[0].activity_type, ActivityType::Review);
    }

    #[test]
    fn test_hour_pattern_wins_over_minutes() {
        assert_eq!(extract_duration_minutes("45 min or 1.5 hours"), 90);
        assert_eq!(extract_duration_minutes("1.5 hours of drills"), 90);
        assert_eq!(extract_duration_minutes("2 hrs deep dive"), 120);
        assert_eq!(extract_duration_minutes("30 minutes of reading"), 30);
        assert_eq!(extract_duration_minutes("no duration here"), 45);
    }

    #[test]
    fn test_fractional_hours_round() {
        assert_eq!(extract_duration_minutes("0.75 hour warmup"), 45);
        assert_eq!(extract_duration_minutes("1.25 hours"), 75);
    }

    #[test]
    fn test_quiz_classifies_as_checkpoint() {
        let text = "Week 1 (Sep 1-7)\n- Day 1: Pop quiz on basics\n";
        let activities = parse_schedule(text, 1, start());
        assert_eq!(activities[0].activity_type, ActivityType::Checkpoint);
    }

    #[test]
    fn test_unrecognized_lines_are_skipped() {
        let text = "Study Plan for Rust\n\
                    Week 1 (Sep 1-7)\n\
                    Focus: getting started\n\
                    - Day 1: Install toolchain\n\
                    Some trailing commentary.\n";
        let activities = parse_schedule(text, 1, start());
        assert_eq!(activities.len(), 1);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse_schedule(SAMPLE_SCHEDULE, 7, start());
        let second = parse_schedule(SAMPLE_SCHEDULE, 7, start());
        assert_eq!(first, second);
    }

    #[test]
    fn test_bullet_variants_stripped_from_title() {
        let text = "Week 1 (Sep 1-7)\n* Day 1: Starred entry\n• Day 2: Dotted entry\n";
        let activities = parse_schedule(text, 1, start());
        assert_eq!(activities[0].title, "Day 1: Starred entry");
        assert_eq!(activities[1].title, "Day 2: Dotted entry");
    }
}
