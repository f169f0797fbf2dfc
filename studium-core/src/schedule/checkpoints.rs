//! Checkpoint test extraction from schedule text

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A checkpoint test extracted from schedule text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCheckpoint {
    /// Owning course
    pub course_id: i64,
    /// Ordinal of the checkpoint within the schedule, starting at 1
    pub checkpoint_number: i64,
    /// Week number the checkpoint follows (last seen week header)
    pub week_after: i64,
    /// Checkpoint title, or the trimmed header line when none is given
    pub title: String,
    /// Accumulated question lines
    pub questions: String,
    /// Accumulated solution lines
    pub solutions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Questions,
    Solutions,
}

fn week_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)week\s*(\d+)\s*\(").unwrap())
}

fn checkpoint_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)checkpoint\s*(\d+)?\s*:?\s*(.*)").unwrap())
}

/// Extract checkpoint tests from generated schedule text.
///
/// A second, independent pass over the same text the activity parser
/// consumes. A checkpoint section opens at a line containing "Checkpoint"
/// (after at least one week header) and runs until the next week or
/// checkpoint header; `Questions:` and `Solutions:` lines switch which
/// buffer subsequent lines accumulate into. Same lenient policy as the
/// activity pass: unrecognized structure yields fewer checkpoints, never an
/// error.
pub fn parse_checkpoints(text: &str, course_id: i64) -> Vec<ParsedCheckpoint> {
    let mut checkpoints: Vec<ParsedCheckpoint> = Vec::new();
    let mut current: Option<ParsedCheckpoint> = None;
    let mut current_week: Option<i64> = None;
    let mut section = Section::None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = week_header_re().captures(line) {
            if let Ok(week) = caps[1].parse::<i64>() {
                if let Some(checkpoint) = current.take() {
                    checkpoints.push(checkpoint);
                }
                current_week = Some(week);
                section = Section::None;
                continue;
            }
        }

        let lower = line.to_lowercase();
        if lower.contains("checkpoint") {
            if let Some(checkpoint) = current.take() {
                checkpoints.push(checkpoint);
            }
            section = Section::None;

            // A checkpoint before any week header has no anchor; drop it
            let Some(week) = current_week else { continue };

            let caps = match checkpoint_header_re().captures(line) {
                Some(caps) => caps,
                None => continue,
            };
            let number = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .unwrap_or(checkpoints.len() as i64 + 1);
            let title = match caps.get(2).map(|m| m.as_str().trim()) {
                Some(rest) if !rest.is_empty() => rest.to_string(),
                _ => line.to_string(),
            };

            current = Some(ParsedCheckpoint {
                course_id,
                checkpoint_number: number,
                week_after: week,
                title,
                questions: String::new(),
                solutions: String::new(),
            });
            continue;
        }

        if let Some(rest) = strip_section_prefix(line, "questions:") {
            section = Section::Questions;
            if let (Some(checkpoint), false) = (current.as_mut(), rest.is_empty()) {
                push_line(&mut checkpoint.questions, rest);
            }
            continue;
        }

        if let Some(rest) = strip_section_prefix(line, "solutions:") {
            section = Section::Solutions;
            if let (Some(checkpoint), false) = (current.as_mut(), rest.is_empty()) {
                push_line(&mut checkpoint.solutions, rest);
            }
            continue;
        }

        if let Some(checkpoint) = current.as_mut() {
            match section {
                Section::Questions => push_line(&mut checkpoint.questions, line),
                Section::Solutions => push_line(&mut checkpoint.solutions, line),
                Section::None => {}
            }
        }
    }

    if let Some(checkpoint) = current.take() {
        checkpoints.push(checkpoint);
    }

    debug!(count = checkpoints.len(), "parsed checkpoint sections");

    checkpoints
}

/// Return the text after a section prefix, or None when the line does not
/// start with it (ASCII case-insensitive)
fn strip_section_prefix<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(line[prefix.len()..].trim())
    } else {
        None
    }
}

fn push_line(buffer: &mut String, line: &str) {
    if !buffer.is_empty() {
        buffer.push('\n');
    }
    buffer.push_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SCHEDULE: &str = r#"Week 1 (Sep 1-7)
- Day 1: Intro (30 min)
- Day 2: Practice loops (1 hour)

Week 2 (Sep 8-14)
- Day 3: Functions (45 min)

Checkpoint 1: Fundamentals
Questions:
1. What is a variable?
2. What does a loop do?
Solutions:
1. A named storage location.
2. Repeats a block of code.

Week 3 (Sep 15-21)
- Day 4: Structs (1 hour)
"#;

    #[test]
    fn test_parse_single_checkpoint() {
        let checkpoints = parse_checkpoints(SAMPLE_SCHEDULE, 1);
        assert_eq!(checkpoints.len(), 1);

        let checkpoint = &checkpoints[0];
        assert_eq!(checkpoint.course_id, 1);
        assert_eq!(checkpoint.checkpoint_number, 1);
        assert_eq!(checkpoint.week_after, 2);
        assert_eq!(checkpoint.title, "Fundamentals");
        assert!(checkpoint.questions.contains("What is a variable?"));
        assert!(checkpoint.solutions.contains("Repeats a block of code."));
    }

    #[test]
    fn test_question_and_solution_lines_accumulate() {
        let checkpoints = parse_checkpoints(SAMPLE_SCHEDULE, 1);
        let checkpoint = &checkpoints[0];
        assert_eq!(checkpoint.questions.lines().count(), 2);
        assert_eq!(checkpoint.solutions.lines().count(), 2);
    }

    #[test]
    fn test_no_checkpoints_in_plain_schedule() {
        let text = "Week 1 (Sep 1-7)\n- Day 1: Intro\n";
        assert!(parse_checkpoints(text, 1).is_empty());
    }

    #[test]
    fn test_checkpoint_before_week_header_is_dropped() {
        let text = "Checkpoint 1: Too early\nQuestions:\n1. Why?\n";
        assert!(parse_checkpoints(text, 1).is_empty());
    }

    #[test]
    fn test_unnumbered_checkpoint_gets_sequential_number() {
        let text = "Week 1 (Sep 1-7)\n\
                    Checkpoint: First test\n\
                    Questions:\nQ1\n\
                    Week 2 (Sep 8-14)\n\
                    Checkpoint: Second test\n\
                    Questions:\nQ2\n";
        let checkpoints = parse_checkpoints(text, 1);
        assert_eq!(checkpoints.len(), 2);
        assert_eq!(checkpoints[0].checkpoint_number, 1);
        assert_eq!(checkpoints[1].checkpoint_number, 2);
        assert_eq!(checkpoints[1].week_after, 2);
    }

    #[test]
    fn test_inline_question_text_after_prefix() {
        let text = "Week 1 (Sep 1-7)\n\
                    Checkpoint 1: Quick check\n\
                    Questions: What is ownership?\n\
                    Solutions: Move semantics.\n";
        let checkpoints = parse_checkpoints(text, 1);
        assert_eq!(checkpoints[0].questions, "What is ownership?");
        assert_eq!(checkpoints[0].solutions, "Move semantics.");
    }

    #[test]
    fn test_second_checkpoint_header_flushes_first() {
        let text = "Week 4 (Oct 1-7)\n\
                    Checkpoint 1: Alpha\n\
                    Questions:\nQ\n\
                    Checkpoint 2: Beta\n\
                    Questions:\nR\n";
        let checkpoints = parse_checkpoints(text, 1);
        assert_eq!(checkpoints.len(), 2);
        assert_eq!(checkpoints[0].title, "Alpha");
        assert_eq!(checkpoints[1].title, "Beta");
        assert_eq!(checkpoints[1].week_after, 4);
    }
}
