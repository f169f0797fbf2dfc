//! Prompt templates for course generation
//!
//! Templates use `{{VARIABLE}}` placeholders that are rendered with a
//! [`PromptContext`]. The schedule template pins down the exact textual
//! convention (`Week n (...)` headers, `- Day n:` bullet lines, checkpoint
//! sections) that the schedule parser consumes.

use std::collections::HashMap;

/// Prompt template kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Conversational system prompt for narrowing down a course topic
    Conversation,
    /// Extract a short course name from recent conversation
    NameExtraction,
    /// Generate the study guide for a topic
    StudyGuide,
    /// Generate the week/day schedule for a topic
    Schedule,
    /// Generate theory and test content for one activity
    ActivityContent,
}

const CONVERSATION_PROMPT: &str = "\
You are a study-planning assistant. Help the user settle on a single,
well-scoped course topic they want to learn. Ask short clarifying questions
about their goals, background, and available time. Once the topic is clear,
confirm it in one sentence and tell the user you are ready to build their
course.";

const NAME_EXTRACTION_PROMPT: &str = "\
From the conversation below, extract the course topic the user wants to
study. Reply with the topic name only, at most five words, no punctuation.

Conversation:
{{CONVERSATION}}";

const STUDY_GUIDE_PROMPT: &str = "\
Write a study guide for a {{WEEKS}}-week course on {{TOPIC}}.

Cover the core concepts in a sensible learning order, list recommended
resources, and describe what the learner should be able to do after each
major milestone. Use plain headed sections.";

const SCHEDULE_PROMPT: &str = "\
Create a {{WEEKS}}-week study schedule for a course on {{TOPIC}}.

Format the schedule exactly like this:

Week 1 (Day 1-7)
- Day 1: <activity description> (45 min)
- Day 2: <activity description> (1 hour)
...

Number days continuously across the whole schedule: if Week 1 ends with
Day 7, Week 2 starts with Day 8. Include the estimated duration for each
day in parentheses, in minutes or hours. Mix study, review, and practice
days. After every few weeks add a checkpoint section in this form:

Checkpoint <n>: <title>
Questions:
<numbered questions>
Solutions:
<numbered solutions>

Do not add any commentary outside the schedule itself.";

const ACTIVITY_CONTENT_PROMPT: &str = "\
You are preparing materials for a course on {{TOPIC}}.
Today's activity: {{ACTIVITY}}

Write three sections, each introduced by its header on its own line:

Theory:
A focused explanation of today's material.

Questions:
Three short test questions on the material.

Solutions:
Worked answers to the questions.";

/// Get the raw template for a prompt kind
pub fn get_template(kind: PromptKind) -> &'static str {
    match kind {
        PromptKind::Conversation => CONVERSATION_PROMPT,
        PromptKind::NameExtraction => NAME_EXTRACTION_PROMPT,
        PromptKind::StudyGuide => STUDY_GUIDE_PROMPT,
        PromptKind::Schedule => SCHEDULE_PROMPT,
        PromptKind::ActivityContent => ACTIVITY_CONTENT_PROMPT,
    }
}

/// Context for rendering a prompt template
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// Variable substitutions
    variables: HashMap<String, String>,
}

impl PromptContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set the course topic
    pub fn with_topic(self, topic: impl Into<String>) -> Self {
        self.with("TOPIC", topic)
    }

    /// Set the course duration in weeks
    pub fn with_weeks(self, weeks: i64) -> Self {
        self.with("WEEKS", weeks.to_string())
    }

    /// Set the activity line for content generation
    pub fn with_activity(self, activity: impl Into<String>) -> Self {
        self.with("ACTIVITY", activity)
    }

    /// Set the conversation transcript for name extraction
    pub fn with_conversation(self, conversation: impl Into<String>) -> Self {
        self.with("CONVERSATION", conversation)
    }
}

/// Render a prompt template with the given context
pub fn render(kind: PromptKind, context: &PromptContext) -> String {
    let mut result = get_template(kind).to_string();

    for (key, value) in &context.variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}
