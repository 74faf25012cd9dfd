use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Topic priority. Ordering for scheduling is High < Medium < Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort key: lower rank is scheduled first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" | "h" => Some(Priority::High),
            "medium" | "med" | "m" => Some(Priority::Medium),
            "low" | "l" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

// A topic the user needs to study before the exam
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
    pub priority: Priority,
    pub hours: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    New,
    Review,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::New => "new",
            SessionKind::Review => "review",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" | "n" => Some(SessionKind::New),
            "review" | "r" => Some(SessionKind::Review),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::New => "New Material",
            SessionKind::Review => "Review from 2 days ago",
        }
    }
}

// One allocated block of time for a topic on a given day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSession {
    pub hours: f64,
    pub kind: SessionKind,
}

// All sessions for one topic on one day, in assignment order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDaySchedule {
    pub topic_name: String,
    pub sessions: Vec<ScheduleSession>,
    pub total_hours: f64,
}

impl TopicDaySchedule {
    pub fn new(topic_name: &str) -> Self {
        Self {
            topic_name: topic_name.to_string(),
            sessions: Vec::new(),
            total_hours: 0.0,
        }
    }

    pub fn push_session(&mut self, hours: f64, kind: SessionKind) {
        self.sessions.push(ScheduleSession { hours, kind });
        self.total_hours += hours;
    }
}

// One calendar day of the study horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub day_number: i64,
    pub topics: Vec<TopicDaySchedule>,
    pub total_scheduled_hours: f64,
    pub available_hours: f64,
}

impl DaySchedule {
    pub fn free_hours(&self) -> f64 {
        self.available_hours - self.total_scheduled_hours
    }

    /// Record a session, merging into an existing entry for the same topic
    /// name on this day if one exists.
    pub fn add_session(&mut self, topic_name: &str, hours: f64, kind: SessionKind) {
        let idx = match self.topics.iter().position(|t| t.topic_name == topic_name) {
            Some(i) => i,
            None => {
                self.topics.push(TopicDaySchedule::new(topic_name));
                self.topics.len() - 1
            }
        };
        self.topics[idx].push_session(hours, kind);
        self.total_scheduled_hours += hours;
    }
}

// A saved plan: the inputs a schedule was generated from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPlan {
    pub id: i64,
    pub exam_date: NaiveDate,
    pub daily_hours: f64,
    pub academic_level: String,
    pub created_at: String,
}

// Coarse subject category for resource suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Math,
    Programming,
    Theory,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Math => "math",
            Category::Programming => "programming",
            Category::Theory => "theory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Math => "Math",
            Category::Programming => "Programming",
            Category::Theory => "Theory",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeAdvice {
    pub amount: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardAdvice {
    pub count: String,
    pub tool: String,
}

// The full suggestion bundle for one (topic, academic level) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceBundle {
    pub category: Category,
    pub how_to_learn: Vec<String>,
    pub practice: PracticeAdvice,
    pub book_suggestions: Vec<String>,
    pub key_concepts: Vec<String>,
    pub flashcards: FlashcardAdvice,
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
