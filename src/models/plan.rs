use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A complete study schedule for one exam.
///
/// Plans are built in one shot by the schedule generator and are immutable
/// afterwards except for two operations: toggling a session's `completed`
/// flag and deleting the whole plan. `updated_at` is refreshed on every
/// mutation.
///
/// # Invariants
/// - For every subject, the summed duration of its schedule items never
///   exceeds the subject's (rescaled) `estimated_hours`.
/// - The schedule covers calendar days from the generation date up to
///   `exam_date` exclusive, unless subjects exhaust earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub title: String,
    pub exam_date: NaiveDate,
    pub total_hours_per_day: f64,
    pub subjects: Vec<Subject>,
    pub schedule: Vec<ScheduleItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One prioritized area of study within a plan.
///
/// `estimated_hours` holds the caller's requested hours only until generation
/// finalizes the plan; the stored value is the rescaled allocation and is
/// frozen from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// `subject_<index>` in priority-sorted order, unique within the plan.
    pub id: String,
    pub name: String,
    pub priority: Priority,
    pub estimated_hours: f64,
    pub completed: bool,
}

/// Priority of a subject.
///
/// Priority only decides the order in which subjects are packed into the
/// schedule (higher first); it does not weight how many hours a subject
/// receives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ordinal weight used to sort subjects for allocation.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// One dated block of study time within a plan's schedule.
///
/// `date` is a calendar day bucket with no time-of-day meaning. `subject` is
/// the denormalized subject name, not a subject id. Sessions are capped at
/// 3 hours to force spacing and variety across days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: Uuid,
    pub date: NaiveDate,
    pub subject: String,
    pub topic: String,
    /// Hours, always in `(0, 3]`.
    pub duration: f64,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Input for generating a new plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInput {
    /// Exam date; must be today or later.
    pub exam_date: NaiveDate,
    /// Daily study budget in hours; must be positive.
    pub hours_per_day: f64,
    /// Subjects in caller order. Order breaks priority ties during allocation.
    pub subjects: Vec<SubjectInput>,
}

/// One requested subject within a [`PlanInput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectInput {
    pub name: String,
    pub priority: Priority,
    pub estimated_hours: f64,
}

/// Partial update for a schedule item. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateScheduleItemInput {
    pub completed: Option<bool>,
    pub notes: Option<String>,
}
