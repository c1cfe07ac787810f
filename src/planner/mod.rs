//! Study-plan schedule generation.
//!
//! The generator is a pure function from a [`PlanInput`] to a [`Plan`]: it
//! rescales the requested subject hours so they exactly fill the time window
//! between today and the exam, then packs subjects into days greedily in
//! priority order, at most [`MAX_SESSION_HOURS`] per session.

mod topics;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Plan, PlanInput, ScheduleItem, Subject};

/// Hard cap on a single session, in hours. Long subjects are split across
/// sessions and days rather than scheduled as one block.
pub const MAX_SESSION_HOURS: f64 = 3.0;

/// Generate a plan starting from today (UTC).
pub fn generate_plan(input: &PlanInput) -> Result<Plan> {
    generate_plan_on(input, Utc::now().date_naive())
}

/// Generate a plan with an explicit start date.
///
/// Deterministic apart from freshly minted ids and timestamps, which makes it
/// the entry point tests use. The exam day itself is not scheduled; an exam
/// today still yields a single day of study.
pub fn generate_plan_on(input: &PlanInput, today: NaiveDate) -> Result<Plan> {
    validate(input, today)?;

    let days_until_exam = (input.exam_date - today).num_days().max(1);
    let total_available_hours = days_until_exam as f64 * input.hours_per_day;

    // Higher priority first; ties keep caller order (stable sort), so the
    // caller's ordering decides who gets covered first when time is tight.
    let mut sorted: Vec<_> = input.subjects.iter().collect();
    sorted.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));

    // Proportional rescale, not a clamp: a generous window grows every
    // subject's allocation, a tight one shrinks them all, so the available
    // time is always exactly filled (subject to integer rounding).
    let total_estimated_hours: f64 = input.subjects.iter().map(|s| s.estimated_hours).sum();
    let adjustment_factor = total_available_hours / total_estimated_hours;

    let subjects: Vec<Subject> = sorted
        .iter()
        .enumerate()
        .map(|(index, s)| Subject {
            id: format!("subject_{index}"),
            name: s.name.clone(),
            priority: s.priority,
            estimated_hours: (s.estimated_hours * adjustment_factor).round(),
            completed: false,
        })
        .collect();

    let schedule = build_daily_schedule(&subjects, days_until_exam, input.hours_per_day, today);

    let now = Utc::now();
    Ok(Plan {
        id: Uuid::new_v4(),
        title: format!("Study Plan for {}", input.exam_date.format("%b %-d, %Y")),
        exam_date: input.exam_date,
        total_hours_per_day: input.hours_per_day,
        subjects,
        schedule,
        created_at: now,
        updated_at: now,
    })
}

fn validate(input: &PlanInput, today: NaiveDate) -> Result<()> {
    if input.exam_date < today {
        return Err(Error::InvalidInput(format!(
            "exam date {} is in the past",
            input.exam_date
        )));
    }
    if !input.hours_per_day.is_finite() || input.hours_per_day <= 0.0 {
        return Err(Error::InvalidInput(
            "hours per day must be positive".to_string(),
        ));
    }
    if input.subjects.is_empty() {
        return Err(Error::InvalidInput("no subjects given".to_string()));
    }
    let total: f64 = input.subjects.iter().map(|s| s.estimated_hours).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(Error::InvalidInput(
            "total estimated hours must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Walk day by day from `start`, pulling hours from the current subject until
/// its budget is spent, then moving to the next.
///
/// A subject's remaining budget is checked before each allocation attempt, so
/// subjects rescaled down to zero hours are skipped without emitting sessions
/// and without stalling the day loop. Days after the last subject exhausts are
/// simply left empty.
fn build_daily_schedule(
    subjects: &[Subject],
    days_until_exam: i64,
    hours_per_day: f64,
    start: NaiveDate,
) -> Vec<ScheduleItem> {
    let mut schedule = Vec::new();
    let mut subject_index = 0;
    let mut remaining_for_subject = subjects
        .first()
        .map(|s| s.estimated_hours)
        .unwrap_or_default();

    for day in 0..days_until_exam {
        let date = start + Duration::days(day);
        let mut remaining_for_day = hours_per_day;

        while remaining_for_day > 0.0 && subject_index < subjects.len() {
            let subject = &subjects[subject_index];
            let hours = remaining_for_day
                .min(remaining_for_subject)
                .min(MAX_SESSION_HOURS);

            if hours > 0.0 {
                schedule.push(ScheduleItem {
                    id: Uuid::new_v4(),
                    date,
                    subject: subject.name.clone(),
                    topic: topics::topic_for(&subject.name, day as usize).to_string(),
                    duration: hours,
                    completed: false,
                    notes: None,
                });
                remaining_for_day -= hours;
                remaining_for_subject -= hours;
            }

            if remaining_for_subject <= 0.0 {
                subject_index += 1;
                remaining_for_subject = subjects
                    .get(subject_index)
                    .map(|s| s.estimated_hours)
                    .unwrap_or_default();
            }
        }
    }

    schedule
}
