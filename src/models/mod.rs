//! Domain models for studyplan.
//!
//! # Core Concepts
//!
//! - [`Plan`]: A complete study schedule for one exam — the subjects to cover
//!   and a day-by-day sequence of [`ScheduleItem`] sessions leading up to the
//!   exam date.
//! - [`Subject`]: One prioritized area of study within a plan, with an hour
//!   budget that the generator rescales to fit the available time window.
//! - [`ScheduleItem`]: One dated block of study time (at most 3 hours),
//!   labelled with a topic and a completion flag.
//! - [`StoredChat`]: A saved assistant conversation. Chats share the backing
//!   store with plans but are otherwise independent records.
//!
//! Plans are created only by the schedule generator and mutated only by
//! toggling a session's completion flag or by deletion.

mod chat;
mod plan;

pub use chat::*;
pub use plan::*;
