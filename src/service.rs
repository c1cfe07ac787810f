//! Composition root wiring the pure generator to the stateful store.
//!
//! This layer only sequences the two; it adds no invariants of its own. The
//! UI/CLI layer talks to a [`PlanService`] and never to the generator or the
//! store directly.

use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;
use crate::models::{Plan, PlanInput, UpdateScheduleItemInput};
use crate::planner;

pub struct PlanService {
    db: Database,
}

impl PlanService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Generate a plan from `input` and persist it.
    ///
    /// Invalid input and write failures both surface here: a plan the caller
    /// believes exists must actually have been stored.
    pub fn create_plan(&self, input: &PlanInput) -> Result<Plan> {
        let plan = planner::generate_plan(input)?;
        self.db.save_plan(&plan)?;
        Ok(plan)
    }

    /// Mark one session as done (or not done). Best effort, see
    /// [`Database::update_schedule_item`].
    pub fn toggle_session(&self, plan_id: Uuid, item_id: Uuid, completed: bool) {
        self.db.update_schedule_item(
            plan_id,
            item_id,
            UpdateScheduleItemInput {
                completed: Some(completed),
                ..Default::default()
            },
        );
    }

    /// Delete a plan. Returns whether it existed.
    pub fn remove_plan(&self, plan_id: Uuid) -> Result<bool> {
        self.db.delete_plan(plan_id)
    }

    pub fn plans(&self) -> Vec<Plan> {
        self.db.get_all_plans()
    }

    pub fn plan(&self, plan_id: Uuid) -> Option<Plan> {
        self.db.get_plan(plan_id)
    }
}
