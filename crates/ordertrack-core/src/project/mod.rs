//! Project aggregate.
//!
//! Owns a project's steps and the derived status field.

pub mod model;

use crate::catalog;
use crate::error::TrackResult;
use model::{NewProject, Project, ProjectStep};
use ordertrack_db::queries::projects::{self, NewProjectRow, StepSeed};
use ordertrack_db::queries::steps;
use ordertrack_db::DbPool;
use uuid::Uuid;

/// Create a project together with its pipeline steps.
///
/// Placing the order is itself the first stage, so step 1 is completed
/// at creation time and the status starts at the first stage name.
/// The project row and all step rows are inserted in one transaction.
pub fn initialize(pool: &DbPool, owner_id: &str, details: &NewProject) -> TrackResult<Project> {
    let project_id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let step_ids: Vec<String> = catalog::definitions()
        .iter()
        .map(|_| Uuid::new_v4().to_string())
        .collect();
    let seeds: Vec<StepSeed<'_>> = catalog::definitions()
        .iter()
        .zip(&step_ids)
        .map(|(&(step_number, step_name), id)| StepSeed {
            id,
            step_number,
            step_name,
            completed: step_number == 1,
            completed_at: (step_number == 1).then_some(now.as_str()),
        })
        .collect();

    let row = NewProjectRow {
        id: &project_id,
        owner_id,
        name: &details.name,
        description: details.description.as_deref(),
        product_description: &details.product_description,
        product_url: details.product_url.as_deref(),
        product_image: details.product_image.as_deref(),
        product_count: details.product_count,
        source_location: details.source_location.as_deref(),
        status: catalog::first_stage(),
    };
    projects::create_project(pool, &row, &seeds)?;

    let created = projects::get_project(pool, &project_id)?;
    Ok(Project::from_row(created))
}

/// Cached stage read. The workflow engine keeps this field in
/// lock-step with the step set, so no recomputation happens here.
pub fn current_status(project: &Project) -> &str {
    &project.status
}

/// Ordered steps for a project.
pub fn list_steps(pool: &DbPool, project_id: &str) -> TrackResult<Vec<ProjectStep>> {
    let rows = steps::list_steps(pool, project_id)?;
    Ok(rows.into_iter().map(ProjectStep::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordertrack_db::migrations::run_migrations;
    use ordertrack_db::queries::actors;

    fn setup() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        actors::create_actor(&pool, "cust-1", "Ada", "ada@example.com", "customer").unwrap();
        pool
    }

    fn order_details() -> NewProject {
        NewProject {
            name: "Machining tools".to_string(),
            product_description: "CNC spare parts".to_string(),
            ..NewProject::default()
        }
    }

    #[test]
    fn initialize_creates_thirteen_steps_with_first_completed() {
        let pool = setup();
        let project = initialize(&pool, "cust-1", &order_details()).unwrap();

        let steps = list_steps(&pool, &project.id).unwrap();
        assert_eq!(steps.len(), 13);

        // Step numbers are exactly 1..=13, in order
        for (index, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, index as i64 + 1);
        }

        assert!(steps[0].completed);
        assert!(steps[0].completed_at.is_some());
        for step in &steps[1..] {
            assert!(!step.completed);
            assert!(step.completed_at.is_none());
        }

        assert_eq!(project.status, "Order Received");
        assert_eq!(current_status(&project), steps[0].step_name);
    }

    #[test]
    fn completed_flag_and_timestamp_agree() {
        let pool = setup();
        let project = initialize(&pool, "cust-1", &order_details()).unwrap();

        for step in list_steps(&pool, &project.id).unwrap() {
            assert_eq!(step.completed, step.completed_at.is_some());
        }
    }
}
