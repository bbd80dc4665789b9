//! The order-step workflow engine.
//!
//! Orchestrates project creation and sequential step advancement,
//! enforcing the access policy and keeping the derived project status
//! in lock-step with the completed steps.
//!
//! Per step the only transition is Pending -> Completed, and completed
//! steps always form an unbroken prefix starting at step 1, so a
//! project as a whole moves strictly forward through the 13 stages.

use crate::actor::Actor;
use crate::error::{TrackError, TrackResult};
use crate::notify::Dispatcher;
use crate::policy;
use crate::project::model::{NewProject, Project, ProjectStep};
use crate::project;
use crate::Pagination;
use ordertrack_db::queries::projects;
use ordertrack_db::queries::steps::{self, CompleteOutcome};
use ordertrack_db::{DbError, DbPool};
use tracing::info;

/// Create a project for `owner`. Any authenticated actor may place an
/// order on their own behalf.
pub fn create_project(pool: &DbPool, owner: &Actor, details: &NewProject) -> TrackResult<Project> {
    let created = project::initialize(pool, &owner.id, details)?;
    info!(project_id = %created.id, owner_id = %owner.id, "project created");
    Ok(created)
}

fn fetch_project(pool: &DbPool, project_id: &str) -> TrackResult<Project> {
    match projects::get_project(pool, project_id) {
        Ok(row) => Ok(Project::from_row(row)),
        Err(DbError::NotFound(_)) => Err(TrackError::ProjectNotFound(project_id.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Mark step `step_number` of `project_id` completed.
///
/// Preconditions, checked in order: the project must exist, the actor
/// must be allowed to advance, the step must exist, the previous step
/// must be completed, and the step must still be pending. The step
/// write and the status write happen in one transaction, so a lost
/// race reports a conflict instead of a second success.
///
/// On success the project owner is notified of the completion.
pub fn advance_step(
    pool: &DbPool,
    dispatcher: &Dispatcher,
    actor: &Actor,
    project_id: &str,
    step_number: i64,
) -> TrackResult<ProjectStep> {
    let proj = fetch_project(pool, project_id)?;

    if !policy::can_advance(actor) {
        return Err(TrackError::Forbidden);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let row = match steps::complete_step(pool, project_id, step_number, &now)? {
        CompleteOutcome::Completed(row) => row,
        CompleteOutcome::StepMissing => {
            return Err(TrackError::StepNotFound {
                project_id: project_id.to_string(),
                step_number,
            })
        }
        CompleteOutcome::PreviousIncomplete => {
            return Err(TrackError::PreviousStepIncomplete { step_number })
        }
        CompleteOutcome::AlreadyCompleted => {
            return Err(TrackError::StepAlreadyCompleted { step_number })
        }
    };

    info!(project_id, step_number, step_name = %row.step_name, "step completed");

    let message = format!(
        "Step '{}' completed for project '{}'",
        row.step_name, proj.name
    );
    dispatcher.deliver(pool, &proj.owner_id, &message)?;

    Ok(ProjectStep::from_row(row))
}

/// Projects visible to `actor`: team members see all projects,
/// customers only their own. Ordered by creation time then id so
/// pagination is stable for a fixed actor and unchanged data.
pub fn list_visible_projects(
    pool: &DbPool,
    actor: &Actor,
    page: Pagination,
) -> TrackResult<Vec<Project>> {
    let rows = if actor.is_team() {
        projects::list_projects(pool, page.offset(), page.limit())?
    } else {
        projects::list_projects_by_owner(pool, &actor.id, page.offset(), page.limit())?
    };
    Ok(rows.into_iter().map(Project::from_row).collect())
}

/// Fetch one project. Existence is checked before visibility, so a
/// missing id is NotFound for every actor and a 403 never confirms
/// that a probed id exists.
pub fn get_project(pool: &DbPool, actor: &Actor, project_id: &str) -> TrackResult<Project> {
    let proj = fetch_project(pool, project_id)?;
    if !policy::can_view(actor, &proj) {
        return Err(TrackError::Forbidden);
    }
    Ok(proj)
}

/// Ordered steps of one project, gated like `get_project`.
pub fn get_steps(pool: &DbPool, actor: &Actor, project_id: &str) -> TrackResult<Vec<ProjectStep>> {
    let proj = fetch_project(pool, project_id)?;
    if !policy::can_view(actor, &proj) {
        return Err(TrackError::Forbidden);
    }
    project::list_steps(pool, project_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Role;
    use crate::catalog;
    use crate::identity;
    use crate::notify;
    use ordertrack_db::migrations::run_migrations;

    struct Fixture {
        pool: DbPool,
        dispatcher: Dispatcher,
        customer: Actor,
        team: Actor,
    }

    fn setup() -> Fixture {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();

        let customer =
            identity::register_actor(&pool, "Ada", "ada@example.com", Role::Customer).unwrap();
        let team =
            identity::register_actor(&pool, "Omid", "omid@example.com", Role::TeamMember).unwrap();

        Fixture {
            pool,
            dispatcher: Dispatcher::new(),
            customer,
            team,
        }
    }

    fn place_order(fx: &Fixture) -> Project {
        let details = NewProject {
            name: "Machining tools".to_string(),
            product_description: "CNC spare parts".to_string(),
            ..NewProject::default()
        };
        create_project(&fx.pool, &fx.customer, &details).unwrap()
    }

    /// Recompute the status from the step set and compare with the
    /// cached field.
    fn assert_status_agrees(fx: &Fixture, project_id: &str) {
        let project = get_project(&fx.pool, &fx.team, project_id).unwrap();
        let steps = get_steps(&fx.pool, &fx.team, project_id).unwrap();
        let highest = steps
            .iter()
            .filter(|s| s.completed)
            .max_by_key(|s| s.step_number)
            .unwrap();
        assert_eq!(project.status, highest.step_name);
    }

    #[test]
    fn customer_cannot_advance_own_project() {
        let fx = setup();
        let project = place_order(&fx);

        let err = advance_step(&fx.pool, &fx.dispatcher, &fx.customer, &project.id, 2).unwrap_err();
        assert!(matches!(err, TrackError::Forbidden));

        let steps = get_steps(&fx.pool, &fx.customer, &project.id).unwrap();
        assert!(!steps[1].completed);
    }

    #[test]
    fn advancing_missing_project_is_not_found() {
        let fx = setup();

        let err = advance_step(&fx.pool, &fx.dispatcher, &fx.team, "no-such-id", 2).unwrap_err();
        assert!(matches!(err, TrackError::ProjectNotFound(_)));
    }

    #[test]
    fn advancing_missing_step_is_not_found() {
        let fx = setup();
        let project = place_order(&fx);

        let err = advance_step(&fx.pool, &fx.dispatcher, &fx.team, &project.id, 14).unwrap_err();
        assert!(matches!(err, TrackError::StepNotFound { step_number: 14, .. }));
    }

    #[test]
    fn fulfillment_scenario() {
        let fx = setup();
        let project = place_order(&fx);
        assert_eq!(project.status, "Order Received");

        // Team completes step 2
        let step = advance_step(&fx.pool, &fx.dispatcher, &fx.team, &project.id, 2).unwrap();
        assert_eq!(step.step_name, "Contract Signed");
        let project = get_project(&fx.pool, &fx.team, &project.id).unwrap();
        assert_eq!(project.status, "Contract Signed");

        // Notification persisted for the owner
        let notifications =
            notify::list_notifications(&fx.pool, &fx.customer.id, Pagination::default()).unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("Contract Signed"));
        assert!(!notifications[0].read);

        // Step 4 before step 3 is a sequencing conflict, state unchanged
        let err = advance_step(&fx.pool, &fx.dispatcher, &fx.team, &project.id, 4).unwrap_err();
        assert!(matches!(err, TrackError::PreviousStepIncomplete { step_number: 4 }));
        let steps = get_steps(&fx.pool, &fx.team, &project.id).unwrap();
        assert!(!steps[2].completed);
        assert!(!steps[3].completed);
        assert_status_agrees(&fx, &project.id);

        // Steps 3 then 4 succeed
        advance_step(&fx.pool, &fx.dispatcher, &fx.team, &project.id, 3).unwrap();
        advance_step(&fx.pool, &fx.dispatcher, &fx.team, &project.id, 4).unwrap();
        let project = get_project(&fx.pool, &fx.team, &project.id).unwrap();
        assert_eq!(project.status, "Order Placed in China");
        assert_status_agrees(&fx, &project.id);
    }

    #[test]
    fn full_pipeline_keeps_invariants() {
        let fx = setup();
        let project = place_order(&fx);

        for step_number in 2..=catalog::stage_count() {
            advance_step(&fx.pool, &fx.dispatcher, &fx.team, &project.id, step_number).unwrap();
            assert_status_agrees(&fx, &project.id);

            // Completed steps form an unbroken prefix
            let steps = get_steps(&fx.pool, &fx.team, &project.id).unwrap();
            for step in &steps {
                assert_eq!(step.completed, step.step_number <= step_number);
                assert_eq!(step.completed, step.completed_at.is_some());
            }
        }

        let project = get_project(&fx.pool, &fx.team, &project.id).unwrap();
        assert_eq!(project.status, "Final Confirmation from User");
    }

    #[test]
    fn recompleting_a_step_is_a_conflict_and_notifies_once() {
        let fx = setup();
        let project = place_order(&fx);

        advance_step(&fx.pool, &fx.dispatcher, &fx.team, &project.id, 2).unwrap();
        let err = advance_step(&fx.pool, &fx.dispatcher, &fx.team, &project.id, 2).unwrap_err();
        assert!(matches!(err, TrackError::StepAlreadyCompleted { step_number: 2 }));

        let notifications =
            notify::list_notifications(&fx.pool, &fx.customer.id, Pagination::default()).unwrap();
        assert_eq!(notifications.len(), 1);
    }

    #[test]
    fn advancement_pushes_to_live_channel() {
        let fx = setup();
        let project = place_order(&fx);

        let mut sub = fx.dispatcher.subscribe(&fx.pool, &fx.customer.id).unwrap();
        advance_step(&fx.pool, &fx.dispatcher, &fx.team, &project.id, 2).unwrap();

        let push = sub.receiver.try_recv().unwrap();
        assert!(push.message.contains("Contract Signed"));
    }

    #[test]
    fn visibility_is_role_and_ownership_gated() {
        let fx = setup();
        let other =
            identity::register_actor(&fx.pool, "Eve", "eve@example.com", Role::Customer).unwrap();
        let project = place_order(&fx);

        // Owner and team can view
        assert!(get_project(&fx.pool, &fx.customer, &project.id).is_ok());
        assert!(get_project(&fx.pool, &fx.team, &project.id).is_ok());

        // Another customer cannot
        let err = get_project(&fx.pool, &other, &project.id).unwrap_err();
        assert!(matches!(err, TrackError::Forbidden));
        let err = get_steps(&fx.pool, &other, &project.id).unwrap_err();
        assert!(matches!(err, TrackError::Forbidden));

        // A missing id is NotFound even for a non-owning customer
        let err = get_project(&fx.pool, &other, "no-such-id").unwrap_err();
        assert!(matches!(err, TrackError::ProjectNotFound(_)));
    }

    #[test]
    fn listing_respects_ownership_and_pagination() {
        let fx = setup();
        let other =
            identity::register_actor(&fx.pool, "Eve", "eve@example.com", Role::Customer).unwrap();

        for _ in 0..3 {
            place_order(&fx);
        }
        let details = NewProject {
            name: "Textiles".to_string(),
            product_description: "Fabric rolls".to_string(),
            ..NewProject::default()
        };
        create_project(&fx.pool, &other, &details).unwrap();

        let own = list_visible_projects(&fx.pool, &fx.customer, Pagination::default()).unwrap();
        assert_eq!(own.len(), 3);
        assert!(own.iter().all(|p| p.owner_id == fx.customer.id));

        let all = list_visible_projects(&fx.pool, &fx.team, Pagination::default()).unwrap();
        assert_eq!(all.len(), 4);

        // Stable across pages
        let first = list_visible_projects(&fx.pool, &fx.team, Pagination { offset: 0, limit: 2 })
            .unwrap();
        let second = list_visible_projects(&fx.pool, &fx.team, Pagination { offset: 2, limit: 2 })
            .unwrap();
        let paged: Vec<_> = first.iter().chain(second.iter()).map(|p| p.id.clone()).collect();
        let unpaged: Vec<_> = all.iter().map(|p| p.id.clone()).collect();
        assert_eq!(paged, unpaged);

        // Negative bounds clamp to zero instead of reaching SQLite,
        // where LIMIT -1 would mean unlimited
        let none = list_visible_projects(
            &fx.pool,
            &fx.team,
            Pagination {
                offset: -3,
                limit: -1,
            },
        )
        .unwrap();
        assert!(none.is_empty());
    }
}
