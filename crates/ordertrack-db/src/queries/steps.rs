//! Project-step database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

/// Project step row from database.
#[derive(Debug, Clone)]
pub struct StepRow {
    pub id: String,
    pub project_id: String,
    pub step_number: i64,
    pub step_name: String,
    pub completed: bool,
    pub completed_at: Option<String>,
}

fn step_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StepRow> {
    Ok(StepRow {
        id: row.get(0)?,
        project_id: row.get(1)?,
        step_number: row.get(2)?,
        step_name: row.get(3)?,
        completed: row.get(4)?,
        completed_at: row.get(5)?,
    })
}

/// List the steps of a project in pipeline order.
pub fn list_steps(pool: &DbPool, project_id: &str) -> DbResult<Vec<StepRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, project_id, step_number, step_name, completed, completed_at
             FROM project_steps WHERE project_id = ?1 ORDER BY step_number ASC",
        )?;

        let rows = stmt.query_map(params![project_id], step_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::Connection)
    })
}

/// Get one step of a project.
pub fn get_step(pool: &DbPool, project_id: &str, step_number: i64) -> DbResult<StepRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, project_id, step_number, step_name, completed, completed_at
             FROM project_steps WHERE project_id = ?1 AND step_number = ?2",
            params![project_id, step_number],
            step_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                DbError::NotFound(format!("Step {} of project {}", step_number, project_id))
            }
            e => DbError::Connection(e),
        })
    })
}

/// Outcome of a guarded step completion.
#[derive(Debug)]
pub enum CompleteOutcome {
    /// The step was completed and the project status updated.
    Completed(StepRow),
    /// No step with that number exists for the project.
    StepMissing,
    /// The step before the target is not completed yet.
    PreviousIncomplete,
    /// The step was completed earlier; nothing was written.
    AlreadyCompleted,
}

/// Complete a step and mirror its name onto the project status.
///
/// The whole read-check-write runs in one transaction: two racing
/// completions of the same step cannot both observe it pending, so at
/// most one caller gets `Completed` back.
pub fn complete_step(
    pool: &DbPool,
    project_id: &str,
    step_number: i64,
    completed_at: &str,
) -> DbResult<CompleteOutcome> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;

        let target: Option<(String, String, bool)> = tx
            .query_row(
                "SELECT id, step_name, completed FROM project_steps
                 WHERE project_id = ?1 AND step_number = ?2",
                params![project_id, step_number],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((step_id, step_name, completed)) = target else {
            return Ok(CompleteOutcome::StepMissing);
        };

        if step_number > 1 {
            let previous_done: bool = tx
                .query_row(
                    "SELECT completed FROM project_steps
                     WHERE project_id = ?1 AND step_number = ?2",
                    params![project_id, step_number - 1],
                    |row| row.get(0),
                )
                .optional()?
                .unwrap_or(false);

            if !previous_done {
                return Ok(CompleteOutcome::PreviousIncomplete);
            }
        }

        if completed {
            return Ok(CompleteOutcome::AlreadyCompleted);
        }

        tx.execute(
            "UPDATE project_steps SET completed = 1, completed_at = ?1 WHERE id = ?2",
            params![completed_at, step_id],
        )?;
        tx.execute(
            "UPDATE projects SET status = ?1 WHERE id = ?2",
            params![step_name, project_id],
        )?;

        tx.commit()?;

        Ok(CompleteOutcome::Completed(StepRow {
            id: step_id,
            project_id: project_id.to_string(),
            step_number,
            step_name,
            completed: true,
            completed_at: Some(completed_at.to_string()),
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use crate::queries::{actors, projects};
    use crate::queries::projects::{NewProjectRow, StepSeed};

    fn setup() -> (DbPool, String) {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();

        actors::create_actor(&pool, "actor-1", "Ada", "ada@example.com", "customer").unwrap();

        let seeds = [
            StepSeed {
                id: "step-1",
                step_number: 1,
                step_name: "Order Received",
                completed: true,
                completed_at: Some("2026-01-01T00:00:00+00:00"),
            },
            StepSeed {
                id: "step-2",
                step_number: 2,
                step_name: "Contract Signed",
                completed: false,
                completed_at: None,
            },
            StepSeed {
                id: "step-3",
                step_number: 3,
                step_name: "Advance Payment Received",
                completed: false,
                completed_at: None,
            },
        ];
        projects::create_project(
            &pool,
            &NewProjectRow {
                id: "proj-1",
                owner_id: "actor-1",
                name: "Order",
                description: None,
                product_description: "Widgets",
                product_url: None,
                product_image: None,
                product_count: 1,
                source_location: None,
                status: "Order Received",
            },
            &seeds,
        )
        .unwrap();

        (pool, "proj-1".to_string())
    }

    #[test]
    fn complete_in_order_updates_step_and_status() {
        let (pool, project_id) = setup();

        let outcome = complete_step(&pool, &project_id, 2, "2026-01-02T00:00:00+00:00").unwrap();
        let row = match outcome {
            CompleteOutcome::Completed(row) => row,
            other => panic!("expected Completed, got {:?}", other),
        };
        assert!(row.completed);
        assert_eq!(row.step_name, "Contract Signed");

        let project = projects::get_project(&pool, &project_id).unwrap();
        assert_eq!(project.status, "Contract Signed");
    }

    #[test]
    fn complete_out_of_order_reports_previous_incomplete() {
        let (pool, project_id) = setup();

        let outcome = complete_step(&pool, &project_id, 3, "2026-01-02T00:00:00+00:00").unwrap();
        assert!(matches!(outcome, CompleteOutcome::PreviousIncomplete));

        // Nothing was written
        let step = get_step(&pool, &project_id, 3).unwrap();
        assert!(!step.completed);
        assert!(step.completed_at.is_none());
        let project = projects::get_project(&pool, &project_id).unwrap();
        assert_eq!(project.status, "Order Received");
    }

    #[test]
    fn recompleting_a_step_reports_already_completed() {
        let (pool, project_id) = setup();

        let outcome = complete_step(&pool, &project_id, 1, "2026-01-02T00:00:00+00:00").unwrap();
        assert!(matches!(outcome, CompleteOutcome::AlreadyCompleted));

        // Original completion timestamp preserved
        let step = get_step(&pool, &project_id, 1).unwrap();
        assert_eq!(step.completed_at.as_deref(), Some("2026-01-01T00:00:00+00:00"));
    }

    #[test]
    fn recompleting_mid_pipeline_step_reports_already_completed() {
        let (pool, project_id) = setup();

        complete_step(&pool, &project_id, 2, "2026-01-02T00:00:00+00:00").unwrap();
        let outcome = complete_step(&pool, &project_id, 2, "2026-01-03T00:00:00+00:00").unwrap();
        assert!(matches!(outcome, CompleteOutcome::AlreadyCompleted));

        let step = get_step(&pool, &project_id, 2).unwrap();
        assert_eq!(step.completed_at.as_deref(), Some("2026-01-02T00:00:00+00:00"));
    }

    #[test]
    fn unknown_step_reports_missing() {
        let (pool, project_id) = setup();

        let outcome = complete_step(&pool, &project_id, 99, "2026-01-02T00:00:00+00:00").unwrap();
        assert!(matches!(outcome, CompleteOutcome::StepMissing));
    }
}
