//! Project-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;

/// Project row from database.
#[derive(Debug, Clone)]
pub struct ProjectRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub product_description: String,
    pub product_url: Option<String>,
    pub product_image: Option<String>,
    pub product_count: i64,
    pub source_location: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// Fields for a new project row.
#[derive(Debug)]
pub struct NewProjectRow<'a> {
    pub id: &'a str,
    pub owner_id: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub product_description: &'a str,
    pub product_url: Option<&'a str>,
    pub product_image: Option<&'a str>,
    pub product_count: i64,
    pub source_location: Option<&'a str>,
    pub status: &'a str,
}

/// Seed for one step row inserted at project creation.
#[derive(Debug)]
pub struct StepSeed<'a> {
    pub id: &'a str,
    pub step_number: i64,
    pub step_name: &'a str,
    pub completed: bool,
    pub completed_at: Option<&'a str>,
}

/// Create a project together with its step rows, in one transaction.
pub fn create_project(
    pool: &DbPool,
    project: &NewProjectRow<'_>,
    steps: &[StepSeed<'_>],
) -> DbResult<()> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO projects (id, owner_id, name, description, product_description,
                                   product_url, product_image, product_count, source_location, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                project.id,
                project.owner_id,
                project.name,
                project.description,
                project.product_description,
                project.product_url,
                project.product_image,
                project.product_count,
                project.source_location,
                project.status,
            ],
        )?;

        for step in steps {
            tx.execute(
                "INSERT INTO project_steps (id, project_id, step_number, step_name, completed, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    step.id,
                    project.id,
                    step.step_number,
                    step.step_name,
                    step.completed,
                    step.completed_at,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    })
}

fn project_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectRow> {
    Ok(ProjectRow {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        product_description: row.get(4)?,
        product_url: row.get(5)?,
        product_image: row.get(6)?,
        product_count: row.get(7)?,
        source_location: row.get(8)?,
        status: row.get(9)?,
        created_at: row.get(10)?,
    })
}

const PROJECT_COLUMNS: &str = "id, owner_id, name, description, product_description,
                               product_url, product_image, product_count, source_location,
                               status, created_at";

/// Get a project by ID.
pub fn get_project(pool: &DbPool, id: &str) -> DbResult<ProjectRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
            params![id],
            project_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Project: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List all projects, creation order. The (created_at, id) ordering
/// keeps pagination stable across pages.
pub fn list_projects(pool: &DbPool, offset: i64, limit: i64) -> DbResult<Vec<ProjectRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             ORDER BY created_at ASC, id ASC LIMIT ?1 OFFSET ?2"
        ))?;

        let rows = stmt.query_map(params![limit, offset], project_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::Connection)
    })
}

/// List projects owned by one actor, creation order.
pub fn list_projects_by_owner(
    pool: &DbPool,
    owner_id: &str,
    offset: i64,
    limit: i64,
) -> DbResult<Vec<ProjectRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE owner_id = ?1
             ORDER BY created_at ASC, id ASC LIMIT ?2 OFFSET ?3"
        ))?;

        let rows = stmt.query_map(params![owner_id, limit, offset], project_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::Connection)
    })
}
