//! Project domain models.

use ordertrack_db::queries::projects::ProjectRow;
use ordertrack_db::queries::steps::StepRow;
use serde::{Deserialize, Serialize};

/// One tracked order moving through the fulfillment pipeline.
///
/// `status` mirrors the name of the highest-numbered completed step.
/// It is written only by the workflow engine, in the same transaction
/// as the step it mirrors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
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

impl Project {
    /// Create a Project from a database row.
    pub fn from_row(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            product_description: row.product_description,
            product_url: row.product_url,
            product_image: row.product_image,
            product_count: row.product_count,
            source_location: row.source_location,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// One of the 13 fixed stages of a project's pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStep {
    pub id: String,
    pub project_id: String,
    pub step_number: i64,
    pub step_name: String,
    pub completed: bool,
    pub completed_at: Option<String>,
}

impl ProjectStep {
    /// Create a ProjectStep from a database row.
    pub fn from_row(row: StepRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            step_number: row.step_number,
            step_name: row.step_name,
            completed: row.completed,
            completed_at: row.completed_at,
        }
    }
}

/// Details supplied when a customer places an order.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub product_description: String,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default = "default_product_count")]
    pub product_count: i64,
    #[serde(default)]
    pub source_location: Option<String>,
}

fn default_product_count() -> i64 {
    1
}

impl Default for NewProject {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            product_description: String::new(),
            product_url: None,
            product_image: None,
            product_count: default_product_count(),
            source_location: None,
        }
    }
}
