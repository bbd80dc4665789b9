//! Access policy.
//!
//! Pure role/ownership predicates. The workflow engine is the sole
//! caller and turns a false result into a Forbidden error.

use crate::actor::Actor;
use crate::project::model::Project;

/// Whether `actor` may read `project` and its steps. Team members see
/// everything; customers only their own projects. There is no
/// field-level redaction: view access is all or nothing.
pub fn can_view(actor: &Actor, project: &Project) -> bool {
    actor.is_team() || actor.id == project.owner_id
}

/// Whether `actor` may advance steps. Only team members ever can;
/// customers cannot self-advance even on projects they own.
pub fn can_advance(actor: &Actor) -> bool {
    actor.is_team()
}
