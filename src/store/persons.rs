use rollbook_models::{ClassId, Person, PersonId, Role, SchoolId};
use tracing::{debug, error, info, instrument, warn};

use super::{RoleWrite, Store, StoreError};

impl Store {
    #[instrument(skip(self, name), fields(db.operation = "INSERT", db.table = "persons"))]
    pub async fn create_person(&self, name: &str) -> Result<Person, StoreError> {
        debug!(person.name = %name, "Creating new person");

        let person = sqlx::query_as::<_, Person>(
            "INSERT INTO persons (name, role) VALUES (?, 'unassigned')
             RETURNING id, name, role, home_school_id",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, person.name = %name, "Database error creating person");
            StoreError::from(e)
        })?;

        info!(person.id = %person.id, "Person created");
        Ok(person)
    }

    #[instrument(skip(self), fields(person.id = %id, db.operation = "SELECT", db.table = "persons"))]
    pub async fn person_by_id(&self, id: PersonId) -> Result<Option<Person>, StoreError> {
        let person = sqlx::query_as::<_, Person>(
            "SELECT id, name, role, home_school_id FROM persons WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching person");
            StoreError::from(e)
        })?;

        if person.is_none() {
            debug!(person.id = %id, "Person not found");
        }
        Ok(person)
    }

    /// Moves a person into `role`, setting the home school if it is unset.
    ///
    /// The update only matches while the person is unassigned or already in
    /// `role`, and while the stored home school is unset or equal to
    /// `home_school_id`. A person that does not match is left untouched and
    /// the write reports [`RoleWrite::Rejected`]. Writing the role a person
    /// already holds is applied as a no-op.
    #[instrument(skip(self), fields(person.id = %id, person.role = %role, db.operation = "UPDATE", db.table = "persons"))]
    pub async fn set_person_role(
        &self,
        id: PersonId,
        role: Role,
        home_school_id: Option<SchoolId>,
    ) -> Result<RoleWrite, StoreError> {
        let result = sqlx::query(
            "UPDATE persons
             SET role = ?1, home_school_id = COALESCE(home_school_id, ?2)
             WHERE id = ?3
               AND role IN ('unassigned', ?1)
               AND (?2 IS NULL OR home_school_id IS NULL OR home_school_id = ?2)",
        )
        .bind(role.as_str())
        .bind(home_school_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating person role");
            StoreError::from(e)
        })?;

        if result.rows_affected() == 0 {
            warn!(person.id = %id, person.role = %role, "Role write rejected");
            return Ok(RoleWrite::Rejected);
        }

        debug!(person.id = %id, person.role = %role, "Role write applied");
        Ok(RoleWrite::Applied)
    }

    /// Ids of the classes a person belongs to, ascending.
    ///
    /// Students get their enrollments, teachers the classes they teach.
    pub async fn classes_for_person(
        &self,
        person_id: PersonId,
        role: Role,
    ) -> Result<Vec<ClassId>, StoreError> {
        match role {
            Role::Student => self.classes_enrolled(person_id).await,
            Role::Teacher => self.classes_taught(person_id).await,
            Role::Unassigned => Ok(Vec::new()),
        }
    }
}
