//! Enrollment engine.
//!
//! Enforces role exclusivity, single-school enrollment and referential
//! existence before any write reaches the store. Each operation validates
//! first and writes second; the first violated rule decides the error.
//! Nothing is cached between calls, every decision reads the store.

mod errors;

pub use errors::EnrollmentError;

use rollbook_models::{
    ClassId, ClassView, Person, PersonId, PersonSummary, PersonWithClasses, Role, School,
    SchoolId,
};
use tracing::{debug, instrument, warn};

use crate::store::{RoleWrite, Store};

#[derive(Clone, Debug)]
pub struct EnrollmentEngine {
    store: Store,
}

impl EnrollmentEngine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    #[instrument(skip(self, name))]
    pub async fn create_school(&self, name: &str) -> Result<School, EnrollmentError> {
        if name.trim().is_empty() {
            return Err(EnrollmentError::EmptyName);
        }
        Ok(self.store.create_school(name).await?)
    }

    #[instrument(skip(self, name))]
    pub async fn create_person(&self, name: &str) -> Result<Person, EnrollmentError> {
        Ok(self.store.create_person(name).await?)
    }

    /// Creates a class taught by `teacher_id`, promoting them to teacher.
    #[instrument(skip(self, name), fields(school.id = %school_id, teacher.id = %teacher_id))]
    pub async fn create_class(
        &self,
        name: &str,
        school_id: SchoolId,
        teacher_id: PersonId,
    ) -> Result<ClassView, EnrollmentError> {
        if !self.store.school_exists(school_id).await? {
            return Err(EnrollmentError::SchoolNotFound(school_id));
        }

        let teacher = self.existing_person(teacher_id).await?;
        if !teacher.role.can_become(Role::Teacher) {
            return Err(role_conflict(&teacher, Role::Teacher));
        }

        self.assign_teacher(&teacher, name, school_id).await
    }

    /// Enrolls `student_id` in `class_id`.
    ///
    /// The first enrollment fixes the student's home school; later ones must
    /// stay within it. Returns the student with their classes, ascending.
    #[instrument(skip(self), fields(person.id = %student_id, class.id = %class_id))]
    pub async fn add_student_to_class(
        &self,
        student_id: PersonId,
        class_id: ClassId,
    ) -> Result<PersonWithClasses, EnrollmentError> {
        let student = self.existing_person(student_id).await?;
        if !student.role.can_become(Role::Student) {
            return Err(role_conflict(&student, Role::Student));
        }

        let class_school_id = self
            .store
            .class_school_id(class_id)
            .await?
            .ok_or(EnrollmentError::ClassNotFound(class_id))?;

        if let Some(home_school_id) = student.home_school_id
            && home_school_id != class_school_id
        {
            return Err(EnrollmentError::SchoolMismatch {
                person_id: student_id,
                home_school_id,
                class_id,
                class_school_id,
            });
        }

        self.enroll(&student, class_id, class_school_id).await
    }

    /// Write half of [`Self::create_class`]: promotes an already validated
    /// person to teacher and creates the class.
    pub(crate) async fn assign_teacher(
        &self,
        teacher: &Person,
        name: &str,
        school_id: SchoolId,
    ) -> Result<ClassView, EnrollmentError> {
        if self
            .store
            .set_person_role(teacher.id, Role::Teacher, None)
            .await?
            == RoleWrite::Rejected
        {
            return Err(self.explain_rejection(teacher.id, Role::Teacher, None).await);
        }

        let class = self.store.create_class(name, school_id, teacher.id).await?;
        Ok(ClassView::new(&class, PersonSummary::from(teacher)))
    }

    /// Write half of [`Self::add_student_to_class`].
    pub(crate) async fn enroll(
        &self,
        student: &Person,
        class_id: ClassId,
        class_school_id: SchoolId,
    ) -> Result<PersonWithClasses, EnrollmentError> {
        if self
            .store
            .set_person_role(student.id, Role::Student, Some(class_school_id))
            .await?
            == RoleWrite::Rejected
        {
            return Err(self
                .explain_rejection(student.id, Role::Student, Some((class_id, class_school_id)))
                .await);
        }

        self.store.add_enrollment(class_id, student.id).await?;

        let classes = self.store.classes_enrolled(student.id).await?;
        debug!(classes = classes.len(), "Student enrolled");
        Ok(PersonWithClasses::new(student, classes))
    }

    #[instrument(skip(self), fields(person.id = %person_id))]
    pub async fn who_am_i(&self, person_id: PersonId) -> Result<PersonWithClasses, EnrollmentError> {
        let person = self.existing_person(person_id).await?;
        let classes = self
            .store
            .classes_for_person(person.id, person.role)
            .await?;
        Ok(PersonWithClasses::new(&person, classes))
    }

    async fn existing_person(&self, id: PersonId) -> Result<Person, EnrollmentError> {
        self.store
            .person_by_id(id)
            .await?
            .ok_or(EnrollmentError::PersonNotFound(id))
    }

    /// Maps a rejected role write to the rule the person's current state
    /// breaks. Reached when another connection changed the person between
    /// validation and write.
    ///
    /// The write is rejected only on a role conflict, a home school
    /// mismatch or a missing person, so one of those always applies.
    async fn explain_rejection(
        &self,
        person_id: PersonId,
        requested: Role,
        class: Option<(ClassId, SchoolId)>,
    ) -> EnrollmentError {
        let person = match self.existing_person(person_id).await {
            Ok(person) => person,
            Err(e) => return e,
        };
        warn!(person.id = %person_id, person.role = %person.role, "Person changed during request");

        if let Some((class_id, class_school_id)) = class
            && person.role.can_become(requested)
            && let Some(home_school_id) = person.home_school_id
            && home_school_id != class_school_id
        {
            return EnrollmentError::SchoolMismatch {
                person_id,
                home_school_id,
                class_id,
                class_school_id,
            };
        }
        role_conflict(&person, requested)
    }
}

fn role_conflict(person: &Person, requested: Role) -> EnrollmentError {
    EnrollmentError::RoleConflict {
        person_id: person.id,
        current: person.role,
        requested,
    }
}

#[cfg(test)]
mod tests;
