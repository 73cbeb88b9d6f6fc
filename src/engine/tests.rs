use super::*;
use rollbook_core::ErrorKind;

async fn engine() -> EnrollmentEngine {
    let pool = rollbook_db::init_in_memory().await.unwrap();
    EnrollmentEngine::new(Store::new(pool))
}

/// A school with one class taught by a fresh teacher.
async fn school_with_class(engine: &EnrollmentEngine, school: &str) -> (School, ClassView) {
    let school = engine.create_school(school).await.unwrap();
    let teacher = engine.create_person("Teacher").await.unwrap();
    let class = engine
        .create_class("Class", school.id, teacher.id)
        .await
        .unwrap();
    (school, class)
}

#[tokio::test]
async fn test_create_school_rejects_blank_name() {
    let engine = engine().await;
    for name in ["", "   "] {
        let err = engine.create_school(name).await.unwrap_err();
        assert!(matches!(err, EnrollmentError::EmptyName));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

#[tokio::test]
async fn test_create_person_accepts_any_name() {
    let engine = engine().await;
    let person = engine.create_person("").await.unwrap();
    assert_eq!(person.role, Role::Unassigned);
}

#[tokio::test]
async fn test_first_class_scenario() {
    let engine = engine().await;
    let school = engine.create_school("S1").await.unwrap();
    let teacher = engine.create_person("T1").await.unwrap();
    let class = engine
        .create_class("C1", school.id, teacher.id)
        .await
        .unwrap();

    assert_eq!(class.id, ClassId::new(1));
    assert_eq!(class.school_id, school.id);
    assert_eq!(class.teacher, PersonSummary::from(&teacher));
    assert!(class.students.is_empty());

    let student = engine.create_person("P1").await.unwrap();
    assert_eq!(student.id, PersonId::new(2));

    let enrolled = engine
        .add_student_to_class(student.id, class.id)
        .await
        .unwrap();
    assert_eq!(enrolled.classes, vec![class.id]);

    let who = engine.who_am_i(teacher.id).await.unwrap();
    assert_eq!(who.name, "T1");
    assert_eq!(who.classes, vec![class.id]);
}

#[tokio::test]
async fn test_create_class_checks_school_before_teacher() {
    let engine = engine().await;
    let err = engine
        .create_class("C", SchoolId::new(4), PersonId::new(4))
        .await
        .unwrap_err();
    assert!(matches!(err, EnrollmentError::SchoolNotFound(id) if id == SchoolId::new(4)));
    assert_eq!(err.to_string(), "school 4 not found");
}

#[tokio::test]
async fn test_create_class_with_missing_teacher() {
    let engine = engine().await;
    let school = engine.create_school("S").await.unwrap();
    let err = engine
        .create_class("C", school.id, PersonId::new(8))
        .await
        .unwrap_err();
    assert!(matches!(err, EnrollmentError::PersonNotFound(_)));
}

#[tokio::test]
async fn test_student_cannot_teach() {
    let engine = engine().await;
    let (school, class) = school_with_class(&engine, "S").await;
    let student = engine.create_person("P").await.unwrap();
    engine
        .add_student_to_class(student.id, class.id)
        .await
        .unwrap();

    let err = engine
        .create_class("Other", school.id, student.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EnrollmentError::RoleConflict {
            current: Role::Student,
            requested: Role::Teacher,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        format!("person {} is already a student, cannot be a teacher", student.id)
    );
}

#[tokio::test]
async fn test_teacher_cannot_enroll() {
    let engine = engine().await;
    let (_, class) = school_with_class(&engine, "S").await;

    let err = engine
        .add_student_to_class(class.teacher.id, class.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EnrollmentError::RoleConflict {
            current: Role::Teacher,
            requested: Role::Student,
            ..
        }
    ));

    let who = engine.who_am_i(class.teacher.id).await.unwrap();
    assert_eq!(who.classes, vec![class.id]);
    assert!(
        engine
            .store()
            .classes_enrolled(class.teacher.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_teacher_can_teach_several_classes() {
    let engine = engine().await;
    let (school, first) = school_with_class(&engine, "S").await;
    let second = engine
        .create_class("Second", school.id, first.teacher.id)
        .await
        .unwrap();

    let who = engine.who_am_i(first.teacher.id).await.unwrap();
    assert_eq!(who.classes, vec![first.id, second.id]);
}

#[tokio::test]
async fn test_missing_student_reported_before_missing_class() {
    let engine = engine().await;
    let err = engine
        .add_student_to_class(PersonId::new(1), ClassId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, EnrollmentError::PersonNotFound(_)));
}

#[tokio::test]
async fn test_missing_class() {
    let engine = engine().await;
    let student = engine.create_person("P").await.unwrap();
    let err = engine
        .add_student_to_class(student.id, ClassId::new(3))
        .await
        .unwrap_err();
    assert!(matches!(err, EnrollmentError::ClassNotFound(id) if id == ClassId::new(3)));

    let stored = engine.store().person_by_id(student.id).await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Unassigned);
}

#[tokio::test]
async fn test_school_mismatch_changes_nothing() {
    let engine = engine().await;
    let (north, north_class) = school_with_class(&engine, "North").await;
    let (_, south_class) = school_with_class(&engine, "South").await;
    let student = engine.create_person("P").await.unwrap();

    engine
        .add_student_to_class(student.id, north_class.id)
        .await
        .unwrap();
    let err = engine
        .add_student_to_class(student.id, south_class.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EnrollmentError::SchoolMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);

    let stored = engine.store().person_by_id(student.id).await.unwrap().unwrap();
    assert_eq!(stored.home_school_id, Some(north.id));
    let who = engine.who_am_i(student.id).await.unwrap();
    assert_eq!(who.classes, vec![north_class.id]);
}

#[tokio::test]
async fn test_duplicate_enrollment_keeps_one_row() {
    let engine = engine().await;
    let (_, class) = school_with_class(&engine, "S").await;
    let student = engine.create_person("P").await.unwrap();

    engine
        .add_student_to_class(student.id, class.id)
        .await
        .unwrap();
    let err = engine
        .add_student_to_class(student.id, class.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EnrollmentError::AlreadyEnrolled { .. }));
    assert_eq!(
        err.to_string(),
        format!(
            "student {} is already enrolled in class {}",
            student.id, class.id
        )
    );

    let who = engine.who_am_i(student.id).await.unwrap();
    assert_eq!(who.classes, vec![class.id]);
}

#[tokio::test]
async fn test_enrollments_are_listed_ascending() {
    let engine = engine().await;
    let school = engine.create_school("S").await.unwrap();
    let teacher = engine.create_person("T").await.unwrap();
    let mut classes = Vec::new();
    for name in ["A", "B", "C", "D"] {
        let class = engine
            .create_class(name, school.id, teacher.id)
            .await
            .unwrap();
        classes.push(class.id);
    }
    let student = engine.create_person("P").await.unwrap();

    let mut last = None;
    for id in [classes[2], classes[0], classes[3], classes[1]] {
        last = Some(engine.add_student_to_class(student.id, id).await.unwrap());
    }
    assert_eq!(last.unwrap().classes, classes);
    assert_eq!(engine.who_am_i(student.id).await.unwrap().classes, classes);
}

#[tokio::test]
async fn test_who_am_i_unassigned_and_missing() {
    let engine = engine().await;
    let person = engine.create_person("P").await.unwrap();
    let who = engine.who_am_i(person.id).await.unwrap();
    assert!(who.classes.is_empty());

    let err = engine.who_am_i(PersonId::new(99)).await.unwrap_err();
    assert_eq!(err.to_string(), "person 99 not found");
}

#[tokio::test]
async fn test_store_failures_are_store_kind() {
    let engine = engine().await;
    engine.store().pool().close().await;

    let err = engine.create_person("P").await.unwrap_err();
    assert!(matches!(err, EnrollmentError::Store(_)));
    let app_error = err.into_app_error();
    assert_eq!(app_error.kind, ErrorKind::Store);
    assert_eq!(app_error.client_message(), "storage error");
}

async fn class_count(engine: &EnrollmentEngine) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes")
        .fetch_one(engine.store().pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_person_becomes_student_before_class_is_written() {
    let engine = engine().await;
    let (school, _) = school_with_class(&engine, "S").await;
    let person = engine.create_person("P").await.unwrap();

    // Another connection enrolls the person after validation saw them unassigned.
    let write = engine
        .store()
        .set_person_role(person.id, Role::Student, Some(school.id))
        .await
        .unwrap();
    assert_eq!(write, RoleWrite::Applied);

    let err = engine
        .assign_teacher(&person, "Late", school.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EnrollmentError::RoleConflict {
            current: Role::Student,
            requested: Role::Teacher,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        format!("person {} is already a student, cannot be a teacher", person.id)
    );

    assert_eq!(class_count(&engine).await, 1);
    let stored = engine.store().person_by_id(person.id).await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Student);
    assert!(engine.store().classes_taught(person.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_person_becomes_teacher_before_enrollment_is_written() {
    let engine = engine().await;
    let (school, class) = school_with_class(&engine, "S").await;
    let person = engine.create_person("P").await.unwrap();

    engine
        .store()
        .set_person_role(person.id, Role::Teacher, None)
        .await
        .unwrap();

    let err = engine
        .enroll(&person, class.id, school.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EnrollmentError::RoleConflict {
            current: Role::Teacher,
            requested: Role::Student,
            ..
        }
    ));

    let stored = engine.store().person_by_id(person.id).await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Teacher);
    assert_eq!(stored.home_school_id, None);
    assert!(engine.store().classes_enrolled(person.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_home_school_fixed_before_enrollment_is_written() {
    let engine = engine().await;
    let (north, _) = school_with_class(&engine, "North").await;
    let (south, south_class) = school_with_class(&engine, "South").await;
    let person = engine.create_person("P").await.unwrap();

    engine
        .store()
        .set_person_role(person.id, Role::Student, Some(north.id))
        .await
        .unwrap();

    let err = engine
        .enroll(&person, south_class.id, south.id)
        .await
        .unwrap_err();
    match err {
        EnrollmentError::SchoolMismatch {
            home_school_id,
            class_id,
            class_school_id,
            ..
        } => {
            assert_eq!(home_school_id, north.id);
            assert_eq!(class_id, south_class.id);
            assert_eq!(class_school_id, south.id);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(engine.store().classes_enrolled(person.id).await.unwrap().is_empty());
}
