mod common;

use common::{TestServer, class_ids, data_id, fake_name};
use rollbook_models::{ClassId, PersonId, Role};
use serde_json::json;

#[tokio::test]
async fn test_first_class_scenario() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let school = client.create_school("S1").await;
    let teacher = client.create_person("T1").await;
    assert_eq!((school, teacher), (1, 1));

    let class = client.create_class("C1", school, teacher).await;
    assert!(class.status);
    assert_eq!(class.message, "class created");
    assert_eq!(
        class.data,
        Some(json!({
            "id": 1,
            "name": "C1",
            "school_id": 1,
            "teacher": {"id": 1, "name": "T1"}
        }))
    );

    let student = client.create_person("P1").await;
    assert_eq!(student, 2);

    let added = client.add_student(student, 1).await;
    assert_eq!(added.message, "student added to class");
    assert_eq!(class_ids(&added), vec![1]);

    let who = client.who_am_i(teacher).await;
    assert_eq!(who.message, "success");
    assert_eq!(who.data, Some(json!({"id": 1, "name": "T1", "classes": [1]})));
}

#[tokio::test]
async fn test_ids_strictly_increase() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let mut last_school = 0;
    let mut last_person = 0;
    for _ in 0..5 {
        let school = client.create_school(&fake_name()).await;
        let person = client.create_person(&fake_name()).await;
        assert!(school > last_school);
        assert!(person > last_person);
        last_school = school;
        last_person = person;
    }
}

#[tokio::test]
async fn test_teacher_is_never_a_student() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let school = client.create_school("S").await;
    let teacher = client.create_person("P2").await;
    let class = data_id(&client.create_class("C", school, teacher).await);

    let response = client.add_student(teacher, class).await;
    assert!(!response.status);
    assert_eq!(
        response.message,
        format!("person {teacher} is already a teacher, cannot be a student")
    );
    assert_eq!(response.data, None);

    let enrolled = server
        .store
        .classes_enrolled(PersonId::new(teacher))
        .await
        .unwrap();
    assert!(enrolled.is_empty());
}

#[tokio::test]
async fn test_student_is_never_a_teacher() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let school = client.create_school("S").await;
    let teacher = client.create_person("T").await;
    let class = data_id(&client.create_class("C", school, teacher).await);
    let student = client.create_person("P").await;
    assert!(client.add_student(student, class).await.status);

    let response = client.create_class("Other", school, student).await;
    assert!(!response.status);
    assert!(response.message.contains("already a student"));

    let person = server
        .store
        .person_by_id(PersonId::new(student))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(person.role, Role::Student);
}

#[tokio::test]
async fn test_school_mismatch_changes_nothing() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let north = client.create_school("North").await;
    let south = client.create_school("South").await;
    let teacher = client.create_person("T").await;
    let north_class = data_id(&client.create_class("N", north, teacher).await);
    let south_class = data_id(&client.create_class("S", south, teacher).await);
    let student = client.create_person("P").await;

    assert!(client.add_student(student, north_class).await.status);
    let response = client.add_student(student, south_class).await;
    assert!(!response.status);
    assert!(
        response
            .message
            .starts_with("student can only enroll in classes from one school")
    );

    let who = client.who_am_i(student).await;
    assert_eq!(class_ids(&who), vec![north_class]);
}

#[tokio::test]
async fn test_duplicate_enrollment_is_rejected_once() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let school = client.create_school("S").await;
    let teacher = client.create_person("T").await;
    let mut classes = Vec::new();
    for name in ["A", "B", "C"] {
        classes.push(data_id(&client.create_class(name, school, teacher).await));
    }
    let student = client.create_person("P").await;

    for class in &classes {
        assert!(client.add_student(student, *class).await.status);
    }
    let duplicate = client.add_student(student, classes[1]).await;
    assert!(!duplicate.status);
    assert_eq!(
        duplicate.message,
        format!("student {student} is already enrolled in class {}", classes[1])
    );

    let who = client.who_am_i(student).await;
    assert_eq!(class_ids(&who), classes);
}

#[tokio::test]
async fn test_not_found_errors() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let response = client.create_class("C", 7, 1).await;
    assert_eq!(response.message, "school 7 not found");

    let school = client.create_school("S").await;
    let response = client.create_class("C", school, 3).await;
    assert_eq!(response.message, "person 3 not found");

    let person = client.create_person("P").await;
    let response = client.add_student(person, 9).await;
    assert_eq!(response.message, "class 9 not found");

    let response = client.who_am_i(42).await;
    assert!(!response.status);
    assert_eq!(response.message, "person 42 not found");
}

#[tokio::test]
async fn test_state_is_shared_across_connections() {
    let server = TestServer::start().await;
    let mut first = server.client().await;
    let mut second = server.client().await;

    let school = first.create_school("S").await;
    let teacher = second.create_person("T").await;
    let class = data_id(&first.create_class("C", school, teacher).await);

    let who = second.who_am_i(teacher).await;
    assert_eq!(class_ids(&who), vec![class]);
}

#[tokio::test]
async fn test_concurrent_enrollments_keep_one_home_school() {
    let server = TestServer::start().await;
    let mut setup = server.client().await;

    let north = setup.create_school("North").await;
    let south = setup.create_school("South").await;
    let teacher = setup.create_person("T").await;
    let north_class = data_id(&setup.create_class("N", north, teacher).await);
    let south_class = data_id(&setup.create_class("S", south, teacher).await);
    let student = setup.create_person("P").await;

    let mut tasks = Vec::new();
    for class in [north_class, south_class] {
        let mut client = server.client().await;
        tasks.push(tokio::spawn(async move {
            client.add_student(student, class).await.status
        }));
    }
    let mut accepted = 0;
    for task in tasks {
        if task.await.unwrap() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);

    let who = setup.who_am_i(student).await;
    assert_eq!(class_ids(&who).len(), 1);
}

#[tokio::test]
async fn test_concurrent_teach_and_enroll_pick_one_role() {
    let server = TestServer::start().await;
    let mut setup = server.client().await;

    let school = setup.create_school("S").await;
    let teacher = setup.create_person("T").await;
    let class = data_id(&setup.create_class("C", school, teacher).await);

    for round in 0..5 {
        let person = setup.create_person(&format!("P{round}")).await;

        let mut teaching = server.client().await;
        let teach = tokio::spawn(async move {
            teaching.create_class("Race", school, person).await
        });
        let mut enrolling = server.client().await;
        let enroll = tokio::spawn(async move { enrolling.add_student(person, class).await });

        let teach = teach.await.unwrap();
        let enroll = enroll.await.unwrap();
        assert!(teach.status != enroll.status, "exactly one request must win");

        let loser = if teach.status { &enroll } else { &teach };
        assert!(loser.message.contains("is already a"), "{}", loser.message);
        assert_eq!(loser.data, None);

        let id = PersonId::new(person);
        let stored = server.store.person_by_id(id).await.unwrap().unwrap();
        let taught = server.store.classes_taught(id).await.unwrap();
        let enrolled = server.store.classes_enrolled(id).await.unwrap();
        if teach.status {
            assert_eq!(stored.role, Role::Teacher);
            assert_eq!(taught.len(), 1);
            assert!(enrolled.is_empty());
        } else {
            assert_eq!(stored.role, Role::Student);
            assert!(taught.is_empty());
            assert_eq!(enrolled, vec![ClassId::new(class)]);
        }
    }
}
