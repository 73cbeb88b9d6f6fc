//! Seeding a running server with fake schools, teachers, classes and
//! students.
//!
//! Everything goes through the public protocol, so the server's rules
//! apply to seeded data exactly as to any other client's.

mod generate;
mod models;

pub use generate::enrollment_plan;
pub use models::{SeedConfig, SeedSummary};

use rollbook_models::{ClassId, ClassView, PersonSummary, PersonWithClasses, School};
use std::time::Instant;

use crate::client::{RollbookClient, expect_data};

/// Seeds every school with its teachers, classes and students.
pub async fn seed_all(
    client: &mut RollbookClient,
    config: SeedConfig,
) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();

    println!("🌱 Starting seeding...");
    println!("   - Schools: {}", config.num_schools);
    println!(
        "   - Per school: {} teachers, {} classes, {} students",
        config.teachers_per_school,
        config.classes_per_school(),
        config.students_per_school
    );

    let mut summary = SeedSummary::default();
    for _ in 0..config.num_schools {
        seed_school(client, &config, &mut summary).await?;
    }

    println!(
        "✅ Seeded {} schools, {} classes, {} enrollments in {:?}",
        summary.schools,
        summary.classes,
        summary.enrollments,
        start_time.elapsed()
    );
    Ok(summary)
}

async fn seed_school(
    client: &mut RollbookClient,
    config: &SeedConfig,
    summary: &mut SeedSummary,
) -> anyhow::Result<()> {
    let school: School = expect_data(client.create_school(&generate::school_name()).await?)?;
    summary.schools += 1;

    let mut classes: Vec<ClassId> = Vec::with_capacity(config.classes_per_school());
    for _ in 0..config.teachers_per_school {
        let teacher: PersonSummary =
            expect_data(client.create_person(&generate::person_name()).await?)?;
        summary.teachers += 1;

        for _ in 0..config.classes_per_teacher {
            let name = generate::class_name(classes.len());
            let class: ClassView =
                expect_data(client.create_class(&name, school.id, teacher.id).await?)?;
            classes.push(class.id);
            summary.classes += 1;
        }
    }

    for index in 0..config.students_per_school {
        let student: PersonSummary =
            expect_data(client.create_person(&generate::person_name()).await?)?;
        summary.students += 1;

        for class_id in enrollment_plan(&classes, index, config.classes_per_student) {
            let _: PersonWithClasses = expect_data(client.add_student(student.id, class_id).await?)?;
            summary.enrollments += 1;
        }
    }

    println!(
        "   ✓ {} (id {}): {} classes",
        school.name,
        school.id,
        classes.len()
    );
    Ok(())
}
