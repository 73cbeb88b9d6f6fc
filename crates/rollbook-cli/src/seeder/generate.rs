//! Fake names for seeded entities.

use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use rollbook_models::ClassId;

pub fn school_name() -> String {
    let city: String = CityName().fake();
    format!("{city} High School")
}

pub fn person_name() -> String {
    Name().fake()
}

pub fn class_name(index: usize) -> String {
    let subject: String = Word().fake();
    format!("{subject} {}", index + 1)
}

/// Picks up to `per_student` consecutive classes for the student at
/// `student_index`, wrapping around the school's class list.
pub fn enrollment_plan(classes: &[ClassId], student_index: usize, per_student: usize) -> Vec<ClassId> {
    if classes.is_empty() {
        return Vec::new();
    }
    let count = per_student.min(classes.len());
    (0..count)
        .map(|offset| classes[(student_index + offset) % classes.len()])
        .collect()
}
