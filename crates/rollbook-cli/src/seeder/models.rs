//! Configuration for seeding a server with fake data.

/// How much data to create per school.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    pub num_schools: usize,
    pub teachers_per_school: usize,
    pub classes_per_teacher: usize,
    pub students_per_school: usize,
    /// Upper bound on the classes each student enrolls in.
    pub classes_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_schools: 3,
            teachers_per_school: 4,
            classes_per_teacher: 2,
            students_per_school: 30,
            classes_per_student: 3,
        }
    }
}

impl SeedConfig {
    /// Creates a new seed configuration with the specified number of schools.
    pub fn new(num_schools: usize) -> Self {
        Self {
            num_schools,
            ..Default::default()
        }
    }

    pub fn with_teachers(mut self, teachers_per_school: usize, classes_per_teacher: usize) -> Self {
        self.teachers_per_school = teachers_per_school;
        self.classes_per_teacher = classes_per_teacher;
        self
    }

    pub fn with_students(mut self, students_per_school: usize) -> Self {
        self.students_per_school = students_per_school;
        self
    }

    pub fn classes_per_school(&self) -> usize {
        self.teachers_per_school * self.classes_per_teacher
    }
}

/// Counts of what a seeding run created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub schools: usize,
    pub teachers: usize,
    pub classes: usize,
    pub students: usize,
    pub enrollments: usize,
}
