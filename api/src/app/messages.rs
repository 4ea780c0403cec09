//! User-facing messages, one catalogue per aggregate

/// Messages reported by one aggregate's manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub list_success: &'static str,
    pub list_empty: &'static str,
    pub found: &'static str,
    pub not_found: &'static str,
    pub create_success: &'static str,
    pub create_failed: &'static str,
    pub update_success: &'static str,
    pub update_failed: &'static str,
    pub delete_success: &'static str,
    pub delete_failed: &'static str,
}

macro_rules! messages {
    ($name:ident, $singular:literal, $plural:literal) => {
        pub const $name: Messages = Messages {
            list_success: concat!($plural, " listed successfully"),
            list_empty: concat!("No ", $plural, " found"),
            found: concat!($singular, " found"),
            not_found: concat!($singular, " not found"),
            create_success: concat!($singular, " created successfully"),
            create_failed: concat!($singular, " create failed"),
            update_success: concat!($singular, " updated successfully"),
            update_failed: concat!($singular, " update failed"),
            delete_success: concat!($singular, " deleted successfully"),
            delete_failed: concat!($singular, " delete failed"),
        };
    };
}

messages!(STUDENT, "Student", "students");
messages!(INSTRUCTOR, "Instructor", "instructors");
messages!(COURSE, "Course", "courses");
messages!(LESSON, "Lesson", "lessons");
messages!(EXAM, "Exam", "exams");
messages!(EXAM_RESULT, "Exam result", "exam results");
messages!(REGISTRATION, "Registration", "registrations");
