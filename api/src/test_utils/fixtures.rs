//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::entities::{
    Course, CourseId, Exam, ExamId, ExamResult, ExamResultId, Instructor, InstructorId, Lesson,
    LessonId, Registration, RegistrationId, Student, StudentId,
};

/// Create a test student with a specific name
pub fn test_student(name: &str) -> Student {
    Student {
        id: StudentId::new(),
        name: name.to_string(),
        national_id: "12345678901".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2002, 4, 17).unwrap(),
    }
}

pub fn test_instructor(name: &str) -> Instructor {
    Instructor {
        id: InstructorId::new(),
        name: name.to_string(),
    }
}

pub fn test_course(name: &str, instructor_id: InstructorId) -> Course {
    Course {
        id: CourseId::new(),
        name: name.to_string(),
        instructor_id,
    }
}

pub fn test_lesson(title: &str, course_id: CourseId) -> Lesson {
    Lesson {
        id: LessonId::new(),
        title: title.to_string(),
        course_id,
    }
}

pub fn test_exam(name: &str) -> Exam {
    Exam {
        id: ExamId::new(),
        name: name.to_string(),
    }
}

pub fn test_exam_result(grade: i16, student_id: StudentId, exam_id: ExamId) -> ExamResult {
    ExamResult {
        id: ExamResultId::new(),
        grade,
        student_id,
        exam_id,
    }
}

/// Create a test registration; `price` is in cents
pub fn test_registration(price: i64, student_id: StudentId, course_id: CourseId) -> Registration {
    Registration {
        id: RegistrationId::new(),
        price: Decimal::new(price, 2),
        student_id,
        course_id,
    }
}
