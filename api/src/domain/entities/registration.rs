//! Registration aggregate
//!
//! A student's paid enrolment in a course.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Aggregate, Course, CourseId, Student, StudentId, WithDetail};
use crate::domain::ports::{Record, RecordKey};
use crate::error::DomainError;

/// Digits kept after the decimal point in a stored price
const PRICE_SCALE: u32 = 2;

/// Whole-unit digits a stored price can hold (`NUMERIC(10, 2)`)
const PRICE_INTEGER_DIGITS: u32 = 8;

aggregate_id!(
    /// Unique identifier for a registration
    RegistrationId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    /// Price paid; never negative
    pub price: Decimal,
    pub student_id: StudentId,
    pub course_id: CourseId,
}

/// A registration with its student and course loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetail {
    pub registration: Registration,
    pub student: Student,
    pub course: Course,
}

impl Aggregate for Registration {
    type Id = RegistrationId;

    const NAME: &'static str = "Registration";

    fn id(&self) -> RegistrationId {
        self.id
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.price < Decimal::ZERO {
            return Err(DomainError::Validation(
                "price must not be negative".to_string(),
            ));
        }
        if self.price.normalize().scale() > PRICE_SCALE {
            return Err(DomainError::Validation(format!(
                "price must have at most {} decimal places",
                PRICE_SCALE
            )));
        }
        if self.price >= Decimal::from(10u64.pow(PRICE_INTEGER_DIGITS)) {
            return Err(DomainError::Validation(format!(
                "price must be below {}",
                10u64.pow(PRICE_INTEGER_DIGITS)
            )));
        }
        Ok(())
    }

    fn into_record(self) -> Record {
        Record::Registration(self)
    }

    fn record_key(id: RegistrationId) -> RecordKey {
        RecordKey::Registration(id)
    }
}

impl WithDetail for Registration {
    type Detail = RegistrationDetail;
}
