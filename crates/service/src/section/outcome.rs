use super::errors::SectionError;

/// Classification reported to the boundary layer for every operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Ok,
    NoContent,
    NotFound,
    Conflict,
    InternalError,
}

impl Outcome {
    /// Stable numeric code for external mapping/logging.
    pub fn code(&self) -> u16 {
        match self {
            Outcome::Created => 201,
            Outcome::Ok => 200,
            Outcome::NoContent => 204,
            Outcome::NotFound => 404,
            Outcome::Conflict => 409,
            Outcome::InternalError => 500,
        }
    }

    /// Collapse a service result into its outcome, `success` naming the
    /// happy-path classification of the operation (Created, Ok, NoContent).
    pub fn classify<T>(res: &Result<T, SectionError>, success: Outcome) -> Outcome {
        match res {
            Result::Ok(_) => success,
            Result::Err(e) => Outcome::from(e),
        }
    }
}

impl From<&SectionError> for Outcome {
    fn from(e: &SectionError) -> Self {
        match e {
            // Validation is an invariant violation of the data model; the
            // closed outcome set folds it into Conflict.
            SectionError::Validation(_) | SectionError::Conflict(_) => Outcome::Conflict,
            SectionError::NotFound => Outcome::NotFound,
            SectionError::Storage(_) => Outcome::InternalError,
        }
    }
}
