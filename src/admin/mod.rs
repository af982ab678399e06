//! The two side lists managed from the admin pages: field users and the
//! survey catalog. Both are in-memory only.

pub mod surveys;
pub mod users;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
    #[error("Cannot delete the last survey!")]
    LastSurvey,
    #[error("no survey with id {0}")]
    UnknownSurvey(u64),
    #[error("survey {survey} has no question {question}")]
    UnknownQuestion { survey: u64, question: u64 },
    #[error("no user with id {0}")]
    UnknownUser(u64),
}
