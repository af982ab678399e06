use std::fmt;

use super::AdminError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyStatus {
    Active,
    Draft,
}

impl SurveyStatus {
    pub fn toggled(self) -> Self {
        match self {
            SurveyStatus::Active => SurveyStatus::Draft,
            SurveyStatus::Draft => SurveyStatus::Active,
        }
    }
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SurveyStatus::Active => "Active",
            SurveyStatus::Draft => "Draft",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    YesNo,
    Rating,
    Text,
    Photo,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::YesNo,
        QuestionKind::Rating,
        QuestionKind::Text,
        QuestionKind::Photo,
    ];
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuestionKind::YesNo => "Yes/No",
            QuestionKind::Rating => "Rating",
            QuestionKind::Text => "Text",
            QuestionKind::Photo => "Photo",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: u64,
    pub text: String,
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    pub id: u64,
    pub title: String,
    pub status: SurveyStatus,
    pub questions: Vec<Question>,
}

/// The survey catalog. Never empty: deleting the last survey is refused.
#[derive(Debug, Clone)]
pub struct SurveyCatalog {
    surveys: Vec<Survey>,
    next_id: u64,
}

impl Default for SurveyCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl SurveyCatalog {
    pub fn seeded() -> Self {
        let sweep = Survey {
            id: 1,
            title: "Q4 Market Sweep".into(),
            status: SurveyStatus::Active,
            questions: vec![
                Question {
                    id: 2,
                    text: "Is the branding visible?".into(),
                    kind: QuestionKind::YesNo,
                },
                Question {
                    id: 3,
                    text: "Rate the shelf hygiene (1-5)".into(),
                    kind: QuestionKind::Rating,
                },
            ],
        };
        SurveyCatalog {
            surveys: vec![sweep],
            next_id: 4,
        }
    }

    pub fn surveys(&self) -> &[Survey] {
        &self.surveys
    }

    pub fn get(&self, id: u64) -> Option<&Survey> {
        self.surveys.iter().find(|s| s.id == id)
    }

    pub fn first_id(&self) -> Option<u64> {
        self.surveys.first().map(|s| s.id)
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn survey_mut(&mut self, id: u64) -> Result<&mut Survey, AdminError> {
        self.surveys
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AdminError::UnknownSurvey(id))
    }

    /// Append an empty draft and return its id.
    pub fn add_new(&mut self) -> u64 {
        let id = self.allocate();
        self.surveys.push(Survey {
            id,
            title: "New Untitled Survey".into(),
            status: SurveyStatus::Draft,
            questions: Vec::new(),
        });
        log::info!("Created survey {id}");
        id
    }

    /// Delete a survey and return the id that should be selected next.
    pub fn delete(&mut self, id: u64) -> Result<u64, AdminError> {
        if self.surveys.len() <= 1 {
            log::warn!("Refusing to delete the last survey ({id})");
            return Err(AdminError::LastSurvey);
        }
        let idx = self
            .surveys
            .iter()
            .position(|s| s.id == id)
            .ok_or(AdminError::UnknownSurvey(id))?;
        self.surveys.remove(idx);
        log::info!("Deleted survey {id}");
        self.first_id().ok_or(AdminError::LastSurvey)
    }

    pub fn rename(&mut self, id: u64, title: &str) -> Result<(), AdminError> {
        self.survey_mut(id)?.title = title.to_string();
        Ok(())
    }

    pub fn toggle_status(&mut self, id: u64) -> Result<SurveyStatus, AdminError> {
        let survey = self.survey_mut(id)?;
        survey.status = survey.status.toggled();
        log::info!("Survey {id} is now {}", survey.status);
        Ok(survey.status)
    }

    pub fn add_question(&mut self, survey: u64) -> Result<u64, AdminError> {
        let question = self.allocate();
        self.survey_mut(survey)?.questions.push(Question {
            id: question,
            text: "New Question".into(),
            kind: QuestionKind::Text,
        });
        Ok(question)
    }

    pub fn update_question(
        &mut self,
        survey: u64,
        question: u64,
        text: &str,
        kind: QuestionKind,
    ) -> Result<(), AdminError> {
        let q = self
            .survey_mut(survey)?
            .questions
            .iter_mut()
            .find(|q| q.id == question)
            .ok_or(AdminError::UnknownQuestion { survey, question })?;
        q.text = text.to_string();
        q.kind = kind;
        Ok(())
    }

    pub fn delete_question(&mut self, survey: u64, question: u64) -> Result<(), AdminError> {
        let questions = &mut self.survey_mut(survey)?.questions;
        let before = questions.len();
        questions.retain(|q| q.id != question);
        if questions.len() == before {
            return Err(AdminError::UnknownQuestion { survey, question });
        }
        Ok(())
    }
}
