//! Authoring forms and their codec to the store's payloads.
//!
//! The authoring UI models every choice as `{text, isCorrect}` regardless of
//! question type. The store wants single and multi-choice questions as the
//! choice list plus a derived `correctAnswer`, and True/False questions as
//! choices carrying `is_correct`.

use serde::{Deserialize, Serialize};

use crate::encoder::{boolean_correct_index, derive_correct_answer};
use crate::error::ValidationError;
use crate::model::{CorrectAnswer, Question, QuestionType};
use crate::wire::{
    AuthoredChoice, FlaggedChoice, NewQuestion, NewQuiz, PayloadChoices, QuizPatch,
};

/// One choice row of the authoring form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormChoice {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl FormChoice {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// The question authoring form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionForm {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default)]
    pub choices: Vec<FormChoice>,
}

fn default_points() -> u32 {
    1
}

impl QuestionForm {
    /// A blank form for the given type, seeded the way the authoring UI
    /// seeds it when the type is picked.
    pub fn for_type(question_type: QuestionType) -> Self {
        let choices = match question_type {
            QuestionType::TrueFalse => vec![
                FormChoice::new("True", false),
                FormChoice::new("False", false),
            ],
            _ => Vec::new(),
        };
        Self {
            question_type,
            text: String::new(),
            points: 1,
            choices,
        }
    }

    /// Switch the form to another question type.
    ///
    /// True/False resets to its two fixed choices, choice types keep the
    /// current rows, and text questions drop them.
    pub fn change_type(&mut self, question_type: QuestionType) {
        match question_type {
            QuestionType::TrueFalse => self.choices = Self::for_type(question_type).choices,
            QuestionType::Text => self.choices.clear(),
            QuestionType::McqSingle | QuestionType::McqMulti => {}
        }
        self.question_type = question_type;
    }

    fn flags(&self) -> Vec<bool> {
        self.choices.iter().map(|c| c.is_correct).collect()
    }

    /// Check the form before it is saved.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if self.points < 1 {
            return Err(ValidationError::InvalidPoints);
        }

        match self.question_type {
            QuestionType::McqSingle | QuestionType::McqMulti => {
                if self.choices.len() < 2 {
                    return Err(ValidationError::TooFewChoices {
                        found: self.choices.len(),
                    });
                }
                derive_correct_answer(self.question_type, &self.flags()).map(|_| ())
            }
            QuestionType::TrueFalse => boolean_correct_index(&self.flags()).map(|_| ()),
            QuestionType::Text => Ok(()),
        }
    }

    /// Validate and build the store payload.
    pub fn encode(&self) -> Result<NewQuestion, ValidationError> {
        self.validate()?;

        let (choices, correct_answer) = match self.question_type {
            QuestionType::McqSingle | QuestionType::McqMulti => {
                let authored = self
                    .choices
                    .iter()
                    .map(|c| AuthoredChoice {
                        text: c.text.clone(),
                        is_correct: c.is_correct,
                    })
                    .collect();
                let correct = derive_correct_answer(self.question_type, &self.flags())?;
                (Some(PayloadChoices::Authored(authored)), Some(correct))
            }
            QuestionType::TrueFalse => {
                let flagged = self
                    .choices
                    .iter()
                    .map(|c| FlaggedChoice {
                        text: c.text.clone(),
                        is_correct: c.is_correct,
                    })
                    .collect();
                (Some(PayloadChoices::Flagged(flagged)), None)
            }
            QuestionType::Text => (None, None),
        };

        Ok(NewQuestion {
            question_type: self.question_type,
            text: self.text.clone(),
            points: self.points,
            choices,
            correct_answer,
        })
    }

    /// Rebuild the form from a stored question for editing.
    pub fn decode(question: &Question) -> Self {
        let choices = match question.question_type {
            QuestionType::TrueFalse => decode_boolean(question),
            QuestionType::McqSingle | QuestionType::McqMulti => {
                let correct: Vec<&str> = question
                    .correct_answer
                    .as_ref()
                    .map(CorrectAnswer::keys)
                    .unwrap_or_default();
                question
                    .choice_list()
                    .iter()
                    .enumerate()
                    .map(|(index, choice)| {
                        let flagged = correct.iter().any(|key| {
                            key.trim().parse::<usize>().ok() == Some(index)
                                || choice.id.as_deref() == Some(*key)
                        });
                        FormChoice::new(choice.text.clone(), flagged)
                    })
                    .collect()
            }
            QuestionType::Text => Vec::new(),
        };

        Self {
            question_type: question.question_type,
            text: question.text.clone(),
            points: question.points,
            choices,
        }
    }
}

fn decode_boolean(question: &Question) -> Vec<FormChoice> {
    let stored = question.choice_list();
    if !stored.is_empty() {
        return stored
            .iter()
            .map(|c| FormChoice::new(c.text.clone(), c.is_correct.unwrap_or(false)))
            .collect();
    }

    let true_is_correct = matches!(
        &question.correct_answer,
        Some(CorrectAnswer::Single(key)) if key == "true" || key == "0"
    );
    vec![
        FormChoice::new("True", true_is_correct),
        FormChoice::new("False", !true_is_correct),
    ]
}

/// The quiz authoring form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizForm {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub published: bool,
}

impl QuizForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(())
    }

    /// Validate and build the creation payload, deriving the slug.
    pub fn encode(&self) -> Result<NewQuiz, ValidationError> {
        self.validate()?;
        Ok(NewQuiz {
            title: self.title.clone(),
            description: self.description.clone(),
            slug: slugify(&self.title),
            published: self.published,
        })
    }

    /// Validate and build an update payload. The slug is left as created.
    pub fn encode_patch(&self) -> Result<QuizPatch, ValidationError> {
        self.validate()?;
        Ok(QuizPatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            published: Some(self.published),
        })
    }
}

/// Lower-kebab slug of a title: runs of anything outside `[a-z0-9]` become
/// one `-`, with no leading or trailing dash.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}
