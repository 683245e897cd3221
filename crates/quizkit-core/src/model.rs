//! Core data model types for quizkit.
//!
//! These are the in-memory shapes of quizzes, questions, draft answers and
//! reconciled results. The store's wire shapes live in [`crate::wire`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four kinds of question a quiz can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// Multiple choice, exactly one correct choice.
    McqSingle,
    /// Multiple choice, one or more correct choices.
    McqMulti,
    /// Two fixed choices, "True" and "False".
    TrueFalse,
    /// Free-text response.
    Text,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::McqSingle => write!(f, "MCQ_SINGLE"),
            QuestionType::McqMulti => write!(f, "MCQ_MULTI"),
            QuestionType::TrueFalse => write!(f, "TRUE_FALSE"),
            QuestionType::Text => write!(f, "TEXT"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "MCQ_SINGLE" | "SINGLE" => Ok(QuestionType::McqSingle),
            "MCQ_MULTI" | "MULTI" => Ok(QuestionType::McqMulti),
            "TRUE_FALSE" | "BOOLEAN" => Ok(QuestionType::TrueFalse),
            "TEXT" => Ok(QuestionType::Text),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChoiceDoc")]
pub struct Choice {
    /// Stable identifier assigned by the store, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display text.
    pub text: String,
    /// Authoring-time correctness flag. Never trusted when taking a quiz.
    #[serde(
        default,
        rename = "isCorrect",
        alias = "is_correct",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_correct: Option<bool>,
}

impl Choice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            is_correct: None,
        }
    }

    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
            is_correct: None,
        }
    }
}

/// The authored correct answer: a single key, or a list for multi-choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl CorrectAnswer {
    /// All keys, regardless of arity.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            CorrectAnswer::Single(key) => vec![key.as_str()],
            CorrectAnswer::Multiple(keys) => keys.iter().map(String::as_str).collect(),
        }
    }
}

/// A quiz question as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "QuestionDoc")]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub quiz_id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<CorrectAnswer>,
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    1
}

impl Question {
    /// The question's choices, or an empty slice for text questions.
    pub fn choice_list(&self) -> &[Choice] {
        self.choices.as_deref().unwrap_or(&[])
    }
}

/// A quiz and, when fetched individually, its ordered questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "QuizDoc")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
    /// Count-only field some list responses carry instead of questions.
    #[serde(
        default,
        rename = "question_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Quiz {
    /// The ordered question list, empty when the store sent none.
    pub fn question_list(&self) -> &[Question] {
        self.questions.as_deref().unwrap_or(&[])
    }

    /// Number of questions, preferring the embedded list over the count field.
    pub fn question_total(&self) -> usize {
        match (&self.questions, self.question_count) {
            (Some(questions), _) => questions.len(),
            (None, Some(count)) => count as usize,
            (None, None) => 0,
        }
    }

    /// Sum of declared points over all embedded questions.
    pub fn total_points(&self) -> u32 {
        self.question_list().iter().map(|q| q.points).sum()
    }
}

// Store documents may carry `_id`, `id` or both. `_id` wins when both are set.

#[derive(Deserialize)]
struct ChoiceDoc {
    #[serde(default, rename = "_id")]
    store_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default, rename = "isCorrect", alias = "is_correct")]
    is_correct: Option<bool>,
}

impl From<ChoiceDoc> for Choice {
    fn from(doc: ChoiceDoc) -> Self {
        Self {
            id: doc.store_id.or(doc.id),
            text: doc.text,
            is_correct: doc.is_correct,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDoc {
    #[serde(default, rename = "_id")]
    store_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    quiz_id: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    #[serde(default)]
    text: String,
    #[serde(default)]
    choices: Option<Vec<Choice>>,
    #[serde(default)]
    correct_answer: Option<CorrectAnswer>,
    #[serde(default = "default_points")]
    points: u32,
}

impl From<QuestionDoc> for Question {
    fn from(doc: QuestionDoc) -> Self {
        Self {
            id: doc.store_id.or(doc.id).unwrap_or_default(),
            quiz_id: doc.quiz_id,
            question_type: doc.question_type,
            text: doc.text,
            choices: doc.choices,
            correct_answer: doc.correct_answer,
            points: doc.points,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizDoc {
    #[serde(default, rename = "_id")]
    store_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    published: bool,
    #[serde(default)]
    questions: Option<Vec<Question>>,
    #[serde(default, rename = "question_count")]
    question_count: Option<u32>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<QuizDoc> for Quiz {
    fn from(doc: QuizDoc) -> Self {
        Self {
            id: doc.store_id.or(doc.id).unwrap_or_default(),
            title: doc.title,
            description: doc.description,
            slug: doc.slug,
            published: doc.published,
            questions: doc.questions,
            question_count: doc.question_count,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// The user's in-progress answer to one question.
///
/// `Choice` and `Text` both hold one string, so raw user input is shaped
/// with [`DraftAnswer::for_type`] once the question type is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAnswer {
    /// A choice index or identifier for single-choice and boolean questions.
    Choice(String),
    /// Choice indices or identifiers for multi-choice questions.
    MultiChoice(Vec<String>),
    /// Free text.
    Text(String),
}

impl DraftAnswer {
    /// The empty draft a question of this type starts with.
    pub fn empty_for(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::McqMulti => DraftAnswer::MultiChoice(Vec::new()),
            QuestionType::Text => DraftAnswer::Text(String::new()),
            QuestionType::McqSingle | QuestionType::TrueFalse => {
                DraftAnswer::Choice(String::new())
            }
        }
    }

    /// Reshape a loosely-typed draft into the variant this question type expects.
    ///
    /// A single value given for a multi-choice question becomes a one-element
    /// list; a one-element list given for a single-choice question becomes
    /// its only element. Anything else keeps its shape, and the encoder will
    /// reject it.
    pub fn for_type(self, question_type: QuestionType) -> Self {
        match (question_type, self) {
            (QuestionType::Text, DraftAnswer::Choice(s)) => DraftAnswer::Text(s),
            (QuestionType::McqMulti, DraftAnswer::Choice(s) | DraftAnswer::Text(s)) => {
                if s.is_empty() {
                    DraftAnswer::MultiChoice(Vec::new())
                } else {
                    DraftAnswer::MultiChoice(vec![s])
                }
            }
            (QuestionType::McqSingle | QuestionType::TrueFalse, DraftAnswer::Text(s)) => {
                DraftAnswer::Choice(s)
            }
            (QuestionType::McqSingle | QuestionType::TrueFalse, DraftAnswer::MultiChoice(v))
                if v.len() == 1 =>
            {
                DraftAnswer::Choice(v.into_iter().next().unwrap_or_default())
            }
            (_, other) => other,
        }
    }
}

/// The body of one submitted answer: either selections or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerPayload {
    Selected(Vec<String>),
    Text(String),
}

/// One question's answer as it is submitted to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptAnswer {
    pub question_id: String,
    pub response: AnswerPayload,
}

/// A displayable answer: one value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    List(Vec<String>),
}

impl AnswerValue {
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Single(s) => s.is_empty(),
            AnswerValue::List(v) => v.is_empty(),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Single(s) => write!(f, "{s}"),
            AnswerValue::List(v) => write!(f, "{}", v.join(", ")),
        }
    }
}

/// One scored question, merged with the quiz definition when available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub question_id: String,
    /// Placeholder with empty text until reconciled against the quiz.
    pub question: Question,
    pub user_answer: AnswerValue,
    pub correct_answer: AnswerValue,
    pub points_earned: u32,
    pub is_correct: bool,
}

impl AnswerOutcome {
    /// The question text, or its identifier when the text never arrived.
    pub fn question_label(&self) -> &str {
        if self.question.text.is_empty() {
            &self.question_id
        } else {
            &self.question.text
        }
    }

    /// The user's answer as shown on the result page.
    ///
    /// Selected identifiers are replaced by choice text once the question
    /// has been reconciled; unknown identifiers are shown as they are.
    pub fn user_answer_display(&self) -> String {
        match &self.user_answer {
            answer if answer.is_empty() => "No answer provided".to_string(),
            AnswerValue::List(ids) => {
                let choices = self.question.choice_list();
                ids.iter()
                    .map(|id| {
                        choices
                            .iter()
                            .find(|c| c.id.as_deref() == Some(id.as_str()))
                            .map_or(id.as_str(), |c| c.text.as_str())
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            AnswerValue::Single(text) => text.clone(),
        }
    }
}

/// A scored attempt ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub attempt_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub total_points: u32,
    pub answers: Vec<AnswerOutcome>,
}
