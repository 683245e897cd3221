//! Attempt assembly.
//!
//! Walks a quiz's questions in order and encodes each draft answer, stopping
//! at the first question without a usable answer.

use std::collections::HashMap;

use crate::encoder::encode_answer;
use crate::error::ValidationError;
use crate::model::{AttemptAnswer, DraftAnswer, Quiz};

/// Draft answers keyed by question id.
pub type DraftAnswers = HashMap<String, DraftAnswer>;

/// The empty draft for every question, as the taking UI pre-populates it.
pub fn initial_drafts(quiz: &Quiz) -> DraftAnswers {
    quiz.question_list()
        .iter()
        .map(|q| (q.id.clone(), DraftAnswer::empty_for(q.question_type)))
        .collect()
}

/// Build the ordered attempt payload for a quiz.
///
/// Every question appears exactly once, in quiz order. A question with no
/// draft is treated as its type's empty draft. The first incomplete
/// question aborts assembly; nothing is returned for the others.
pub fn assemble(quiz: &Quiz, drafts: &DraftAnswers) -> Result<Vec<AttemptAnswer>, ValidationError> {
    let questions = quiz.question_list();
    let mut answers = Vec::with_capacity(questions.len());

    for question in questions {
        let answer = match drafts.get(&question.id) {
            Some(draft) => encode_answer(question, draft),
            None => encode_answer(question, &DraftAnswer::empty_for(question.question_type)),
        }?;
        answers.push(answer);
    }

    tracing::debug!(quiz_id = %quiz.id, answers = answers.len(), "assembled attempt");
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerPayload, Choice, Question, QuestionType};

    fn q(id: &str, question_type: QuestionType, text: &str) -> Question {
        let choices = match question_type {
            QuestionType::Text => None,
            QuestionType::TrueFalse => Some(vec![Choice::new("True"), Choice::new("False")]),
            _ => Some(vec![
                Choice::with_id(format!("{id}-a"), "A"),
                Choice::with_id(format!("{id}-b"), "B"),
                Choice::with_id(format!("{id}-c"), "C"),
            ]),
        };
        Question {
            id: id.into(),
            quiz_id: "z1".into(),
            question_type,
            text: text.into(),
            choices,
            correct_answer: None,
            points: 1,
        }
    }

    fn quiz(questions: Vec<Question>) -> Quiz {
        Quiz {
            id: "z1".into(),
            title: "Sample".into(),
            description: String::new(),
            slug: "sample".into(),
            published: true,
            questions: Some(questions),
            question_count: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn initial_drafts_match_types() {
        let quiz = quiz(vec![
            q("q1", QuestionType::McqMulti, "multi"),
            q("q2", QuestionType::Text, "text"),
            q("q3", QuestionType::TrueFalse, "bool"),
        ]);
        let drafts = initial_drafts(&quiz);
        assert_eq!(drafts["q1"], DraftAnswer::MultiChoice(vec![]));
        assert_eq!(drafts["q2"], DraftAnswer::Text(String::new()));
        assert_eq!(drafts["q3"], DraftAnswer::Choice(String::new()));
    }

    #[test]
    fn assembles_in_quiz_order() {
        let quiz = quiz(vec![
            q("q1", QuestionType::McqSingle, "single"),
            q("q2", QuestionType::Text, "text"),
            q("q3", QuestionType::McqMulti, "multi"),
        ]);
        let mut drafts = initial_drafts(&quiz);
        drafts.insert("q3".into(), DraftAnswer::MultiChoice(vec!["2".into(), "0".into()]));
        drafts.insert("q2".into(), DraftAnswer::Text("forty-two".into()));
        drafts.insert("q1".into(), DraftAnswer::Choice("1".into()));

        let answers = assemble(&quiz, &drafts).unwrap();
        let ids: Vec<&str> = answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
        assert_eq!(
            answers[0].response,
            AnswerPayload::Selected(vec!["q1-b".into()])
        );
        assert_eq!(answers[1].response, AnswerPayload::Text("forty-two".into()));
        assert_eq!(
            answers[2].response,
            AnswerPayload::Selected(vec!["q3-c".into(), "q3-a".into()])
        );
    }

    #[test]
    fn empty_free_text_fails_with_question_text() {
        let quiz = quiz(vec![q("q1", QuestionType::Text, "Name a prime")]);
        let err = assemble(&quiz, &initial_drafts(&quiz)).unwrap_err();
        assert!(matches!(
            &err,
            ValidationError::MissingAnswer { question, .. } if question == "Name a prime"
        ));
        assert!(err.to_string().contains("Name a prime"));
    }

    #[test]
    fn stops_at_first_incomplete_question() {
        let quiz = quiz(vec![
            q("q1", QuestionType::McqSingle, "first"),
            q("q2", QuestionType::McqMulti, "second"),
            q("q3", QuestionType::Text, "third"),
        ]);
        let mut drafts = DraftAnswers::new();
        drafts.insert("q1".into(), DraftAnswer::Choice("0".into()));

        let err = assemble(&quiz, &drafts).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingAnswer { ref question_id, .. } if question_id == "q2"
        ));
    }

    #[test]
    fn single_and_boolean_yield_one_selection() {
        let quiz = quiz(vec![
            q("q1", QuestionType::McqSingle, "single"),
            q("q2", QuestionType::TrueFalse, "bool"),
        ]);
        for (single, boolean) in [("0", "0"), ("1", "1"), ("2", "0")] {
            let mut drafts = DraftAnswers::new();
            drafts.insert("q1".into(), DraftAnswer::Choice(single.into()));
            drafts.insert("q2".into(), DraftAnswer::Choice(boolean.into()));
            let answers = assemble(&quiz, &drafts).unwrap();
            for answer in &answers {
                let AnswerPayload::Selected(ids) = &answer.response else {
                    panic!("expected selection for {}", answer.question_id);
                };
                assert_eq!(ids.len(), 1);
            }
        }
    }

    #[test]
    fn quiz_without_questions_assembles_empty() {
        let quiz = Quiz {
            questions: None,
            ..quiz(vec![])
        };
        assert!(assemble(&quiz, &DraftAnswers::new()).unwrap().is_empty());
    }
}
