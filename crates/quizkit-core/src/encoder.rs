//! Answer encoding in both directions.
//!
//! Taking side: turn a draft answer into the submission payload for one
//! question. Authoring side: derive a question's correct answer from the
//! choices flagged in the authoring form.

use crate::error::ValidationError;
use crate::model::{
    AnswerPayload, AttemptAnswer, CorrectAnswer, DraftAnswer, Question, QuestionType,
};
use crate::resolver::{resolve_all, resolve_choice};

/// Encode one question's draft into its submission payload.
///
/// Text answers must be non-blank; single-choice and boolean answers need
/// exactly one selection; multi-choice needs at least one. A draft whose
/// shape does not fit the question type is treated as missing.
pub fn encode_answer(
    question: &Question,
    draft: &DraftAnswer,
) -> Result<AttemptAnswer, ValidationError> {
    let response = match (question.question_type, draft) {
        (QuestionType::Text, DraftAnswer::Text(text)) if !text.trim().is_empty() => {
            AnswerPayload::Text(text.clone())
        }
        (QuestionType::McqSingle | QuestionType::TrueFalse, DraftAnswer::Choice(value))
            if !value.is_empty() =>
        {
            AnswerPayload::Selected(vec![resolve_choice(value, question.choice_list())])
        }
        (QuestionType::McqMulti, DraftAnswer::MultiChoice(values)) if !values.is_empty() => {
            AnswerPayload::Selected(resolve_all(values, question.choice_list()))
        }
        _ => return Err(missing_answer(question)),
    };

    Ok(AttemptAnswer {
        question_id: question.id.clone(),
        response,
    })
}

pub(crate) fn missing_answer(question: &Question) -> ValidationError {
    ValidationError::MissingAnswer {
        question_id: question.id.clone(),
        question: question.text.clone(),
        question_type: question.question_type,
    }
}

/// Derive the correct answer for a choice question from per-choice flags.
///
/// Single-choice takes the first flagged index, multi-choice takes all of
/// them in order. Indices are rendered as strings, the key form the store
/// expects before choices have identifiers.
pub fn derive_correct_answer(
    question_type: QuestionType,
    flags: &[bool],
) -> Result<CorrectAnswer, ValidationError> {
    if question_type == QuestionType::TrueFalse {
        let index = boolean_correct_index(flags)?;
        return Ok(CorrectAnswer::Single(index.to_string()));
    }

    let mut flagged: Vec<String> = flags
        .iter()
        .enumerate()
        .filter(|(_, &correct)| correct)
        .map(|(index, _)| index.to_string())
        .collect();

    if flagged.is_empty() {
        return Err(ValidationError::NoCorrectChoice);
    }

    match question_type {
        QuestionType::McqMulti => Ok(CorrectAnswer::Multiple(flagged)),
        _ => Ok(CorrectAnswer::Single(flagged.swap_remove(0))),
    }
}

/// Index of the flagged choice of a True/False question.
///
/// There must be exactly two choices and exactly one of them flagged.
pub fn boolean_correct_index(flags: &[bool]) -> Result<usize, ValidationError> {
    if flags.len() != 2 {
        return Err(ValidationError::InvalidChoiceCount {
            expected: 2,
            found: flags.len(),
        });
    }
    match (flags[0], flags[1]) {
        (true, false) => Ok(0),
        (false, true) => Ok(1),
        (false, false) => Err(ValidationError::NoCorrectChoice),
        (true, true) => Err(ValidationError::MultipleCorrectChoices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Choice;

    fn question(question_type: QuestionType, choices: Option<Vec<Choice>>) -> Question {
        Question {
            id: "q1".into(),
            quiz_id: "z1".into(),
            question_type,
            text: "Which one?".into(),
            choices,
            correct_answer: None,
            points: 1,
        }
    }

    fn abc() -> Option<Vec<Choice>> {
        Some(vec![
            Choice::with_id("id-a", "A"),
            Choice::with_id("id-b", "B"),
            Choice::with_id("id-c", "C"),
        ])
    }

    #[test]
    fn single_choice_encodes_one_resolved_id() {
        let q = question(QuestionType::McqSingle, abc());
        let answer = encode_answer(&q, &DraftAnswer::Choice("1".into())).unwrap();
        assert_eq!(answer.question_id, "q1");
        assert_eq!(answer.response, AnswerPayload::Selected(vec!["id-b".into()]));
    }

    #[test]
    fn boolean_without_ids_keeps_index() {
        let q = question(
            QuestionType::TrueFalse,
            Some(vec![Choice::new("True"), Choice::new("False")]),
        );
        let answer = encode_answer(&q, &DraftAnswer::Choice("0".into())).unwrap();
        assert_eq!(answer.response, AnswerPayload::Selected(vec!["0".into()]));
    }

    #[test]
    fn empty_selection_is_missing() {
        let q = question(QuestionType::McqSingle, abc());
        let err = encode_answer(&q, &DraftAnswer::Choice(String::new())).unwrap_err();
        assert!(matches!(err, ValidationError::MissingAnswer { .. }));

        let q = question(QuestionType::McqMulti, abc());
        let err = encode_answer(&q, &DraftAnswer::MultiChoice(vec![])).unwrap_err();
        assert!(matches!(err, ValidationError::MissingAnswer { .. }));
    }

    #[test]
    fn blank_text_is_missing() {
        let q = question(QuestionType::Text, None);
        for text in ["", "   ", "\n\t"] {
            let err = encode_answer(&q, &DraftAnswer::Text(text.into())).unwrap_err();
            assert_eq!(
                err,
                ValidationError::MissingAnswer {
                    question_id: "q1".into(),
                    question: "Which one?".into(),
                    question_type: QuestionType::Text,
                }
            );
        }
        let answer = encode_answer(&q, &DraftAnswer::Text(" Paris ".into())).unwrap();
        assert_eq!(answer.response, AnswerPayload::Text(" Paris ".into()));
    }

    #[test]
    fn wrong_shape_is_missing() {
        let q = question(QuestionType::McqSingle, abc());
        let draft = DraftAnswer::MultiChoice(vec!["0".into(), "1".into()]);
        assert!(encode_answer(&q, &draft).is_err());

        let q = question(QuestionType::Text, None);
        assert!(encode_answer(&q, &DraftAnswer::MultiChoice(vec!["x".into()])).is_err());
    }

    #[test]
    fn multi_choice_keeps_order_and_duplicates() {
        let q = question(QuestionType::McqMulti, abc());
        let draft = DraftAnswer::MultiChoice(vec!["2".into(), "0".into(), "0".into()]);
        let answer = encode_answer(&q, &draft).unwrap();
        assert_eq!(
            answer.response,
            AnswerPayload::Selected(vec!["id-c".into(), "id-a".into(), "id-a".into()])
        );
    }

    #[test]
    fn derive_single_takes_first_flag() {
        let answer = derive_correct_answer(QuestionType::McqSingle, &[false, true, true]).unwrap();
        assert_eq!(answer, CorrectAnswer::Single("1".into()));
    }

    #[test]
    fn derive_multi_takes_all_flags() {
        let answer = derive_correct_answer(QuestionType::McqMulti, &[true, false, true]).unwrap();
        assert_eq!(answer, CorrectAnswer::Multiple(vec!["0".into(), "2".into()]));
    }

    #[test]
    fn derive_without_flags_fails() {
        assert_eq!(
            derive_correct_answer(QuestionType::McqMulti, &[false, false]),
            Err(ValidationError::NoCorrectChoice)
        );
    }

    #[test]
    fn boolean_rules() {
        assert_eq!(boolean_correct_index(&[false, true]), Ok(1));
        assert_eq!(
            boolean_correct_index(&[true]),
            Err(ValidationError::InvalidChoiceCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            boolean_correct_index(&[false, false]),
            Err(ValidationError::NoCorrectChoice)
        );
        assert_eq!(
            boolean_correct_index(&[true, true]),
            Err(ValidationError::MultipleCorrectChoices)
        );
        assert_eq!(
            derive_correct_answer(QuestionType::TrueFalse, &[true, false]),
            Ok(CorrectAnswer::Single("0".into()))
        );
    }
}
