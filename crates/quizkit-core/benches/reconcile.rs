use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizkit_core::attempt::{assemble, DraftAnswers};
use quizkit_core::model::{Choice, DraftAnswer, Question, QuestionType, Quiz};
use quizkit_core::reconcile::reconcile_response;
use quizkit_core::wire::{ScoredAnswer, ScoringResponse};

fn make_quiz(n: usize) -> Quiz {
    let questions = (0..n)
        .map(|i| Question {
            id: format!("q{i}"),
            quiz_id: "bench".into(),
            question_type: if i % 2 == 0 {
                QuestionType::McqSingle
            } else {
                QuestionType::McqMulti
            },
            text: format!("Question {i}"),
            choices: Some(
                (0..4)
                    .map(|c| Choice::with_id(format!("q{i}-c{c}"), format!("Choice {c}")))
                    .collect(),
            ),
            correct_answer: None,
            points: 1,
        })
        .collect();

    Quiz {
        id: "bench".into(),
        title: "Bench".into(),
        description: String::new(),
        slug: "bench".into(),
        published: true,
        questions: Some(questions),
        question_count: None,
        created_at: None,
        updated_at: None,
    }
}

fn make_drafts(quiz: &Quiz) -> DraftAnswers {
    quiz.question_list()
        .iter()
        .map(|q| {
            let draft = match q.question_type {
                QuestionType::McqMulti => DraftAnswer::MultiChoice(vec!["0".into(), "2".into()]),
                _ => DraftAnswer::Choice("1".into()),
            };
            (q.id.clone(), draft)
        })
        .collect()
}

fn make_response(quiz: &Quiz) -> ScoringResponse {
    // Reverse order so lookups cannot rely on position.
    let answers = quiz
        .question_list()
        .iter()
        .rev()
        .map(|q| ScoredAnswer {
            question_id: q.id.clone(),
            question_type: q.question_type,
            is_correct: true,
            max_points: 1,
            points_awarded: 1,
            correct_choice_ids: vec![format!("{}-c1", q.id)],
            correct_choice_texts: vec!["Choice 1".into()],
            selected_choice_ids: Some(vec![format!("{}-c1", q.id)]),
            text_answer: None,
        })
        .collect::<Vec<_>>();

    ScoringResponse {
        attempt_id: "a".into(),
        quiz_id: quiz.id.clone(),
        score: answers.len() as u32,
        max_score: answers.len() as u32,
        answers,
    }
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for n in [10, 100, 1000] {
        let quiz = make_quiz(n);
        let drafts = make_drafts(&quiz);
        group.bench_function(format!("questions={n}"), |b| {
            b.iter(|| assemble(black_box(&quiz), black_box(&drafts)))
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for n in [10, 100, 1000] {
        let quiz = make_quiz(n);
        let response = make_response(&quiz);
        group.bench_function(format!("questions={n}"), |b| {
            b.iter(|| reconcile_response(black_box(response.clone()), black_box(Some(&quiz))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_assemble, bench_reconcile);
criterion_main!(benches);
