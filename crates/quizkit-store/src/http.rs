//! HTTP quiz store implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use quizkit_core::model::{AttemptAnswer, Question, Quiz};
use quizkit_core::traits::{QuizStore, Scope};
use quizkit_core::wire::{AttemptSubmission, NewQuestion, NewQuiz, QuizPatch, ScoringResponse};

use crate::config::StoreConfig;
use crate::error::{self, StoreError};

/// Quiz store reached over its REST API.
pub struct HttpQuizStore {
    base_url: String,
    timeout_secs: u64,
    admin_token: Option<String>,
    client: reqwest::Client,
}

impl HttpQuizStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::NetworkFailure(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            admin_token: config.admin_token.clone(),
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));

        match (&self.admin_token, path.starts_with("/admin/")) {
            (Some(token), true) => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Send a request and classify transport and status failures.
    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| error::from_transport(e, &self.base_url, self.timeout_secs))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(error::from_status(status, &body, what));
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        what: &str,
    ) -> Result<T, StoreError> {
        let response = self.send(self.request(method, path), what).await?;
        decode(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        what: &str,
    ) -> Result<T, StoreError> {
        let response = self
            .send(self.request(method, path).json(body), what)
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    response
        .json()
        .await
        .map_err(|e| StoreError::InvalidResponse(format!("failed to parse response: {e}")))
}

fn scoped(scope: Scope, path: &str) -> String {
    match scope {
        Scope::Published => path.to_string(),
        Scope::Admin => format!("/admin{path}"),
    }
}

#[async_trait]
impl QuizStore for HttpQuizStore {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self))]
    async fn list_quizzes(&self, scope: Scope) -> Result<Vec<Quiz>, StoreError> {
        self.fetch(Method::GET, &scoped(scope, "/quizzes"), "quiz listing")
            .await
    }

    #[instrument(skip(self))]
    async fn get_quiz(&self, scope: Scope, quiz_id: &str) -> Result<Quiz, StoreError> {
        let path = scoped(scope, &format!("/quizzes/{quiz_id}"));
        self.fetch(Method::GET, &path, &format!("quiz {quiz_id}"))
            .await
    }

    #[instrument(skip(self, quiz), fields(slug = %quiz.slug))]
    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, StoreError> {
        self.send_json(Method::POST, "/admin/quizzes", quiz, "quiz collection")
            .await
    }

    #[instrument(skip(self, patch))]
    async fn update_quiz(&self, quiz_id: &str, patch: &QuizPatch) -> Result<Quiz, StoreError> {
        self.send_json(
            Method::PUT,
            &format!("/admin/quizzes/{quiz_id}"),
            patch,
            &format!("quiz {quiz_id}"),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_quiz(&self, quiz_id: &str) -> Result<(), StoreError> {
        let builder = self.request(Method::DELETE, &format!("/admin/quizzes/{quiz_id}"));
        self.send(builder, &format!("quiz {quiz_id}")).await?;
        Ok(())
    }

    #[instrument(skip(self, question), fields(question_type = %question.question_type))]
    async fn create_question(
        &self,
        quiz_id: &str,
        question: &NewQuestion,
    ) -> Result<Question, StoreError> {
        self.send_json(
            Method::POST,
            &format!("/admin/quizzes/{quiz_id}/questions"),
            question,
            &format!("quiz {quiz_id}"),
        )
        .await
    }

    #[instrument(skip(self, question), fields(question_type = %question.question_type))]
    async fn update_question(
        &self,
        question_id: &str,
        question: &NewQuestion,
    ) -> Result<Question, StoreError> {
        self.send_json(
            Method::PUT,
            &format!("/admin/questions/{question_id}"),
            question,
            &format!("question {question_id}"),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_question(&self, question_id: &str) -> Result<(), StoreError> {
        let builder = self.request(Method::DELETE, &format!("/admin/questions/{question_id}"));
        self.send(builder, &format!("question {question_id}"))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, answers), fields(answers = answers.len()))]
    async fn submit_attempt(
        &self,
        quiz_id: &str,
        answers: &[AttemptAnswer],
    ) -> Result<ScoringResponse, StoreError> {
        let body = AttemptSubmission::to_wire(answers);
        self.send_json(
            Method::POST,
            &format!("/quizzes/{quiz_id}/attempt"),
            &body,
            &format!("quiz {quiz_id}"),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizkit_core::model::{AnswerPayload, QuestionType};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer, token: Option<&str>) -> HttpQuizStore {
        HttpQuizStore::new(&StoreConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            admin_token: token.map(String::from),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_published_quiz() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "_id": "z1",
            "title": "Capitals",
            "description": "Europe",
            "slug": "capitals",
            "published": true,
            "questions": [{
                "_id": "q1",
                "quizId": "z1",
                "type": "MCQ_SINGLE",
                "text": "Capital of France?",
                "choices": [{"_id": "c1", "text": "Paris"}, {"_id": "c2", "text": "Lyon"}],
                "points": 2
            }]
        });

        Mock::given(method("GET"))
            .and(path("/quizzes/z1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let store = store_for(&server, None);
        assert_eq!(store.name(), "http");

        let quiz = store
            .get_quiz(Scope::Published, "z1")
            .await
            .unwrap();
        assert_eq!(quiz.id, "z1");
        assert_eq!(quiz.question_list()[0].choice_list()[0].id.as_deref(), Some("c1"));
        assert_eq!(quiz.total_points(), 2);
    }

    #[tokio::test]
    async fn listing_accepts_count_only_entries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/quizzes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "z1", "title": "A", "question_count": 3},
                {"id": "z2", "title": "B", "question_count": 0}
            ])))
            .mount(&server)
            .await;

        let quizzes = store_for(&server, None)
            .list_quizzes(Scope::Published)
            .await
            .unwrap();
        assert_eq!(quizzes.len(), 2);
        assert_eq!(quizzes[0].question_total(), 3);
    }

    #[tokio::test]
    async fn submits_snake_case_attempt() {
        let server = MockServer::start().await;

        let expected = serde_json::json!({
            "answers": [
                {"question_id": "q1", "selected_choice_ids": ["c1"]},
                {"question_id": "q2", "text_answer": "Paris"}
            ]
        });
        let scoring = serde_json::json!({
            "attempt_id": "a1",
            "quiz_id": "z1",
            "score": 1,
            "max_score": 2,
            "answers": [{
                "question_id": "q1",
                "type": "MCQ_SINGLE",
                "is_correct": true,
                "max_points": 1,
                "points_awarded": 1,
                "correct_choice_ids": ["c1"],
                "correct_choice_texts": ["Paris"],
                "selected_choice_ids": ["c1"]
            }]
        });

        Mock::given(method("POST"))
            .and(path("/quizzes/z1/attempt"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(&scoring))
            .expect(1)
            .mount(&server)
            .await;

        let answers = vec![
            AttemptAnswer {
                question_id: "q1".into(),
                response: AnswerPayload::Selected(vec!["c1".into()]),
            },
            AttemptAnswer {
                question_id: "q2".into(),
                response: AnswerPayload::Text("Paris".into()),
            },
        ];

        let response = store_for(&server, None)
            .submit_attempt("z1", &answers)
            .await
            .unwrap();
        assert_eq!(response.attempt_id, "a1");
        assert_eq!(response.answers[0].question_type, QuestionType::McqSingle);
    }

    #[tokio::test]
    async fn missing_quiz_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/quizzes/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = store_for(&server, None)
            .get_quiz(Scope::Published, "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref what) if what == "quiz nope"));
    }

    #[tokio::test]
    async fn server_error_surfaces_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/quizzes"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"message": "slug already taken"})),
            )
            .mount(&server)
            .await;

        let quiz = NewQuiz {
            title: "A".into(),
            description: "B".into(),
            slug: "a".into(),
            published: false,
        };
        let err = store_for(&server, None).create_quiz(&quiz).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Api { status: 500, ref message } if message == "slug already taken"
        ));
    }

    #[tokio::test]
    async fn admin_requests_carry_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/admin/questions/q9"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server, Some("s3cret"))
            .delete_question("q9")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/quizzes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = store_for(&server, None)
            .list_quizzes(Scope::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_store_is_network_failure() {
        let store = HttpQuizStore::new(&StoreConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout_secs: 2,
            admin_token: None,
        })
        .unwrap();

        let err = store.list_quizzes(Scope::Published).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::NetworkFailure(_) | StoreError::Timeout(_)
        ));
    }
}
