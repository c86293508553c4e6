mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use quizcraft::presentation::create_router;

use common::{ScriptedLlmClient, WATER_CYCLE, WATER_CYCLE_REPLY, test_state};

const BOUNDARY: &str = "quizcraft-test-boundary";

enum Part<'a> {
    Field(&'a str, &'a str),
    File {
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Field(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn text_file(data: &[u8]) -> Part<'_> {
    Part::File {
        filename: "water.txt",
        content_type: "text/plain",
        data,
    }
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn given_running_app_when_checking_health_then_returns_healthy() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["provider"], "groq");
    assert_eq!(json["model"], "llama3-8b-8192");
}

#[tokio::test]
async fn given_request_id_header_when_calling_then_it_is_echoed() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));

    let response = app
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn given_groq_configuration_when_listing_models_then_returns_groq_models() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));

    let response = app
        .oneshot(Request::get("/api/v1/models").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["provider"], "groq");
    assert_eq!(json["default_model"], "llama3-8b-8192");
    assert_eq!(json["models"].as_array().unwrap().len(), 2);
    assert_eq!(json["reply_format"], "structured");
}

#[tokio::test]
async fn given_text_upload_when_extracting_then_returns_normalized_text() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));
    let data = b"  The water   cycle\n\nhas stages.  ";

    let response = app
        .oneshot(multipart_request("/api/v1/extract", &[text_file(data)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["text"], "The water cycle has stages.");
    assert_eq!(json["content_type"], "text/plain");
    assert_eq!(json["characters"], 27);
}

#[tokio::test]
async fn given_text_upload_when_generating_then_returns_quiz_and_table() {
    let client = Arc::new(ScriptedLlmClient::replying(WATER_CYCLE_REPLY));
    let app = create_router(test_state(Arc::clone(&client)));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/quizzes",
            &[
                text_file(WATER_CYCLE.as_bytes()),
                Part::Field("subject", "Science"),
                Part::Field("difficulty", "easy"),
                Part::Field("question_count", "3"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["source_characters"], WATER_CYCLE.chars().count());
    assert_eq!(json["quiz"]["questions"].as_array().unwrap().len(), 3);
    assert_eq!(json["table"]["rows"].as_array().unwrap().len(), 3);

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].user_prompt.contains("Science"));
    assert!(requests[0].user_prompt.contains("Easy"));
}

#[tokio::test]
async fn given_unsupported_file_type_when_generating_then_returns_415_without_model_call() {
    let client = Arc::new(ScriptedLlmClient::replying(WATER_CYCLE_REPLY));
    let app = create_router(test_state(Arc::clone(&client)));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/quizzes",
            &[Part::File {
                filename: "diagram.png",
                content_type: "image/png",
                data: b"\x89PNG\r\n",
            }],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn given_no_file_when_generating_then_returns_400() {
    let client = Arc::new(ScriptedLlmClient::replying(WATER_CYCLE_REPLY));
    let app = create_router(test_state(Arc::clone(&client)));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/quizzes",
            &[Part::Field("subject", "Science")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please upload a file before generating.");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn given_question_count_out_of_range_when_generating_then_returns_400() {
    let client = Arc::new(ScriptedLlmClient::replying(WATER_CYCLE_REPLY));
    let app = create_router(test_state(Arc::clone(&client)));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/quizzes",
            &[
                text_file(WATER_CYCLE.as_bytes()),
                Part::Field("question_count", "51"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn given_model_of_other_provider_when_generating_then_returns_400() {
    let client = Arc::new(ScriptedLlmClient::replying(WATER_CYCLE_REPLY));
    let app = create_router(test_state(Arc::clone(&client)));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/quizzes",
            &[
                text_file(WATER_CYCLE.as_bytes()),
                Part::Field("model", "gemini-1.5-pro"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn given_empty_text_file_when_generating_then_returns_400_without_model_call() {
    let client = Arc::new(ScriptedLlmClient::replying(WATER_CYCLE_REPLY));
    let app = create_router(test_state(Arc::clone(&client)));

    let response = app
        .oneshot(multipart_request("/api/v1/quizzes", &[text_file(b"  \n ")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn given_unparseable_model_reply_when_generating_then_returns_502_with_raw_reply() {
    let raw = "Sorry, I can only answer in prose.";
    let client = Arc::new(ScriptedLlmClient::replying(raw));
    let app = create_router(test_state(client));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/quizzes",
            &[text_file(WATER_CYCLE.as_bytes())],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["raw_reply"], raw);
}

#[tokio::test]
async fn given_rate_limited_provider_when_generating_then_returns_429() {
    let client = Arc::new(ScriptedLlmClient::new(vec![Err(
        quizcraft::application::ports::LlmClientError::RateLimited,
    )]));
    let app = create_router(test_state(client));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/quizzes",
            &[text_file(WATER_CYCLE.as_bytes())],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn given_generated_quiz_when_exporting_csv_then_returns_attachment() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));
    let quiz: Value = serde_json::from_str(WATER_CYCLE_REPLY).unwrap();

    let response = app
        .oneshot(
            Request::post("/api/v1/quizzes/export?format=csv")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(quiz.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"mcqs.csv\""
    );
    let csv = body_text(response).await;
    assert!(csv.starts_with("#,Question,Option A,Option B,Option C,Option D,Answer,Explanation"));
    assert_eq!(csv.lines().count(), 4);
}

#[tokio::test]
async fn given_generated_quiz_when_exporting_json_then_returns_same_quiz() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));
    let quiz: Value = serde_json::from_str(WATER_CYCLE_REPLY).unwrap();

    let response = app
        .oneshot(
            Request::post("/api/v1/quizzes/export?format=json")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(quiz.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"mcqs.json\""
    );
    let exported = body_json(response).await;
    assert_eq!(exported["subject"], "Science");
    assert_eq!(exported["questions"][2]["correct_label"], "D");
}

#[tokio::test]
async fn given_index_page_when_requested_then_renders_upload_form() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Generate MCQs"));
    assert!(html.contains("llama3-70b-8192"));
    assert!(html.contains("Tips for Best Results"));
}

#[tokio::test]
async fn given_form_submission_when_generating_then_page_shows_table_and_downloads() {
    let client = Arc::new(ScriptedLlmClient::replying(WATER_CYCLE_REPLY));
    let app = create_router(test_state(client));

    let response = app
        .oneshot(multipart_request(
            "/quiz",
            &[text_file(WATER_CYCLE.as_bytes())],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Successfully generated 3 MCQs!"));
    assert!(html.contains("Option D"));
    assert!(html.contains("/quiz/export/csv"));
}

#[tokio::test]
async fn given_form_submission_with_bad_reply_when_generating_then_page_shows_raw_reply() {
    let client = Arc::new(ScriptedLlmClient::replying("not json at all"));
    let app = create_router(test_state(client));

    let response = app
        .oneshot(multipart_request(
            "/quiz",
            &[text_file(WATER_CYCLE.as_bytes())],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("Raw model reply"));
    assert!(html.contains("not json at all"));
}

#[tokio::test]
async fn given_download_form_when_posting_quiz_then_returns_csv_attachment() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));
    let quiz: Value = serde_json::from_str(WATER_CYCLE_REPLY).unwrap();
    let form = format!(
        "quiz={}",
        quiz.to_string()
            .bytes()
            .map(|b| if b.is_ascii_alphanumeric() {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            })
            .collect::<String>()
    );

    let response = app
        .oneshot(
            Request::post("/quiz/export/csv")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"mcqs.csv\""
    );
}

#[tokio::test]
async fn given_unknown_export_format_when_posting_form_then_returns_400() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));

    let response = app
        .oneshot(
            Request::post("/quiz/export/xlsx")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("quiz=%7B%7D"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_unknown_path_when_requested_then_returns_404() {
    let app = create_router(test_state(Arc::new(ScriptedLlmClient::new(Vec::new()))));

    let response = app
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_file_over_size_limit_when_uploading_then_returns_413() {
    let client = Arc::new(ScriptedLlmClient::replying(WATER_CYCLE_REPLY));
    let app = create_router(test_state(Arc::clone(&client)));
    let data = vec![b'a'; 1024 * 1024 + 1];

    let response = app
        .oneshot(multipart_request("/api/v1/quizzes", &[text_file(&data)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(client.call_count(), 0);
}
