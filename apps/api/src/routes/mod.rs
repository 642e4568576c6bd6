pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard;
use crate::screening::handlers as screening;
use crate::state::AppState;
use crate::store::handlers as store;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route(
            "/api/v1/view",
            get(store::handle_get_view).put(store::handle_set_view),
        )
        // Jobs
        .route(
            "/api/v1/jobs",
            get(store::handle_list_jobs).post(store::handle_create_job),
        )
        .route("/api/v1/jobs/:id", get(store::handle_get_job))
        .route("/api/v1/jobs/:id/select", post(store::handle_select_job))
        // Candidates
        .route("/api/v1/candidates", get(store::handle_list_candidates))
        .route(
            "/api/v1/candidates/:id",
            get(store::handle_get_candidate).put(store::handle_update_candidate),
        )
        .route(
            "/api/v1/candidates/:id/invitation",
            post(screening::handle_draft_invitation),
        )
        .route(
            "/api/v1/candidates/:id/invitation/send",
            post(screening::handle_send_invitation),
        )
        // Screening
        .route(
            "/api/v1/screening/resumes",
            post(screening::handle_upload_resume),
        )
        .route(
            "/api/v1/screening/email-draft",
            get(screening::handle_get_email_draft),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::gateway::testing::{evaluation, ScriptedGateway};
    use crate::gateway::GatewayError;
    use crate::screening::{InFlight, EMAIL_FAILURE_PLACEHOLDER};
    use crate::store::AppStore;

    const BOUNDARY: &str = "hireai-test-boundary";

    fn test_state(gateway: ScriptedGateway) -> AppState {
        AppState {
            store: AppStore::new().shared(),
            gateway: Arc::new(gateway),
            in_flight: InFlight::default(),
        }
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn resume_upload(job_id: &str, filename: &str, text: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"job_id\"\r\n\r\n\
             {job_id}\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {text}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/screening/resumes")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn create_job(router: &Router, title: &str, department: &str, content: &str) -> String {
        let (status, job) = send(
            router,
            json_request(
                "POST",
                "/api/v1/jobs",
                json!({ "title": title, "department": department, "content": content }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        job["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let router = build_router(test_state(ScriptedGateway::default()));
        let (status, body) = send(&router, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_job_search_matches_title_or_department() {
        let router = build_router(test_state(ScriptedGateway::default()));
        create_job(&router, "Backend", "Eng", "Rust services").await;
        create_job(&router, "Designer", "Design", "Figma").await;

        let (status, jobs) = send(&router, get("/api/v1/jobs?q=eng")).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = jobs
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Backend"]);

        let (_, all) = send(&router, get("/api/v1/jobs")).await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_job_rejects_blank_title() {
        let router = build_router(test_state(ScriptedGateway::default()));
        let (status, body) = send(
            &router,
            json_request(
                "POST",
                "/api/v1/jobs",
                json!({ "title": " ", "department": "Eng", "content": "x" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_select_job_switches_to_screening() {
        let router = build_router(test_state(ScriptedGateway::default()));
        let job_id = create_job(&router, "Backend", "Eng", "Rust").await;

        let (status, nav) = send(
            &router,
            json_request("POST", &format!("/api/v1/jobs/{job_id}/select"), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(nav["view"], "screening");
        assert_eq!(nav["selected_job_id"], job_id.as_str());

        let (status, _) = send(
            &router,
            json_request("POST", "/api/v1/jobs/nope/select", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_resume_end_to_end() {
        let gateway = ScriptedGateway::default().with_evaluation(Ok(evaluation(82)));
        let router = build_router(test_state(gateway));
        let job_id = create_job(&router, "Frontend", "Eng", "Need React, 5 years").await;

        let (status, candidate) = send(
            &router,
            resume_upload(&job_id, "ada_lovelace.txt", "I have 6 years React experience"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(candidate["score"], 82);
        assert_eq!(candidate["status"], "shortlisted");
        assert_eq!(candidate["evaluation"]["match_percentage"], 82);
        assert_eq!(candidate["name"], "ada lovelace");

        let (_, dashboard) = send(&router, get("/api/v1/dashboard")).await;
        assert_eq!(dashboard["total_candidates"], 1);
        assert_eq!(dashboard["shortlisted"], 1);
        assert_eq!(dashboard["average_score"], 82.0);
        assert_eq!(dashboard["processing"], false);
    }

    #[tokio::test]
    async fn test_upload_resume_malformed_response_adds_nothing() {
        let gateway = ScriptedGateway::default().with_evaluation(Err(
            GatewayError::MalformedResponse("missing field `matchPercentage`".to_string()),
        ));
        let router = build_router(test_state(gateway));
        let job_id = create_job(&router, "Frontend", "Eng", "Need React").await;

        let (status, body) = send(&router, resume_upload(&job_id, "ada.txt", "React")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");

        let (_, candidates) = send(&router, get("/api/v1/candidates")).await;
        assert!(candidates.as_array().unwrap().is_empty());

        let (_, nav) = send(&router, get("/api/v1/view")).await;
        assert_eq!(nav["processing"], false);
    }

    #[tokio::test]
    async fn test_upload_pdf_is_unprocessable() {
        let router = build_router(test_state(ScriptedGateway::default()));
        let job_id = create_job(&router, "Frontend", "Eng", "Need React").await;
        let (status, _) = send(&router, resume_upload(&job_id, "ada.pdf", "%PDF-1.4")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_candidate_round_trip_and_unknown_id() {
        let gateway = ScriptedGateway::default().with_evaluation(Ok(evaluation(60)));
        let router = build_router(test_state(gateway));
        let job_id = create_job(&router, "Frontend", "Eng", "Need React").await;
        let (_, mut candidate) = send(&router, resume_upload(&job_id, "ada.txt", "React")).await;
        let id = candidate["id"].as_str().unwrap().to_string();

        candidate["score"] = json!(88);
        candidate["evaluation"]["match_percentage"] = json!(88);
        let (status, _) = send(
            &router,
            json_request("PUT", &format!("/api/v1/candidates/{id}"), candidate.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, candidates) = send(&router, get("/api/v1/candidates")).await;
        let candidates = candidates.as_array().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0]["score"], 88);

        candidate["id"] = json!("unknown");
        let (status, _) = send(
            &router,
            json_request("PUT", "/api/v1/candidates/unknown", candidate),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, after) = send(&router, get("/api/v1/candidates")).await;
        assert_eq!(after.as_array().unwrap().len(), 1);
        assert_eq!(after[0]["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_invitation_flow() {
        let gateway = ScriptedGateway::default()
            .with_evaluation(Ok(evaluation(90)))
            .with_email(Ok("Dear Ada, please join us for an interview.".to_string()));
        let router = build_router(test_state(gateway));
        let job_id = create_job(&router, "Engineer", "Eng", "Need React").await;
        let (_, candidate) = send(&router, resume_upload(&job_id, "Ada.txt", "React")).await;
        let id = candidate["id"].as_str().unwrap().to_string();

        let (status, draft) = send(
            &router,
            json_request(
                "POST",
                &format!("/api/v1/candidates/{id}/invitation"),
                json!({ "job_id": job_id }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!draft["content"].as_str().unwrap().is_empty());

        let (status, receipt) = send(
            &router,
            json_request(
                "POST",
                &format!("/api/v1/candidates/{id}/invitation/send"),
                json!({ "content": draft["content"] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt["simulated"], true);

        let (_, current) = send(&router, get("/api/v1/screening/email-draft")).await;
        assert!(current.is_null());
    }

    #[tokio::test]
    async fn test_draft_invitation_body_is_optional_but_validated() {
        let gateway = ScriptedGateway::default()
            .with_evaluation(Ok(evaluation(90)))
            .with_email(Ok("Dear Ada".to_string()));
        let router = build_router(test_state(gateway));
        let job_id = create_job(&router, "Engineer", "Eng", "Need React").await;
        let (_, candidate) = send(&router, resume_upload(&job_id, "Ada.txt", "React")).await;
        let id = candidate["id"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/candidates/{id}/invitation");

        let (status, body) = send(&router, json_request("POST", &uri, json!({ "job_id": 5 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let (_, current) = send(&router, get("/api/v1/screening/email-draft")).await;
        assert!(current.is_null());

        send(
            &router,
            json_request("POST", &format!("/api/v1/jobs/{job_id}/select"), json!({})),
        )
        .await;
        let empty = Request::builder()
            .method("POST")
            .uri(uri.as_str())
            .body(Body::empty())
            .unwrap();
        let (status, draft) = send(&router, empty).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(draft["job_id"], job_id.as_str());
        assert_eq!(draft["content"], "Dear Ada");
    }

    #[tokio::test]
    async fn test_invitation_transport_failure_leaves_placeholder() {
        let gateway = ScriptedGateway::default()
            .with_evaluation(Ok(evaluation(90)))
            .with_email(Err(GatewayError::TransportFailure("refused".to_string())));
        let router = build_router(test_state(gateway));
        let job_id = create_job(&router, "Engineer", "Eng", "Need React").await;
        let (_, candidate) = send(&router, resume_upload(&job_id, "Ada.txt", "React")).await;
        let id = candidate["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &router,
            json_request(
                "POST",
                &format!("/api/v1/candidates/{id}/invitation"),
                json!({ "job_id": job_id }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GATEWAY_TRANSPORT_FAILURE");

        let (_, draft) = send(&router, get("/api/v1/screening/email-draft")).await;
        assert_eq!(draft["content"], EMAIL_FAILURE_PLACEHOLDER);
        assert_eq!(draft["failed"], true);
    }
}
