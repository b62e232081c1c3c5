//! End-to-end pipeline tests against mock control-plane, embedding, and
//! index servers.

use pretty_assertions::assert_eq;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kbseed_cli::article;
use kbseed_cli::verify::Outcome;
use kbseed_cli::workflow::Workflow;
use kbseed_embeddings::OpenAIProvider;
use kbseed_vector_index::IndexClient;

/// One server plays all three roles; the listing points the data plane back
/// at the same address.
async fn mount_control_plane(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/indexes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "indexes": [{"name": "support-chatbot", "host": server.uri()}],
        })))
        .mount(server)
        .await;
}

async fn mount_embeddings(server: &MockServer, expect: u64) {
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"embedding": [0.5, 0.25, 0.125]}],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 10, "total_tokens": 10},
        })))
        .expect(expect)
        .mount(server)
        .await;
}

fn workflow_for(server: &MockServer, keep_going: bool) -> Workflow {
    let provider = OpenAIProvider::new()
        .with_api_key("sk-test")
        .with_base_url(server.uri());
    let index = IndexClient::builder("pc-test-key")
        .with_control_url(server.uri())
        .build()
        .unwrap();

    Workflow {
        provider,
        index,
        index_name: "support-chatbot".to_string(),
        top_k: 3,
        keep_going,
    }
}

#[tokio::test]
async fn full_pipeline_seeds_and_verifies() {
    let server = MockServer::start().await;
    mount_control_plane(&server).await;
    // One embedding for the article, one per verification query.
    mount_embeddings(&server, 1 + article::VERIFICATION_QUERIES.len() as u64).await;

    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .and(body_partial_json(serde_json::json!({
            "vectors": [{"id": "kb_password_reset_selfcare"}],
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"upsertedCount": 1})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_partial_json(serde_json::json!({
            "topK": 3,
            "includeMetadata": true,
            "filter": {"source": {"$eq": "kb_article"}},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "matches": [{
                "id": "kb_password_reset_selfcare",
                "score": 0.875,
                "metadata": {
                    "source": "kb_article",
                    "title": "How to reset server password using Self-Care Portal",
                    "text": "...",
                },
            }],
        })))
        .expect(article::VERIFICATION_QUERIES.len() as u64)
        .mount(&server)
        .await;

    let workflow = workflow_for(&server, false);
    let kb = article::password_reset();
    let report = workflow
        .run(&kb, &article::VERIFICATION_QUERIES)
        .await
        .unwrap();

    assert!(report.upsert_ok);
    assert_eq!(report.reports.len(), article::VERIFICATION_QUERIES.len());
    assert!(
        report
            .reports
            .iter()
            .all(|r| r.outcome == Outcome::Match)
    );
    assert!(report.succeeded());
}

#[tokio::test]
async fn upsert_failure_aborts_before_verification() {
    let server = MockServer::start().await;
    mount_control_plane(&server).await;
    // Only the article embedding happens before the abort.
    mount_embeddings(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "matches": [],
        })))
        .expect(0)
        .mount(&server)
        .await;

    let workflow = workflow_for(&server, false);
    let kb = article::password_reset();
    let err = workflow
        .run(&kb, &article::VERIFICATION_QUERIES)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("upserting KB vector"));
}

#[tokio::test]
async fn keep_going_verifies_despite_failed_upsert() {
    let server = MockServer::start().await;
    mount_control_plane(&server).await;
    mount_embeddings(&server, 1 + article::VERIFICATION_QUERIES.len() as u64).await;

    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "matches": [],
        })))
        .expect(article::VERIFICATION_QUERIES.len() as u64)
        .mount(&server)
        .await;

    let workflow = workflow_for(&server, true);
    let kb = article::password_reset();
    let report = workflow
        .run(&kb, &article::VERIFICATION_QUERIES)
        .await
        .unwrap();

    assert!(!report.upsert_ok);
    assert!(
        report
            .reports
            .iter()
            .all(|r| r.outcome == Outcome::NoResults)
    );
    assert!(!report.succeeded());
}

#[tokio::test]
async fn missing_index_surfaces_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/indexes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "indexes": [{"name": "some-other-index", "host": "other.svc.example.io"}],
        })))
        .mount(&server)
        .await;

    let workflow = workflow_for(&server, false);
    let kb = article::password_reset();
    let err = workflow
        .run(&kb, &article::VERIFICATION_QUERIES)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("support-chatbot"));
}
