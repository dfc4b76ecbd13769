mod common;

use anyhow::Result;
use schooldesk::features::subjects::SubjectForm;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

#[tokio::test]
async fn submit_trims_and_clears() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in(&server)?;

    Mock::given(method("POST"))
        .and(path("/api/v1/subjects/create"))
        .and(body_partial_json(json!({"subject": {"name": "Algebra"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"_id": "sub1", "name": "Algebra"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = SubjectForm::new();
    form.set_name("  Algebra  ");
    let notice = form.submit(ctx.api()).await;

    assert!(notice.as_ref().is_some_and(|notice| notice.is_success()));
    assert_eq!(notice.map(|notice| notice.message), Some("Subject added".to_string()));
    assert!(form.name.is_empty());
    Ok(())
}

#[tokio::test]
async fn blank_name_sends_nothing() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in(&server)?;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = SubjectForm::new();
    form.set_name("   ");
    assert!(form.submit(ctx.api()).await.is_none());
    Ok(())
}

#[tokio::test]
async fn server_message_is_shown() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in(&server)?;

    Mock::given(method("POST"))
        .and(path("/api/v1/subjects/create"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "Subject already exists"})))
        .mount(&server)
        .await;

    let mut form = SubjectForm::new();
    form.set_name("Algebra");
    let notice = form.submit(ctx.api()).await;

    assert_eq!(
        notice.map(|notice| notice.message),
        Some("Subject already exists".to_string())
    );
    assert_eq!(form.name, "Algebra");
    Ok(())
}
