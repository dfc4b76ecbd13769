mod common;

use anyhow::Result;
use schooldesk::{
    api::ApiError,
    features::subjects::list_subjects,
    guard::LOGIN_PATH,
    session::Storage,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn bearer_is_attached() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in(&server)?;

    Mock::given(method("GET"))
        .and(path("/api/v1/subjects"))
        .and(header("authorization", format!("Bearer {}", common::TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "sub1", "name": "Algebra"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let subjects = list_subjects(ctx.api()).await?;
    assert_eq!(subjects.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unauthorized_clears_session() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, storage) = common::signed_in(&server)?;
    ctx.visit("/dashboard/academics");

    Mock::given(method("GET"))
        .and(path("/api/v1/subjects"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = list_subjects(ctx.api()).await.err();
    assert!(matches!(err, Some(ApiError::Http { status: 401, .. })));
    assert!(!ctx.session().is_authenticated());
    assert_eq!(ctx.navigator().location(), LOGIN_PATH);
    assert_eq!(storage.get(ctx.session().cookie().name)?, None);
    Ok(())
}
