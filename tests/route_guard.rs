mod common;

use anyhow::Result;
use schooldesk::{
    cli::actions::{navigation, settings},
    guard::{LOGIN_PATH, RouteDecision},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn signed_out_profile_visit_sends_nothing() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, _) = common::context(&server)?;

    Mock::given(method("GET"))
        .and(path("/api/v1/getProfileDetails"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = settings::execute(&ctx, settings::Command::ShowProfile).await;
    assert!(result.is_err());
    assert_eq!(ctx.navigator().location(), LOGIN_PATH);
    Ok(())
}

#[tokio::test]
async fn signed_in_login_goes_home() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in(&server)?;

    assert_eq!(
        ctx.visit("/auth/login"),
        RouteDecision::Redirect("/dashboard/home")
    );
    assert_eq!(ctx.visit("/dashboard/students"), RouteDecision::Proceed);

    navigation::execute(&ctx, navigation::Command::Route("/".to_string())).await?;
    assert_eq!(ctx.navigator().location(), LOGIN_PATH);
    Ok(())
}
