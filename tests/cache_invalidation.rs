mod common;

use anyhow::Result;
use schooldesk::features::{
    common::Gender,
    students::{NewStudent, StudentsScreen, client::GetStudent, delete_student, get_student},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

fn student(id: &str, name: &str) -> serde_json::Value {
    json!({"_id": id, "user_id": {"_id": format!("u-{id}"), "name": name}, "class": 5})
}

#[tokio::test]
async fn create_refetches_subscribed_list() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in(&server)?;

    Mock::given(method("GET"))
        .and(path("/api/v1/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [student("s1", "Asha")]})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [student("s1", "Asha"), student("s2", "Ravi")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/students"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": student("s2", "Ravi")})))
        .expect(1)
        .mount(&server)
        .await;

    let screen = StudentsScreen::new(ctx.api().clone());
    screen.mount();
    assert_eq!(screen.list().await?.len(), 1);

    let notice = screen
        .add(&NewStudent {
            name: "Ravi".to_string(),
            dob: "2013-06-02".to_string(),
            address: "2 Lake View".to_string(),
            ..NewStudent::default()
        })
        .await;
    assert_eq!(notice.map(|n| n.message), Some("Student added successfully".to_string()));

    let cached = screen.cached().unwrap_or_default();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[1].name(), "Ravi");
    Ok(())
}

#[tokio::test]
async fn create_refetches_filtered_list() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in(&server)?;

    Mock::given(method("GET"))
        .and(path("/api/v1/students"))
        .and(query_param_is_missing("gender"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [student("s1", "Asha"), student("s2", "Ravi")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students"))
        .and(query_param("gender", "female"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [student("s1", "Asha")]})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/students"))
        .and(query_param("gender", "female"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [student("s1", "Asha"), student("s3", "Meera")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/students"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": student("s3", "Meera")})))
        .expect(1)
        .mount(&server)
        .await;

    let screen = StudentsScreen::new(ctx.api().clone());
    screen.mount();
    assert_eq!(screen.list().await?.len(), 2);

    screen.set_gender(Some("female"));
    assert!(screen.is_mounted());
    assert_eq!(screen.list().await?.len(), 1);

    let notice = screen
        .add(&NewStudent {
            name: "Meera".to_string(),
            gender: Some(Gender::Female),
            dob: "2013-01-09".to_string(),
            address: "9 Hill Road".to_string(),
            ..NewStudent::default()
        })
        .await;
    assert_eq!(notice.map(|n| n.message), Some("Student added successfully".to_string()));

    let cached = screen.cached().unwrap_or_default();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[1].name(), "Meera");
    Ok(())
}

#[tokio::test]
async fn delete_drops_unsubscribed_detail() -> Result<()> {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in(&server)?;

    Mock::given(method("GET"))
        .and(path("/api/v1/students/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": student("s1", "Asha")})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/students/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Student deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(get_student(ctx.api(), "s1").await?.is_some());
    let detail = GetStudent { id: "s1".to_string() };
    assert!(ctx.api().cached(&detail).is_some());

    delete_student(ctx.api(), "s1").await?;
    assert!(ctx.api().cached(&detail).is_none());
    Ok(())
}
