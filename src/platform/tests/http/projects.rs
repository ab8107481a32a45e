use std::fs;

use platform::projects::Project;
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

use crate::assert_response_status_eq;
use crate::run_http_service;

async fn status_and_body(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let body = resp.json::<Value>().await.unwrap();
    (status, body)
}

async fn create(cl: &Client, base_url: &str, name: &str) -> Project {
    let resp = cl
        .post(format!("{base_url}/api/projects"))
        .json(&json!({"name": name, "link": format!("https://{name}.example.com")}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

async fn list(cl: &Client, base_url: &str) -> Vec<Project> {
    let resp = cl
        .get(format!("{base_url}/api/projects"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_create_and_list() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();

    assert!(list(&cl, &svc.base_url).await.is_empty());

    let a = create(&cl, &svc.base_url, "a").await;
    assert_eq!(a.name, "a");
    assert_eq!(a.link, "https://a.example.com");
    assert!(!a.favorite);
    assert_eq!(a.updated, None);

    let b = create(&cl, &svc.base_url, "b").await;
    assert!(b.id > a.id);

    assert_eq!(list(&cl, &svc.base_url).await, vec![a, b]);

    let resp = cl
        .get(format!("{}/api/projects", svc.base_url))
        .send()
        .await
        .unwrap();
    let (_, body) = status_and_body(resp).await;
    assert!(body[0].get("updated").is_none());
    assert_eq!(body[0]["favorite"], json!(false));
}

#[tokio::test]
async fn test_create_requires_name_and_link() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();
    let a = create(&cl, &svc.base_url, "a").await;
    let before = fs::read_to_string(&svc.data_path).unwrap();

    for req in [
        json!({"name": "", "link": "https://x.example.com"}),
        json!({"name": "x", "link": ""}),
        json!({"name": "x"}),
        json!({}),
    ] {
        let resp = cl
            .post(format!("{}/api/projects", svc.base_url))
            .json(&req)
            .send()
            .await
            .unwrap();
        let (status, body) = status_and_body(resp).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Name and link are required"}));
    }

    assert_eq!(list(&cl, &svc.base_url).await, vec![a]);
    assert_eq!(fs::read_to_string(&svc.data_path).unwrap(), before);
}

#[tokio::test]
async fn test_malformed_body() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();

    let resp = cl
        .post(format!("{}/api/projects", svc.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    let (status, body) = status_and_body(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();
    let a = create(&cl, &svc.base_url, "a").await;

    let resp = cl
        .put(format!("{}/api/projects/{}", svc.base_url, a.id))
        .json(&json!({"name": "a2", "link": "https://a2.example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Project = resp.json().await.unwrap();
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.name, "a2");
    assert_eq!(updated.link, "https://a2.example.com");
    assert_eq!(updated.created, a.created);
    assert!(updated.updated.is_some());

    let resp = cl
        .put(format!("{}/api/projects/{}", svc.base_url, a.id))
        .json(&json!({"name": "a3", "link": ""}))
        .send()
        .await
        .unwrap();
    assert_response_status_eq!(resp, StatusCode::BAD_REQUEST);

    assert_eq!(list(&cl, &svc.base_url).await, vec![updated]);
}

#[tokio::test]
async fn test_unknown_id() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();
    let a = create(&cl, &svc.base_url, "a").await;
    let unknown = a.id + 1;

    let resp = cl
        .put(format!("{}/api/projects/{unknown}", svc.base_url))
        .json(&json!({"name": "x", "link": "y"}))
        .send()
        .await
        .unwrap();
    let (status, body) = status_and_body(resp).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Project not found"}));

    let resp = cl
        .patch(format!("{}/api/projects/{unknown}/favorite", svc.base_url))
        .send()
        .await
        .unwrap();
    assert_response_status_eq!(resp, StatusCode::NOT_FOUND);

    let resp = cl
        .get(format!("{}/api/projects/{unknown}", svc.base_url))
        .send()
        .await
        .unwrap();
    assert_response_status_eq!(resp, StatusCode::NOT_FOUND);

    let resp = cl
        .get(format!("{}/api/projects/not-a-number", svc.base_url))
        .send()
        .await
        .unwrap();
    let (status, body) = status_and_body(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert_eq!(list(&cl, &svc.base_url).await, vec![a]);
}

#[tokio::test]
async fn test_toggle_favorite() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();
    let a = create(&cl, &svc.base_url, "a").await;

    let url = format!("{}/api/projects/{}/favorite", svc.base_url, a.id);
    let resp = cl.patch(&url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fav: Project = resp.json().await.unwrap();
    assert!(fav.favorite);

    let resp = cl.patch(&url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fav: Project = resp.json().await.unwrap();
    assert!(!fav.favorite);
    assert_eq!(fav, a);
}

#[tokio::test]
async fn test_delete() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();
    let a = create(&cl, &svc.base_url, "a").await;
    let b = create(&cl, &svc.base_url, "b").await;

    for _ in 0..2 {
        let resp = cl
            .delete(format!("{}/api/projects/{}", svc.base_url, a.id))
            .send()
            .await
            .unwrap();
        let (status, body) = status_and_body(resp).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
        assert_eq!(list(&cl, &svc.base_url).await, vec![b.clone()]);
    }
}

#[tokio::test]
async fn test_reorder() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();
    let a = create(&cl, &svc.base_url, "a").await;
    let b = create(&cl, &svc.base_url, "b").await;

    let resp = cl
        .put(format!("{}/api/projects/reorder", svc.base_url))
        .json(&vec![b.clone(), a.clone()])
        .send()
        .await
        .unwrap();
    let (status, body) = status_and_body(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    assert_eq!(list(&cl, &svc.base_url).await, vec![b.clone(), a.clone()]);

    let resp = cl
        .put(format!("{}/api/projects/reorder", svc.base_url))
        .json(&vec![b.clone()])
        .send()
        .await
        .unwrap();
    assert_response_status_eq!(resp, StatusCode::BAD_REQUEST);

    let resp = cl
        .put(format!("{}/api/projects/reorder", svc.base_url))
        .json(&json!([{"name": "no id"}]))
        .send()
        .await
        .unwrap();
    assert_response_status_eq!(resp, StatusCode::BAD_REQUEST);

    assert_eq!(list(&cl, &svc.base_url).await, vec![b, a]);
}

#[tokio::test]
async fn test_reorder_ignores_edited_fields() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();
    let a = create(&cl, &svc.base_url, "a").await;
    let b = create(&cl, &svc.base_url, "b").await;

    let resp = cl
        .put(format!("{}/api/projects/reorder", svc.base_url))
        .json(&json!([
            {"id": b.id, "name": "", "link": "", "favorite": true, "created": "1970-01-01T00:00:00.000Z"},
            {"id": a.id, "name": "renamed", "link": "https://evil.example.com", "created": "1970-01-01T00:00:00.000Z", "updated": "1970-01-01T00:00:00.000Z"},
        ]))
        .send()
        .await
        .unwrap();
    assert_response_status_eq!(resp, StatusCode::OK);

    assert_eq!(list(&cl, &svc.base_url).await, vec![b, a]);
}

#[tokio::test]
async fn test_timestamps_have_millis() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();
    create(&cl, &svc.base_url, "a").await;

    let resp = cl
        .get(format!("{}/api/projects", svc.base_url))
        .send()
        .await
        .unwrap();
    let (_, body) = status_and_body(resp).await;
    let created = body[0]["created"].as_str().unwrap();
    // 2023-11-14T22:13:20.000Z
    assert_eq!(created.len(), 24);
    assert_eq!(&created[19..20], ".");
    assert!(created.ends_with('Z'));
}

#[tokio::test]
async fn test_static_assets() {
    let svc = run_http_service().await.unwrap();
    let cl = Client::new();

    let resp = cl
        .get(format!("{}/index.html", svc.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "<html>projects</html>");

    let resp = cl
        .get(format!("{}/missing.html", svc.base_url))
        .send()
        .await
        .unwrap();
    assert_response_status_eq!(resp, StatusCode::NOT_FOUND);
}
