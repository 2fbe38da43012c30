use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use uuid::Uuid;

use server::startup;

struct TestApp {
    base_url: String,
    users_path: PathBuf,
    owns_file: bool,
    stop: Option<oneshot::Sender<()>>,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if self.owns_file {
            let _ = std::fs::remove_file(&self.users_path);
        }
    }
}

/// Start a server on an ephemeral port over `users_path`.
async fn start_server_at(users_path: PathBuf) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.users_path = users_path.clone();

    let app = startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let shutdown = async move { let _ = rx.await; };
        if let Err(e) = startup::serve(listener, app, shutdown).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, users_path, owns_file: true, stop: Some(tx) })
}

async fn start_server() -> anyhow::Result<TestApp> {
    let path = std::env::temp_dir()
        .join("user-store-e2e")
        .join(format!("{}.json", Uuid::new_v4()));
    start_server_at(path).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_fresh_start_seeds_file_and_serves_alice() -> anyhow::Result<()> {
    let app = start_server().await?;

    let on_disk: Value = serde_json::from_str(&tokio::fs::read_to_string(&app.users_path).await?)?;
    assert_eq!(on_disk, json!([{ "id": 1, "name": "Alice" }, { "id": 2, "name": "Bob" }]));

    let res = client().get(format!("{}/users/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json")));
    assert_eq!(res.json::<Value>().await?, json!({ "id": 1, "name": "Alice" }));
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_id_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for id in ["99", "0", "abc", "-1"] {
        let res = c.get(format!("{}/users/{}", app.base_url, id)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NOT_FOUND, "id {id}");
        assert_eq!(res.json::<Value>().await?, json!({ "detail": "User not found" }));
    }
    Ok(())
}

#[tokio::test]
async fn e2e_create_trims_and_is_readable() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/users", app.base_url))
        .json(&json!({ "name": "  Carol  " }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created, json!({ "id": 3, "name": "Carol" }));

    let res = c.get(format!("{}/users/3", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    // persisted pretty-printed with two-space indent
    let text = tokio::fs::read_to_string(&app.users_path).await?;
    assert!(text.contains("\n  {\n    \"id\": 3,\n    \"name\": \"Carol\"\n  }"));
    Ok(())
}

#[tokio::test]
async fn e2e_blank_or_missing_name_is_422() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let bodies = [
        json!({ "name": "   " }),
        json!({ "name": "" }),
        json!({}),
        json!({ "name": null }),
        json!({ "name": 42 }),
        json!({ "name": ["Carol"] }),
        json!(["Carol"]),
        json!("Carol"),
    ];
    for body in bodies {
        let res = c.post(format!("{}/users", app.base_url)).json(&body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY, "body {body}");
        assert_eq!(res.json::<Value>().await?, json!({ "detail": "name is required" }));
    }

    let list = c.get(format!("{}/users", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 2);
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_body_is_400() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/users", app.base_url))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"name\": ")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({ "detail": "invalid JSON body" }));
    Ok(())
}

#[tokio::test]
async fn e2e_list_keeps_insertion_order() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for name in ["Carol", "Dan"] {
        let res = c.post(format!("{}/users", app.base_url)).json(&json!({ "name": name })).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }
    let list = c.get(format!("{}/users", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(
        list,
        json!([
            { "id": 1, "name": "Alice" },
            { "id": 2, "name": "Bob" },
            { "id": 3, "name": "Carol" },
            { "id": 4, "name": "Dan" }
        ])
    );
    Ok(())
}

#[tokio::test]
async fn e2e_restart_reloads_created_users() -> anyhow::Result<()> {
    let path = std::env::temp_dir()
        .join("user-store-e2e")
        .join(format!("{}.json", Uuid::new_v4()));

    let mut first = start_server_at(path.clone()).await?;
    first.owns_file = false;
    let res = client()
        .post(format!("{}/users", first.base_url))
        .json(&json!({ "name": "Carol" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    drop(first);

    let second = start_server_at(path).await?;
    let res = client().get(format!("{}/users/3", second.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "id": 3, "name": "Carol" }));

    let next = client()
        .post(format!("{}/users", second.base_url))
        .json(&json!({ "name": "Dan" }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(next["id"], 4);
    Ok(())
}

#[tokio::test]
async fn e2e_corrupt_file_fails_startup() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join("user-store-e2e");
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join(format!("{}.json", Uuid::new_v4()));
    tokio::fs::write(&path, "not json at all").await?;

    let mut cfg = AppConfig::default();
    cfg.storage.users_path = path.clone();
    let res = startup::build_app(&cfg).await;
    assert!(matches!(res, Err(server::errors::StartupError::Storage(_))));

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}
