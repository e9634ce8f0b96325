use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::process::Output;
use tokio::net::TcpListener;
use tokio::process::Command;

#[derive(Debug, Deserialize)]
struct PageQuery {
    cursor: Option<String>,
}

/// Starts a mock API; `build` receives the server's base URL so pages can link to each other.
async fn spawn_api(build: impl FnOnce(String) -> Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let router = build(base.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base
}

async fn run_report(base: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_top-workplaces"))
        .env("API_BASE_URL", base)
        .env("RUST_LOG", "top_workplaces=debug")
        .env_remove("REQUEST_TIMEOUT_SECS")
        .env_remove("LOG_FORMAT")
        .output()
        .await
        .unwrap()
}

fn shift(id: i64, workplace_id: i64, worker_id: Option<i64>, cancelled_at: Option<&str>) -> Value {
    json!({
        "id": id,
        "workplaceId": workplace_id,
        "workerId": worker_id,
        "cancelledAt": cancelled_at,
        "startAt": "1999-12-31T16:00:00Z",
        "endAt": "2000-01-01T00:00:00Z",
    })
}

fn paged_workplaces(base: String) -> Router {
    Router::new().route(
        "/workplaces",
        get(move |Query(q): Query<PageQuery>| {
            let base = base.clone();
            async move {
                match q.cursor.as_deref() {
                    None => Json(json!({
                        "data": [
                            { "id": 1, "name": "A", "status": 0 },
                            { "id": 2, "name": "B", "status": 0 },
                        ],
                        "links": { "next": format!("{}/workplaces?cursor=2", base) },
                    })),
                    Some(_) => Json(json!({
                        "data": [{ "id": 3, "name": "C", "status": 1 }],
                        "links": { "next": null },
                    })),
                }
            }
        }),
    )
}

fn shifts_page_one() -> Vec<Value> {
    let mut shifts: Vec<Value> = (1..=5).map(|id| shift(id, 1, Some(10), None)).collect();
    shifts.push(shift(6, 1, None, None));
    shifts.push(shift(7, 1, Some(11), Some("1999-12-01T00:00:00Z")));
    shifts
}

fn shifts_page_two() -> Vec<Value> {
    vec![
        shift(8, 2, Some(12), None),
        shift(9, 2, Some(13), None),
        shift(10, 3, Some(14), None),
    ]
}

#[tokio::test]
async fn test_prints_top_active_workplaces() {
    let base = spawn_api(|base| {
        let shifts_base = base.clone();
        paged_workplaces(base).route(
            "/shifts",
            get(move |Query(q): Query<PageQuery>| {
                let base = shifts_base.clone();
                async move {
                    match q.cursor.as_deref() {
                        None => Json(json!({
                            "data": shifts_page_one(),
                            "links": { "next": format!("{}/shifts?cursor=2", base) },
                        })),
                        Some(_) => Json(json!({
                            "data": shifts_page_two(),
                            "links": { "next": null },
                        })),
                    }
                }
            }),
        )
    })
    .await;

    let output = run_report(&base).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let report: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        report,
        json!([{ "name": "A", "shifts": 5 }, { "name": "B", "shifts": 2 }])
    );
    assert!(stdout.contains("\n  {"), "report should be pretty-printed: {}", stdout);
}

#[tokio::test]
async fn test_prints_empty_array_when_nothing_completed() {
    let base = spawn_api(|base| {
        paged_workplaces(base).route(
            "/shifts",
            get(|| async {
                Json(json!({
                    "data": [shift(1, 1, None, None)],
                    "links": { "next": null },
                }))
            }),
        )
    })
    .await;

    let output = run_report(&base).await;

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report, json!([]));
}

#[tokio::test]
async fn test_server_error_on_shifts_exits_without_output() {
    let base = spawn_api(|base| {
        paged_workplaces(base).route(
            "/shifts",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
    })
    .await;

    let output = run_report(&base).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[tokio::test]
async fn test_invalid_json_body_exits_without_output() {
    let base = spawn_api(|_| {
        Router::new()
            .route("/workplaces", get(|| async { "<html>maintenance</html>" }))
            .route(
                "/shifts",
                get(|| async { Json(json!({ "data": [], "links": { "next": null } })) }),
            )
    })
    .await;

    let output = run_report(&base).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_unreachable_api_exits_without_output() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let output = run_report(&base).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_invalid_base_url_exits_without_output() {
    let output = run_report("not a url").await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
