//! End-to-end: seed fetch into the app, then local edits and derived views.

use std::time::Duration;

use tasklist::{App, Draft, SeedLoader, StatusCounts, StatusFilter, TaskStatus};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::runtime::Handle;

async fn serve_todos(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept");
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("Failed to write");
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/todos")
}

async fn wait_for_seed(app: &mut App) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while app.is_loading() {
            app.tick();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("Seed fetch did not resolve");
}

#[tokio::test]
async fn test_seeded_app_supports_local_edits() {
    let url = serve_todos(
        r#"[{"id":1,"title":"A","completed":true},{"id":2,"title":"B","completed":null},{"id":3,"title":"C","completed":false}]"#,
    )
    .await;
    let seed = SeedLoader::new(url, 20, Duration::from_secs(5)).spawn(&Handle::current());
    let mut app = App::new(seed);

    wait_for_seed(&mut app).await;

    let statuses: Vec<_> = app.store().tasks().iter().map(|t| (t.id, t.status)).collect();
    assert_eq!(
        statuses,
        vec![(1, TaskStatus::Done), (2, TaskStatus::InProgress), (3, TaskStatus::ToDo)]
    );
    assert_eq!(app.counts(), StatusCounts { to_do: 1, in_progress: 1, done: 1 });

    app.store_mut().remove(3);
    let id = app
        .store_mut()
        .add(&mut Draft::new("D", "added locally", TaskStatus::ToDo))
        .expect("Valid draft should be added");
    assert_eq!(id, 4);

    let visible = tasklist::filtered_tasks(app.store().tasks(), "LOCALLY", StatusFilter::Only(TaskStatus::ToDo));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, 4);
}

#[tokio::test]
async fn test_unreachable_seed_leaves_empty_interactive_app() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    drop(listener);

    let seed = SeedLoader::new(format!("http://{addr}/todos"), 20, Duration::from_secs(2)).spawn(&Handle::current());
    let mut app = App::new(seed);

    wait_for_seed(&mut app).await;

    assert!(app.store().is_empty());
    assert!(app.visible_tasks().is_empty());
    assert!(app
        .store_mut()
        .add(&mut Draft::new("still", "works", TaskStatus::Done))
        .is_ok());
}
