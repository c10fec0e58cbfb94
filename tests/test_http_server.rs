//! End-to-end tests against the compiled binary.

mod common;

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use common::{arg, folio_bin, run_folio};

/// A running `folio serve` process on an ephemeral port.
struct FolioServer {
    child: tokio::process::Child,
    base_url: String,
    client: reqwest::Client,
}

impl FolioServer {
    /// Spawns the server and reads stderr until the "HTTP server listening"
    /// line to discover the port.
    async fn start(content: &Path, uploads: &Path, events: &Path) -> Self {
        let mut child = Command::new(folio_bin())
            .args([
                "serve",
                "--bind",
                "127.0.0.1:0",
                "--content",
                arg(content),
                "--uploads",
                arg(uploads),
                "--events-file",
                arg(events),
                "--admin-username",
                "owner",
                "--admin-password",
                "s3cret",
                "--color",
                "never",
                "-v",
            ])
            .env_remove("FOLIO_CONFIG")
            .env_remove("FOLIO_LOG")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn folio");

        let stderr = child.stderr.take().expect("stderr not captured");
        let mut reader = BufReader::new(stderr);
        let mut line = String::new();
        let mut port: Option<u16> = None;

        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
        while tokio::time::Instant::now() < deadline {
            line.clear();
            let read = tokio::time::timeout(Duration::from_secs(5), reader.read_line(&mut line))
                .await
                .expect("timed out waiting for server startup")
                .expect("failed to read stderr");
            assert!(read > 0, "server exited before printing listening address");

            if line.contains("HTTP server listening") {
                if let Some(start) = line.find("127.0.0.1:") {
                    let digits: String = line[start + "127.0.0.1:".len()..]
                        .chars()
                        .take_while(char::is_ascii_digit)
                        .collect();
                    port = digits.parse().ok();
                }
                break;
            }
        }

        // Keep draining stderr so the child never blocks on a full pipe.
        tokio::spawn(async move {
            let mut sink = String::new();
            while reader.read_line(&mut sink).await.unwrap_or(0) > 0 {
                sink.clear();
            }
        });

        let port = port.expect("failed to discover server port from stderr");
        Self {
            child,
            base_url: format!("http://127.0.0.1:{port}"),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn login(&self) -> String {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "username": "owner", "password": "s3cret" }))
            .send()
            .await
            .expect("login request");
        assert_eq!(response.status(), 200);
        let cookie = response
            .headers()
            .get("set-cookie")
            .expect("session cookie")
            .to_str()
            .unwrap();
        cookie.split(';').next().unwrap().to_string()
    }

    async fn shutdown(mut self) {
        let _ = self.child.kill().await;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn edit_flow_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content.json");
    let uploads = dir.path().join("uploads");
    let events = dir.path().join("events.jsonl");
    assert!(run_folio(&["init", "--content", arg(&content)]).status.success());

    let server = FolioServer::start(&content, &uploads, &events).await;

    // Anonymous write is refused.
    let response = server
        .client
        .put(server.url("/content/testimonials"))
        .json(&json!([]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let cookie = server.login().await;
    assert_eq!(cookie, "admin_session=true");

    let testimonials = json!([{ "quote": "Solid work", "name": "Ana", "title": "CTO" }]);
    let response = server
        .client
        .put(server.url("/content/testimonials"))
        .header("cookie", &cookie)
        .json(&testimonials)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let fetched: serde_json::Value = server
        .client
        .get(server.url("/content/testimonials"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, testimonials);

    // The change is on disk.
    let stored: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&content).unwrap()).unwrap();
    assert_eq!(stored["testimonials"], testimonials);

    server.shutdown().await;

    let log = std::fs::read_to_string(&events).unwrap();
    let kinds: Vec<String> = log
        .lines()
        .map(|l| {
            let v: serde_json::Value = serde_json::from_str(l).unwrap();
            v["type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds[0], "ServerStarted");
    assert!(kinds.contains(&"LoginSucceeded".to_string()));
    assert!(kinds.contains(&"SectionReplaced".to_string()));
    assert!(!log.contains("s3cret"));
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_pages_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content.json");
    assert!(run_folio(&["init", "--content", arg(&content)]).status.success());
    let server = FolioServer::start(
        &content,
        &dir.path().join("uploads"),
        &dir.path().join("events.jsonl"),
    )
    .await;

    let no_redirect = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let response = no_redirect
        .get(server.url("/admin/edit/hero"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers()["location"],
        "/admin/login?redirect=%2Fadmin%2Fedit%2Fhero"
    );

    let page = no_redirect
        .get(server.url("/admin/login"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("/auth/login"));

    server.shutdown().await;
}
