use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

pub const ADMIN_USERNAME: &str = "registrar";
pub const ADMIN_PASSWORD: &str = "registrar-test-password";
pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub base_url: String,
    child: Child,
    // Held so the per-server upload dir outlives the process
    _upload_dir: tempfile::TempDir,
}

impl TestServer {
    /// Spawn a fresh server on an unused port with its own upload dir.
    /// Each test gets its own process so the in-memory store is isolated.
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let upload_dir = tempfile::tempdir().context("failed to create upload dir")?;

        // Run the already-built binary to keep start fast during tests
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_clearance-api"));
        cmd.env("CLEARANCE_PORT", port.to_string())
            .env("JWT_SECRET", JWT_SECRET)
            .env("CLEARANCE_ADMIN_USERNAME", ADMIN_USERNAME)
            .env("CLEARANCE_ADMIN_PASSWORD", ADMIN_PASSWORD)
            .env("UPLOAD_DIR", upload_dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            base_url,
            child,
            _upload_dir: upload_dir,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in and return the Bearer token for the given credentials.
    pub async fn login(&self, client: &reqwest::Client, username: &str, password: &str) -> Result<String> {
        let res = client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: serde_json::Value = res.json().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("token missing from login response")
    }

    pub async fn admin_token(&self, client: &reqwest::Client) -> Result<String> {
        self.login(client, ADMIN_USERNAME, ADMIN_PASSWORD).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Register a student over the API and return the created record.
pub async fn register_student(
    server: &TestServer,
    client: &reqwest::Client,
    student_number: &str,
    year: i32,
    major: Option<&str>,
) -> Result<serde_json::Value> {
    let res = client
        .post(server.url("/auth/register"))
        .json(&serde_json::json!({
            "student_number": student_number,
            "name": format!("Student {}", student_number),
            "course": "IT",
            "year": year,
            "major": major,
            "section": "A",
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "registration failed: {}",
        res.status()
    );
    let body: serde_json::Value = res.json().await?;
    Ok(body["data"].clone())
}

/// Add a requirement as admin and return its id.
pub async fn add_requirement(
    server: &TestServer,
    client: &reqwest::Client,
    token: &str,
    name: &str,
) -> Result<String> {
    let res = client
        .post(server.url("/api/requirements"))
        .bearer_auth(token)
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "add requirement failed: {}",
        res.status()
    );
    let body: serde_json::Value = res.json().await?;
    body["data"]["id"]
        .as_str()
        .map(str::to_string)
        .context("requirement id missing")
}

/// Flip one completion flag as admin.
pub async fn set_completion(
    server: &TestServer,
    client: &reqwest::Client,
    token: &str,
    student_id: &str,
    requirement_id: &str,
    completed: bool,
) -> Result<()> {
    let res = client
        .put(server.url(&format!(
            "/api/students/{}/completions/{}",
            student_id, requirement_id
        )))
        .bearer_auth(token)
        .json(&serde_json::json!({ "completed": completed }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "set completion failed: {}",
        res.status()
    );
    Ok(())
}
