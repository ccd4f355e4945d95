mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn export_contains_only_submitted_students() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await?;

    let submitted = common::register_student(&server, &client, "0221-1001", 3, Some("WMAD")).await?;
    common::register_student(&server, &client, "0222-1002", 2, None).await?;
    let submitted_id = submitted["id"].as_str().unwrap();

    let req_id = common::add_requirement(&server, &client, &token, "Library").await?;
    common::set_completion(&server, &client, &token, submitted_id, &req_id, true).await?;
    let res = client
        .post(server.url(&format!("/api/students/{}/clearance", submitted_id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(server.url("/api/clearances/export"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()?
        .starts_with("text/csv"));
    assert!(res
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()?
        .contains("attachment"));

    let csv = res.text().await?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2, "header plus one submitted row: {}", csv);
    assert!(lines[1].contains("0221-1001"));
    assert!(lines[1].contains("Library"));
    assert!(!csv.contains("0222-1002"));
    Ok(())
}

#[tokio::test]
async fn export_is_admin_only() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    common::register_student(&server, &client, "0221-1003", 1, None).await?;
    let student_token = server.login(&client, "0221-1003", "0221-1003").await?;

    let res = client
        .get(server.url("/api/clearances/export"))
        .bearer_auth(&student_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

// Smallest valid PNG header; enough for upload validation which checks the
// declared content type, not the image contents
fn png_bytes() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]
}

#[tokio::test]
async fn signature_upload_replace_and_fetch() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await?;

    // Nothing uploaded yet
    let body = client
        .get(server.url("/api/signature"))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert!(body["data"].is_null());
    let res = client
        .get(server.url("/api/signature/file"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Upload
    let form = reqwest::multipart::Form::new().part(
        "signature",
        reqwest::multipart::Part::bytes(png_bytes())
            .file_name("sig.png")
            .mime_str("image/png")?,
    );
    let res = client
        .post(server.url("/api/signature"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let first_file = body["data"]["file_name"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["content_type"], "image/png");

    // Bytes come back with the stored content type
    let res = client
        .get(server.url("/api/signature/file"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap().to_str()?,
        "image/png"
    );
    assert_eq!(res.bytes().await?.to_vec(), png_bytes());

    // A second upload replaces the reference
    let form = reqwest::multipart::Form::new().part(
        "signature",
        reqwest::multipart::Part::bytes(png_bytes())
            .file_name("sig2.png")
            .mime_str("image/png")?,
    );
    let res = client
        .post(server.url("/api/signature"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_ne!(body["data"]["file_name"].as_str().unwrap(), first_file);
    Ok(())
}

#[tokio::test]
async fn signature_upload_rejects_bad_payloads() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await?;

    // Wrong content type
    let form = reqwest::multipart::Form::new().part(
        "signature",
        reqwest::multipart::Part::bytes(b"%PDF-1.4".to_vec())
            .file_name("sig.pdf")
            .mime_str("application/pdf")?,
    );
    let res = client
        .post(server.url("/api/signature"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Empty payload
    let form = reqwest::multipart::Form::new().part(
        "signature",
        reqwest::multipart::Part::bytes(Vec::new())
            .file_name("sig.png")
            .mime_str("image/png")?,
    );
    let res = client
        .post(server.url("/api/signature"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
