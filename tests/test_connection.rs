//! Connection state machine tests over in-memory duplex streams.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use filament::config::FilesConfig;
use filament::files::handler::StaticFileHandler;
use filament::http::connection::Connection;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn test_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "filament-connection-{}-{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Drives one connection: writes the request in the given chunks, then
/// returns every byte the server sent back.
async fn exchange(root: PathBuf, chunks: Vec<Vec<u8>>) -> Vec<u8> {
    let handler = Arc::new(StaticFileHandler::new(FilesConfig { root }));
    let (mut client, server) = tokio::io::duplex(256);

    let server_task = tokio::spawn(async move {
        let mut conn = Connection::new(server, handler, None);
        let _ = conn.run().await;
    });

    for chunk in chunks {
        // The server may stop reading and respond early (oversized or
        // malformed input), which fails the remaining writes
        if client.write_all(&chunk).await.is_err() {
            break;
        }
    }
    let _ = client.shutdown().await;

    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    server_task.await.unwrap();

    response
}

/// Splits a response into (head, body) at the header terminator. The head
/// keeps the final header's CRLF so every header line can be matched as
/// `"Name: value\r\n"`.
fn split_response(bytes: &[u8]) -> (String, Vec<u8>) {
    let pos = bytes
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header terminator in response");
    (
        String::from_utf8(bytes[..pos + 2].to_vec()).unwrap(),
        bytes[pos + 4..].to_vec(),
    )
}

#[tokio::test]
async fn test_serves_file_over_connection() {
    let root = test_root("serves");
    std::fs::write(root.join("index.html"), b"<h1>hi</h1>").unwrap();

    let response = exchange(
        root.clone(),
        vec![b"GET /index.html HTTP/1.1\r\nHost: x\r\n\r\n".to_vec()],
    )
    .await;

    let (head, body) = split_response(&response);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("Content-Length: 11\r\n"));
    assert!(head.contains("Content-Type: text/html\r\n"));
    assert!(head.contains("Connection: close\r\n"));
    assert_eq!(body, b"<h1>hi</h1>".to_vec());

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_missing_file_gets_bare_404() {
    let root = test_root("missing");

    let response = exchange(
        root.clone(),
        vec![b"GET /missing.txt HTTP/1.1\r\n\r\n".to_vec()],
    )
    .await;

    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_framing_is_chunk_size_independent() {
    let root = test_root("chunks");
    let request = b"GET /missing.txt HTTP/1.1\r\nHost: example.com\r\n\r\n";

    // Whole request at once
    let whole = exchange(root.clone(), vec![request.to_vec()]).await;

    // One byte at a time
    let tiny_chunks: Vec<Vec<u8>> = request.iter().map(|b| vec![*b]).collect();
    let drip = exchange(root.clone(), tiny_chunks).await;

    // Split right inside the terminator
    let split_at = request.len() - 2;
    let straddling = exchange(
        root.clone(),
        vec![request[..split_at].to_vec(), request[split_at..].to_vec()],
    )
    .await;

    assert_eq!(whole, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
    assert_eq!(drip, whole);
    assert_eq!(straddling, whole);

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_chunked_delivery_of_200_response() {
    let root = test_root("chunks-200");
    std::fs::write(root.join("page.html"), b"<p>ok</p>").unwrap();
    let request = b"GET /page.html HTTP/1.1\r\n\r\n";

    let whole = exchange(root.clone(), vec![request.to_vec()]).await;
    let tiny_chunks: Vec<Vec<u8>> = request.iter().map(|b| vec![*b]).collect();
    let drip = exchange(root.clone(), tiny_chunks).await;

    let (whole_head, whole_body) = split_response(&whole);
    let (drip_head, drip_body) = split_response(&drip);

    // The Date header may tick between runs; everything else must agree
    assert_eq!(whole_body, b"<p>ok</p>".to_vec());
    assert_eq!(drip_body, whole_body);
    assert!(whole_head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(drip_head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(whole_head.contains("Content-Length: 9\r\n"));
    assert!(drip_head.contains("Content-Length: 9\r\n"));

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_malformed_request_line_gets_400() {
    let root = test_root("malformed");

    let response = exchange(
        root.clone(),
        vec![b"GET /index.html\r\n\r\n".to_vec()],
    )
    .await;

    assert_eq!(response, b"HTTP/1.1 400 Bad Request\r\n\r\n".to_vec());

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_unknown_method_gets_400() {
    let root = test_root("unknown-method");

    let response = exchange(
        root.clone(),
        vec![b"BREW /coffee HTTP/1.1\r\n\r\n".to_vec()],
    )
    .await;

    assert_eq!(response, b"HTTP/1.1 400 Bad Request\r\n\r\n".to_vec());

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_partial_request_then_eof_gets_400() {
    let root = test_root("partial");

    // Peer closes before ever sending the header terminator
    let response = exchange(root.clone(), vec![b"GET /inde".to_vec()]).await;

    assert_eq!(response, b"HTTP/1.1 400 Bad Request\r\n\r\n".to_vec());

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_immediate_eof_closes_silently() {
    let root = test_root("eof");

    let response = exchange(root.clone(), vec![]).await;

    assert!(response.is_empty());

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_oversized_headers_get_400() {
    let root = test_root("oversized");

    // A single header growing past the 64 KiB cap, never terminated
    let mut request = b"GET / HTTP/1.1\r\nX-Filler: ".to_vec();
    request.extend(std::iter::repeat(b'a').take(70 * 1024));

    let response = exchange(root.clone(), vec![request]).await;

    assert_eq!(response, b"HTTP/1.1 400 Bad Request\r\n\r\n".to_vec());

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_read_timeout_aborts_connection() {
    let root = test_root("timeout");
    let handler = Arc::new(StaticFileHandler::new(FilesConfig { root: root.clone() }));
    let (client, server) = tokio::io::duplex(256);

    let mut conn = Connection::new(server, handler, Some(Duration::from_millis(50)));
    let result = conn.run().await;

    assert!(result.is_err());
    drop(client);

    std::fs::remove_dir_all(&root).unwrap();
}
