use lexis::model::{ErrorKind, Outcome, TranslationRecord};
use lexis::{Config, HttpTransport, RequestDispatcher};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves one canned response and hands back the raw request head.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    serve_raw(response).await
}

/// Writes `response` verbatim, then closes the connection.
async fn serve_raw(response: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
    });

    (format!("http://{}/api/v1", addr), rx)
}

fn dispatcher(base: &str) -> Arc<RequestDispatcher> {
    let config = Config::new(base, "my-id", "my-key").expect("config");
    // bypass any proxy configured in the environment
    let client = reqwest::Client::builder().no_proxy().build().expect("client");
    RequestDispatcher::new(config, Arc::new(HttpTransport::with_client(client)))
}

#[tokio::test]
async fn fetches_and_flattens_over_http() {
    let body = r#"{"results":[{"lexicalEntries":[{"entries":[{"senses":[{"translations":[{"language":"es","text":"casa"},{"language":"es","text":"hogar"}]}]}]}]}]}"#;
    let (base, request_head) = serve_once("200 OK", body).await;

    let outcome = dispatcher(&base).dispatch("house", "en", "es").recv().await;
    assert_eq!(
        outcome,
        Outcome::Success(vec![
            TranslationRecord::new("es", "casa"),
            TranslationRecord::new("es", "hogar"),
        ])
    );

    let head = request_head.await.expect("request head").to_lowercase();
    assert!(head.starts_with("get /api/v1/entries/en/house/translations=es http/1.1"));
    assert!(head.contains("app_id: my-id"));
    assert!(head.contains("app_key: my-key"));
}

#[tokio::test]
async fn non_success_status_is_a_transport_failure() {
    let (base, _head) = serve_once("404 Not Found", r#"{"error":"No entry found"}"#).await;

    match dispatcher(&base).dispatch("zzzz", "en", "es").recv().await {
        Outcome::Failure(detail) => {
            assert_eq!(detail.kind, ErrorKind::TransportError);
            assert!(detail.message.contains("404"));
            assert!(detail.message.contains("No entry found"));
        }
        other => panic!("expected transport failure, got {:?}", other),
    }
}

#[tokio::test]
async fn html_body_on_success_is_a_parse_failure() {
    let (base, _head) = serve_once("200 OK", "<html>maintenance</html>").await;

    match dispatcher(&base).dispatch("house", "en", "es").recv().await {
        Outcome::Failure(detail) => assert_eq!(detail.kind, ErrorKind::ParseError),
        other => panic!("expected parse failure, got {:?}", other),
    }
}

#[tokio::test]
async fn refused_connection_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let outcome = dispatcher(&format!("http://{}/api/v1", addr))
        .dispatch("house", "en", "es")
        .recv()
        .await;
    assert!(matches!(outcome, Outcome::Failure(ref d) if d.kind == ErrorKind::TransportError));
}

#[tokio::test]
async fn error_status_survives_a_truncated_body() {
    // announces 100 bytes, sends 9, then hangs up
    let response = "HTTP/1.1 500 Internal Server Error\r\nContent-Type: application/json\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{\"error\":"
        .to_string();
    let (base, _head) = serve_raw(response).await;

    match dispatcher(&base).dispatch("house", "en", "es").recv().await {
        Outcome::Failure(detail) => {
            assert_eq!(detail.kind, ErrorKind::TransportError);
            assert!(detail.message.starts_with("Status 500"), "got {}", detail.message);
        }
        other => panic!("expected transport failure, got {:?}", other),
    }
}
