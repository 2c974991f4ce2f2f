use anyhow::anyhow;
use std::error::Error as StdError;
use std::io::ErrorKind;

/// Walks the source chain looking for either a matching io error kind or a
/// matching phrase. reqwest wraps hyper wraps io, and the layer carrying the
/// useful detail varies between platforms.
fn error_chain_matches(err: &(dyn StdError + 'static), kind: ErrorKind, needle: &str) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == kind
        {
            return true;
        }

        if source.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }

        current = source.source();
    }

    false
}

fn is_timeout(err: &reqwest::Error) -> bool {
    err.is_timeout() || error_chain_matches(err, ErrorKind::TimedOut, "timed out")
}

fn is_connection_refused(err: &reqwest::Error) -> bool {
    error_chain_matches(err, ErrorKind::ConnectionRefused, "connection refused")
}

/// Maps a failed completion call to a one-line diagnostic that names the flag
/// the user can act on.
pub(crate) fn completion_request_error(
    err: reqwest::Error,
    api_url: &str,
    timeout_secs: u64,
) -> anyhow::Error {
    if is_timeout(&err) {
        return anyhow!(
            "Network error: request timed out after {}s while calling '{}'. \
             Raise --timeout or check endpoint responsiveness.",
            timeout_secs,
            api_url
        );
    }

    if err.is_connect() {
        if is_connection_refused(&err) {
            return anyhow!(
                "Network error: connection refused at '{}'. \
                 Ensure the endpoint is reachable and --base-url is correct.",
                api_url
            );
        }

        return anyhow!(
            "Network error: failed to connect to '{}'. \
             Check --base-url and network connectivity.",
            api_url
        );
    }

    anyhow!("Network error: failed to call '{}': {}", api_url, err)
}

#[cfg(test)]
mod tests {
    use super::{completion_request_error, error_chain_matches};
    use reqwest::Client;
    use std::io::ErrorKind;
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    fn free_local_addr() -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
        let addr = listener.local_addr().expect("address should be available");
        drop(listener);
        addr
    }

    #[tokio::test]
    async fn maps_connection_refused_to_actionable_message() {
        let addr = free_local_addr();
        let api_url = format!("http://{}/messages", addr);
        let client = Client::builder()
            .timeout(Duration::from_millis(300))
            .build()
            .expect("client should build");

        let req_err = client
            .post(&api_url)
            .send()
            .await
            .expect_err("request should fail with connection-refused");
        let mapped = completion_request_error(req_err, &api_url, 1);
        let msg = format!("{mapped:#}");

        assert!(
            msg.contains("Network error: connection refused"),
            "unexpected message: {msg}"
        );
        assert!(msg.contains("--base-url"), "unexpected message: {msg}");
    }

    #[tokio::test]
    async fn maps_timeout_to_actionable_message() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
        let addr = listener.local_addr().expect("address should be available");
        let server = thread::spawn(move || {
            let (_stream, _) = listener.accept().expect("accept should succeed");
            thread::sleep(Duration::from_secs(1));
        });

        let api_url = format!("http://{}/messages", addr);
        let client = Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("client should build");

        let req_err = client
            .post(&api_url)
            .send()
            .await
            .expect_err("request should fail with timeout");
        let mapped = completion_request_error(req_err, &api_url, 2);
        let msg = format!("{mapped:#}");

        assert!(
            msg.contains("timed out after 2s"),
            "unexpected message: {msg}"
        );
        assert!(msg.contains("--timeout"), "unexpected message: {msg}");

        server.join().expect("server thread should join");
    }

    #[test]
    fn detects_timeout_from_io_error_kind() {
        let err = std::io::Error::new(ErrorKind::TimedOut, "timed out");
        assert!(error_chain_matches(&err, ErrorKind::TimedOut, "timed out"));
    }

    #[test]
    fn detects_phrase_in_nested_source() {
        let inner = std::io::Error::other("Connection Refused by peer");
        assert!(error_chain_matches(
            &inner,
            ErrorKind::ConnectionRefused,
            "connection refused"
        ));
    }
}
