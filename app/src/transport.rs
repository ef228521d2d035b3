//! Blocking HTTP execution for requests built by the core.

use articulos_core::{HttpMethod, HttpRequest, HttpResponse, Outcome};
use tracing::debug;

/// Executes one request. Non-2xx statuses are data, not failures; a request
/// that produced no readable response becomes `Outcome::Transport`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Outcome;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Outcome {
        let path = request.path.as_str();
        let body = request.body.as_deref();
        let result = match (request.method, body) {
            (HttpMethod::Get, _) => self.agent.get(path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(path).send_empty(),
        };

        let read = result.and_then(|mut response| {
            let status = response.status().as_u16();
            let body = response.body_mut().read_to_string()?;
            Ok(HttpResponse::new(status, body))
        });

        match read {
            Ok(response) => {
                debug!(status = response.status, method = %request.method, path, "response received");
                Outcome::Response(response)
            }
            Err(err) => {
                debug!(method = %request.method, path, "transport error: {err}");
                Outcome::Transport(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    use articulos_core::ArticulosClient;

    use super::*;

    /// Serve one canned raw HTTP response and return the base URL.
    fn serve_once(raw: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            stream.write_all(raw).unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn error_status_is_returned_as_data() {
        let base = serve_once(b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 4\r\nConnection: close\r\n\r\ndown");
        let request = ArticulosClient::new(&base).build_list_articulos();

        match UreqTransport::new().execute(&request) {
            Outcome::Response(response) => {
                assert_eq!(response.status, 503);
                assert_eq!(response.body, "down");
            }
            other => panic!("expected a response, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_body_is_a_transport_failure() {
        let base = serve_once(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n\xff\xfe");
        let request = ArticulosClient::new(&base).build_list_articulos();

        assert!(matches!(
            UreqTransport::new().execute(&request),
            Outcome::Transport(_)
        ));
    }
}
