//! PostgREST backend (Supabase and compatible services)

use serde_json::Value;
use std::time::Duration;

use crate::error::StoreError;
use crate::form::StorageRecord;
use crate::store::RecordStore;

const FETCH_RETRIES: usize = 3;
const RETRY_BACKOFF_MS: u64 = 250;

pub(crate) struct RestStore {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl RestStore {
    pub(crate) fn new(url: &str, api_key: String, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self::with_agent(url, api_key, agent)
    }

    fn with_agent(url: &str, api_key: String, agent: ureq::Agent) -> Self {
        RestStore {
            base_url: url.trim().trim_end_matches('/').to_string(),
            api_key,
            agent,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

/// Error text for a non-2xx response, preferring PostgREST's `message` field
fn status_reason(status: u16, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    if message.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {message}")
    }
}

impl RecordStore for RestStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn fetch_all(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}?select=*", self.table_url(table));
        let mut last_reason = String::new();

        for attempt in 0..FETCH_RETRIES {
            let result = self
                .agent
                .get(&url)
                .header("apikey", &self.api_key)
                .header("Authorization", &self.bearer())
                .header("Accept", "application/json")
                .call();

            match result {
                Ok(response) if response.status().is_success() => {
                    let mut body = response.into_body();
                    return serde_json::from_reader(body.as_reader()).map_err(|e| {
                        StoreError::Decode {
                            table: table.to_string(),
                            reason: e.to_string(),
                        }
                    });
                }
                Ok(response) => {
                    let status = response.status();
                    let text = response.into_body().read_to_string().unwrap_or_default();
                    last_reason = status_reason(status.as_u16(), &text);
                    // Client errors will not fix themselves on retry
                    if status.is_client_error() {
                        break;
                    }
                }
                Err(e) => last_reason = e.to_string(),
            }

            tracing::warn!(table, attempt = attempt + 1, reason = %last_reason, "fetch failed");
            if attempt + 1 < FETCH_RETRIES {
                std::thread::sleep(Duration::from_millis(
                    RETRY_BACKOFF_MS * (attempt as u64 + 1),
                ));
            }
        }

        Err(StoreError::Fetch {
            table: table.to_string(),
            reason: last_reason,
        })
    }

    fn insert(&self, table: &str, record: &StorageRecord) -> Result<(), StoreError> {
        let response = self
            .agent
            .post(&self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", &self.bearer())
            .header("Prefer", "return=minimal")
            .send_json(std::slice::from_ref(record))
            .map_err(|e| StoreError::Write {
                table: table.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.into_body().read_to_string().unwrap_or_default();
        Err(StoreError::Write {
            table: table.to_string(),
            reason: status_reason(status.as_u16(), &text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::{Arc, Mutex};

    /// One request as seen by the local server
    struct Seen {
        head: String,
        body: String,
    }

    type Log = Arc<Mutex<Vec<Seen>>>;

    fn read_request(stream: &TcpStream) -> Option<Seen> {
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).ok()? == 0 {
                return None;
            }
            if line == "\r\n" {
                break;
            }
            head.push_str(&line.to_ascii_lowercase());
        }

        let header = |name: &str| {
            head.lines()
                .find_map(|l| l.strip_prefix(name))
                .map(|v| v.trim().to_string())
        };
        let mut body = Vec::new();
        if let Some(len) = header("content-length:").and_then(|v| v.parse::<usize>().ok()) {
            body.resize(len, 0);
            reader.read_exact(&mut body).ok()?;
        } else if header("transfer-encoding:").is_some_and(|v| v.contains("chunked")) {
            loop {
                let mut size = String::new();
                reader.read_line(&mut size).ok()?;
                let size = usize::from_str_radix(size.trim(), 16).ok()?;
                let mut chunk = vec![0; size + 2];
                reader.read_exact(&mut chunk).ok()?;
                if size == 0 {
                    break;
                }
                body.extend_from_slice(&chunk[..size]);
            }
        }
        Some(Seen {
            head,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// Serve the given responses in order, repeating the last one forever
    fn serve(responses: Vec<(u16, &'static str)>) -> (RestStore, Log) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let log: Log = Arc::default();
        let server_log = Arc::clone(&log);
        std::thread::spawn(move || {
            let mut served = 0;
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let Some(seen) = read_request(&stream) else {
                    continue;
                };
                server_log.lock().unwrap().push(seen);
                let (status, body) = responses[served.min(responses.len() - 1)];
                served += 1;
                let _ = write!(
                    stream,
                    "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.flush();
            }
        });
        // Talk to the local server directly even when a proxy is set in the environment
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(5)))
            .http_status_as_error(false)
            .proxy(None)
            .build()
            .into();
        let store = RestStore::with_agent(&url, "anon-key".to_string(), agent);
        (store, log)
    }

    fn record(value: Value) -> StorageRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn fetch_sends_auth_headers_and_select() {
        let (store, log) = serve(vec![(200, r#"[{"id":1},{"id":2}]"#)]);
        let rows = store.fetch_all("tools").unwrap();
        assert_eq!(rows.len(), 2);

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        let head = &log[0].head;
        assert!(head.starts_with("get /rest/v1/tools?select="), "{head}");
        assert!(head.contains("apikey: anon-key"), "{head}");
        assert!(head.contains("authorization: bearer anon-key"), "{head}");
    }

    #[test]
    fn fetch_gives_up_after_three_server_errors() {
        let (store, log) = serve(vec![(503, r#"{"message":"unavailable"}"#)]);
        let err = store.fetch_all("projects").unwrap_err();
        assert!(matches!(err, StoreError::Fetch { .. }));
        assert!(err.to_string().contains("HTTP 503: unavailable"), "{err}");
        assert_eq!(log.lock().unwrap().len(), FETCH_RETRIES);
    }

    #[test]
    fn fetch_recovers_from_a_transient_error() {
        let (store, log) = serve(vec![(500, ""), (200, r#"[{"id":1}]"#)]);
        assert_eq!(store.fetch_all("employees").unwrap().len(), 1);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn fetch_does_not_retry_client_errors() {
        let (store, log) = serve(vec![(401, r#"{"message":"JWT expired"}"#)]);
        let err = store.fetch_all("projects").unwrap_err();
        assert!(err.to_string().contains("HTTP 401: JWT expired"), "{err}");
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn insert_posts_a_single_row_array() {
        let (store, log) = serve(vec![(201, "")]);
        store
            .insert("projects", &record(serde_json::json!({ "name": "Seawall", "progress": 0 })))
            .unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        let head = &log[0].head;
        assert!(head.starts_with("post /rest/v1/projects "), "{head}");
        assert!(head.contains("prefer: return=minimal"), "{head}");
        assert!(head.contains("apikey: anon-key"), "{head}");
        assert!(head.contains("authorization: bearer anon-key"), "{head}");

        let body: Value = serde_json::from_str(&log[0].body).unwrap();
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Seawall");
    }

    #[test]
    fn insert_is_never_retried() {
        let (store, log) = serve(vec![(503, r#"{"message":"down"}"#)]);
        let err = store
            .insert("projects", &record(serde_json::json!({ "name": "Seawall" })))
            .unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(err.to_string().contains("HTTP 503: down"), "{err}");
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn table_url_strips_trailing_slash() {
        let store = RestStore::new(
            "https://demo.supabase.co/ ",
            "key".to_string(),
            Duration::from_secs(1),
        );
        assert_eq!(
            store.table_url("projects"),
            "https://demo.supabase.co/rest/v1/projects"
        );
    }

    #[test]
    fn status_reason_prefers_postgrest_message() {
        let body = r#"{"code":"23502","message":"null value in column \"name\""}"#;
        assert_eq!(
            status_reason(400, body),
            r#"HTTP 400: null value in column "name""#
        );
    }

    #[test]
    fn status_reason_falls_back_to_body_or_code() {
        assert_eq!(status_reason(502, "Bad Gateway\n"), "HTTP 502: Bad Gateway");
        assert_eq!(status_reason(500, ""), "HTTP 500");
    }
}
