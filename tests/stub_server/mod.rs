use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

#[derive(Clone)]
pub struct ThreatStub {
    pub url: &'static str,
    pub threat_type: &'static str,
}

#[derive(Clone, Default)]
pub struct StubConfig {
    pub failing_urls: Vec<&'static str>,
    pub threats: Vec<ThreatStub>,
}

pub struct StubServer {
    port: u16,
}

impl StubServer {
    pub fn start(config: StubConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                respond(stream, &config);
            }
        });

        Self { port }
    }

    pub fn host(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }
}

fn respond(mut stream: TcpStream, config: &StubConfig) {
    let body = match read_body(&stream) {
        Some(body) => body,
        None => return,
    };

    let requested: Vec<String> = body["threatInfo"]["threatEntries"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry["url"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let (status, response) = if requested.iter().any(|url| config.failing_urls.contains(&url.as_str())) {
        ("500 Internal Server Error", json!({"error": {"code": 500, "message": "boom"}}))
    } else {
        ("200 OK", matches_for(&requested, &config.threats))
    };

    let response = response.to_string();

    write!(
        stream,
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response}",
        response.len()
    ).ok();
}

// Relies on Content-Length; chunked request bodies are not decoded.
fn read_body(stream: &TcpStream) -> Option<Value> {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0;

    loop {
        let mut line = String::new();

        if reader.read_line(&mut line).ok()? == 0 {
            return None;
        }

        let line = line.trim_end();

        if line.is_empty() {
            break;
        }

        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().ok()?;
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).ok()?;

    serde_json::from_slice(&body).ok()
}

fn matches_for(requested: &[String], threats: &[ThreatStub]) -> Value {
    let matches: Vec<Value> = threats
        .iter()
        .filter(|threat| requested.iter().any(|url| url == threat.url))
        .map(|threat| {
            json!({
                "threatType": threat.threat_type,
                "platformType": "ANY_PLATFORM",
                "threatEntryType": "URL",
                "threat": {"url": threat.url},
                "cacheDuration": "300s",
            })
        })
        .collect();

    if matches.is_empty() {
        json!({})
    } else {
        json!({"matches": matches})
    }
}
