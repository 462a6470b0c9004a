use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use realtor_agent::{RealtorClient, RealtorConfig};
use serde_json::{json, Value};
mod common;

#[ctor::ctor]
fn _init() { common::init(); }

/// Raw request as seen by the server.
struct Captured {
    head: String,
    body: String,
}

impl Captured {
    fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}

/// Serve one request on 127.0.0.1 with a fixed reply; returns the base URL and
/// a handle yielding what the client sent.
fn serve_once(status: u16, reply: Value) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        let head_end = loop {
            let n = stream.read(&mut buf).unwrap();
            assert!(n > 0, "connection closed before headers ended");
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos;
            }
        };
        let head = String::from_utf8_lossy(&raw[..head_end]).into_owned();
        let length = head
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
            .map(|(_, v)| v.trim().parse::<usize>().unwrap())
            .unwrap_or(0);
        let mut body = raw[head_end + 4..].to_vec();
        while body.len() < length {
            let n = stream.read(&mut buf).unwrap();
            assert!(n > 0, "connection closed before body ended");
            body.extend_from_slice(&buf[..n]);
        }

        let payload = reply.to_string();
        let response = format!(
            "HTTP/1.1 {status} Status\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{payload}",
            payload.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        Captured { head, body: String::from_utf8(body).unwrap() }
    });
    (base_url, handle)
}

fn client_at(base_url: &str) -> RealtorClient {
    RealtorClient::new(&RealtorConfig::new("SECRET").with_base_url(base_url)).unwrap()
}

#[test]
fn get_sends_credential_host_and_encoded_query() {
    let reply = json!({ "data": { "home": { "commute_time": { "duration": { "text": "14 mins" } } } } });
    let (base_url, server) = serve_once(200, reply);

    let text = client_at(&base_url).get_commute_time("P1", "500 Congress Ave").unwrap();
    assert_eq!(text, "14 mins");

    let seen = server.join().unwrap();
    assert_eq!(
        seen.request_line(),
        "GET /properties/v3/get-commute-time?destination_address=500+Congress+Ave&property_id=P1&transportation_type=driving HTTP/1.1"
    );
    assert_eq!(seen.header("x-rapidapi-key"), Some("SECRET"));
    assert_eq!(seen.header("x-rapidapi-host"), Some("realtor.p.rapidapi.com"));
    assert!(seen.body.is_empty());
}

#[test]
fn post_sends_json_body() {
    let reply = json!({ "data": { "home_search": { "results": [ { "property_id": "P9", "location": { "city": "Austin" } } ] } } });
    let (base_url, server) = serve_once(200, reply);

    let rows = client_at(&base_url).search_by_postal_code("78701").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["location.city"], "Austin");

    let seen = server.join().unwrap();
    assert_eq!(seen.request_line(), "POST /properties/v3/list HTTP/1.1");
    assert_eq!(seen.header("content-type"), Some("application/json"));
    assert_eq!(seen.header("x-rapidapi-key"), Some("SECRET"));
    assert_eq!(seen.header("x-rapidapi-host"), Some("realtor.p.rapidapi.com"));
    let body: Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(
        body,
        json!({
            "limit": 200,
            "offset": 0,
            "postal_code": "78701",
            "status": ["for_sale", "ready_to_build"],
            "sort": { "direction": "desc", "field": "list_date" }
        })
    );
}

#[test]
fn forbidden_status_maps_to_empty_photos() {
    let (base_url, server) = serve_once(403, json!({ "message": "You are not subscribed to this API." }));

    let photos = client_at(&base_url).get_photos("P1").unwrap();
    assert!(photos.is_empty());

    let seen = server.join().unwrap();
    assert_eq!(seen.request_line(), "GET /properties/v3/get-photos?property_id=P1 HTTP/1.1");
}
