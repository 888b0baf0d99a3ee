//! In-process stand-in for the hotel/booking backend.
//!
//! Serves the `/api/v1` surface from memory and records every request so
//! tests can assert on what was (or was not) sent.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use staybook::config::ApiConfig;
use staybook::gateway::ApiClient;
use staybook::session::SessionStore;
use staybook::Gateway;

pub const PASSWORD: &str = "secret123";
pub const USER_TOKEN: &str = "user-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const ODD_ROLE_TOKEN: &str = "odd-role-token";

struct Account {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    role: &'static str,
    token: &'static str,
}

const ACCOUNTS: &[Account] = &[
    Account {
        id: "u1",
        name: "Uma",
        email: "user@example.com",
        role: "user",
        token: USER_TOKEN,
    },
    Account {
        id: "a1",
        name: "Ada",
        email: "admin@example.com",
        role: "admin",
        token: ADMIN_TOKEN,
    },
    Account {
        id: "o1",
        name: "Oz",
        email: "owner@example.com",
        role: "owner",
        token: ODD_ROLE_TOKEN,
    },
];

fn account_by_token(token: &str) -> Option<&'static Account> {
    ACCOUNTS.iter().find(|account| account.token == token)
}

fn account_by_email(email: &str) -> Option<&'static Account> {
    ACCOUNTS.iter().find(|account| account.email == email)
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

struct StubState {
    requests: Mutex<Vec<RecordedRequest>>,
    hotels: Mutex<Vec<Value>>,
    bookings: Mutex<Vec<Value>>,
    overrides: Mutex<HashMap<(Method, String), (StatusCode, Value)>>,
    next_id: Mutex<u32>,
}

#[derive(Clone)]
pub struct StubBackend {
    state: Arc<StubState>,
}

type Reply = (StatusCode, Json<Value>);

fn reply(status: StatusCode, body: Value) -> Reply {
    (status, Json(body))
}

fn failure(status: StatusCode, message: &str) -> Reply {
    reply(status, json!({ "success": false, "message": message }))
}

fn hotel_summary(hotel: &Value) -> Value {
    json!({
        "_id": hotel["id"],
        "name": hotel["name"],
        "address": hotel["address"],
        "tel": hotel["tel"],
        "id": hotel["id"],
    })
}

impl StubBackend {
    pub fn new() -> Self {
        let hotels = vec![
            json!({
                "_id": "h1", "id": "h1", "name": "Seaside Inn", "address": "1 Beach Rd",
                "district": "Bang Rak", "province": "Bangkok", "postalcode": "10500",
                "tel": "02-111-1111", "picture": "https://img.example.com/h1.jpg", "__v": 0
            }),
            json!({
                "_id": "h2", "id": "h2", "name": "Hill Lodge", "address": "9 Summit Way",
                "district": "Mueang", "province": "Chiang Mai", "postalcode": "50000",
                "tel": "053-222-222", "picture": "", "__v": 0
            }),
        ];
        let bookings = vec![
            json!({
                "_id": "b1",
                "bookingDate": "2024-01-10T00:00:00.000Z",
                "checkoutDate": "2024-01-11T00:00:00.000Z",
                "createdAt": "2023-12-01T08:00:00.000Z",
                "user": "u1",
                "hotel": hotel_summary(&hotels[0]),
            }),
            json!({
                "_id": "b2",
                "bookingDate": "2024-02-01T00:00:00.000Z",
                "checkoutDate": "2024-02-03T00:00:00.000Z",
                "createdAt": "2023-12-05T08:00:00.000Z",
                "user": "a1",
                "hotel": hotel_summary(&hotels[1]),
            }),
        ];

        Self {
            state: Arc::new(StubState {
                requests: Mutex::new(Vec::new()),
                hotels: Mutex::new(hotels),
                bookings: Mutex::new(bookings),
                overrides: Mutex::new(HashMap::new()),
                next_id: Mutex::new(100),
            }),
        }
    }

    /// Serve on an ephemeral localhost port and return the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().clear();
    }

    pub fn hotels(&self) -> Vec<Value> {
        self.state.hotels.lock().clone()
    }

    pub fn bookings(&self) -> Vec<Value> {
        self.state.bookings.lock().clone()
    }

    /// Answer `method path` with a fixed response instead of the stub logic.
    pub fn override_route(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .overrides
            .lock()
            .insert((method, path.to_string()), (status, body));
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut next = self.state.next_id.lock();
        *next += 1;
        format!("{}{}", prefix, *next)
    }

    fn route(&self, method: &Method, segments: &[&str], token: Option<&str>, body: Value) -> Reply {
        let caller = token.and_then(account_by_token);

        match (method.as_str(), segments) {
            ("POST", ["auth", "login"]) => {
                let email = body["email"].as_str().unwrap_or_default();
                let password = body["password"].as_str().unwrap_or_default();
                match account_by_email(email) {
                    Some(account) if password == PASSWORD => reply(
                        StatusCode::OK,
                        json!({
                            "success": true,
                            "_id": account.id,
                            "name": account.name,
                            "email": account.email,
                            "token": account.token,
                        }),
                    ),
                    _ => failure(StatusCode::UNAUTHORIZED, "Invalid credentials"),
                }
            }
            ("POST", ["auth", "register"]) => {
                reply(StatusCode::CREATED, json!({ "success": true }))
            }
            ("GET", ["auth", "me"]) => match caller {
                Some(account) => reply(
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "data": {
                            "_id": account.id,
                            "role": account.role,
                            "name": account.name,
                            "email": account.email,
                        }
                    }),
                ),
                None => failure(StatusCode::UNAUTHORIZED, "Not authorized"),
            },
            ("GET", ["hotels"]) => {
                let hotels = self.hotels();
                reply(
                    StatusCode::OK,
                    json!({ "success": true, "count": hotels.len(), "data": hotels }),
                )
            }
            ("POST", ["hotels"]) => match caller {
                Some(account) if account.role == "admin" => {
                    let mut hotel = body;
                    let id = self.next_id("h");
                    hotel["id"] = json!(id);
                    hotel["_id"] = json!(id);
                    self.state.hotels.lock().push(hotel.clone());
                    reply(StatusCode::CREATED, json!({ "success": true, "data": hotel }))
                }
                Some(_) => failure(StatusCode::FORBIDDEN, "Forbidden"),
                None => failure(StatusCode::UNAUTHORIZED, "Not authorized"),
            },
            ("PUT", ["hotels", id]) => match caller {
                Some(account) if account.role == "admin" => {
                    let mut hotels = self.state.hotels.lock();
                    match hotels.iter_mut().find(|hotel| hotel["id"] == *id) {
                        Some(hotel) => {
                            if let (Some(target), Some(fields)) =
                                (hotel.as_object_mut(), body.as_object())
                            {
                                for (key, value) in fields {
                                    target.insert(key.clone(), value.clone());
                                }
                            }
                            reply(StatusCode::OK, json!({ "success": true, "data": hotel.clone() }))
                        }
                        None => failure(StatusCode::NOT_FOUND, "Hotel not found"),
                    }
                }
                Some(_) => failure(StatusCode::FORBIDDEN, "Forbidden"),
                None => failure(StatusCode::UNAUTHORIZED, "Not authorized"),
            },
            ("DELETE", ["hotels", id]) => match caller {
                Some(account) if account.role == "admin" => {
                    let mut hotels = self.state.hotels.lock();
                    let before = hotels.len();
                    hotels.retain(|hotel| hotel["id"] != *id);
                    if hotels.len() == before {
                        failure(StatusCode::NOT_FOUND, "Hotel not found")
                    } else {
                        reply(StatusCode::OK, json!({ "success": true, "data": {} }))
                    }
                }
                Some(_) => failure(StatusCode::FORBIDDEN, "Forbidden"),
                None => failure(StatusCode::UNAUTHORIZED, "Not authorized"),
            },
            ("GET", ["bookings"]) => match caller {
                Some(account) => {
                    let mine: Vec<Value> = self
                        .bookings()
                        .into_iter()
                        .filter(|booking| booking["user"] == account.id)
                        .collect();
                    reply(
                        StatusCode::OK,
                        json!({ "success": true, "count": mine.len(), "data": mine }),
                    )
                }
                None => failure(StatusCode::UNAUTHORIZED, "Not authorized"),
            },
            ("POST", ["hotels", hotel_id, "bookings"]) => match caller {
                Some(account) => {
                    let hotel = self
                        .hotels()
                        .into_iter()
                        .find(|hotel| hotel["id"] == *hotel_id);
                    match hotel {
                        Some(hotel) => {
                            let booking = json!({
                                "_id": self.next_id("b"),
                                "bookingDate": body["bookingDate"],
                                "checkoutDate": body["checkoutDate"],
                                "createdAt": body["createdAt"],
                                "user": account.id,
                                "hotel": hotel_summary(&hotel),
                            });
                            self.state.bookings.lock().push(booking.clone());
                            reply(StatusCode::CREATED, json!({ "success": true, "data": booking }))
                        }
                        None => failure(StatusCode::NOT_FOUND, "Hotel not found"),
                    }
                }
                None => failure(StatusCode::UNAUTHORIZED, "Not authorized"),
            },
            ("PUT", ["bookings", id]) => match caller {
                Some(account) => {
                    let mut bookings = self.state.bookings.lock();
                    match bookings.iter_mut().find(|booking| booking["_id"] == *id) {
                        Some(booking) if booking["user"] == account.id => {
                            booking["bookingDate"] = body["bookingDate"].clone();
                            booking["checkoutDate"] = body["checkoutDate"].clone();
                            booking["createdAt"] = body["createdAt"].clone();
                            let data = booking.clone();
                            reply(StatusCode::OK, json!({ "success": true, "data": data }))
                        }
                        Some(_) => failure(StatusCode::UNAUTHORIZED, "Not your booking"),
                        None => failure(StatusCode::NOT_FOUND, "Booking not found"),
                    }
                }
                None => failure(StatusCode::UNAUTHORIZED, "Not authorized"),
            },
            ("DELETE", ["bookings", id]) => match caller {
                Some(account) => {
                    let mut bookings = self.state.bookings.lock();
                    let before = bookings.len();
                    bookings.retain(|booking| {
                        !(booking["_id"] == *id && booking["user"] == account.id)
                    });
                    if bookings.len() == before {
                        failure(StatusCode::NOT_FOUND, "Booking not found")
                    } else {
                        reply(StatusCode::OK, json!({ "success": true, "data": {} }))
                    }
                }
                None => failure(StatusCode::UNAUTHORIZED, "Not authorized"),
            },
            _ => failure(StatusCode::NOT_FOUND, "Route not found"),
        }
    }
}

async fn handle(
    State(stub): State<StubBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Reply {
    let path = uri.path().to_string();
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    stub.state.requests.lock().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let canned = stub
        .state
        .overrides
        .lock()
        .get(&(method.clone(), path.clone()))
        .cloned();
    if let Some((status, payload)) = canned {
        return reply(status, payload);
    }

    let token = authorization
        .as_deref()
        .and_then(|header| header.strip_prefix("Bearer "));
    let segments: Vec<&str> = path.trim_start_matches("/api/v1/").split('/').collect();
    stub.route(&method, &segments, token, body)
}

/// A gateway pointed at `base_url` with an in-memory session store.
pub fn gateway(base_url: &str) -> Gateway {
    let api = ApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: Some(10),
    })
    .unwrap();
    Gateway::new(api, SessionStore::in_memory())
}
