use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use fleet_admin::config::EnvironmentConfig;
use fleet_admin::storage::MemoryObjectStorage;
use fleet_admin::store::{collections, DocumentStore, MemoryDocumentStore};
use fleet_admin::{create_app, AppState};

struct TestApp {
    router: Router,
    store: Arc<MemoryDocumentStore>,
    storage: Arc<MemoryObjectStorage>,
}

fn create_test_app() -> TestApp {
    create_test_app_with(EnvironmentConfig::for_tests())
}

fn create_test_app_with(config: EnvironmentConfig) -> TestApp {
    let store = Arc::new(MemoryDocumentStore::new());
    let storage = Arc::new(MemoryObjectStorage::new());
    let state = AppState::new(store.clone(), storage.clone(), config);
    TestApp {
        router: create_app(state),
        store,
        storage,
    }
}

/// Parte de un cuerpo multipart/form-data
enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, Vec<u8>),
}

const BOUNDARY: &str = "fleet-admin-test-boundary";

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.dispatch(request).await
    }

    async fn send_multipart(&self, uri: &str, token: &str, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    /// Registra una cuenta y devuelve (token, id)
    async fn sign_up_and_in(&self, email: &str) -> (String, String) {
        let (status, _) = self
            .send(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({ "fullName": "Asha Rao", "email": email, "password": "secret-123" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/signin",
                None,
                Some(json!({ "email": email, "password": "secret-123" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    async fn complete_kyc(&self, account_id: &str) {
        let mut patch = Map::new();
        patch.insert("kycStatus".to_string(), json!("completed"));
        self.store.merge(collections::USERS, account_id, patch).await.unwrap();
    }

    async fn verified_account(&self, email: &str) -> String {
        let (token, id) = self.sign_up_and_in(email).await;
        self.complete_kyc(&id).await;
        token
    }
}

fn order(id: &str, price: &str, created_at: &str, status: &str) -> Value {
    json!({
        "order_id": id,
        "user_name": "Ravi Kumar",
        "user_phone": "9876543210",
        "company_name": "Acme Logistics",
        "booking_status": "Confirmed",
        "order_status": status,
        "vehicle_type": "Truck",
        "material": "Steel",
        "destination_address": "Pune",
        "price": price,
        "createdAt": created_at,
        "booking_date": created_at
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_signup_signin_and_me() {
    let app = create_test_app();
    let (token, id) = app.sign_up_and_in("Asha@Example.com").await;

    let (status, body) = app.send(Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["kycStatus"], "not-submitted");
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let app = create_test_app();
    app.sign_up_and_in("dup@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "fullName": "Other", "email": "dup@example.com", "password": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn test_signin_with_wrong_password() {
    let app = create_test_app();
    app.sign_up_and_in("wrong@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/signin",
            None,
            Some(json!({ "email": "wrong@example.com", "password": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = create_test_app();
    let (status, body) = app.send(Method::GET, "/api/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.send(Method::GET, "/api/orders", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_kyc_gate_blocks_until_completed() {
    let app = create_test_app();
    let (token, id) = app.sign_up_and_in("gate@example.com").await;

    for uri in ["/api/orders", "/api/drivers", "/api/vehicles", "/api/settlements", "/api/tracking"] {
        let (status, body) = app.send(Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body["code"], "FORBIDDEN");
    }

    // El panel y el KYC siguen accesibles
    let (status, body) = app.send(Method::GET, "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kycStatus"], "not-submitted");

    app.complete_kyc(&id).await;
    let (status, body) = app.send(Method::GET, "/api/orders", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_kyc_link_submission_sets_pending() {
    let app = create_test_app();
    let (token, _) = app.sign_up_and_in("kyc@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/kyc/submit",
            Some(&token),
            Some(json!({
                "method": "link",
                "documents": {
                    "gst": "https://docs.example.com/gst.pdf",
                    "pan": "https://docs.example.com/pan.pdf",
                    "incorporation": "https://docs.example.com/inc.pdf",
                    "signatory": "https://docs.example.com/sig.pdf",
                    "bankDetails": "https://docs.example.com/bank.pdf"
                },
                "operationalInfo": { "services": "FTL", "coverageZones": "West" }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kycStatus"], "pending");
    assert_eq!(body["documentUploadMethod"], "link");
    assert_eq!(body["progress"], json!([10, 50, 85, 100]));

    let (status, body) = app.send(Method::GET, "/api/kyc/status", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kycStatus"], "pending");

    // Pendiente no abre las secciones operativas
    let (status, _) = app.send(Method::GET, "/api/orders", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_kyc_link_submission_rejects_invalid_urls() {
    let app = create_test_app();
    let (token, _) = app.sign_up_and_in("badlink@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/kyc/submit",
            Some(&token),
            Some(json!({
                "method": "link",
                "documents": {
                    "gst": "not a url",
                    "pan": "https://docs.example.com/pan.pdf",
                    "incorporation": "https://docs.example.com/inc.pdf",
                    "signatory": "https://docs.example.com/sig.pdf",
                    "bank": "https://docs.example.com/bank.pdf"
                }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide valid URLs for all document links.");

    let (_, body) = app.send(Method::GET, "/api/kyc/status", Some(&token), None).await;
    assert_eq!(body["kycStatus"], "not-submitted");
}

#[tokio::test]
async fn test_orders_are_scoped_to_owner() {
    let app = create_test_app();
    let alice = app.verified_account("alice@example.com").await;
    let bob = app.verified_account("bob@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/orders",
            Some(&alice),
            Some(order("ORD-1", "1200", "2024-03-05T10:00:00Z", "Pending")),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    let (_, body) = app.send(Method::GET, "/api/orders", Some(&bob), None).await;
    assert_eq!(body["total"], 0);

    let (status, _) = app.send(Method::GET, "/api/orders/ORD-1", Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Bob no puede sobrescribir un pedido ajeno
    let (status, _) = app
        .send(
            Method::POST,
            "/api/orders",
            Some(&bob),
            Some(order("ORD-1", "1", "2024-03-05T10:00:00Z", "Pending")),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send(Method::GET, "/api/orders/ORD-1", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], "1200");
}

#[tokio::test]
async fn test_order_validation_and_search() {
    let app = create_test_app();
    let token = app.verified_account("search@example.com").await;

    let mut invalid = order("ORD-X", "10", "2024-03-05T10:00:00Z", "Pending");
    invalid["material"] = json!("   ");
    let (status, body) = app.send(Method::POST, "/api/orders", Some(&token), Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    for (id, status) in [("ORD-1", "Pending"), ("ORD-2", "Delivered"), ("ORD-3", "Pending")] {
        let (code, _) = app
            .send(
                Method::POST,
                "/api/orders",
                Some(&token),
                Some(order(id, "100", "2024-03-05T10:00:00Z", status)),
            )
            .await;
        assert_eq!(code, StatusCode::OK);
    }

    let (_, body) = app.send(Method::GET, "/api/orders?status=Pending", Some(&token), None).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let (_, body) = app.send(Method::GET, "/api/orders?q=ord-2", Some(&token), None).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["order_id"], "ORD-2");

    let (status, body) = app.send(Method::DELETE, "/api/orders/ORD-2", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
}

#[tokio::test]
async fn test_dashboard_summary_aggregates_owned_data() {
    let app = create_test_app();
    let token = app.verified_account("dash@example.com").await;

    app.send(
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(order("ORD-1", "₹1,200", "2024-03-05T10:00:00Z", "Delivered")),
    )
    .await;
    app.send(
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(order("ORD-2", "800", "2024-04-10T10:00:00Z", "Delivered")),
    )
    .await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/vehicles",
            Some(&token),
            Some(json!({
                "company_name": "Tata Motors",
                "company_url": "https://tatamotors.com",
                "subtype": "Open",
                "vehicle_type": "Truck",
                "capacity": "10",
                "available_wheels": "6",
                "price_per_kg": 2,
                "price_per_tonne": 1800
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(Method::GET, "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalOrders"], 2);
    assert_eq!(body["vehiclesInUse"], 1);
    assert_eq!(body["activeDrivers"], 0);
    assert_eq!(body["totalRevenue"], 2000.0);
    assert_eq!(body["kycStatus"], "completed");
}

#[tokio::test]
async fn test_settlements_mark_paid() {
    let app = create_test_app();
    let token = app.verified_account("pay@example.com").await;

    app.send(
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(order("ORD-1", "1500", "2024-03-05T10:00:00Z", "Delivered")),
    )
    .await;

    let (status, body) = app.send(Method::GET, "/api/settlements", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["paymentStatus"], "Unpaid");
    assert_eq!(body["items"][0]["amount"], 1500.0);

    let (status, body) = app
        .send(Method::POST, "/api/settlements/ORD-1/paid", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment marked as Paid");
    assert_eq!(body["data"]["items"][0]["paymentStatus"], "Paid");

    let (status, _) = app
        .send(Method::GET, "/api/settlements?from=not-a-date", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_kyc_multipart_file_submission() {
    let app = create_test_app();
    let (token, _) = app.sign_up_and_in("files@example.com").await;

    // Sin campo `method`: los ficheros bastan para elegir el modo
    let parts = [
        Part::File("bank", "bank.pdf", vec![5; 16]),
        Part::File("gst", "gst.pdf", vec![1; 16]),
        Part::File("pan", "pan.pdf", vec![2; 16]),
        Part::File("incorporation", "inc.pdf", vec![3; 16]),
        Part::File("signatory", "sig.pdf", vec![4; 16]),
        Part::Text("services", "FTL"),
        Part::Text("coverageZones", "West"),
        Part::Text("unrelated", "ignored"),
    ];
    let (status, body) = app.send_multipart("/api/kyc/submit", &token, &parts).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kycStatus"], "pending");
    assert_eq!(body["documentUploadMethod"], "file");
    assert_eq!(body["progress"], json!([10, 25, 40, 55, 70, 85, 100]));
    assert_eq!(app.storage.len().await, 5);

    let (_, body) = app.send(Method::GET, "/api/kyc/status", Some(&token), None).await;
    assert_eq!(body["kycStatus"], "pending");
}

#[tokio::test]
async fn test_kyc_multipart_links_and_missing_files() {
    let app = create_test_app();
    let (token, _) = app.sign_up_and_in("parts@example.com").await;

    // Un solo fichero: faltan los demás y no se sube nada
    let (status, body) = app
        .send_multipart(
            "/api/kyc/submit",
            &token,
            &[Part::Text("method", "file"), Part::File("gst", "gst.pdf", vec![1; 8])],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please upload all required company documents.");
    assert_eq!(app.storage.len().await, 0);

    // Partes de texto con el nombre de cada documento se leen como enlaces
    let parts = [
        Part::Text("gst", "https://docs.example.com/gst.pdf"),
        Part::Text("pan", "https://docs.example.com/pan.pdf"),
        Part::Text("incorporation", "https://docs.example.com/inc.pdf"),
        Part::Text("signatory", "https://docs.example.com/sig.pdf"),
        Part::Text("bank", "https://docs.example.com/bank.pdf"),
    ];
    let (status, body) = app.send_multipart("/api/kyc/submit", &token, &parts).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documentUploadMethod"], "link");
    assert_eq!(body["progress"], json!([10, 50, 85, 100]));
    assert_eq!(app.storage.len().await, 0);
}

fn driver(mobile: &str, city: &str) -> Value {
    json!({
        "firstName": "Ravi",
        "lastName": "Kumar",
        "mobileNumber": mobile,
        "city": city,
        "state": "MH",
        "vehicleNumber": "MH12AB1234"
    })
}

#[tokio::test]
async fn test_driver_document_upload_survives_edit() {
    let app = create_test_app();
    let token = app.verified_account("drivers@example.com").await;

    let (status, _) = app
        .send(Method::POST, "/api/drivers", Some(&token), Some(driver("9876543210", "Pune")))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send_multipart(
            "/api/drivers/9876543210/documents/driving_license",
            &token,
            &[Part::File("file", "dl.pdf", vec![7; 32])],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let url = body["documents"]["Driving_License"]["url"].as_str().unwrap().to_string();
    assert!(!url.is_empty());
    assert_eq!(app.storage.len().await, 1);

    // Editar sin documentos conserva el fichero subido
    let (status, _) = app
        .send(Method::POST, "/api/drivers", Some(&token), Some(driver("9876543210", "Mumbai")))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(Method::GET, "/api/drivers/9876543210", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Mumbai");
    assert_eq!(body["documents"]["Driving_License"]["url"], url.as_str());
}

#[tokio::test]
async fn test_driver_document_upload_rejections() {
    let mut config = EnvironmentConfig::for_tests();
    config.max_upload_bytes = 1024;
    let app = create_test_app_with(config);
    let token = app.verified_account("rejects@example.com").await;
    app.send(Method::POST, "/api/drivers", Some(&token), Some(driver("111", "Pune")))
        .await;

    let (status, _) = app
        .send_multipart(
            "/api/drivers/111/documents/passport",
            &token,
            &[Part::File("file", "p.pdf", vec![1; 8])],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send_multipart(
            "/api/drivers/111/documents/Vehicle_RC",
            &token,
            &[Part::File("file", "rc.pdf", vec![1; 2048])],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "File size must be under 5MB.");

    let (status, _) = app
        .send_multipart(
            "/api/drivers/111/documents/Vehicle_RC",
            &token,
            &[Part::Text("note", "no file here")],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send_multipart(
            "/api/drivers/999/documents/Vehicle_RC",
            &token,
            &[Part::File("file", "rc.pdf", vec![1; 8])],
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.storage.len().await, 0);
}

#[tokio::test]
async fn test_store_outage_returns_503_and_keeps_state() {
    let app = create_test_app();
    let token = app.verified_account("outage@example.com").await;
    app.send(
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(order("ORD-1", "1500", "2024-03-05T10:00:00Z", "Pending")),
    )
    .await;

    app.store.set_unavailable(true);
    let (status, body) = app
        .send(
            Method::POST,
            "/api/orders",
            Some(&token),
            Some(order("ORD-1", "9999", "2024-03-05T10:00:00Z", "Delivered")),
        )
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "STORE_ERROR");

    let (status, _) = app.send(Method::GET, "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    app.store.set_unavailable(false);
    let (status, body) = app.send(Method::GET, "/api/orders/ORD-1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], "1500");
    assert_eq!(body["order_status"], "Pending");
}
