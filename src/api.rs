//! The client for the sheet-backed transaction API.
//!
//! Every operation is a single endpoint addressed through an `action`
//! query parameter, answering with the same envelope:
//! `{ "status": "ok" | "error", "data": ..., "message": ... }`.
//!
//! Write requests carry their JSON body as `text/plain;charset=utf-8`.
//! The backend parses the text as JSON either way, and the plain
//! content type keeps it from demanding a CORS preflight it cannot
//! answer.

use serde::Deserialize;

use crate::{
    Error,
    transaction::{CreateTransaction, Transaction, UpdateTransaction},
};

/// The opaque credential that authenticates requests, carried either
/// in the query string or in a header depending on the deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Sent as a `key` query parameter.
    ApiKey(String),
    /// Sent as an `Authorization: Bearer` header.
    Bearer(String),
}

/// The response envelope every endpoint answers with.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Option<Vec<Transaction>>,
    #[serde(default)]
    message: Option<String>,
}

/// A client for one deployment of the transaction API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    credential: Credential,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the deployment at `base_url`.
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            base_url: base_url.into(),
            credential,
            http: reqwest::Client::new(),
        }
    }

    /// Fetches the full ledger, sorted by date descending.
    ///
    /// # Errors
    ///
    /// Returns [Error::Http] if the request fails and [Error::Api] if
    /// the server answers with an error envelope or without data.
    pub async fn list(&self) -> Result<Vec<Transaction>, Error> {
        let envelope = self.send("list", &[], None).await?;

        let mut transactions = envelope.data.ok_or_else(|| {
            tracing::error!("List response had status ok but no data");
            Error::Api("list response contained no data".to_string())
        })?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(transactions)
    }

    /// Creates a transaction. The server assigns the row id.
    ///
    /// # Errors
    ///
    /// Returns [Error::Http] if the request fails and [Error::Api] if
    /// the server answers with an error envelope.
    pub async fn create(&self, payload: &CreateTransaction) -> Result<(), Error> {
        let body = serde_json::to_string(payload)?;
        self.send("create", &[], Some(body)).await?;

        Ok(())
    }

    /// Applies a partial update to an existing transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::Http] if the request fails and [Error::Api] if
    /// the server answers with an error envelope.
    pub async fn update(&self, payload: &UpdateTransaction) -> Result<(), Error> {
        let body = serde_json::to_string(payload)?;
        self.send("update", &[], Some(body)).await?;

        Ok(())
    }

    /// Deletes the transaction with the given row id.
    ///
    /// # Errors
    ///
    /// Returns [Error::Http] if the request fails and [Error::Api] if
    /// the server answers with an error envelope.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        // The id travels in the query string. The empty JSON body makes
        // the backend treat the request as a POST all the same.
        self.send("delete", &[("id", id.to_string())], Some("{}".to_string()))
            .await?;

        Ok(())
    }

    async fn send(
        &self,
        action: &str,
        params: &[(&str, String)],
        body: Option<String>,
    ) -> Result<Envelope, Error> {
        let mut query: Vec<(&str, String)> = vec![("action", action.to_string())];
        query.extend(params.iter().cloned());

        if let Credential::ApiKey(key) = &self.credential {
            query.push(("key", key.clone()));
        }

        let mut request = match body {
            Some(body) => self
                .http
                .post(&self.base_url)
                .header("Content-Type", "text/plain;charset=utf-8")
                .body(body),
            None => self.http.get(&self.base_url),
        };
        request = request.query(&query);

        if let Credential::Bearer(token) = &self.credential {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            tracing::error!("Request {action} failed with status {}", response.status());
            return Err(Error::Api(format!(
                "request {action} failed with status {}",
                response.status()
            )));
        }

        let envelope: Envelope = response.json().await?;
        if envelope.status != "ok" {
            let message = envelope
                .message
                .unwrap_or_else(|| "no message".to_string());
            tracing::error!("Request {action} was rejected: {message}");
            return Err(Error::Api(message));
        }

        Ok(envelope)
    }
}

#[cfg(test)]
mod api_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Router,
        extract::{Query, State},
        routing::get,
    };
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        api::{ApiClient, Credential},
        transaction::{AnalyticsClass, CreateTransaction},
    };

    #[derive(Debug, Clone, Default)]
    struct ReceivedRequest {
        query: Vec<(String, String)>,
        content_type: Option<String>,
        authorization: Option<String>,
        body: String,
    }

    type Received = Arc<Mutex<Vec<ReceivedRequest>>>;

    /// Serves canned responses on an OS-assigned port and records every
    /// request it receives.
    async fn spawn_test_server(response_body: &'static str) -> (String, Received) {
        let received: Received = Arc::new(Mutex::new(Vec::new()));

        async fn handler(
            State((received, response_body)): State<(Received, &'static str)>,
            Query(query): Query<Vec<(String, String)>>,
            headers: axum::http::HeaderMap,
            body: String,
        ) -> ([(&'static str, &'static str); 1], &'static str) {
            received.lock().unwrap().push(ReceivedRequest {
                query,
                content_type: headers
                    .get("content-type")
                    .map(|value| value.to_str().unwrap().to_string()),
                authorization: headers
                    .get("authorization")
                    .map(|value| value.to_str().unwrap().to_string()),
                body,
            });

            ([("content-type", "application/json")], response_body)
        }

        let router = Router::new()
            .route("/", get(handler).post(handler))
            .with_state((received.clone(), response_body));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind test server");
        let address = listener.local_addr().expect("should read local address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (format!("http://{address}"), received)
    }

    #[tokio::test]
    async fn list_sorts_by_date_descending() {
        let (base_url, _) = spawn_test_server(
            r#"{"status":"ok","data":[
                {"id":1,"date":"2025-01-05T00:00:00.000Z","account":"Cash-CHF","movement":-10.0,
                 "curr":"CHF","category":"FOOD","subcategory":"","analytics":"TRUE","flag":"",
                 "note":"","valueChf":-10.0},
                {"id":2,"date":"2025-06-15T00:00:00.000Z","account":"Cash-CHF","movement":-20.0,
                 "curr":"CHF","category":"FOOD","subcategory":"","analytics":"TRUE","flag":"",
                 "note":"","valueChf":-20.0}
            ]}"#,
        )
        .await;
        let client = ApiClient::new(base_url, Credential::ApiKey("secret".to_string()));

        let transactions = client.list().await.expect("list should succeed");

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, 2);
        assert_eq!(transactions[0].date, date!(2025 - 06 - 15));
        assert_eq!(transactions[1].id, 1);
    }

    #[tokio::test]
    async fn list_sends_action_and_api_key() {
        let (base_url, received) = spawn_test_server(r#"{"status":"ok","data":[]}"#).await;
        let client = ApiClient::new(base_url, Credential::ApiKey("secret".to_string()));

        client.list().await.expect("list should succeed");

        let requests = received.lock().unwrap();
        assert_eq!(
            requests[0].query,
            vec![
                ("action".to_string(), "list".to_string()),
                ("key".to_string(), "secret".to_string()),
            ]
        );
        assert_eq!(requests[0].authorization, None);
    }

    #[tokio::test]
    async fn bearer_credential_uses_authorization_header() {
        let (base_url, received) = spawn_test_server(r#"{"status":"ok","data":[]}"#).await;
        let client = ApiClient::new(base_url, Credential::Bearer("token".to_string()));

        client.list().await.expect("list should succeed");

        let requests = received.lock().unwrap();
        assert_eq!(
            requests[0].query,
            vec![("action".to_string(), "list".to_string())]
        );
        assert_eq!(requests[0].authorization, Some("Bearer token".to_string()));
    }

    #[tokio::test]
    async fn create_posts_json_as_plain_text() {
        let (base_url, received) = spawn_test_server(r#"{"status":"ok"}"#).await;
        let client = ApiClient::new(base_url, Credential::ApiKey("secret".to_string()));
        let payload = CreateTransaction {
            date: date!(2025 - 06 - 15),
            account: "Cash-CHF".to_string(),
            movement: dec!(-50.0),
            currency: "CHF".to_string(),
            category: "FOOD".to_string(),
            subcategory: "Lunch".to_string(),
            analytics: AnalyticsClass::Ordinary,
            flag: "".to_string(),
            note: "sandwich".to_string(),
            value_chf: dec!(-50.0),
        };

        client.create(&payload).await.expect("create should succeed");

        let requests = received.lock().unwrap();
        assert_eq!(
            requests[0].content_type,
            Some("text/plain;charset=utf-8".to_string())
        );
        assert!(requests[0]
            .query
            .contains(&("action".to_string(), "create".to_string())));

        let body: serde_json::Value =
            serde_json::from_str(&requests[0].body).expect("body should be JSON");
        assert_eq!(body["date"], "2025-06-15");
        assert_eq!(body["curr"], "CHF");
        assert_eq!(body["valueChf"], -50.0);
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn delete_sends_id_in_query_with_empty_body() {
        let (base_url, received) = spawn_test_server(r#"{"status":"ok"}"#).await;
        let client = ApiClient::new(base_url, Credential::ApiKey("secret".to_string()));

        client.delete(42).await.expect("delete should succeed");

        let requests = received.lock().unwrap();
        assert!(requests[0]
            .query
            .contains(&("action".to_string(), "delete".to_string())));
        assert!(requests[0]
            .query
            .contains(&("id".to_string(), "42".to_string())));
        assert_eq!(requests[0].body, "{}");
    }

    #[tokio::test]
    async fn error_envelope_surfaces_server_message() {
        let (base_url, _) =
            spawn_test_server(r#"{"status":"error","message":"sheet is locked"}"#).await;
        let client = ApiClient::new(base_url, Credential::ApiKey("secret".to_string()));

        let result = client.delete(1).await;

        assert_eq!(result, Err(Error::Api("sheet is locked".to_string())));
    }

    #[tokio::test]
    async fn ok_list_without_data_is_an_error() {
        let (base_url, _) = spawn_test_server(r#"{"status":"ok"}"#).await;
        let client = ApiClient::new(base_url, Credential::ApiKey("secret".to_string()));

        let result = client.list().await;

        assert_eq!(
            result,
            Err(Error::Api("list response contained no data".to_string()))
        );
    }
}
