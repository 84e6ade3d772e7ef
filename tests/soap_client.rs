//! Tests for the SOAP pricing client against a local stub endpoint.
//!
//! These tests exercise the production client end-to-end: envelope on the
//! wire, Basic authentication, status classification, and defensive response
//! parsing, without touching the real provider.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

use shipping_table::catalog::ServiceTier;
use shipping_table::client::{Dimensions, PricingClient, QuoteRequest, SoapPricingClient};
use shipping_table::error_handling::QuoteError;

const QUOTE_OK: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body>
    <ns1:calcularFreteResponse>
      <CodigoProc>1</CodigoProc>
      <DadosFrete>
        <ValorServico>11,08</ValorServico>
        <Prazo>4</Prazo>
      </DadosFrete>
    </ns1:calcularFreteResponse>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

const QUOTE_DECLINED: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body>
    <ns1:calcularFreteResponse>
      <CodigoProc>0</CodigoProc>
    </ns1:calcularFreteResponse>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

/// One request as seen by the stub endpoint.
#[derive(Debug, Clone)]
struct RecordedRequest {
    authorization: Option<String>,
    body: String,
}

struct StubEndpoint {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubEndpoint {
    fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a stub endpoint that answers every POST with a canned response.
async fn start_endpoint(status: StatusCode, response_body: &'static str) -> StubEndpoint {
    let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new().route(
        "/",
        post({
            let requests = Arc::clone(&requests);
            move |headers: HeaderMap, body: String| async move {
                let authorization = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                requests
                    .lock()
                    .unwrap()
                    .push(RecordedRequest {
                        authorization,
                        body,
                    });
                (status, response_body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");
    let url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    StubEndpoint { url, requests }
}

fn client_for(endpoint: &StubEndpoint) -> SoapPricingClient {
    SoapPricingClient::new(
        Arc::new(reqwest::Client::new()),
        endpoint.url.clone(),
        "user",
        "secret",
    )
}

fn request(tier: ServiceTier) -> QuoteRequest {
    QuoteRequest {
        tier,
        destination: 1_000_001,
        weight_grams: 1_500,
        declared_value: 0.0,
        dimensions: Dimensions {
            height_cm: 10,
            width_cm: 15,
            depth_cm: 20,
        },
    }
}

#[tokio::test]
async fn quote_parses_a_successful_response() {
    let endpoint = start_endpoint(StatusCode::OK, QUOTE_OK).await;
    let client = client_for(&endpoint);

    let quote = client
        .quote(&request(ServiceTier::Standard))
        .await
        .expect("quote should succeed");

    assert_eq!(quote.money_cost, 11.08);
    assert_eq!(quote.time_days, 4);
}

#[tokio::test]
async fn quote_sends_the_expected_envelope_and_credentials() {
    let endpoint = start_endpoint(StatusCode::OK, QUOTE_OK).await;
    let client = client_for(&endpoint);

    client
        .quote(&request(ServiceTier::Express))
        .await
        .expect("quote should succeed");

    let recorded = endpoint.recorded();
    assert_eq!(recorded.len(), 1);

    let auth = recorded[0]
        .authorization
        .as_deref()
        .expect("request should carry Basic authentication");
    assert!(auth.starts_with("Basic "), "unexpected auth header: {}", auth);

    let body = &recorded[0].body;
    assert!(body.contains("<calcularFrete>"));
    assert!(body.contains("<TipoServico>EXP</TipoServico>"));
    assert!(body.contains("<CepDestino>01000001</CepDestino>"));
    assert!(body.contains("<Peso>1,50</Peso>"));
    assert!(body.contains("<ValorDeclarado>0,00</ValorDeclarado>"));
    assert!(body.contains("<Altura>10</Altura>"));
}

#[tokio::test]
async fn rejected_credentials_surface_as_authentication() {
    let endpoint = start_endpoint(StatusCode::UNAUTHORIZED, "denied").await;
    let client = client_for(&endpoint);

    let error = client
        .quote(&request(ServiceTier::Standard))
        .await
        .expect_err("a 401 should fail the quote");

    match error {
        QuoteError::Authentication { status } => assert_eq!(status, 401),
        other => panic!("expected Authentication, got {:?}", other),
    }
    // Authentication failures are not retried
    assert_eq!(endpoint.recorded().len(), 1);
}

#[tokio::test]
async fn server_error_is_transport_and_not_retried() {
    let endpoint = start_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let client = client_for(&endpoint);

    let error = client
        .quote(&request(ServiceTier::Standard))
        .await
        .expect_err("a 500 should fail the quote");

    assert!(matches!(error, QuoteError::Transport(_)));
    // HTTP error statuses are not transient, so only one attempt is made
    assert_eq!(endpoint.recorded().len(), 1);
}

#[tokio::test]
async fn declined_quote_is_malformed_response() {
    let endpoint = start_endpoint(StatusCode::OK, QUOTE_DECLINED).await;
    let client = client_for(&endpoint);

    let error = client
        .quote(&request(ServiceTier::Standard))
        .await
        .expect_err("a declined quote should fail");

    match error {
        QuoteError::MalformedResponse(msg) => {
            assert!(msg.contains("CodigoProc 0"), "unexpected message: {}", msg)
        }
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn connection_failure_is_transient_transport() {
    // Bind a port and drop the listener so nothing answers there
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");
    drop(listener);

    let client = SoapPricingClient::new(
        Arc::new(reqwest::Client::new()),
        format!("http://{}", addr),
        "user",
        "secret",
    );

    let error = client
        .quote(&request(ServiceTier::Standard))
        .await
        .expect_err("a refused connection should fail the quote after the retry");

    assert!(matches!(error, QuoteError::Transport(_)));
    assert!(error.is_transient_transport());
}
