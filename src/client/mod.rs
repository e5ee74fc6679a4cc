//! Orchestrator for the Parcel DE Shipping API.
//!
//! [`BusinessShipment`] holds the account, global label settings and a batch
//! of [`Shipment`]s. Each operation builds its request, hands it to the
//! injected [`Transport`] and normalizes the reply into a [`Response`].
//!
//! Operations never return `Err`: failures (too many records, transport
//! errors, undecodable replies) are recorded in [`BusinessShipment::errors`]
//! and the call returns a degenerate response instead.
//!
//! # Example
//!
//! ```
//! use versand::client::{BusinessShipment, Environment, HttpRequest, HttpResponse};
//! use versand::core::*;
//! use versand::response::StatusCode;
//! use versand::TransportError;
//!
//! let transport = |_: &HttpRequest| -> Result<HttpResponse, TransportError> {
//!     Ok(HttpResponse::new(200, r#"{"status":{"statusCode":200,"title":"OK"},
//!         "items":[{"shipmentNo":"0034043333301020000003873","sstatus":{"statusCode":200,"title":"OK"}}]}"#))
//! };
//! let credentials = Credentials::new("user", "password", "3333333333", "api-key");
//! let mut client = BusinessShipment::new(credentials, Environment::Sandbox, transport);
//!
//! let address = AddressBuilder::new("53113", "Bonn").street("Sträßchensweg", "10").country("DEU").build();
//! let shipper = Shipper::new(SendPersonBuilder::new("Versand GmbH", address.clone()).build());
//! let consignee = SendPersonBuilder::new("Erika Musterfrau", address).build();
//! let billing = client.credentials().billing_number(Product::V01Pak, "01");
//! client.add_shipment(ShipmentBuilder::new(billing, shipper, consignee).build());
//!
//! let response = client.create_shipment();
//! assert_eq!(response.status_code(), StatusCode::NoError);
//! assert_eq!(response.shipment_number(), Some("0034043333301020000003873"));
//! ```

#[cfg(feature = "blocking")]
mod blocking;
mod http;

#[cfg(feature = "blocking")]
pub use blocking::ReqwestTransport;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::core::{Credentials, LabelFormat, Shipment, ShipmentWire, VersandError};
use crate::response::Response;

/// Most shipments or shipment numbers the API accepts per call.
pub const MAX_REQUEST_RECORDS: usize = 30;

/// Profile used when none is configured.
pub const DEFAULT_PROFILE: &str = "STANDARD_GRUPPENPROFIL";

const SANDBOX_URL: &str = "https://api-sandbox.dhl.com/parcel/de/shipping/v2/";
const PRODUCTION_URL: &str = "https://api-eu.dhl.com/parcel/de/shipping/v2/";

/// Which API installation requests go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
    /// Any other base URL, e.g. a proxy or a mock server.
    Custom(String),
}

impl Environment {
    pub fn base_url(&self) -> &str {
        match self {
            Self::Sandbox => SANDBOX_URL,
            Self::Production => PRODUCTION_URL,
            Self::Custom(url) => url,
        }
    }

    pub fn is_sandbox(&self) -> bool {
        matches!(self, Self::Sandbox)
    }
}

/// Body of create, validate and update requests.
#[derive(Debug, Serialize)]
pub struct ShipmentOrderRequest<'a> {
    profile: &'a str,
    shipments: Vec<ShipmentWire<'a>>,
}

/// Body of a manifest request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRequest<'a> {
    profile: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    shipment_numbers: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing_number: Option<&'a str>,
}

/// Client for one account, holding a batch of shipments.
///
/// Registered shipments stay in the batch after a request; call
/// [`clear_shipments`](Self::clear_shipments) before building the next one.
/// An instance is meant for one request sequence at a time.
#[derive(Debug)]
pub struct BusinessShipment<T> {
    transport: T,
    credentials: Credentials,
    environment: Environment,
    profile: String,
    print_only_if_receiver_is_valid: bool,
    label_format: LabelFormat,
    shipments: Vec<Shipment>,
    errors: Vec<VersandError>,
}

impl<T: Transport> BusinessShipment<T> {
    /// Create a client. In the sandbox the account number is replaced by the
    /// public test account; user, password and API key are kept.
    pub fn new(credentials: Credentials, environment: Environment, transport: T) -> Self {
        let credentials = if environment.is_sandbox() {
            let mut sandbox = Credentials::sandbox();
            sandbox.set_user(credentials.user());
            sandbox.set_password(credentials.password());
            sandbox.set_api_key(credentials.api_key());
            sandbox
        } else {
            credentials
        };

        Self {
            transport,
            credentials,
            environment,
            profile: DEFAULT_PROFILE.to_string(),
            print_only_if_receiver_is_valid: false,
            label_format: LabelFormat::default(),
            shipments: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Profile (Gruppenprofil) from the business portal, at most 30 characters.
    pub fn set_profile(&mut self, profile: impl Into<String>) {
        self.profile = profile.into();
    }

    pub fn label_format(&self) -> &LabelFormat {
        &self.label_format
    }

    pub fn set_label_format(&mut self, label_format: LabelFormat) {
        self.label_format = label_format;
    }

    pub fn print_only_if_receiver_is_valid(&self) -> bool {
        self.print_only_if_receiver_is_valid
    }

    /// Only print a label when the consignee address passes DHL's check
    /// (`mustEncode`).
    pub fn set_print_only_if_receiver_is_valid(&mut self, enabled: bool) {
        self.print_only_if_receiver_is_valid = enabled;
    }

    pub fn add_shipment(&mut self, shipment: Shipment) {
        self.shipments.push(shipment);
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn count_shipments(&self) -> usize {
        self.shipments.len()
    }

    pub fn clear_shipments(&mut self) {
        self.shipments.clear();
    }

    /// Errors recorded since the last [`clear_errors`](Self::clear_errors).
    pub fn errors(&self) -> &[VersandError] {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    fn record(&mut self, error: VersandError) {
        warn!(error = %error, "recorded error");
        self.errors.push(error);
    }

    /// Record a [`VersandError::RequestLimit`] when `count` exceeds the API
    /// limit. The request is still sent.
    pub fn check_request_count(&mut self, count: usize, action: &str) {
        if count > MAX_REQUEST_RECORDS {
            self.record(VersandError::RequestLimit {
                action: action.to_string(),
                max: MAX_REQUEST_RECORDS,
                count,
            });
        }
    }

    // --- operations ---

    /// Create shipment orders for every registered shipment.
    #[instrument(skip_all, fields(shipments = self.shipments.len()))]
    pub fn create_shipment(&mut self) -> Response {
        self.check_request_count(self.shipments.len(), "createShipment");
        let request = self.build_shipment_order(false);
        self.dispatch(request)
    }

    /// Let the API validate the registered shipments without creating them.
    #[instrument(skip_all, fields(shipments = self.shipments.len()))]
    pub fn validate_shipment(&mut self) -> Response {
        self.check_request_count(self.shipments.len(), "validateShipment");
        let request = self.build_shipment_order(true);
        self.dispatch(request)
    }

    /// Replace an existing order with the single registered shipment.
    #[instrument(skip_all, fields(shipment_number = %shipment_number))]
    pub fn update_shipment_order(&mut self, shipment_number: &str) -> Response {
        let count = self.shipments.len();
        self.check_request_count(count, "updateShipmentOrder");
        if count != 1 {
            let error = VersandError::SingleOperationOnly {
                action: "updateShipmentOrder".to_string(),
                count,
            };
            let response = Response::from_error(&error);
            self.record(error);
            return response;
        }
        let request = self.build_update_shipment_order(shipment_number);
        self.dispatch(request)
    }

    /// Cancel shipments by number.
    #[instrument(skip_all, fields(count = shipment_numbers.len()))]
    pub fn delete_shipment<S: AsRef<str>>(&mut self, shipment_numbers: &[S]) -> Response {
        self.check_request_count(shipment_numbers.len(), "deleteShipment");
        let request = self.build_delete_shipment(shipment_numbers);
        self.dispatch(request)
    }

    /// Fetch the labels of existing shipments again.
    #[instrument(skip_all, fields(count = shipment_numbers.len()))]
    pub fn get_shipment_label<S: AsRef<str>>(&mut self, shipment_numbers: &[S]) -> Response {
        self.check_request_count(shipment_numbers.len(), "getShipmentLabel");
        let request = self.build_get_shipment_label(shipment_numbers);
        self.dispatch(request)
    }

    /// Download a label document by the token of its URL. Returns `None`
    /// (and records the error) when the download fails.
    #[instrument(skip_all)]
    pub fn get_label(&mut self, token: &str) -> Option<Vec<u8>> {
        let reply = self
            .build_get_label(token)
            .and_then(|request| self.send(&request));
        match reply {
            Ok(reply) if reply.is_success() => Some(reply.body),
            Ok(reply) => {
                self.record(VersandError::HttpStatus(reply.status));
                None
            }
            Err(e) => {
                self.record(e);
                None
            }
        }
    }

    /// Close out shipments for the day. Without numbers, every open
    /// shipment is manifested.
    #[instrument(skip_all, fields(count = shipment_numbers.len()))]
    pub fn do_manifest<S: AsRef<str>>(
        &mut self,
        shipment_numbers: &[S],
        billing_number: Option<&str>,
    ) -> Response {
        self.check_request_count(shipment_numbers.len(), "doManifest");
        let request = self.build_do_manifest(shipment_numbers, billing_number);
        self.dispatch(request)
    }

    /// Fetch the manifest of a day.
    #[instrument(skip_all, fields(date = %date))]
    pub fn get_manifest(&mut self, date: NaiveDate, billing_number: Option<&str>) -> Response {
        let request = self.build_get_manifest(date, billing_number);
        self.dispatch(request)
    }

    // --- request building ---

    /// Payload of create, validate and update requests.
    pub fn shipment_order_payload(&self) -> ShipmentOrderRequest<'_> {
        ShipmentOrderRequest {
            profile: &self.profile,
            shipments: self.shipments.iter().map(Shipment::to_wire).collect(),
        }
    }

    /// `POST orders` for the registered shipments; `validate` only checks them.
    pub fn build_shipment_order(&self, validate: bool) -> Result<HttpRequest, VersandError> {
        let mut query = vec![
            ("validate", bool_str(validate).to_string()),
            ("mustEncode", bool_str(self.print_only_if_receiver_is_valid).to_string()),
        ];
        query.extend(self.label_query());
        let url = self.endpoint("orders", &query)?;
        let body = self.json_body(&self.shipment_order_payload())?;
        Ok(self.request(HttpMethod::Post, url, Some(body), "application/json"))
    }

    /// `PUT orders?shipment=<number>` with the single registered shipment.
    pub fn build_update_shipment_order(
        &self,
        shipment_number: &str,
    ) -> Result<HttpRequest, VersandError> {
        let mut query = vec![
            ("shipment", shipment_number.to_string()),
            ("mustEncode", bool_str(self.print_only_if_receiver_is_valid).to_string()),
        ];
        query.extend(self.label_query());
        let url = self.endpoint("orders", &query)?;
        let body = self.json_body(&self.shipment_order_payload())?;
        Ok(self.request(HttpMethod::Put, url, Some(body), "application/json"))
    }

    pub fn build_delete_shipment<S: AsRef<str>>(
        &self,
        shipment_numbers: &[S],
    ) -> Result<HttpRequest, VersandError> {
        let url = self.endpoint("orders", &self.numbers_query(shipment_numbers))?;
        Ok(self.request(HttpMethod::Delete, url, None, "application/json"))
    }

    pub fn build_get_shipment_label<S: AsRef<str>>(
        &self,
        shipment_numbers: &[S],
    ) -> Result<HttpRequest, VersandError> {
        let mut query = self.numbers_query(shipment_numbers);
        query.extend(self.label_query());
        let url = self.endpoint("orders", &query)?;
        Ok(self.request(HttpMethod::Get, url, None, "application/json"))
    }

    /// The token is sent as taken from the label URL, already
    /// percent-encoded.
    pub fn build_get_label(&self, token: &str) -> Result<HttpRequest, VersandError> {
        let mut url = self.resolve("labels")?;
        url.set_query(Some(&format!("token={token}")));
        Ok(self.request(HttpMethod::Get, url.into(), None, "application/pdf"))
    }

    pub fn build_do_manifest<S: AsRef<str>>(
        &self,
        shipment_numbers: &[S],
        billing_number: Option<&str>,
    ) -> Result<HttpRequest, VersandError> {
        let query = if shipment_numbers.is_empty() {
            vec![("all", "true".to_string())]
        } else {
            Vec::new()
        };
        let url = self.endpoint("manifests", &query)?;
        let payload = ManifestRequest {
            profile: &self.profile,
            shipment_numbers: shipment_numbers.iter().map(AsRef::as_ref).collect(),
            billing_number,
        };
        let body = self.json_body(&payload)?;
        Ok(self.request(HttpMethod::Post, url, Some(body), "application/json"))
    }

    pub fn build_get_manifest(
        &self,
        date: NaiveDate,
        billing_number: Option<&str>,
    ) -> Result<HttpRequest, VersandError> {
        let mut query = vec![
            ("date", date.format("%Y-%m-%d").to_string()),
            (
                "includeDocs",
                self.label_format.response_type.include_docs().to_string(),
            ),
        ];
        if let Some(billing_number) = billing_number {
            query.push(("billingNumber", billing_number.to_string()));
        }
        let url = self.endpoint("manifests", &query)?;
        Ok(self.request(HttpMethod::Get, url, None, "application/json"))
    }

    /// Decode a reply and reconcile its status.
    pub fn parse_response(reply: &HttpResponse) -> Result<Response, VersandError> {
        let mut response = Response::from_slice(&reply.body)?;
        response.validate_status_code();
        Ok(response)
    }

    fn label_query(&self) -> Vec<(&'static str, String)> {
        self.label_format
            .query_pairs()
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect()
    }

    fn numbers_query<S: AsRef<str>>(&self, shipment_numbers: &[S]) -> Vec<(&'static str, String)> {
        let mut query = vec![("profile", self.profile.clone())];
        query.extend(
            shipment_numbers
                .iter()
                .map(|n| ("shipment", n.as_ref().to_string())),
        );
        query
    }

    fn resolve(&self, path: &str) -> Result<Url, VersandError> {
        let mut base = self.environment.base_url().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|base| base.join(path))
            .map_err(|e| VersandError::Url(e.to_string()))
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<String, VersandError> {
        let mut url = self.resolve(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    fn json_body<P: Serialize>(&self, payload: &P) -> Result<String, VersandError> {
        serde_json::to_string(payload).map_err(|e| VersandError::Serialization(e.to_string()))
    }

    fn request(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<String>,
        accept: &str,
    ) -> HttpRequest {
        let credentials = format!("{}:{}", self.credentials.user(), self.credentials.password());
        let mut headers = vec![
            ("Authorization".to_string(), format!("Basic {}", STANDARD.encode(credentials))),
            ("dhl-api-key".to_string(), self.credentials.api_key().to_string()),
            ("Accept".to_string(), accept.to_string()),
            ("Accept-Language".to_string(), "de-DE".to_string()),
        ];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    // --- execution ---

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, VersandError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let reply = self.transport.send(request)?;
        debug!(status = reply.status, bytes = reply.body.len(), "reply received");
        Ok(reply)
    }

    fn dispatch(&mut self, request: Result<HttpRequest, VersandError>) -> Response {
        let result = request
            .and_then(|request| self.send(&request))
            .and_then(|reply| match Self::parse_response(&reply) {
                Err(error) if !reply.is_success() => {
                    self.record(VersandError::HttpStatus(reply.status));
                    Err(error)
                }
                parsed => parsed,
            });
        match result {
            Ok(response) => response,
            Err(error) => {
                let response = Response::from_error(&error);
                self.record(error);
                response
            }
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
