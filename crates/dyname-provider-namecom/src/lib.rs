// # name.com Registrar Client
//
// This crate provides the name.com API v4 registrar implementation for dyname.
//
// ## Behavior
//
// - HTTP basic auth (username + API key) on every request
// - Lists are fetched page by page (1000 items per page) and aggregated
// - One PUT per record update, carrying the full record
// - Dry-run mode: all GET requests are made, the PUT is logged and skipped
// - NO retry logic: every failure propagates and aborts the run
//
// ## Security Requirements
//
// - API key NEVER appears in logs or Debug output
// - Client MUST fail fast if username or API key is empty
//
// ## API Reference
//
// - List Domains: GET `/v4/domains?perPage=...&page=...`
// - List Records: GET `/v4/domains/:domainName/records?perPage=...&page=...`
// - Update Record: PUT `/v4/domains/:domainName/records/:id`

pub mod transport;

#[cfg(test)]
mod test_server;

use async_trait::async_trait;
use dyname_core::json::{self, JsonObject};
use dyname_core::pagination::collect_pages;
use dyname_core::{Domain, DynameConfig, Error, PagedResponse, Record, Registrar, Result};

pub use transport::{ApiRequest, ApiResponse, Credentials, Method, ReqwestTransport, Transport};

/// Production API base URL
pub const NAMECOM_API_BASE: &str = "https://api.name.com";

/// Sandbox API base URL
pub const NAMECOM_TEST_API_BASE: &str = "https://api.dev.name.com";

/// Page size used for every list request
pub const PAGE_SIZE: i32 = 1000;

/// name.com registrar client
///
/// The base URL is chosen once at construction; credentials are fixed for the
/// lifetime of the client. All methods take `&self` and the client can be
/// reused across runs.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API key.
pub struct NameComClient<T: Transport = ReqwestTransport> {
    /// API base URL (production or sandbox)
    base_url: String,

    /// Basic-auth credentials
    credentials: Credentials,

    /// HTTP transport
    transport: T,

    /// Dry-run mode: if true, perform GET requests but skip PUT updates
    dry_run: bool,
}

impl<T: Transport> std::fmt::Debug for NameComClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameComClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl NameComClient<ReqwestTransport> {
    /// Create a new client using the reqwest transport
    ///
    /// # Parameters
    ///
    /// - `test_mode`: use the sandbox host instead of production
    /// - `username`: name.com account username
    /// - `api_key`: name.com API token
    pub fn new(
        test_mode: bool,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Credentials::new(username, api_key)?;
        Ok(Self::with_transport(
            test_mode,
            credentials,
            ReqwestTransport::new()?,
        ))
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &DynameConfig) -> Result<Self> {
        let client = Self::new(config.test_mode, &config.username, &config.api_key)?;
        if config.dry_run {
            tracing::warn!("name.com client running in DRY-RUN mode - no records will be changed");
        }
        Ok(client.with_dry_run(config.dry_run))
    }
}

impl<T: Transport> NameComClient<T> {
    /// Create a client sending its requests through `transport`
    pub fn with_transport(test_mode: bool, credentials: Credentials, transport: T) -> Self {
        Self {
            base_url: if test_mode {
                NAMECOM_TEST_API_BASE
            } else {
                NAMECOM_API_BASE
            }
            .to_string(),
            credentials,
            transport,
            dry_run: false,
        }
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point the client at a local server
    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Fetch one page of the account's domains
    pub async fn fetch_domains_page(&self, per_page: i32, page: i32) -> Result<PagedResponse<Domain>> {
        self.fetch_page("/v4/domains", "domains", per_page, page, Domain::from_json)
            .await
    }

    /// Fetch one page of the records of `domain_name`
    pub async fn fetch_records_page(
        &self,
        domain_name: &str,
        per_page: i32,
        page: i32,
    ) -> Result<PagedResponse<Record>> {
        let path = format!("/v4/domains/{}/records", domain_name);
        self.fetch_page(&path, "records", per_page, page, Record::from_json)
            .await
    }

    /// Issue one GET against a paginated list endpoint
    ///
    /// A response without the collection field is an empty page.
    async fn fetch_page<M>(
        &self,
        path: &str,
        array_key: &str,
        per_page: i32,
        page: i32,
        parse: fn(&JsonObject) -> Result<M>,
    ) -> Result<PagedResponse<M>> {
        let request = ApiRequest::get(
            format!("{}{}", self.base_url, path),
            vec![("perPage", per_page.to_string()), ("page", page.to_string())],
        );

        tracing::debug!("{} (perPage={}, page={})", request.describe(), per_page, page);
        let body = self.send(&request).await?;
        let object = json::parse_object(&body)?;

        PagedResponse::from_json(&object, array_key, parse)
    }

    /// Execute a request and fail on any status >= 400
    async fn send(&self, request: &ApiRequest) -> Result<String> {
        let response = self.transport.execute(request, &self.credentials).await?;

        if response.status >= 400 {
            tracing::trace!("Error response body: {}", response.body);
            return Err(Error::from_status(response.status, request.describe()));
        }

        Ok(response.body)
    }
}

#[async_trait]
impl<T: Transport> Registrar for NameComClient<T> {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        collect_pages(|page| self.fetch_domains_page(PAGE_SIZE, page)).await
    }

    async fn list_records(&self, domain_name: &str) -> Result<Vec<Record>> {
        collect_pages(|page| self.fetch_records_page(domain_name, PAGE_SIZE, page)).await
    }

    async fn update_record(&self, record: &Record) -> Result<()> {
        let request = ApiRequest::put(
            format!(
                "{}/v4/domains/{}/records/{}",
                self.base_url,
                record.domain_name(),
                record.id()
            ),
            record.to_json(),
        );

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send {} with payload: {}",
                request.describe(),
                record.to_json()
            );
            return Ok(());
        }

        tracing::debug!("{}", request.describe());
        tracing::trace!("Payload: {}", record.to_json());
        self.send(&request).await?;
        Ok(())
    }

    fn registrar_name(&self) -> &'static str {
        "name.com"
    }
}
