use crate::network::Network;

/// Credentials controlling which indexer backend serves chain queries.
///
/// A closed set: the gateway never inspects anything else to pick a
/// backend, and adding a backend means adding a variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No API key; queries go to the free public indexer
    Public,
    /// Blockfrost project id
    Blockfrost {
        /// The `project_id` request header value
        project_id: String,
    },
    /// Tangocrypto app id + API key pair
    Tangocrypto {
        /// Path segment identifying the application
        app_id: String,
        /// The `x-api-key` request header value
        api_key: String,
    },
}

/// The indexer backends the gateway can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Free public indexer
    Koios,
    /// Paid indexer keyed by project id
    Blockfrost,
    /// Paid indexer keyed by app id + API key
    Tangocrypto,
}

/// Picks the backend for a set of credentials.
///
/// Pure function: an API key for a paid backend selects that backend,
/// otherwise the free public indexer answers.
pub fn select_backend(credentials: &Credentials) -> Backend {
    match credentials {
        Credentials::Public => Backend::Koios,
        Credentials::Blockfrost { .. } => Backend::Blockfrost,
        Credentials::Tangocrypto { .. } => Backend::Tangocrypto,
    }
}

/// Base URLs for every outbound service, overridable per instance so tests
/// and self-hosted deployments can point elsewhere.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Koios mainnet API base
    pub koios_mainnet: String,
    /// Koios testnet API base
    pub koios_testnet: String,
    /// Blockfrost mainnet API base
    pub blockfrost_mainnet: String,
    /// Blockfrost testnet API base
    pub blockfrost_testnet: String,
    /// Tangocrypto mainnet base; the app id and version are appended
    pub tangocrypto_mainnet: String,
    /// Tangocrypto testnet base; the app id and version are appended
    pub tangocrypto_testnet: String,
    /// ART directory service base
    pub directory: String,
    /// Unstoppable Domains resolution API base
    pub unstoppable: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            koios_mainnet: "https://api.koios.rest/api/v0".into(),
            koios_testnet: "https://testnet.koios.rest/api/v0".into(),
            blockfrost_mainnet: "https://cardano-mainnet.blockfrost.io/api/v0".into(),
            blockfrost_testnet: "https://cardano-testnet.blockfrost.io/api/v0".into(),
            tangocrypto_mainnet: "https://cardano-mainnet.tangocrypto.com".into(),
            tangocrypto_testnet: "https://cardano-testnet.tangocrypto.com".into(),
            directory: "https://app.adanize.com/resources/art/".into(),
            unstoppable: "https://api.unstoppabledomains.com/resolve".into(),
        }
    }
}

/// Typed configuration for a [`crate::ChainGateway`].
///
/// Replaces ad hoc option bags with one validated structure; unspecified
/// fields take the documented defaults.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Which network queries target
    pub network: Network,
    /// Backend-selecting credentials
    pub credentials: Credentials,
    /// Service base URLs
    pub endpoints: Endpoints,
    /// Bearer key for the Unstoppable Domains resolution API
    pub unstoppable_api_key: Option<String>,
    /// Fixed wait before every outbound request, in milliseconds
    pub request_delay_ms: u64,
    /// Hard per-request timeout, in milliseconds
    pub timeout_ms: u64,
}

impl GatewayConfig {
    /// Creates a configuration for the given network with public
    /// credentials and default endpoints.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            credentials: Credentials::Public,
            endpoints: Endpoints::default(),
            unstoppable_api_key: None,
            request_delay_ms: 300,
            timeout_ms: 10_000,
        }
    }

    /// Sets the backend credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Overrides the service endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the Unstoppable Domains API key.
    pub fn with_unstoppable_api_key(mut self, key: impl Into<String>) -> Self {
        self.unstoppable_api_key = Some(key.into());
        self
    }

    /// Sets the fixed pre-request delay.
    pub fn with_request_delay_ms(mut self, ms: u64) -> Self {
        self.request_delay_ms = ms;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// The backend implied by the configured credentials.
    pub fn backend(&self) -> Backend {
        select_backend(&self.credentials)
    }

    /// Checks that every configured endpoint parses as a URL.
    pub fn validate(&self) -> resolvd_error::Result<()> {
        let endpoints = [
            &self.endpoints.koios_mainnet,
            &self.endpoints.koios_testnet,
            &self.endpoints.blockfrost_mainnet,
            &self.endpoints.blockfrost_testnet,
            &self.endpoints.tangocrypto_mainnet,
            &self.endpoints.tangocrypto_testnet,
            &self.endpoints.directory,
            &self.endpoints.unstoppable,
        ];
        for endpoint in endpoints {
            url::Url::parse(endpoint).map_err(|err| {
                resolvd_error::Error::Http(format!("invalid endpoint {endpoint}: {err}"))
            })?;
        }
        Ok(())
    }

    pub(crate) fn koios_base(&self) -> &str {
        match self.network {
            Network::Mainnet => &self.endpoints.koios_mainnet,
            Network::Testnet => &self.endpoints.koios_testnet,
        }
    }

    pub(crate) fn blockfrost_base(&self) -> &str {
        match self.network {
            Network::Mainnet => &self.endpoints.blockfrost_mainnet,
            Network::Testnet => &self.endpoints.blockfrost_testnet,
        }
    }

    pub(crate) fn tangocrypto_base(&self, app_id: &str) -> String {
        let host = match self.network {
            Network::Mainnet => &self.endpoints.tangocrypto_mainnet,
            Network::Testnet => &self.endpoints.tangocrypto_testnet,
        };
        format!("{host}/{app_id}/v1")
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(Network::Mainnet)
    }
}
