//! Provider facade
//!
//! [`MayarProvider`] owns the configuration and the adapter, and hands out
//! resource services bound to that adapter through a [`ResourceRegistry`].
//!
//! ```no_run
//! use mayar_core::{MayarProvider, ProviderConfig};
//! use serde_json::json;
//!
//! # async fn example() -> mayar_core::Result<()> {
//! let provider = MayarProvider::new(ProviderConfig::new().with_api_token("token").production(false))?;
//! let response = provider.customer()?.list(&json!({"page": 1, "pageSize": 10})).await;
//! println!("{}", response);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::{ApiVersion, ProviderConfig};
use crate::http::{Headers, HttpAdapter, RequestPayload, ReqwestAdapter, ResponseNormalizer};
use crate::registry::{Resource, ResourceRegistry, ResourceService};
use crate::response::ApiResponse;
use crate::services::{
    CustomerService, DiscountCouponService, InstallmentService, InvoiceService, ProductService,
    RequestPaymentService, SaasLicenseService, ServiceClient, SoftwareLicenseService, TransactionService,
    WebhookService,
};
use crate::{Error, Result};

/// Entry point to the Mayar API
pub struct MayarProvider {
    config: ProviderConfig,
    client: ServiceClient,
    registry: ResourceRegistry,
}

impl MayarProvider {
    /// Build a provider with the reqwest adapter
    ///
    /// Without an API token requests are sent unauthenticated.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.api_token.as_deref() == Some("") {
            return Err(Error::configuration("API Token cannot be empty!"));
        }
        let adapter = build_adapter(&config)?;
        Self::with_adapter(config, adapter)
    }

    /// Build a provider around any adapter
    pub fn with_adapter(config: ProviderConfig, adapter: Arc<dyn HttpAdapter>) -> Result<Self> {
        Self::with_registry(config, adapter, ResourceRegistry::standard())
    }

    /// Build a provider with a custom registry
    pub fn with_registry(
        config: ProviderConfig,
        adapter: Arc<dyn HttpAdapter>,
        registry: ResourceRegistry,
    ) -> Result<Self> {
        let client = ServiceClient::new(adapter);
        registry.validate(&client)?;

        debug!(version = %config.version, production = config.is_production, "Provider ready");
        Ok(Self {
            config,
            client,
            registry,
        })
    }

    /// Build from `MAYAR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ProviderConfig::from_env()?)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn version(&self) -> ApiVersion {
        self.config.version
    }

    pub fn is_production(&self) -> bool {
        self.config.is_production
    }

    pub fn webhook_token(&self) -> Option<&str> {
        self.config.webhook_token.as_deref()
    }

    pub fn set_webhook_token(&mut self, token: impl Into<String>) {
        self.config.webhook_token = Some(token.into());
    }

    /// Replace the API token and rebuild the adapter with bearer auth
    pub fn set_api_token(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::configuration("API Token cannot be empty!"));
        }
        self.config.api_token = Some(token);
        self.rebuild_adapter()
    }

    /// Switch between production and sandbox hosts
    ///
    /// The reqwest adapter is rebuilt, replacing any injected adapter.
    pub fn set_production(&mut self, is_production: bool) -> Result<()> {
        self.config.is_production = is_production;
        self.rebuild_adapter()
    }

    pub fn set_version(&mut self, version: ApiVersion) {
        self.config.version = version;
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Resources available in the configured version
    pub fn resources(&self) -> Vec<Resource> {
        self.registry.resources(self.config.version)
    }

    /// Resolve a service by name for the configured version
    pub fn service(&self, name: &str) -> Result<ResourceService> {
        self.registry.resolve(self.config.version, name, self.client.clone())
    }

    /// Send one request to an arbitrary path and normalize the outcome
    ///
    /// Fails only for an unsupported verb; every other outcome is an envelope.
    pub async fn request(&self, verb: &str, path: &str, payload: RequestPayload) -> Result<ApiResponse> {
        match self
            .client
            .adapter()
            .request_with_verb(verb, path, payload, &Headers::new())
            .await
        {
            Ok(response) => Ok(ResponseNormalizer::normalize_raw(&response, None)),
            Err(Error::Transport(error)) => Ok(ResponseNormalizer::normalize_transport_error(&error)),
            Err(error) => Err(error),
        }
    }

    /// [`request`](Self::request) with a JSON value tagged by encoding
    pub async fn request_value(&self, verb: &str, path: &str, payload: Value) -> Result<ApiResponse> {
        self.request(verb, path, RequestPayload::from_value(payload)).await
    }

    fn build(&self, resource: Resource) -> Result<ResourceService> {
        self.registry.build(self.config.version, resource, self.client.clone())
    }

    fn rebuild_adapter(&mut self) -> Result<()> {
        self.client = ServiceClient::new(build_adapter(&self.config)?);
        Ok(())
    }
}

fn build_adapter(config: &ProviderConfig) -> Result<Arc<dyn HttpAdapter>> {
    let adapter = ReqwestAdapter::with_token(&config.http_config(), config.api_token.as_deref())?;
    Ok(Arc::new(adapter))
}

macro_rules! service_shortcuts {
    ($($method:ident => $variant:ident($service:ty)),* $(,)?) => {
        impl MayarProvider {
            $(
                #[doc = concat!("The `", stringify!($variant), "` service for the configured version")]
                pub fn $method(&self) -> Result<$service> {
                    match self.build(Resource::$variant)? {
                        ResourceService::$variant(service) => Ok(service),
                        other => Err(Error::configuration(format!(
                            "Registry returned a {} service for {}",
                            other.resource(),
                            Resource::$variant
                        ))),
                    }
                }
            )*
        }
    };
}

service_shortcuts! {
    customer => Customer(CustomerService),
    discount_coupon => DiscountCoupon(DiscountCouponService),
    installment => Installment(InstallmentService),
    invoice => Invoice(InvoiceService),
    product => Product(ProductService),
    request_payment => RequestPayment(RequestPaymentService),
    saas_license => SaasLicense(SaasLicenseService),
    software_license => SoftwareLicense(SoftwareLicenseService),
    transaction => Transaction(TransactionService),
    webhook => Webhook(WebhookService),
}

impl std::fmt::Debug for MayarProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MayarProvider")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "blocking")]
impl MayarProvider {
    /// Synchronous [`request`](Self::request); creates a runtime internally
    pub fn request_sync(&self, verb: &str, path: &str, payload: RequestPayload) -> Result<ApiResponse> {
        crate::blocking::block_on(self.request(verb, path, payload))?
    }
}
