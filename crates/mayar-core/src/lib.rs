//! Mayar Core - client library for the Mayar headless payment API
//!
//! This crate authenticates requests, dispatches them to versioned REST
//! endpoints, validates payloads before sending and normalizes every outcome
//! into one [`ApiResponse`] envelope.
//!
//! # Main Components
//!
//! - **Validation**: pre-flight payload checks returning [`ValidationError`]
//! - **HTTP**: auth headers, the [`HttpAdapter`] trait and its reqwest implementation
//! - **Normalization**: [`ResponseNormalizer`] turning bodies and failures into envelopes
//! - **Services**: one service per resource type
//! - **Provider**: [`MayarProvider`] facade with an explicit [`ResourceRegistry`]
//!
//! # Example
//!
//! ```no_run
//! use mayar_core::{MayarProvider, ProviderConfig, Result};
//!
//! async fn example() -> Result<()> {
//!     let provider = MayarProvider::new(ProviderConfig::from_env()?)?;
//!     let balance = provider.transaction()?.balance().await;
//!     if balance.is_success() {
//!         println!("{}", balance.data());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod registry;
pub mod response;
pub mod services;
pub mod validation;

#[cfg(feature = "blocking")]
pub mod blocking;

// Re-export main types for convenience
pub use config::{ApiVersion, ProviderConfig};
pub use error::{Error, Result};
pub use http::{
    Environment, HttpAdapter, HttpMethod, RawResponse, RequestPayload, ReqwestAdapter, ResponseNormalizer,
    TransportError,
};
pub use provider::MayarProvider;
pub use registry::{Resource, ResourceRegistry, ResourceService};
pub use response::{ApiResponse, Pagination};
pub use services::{
    CustomerService, DiscountCouponService, InstallmentService, InvoiceService, ProductService,
    RequestPaymentService, SaasLicenseService, ServiceClient, SoftwareLicenseService, TransactionService,
    WebhookService,
};
pub use validation::{ValidationError, ValidationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
