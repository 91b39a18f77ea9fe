//! Explicit resource registry
//!
//! Maps each [`Resource`] to the factory that builds its service, per
//! [`ApiVersion`]. Lookups of names that are not registered for a version
//! fail with [`Error::UnknownResource`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::config::ApiVersion;
use crate::services::{
    CustomerService, DiscountCouponService, InstallmentService, InvoiceService, ProductService,
    RequestPaymentService, SaasLicenseService, ServiceClient, SoftwareLicenseService, TransactionService,
    WebhookService,
};
use crate::{Error, Result};

/// Resource types exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Customer,
    DiscountCoupon,
    Installment,
    Invoice,
    Product,
    RequestPayment,
    SaasLicense,
    SoftwareLicense,
    Transaction,
    Webhook,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Customer,
        Resource::DiscountCoupon,
        Resource::Installment,
        Resource::Invoice,
        Resource::Product,
        Resource::RequestPayment,
        Resource::SaasLicense,
        Resource::SoftwareLicense,
        Resource::Transaction,
        Resource::Webhook,
    ];

    /// Canonical name used for lookups and listings
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Customer => "customer",
            Resource::DiscountCoupon => "discountCoupon",
            Resource::Installment => "installment",
            Resource::Invoice => "invoices",
            Resource::Product => "products",
            Resource::RequestPayment => "requestPayment",
            Resource::SaasLicense => "saasMembershipLicense",
            Resource::SoftwareLicense => "softwareLicenseCode",
            Resource::Transaction => "transaction",
            Resource::Webhook => "webhookServices",
        }
    }

    /// Resolve a name; case, `_` and `-` are ignored and short aliases accepted
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        let resource = match key.as_str() {
            "customer" | "customers" => Resource::Customer,
            "discountcoupon" | "coupon" | "coupons" => Resource::DiscountCoupon,
            "installment" | "installments" => Resource::Installment,
            "invoice" | "invoices" => Resource::Invoice,
            "product" | "products" => Resource::Product,
            "requestpayment" | "payment" | "payments" => Resource::RequestPayment,
            "saaslicense" | "saasmembershiplicense" => Resource::SaasLicense,
            "softwarelicense" | "softwarelicensecode" => Resource::SoftwareLicense,
            "transaction" | "transactions" => Resource::Transaction,
            "webhook" | "webhooks" | "webhookservices" => Resource::Webhook,
            _ => return None,
        };
        Some(resource)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved service
#[derive(Debug, Clone)]
pub enum ResourceService {
    Customer(CustomerService),
    DiscountCoupon(DiscountCouponService),
    Installment(InstallmentService),
    Invoice(InvoiceService),
    Product(ProductService),
    RequestPayment(RequestPaymentService),
    SaasLicense(SaasLicenseService),
    SoftwareLicense(SoftwareLicenseService),
    Transaction(TransactionService),
    Webhook(WebhookService),
}

impl ResourceService {
    /// Resource this service serves
    pub fn resource(&self) -> Resource {
        match self {
            ResourceService::Customer(_) => Resource::Customer,
            ResourceService::DiscountCoupon(_) => Resource::DiscountCoupon,
            ResourceService::Installment(_) => Resource::Installment,
            ResourceService::Invoice(_) => Resource::Invoice,
            ResourceService::Product(_) => Resource::Product,
            ResourceService::RequestPayment(_) => Resource::RequestPayment,
            ResourceService::SaasLicense(_) => Resource::SaasLicense,
            ResourceService::SoftwareLicense(_) => Resource::SoftwareLicense,
            ResourceService::Transaction(_) => Resource::Transaction,
            ResourceService::Webhook(_) => Resource::Webhook,
        }
    }
}

/// Builds one service from a shared client
pub type ServiceFactory = fn(ServiceClient) -> ResourceService;

/// Resource factories keyed by API version
#[derive(Clone, Default)]
pub struct ResourceRegistry {
    entries: HashMap<ApiVersion, BTreeMap<Resource, ServiceFactory>>,
}

impl ResourceRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every V1 service; V2 has none yet
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let v1: [(Resource, ServiceFactory); 10] = [
            (Resource::Customer, |c| ResourceService::Customer(CustomerService::new(c))),
            (Resource::DiscountCoupon, |c| ResourceService::DiscountCoupon(DiscountCouponService::new(c))),
            (Resource::Installment, |c| ResourceService::Installment(InstallmentService::new(c))),
            (Resource::Invoice, |c| ResourceService::Invoice(InvoiceService::new(c))),
            (Resource::Product, |c| ResourceService::Product(ProductService::new(c))),
            (Resource::RequestPayment, |c| ResourceService::RequestPayment(RequestPaymentService::new(c))),
            (Resource::SaasLicense, |c| ResourceService::SaasLicense(SaasLicenseService::new(c))),
            (Resource::SoftwareLicense, |c| ResourceService::SoftwareLicense(SoftwareLicenseService::new(c))),
            (Resource::Transaction, |c| ResourceService::Transaction(TransactionService::new(c))),
            (Resource::Webhook, |c| ResourceService::Webhook(WebhookService::new(c))),
        ];
        for (resource, factory) in v1 {
            registry.register(ApiVersion::V1, resource, factory);
        }
        registry.entries.entry(ApiVersion::V2).or_default();
        registry
    }

    /// Register or replace a factory
    pub fn register(&mut self, version: ApiVersion, resource: Resource, factory: ServiceFactory) {
        self.entries.entry(version).or_default().insert(resource, factory);
    }

    /// Resources available for a version, in declaration order
    pub fn resources(&self, version: ApiVersion) -> Vec<Resource> {
        self.entries
            .get(&version)
            .map(|factories| factories.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, version: ApiVersion, resource: Resource) -> bool {
        self.entries
            .get(&version)
            .is_some_and(|factories| factories.contains_key(&resource))
    }

    /// Build the service registered for `resource`
    pub fn build(&self, version: ApiVersion, resource: Resource, client: ServiceClient) -> Result<ResourceService> {
        let factory = self
            .entries
            .get(&version)
            .and_then(|factories| factories.get(&resource))
            .ok_or_else(|| Error::UnknownResource {
                name: resource.name().to_string(),
                version: version.to_string(),
            })?;
        Ok(factory(client))
    }

    /// Resolve a name and build its service
    pub fn resolve(&self, version: ApiVersion, name: &str, client: ServiceClient) -> Result<ResourceService> {
        let resource = Resource::from_name(name).ok_or_else(|| Error::UnknownResource {
            name: name.to_string(),
            version: version.to_string(),
        })?;

        self.build(version, resource, client).map_err(|_| Error::UnknownResource {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// Check that every factory builds the service it is registered under
    pub fn validate(&self, client: &ServiceClient) -> Result<()> {
        for (version, factories) in &self.entries {
            for (resource, factory) in factories {
                let built = factory(client.clone()).resource();
                if built != *resource {
                    return Err(Error::configuration(format!(
                        "Registry entry {} for {} builds a {} service",
                        resource, version, built
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for version in ApiVersion::ALL {
            map.entry(&version, &self.resources(version));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingAdapter;
    use serde_json::json;

    fn client() -> ServiceClient {
        RecordingAdapter::replying(json!({})).client()
    }

    #[test]
    fn test_name_resolution() {
        assert_eq!(Resource::from_name("webhookServices"), Some(Resource::Webhook));
        assert_eq!(Resource::from_name("discount_coupon"), Some(Resource::DiscountCoupon));
        assert_eq!(Resource::from_name("SaaSMembershipLicense"), Some(Resource::SaasLicense));
        assert_eq!(Resource::from_name("ledger"), None);

        for resource in Resource::ALL {
            assert_eq!(Resource::from_name(resource.name()), Some(resource));
        }
    }

    #[test]
    fn test_standard_registry() {
        let registry = ResourceRegistry::standard();
        assert_eq!(registry.resources(ApiVersion::V1).len(), 10);
        assert!(registry.resources(ApiVersion::V2).is_empty());
        assert!(registry.validate(&client()).is_ok());
    }

    #[test]
    fn test_resolve() {
        let registry = ResourceRegistry::standard();
        let service = registry.resolve(ApiVersion::V1, "customer", client()).unwrap();
        assert_eq!(service.resource(), Resource::Customer);

        let err = registry.resolve(ApiVersion::V2, "customer", client()).unwrap_err();
        assert_eq!(err.to_string(), "Service customer not found in version V2");

        let err = registry.resolve(ApiVersion::V1, "ledger", client()).unwrap_err();
        assert!(matches!(err, Error::UnknownResource { ref name, .. } if name == "ledger"));
    }

    #[test]
    fn test_validate_detects_mismatched_factory() {
        let mut registry = ResourceRegistry::new();
        registry.register(ApiVersion::V2, Resource::Invoice, |c| {
            ResourceService::Product(ProductService::new(c))
        });
        assert!(matches!(registry.validate(&client()), Err(Error::Configuration { .. })));
    }
}
