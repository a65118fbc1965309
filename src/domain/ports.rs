use crate::domain::model::{ShippingMethod, ShippingMethodPagedQueryResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only shipping method queries against the commerce platform.
#[async_trait]
pub trait ShippingMethodLookup: Send + Sync {
    async fn get_all_shipping_methods(&self) -> Result<ShippingMethodPagedQueryResponse>;

    async fn get_shipping_method_by_key(&self, key: &str) -> Result<ShippingMethod>;

    /// Resolves with `()` when the key exists, fails with `ObjectNotFound` otherwise.
    async fn check_shipping_method_exists(&self, key: &str) -> Result<()>;

    async fn get_shipping_methods_by_location(
        &self,
        country_code: &str,
    ) -> Result<ShippingMethodPagedQueryResponse>;

    async fn get_matching_shipping_methods(
        &self,
        store_key: &str,
        cart_id: &str,
    ) -> Result<ShippingMethodPagedQueryResponse>;
}
