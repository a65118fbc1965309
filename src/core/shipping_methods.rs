use crate::core::api_root::ApiRoot;
use crate::domain::model::{ShippingMethod, ShippingMethodPagedQueryResponse};
use crate::domain::ports::ShippingMethodLookup;
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use std::sync::Arc;

const ZONE_RATES_EXPANSION: &str = "zoneRates[*].zone";

/// Shipping method queries forwarded to the platform through a shared [`ApiRoot`].
#[derive(Debug, Clone)]
pub struct ShippingMethodsService {
    api_root: Arc<ApiRoot>,
}

impl ShippingMethodsService {
    pub fn new(api_root: Arc<ApiRoot>) -> Self {
        Self { api_root }
    }

    pub async fn get_all_shipping_methods(&self) -> Result<ShippingMethodPagedQueryResponse> {
        let response = self
            .api_root
            .shipping_methods()
            .get()
            .query_arg("expand", ZONE_RATES_EXPANSION)
            .execute()
            .await?;
        Ok(response.body)
    }

    pub async fn get_shipping_method_by_key(&self, key: &str) -> Result<ShippingMethod> {
        let response = self
            .api_root
            .shipping_methods()
            .with_key(key)
            .get()
            .execute()
            .await?;
        Ok(response.body)
    }

    pub async fn check_shipping_method_exists(&self, key: &str) -> Result<()> {
        let result = self
            .api_root
            .shipping_methods()
            .with_key(key)
            .head()
            .execute()
            .await;

        match result {
            Ok(response) => Ok(response.body),
            Err(LookupError::Sdk {
                status_code: 404, ..
            }) => {
                tracing::debug!("Shipping method '{}' not found", key);
                Err(LookupError::not_found(key))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get_shipping_methods_by_location(
        &self,
        country_code: &str,
    ) -> Result<ShippingMethodPagedQueryResponse> {
        let response = self
            .api_root
            .shipping_methods()
            .matching_location()
            .get()
            .query_arg("country", country_code)
            .execute()
            .await?;
        Ok(response.body)
    }

    pub async fn get_matching_shipping_methods(
        &self,
        store_key: &str,
        cart_id: &str,
    ) -> Result<ShippingMethodPagedQueryResponse> {
        let response = self
            .api_root
            .in_store_key_with_store_key_value(store_key)
            .shipping_methods()
            .matching_cart()
            .get()
            .query_arg("cartId", cart_id)
            .execute()
            .await?;
        Ok(response.body)
    }
}

#[async_trait]
impl ShippingMethodLookup for ShippingMethodsService {
    async fn get_all_shipping_methods(&self) -> Result<ShippingMethodPagedQueryResponse> {
        ShippingMethodsService::get_all_shipping_methods(self).await
    }

    async fn get_shipping_method_by_key(&self, key: &str) -> Result<ShippingMethod> {
        ShippingMethodsService::get_shipping_method_by_key(self, key).await
    }

    async fn check_shipping_method_exists(&self, key: &str) -> Result<()> {
        ShippingMethodsService::check_shipping_method_exists(self, key).await
    }

    async fn get_shipping_methods_by_location(
        &self,
        country_code: &str,
    ) -> Result<ShippingMethodPagedQueryResponse> {
        ShippingMethodsService::get_shipping_methods_by_location(self, country_code).await
    }

    async fn get_matching_shipping_methods(
        &self,
        store_key: &str,
        cart_id: &str,
    ) -> Result<ShippingMethodPagedQueryResponse> {
        ShippingMethodsService::get_matching_shipping_methods(self, store_key, cart_id).await
    }
}
