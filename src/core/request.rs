use crate::core::api_root::ApiRoot;
use crate::domain::model::{ShippingMethod, ShippingMethodPagedQueryResponse};
use crate::utils::error::Result;
use reqwest::{Method, Response};
use std::future::Future;
use std::marker::PhantomData;
use url::Url;

const SHIPPING_METHODS: &str = "shipping-methods";
const MATCHING_LOCATION: &str = "matching-location";
const MATCHING_CART: &str = "matching-cart";

/// Decodes a successful platform response into the request's result type.
pub trait ResponseBody: Sized {
    fn read(response: Response) -> impl Future<Output = Result<Self>> + Send;
}

impl ResponseBody for () {
    async fn read(_response: Response) -> Result<Self> {
        Ok(())
    }
}

macro_rules! json_response_body {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ResponseBody for $ty {
                async fn read(response: Response) -> Result<Self> {
                    Ok(response.json().await?)
                }
            }
        )*
    };
}

json_response_body!(ShippingMethod, ShippingMethodPagedQueryResponse);

#[derive(Debug, Clone)]
pub struct ClientResponse<T> {
    pub status: u16,
    pub body: T,
}

/// One executable request: verb, resource path and query arguments.
#[must_use = "requests do nothing until `execute` is awaited"]
pub struct ApiRequest<'a, T> {
    root: &'a ApiRoot,
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    _body: PhantomData<fn() -> T>,
}

impl<'a, T: ResponseBody> ApiRequest<'a, T> {
    fn new(root: &'a ApiRoot, method: Method, segments: Vec<String>) -> Self {
        Self {
            root,
            method,
            segments,
            query: Vec::new(),
            _body: PhantomData,
        }
    }

    pub fn query_arg(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> Result<Url> {
        self.root.url_for(&self.segments, &self.query)
    }

    pub async fn execute(self) -> Result<ClientResponse<T>> {
        let response = self
            .root
            .send(self.method, &self.segments, &self.query)
            .await?;
        let status = response.status().as_u16();
        let body = T::read(response).await?;
        Ok(ClientResponse { status, body })
    }
}

struct ResourcePath<'a> {
    root: &'a ApiRoot,
    segments: Vec<String>,
}

impl<'a> ResourcePath<'a> {
    fn child(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    fn request<T: ResponseBody>(self, method: Method) -> ApiRequest<'a, T> {
        ApiRequest::new(self.root, method, self.segments)
    }
}

/// `/{projectKey}/in-store/key={storeKey}`
pub struct InStoreRequestBuilder<'a> {
    path: ResourcePath<'a>,
}

impl<'a> InStoreRequestBuilder<'a> {
    pub(crate) fn new(root: &'a ApiRoot, segments: Vec<String>) -> Self {
        Self {
            path: ResourcePath { root, segments },
        }
    }

    pub fn shipping_methods(self) -> ShippingMethodsRequestBuilder<'a> {
        ShippingMethodsRequestBuilder {
            path: self.path.child(SHIPPING_METHODS),
        }
    }
}

/// `.../shipping-methods`
pub struct ShippingMethodsRequestBuilder<'a> {
    path: ResourcePath<'a>,
}

impl<'a> ShippingMethodsRequestBuilder<'a> {
    pub(crate) fn new(root: &'a ApiRoot, segments: Vec<String>) -> Self {
        Self {
            path: ResourcePath { root, segments }.child(SHIPPING_METHODS),
        }
    }

    pub fn get(self) -> ApiRequest<'a, ShippingMethodPagedQueryResponse> {
        self.path.request(Method::GET)
    }

    pub fn with_key(self, key: &str) -> ShippingMethodKeyRequestBuilder<'a> {
        ShippingMethodKeyRequestBuilder {
            path: self.path.child(format!("key={}", key)),
        }
    }

    pub fn matching_location(self) -> MatchingQueryRequestBuilder<'a> {
        MatchingQueryRequestBuilder {
            path: self.path.child(MATCHING_LOCATION),
        }
    }

    pub fn matching_cart(self) -> MatchingQueryRequestBuilder<'a> {
        MatchingQueryRequestBuilder {
            path: self.path.child(MATCHING_CART),
        }
    }
}

/// `.../shipping-methods/key={key}`
pub struct ShippingMethodKeyRequestBuilder<'a> {
    path: ResourcePath<'a>,
}

impl<'a> ShippingMethodKeyRequestBuilder<'a> {
    pub fn get(self) -> ApiRequest<'a, ShippingMethod> {
        self.path.request(Method::GET)
    }

    pub fn head(self) -> ApiRequest<'a, ()> {
        self.path.request(Method::HEAD)
    }
}

/// `.../shipping-methods/matching-location` and `.../shipping-methods/matching-cart`
pub struct MatchingQueryRequestBuilder<'a> {
    path: ResourcePath<'a>,
}

impl<'a> MatchingQueryRequestBuilder<'a> {
    pub fn get(self) -> ApiRequest<'a, ShippingMethodPagedQueryResponse> {
        self.path.request(Method::GET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn root() -> ApiRoot {
        ApiRoot::new(
            "https://api.europe-west1.gcp.commercetools.com",
            "my-project",
            "token",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_collection_get_path() {
        let root = root();
        let request = root
            .shipping_methods()
            .get()
            .query_arg("expand", "zoneRates[*].zone");

        assert_eq!(request.method(), &Method::GET);
        let url = request.url().unwrap();
        assert_eq!(url.path(), "/my-project/shipping-methods");
        assert_eq!(
            url.query_pairs().next().map(|(k, v)| (k.into_owned(), v.into_owned())),
            Some(("expand".to_string(), "zoneRates[*].zone".to_string()))
        );
    }

    #[test]
    fn test_key_head_path() {
        let root = root();
        let request = root.shipping_methods().with_key("express").head();

        assert_eq!(request.method(), &Method::HEAD);
        assert_eq!(
            request.url().unwrap().path(),
            "/my-project/shipping-methods/key=express"
        );
    }

    #[test]
    fn test_key_with_slash_stays_in_one_segment() {
        let root = root();
        let request = root.shipping_methods().with_key("eu/express").get();

        assert_eq!(
            request.url().unwrap().path(),
            "/my-project/shipping-methods/key=eu%2Fexpress"
        );
    }

    #[test]
    fn test_in_store_matching_cart_path() {
        let root = root();
        let request = root
            .in_store_key_with_store_key_value("main-store")
            .shipping_methods()
            .matching_cart()
            .get()
            .query_arg("cartId", "cart-123");

        let url = request.url().unwrap();
        assert_eq!(
            url.path(),
            "/my-project/in-store/key=main-store/shipping-methods/matching-cart"
        );
        assert_eq!(url.query(), Some("cartId=cart-123"));
    }

    #[test]
    fn test_matching_location_path() {
        let root = root();
        let url = root
            .shipping_methods()
            .matching_location()
            .get()
            .query_arg("country", "DE")
            .url()
            .unwrap();

        assert_eq!(url.path(), "/my-project/shipping-methods/matching-location");
        assert_eq!(url.query(), Some("country=DE"));
    }
}
