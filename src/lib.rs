pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliArgs, Command};
pub use config::ClientConfig;

pub use core::{
    api_root::ApiRoot,
    request::{ApiRequest, ClientResponse},
    shipping_methods::ShippingMethodsService,
};
pub use domain::model::{ShippingMethod, ShippingMethodPagedQueryResponse};
pub use domain::ports::ShippingMethodLookup;
pub use utils::error::{LookupError, Result};
