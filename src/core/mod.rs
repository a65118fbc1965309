pub mod api_root;
pub mod request;
pub mod shipping_methods;

pub use crate::domain::model::{ShippingMethod, ShippingMethodPagedQueryResponse};
pub use crate::domain::ports::ShippingMethodLookup;
pub use crate::utils::error::Result;
