// Domain layer: platform records and the lookup port. No HTTP concerns here.

pub mod model;
pub mod ports;
