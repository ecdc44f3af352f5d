// Domain layer: data model and ports. Only std and serde.

pub mod model;
pub mod ports;
