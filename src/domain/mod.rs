// Domain layer: deployment models and the ports the driver depends on.

pub mod model;
pub mod ports;
