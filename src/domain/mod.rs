// Domain layer: catalogue models and ports (interfaces).

pub mod model;
pub mod ports;
