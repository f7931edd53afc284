// Domain layer: models, ports, and the pure rules (distance, validation).

pub mod geo;
pub mod model;
pub mod ports;
pub mod validator;
