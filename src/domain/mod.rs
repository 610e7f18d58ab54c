// Domain layer: core models and ports (interfaces). No transport or runtime code here.

pub mod model;
pub mod ports;
