// Domain layer: the certificate record and the storage port it is persisted through.

pub mod model;
pub mod ports;
