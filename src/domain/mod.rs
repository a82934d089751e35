// Domain layer: the configuration contract and its value types.
// No external dependencies beyond std/url/tokio handles.

pub mod model;
pub mod ports;
