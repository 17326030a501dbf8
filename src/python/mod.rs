//! Python interface layer.

pub mod bindings;
pub mod numpy_bridge;
