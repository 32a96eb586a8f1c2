//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services depend
//! only on these traits, not on the HTTP adapter.

mod coffee_backend;

pub use coffee_backend::CoffeeBackend;
