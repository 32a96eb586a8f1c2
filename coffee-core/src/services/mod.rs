//! Service layer - business logic orchestration

mod coffee;
pub mod logging;

pub use coffee::CoffeeService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
