/*
[INPUT]:  Public API exports for weex-ai-trader crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod artifacts;
pub mod config;
pub mod decision;
pub mod driver;
pub mod llm;
pub mod pipeline;
pub mod scheduler;

// Re-export main types for convenience
pub use config::{Secrets, TraderConfig};
pub use decision::TradingDecision;
pub use driver::Driver;
pub use llm::{OpenRouterProvider, ProviderError, SignalProvider};
pub use pipeline::{CycleRunner, Pipeline};
