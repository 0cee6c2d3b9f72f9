pub mod category;
pub mod completion;
pub mod config;
pub mod field;
pub mod phase;
pub mod texts;
pub mod transcript;
pub mod types;

// Keep the public surface small and intentional.
pub use category::*;
pub use completion::*;
pub use config::*;
pub use field::*;
pub use phase::*;
pub use transcript::*;
pub use types::*;
