pub mod config;
pub mod error;
pub mod logging;
pub mod machine;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::{JournalEntry, MachineLogger};
pub use machine::*;
pub use types::*;
