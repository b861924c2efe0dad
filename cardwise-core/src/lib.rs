pub mod clock;
pub mod counters;
pub mod errors;
pub mod filters;
pub mod models;
pub mod queue;
pub mod repo;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod study;

pub use clock::*;
pub use counters::*;
pub use errors::*;
pub use filters::*;
pub use models::*;
pub use queue::*;
pub use repo::*;
pub use scheduler::*;
pub use stats::*;
pub use study::*;
