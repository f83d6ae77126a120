pub mod pipe_group;
pub mod pipe_manager;
pub mod tier;

pub use pipe_group::PipeGroup;
pub use pipe_manager::{PipeConfig, PipeConfigError, PipeManager, PoolState};
pub use tier::ColorTier;
