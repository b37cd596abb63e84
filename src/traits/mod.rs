//! Trait seams of the crate.
//!
//! [`SwapQuoter`] is the only thing the allocation solver knows about a
//! swap venue; [`FromConfig`] is the uniform constructor for configured
//! types.

mod from_config;
mod swap_quoter;

pub use from_config::FromConfig;
pub use swap_quoter::SwapQuoter;
