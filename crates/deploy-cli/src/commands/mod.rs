pub mod phase;
pub mod rollout;
pub mod timeout;
