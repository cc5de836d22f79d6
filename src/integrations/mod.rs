//! External service integrations.

pub mod ai_client {
    pub use crate::ai_client::*;
}

pub mod response_cache {
    pub use crate::response_cache::*;
}
