// Domain-layer modules: the scoring pipeline and shared errors/models
pub mod rules {
    pub use crate::rules::*;
}

pub mod classifier {
    pub use crate::classifier::*;
}

pub mod composer {
    pub use crate::composer::*;
}

pub mod pipeline {
    pub use crate::pipeline::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
