// Domain-layer modules and shared errors/models
pub mod engine {
    pub use crate::engine::*;
}

pub mod attainment {
    pub use crate::attainment::*;
}

pub mod quota {
    pub use crate::quota::*;
}

pub mod standardizer {
    pub use crate::standardizer::*;
}

pub mod policy {
    pub use crate::policy::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
