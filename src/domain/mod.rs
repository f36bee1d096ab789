// Domain layer - pure types, validation, and the error taxonomy

pub mod errors;
pub mod model;
