// Domain layer - Trim timeline types and rules

pub mod errors;
pub mod model;
pub mod rules;
