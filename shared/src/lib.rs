pub mod payload;
pub mod risk;

pub use payload::*;
pub use risk::RiskLevel;
