pub mod payment_intent_service;
pub mod token_service;

pub use payment_intent_service::*;
pub use token_service::*;
