pub mod results;
pub mod validator;

pub use results::RejectionReason;
pub use results::ValidationResult;
pub use validator::AllowedCharacters;
pub use validator::InputValidator;
