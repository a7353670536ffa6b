pub mod claims;
pub mod errors;
pub mod issuer;
pub mod settings;
pub mod validator;

pub use claims::Claims;
pub use errors::TokenError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use settings::SigningKey;
pub use settings::TokenSettings;
pub use settings::MAX_CLOCK_SKEW_SECONDS;
pub use settings::MAX_LIFETIME_DAYS;
pub use settings::MIN_SECRET_LENGTH;
pub use validator::TokenValidator;
pub use validator::MAX_TOKEN_SIZE_BYTES;
