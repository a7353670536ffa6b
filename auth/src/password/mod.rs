pub mod argon2;
pub mod errors;
pub mod policy;

pub use self::argon2::HashingParams;
pub use self::argon2::PasswordHasher;
pub use errors::PasswordError;
pub use policy::PasswordPolicy;
pub use policy::PolicyViolation;
pub use policy::Requirement;
