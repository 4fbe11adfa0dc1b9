//! Value objects for the signup domain

mod email_address;
mod password_hash;
mod user_id;
mod username;

pub use email_address::EmailAddress;
pub use password_hash::PasswordHash;
pub use user_id::UserId;
pub use username::Username;
