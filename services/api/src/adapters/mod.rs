pub mod memory;
pub mod password;
pub mod seed;
pub mod token;

pub use memory::InMemoryStore;
pub use password::Argon2PasswordService;
pub use token::UuidTokenIssuer;
