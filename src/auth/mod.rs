pub mod credentials;

pub use credentials::{Credentials, TOKEN_ENV_VAR, TokenSource, redact_token};
