mod dsn;
mod secret;

pub use dsn::Dsn;
pub use secret::Secret;
