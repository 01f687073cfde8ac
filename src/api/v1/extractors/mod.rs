pub mod jwt_ctx;

pub use jwt_ctx::{JwtPayload, JwtToken};
