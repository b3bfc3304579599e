pub mod error;
pub mod serde;
pub mod validation;
pub mod permission;

pub use permission::Permission;
