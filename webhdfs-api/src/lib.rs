pub mod error;
pub use error::{RemoteException, ExceptionKind};

pub mod op;
pub use op::Op;

pub mod path;
pub use path::HdfsPath;

pub mod fs;

mod payload;
pub use payload::Payload;

#[cfg(feature = "client")]
pub mod client;
