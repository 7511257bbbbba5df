pub mod error;
pub mod format;
pub mod locate;
pub mod outline;
pub mod parser;
pub mod session;
