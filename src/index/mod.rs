pub mod builder;
mod error;
pub mod reference;

pub use builder::Builder;
pub use error::Error;
pub use error::Result;
pub use reference::ReferenceIndex;
