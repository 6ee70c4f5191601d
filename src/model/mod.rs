mod document;
mod nominee;
mod profile;

pub use document::*;
pub use nominee::*;
pub use profile::*;
