pub mod build;
pub mod demographics;
pub mod dist;
pub mod extract;
pub mod project;
pub mod util;

pub use build::*;
pub use demographics::*;
pub use dist::*;
pub use extract::*;
pub use project::*;
pub use util::*;
