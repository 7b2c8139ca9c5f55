pub mod commits;
pub mod diff;
pub mod show;

pub use commits::*;
pub use diff::*;
pub use show::*;
