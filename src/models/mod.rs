mod assignment;
mod people;
mod project;
mod report;

pub use assignment::*;
pub use people::*;
pub use project::*;
pub use report::*;
