pub use flights::*;
pub use habits::*;

mod flights;
mod habits;
