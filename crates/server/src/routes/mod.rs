mod generate;
mod health;
mod pages;
mod roles;
pub mod sse;

pub use generate::*;
pub use health::*;
pub use pages::*;
pub use roles::*;
