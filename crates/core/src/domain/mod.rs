pub mod role;
pub mod run;
