pub mod demo;
pub mod validate;
