pub mod common;
pub mod string;
