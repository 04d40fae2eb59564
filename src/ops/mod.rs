pub mod board;
pub mod transfer;
pub mod validate;
