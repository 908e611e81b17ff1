pub mod check;
pub mod compile;
pub mod dump;
pub mod source;
