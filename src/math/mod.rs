pub mod matrix;
pub mod parallel;
