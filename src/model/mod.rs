pub mod bands;
pub mod interference;
pub mod normal;
pub mod result;
