pub mod preprocess;
pub mod quiz;
