pub mod shortcuts;
pub mod submit;
