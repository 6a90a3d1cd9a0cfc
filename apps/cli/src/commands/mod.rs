pub mod eval;
pub mod tasks;
pub mod transcribe;
pub mod transcript;
