pub mod git;
pub mod mistral;
pub mod terminal;
