pub mod options;
pub mod parser;
