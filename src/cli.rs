pub mod migrate;
pub mod shopping;
