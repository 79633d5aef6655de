pub mod tokenizer;

pub use tokenizer::{Tokenizer, MAX_LINE};
