pub mod history;
mod reader;
pub mod tokenizer;

pub use history::History;
pub use reader::{EditorInput, LineSource, ReaderInput};
