mod answer;
mod conversation;
mod document;
mod embedding;

pub use answer::{Answer, Route, WebDocument, WebSearchResults};
pub use conversation::{Conversation, Message, MessageRole};
pub use document::{split_paragraphs, ChunkMetadata, Document, DocumentChunk, Page, SearchResult};
pub use embedding::Embedding;
