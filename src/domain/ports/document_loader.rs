use std::path::Path;

use crate::domain::{errors::DomainError, Page};

/// Turns a source file into pages of plain text.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Vec<Page>, DomainError>;
}
