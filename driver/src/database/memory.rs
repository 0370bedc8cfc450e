use std::sync::Arc;

use tokio::sync::RwLock;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::KernelError;

pub use self::book::*;

mod book;

/// Process-local store. Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    books: Arc<RwLock<BookTable>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct InMemoryConnection {
    books: Arc<RwLock<BookTable>>,
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Connection = InMemoryConnection;
    async fn acquire(&self) -> error_stack::Result<Self::Connection, KernelError> {
        Ok(InMemoryConnection {
            books: Arc::clone(&self.books),
        })
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}
