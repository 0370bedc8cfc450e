use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Book, BookDraft, BookId};
use crate::KernelError;

/// Write side of the book store.
///
/// `update` and `delete` report [`KernelError::NotFound`] when no row carries
/// the given id.
#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Connection: 'static + Send;
    async fn create(
        &self,
        con: &mut Self::Connection,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError>;
    async fn update(
        &self,
        con: &mut Self::Connection,
        id: &BookId,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Connection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
