use std::collections::BTreeMap;

use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookDraft, BookId, CreatedAt, DestructBookDraft, UpdatedAt,
};
use kernel::KernelError;

use crate::database::memory::InMemoryConnection;

pub struct InMemoryBookRepository;

/// Rows keyed by id; ids are handed out sequentially starting at 1 and never reused.
#[derive(Debug, Default)]
pub(in crate::database) struct BookTable {
    last_id: i64,
    rows: BTreeMap<BookId, Book>,
}

fn assemble(id: BookId, draft: &BookDraft, created_at: CreatedAt<Book>) -> Book {
    let DestructBookDraft {
        title,
        author,
        genre,
        price,
        stock,
    } = draft.clone().into_destruct();
    Book::new(
        id,
        title,
        author,
        genre,
        price,
        stock,
        created_at,
        UpdatedAt::new(OffsetDateTime::now_utc()),
    )
}

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Connection = InMemoryConnection;

    async fn find_all(
        &self,
        con: &mut InMemoryConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let table = con.books.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let table = con.books.read().await;
        Ok(table.rows.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Connection = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let mut table = con.books.write().await;
        table.last_id += 1;
        let id = BookId::new(table.last_id);
        let book = assemble(id, draft, CreatedAt::new(OffsetDateTime::now_utc()));
        table.rows.insert(id, book.clone());
        tracing::debug!(id = table.last_id, "inserted book row");
        Ok(book)
    }

    async fn update(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let mut table = con.books.write().await;
        let Some(row) = table.rows.get_mut(id) else {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("no rows were updated for {:?}", id)));
        };
        *row = assemble(*id, draft, row.created_at().clone());
        Ok(row.clone())
    }

    async fn delete(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        let mut table = con.books.write().await;
        match table.rows.remove(id) {
            Some(_) => Ok(()),
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("no rows were deleted for {:?}", id))),
        }
    }
}
