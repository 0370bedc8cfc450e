use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{BookDraft, BookId};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

#[async_trait::async_trait]
pub trait GetAllBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let books = self.book_query().find_all(&mut connection).await?;
        tracing::debug!(count = books.len(), "fetched all books");

        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetAllBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;
        tracing::debug!(id = dto.id, found = book.is_some(), "looked up book");

        Ok(book.map(BookDto::from))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let draft = BookDraft::from(dto);
        let book = self
            .book_modifier()
            .create(&mut connection, &draft)
            .await?;
        let book = BookDto::from(book);
        tracing::debug!(id = book.id, "created book");

        Ok(book)
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let id = BookId::new(dto.id);
        let draft = BookDraft::from(dto);
        let book = self
            .book_modifier()
            .update(&mut connection, &id, &draft)
            .await?;
        let book = BookDto::from(book);
        tracing::debug!(id = book.id, "updated book");

        Ok(book)
    }
}

impl<T> UpdateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let id = BookId::new(dto.id);
        self.book_modifier().delete(&mut connection, &id).await?;
        tracing::debug!(id = dto.id, "deleted book");

        Ok(())
    }
}

impl<T> DeleteBookService for T where T: DependOnBookModifier {}
