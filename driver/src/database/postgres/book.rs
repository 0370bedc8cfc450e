use error_stack::Report;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};
use time::OffsetDateTime;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookGenre, BookId, BookPrice, BookStock, BookTitle, CreatedAt,
    UpdatedAt,
};
use kernel::KernelError;

use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Connection = PoolConnection<Postgres>;

    async fn find_all(
        &self,
        con: &mut PoolConnection<Postgres>,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Connection = PoolConnection<Postgres>;

    async fn create(
        &self,
        con: &mut PoolConnection<Postgres>,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::create(con, draft).await
    }

    async fn update(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &BookId,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::update(con, id, draft).await
    }

    async fn delete(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    genre: String,
    price: i64,
    stock: i32,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookGenre::new(value.genre),
            BookPrice::new(value.price),
            BookStock::new(value.stock),
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, genre, price, stock, created_at, updated_at
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, genre, price, stock, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        let found = row.map(Book::from);
        Ok(found)
    }

    async fn create(
        con: &mut PgConnection,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            INSERT INTO books (title, author, genre, price, stock)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, genre, price, stock, created_at, updated_at
            "#,
        )
        .bind(draft.title().as_ref())
        .bind(draft.author().as_ref())
        .bind(draft.genre().as_ref())
        .bind(draft.price().as_ref())
        .bind(draft.stock().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        tracing::debug!(id = row.id, "inserted book row");
        Ok(Book::from(row))
    }

    async fn update(
        con: &mut PgConnection,
        id: &BookId,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $2, author = $3, genre = $4, price = $5, stock = $6, updated_at = now()
            WHERE id = $1
            RETURNING id, title, author, genre, price, stock, created_at, updated_at
            "#,
        )
        .bind(id.as_ref())
        .bind(draft.title().as_ref())
        .bind(draft.author().as_ref())
        .bind(draft.genre().as_ref())
        .bind(draft.price().as_ref())
        .bind(draft.stock().as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        match row {
            Some(row) => Ok(Book::from(row)),
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("no rows were updated for {:?}", id))),
        }
    }

    async fn delete(con: &mut PgConnection, id: &BookId) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("no rows were deleted for {:?}", id)));
        }
        Ok(())
    }
}
