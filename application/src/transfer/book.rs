use time::OffsetDateTime;

use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookGenre, BookPrice, BookStock, BookTitle, DestructBook,
};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: i64,
    pub stock: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            genre,
            price,
            stock,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            price: price.into(),
            stock: stock.into(),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: i64,
}

#[derive(Debug, Clone)]
pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: i64,
    pub stock: i32,
}

impl From<CreateBookDto> for BookDraft {
    fn from(value: CreateBookDto) -> Self {
        BookDraft::new(
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookGenre::new(value.genre),
            BookPrice::new(value.price),
            BookStock::new(value.stock),
        )
    }
}

/// Full replacement of every mutable field of the book with `id`.
#[derive(Debug, Clone)]
pub struct UpdateBookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: i64,
    pub stock: i32,
}

impl From<UpdateBookDto> for BookDraft {
    fn from(value: UpdateBookDto) -> Self {
        BookDraft::new(
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookGenre::new(value.genre),
            BookPrice::new(value.price),
            BookStock::new(value.stock),
        )
    }
}

pub struct DeleteBookDto {
    pub id: i64,
}
