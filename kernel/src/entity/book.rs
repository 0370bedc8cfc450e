mod author;
mod genre;
mod id;
mod price;
mod stock;
mod title;

pub use self::{author::*, genre::*, id::*, price::*, stock::*, title::*};
use crate::entity::common::{CreatedAt, UpdatedAt};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    genre: BookGenre,
    price: BookPrice,
    stock: BookStock,
    created_at: CreatedAt<Book>,
    updated_at: UpdatedAt<Book>,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        genre: BookGenre,
        price: BookPrice,
        stock: BookStock,
        created_at: CreatedAt<Book>,
        updated_at: UpdatedAt<Book>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            genre,
            price,
            stock,
            created_at,
            updated_at,
        }
    }
}

/// The caller-supplied fields of a [`Book`]. Creating and updating both take a
/// full draft; there is no partial update.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BookDraft {
    title: BookTitle,
    author: BookAuthor,
    genre: BookGenre,
    price: BookPrice,
    stock: BookStock,
}

impl BookDraft {
    pub fn new(
        title: BookTitle,
        author: BookAuthor,
        genre: BookGenre,
        price: BookPrice,
        stock: BookStock,
    ) -> Self {
        Self {
            title,
            author,
            genre,
            price,
            stock,
        }
    }
}
