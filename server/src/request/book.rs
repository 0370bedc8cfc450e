use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;

use crate::controller::TryIntake;
use crate::error::ErrorStatus;

/// Body of `POST /books` and `PUT /books/:id`. Unknown fields such as `id` or
/// `created_at` are ignored.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    title: String,
    author: String,
    genre: String,
    #[serde(default)]
    price: Option<PriceRequest>,
    #[serde(default)]
    stock: Option<i32>,
}

/// Older clients send the price as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceRequest {
    Minor(i64),
    Text(String),
}

pub type BookBody = Result<Json<BookRequest>, JsonRejection>;

#[derive(Debug)]
pub struct GetBookRequest {
    id: String,
}

impl GetBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct CreateBookRequest {
    body: BookBody,
}

impl CreateBookRequest {
    pub fn new(body: BookBody) -> Self {
        Self { body }
    }
}

pub struct UpdateBookRequest {
    id: String,
    body: BookBody,
}

impl UpdateBookRequest {
    pub fn new(id: String, body: BookBody) -> Self {
        Self { id, body }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: String,
}

impl DeleteBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

struct ValidBook {
    title: String,
    author: String,
    genre: String,
    price: i64,
    stock: i32,
}

fn parse_id(id: &str) -> Result<i64, ErrorStatus> {
    id.parse::<i64>()
        .map_err(|_| ErrorStatus::bad_request("Can not convert id to int"))
}

fn required(field: &'static str, value: String) -> Result<String, ErrorStatus> {
    if value.trim().is_empty() {
        return Err(ErrorStatus::bad_request(format!(
            "Missing required field: {field}"
        )));
    }
    Ok(value)
}

fn validate(body: BookBody) -> Result<ValidBook, ErrorStatus> {
    let Json(request) = body?;
    let price = match request.price {
        None => 0,
        Some(PriceRequest::Minor(price)) => price,
        Some(PriceRequest::Text(price)) => price
            .trim()
            .parse::<i64>()
            .map_err(|_| ErrorStatus::bad_request("Invalid price"))?,
    };
    if price < 0 {
        return Err(ErrorStatus::bad_request("Invalid price"));
    }
    let stock = request.stock.unwrap_or(0);
    if stock < 0 {
        return Err(ErrorStatus::bad_request("Invalid stock"));
    }
    Ok(ValidBook {
        title: required("title", request.title)?,
        author: required("author", request.author)?,
        genre: required("genre", request.genre)?,
        price,
        stock,
    })
}

pub struct BookTransformer;

impl TryIntake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    type Error = ErrorStatus;
    fn emit(&self, input: GetBookRequest) -> Result<Self::To, Self::Error> {
        Ok(GetBookDto {
            id: parse_id(&input.id)?,
        })
    }
}

impl TryIntake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    type Error = ErrorStatus;
    fn emit(&self, input: CreateBookRequest) -> Result<Self::To, Self::Error> {
        let book = validate(input.body)?;
        Ok(CreateBookDto {
            title: book.title,
            author: book.author,
            genre: book.genre,
            price: book.price,
            stock: book.stock,
        })
    }
}

impl TryIntake<UpdateBookRequest> for BookTransformer {
    type To = UpdateBookDto;
    type Error = ErrorStatus;
    fn emit(&self, input: UpdateBookRequest) -> Result<Self::To, Self::Error> {
        let id = parse_id(&input.id)?;
        let book = validate(input.body)?;
        Ok(UpdateBookDto {
            id,
            title: book.title,
            author: book.author,
            genre: book.genre,
            price: book.price,
            stock: book.stock,
        })
    }
}

impl TryIntake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    type Error = ErrorStatus;
    fn emit(&self, input: DeleteBookRequest) -> Result<Self::To, Self::Error> {
        Ok(DeleteBookDto {
            id: parse_id(&input.id)?,
        })
    }
}
