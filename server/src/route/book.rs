use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    BookBody, BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookRequest,
    UpdateBookRequest,
};
use crate::response::BookPresenter;
use application::service::{
    CreateBookService, DeleteBookService, GetAllBookService, GetBookService, UpdateBookService,
};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D> BookRouter for Router<AppModule<D>>
where
    D: DependOnBookQuery + DependOnBookModifier,
{
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new(BookTransformer, BookPresenter)
                    .bypass(|| module.database().get_all_books())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<D>>, body: BookBody| async move {
                    let created = Controller::new(BookTransformer, BookPresenter)
                        .try_intake(CreateBookRequest::new(body))?
                        .handle(|dto| module.database().create_book(dto))
                        .await
                        .map_err(|e| ErrorStatus::from(e).describe("Can not create book"))?;
                    Ok::<_, ErrorStatus>(created)
                },
            ),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<String>| async move {
                    let found = Controller::new(BookTransformer, BookPresenter)
                        .try_intake(GetBookRequest::new(id))?
                        .handle(|dto| module.database().get_book(dto))
                        .await
                        .map_err(|e| ErrorStatus::from(e).describe("Can not get Book"))?;
                    let found = found.ok_or_else(|| ErrorStatus::not_found("Book not found"))?;
                    Ok::<_, ErrorStatus>(found)
                },
            )
            .put(
                |State(module): State<AppModule<D>>,
                 Path(id): Path<String>,
                 body: BookBody| async move {
                    let updated = Controller::new(BookTransformer, BookPresenter)
                        .try_intake(UpdateBookRequest::new(id, body))?
                        .handle(|dto| module.database().update_book(dto))
                        .await
                        .map_err(|e| ErrorStatus::from(e).describe("Can not update book"))?;
                    Ok::<_, ErrorStatus>(updated)
                },
            )
            .delete(
                |State(module): State<AppModule<D>>, Path(id): Path<String>| async move {
                    let deleted = Controller::new(BookTransformer, BookPresenter)
                        .try_intake(DeleteBookRequest::new(id))?
                        .handle(|dto| module.database().delete_book(dto))
                        .await
                        .map_err(|e| ErrorStatus::from(e).describe("Can not delete Book"))?;
                    Ok::<_, ErrorStatus>(deleted)
                },
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use driver::database::InMemoryDatabase;
    use error_stack::Report;
    use http_body_util::BodyExt;
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::{BookQuery, DependOnBookQuery};
    use kernel::interface::update::{BookModifier, DependOnBookModifier};
    use kernel::prelude::entity::{Book, BookDraft, BookId};
    use kernel::KernelError;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::handler::{AppModule, Handler};
    use crate::route::BookRouter;

    /// Store whose every operation fails, counting how often it was reached.
    #[derive(Default)]
    struct BrokenDatabase {
        repository: BrokenRepository,
    }

    #[derive(Default)]
    struct BrokenRepository {
        calls: Arc<AtomicUsize>,
    }

    impl BrokenRepository {
        fn fail<T>(&self) -> error_stack::Result<T, KernelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Report::new(KernelError::Internal).attach_printable("storage is down"))
        }
    }

    #[async_trait::async_trait]
    impl DatabaseConnection for BrokenDatabase {
        type Connection = ();
        async fn acquire(&self) -> error_stack::Result<(), KernelError> {
            Ok(())
        }
    }

    impl DependOnBookQuery for BrokenDatabase {
        type BookQuery = BrokenRepository;
        fn book_query(&self) -> &Self::BookQuery {
            &self.repository
        }
    }

    impl DependOnBookModifier for BrokenDatabase {
        type BookModifier = BrokenRepository;
        fn book_modifier(&self) -> &Self::BookModifier {
            &self.repository
        }
    }

    #[async_trait::async_trait]
    impl BookQuery for BrokenRepository {
        type Connection = ();
        async fn find_all(&self, _: &mut ()) -> error_stack::Result<Vec<Book>, KernelError> {
            self.fail()
        }
        async fn find_by_id(
            &self,
            _: &mut (),
            _: &BookId,
        ) -> error_stack::Result<Option<Book>, KernelError> {
            self.fail()
        }
    }

    #[async_trait::async_trait]
    impl BookModifier for BrokenRepository {
        type Connection = ();
        async fn create(
            &self,
            _: &mut (),
            _: &BookDraft,
        ) -> error_stack::Result<Book, KernelError> {
            self.fail()
        }
        async fn update(
            &self,
            _: &mut (),
            _: &BookId,
            _: &BookDraft,
        ) -> error_stack::Result<Book, KernelError> {
            self.fail()
        }
        async fn delete(&self, _: &mut (), _: &BookId) -> error_stack::Result<(), KernelError> {
            self.fail()
        }
    }

    fn in_memory() -> Router {
        Router::<AppModule<InMemoryDatabase>>::new()
            .route_book()
            .with_state(AppModule::from(Handler::new(InMemoryDatabase::new())))
    }

    fn broken() -> (Router, Arc<AtomicUsize>) {
        let database = BrokenDatabase::default();
        let calls = Arc::clone(&database.repository.calls);
        let router = Router::<AppModule<BrokenDatabase>>::new()
            .route_book()
            .with_state(AppModule::from(Handler::new(database)));
        (router, calls)
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Option<String>, String) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    const HORROR: &str = r#"{"title":"T","author":"A","genre":"Horror","price":"100","stock":10}"#;

    #[tokio::test]
    async fn create_get_delete_round_trip() {
        let router = in_memory();

        let (status, content_type, body) =
            send(&router, Method::POST, "/books", Some(HORROR)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let created: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(created["title"], "T");
        assert_eq!(created["author"], "A");
        assert_eq!(created["genre"], "Horror");
        assert_eq!(created["price"], 100);
        assert_eq!(created["stock"], 10);
        assert!(created["created_at"].is_string());
        assert!(created["updated_at"].is_string());
        let id = created["id"].as_i64().expect("numeric id");

        let uri = format!("/books/{id}");
        let (status, _, body) = send(&router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let found: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(found, created);

        let (status, _, body) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let (status, _, _) = send(&router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_returns_every_book() {
        let router = in_memory();

        let (status, _, body) = send(&router, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");

        send(&router, Method::POST, "/books", Some(HORROR)).await;
        send(
            &router,
            Method::POST,
            "/books",
            Some(r#"{"title":"T2","author":"A2","genre":"Adventure","price":150,"stock":20}"#),
        )
        .await;

        let (status, _, body) = send(&router, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::OK);
        let books: Vec<Value> = serde_json::from_str(&body).unwrap();
        let titles = books
            .iter()
            .map(|book| book["title"].as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["T", "T2"]);
    }

    #[tokio::test]
    async fn put_replaces_the_book() {
        let router = in_memory();
        let (_, _, body) = send(&router, Method::POST, "/books", Some(HORROR)).await;
        let created: Value = serde_json::from_str(&body).unwrap();
        let uri = format!("/books/{}", created["id"]);

        let (status, _, body) = send(
            &router,
            Method::PUT,
            &uri,
            Some(r#"{"title":"T2","author":"A","genre":"Horror","price":90}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["title"], "T2");
        assert_eq!(updated["price"], 90);
        assert_eq!(updated["stock"], 0);
        assert_eq!(updated["created_at"], created["created_at"]);

        let (_, _, body) = send(&router, Method::GET, &uri, None).await;
        let found: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn missing_books_are_not_found() {
        let router = in_memory();

        let (status, _, body) = send(&router, Method::PUT, "/books/9", Some(HORROR)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Can not update book");

        let (status, _, body) = send(&router, Method::DELETE, "/books/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Can not delete Book");
    }

    #[tokio::test]
    async fn non_numeric_id_never_reaches_storage() {
        let (router, calls) = broken();

        for (method, body) in [
            (Method::GET, None),
            (Method::PUT, Some(HORROR)),
            (Method::DELETE, None),
        ] {
            let (status, _, text) = send(&router, method, "/books/abc", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(text, "Can not convert id to int");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_json_never_reaches_storage() {
        let (router, calls) = broken();
        let malformed = r#"{title: "T", "author": "A", "genre": "Horror", "price": "100", "stock": 10}"#;

        for (method, uri) in [(Method::POST, "/books"), (Method::PUT, "/books/1")] {
            let (status, _, text) = send(&router, method, uri, Some(malformed)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(text, "Can not decode json");
        }

        let (status, _, _) = send(
            &router,
            Method::POST,
            "/books",
            Some(r#"{"author":"A","genre":"Horror"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, text) = send(
            &router,
            Method::POST,
            "/books",
            Some(r#"{"title":"T","author":"A","genre":"Horror","stock":-1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Invalid stock");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn body_without_json_content_type_is_rejected() {
        let (router, calls) = broken();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .body(Body::from(HORROR))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Can not decode json");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn storage_failures_are_server_errors() {
        let (router, calls) = broken();

        let (status, _, text) = send(&router, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text, KernelError::Internal.to_string());

        let cases = [
            (Method::GET, "/books/1", None, "Can not get Book"),
            (Method::POST, "/books", Some(HORROR), "Can not create book"),
            (Method::PUT, "/books/1", Some(HORROR), "Can not update book"),
            (Method::DELETE, "/books/1", None, "Can not delete Book"),
        ];
        for (method, uri, body, message) in cases {
            let (status, _, text) = send(&router, method, uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(text, message);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }
}
