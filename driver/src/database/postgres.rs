use error_stack::{Report, ResultExt};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error, PgPool, Postgres};

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::KernelError;

use crate::error::{ConvertError, DriverError};
use crate::{env, env_or};

pub use self::book::*;

mod book;

static POSTGRES_URL: &str = "POSTGRES_URL";
static POSTGRES_MAX_CONNECTIONS: &str = "POSTGRES_MAX_CONNECTIONS";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    /// Connects using `POSTGRES_URL` and the optional `POSTGRES_MAX_CONNECTIONS`.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL).change_context(KernelError::Internal)?;
        let max_connections = env_or(POSTGRES_MAX_CONNECTIONS, DEFAULT_MAX_CONNECTIONS)
            .change_context(KernelError::Internal)?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await
            .convert_error()
            .attach_printable("Failed to connect to postgres")?;
        tracing::info!(max_connections, "postgres pool ready");
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Connection = PoolConnection<Postgres>;
    async fn acquire(&self) -> error_stack::Result<Self::Connection, KernelError> {
        let con = self.pool.acquire().await.convert_error()?;
        Ok(con)
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match error {
                Error::PoolTimedOut => KernelError::Timeout,
                _ => KernelError::Internal,
            };
            Report::from(error)
                .change_context(DriverError::SqlX)
                .change_context(context)
        })
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use crate::error::ConvertError;

    #[test]
    fn pool_timeout_is_timeout() {
        let report = Err::<(), _>(sqlx::Error::PoolTimedOut)
            .convert_error()
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Timeout);
    }

    #[test]
    fn other_errors_are_internal() {
        for error in [sqlx::Error::RowNotFound, sqlx::Error::PoolClosed] {
            let report = Err::<(), _>(error).convert_error().unwrap_err();
            assert_eq!(report.current_context(), &KernelError::Internal);
        }
    }
}
