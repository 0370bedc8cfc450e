use driver::database::PostgresDatabase;
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;

pub struct AppModule<D = PostgresDatabase>(Arc<Handler<D>>);

impl AppModule<PostgresDatabase> {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self::from(Handler::init().await?))
    }
}

impl<D> From<Handler<D>> for AppModule<D> {
    fn from(handler: Handler<D>) -> Self {
        Self(Arc::new(handler))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl Handler<PostgresDatabase> {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;

        Ok(Self::new(database))
    }
}

impl<D> Handler<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &D {
        &self.database
    }
}
