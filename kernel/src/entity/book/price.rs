use vodca::{AsRefln, Fromln};

/// Price in minor currency units (e.g. cents).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookPrice(i64);

impl BookPrice {
    pub fn new(price: impl Into<i64>) -> Self {
        Self(price.into())
    }
}
