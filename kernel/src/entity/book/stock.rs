use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookStock(i32);

impl BookStock {
    pub fn new(stock: impl Into<i32>) -> Self {
        Self(stock.into())
    }
}
