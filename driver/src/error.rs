use std::fmt::Display;

use error_stack::Context;
use kernel::KernelError;

#[derive(Debug)]
pub enum DriverError {
    SqlX,
    Env,
}

impl Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::SqlX => write!(f, "Database driver error"),
            DriverError::Env => write!(f, "Environment variable error"),
        }
    }
}

impl Context for DriverError {}

pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}
