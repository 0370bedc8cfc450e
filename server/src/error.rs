use std::borrow::Cow;
use std::process::{ExitCode, Termination};

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Status code plus the plain-text body sent back to the client.
#[derive(Debug)]
pub struct ErrorStatus {
    status: StatusCode,
    message: Cow<'static, str>,
}

impl ErrorStatus {
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// Replaces the message while keeping the status.
    pub fn describe(self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        let context = *e.current_context();
        let status = match context {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{:?}", e);
        } else {
            tracing::warn!("{:?}", e);
        }
        Self {
            status,
            message: context.to_string().into(),
        }
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "rejected request body");
        Self::bad_request("Can not decode json")
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message.into_owned()).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use error_stack::Report;
    use kernel::KernelError;

    use crate::error::ErrorStatus;

    #[test]
    fn kernel_errors_map_to_status() {
        let cases = [
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::Timeout, StatusCode::SERVICE_UNAVAILABLE),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (context, expected) in cases {
            let status = ErrorStatus::from(Report::new(context));
            assert_eq!(status.status, expected, "{context:?}");
        }
    }

    #[test]
    fn describe_keeps_status() {
        let status = ErrorStatus::from(Report::new(KernelError::NotFound)).describe("gone");
        assert_eq!(status.status, StatusCode::NOT_FOUND);
        assert_eq!(status.message, "gone");
    }
}
