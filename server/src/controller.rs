use std::future::IntoFuture;

// Adapted from https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs

/// Turns transport input into a service DTO, rejecting input that must not
/// reach a service.
pub trait TryIntake<I>: 'static + Sync + Send {
    type To;
    type Error;
    fn emit(&self, input: I) -> Result<Self::To, Self::Error>;
}

/// Turns a service result into something the transport can send back.
pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn try_intake<I>(self, input: I) -> Result<Transformed<P, T::To>, T::Error>
    where
        T: TryIntake<I>,
    {
        Ok(Transformed {
            transformed: self.transformer.emit(input)?,
            presenter: self.presenter,
        })
    }

    /// Runs `f` without any input and presents its output.
    pub async fn bypass<F, Fut, O, E>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f().await?))
    }
}

pub struct Transformed<P, D> {
    transformed: D,
    presenter: P,
}

impl<P, D> Transformed<P, D> {
    pub async fn handle<F, Fut, O, E>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        let Self {
            transformed,
            presenter,
        } = self;
        Ok(presenter.emit(f(transformed).await?))
    }
}

#[cfg(test)]
mod test {
    use crate::controller::{Controller, Exhaust, TryIntake};

    struct Doubler;

    impl TryIntake<&'static str> for Doubler {
        type To = i32;
        type Error = String;
        fn emit(&self, input: &'static str) -> Result<Self::To, Self::Error> {
            input
                .parse::<i32>()
                .map(|value| value * 2)
                .map_err(|_| format!("not a number: {input}"))
        }
    }

    struct Printer;

    impl Exhaust<i32> for Printer {
        type To = String;
        fn emit(&self, input: i32) -> Self::To {
            input.to_string()
        }
    }

    #[tokio::test]
    async fn intake_then_handle_presents_output() {
        let out = Controller::new(Doubler, Printer)
            .try_intake("21")
            .expect("valid input")
            .handle(|value| async move { Ok::<_, ()>(value) })
            .await;
        assert_eq!(out, Ok("42".to_string()));
    }

    #[test]
    fn rejected_input_is_reported() {
        let out = Controller::new(Doubler, Printer).try_intake("abc");
        assert_eq!(out.err(), Some("not a number: abc".to_string()));
    }

    #[tokio::test]
    async fn bypass_presents_output() {
        let out = Controller::new(Doubler, Printer)
            .bypass(|| async { Ok::<_, ()>(7) })
            .await;
        assert_eq!(out, Ok("7".to_string()));
    }

    #[tokio::test]
    async fn handler_error_is_returned_unchanged() {
        let out = Controller::new(Doubler, Printer)
            .try_intake("4")
            .expect("valid input")
            .handle(|_| async move { Err::<i32, _>("boom") })
            .await;
        assert_eq!(out, Err("boom"));
    }
}
