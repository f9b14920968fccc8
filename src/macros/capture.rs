//! Block forms of the capturing adapters.

/// Evaluate a block in which `?` raises, capturing the listed kinds.
///
/// Expands to a closure call, like the body of a `#[catch]` function. The
/// block's value becomes `Outcome::Ok`; `return` leaves the closure, not the
/// enclosing function.
///
/// ```
/// use poltergeist::{capture, Outcome};
/// use std::num::ParseIntError;
///
/// let input = "41";
/// let outcome = capture!(ParseIntError => { input.parse::<i32>()? + 1 }).unwrap();
/// assert_eq!(outcome, Outcome::Ok(42));
/// ```
#[macro_export]
macro_rules! capture {
    ($($kind:ty),+ => $body:block) => {
        $crate::catch::<($($kind,)+)>().call(|| -> ::core::result::Result<_, $crate::Raised> {
            ::core::result::Result::Ok($body)
        })
    };
}

/// Async counterpart of [`capture!`]: evaluates to a future.
///
/// ```
/// use poltergeist::{capture_async, Outcome, StringError};
///
/// fn positive(n: i32) -> Result<i32, StringError> {
///     if n > 0 { Ok(n) } else { Err(StringError::new("late")) }
/// }
///
/// # async fn run() {
/// let outcome = capture_async!(StringError => { positive(0)? }).await.unwrap();
/// assert_eq!(outcome, Outcome::Err(StringError::new("late")));
/// # }
/// ```
#[macro_export]
macro_rules! capture_async {
    ($($kind:ty),+ => $body:block) => {
        $crate::catch_async::<($($kind,)+)>().call(async {
            let __outcome: ::core::result::Result<_, $crate::Raised> = ::core::result::Result::Ok($body);
            __outcome
        })
    };
}
