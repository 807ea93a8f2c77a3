/// Classification for retry policy.
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No, the request itself is wrong |
/// | `WithBackoff` | Yes, after waiting |
/// | `NextAttempt` | Yes, on the next refresh cycle |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Unknown symbol or malformed request. Retrying won't help.
    Never,

    /// Rate limiting or timeout. Retry once the provider has cooled down.
    WithBackoff,

    /// Provider hiccup or transport failure. The next scheduled refresh may succeed.
    NextAttempt,
}
