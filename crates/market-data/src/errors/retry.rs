/// Classification for retry policy.
///
/// Used by the snapshot fetcher to decide whether a failed provider call is
/// worth repeating.
///
/// | Class | Retried? |
/// |-------|----------|
/// | `Never` | No, the failure is reported for the ticker as-is |
/// | `WithBackoff` | Yes, up to the configured retry budget with exponential delay |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol, validation error, or terminal failure.
    /// The request is fundamentally invalid and retrying won't help.
    Never,

    /// Retry after a delay.
    ///
    /// Used for transient errors like rate limiting (429), timeouts and
    /// connection resets. Each attempt waits longer than the previous one.
    WithBackoff,
}
