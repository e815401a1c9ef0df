/// How hard a provider may be called before it starts refusing requests.
#[derive(Clone, Debug, PartialEq)]
pub struct RateLimit {
    /// Sustained request rate.
    pub requests_per_minute: u32,

    /// Upper bound on in-flight requests; the fetcher clamps its pool to this.
    pub max_concurrency: usize,

    /// Requests that may go out back to back before pacing kicks in.
    pub burst: u32,
}

impl RateLimit {
    pub fn new(requests_per_minute: u32, max_concurrency: usize, burst: u32) -> Self {
        Self {
            requests_per_minute,
            max_concurrency,
            burst,
        }
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::new(60, 5, 10)
    }
}
