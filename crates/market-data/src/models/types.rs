use std::borrow::Cow;

/// Provider identifier - mostly static constants
pub type ProviderId = Cow<'static, str>;

/// Currency code (ISO 4217) - mostly static
pub type Currency = Cow<'static, str>;

/// Currency reported when a provider omits one.
pub const DEFAULT_QUOTE_CURRENCY: &str = "USD";
