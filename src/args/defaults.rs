pub(crate) const DEFAULT_USER_AGENT: &str = concat!("qget/", env!("CARGO_PKG_VERSION"));
