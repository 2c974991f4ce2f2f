pub mod anthropic;
pub(crate) mod http_errors;
