pub mod retroachievements;
pub mod youtube;

/// Request URLs carry API keys in the query string, so they are dropped from errors.
pub(crate) fn redact_url(err: reqwest::Error) -> anyhow::Error {
    anyhow::Error::new(err.without_url())
}
