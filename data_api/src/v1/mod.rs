mod api_models;
mod error;
mod extractors;
mod handlers;
mod router;
#[cfg(test)]
mod tests;

pub use router::router;
