// Voice query: upload → transcribe (placeholder) → advice → persist.

pub mod advisor;
pub mod handlers;
