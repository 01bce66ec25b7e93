//! What the query engine knows about the data it reads back: column type tags
//! and the response encodings it can decode.

pub mod metadata;
