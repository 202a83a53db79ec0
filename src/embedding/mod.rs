//! Text → vector pipeline.
//!
//! - [`space`] loads the pre-trained word vectors once per process.
//! - [`tokenize`] splits text into vocabulary tokens.
//! - [`vectorizer`] aggregates token vectors into one [`Embedding`].

mod error;
/// Word-vector artifact loading.
pub mod space;
/// Word tokenization.
pub mod tokenize;
/// Frequency-weighted text vectors.
pub mod vectorizer;


pub use error::VectorSpaceError;
pub use space::{VectorFormat, VectorSpace, VectorSpaceConfig};
pub use tokenize::tokenize;
pub use vectorizer::{Embedding, Vectorizer};
