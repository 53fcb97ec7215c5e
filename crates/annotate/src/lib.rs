pub mod client;
pub mod error;
pub mod provider;
pub mod schema;

pub use client::{SpacyClient, MODEL_TIERS};
pub use error::AnnotateError;
pub use provider::AnnotationProvider;
pub use schema::{AnnotatedSentence, EntityLabel, EntityMention, NounChunk, PosTag, Token};
