/*! Row transformers.

Transforms rewrite rows as they are read. They are chained with a [Transformer] and
applied to a whole corpus with a [TransformTextCorpus].

!*/

mod segment;
mod text;
mod transform;

pub use segment::{Lowercase, MaxTokens};
pub use text::{TransformText, TransformTextCorpus};
pub use transform::{Transform, Transformer};
