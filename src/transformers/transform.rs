//! Transform trait.
use crate::error::HandlerFailure;
use crate::rows::TextRow;

pub trait Transform: Send + Sync {
    /// Takes ownership of [TextRow] and returns it.
    ///
    /// A failing transform hands the row back inside its [HandlerFailure].
    fn transform_own(&self, row: TextRow) -> Result<TextRow, HandlerFailure>;
}

/// Transform chaining, adding multiple transforms and
/// applying them in insertion order, in one step.
#[derive(Default)]
pub struct Transformer(Vec<Box<dyn Transform>>);

impl Transformer {
    pub fn add(&mut self, transform: Box<dyn Transform>) -> &mut Transformer {
        self.0.push(transform);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Transform for Transformer {
    fn transform_own(&self, row: TextRow) -> Result<TextRow, HandlerFailure> {
        self.0
            .iter()
            .try_fold(row, |row, transform| transform.transform_own(row))
    }
}
