mod dsl;
mod error;
mod section;

pub use dsl::*;
pub use error::{DirectiveError, SectionError, StructureError, SyntaxReason, Warning};
pub use section::{
    FILTER_HEADER, ORDER_HEADER, ParseOptions, ReaderState, Section, SectionReader,
};
