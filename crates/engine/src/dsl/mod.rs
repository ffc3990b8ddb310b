mod directive;
mod filter;
mod order;

pub use directive::{Directive, NOT, REVERSE, SEPARATOR, Tokens, tokenize};
pub use filter::{
    BoundsCheck, FilterKind, FilterOptions, FilterTag, Predicate, build_filter, negate,
};
pub use order::{Comparator, OrderKind, build_order, extension, reverse};
