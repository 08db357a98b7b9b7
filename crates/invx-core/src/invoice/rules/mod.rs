//! Rule-based field extractors for line-oriented invoice text.
//!
//! Every rule is a pure function over the document lines. Rules look at the
//! whitespace-normalized form of a line to find it, then read the value from
//! the original line. A rule that finds nothing returns an empty value.

pub mod amounts;
pub mod block;
pub mod dates;
pub mod labels;
pub mod normalize;
pub mod patterns;

pub use amounts::{extract_marked_amount, format_amount_us, parse_amount, MarkedAmountExtractor};
pub use block::{extract_block, BlockExtractor};
pub use dates::{normalize_date, parse_date};
pub use labels::{
    extract_pair, extract_prefixed, extract_value, LabelExtractor, PairExtractor, PrefixExtractor,
};
pub use normalize::normalize;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces. Its default is the miss value.
    type Output: Default;

    /// Extract the field from the document lines.
    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Self::Output;
}
