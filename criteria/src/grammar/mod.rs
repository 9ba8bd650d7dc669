//! Criterion grammar shared by every criteria type.
//!
//! # Syntax Overview
//!
//! - **Criteria**: segments joined with `~`
//! - **Segment**: `name.tail.tail...`
//! - **Range tail**: `ge<num>.le<num>` (either bound optional)
//! - **Operator tail**: `operator.<and|or>.values.<v>.<v>...`
//! - **Values tail**: `values.<v>.<v>...`
//! - **Terms tail**: `<v>.<v>...`
//!
//! Numbers are `-?digit+(.digit+)?`, so `le-0.24` is a single token even
//! though it contains the segment separator.

mod constraint;
mod tail;
mod tokens;

pub use constraint::{Constraint, Operator, OperatorTerms, Range};
pub use tail::decode_tail;
pub use tokens::{parse_number, range_bound, segments, tokens, Bound};

/// Separator between criteria segments.
pub const SEGMENT_SEPARATOR: char = '~';

/// Separator between tokens of one segment.
pub const TOKEN_SEPARATOR: char = '.';

#[cfg(test)]
mod tests;
