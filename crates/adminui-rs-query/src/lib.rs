//! # adminui-rs-query
//!
//! Client-side entity-query expression model: typed literal values
//! ([`EQValue`], [`EQString`], [`EQGroup`], [`EQFunction`]), the fixed
//! operator set ([`EntityQueryOps`]), conditions and boolean query trees
//! ([`EntityQueryCondition`], [`EntityQuery`]) and result ordering
//! ([`Sort`], [`SortOrder`]).
//!
//! The only wire format in scope is the textual EQL rendering produced by
//! `EntityQuery::to_string()`, e.g.
//! `name = 'myName' and (city = 213 and age > 18) order by name ASC`,
//! which the server re-parses. Operator tokens round-trip through
//! [`EntityQueryOps::for_token`].

pub mod eq_type;
pub mod error;
pub mod ops;
pub mod query;
pub mod sort;

pub use eq_type::{EQFunction, EQGroup, EQString, EQType, EQValue, Scalar};
pub use error::EntityQueryError;
pub use ops::EntityQueryOps;
pub use query::{EntityQuery, EntityQueryCondition, EntityQueryExpression};
pub use sort::{Direction, Sort, SortOrder};
