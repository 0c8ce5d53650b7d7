//! Result ordering for entity queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EntityQueryError;

/// Sort direction for a single property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending, rendered `ASC`.
    Asc,
    /// Descending, rendered `DESC`.
    Desc,
}

impl Direction {
    /// Parses a direction token, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`EntityQueryError::UnknownToken`] for anything other than
    /// `asc` or `desc`.
    pub fn parse(token: &str) -> Result<Self, EntityQueryError> {
        match token.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(EntityQueryError::UnknownToken(token.to_string())),
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// A single ordering instruction: one property with a direction.
/// Renders as `property DIRECTION`, e.g. `name ASC`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    property: String,
    direction: Direction,
}

impl SortOrder {
    /// Creates an order for the given property.
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    /// Creates an ascending order.
    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Asc)
    }

    /// Creates a descending order.
    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Desc)
    }

    /// Returns the sorted property.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Returns the direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property, self.direction)
    }
}

/// An ordered list of [`SortOrder`] instructions.
///
/// Order significance decreases left to right. Adding an order for a
/// property that is already sorted replaces the old instruction and moves
/// the property to the front, which is the behavior a user expects when
/// clicking through sortable table headings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    /// Creates an empty sort.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Creates a sort from the given orders, applying the de-duplication
    /// rules of [`Self::add`] in sequence.
    pub fn from_orders(orders: impl IntoIterator<Item = SortOrder>) -> Self {
        let mut sort = Self::new();
        let mut ordered: Vec<SortOrder> = orders.into_iter().collect();
        ordered.reverse();
        for order in ordered {
            sort.add(order);
        }
        sort
    }

    /// Adds an order with the highest significance. An existing order for
    /// the same property is removed first.
    pub fn add(&mut self, order: SortOrder) {
        self.orders.retain(|o| o.property != order.property);
        self.orders.insert(0, order);
    }

    /// Returns the current orders, most significant first.
    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    /// Returns the direction currently applied to a property, if any.
    pub fn direction_of(&self, property: &str) -> Option<Direction> {
        self.orders
            .iter()
            .find(|o| o.property == property)
            .map(SortOrder::direction)
    }

    /// Returns `true` when no orders are present.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.orders.iter().map(ToString::to_string).collect();
        write!(f, "{}", joined.join(", "))
    }
}
