//! Conditions and boolean query trees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::eq_type::EQType;
use crate::error::EntityQueryError;
use crate::ops::EntityQueryOps;
use crate::sort::Sort;

/// A node in a query tree: either a single condition or a nested query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityQueryExpression {
    /// A property/operator/arguments leaf.
    Condition(EntityQueryCondition),
    /// A nested boolean query.
    Query(EntityQuery),
}

impl fmt::Display for EntityQueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition(condition) => condition.fmt(f),
            Self::Query(query) => query.fmt(f),
        }
    }
}

impl From<EntityQueryCondition> for EntityQueryExpression {
    fn from(condition: EntityQueryCondition) -> Self {
        Self::Condition(condition)
    }
}

impl From<EntityQuery> for EntityQueryExpression {
    fn from(query: EntityQuery) -> Self {
        Self::Query(query)
    }
}

/// A single condition: a property, an operator and its arguments.
///
/// Rendering delegates to [`EntityQueryOps::render`], so the operator quirks
/// (first-argument-only for scalar operators, forced parentheses for group
/// operands) apply here as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityQueryCondition {
    property: String,
    operand: EntityQueryOps,
    arguments: Vec<EQType>,
}

impl EntityQueryCondition {
    /// Creates a condition on the given property.
    pub fn new(
        property: impl Into<String>,
        operand: EntityQueryOps,
        arguments: impl IntoIterator<Item = EQType>,
    ) -> Self {
        Self {
            property: property.into(),
            operand,
            arguments: arguments.into_iter().collect(),
        }
    }

    /// Returns the property this condition applies to.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Returns the operator.
    pub const fn operand(&self) -> EntityQueryOps {
        self.operand
    }

    /// Returns the arguments, in order.
    pub fn arguments(&self) -> &[EQType] {
        &self.arguments
    }
}

impl fmt::Display for EntityQueryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operand.render(&self.property, &self.arguments))
    }
}

/// A boolean query: an `and`/`or` combination of expressions with an
/// optional result ordering.
///
/// Rendering produces the EQL text the server re-parses, e.g.
/// `name = 'myName' and (city = 213 or city = 847) order by name ASC`.
/// Nested queries are parenthesized; the outermost query never is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityQuery {
    operand: EntityQueryOps,
    expressions: Vec<EntityQueryExpression>,
    sort: Option<Sort>,
}

impl Default for EntityQuery {
    fn default() -> Self {
        Self::all()
    }
}

impl EntityQuery {
    /// Creates an empty query with the given logical operand.
    ///
    /// # Errors
    ///
    /// Returns [`EntityQueryError::InvalidOperand`] when the operand is not
    /// [`EntityQueryOps::And`] or [`EntityQueryOps::Or`].
    pub fn new(operand: EntityQueryOps) -> Result<Self, EntityQueryError> {
        if !matches!(operand, EntityQueryOps::And | EntityQueryOps::Or) {
            return Err(EntityQueryError::InvalidOperand(operand.token().to_string()));
        }
        Ok(Self {
            operand,
            expressions: Vec::new(),
            sort: None,
        })
    }

    /// Creates an empty query matching all entities.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            operand: EntityQueryOps::And,
            expressions: Vec::new(),
            sort: None,
        }
    }

    /// Creates an empty query matching all entities, sorted accordingly.
    #[must_use]
    pub const fn all_sorted(sort: Sort) -> Self {
        Self {
            operand: EntityQueryOps::And,
            expressions: Vec::new(),
            sort: Some(sort),
        }
    }

    /// Merges expressions with `and`. Sub-query sorts follow the rules of
    /// [`Self::add`]: the first sort encountered is kept.
    pub fn and(expressions: impl IntoIterator<Item = EntityQueryExpression>) -> Self {
        Self::merge(EntityQueryOps::And, expressions)
    }

    /// Merges expressions with `or`. Sub-query sorts follow the rules of
    /// [`Self::add`]: the first sort encountered is kept.
    pub fn or(expressions: impl IntoIterator<Item = EntityQueryExpression>) -> Self {
        Self::merge(EntityQueryOps::Or, expressions)
    }

    fn merge(
        operand: EntityQueryOps,
        expressions: impl IntoIterator<Item = EntityQueryExpression>,
    ) -> Self {
        let mut query = Self {
            operand,
            expressions: Vec::new(),
            sort: None,
        };
        for expression in expressions {
            query.add(expression);
        }
        query
    }

    /// Adds an expression to this query.
    ///
    /// Sub-queries are normalized on the way in: a sub-query's sort is
    /// hoisted onto this query if this query has none, an empty sub-query is
    /// dropped and a sub-query with a single expression is unwrapped to that
    /// expression.
    pub fn add(&mut self, expression: impl Into<EntityQueryExpression>) {
        match expression.into() {
            EntityQueryExpression::Query(mut sub_query) => {
                if sub_query.has_sort() && !self.has_sort() {
                    self.sort = sub_query.sort.take();
                }
                sub_query.sort = None;

                match sub_query.expressions.len() {
                    0 => {}
                    1 => {
                        if let Some(single) = sub_query.expressions.pop() {
                            self.expressions.push(single);
                        }
                    }
                    _ => self.expressions.push(EntityQueryExpression::Query(sub_query)),
                }
            }
            condition => self.expressions.push(condition),
        }
    }

    /// Returns the logical operand (`and` or `or`).
    pub const fn operand(&self) -> EntityQueryOps {
        self.operand
    }

    /// Returns the expressions, in insertion order.
    pub fn expressions(&self) -> &[EntityQueryExpression] {
        &self.expressions
    }

    /// Returns the result ordering, if any.
    pub const fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// Sets or clears the result ordering.
    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort;
    }

    /// Returns `true` if a non-empty sort is present.
    pub fn has_sort(&self) -> bool {
        self.sort.as_ref().is_some_and(|sort| !sort.is_empty())
    }
}

impl fmt::Display for EntityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .expressions
            .iter()
            .map(|expression| match expression {
                EntityQueryExpression::Query(query) => format!("({query})"),
                EntityQueryExpression::Condition(condition) => condition.to_string(),
            })
            .collect();
        let mut rendered = parts.join(&format!(" {} ", self.operand.token()));

        if let Some(sort) = self.sort.as_ref().filter(|sort| !sort.is_empty()) {
            rendered.push_str(" order by ");
            rendered.push_str(&sort.to_string());
        }

        write!(f, "{}", rendered.trim())
    }
}
