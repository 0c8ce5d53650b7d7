//! The fixed operator set for entity-query conditions.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::eq_type::EQType;
use crate::error::EntityQueryError;

/// All operators, in declaration order. Token lookup resolves against this
/// order: the first operator carrying a token wins, so `is` resolves to
/// `IS_NULL` and `is not` to `IS_NOT_NULL`.
const ALL_OPS: [EntityQueryOps; 20] = [
    EntityQueryOps::And,
    EntityQueryOps::Or,
    EntityQueryOps::Eq,
    EntityQueryOps::Neq,
    EntityQueryOps::Contains,
    EntityQueryOps::NotContains,
    EntityQueryOps::In,
    EntityQueryOps::NotIn,
    EntityQueryOps::Like,
    EntityQueryOps::LikeIc,
    EntityQueryOps::NotLike,
    EntityQueryOps::NotLikeIc,
    EntityQueryOps::Gt,
    EntityQueryOps::Ge,
    EntityQueryOps::Lt,
    EntityQueryOps::Le,
    EntityQueryOps::IsNull,
    EntityQueryOps::IsNotNull,
    EntityQueryOps::IsEmpty,
    EntityQueryOps::IsNotEmpty,
];

static TOKEN_LOOKUP: Lazy<HashMap<&'static str, EntityQueryOps>> = Lazy::new(|| {
    let mut lookup = HashMap::new();
    for op in ALL_OPS {
        for token in op.tokens() {
            lookup.entry(*token).or_insert(op);
        }
    }
    lookup
});

/// An operand type usable in an entity-query condition.
///
/// Each operator carries a token set (one canonical token plus optional
/// aliases) and knows how to render a condition to EQL text. Rendering rules
/// follow the historical contract exactly:
///
/// - scalar operators render only the first argument; extra positional
///   arguments are accepted but ignored
/// - group operands (`In`, `NotIn`) always parenthesize their argument list,
///   even for a single value
/// - the null/empty tests ignore their arguments entirely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityQueryOps {
    /// Logical conjunction: `a and b`.
    And,
    /// Logical disjunction: `a or b`.
    Or,
    /// Equality: `prop = value`.
    Eq,
    /// Inequality: `prop != value` (alias token `<>`).
    Neq,
    /// Collection membership of a value: `prop contains value`.
    Contains,
    /// Negated collection membership: `prop not contains value`.
    NotContains,
    /// Membership in a group: `prop in (a,b)`.
    In,
    /// Negated membership in a group: `prop not in (a,b)`.
    NotIn,
    /// Pattern match: `prop like value`.
    Like,
    /// Case-insensitive pattern match: `prop ilike value`.
    LikeIc,
    /// Negated pattern match: `prop not like value`.
    NotLike,
    /// Negated case-insensitive pattern match: `prop not ilike value`.
    NotLikeIc,
    /// Greater than: `prop > value`.
    Gt,
    /// Greater than or equal: `prop >= value`.
    Ge,
    /// Less than: `prop < value`.
    Lt,
    /// Less than or equal: `prop <= value`.
    Le,
    /// Null test: `prop is NULL`.
    IsNull,
    /// Negated null test: `prop is not NULL`.
    IsNotNull,
    /// Empty-collection test: `prop is EMPTY`.
    IsEmpty,
    /// Negated empty-collection test: `prop is not EMPTY`.
    IsNotEmpty,
}

impl EntityQueryOps {
    /// Returns all operators, in declaration order.
    pub const fn all() -> [Self; 20] {
        ALL_OPS
    }

    /// Returns the textual tokens for this operator. The first token is the
    /// canonical one.
    pub const fn tokens(self) -> &'static [&'static str] {
        match self {
            Self::And => &["and"],
            Self::Or => &["or"],
            Self::Eq => &["="],
            Self::Neq => &["!=", "<>"],
            Self::Contains => &["contains"],
            Self::NotContains => &["not contains"],
            Self::In => &["in"],
            Self::NotIn => &["not in"],
            Self::Like => &["like"],
            Self::LikeIc => &["ilike"],
            Self::NotLike => &["not like"],
            Self::NotLikeIc => &["not ilike"],
            Self::Gt => &[">"],
            Self::Ge => &[">="],
            Self::Lt => &["<"],
            Self::Le => &["<="],
            Self::IsNull | Self::IsEmpty => &["is"],
            Self::IsNotNull | Self::IsNotEmpty => &["is not"],
        }
    }

    /// Returns the canonical token.
    pub const fn token(self) -> &'static str {
        self.tokens()[0]
    }

    /// Returns `true` if the right-hand side is always rendered as a
    /// parenthesized group.
    pub const fn is_group_operand(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Returns `true` if this is the negative (NOT) form of another operator.
    pub const fn is_negation(self) -> bool {
        matches!(
            self,
            Self::Neq
                | Self::NotContains
                | Self::NotIn
                | Self::NotLike
                | Self::NotLikeIc
                | Self::IsNotNull
                | Self::IsNotEmpty
        )
    }

    /// Returns the reverse operand, usually the negation.
    pub const fn reverse(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
            Self::Eq => Self::Neq,
            Self::Neq => Self::Eq,
            Self::Contains => Self::NotContains,
            Self::NotContains => Self::Contains,
            Self::In => Self::NotIn,
            Self::NotIn => Self::In,
            Self::Like => Self::NotLike,
            Self::NotLike => Self::Like,
            Self::LikeIc => Self::NotLikeIc,
            Self::NotLikeIc => Self::LikeIc,
            Self::Gt => Self::Lt,
            Self::Lt => Self::Gt,
            Self::Ge => Self::Le,
            Self::Le => Self::Ge,
            Self::IsNull => Self::IsNotNull,
            Self::IsNotNull => Self::IsNull,
            Self::IsEmpty => Self::IsNotEmpty,
            Self::IsNotEmpty => Self::IsEmpty,
        }
    }

    /// Returns the multi-value equivalent of a single-value operand, e.g.
    /// the multi-value form of `Eq` is `In`. `None` when there is none.
    pub const fn resolve_multi_value_operand(single: Self) -> Option<Self> {
        match single {
            Self::Eq => Some(Self::In),
            Self::Neq => Some(Self::NotIn),
            Self::Contains | Self::NotContains | Self::In | Self::NotIn => Some(single),
            _ => None,
        }
    }

    /// Resolves a token (case-insensitive, trimmed) back to its operator.
    ///
    /// Every alias resolves: both `!=` and `<>` yield [`Self::Neq`]. When
    /// two operators share a token, the one declared first wins.
    pub fn for_token(token: &str) -> Result<Self, EntityQueryError> {
        let lookup = token.trim().to_lowercase();
        TOKEN_LOOKUP
            .get(lookup.as_str())
            .copied()
            .ok_or_else(|| EntityQueryError::UnknownToken(token.to_string()))
    }

    /// Renders a condition for this operator to EQL text.
    ///
    /// For the logical operators the arguments are joined by the token. For
    /// scalar operators only the first argument is rendered; a missing
    /// argument renders as `NULL`. Group operands always parenthesize.
    pub fn render(self, property: &str, args: &[EQType]) -> String {
        match self {
            Self::And | Self::Or => {
                let parts: Vec<String> = args.iter().map(ToString::to_string).collect();
                parts.join(&format!(" {} ", self.token()))
            }
            Self::In | Self::NotIn => {
                format!("{property} {} {}", self.token(), join_as_group(args))
            }
            Self::IsNull => format!("{property} is NULL"),
            Self::IsNotNull => format!("{property} is not NULL"),
            Self::IsEmpty => format!("{property} is EMPTY"),
            Self::IsNotEmpty => format!("{property} is not EMPTY"),
            _ => format!("{property} {} {}", self.token(), first_arg(args)),
        }
    }
}

impl fmt::Display for EntityQueryOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

fn first_arg(args: &[EQType]) -> String {
    args.first()
        .map_or_else(|| "NULL".to_string(), ToString::to_string)
}

fn join_as_group(args: &[EQType]) -> String {
    if let [EQType::Group(group)] = args {
        return group.to_string();
    }
    let parts: Vec<String> = args.iter().map(ToString::to_string).collect();
    format!("({})", parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eq_type::EQType;

    #[test]
    fn test_scalar_operators_render_first_argument_only() {
        let args = [EQType::value(-2), EQType::value(-3)];
        assert_eq!(EntityQueryOps::Eq.render("id", &args), "id = -2");
        assert_eq!(EntityQueryOps::Neq.render("id", &args), "id != -2");
        assert_eq!(EntityQueryOps::Contains.render("id", &args), "id contains -2");
        assert_eq!(
            EntityQueryOps::NotContains.render("id", &args),
            "id not contains -2"
        );
        assert_eq!(EntityQueryOps::Gt.render("id", &args), "id > -2");
        assert_eq!(EntityQueryOps::Ge.render("id", &args), "id >= -2");
        assert_eq!(EntityQueryOps::Lt.render("id", &args), "id < -2");
        assert_eq!(EntityQueryOps::Le.render("id", &args), "id <= -2");
    }

    #[test]
    fn test_extra_arguments_do_not_change_output() {
        assert_eq!(
            EntityQueryOps::Eq.render("id", &[EQType::value(-2)]),
            EntityQueryOps::Eq.render("id", &[EQType::value(-2), EQType::value(-3)])
        );
    }

    #[test]
    fn test_string_arguments_render_quoted() {
        assert_eq!(
            EntityQueryOps::Eq.render("name", &[EQType::string("Jos")]),
            "name = 'Jos'"
        );
        assert_eq!(
            EntityQueryOps::Eq.render(
                "name",
                &[EQType::string("Jan"), EQType::string("Evert")]
            ),
            "name = 'Jan'"
        );
    }

    #[test]
    fn test_like_variants() {
        assert_eq!(
            EntityQueryOps::Like.render("name", &[EQType::string("%Jos%")]),
            "name like '%Jos%'"
        );
        assert_eq!(
            EntityQueryOps::LikeIc.render("name", &[EQType::string("Jos%")]),
            "name ilike 'Jos%'"
        );
        assert_eq!(
            EntityQueryOps::NotLike.render("name", &[EQType::string("Jos")]),
            "name not like 'Jos'"
        );
        assert_eq!(
            EntityQueryOps::NotLikeIc.render("name", &[EQType::string("Jos")]),
            "name not ilike 'Jos'"
        );
    }

    #[test]
    fn test_group_operands_always_parenthesize() {
        assert_eq!(
            EntityQueryOps::In.render("id", &[EQType::value(-1)]),
            "id in (-1)"
        );
        assert_eq!(
            EntityQueryOps::In.render("id", &[EQType::value(-2), EQType::value(-3)]),
            "id in (-2,-3)"
        );
        assert_eq!(
            EntityQueryOps::NotIn.render(
                "name",
                &[EQType::string("Jan"), EQType::string("Evert")]
            ),
            "name not in ('Jan','Evert')"
        );
    }

    #[test]
    fn test_group_operand_with_single_group_argument() {
        let group = EQType::group([EQType::value(-2), EQType::value(-3)]);
        assert_eq!(EntityQueryOps::In.render("id", &[group]), "id in (-2,-3)");
    }

    #[test]
    fn test_null_and_empty_tests_ignore_arguments() {
        let args = [EQType::value(-2), EQType::value(-3)];
        assert_eq!(EntityQueryOps::IsNull.render("id", &args), "id is NULL");
        assert_eq!(EntityQueryOps::IsNull.render("id", &[]), "id is NULL");
        assert_eq!(
            EntityQueryOps::IsNotNull.render("id", &args),
            "id is not NULL"
        );
        assert_eq!(EntityQueryOps::IsEmpty.render("id", &args), "id is EMPTY");
        assert_eq!(
            EntityQueryOps::IsNotEmpty.render("id", &args),
            "id is not EMPTY"
        );
    }

    #[test]
    fn test_logical_operators_join_arguments() {
        let args = [EQType::string("Foreach"), EQType::string("Across")];
        assert_eq!(
            EntityQueryOps::And.render("", &args),
            "'Foreach' and 'Across'"
        );
        assert_eq!(
            EntityQueryOps::Or.render("", &args),
            "'Foreach' or 'Across'"
        );
    }

    #[test]
    fn test_for_token_resolves_every_canonical_token() {
        for op in EntityQueryOps::all() {
            if matches!(op, EntityQueryOps::IsEmpty | EntityQueryOps::IsNotEmpty) {
                // Shared tokens resolve to the operator declared first.
                continue;
            }
            assert_eq!(EntityQueryOps::for_token(op.token()).unwrap(), op);
        }
    }

    #[test]
    fn test_for_token_aliases_and_collisions() {
        assert_eq!(
            EntityQueryOps::for_token("!=").unwrap(),
            EntityQueryOps::Neq
        );
        assert_eq!(
            EntityQueryOps::for_token("<>").unwrap(),
            EntityQueryOps::Neq
        );
        assert_eq!(
            EntityQueryOps::for_token("is").unwrap(),
            EntityQueryOps::IsNull
        );
        assert_eq!(
            EntityQueryOps::for_token("is not").unwrap(),
            EntityQueryOps::IsNotNull
        );
    }

    #[test]
    fn test_for_token_is_case_insensitive_and_trims() {
        assert_eq!(
            EntityQueryOps::for_token(" AND ").unwrap(),
            EntityQueryOps::And
        );
        assert_eq!(
            EntityQueryOps::for_token("Not In").unwrap(),
            EntityQueryOps::NotIn
        );
    }

    #[test]
    fn test_for_token_unknown() {
        let err = EntityQueryOps::for_token("between").unwrap_err();
        assert_eq!(err, EntityQueryError::UnknownToken("between".to_string()));
    }

    #[test]
    fn test_group_operand_flags() {
        for op in EntityQueryOps::all() {
            let expected = matches!(op, EntityQueryOps::In | EntityQueryOps::NotIn);
            assert_eq!(op.is_group_operand(), expected, "{op:?}");
        }
    }

    #[test]
    fn test_negation_and_reverse_are_consistent() {
        for op in EntityQueryOps::all() {
            assert_eq!(op.reverse().reverse(), op, "{op:?}");
        }
        assert!(EntityQueryOps::Neq.is_negation());
        assert!(!EntityQueryOps::Eq.is_negation());
        assert_eq!(EntityQueryOps::Eq.reverse(), EntityQueryOps::Neq);
        assert_eq!(EntityQueryOps::IsEmpty.reverse(), EntityQueryOps::IsNotEmpty);
    }

    #[test]
    fn test_resolve_multi_value_operand() {
        assert_eq!(
            EntityQueryOps::resolve_multi_value_operand(EntityQueryOps::Eq),
            Some(EntityQueryOps::In)
        );
        assert_eq!(
            EntityQueryOps::resolve_multi_value_operand(EntityQueryOps::Neq),
            Some(EntityQueryOps::NotIn)
        );
        assert_eq!(
            EntityQueryOps::resolve_multi_value_operand(EntityQueryOps::In),
            Some(EntityQueryOps::In)
        );
        assert_eq!(
            EntityQueryOps::resolve_multi_value_operand(EntityQueryOps::Gt),
            None
        );
    }
}
