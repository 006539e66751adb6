//! Filter keys and the orderings they select.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{BridgeRecord, QueryError};

/// Closed set of client-facing ranking criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingKey {
    LowestRating,
    HighestAdt,
    WorstBridgeCondition,
    /// Stable identifier order; the value clients get when they omit `filterKey`.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAttribute {
    LowestRating,
    AverageDailyTraffic,
    BridgeCondition,
    StructureNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullsOrder {
    First,
    Last,
}

/// A single ordering tuple. Every ordering ends with a structure-number
/// tie-break so equal attribute values rank the same way on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderSpec {
    pub attribute: SortAttribute,
    pub direction: Direction,
    pub nulls: NullsOrder,
}

impl RankingKey {
    pub const ALL: [Self; 4] = [
        Self::LowestRating,
        Self::HighestAdt,
        Self::WorstBridgeCondition,
        Self::Default,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LowestRating => "lowestRating",
            Self::HighestAdt => "highestADT",
            Self::WorstBridgeCondition => "worstBridgeCondition",
            Self::Default => "default",
        }
    }

    #[must_use]
    pub fn order_spec(self) -> OrderSpec {
        let (attribute, direction) = match self {
            Self::LowestRating => (SortAttribute::LowestRating, Direction::Asc),
            Self::HighestAdt => (SortAttribute::AverageDailyTraffic, Direction::Desc),
            Self::WorstBridgeCondition => (SortAttribute::BridgeCondition, Direction::Asc),
            Self::Default => (SortAttribute::StructureNumber, Direction::Asc),
        };
        OrderSpec {
            attribute,
            direction,
            nulls: NullsOrder::Last,
        }
    }
}

impl FromStr for RankingKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| QueryError::InvalidFilterKey(s.to_string()))
    }
}

impl fmt::Display for RankingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a client filter key to its ordering.
///
/// # Errors
///
/// Returns [`QueryError::InvalidFilterKey`] for any key outside
/// [`RankingKey::ALL`]. Unknown keys never fall back to a default order.
pub fn resolve(filter_key: &str) -> Result<OrderSpec, QueryError> {
    filter_key.parse::<RankingKey>().map(RankingKey::order_spec)
}

impl SortAttribute {
    /// Column name in the `bridge_core` table.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::LowestRating => "lowest_rating",
            Self::AverageDailyTraffic => "adt_029",
            Self::BridgeCondition => "bridge_condition",
            Self::StructureNumber => "structure_number_008",
        }
    }
}

impl Direction {
    fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl NullsOrder {
    fn keyword(self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

impl OrderSpec {
    /// SQL `ORDER BY` body, e.g. `adt_029 DESC NULLS LAST, structure_number_008 ASC`.
    ///
    /// Built only from the closed enums above, never from client text.
    #[must_use]
    pub fn order_by_clause(&self) -> String {
        let primary = format!(
            "{} {} {}",
            self.attribute.column(),
            self.direction.keyword(),
            self.nulls.keyword()
        );
        if self.attribute == SortAttribute::StructureNumber {
            primary
        } else {
            format!("{primary}, {} ASC", SortAttribute::StructureNumber.column())
        }
    }

    /// Total order over records, equivalent to [`Self::order_by_clause`].
    #[must_use]
    pub fn compare(&self, a: &BridgeRecord, b: &BridgeRecord) -> Ordering {
        let primary = match self.attribute {
            SortAttribute::LowestRating => self.compare_nullable(a.lowest_rating, b.lowest_rating),
            SortAttribute::AverageDailyTraffic => {
                self.compare_nullable(a.average_daily_traffic, b.average_daily_traffic)
            }
            SortAttribute::BridgeCondition => self.compare_nullable(
                a.bridge_condition.as_deref(),
                b.bridge_condition.as_deref(),
            ),
            SortAttribute::StructureNumber => self.compare_nullable(
                Some(a.structure_number.as_str()),
                Some(b.structure_number.as_str()),
            ),
        };
        primary.then_with(|| a.structure_number.cmp(&b.structure_number))
    }

    fn compare_nullable<T: Ord>(&self, a: Option<T>, b: Option<T>) -> Ordering {
        let null_rank = match self.nulls {
            NullsOrder::Last => Ordering::Greater,
            NullsOrder::First => Ordering::Less,
        };
        match (a, b) {
            (Some(a), Some(b)) => match self.direction {
                Direction::Asc => a.cmp(&b),
                Direction::Desc => b.cmp(&a),
            },
            (None, None) => Ordering::Equal,
            (None, Some(_)) => null_rank,
            (Some(_), None) => null_rank.reverse(),
        }
    }
}
