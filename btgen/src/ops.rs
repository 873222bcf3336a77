//! Explicit mappings from Honeycomb operator tokens to the symbolic constants
//! of the template registration system.
//!
//! Every table has an `Unknown` entry that unrecognized tokens map to.

macro_rules! symbol_table {
    (
        $(#[$meta:meta])*
        $name:ident, unknown = $unknown:literal {
            $($variant:ident => ($token:literal, $symbol:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Unknown,
        }

        impl $name {
            /// Every known entry of the table, excluding `Unknown`.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Looks up a Honeycomb token. Matching is exact.
            pub fn from_token(token: &str) -> Self {
                match token {
                    $($token => Self::$variant,)+
                    _ => Self::Unknown,
                }
            }

            /// The Honeycomb token for this entry, if it is a known one.
            pub fn token(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($token),)+
                    Self::Unknown => None,
                }
            }

            /// The qualified constant emitted into generated code.
            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol,)+
                    Self::Unknown => $unknown,
                }
            }
        }
    };
}

symbol_table! {
    /// Calculation operators, used by aggregates, orders and havings.
    AggregateOp, unknown = "api.AggregateOp_UNKNOWN" {
        Count => ("COUNT", "api.AggregateOp_COUNT"),
        Concurrency => ("CONCURRENCY", "api.AggregateOp_CONCURRENCY"),
        Sum => ("SUM", "api.AggregateOp_SUM"),
        Avg => ("AVG", "api.AggregateOp_AVG"),
        CountDistinct => ("COUNT_DISTINCT", "api.AggregateOp_COUNT_DISTINCT"),
        Heatmap => ("HEATMAP", "api.AggregateOp_HEATMAP"),
        Max => ("MAX", "api.AggregateOp_MAX"),
        Min => ("MIN", "api.AggregateOp_MIN"),
        P001 => ("P001", "api.AggregateOp_P001"),
        P01 => ("P01", "api.AggregateOp_P01"),
        P05 => ("P05", "api.AggregateOp_P05"),
        P10 => ("P10", "api.AggregateOp_P10"),
        P20 => ("P20", "api.AggregateOp_P20"),
        P25 => ("P25", "api.AggregateOp_P25"),
        P50 => ("P50", "api.AggregateOp_P50"),
        P75 => ("P75", "api.AggregateOp_P75"),
        P80 => ("P80", "api.AggregateOp_P80"),
        P90 => ("P90", "api.AggregateOp_P90"),
        P95 => ("P95", "api.AggregateOp_P95"),
        P99 => ("P99", "api.AggregateOp_P99"),
        P999 => ("P999", "api.AggregateOp_P999"),
        RateAvg => ("RATE_AVG", "api.AggregateOp_RATE_AVG"),
        RateSum => ("RATE_SUM", "api.AggregateOp_RATE_SUM"),
        RateMax => ("RATE_MAX", "api.AggregateOp_RATE_MAX"),
    }
}

symbol_table! {
    /// Filter and having comparison operators. Honeycomb spells these the
    /// way they are displayed in its UI.
    FilterOp, unknown = "api.FilterOp_UNKNOWN" {
        Equal => ("=", "api.FilterOp_EQUAL"),
        NotEqual => ("!=", "api.FilterOp_NOT_EQUAL"),
        Gt => (">", "api.FilterOp_GT"),
        Gte => (">=", "api.FilterOp_GTE"),
        Lt => ("<", "api.FilterOp_LT"),
        Lte => ("<=", "api.FilterOp_LTE"),
        Prefix => ("starts-with", "api.FilterOp_PREFIX"),
        NotPrefix => ("does-not-start-with", "api.FilterOp_NOT_PREFIX"),
        HasValue => ("exists", "api.FilterOp_HAS_VALUE"),
        NotHasValue => ("does-not-exist", "api.FilterOp_NOT_HAS_VALUE"),
        Contains => ("contains", "api.FilterOp_CONTAINS"),
        NotContains => ("does-not-contain", "api.FilterOp_NOT_CONTAINS"),
        InResult => ("in-result", "api.FilterOp_IN_RESULT"),
        JoinResult => ("join-result", "api.FilterOp_JOIN_RESULT"),
        In => ("in", "api.FilterOp_IN"),
        NotIn => ("not-in", "api.FilterOp_NOT_IN"),
    }
}

symbol_table! {
    /// How the filters of a query are combined.
    FilterCombination, unknown = "api.FilterCombinationOp_UNKNOWN" {
        And => ("AND", "api.FilterCombinationOp_AND"),
        Or => ("OR", "api.FilterCombinationOp_OR"),
    }
}

symbol_table! {
    /// How a query is displayed on a board.
    QueryStyle, unknown = "types.BoardQueryStyleUnknown" {
        Graph => ("graph", "types.BoardQueryStyleGraph"),
        Table => ("table", "types.BoardQueryStyleTable"),
        Combo => ("combo", "types.BoardQueryStyleCombo"),
    }
}

/// Sort direction of a query order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Anything other than `descending` sorts ascending, which is also what
    /// Honeycomb assumes when the direction is omitted.
    pub fn from_token(token: &str) -> Self {
        if token == "descending" {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Descending)
    }
}
