use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// what to do with a ride whose `rideable_type` or `member_casual` value is
/// not one of the known categories.
#[derive(Debug, Default, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// abort the aggregation, naming the row
    #[default]
    Fail,
    /// drop the row and count it as skipped
    Skip,
}

impl std::fmt::Display for UnknownCategoryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnknownCategoryPolicy::Fail => "fail",
            UnknownCategoryPolicy::Skip => "skip",
        };
        write!(f, "{s}")
    }
}
