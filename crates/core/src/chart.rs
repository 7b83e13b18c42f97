use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grouping::{
    distinct_categories, filter_by_category, group_by_category, group_by_difficulty,
    CategoryGrouping, DifficultyGrouping,
};
use crate::opentdb::TriviaQuestion;
use crate::sorting::{get_sorted_category_grouping, SortingOptions};

/// Which aggregate to chart
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Difficulty,
    Category,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Difficulty => f.write_str("difficulty"),
            ChartKind::Category => f.write_str("category"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "difficulty" => Ok(ChartKind::Difficulty),
            "category" => Ok(ChartKind::Category),
            other => Err(format!(
                "Invalid chart kind: {other}. Valid kinds: difficulty, category"
            )),
        }
    }
}

/// Aggregated series for one chart
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartData {
    Difficulty {
        groupings: Vec<DifficultyGrouping>,
    },
    Category {
        sort: SortingOptions,
        groupings: Vec<CategoryGrouping>,
    },
}

/// Complete chart output with the context needed to render it
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ChartOutput {
    /// Questions in the fetched batch
    pub total_fetched: usize,
    /// Questions left after the category filter
    pub total_questions: usize,
    pub filter: Option<String>,
    /// Every category in the batch, available as filters
    pub categories: Vec<String>,
    pub chart: ChartData,
}

/// Filter, group and sort a batch of questions into chart data
///
/// A category chart of a single filtered category is meaningless, so asking
/// for one while `filter` is set is an error.
pub fn build_chart(
    questions: &[TriviaQuestion],
    kind: ChartKind,
    filter: Option<&str>,
    sort: SortingOptions,
) -> Result<ChartOutput, String> {
    if kind == ChartKind::Category && filter.is_some() {
        return Err("Cannot group by category when a category filter is applied".to_string());
    }

    let filtered = filter_by_category(questions, filter);

    let chart = match kind {
        ChartKind::Difficulty => ChartData::Difficulty {
            groupings: group_by_difficulty(filtered.iter().copied()).to_vec(),
        },
        ChartKind::Category => ChartData::Category {
            sort,
            groupings: get_sorted_category_grouping(
                &group_by_category(filtered.iter().copied()),
                sort,
            ),
        },
    };

    Ok(ChartOutput {
        total_fetched: questions.len(),
        total_questions: filtered.len(),
        filter: filter.map(str::to_string),
        categories: distinct_categories(questions),
        chart,
    })
}
