//! Aggregate question counts by category and by difficulty
//!
//! Both groupings are total functions over a borrowed slice of questions:
//! they never fail and never mutate their input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::opentdb::{Difficulty, TriviaQuestion};

/// Number of questions in one category
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CategoryGrouping {
    pub category: String,
    pub count: usize,
}

impl CategoryGrouping {
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// Number of questions at one difficulty
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyGrouping {
    pub difficulty: Difficulty,
    pub count: usize,
}

/// Count questions per category
///
/// Categories are matched by exact string equality and emitted in the order
/// they first appear in `questions`. Empty input yields an empty Vec.
pub fn group_by_category<'a, I>(questions: I) -> Vec<CategoryGrouping>
where
    I: IntoIterator<Item = &'a TriviaQuestion>,
{
    let mut groupings: Vec<CategoryGrouping> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for question in questions {
        match positions.get(question.category.as_str()) {
            Some(&idx) => groupings[idx].count += 1,
            None => {
                positions.insert(&question.category, groupings.len());
                groupings.push(CategoryGrouping::new(question.category.as_str(), 1));
            }
        }
    }

    groupings
}

/// Count questions per canonical difficulty
///
/// Always returns easy, medium and hard in that order, with zero counts when
/// nothing matches. Questions whose difficulty is not canonical are left out.
pub fn group_by_difficulty<'a, I>(questions: I) -> [DifficultyGrouping; 3]
where
    I: IntoIterator<Item = &'a TriviaQuestion>,
{
    let mut groupings = Difficulty::CANONICAL.map(|difficulty| DifficultyGrouping {
        difficulty,
        count: 0,
    });

    for question in questions {
        if let Some(grouping) = groupings
            .iter_mut()
            .find(|g| g.difficulty == question.difficulty)
        {
            grouping.count += 1;
        }
    }

    groupings
}

/// Keep only the questions in `category`; `None` keeps everything
pub fn filter_by_category<'a>(
    questions: &'a [TriviaQuestion],
    category: Option<&str>,
) -> Vec<&'a TriviaQuestion> {
    questions
        .iter()
        .filter(|q| category.is_none_or(|c| q.category == c))
        .collect()
}

/// Distinct categories, sorted by code point
pub fn distinct_categories<'a, I>(questions: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a TriviaQuestion>,
{
    let mut categories: Vec<String> = group_by_category(questions)
        .into_iter()
        .map(|g| g.category)
        .collect();
    categories.sort();
    categories
}
