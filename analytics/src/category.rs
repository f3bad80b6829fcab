//! The closed set of attributes the dashboard can rank promotions by.

use std::{fmt, str::FromStr};

use dataset::Employee;
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Department,
    Region,
    Education,
    Gender,
    RecruitmentChannel,
    KpiMet,
    AwardsWon,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category {0:?}")]
pub struct ParseCategoryError(pub String);

/// Dropdown option as served to the UI.
#[derive(Clone, Debug, Serialize)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Department,
        Category::Region,
        Category::Education,
        Category::Gender,
        Category::RecruitmentChannel,
        Category::KpiMet,
        Category::AwardsWon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Department => "department",
            Category::Region => "region",
            Category::Education => "education",
            Category::Gender => "gender",
            Category::RecruitmentChannel => "recruitment_channel",
            Category::KpiMet => "kpi_met",
            Category::AwardsWon => "awards_won",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Department => "Department",
            Category::Region => "Region",
            Category::Education => "Education",
            Category::Gender => "Gender",
            Category::RecruitmentChannel => "Recruitment Channel",
            Category::KpiMet => "KPIs met > 80%?",
            Category::AwardsWon => "Awards won?",
        }
    }

    /// The normalized label this employee carries for the attribute.
    pub fn value_of<'a>(self, employee: &'a Employee) -> &'a str {
        match self {
            Category::Department => &employee.department,
            Category::Region => &employee.region,
            Category::Education => &employee.education,
            Category::Gender => employee.gender.as_str(),
            Category::RecruitmentChannel => &employee.recruitment_channel,
            Category::KpiMet => employee.kpi_met.as_str(),
            Category::AwardsWon => employee.awards_won.as_str(),
        }
    }

    pub fn options() -> Vec<CategoryOption> {
        Self::ALL
            .iter()
            .map(|category| CategoryOption {
                value: category.as_str(),
                label: category.label(),
            })
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| ParseCategoryError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_option_value() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn rejects_values_outside_the_option_set() {
        let err = "salary".parse::<Category>().unwrap_err();
        assert_eq!(err, ParseCategoryError("salary".to_string()));
    }

    #[test]
    fn serves_seven_distinct_options() {
        let options = Category::options();
        assert_eq!(options.len(), 7);
        let mut values: Vec<_> = options.iter().map(|o| o.value).collect();
        values.dedup();
        assert_eq!(values.len(), 7);
    }
}
