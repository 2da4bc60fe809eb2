// Anomaly category vocabulary
// Closed enum validated against the classifier's declared class list.
// The variant order matches the model's output indices; Normal is index 0
// and is the only non-alertable category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArgusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Normal,
    Abuse,
    Arrest,
    Arson,
    Assault,
    Burglary,
    Explosion,
    Fighting,
    RoadAccident,
    Robbery,
    Shooting,
    Shoplifting,
    Stealing,
    Vandalism,
}

/// Full vocabulary in model index order.
pub const ALL_CATEGORIES: [Category; 14] = [
    Category::Normal,
    Category::Abuse,
    Category::Arrest,
    Category::Arson,
    Category::Assault,
    Category::Burglary,
    Category::Explosion,
    Category::Fighting,
    Category::RoadAccident,
    Category::Robbery,
    Category::Shooting,
    Category::Shoplifting,
    Category::Stealing,
    Category::Vandalism,
];

impl Category {
    /// True for every category except the background class.
    pub fn is_alertable(&self) -> bool {
        !matches!(self, Category::Normal)
    }

    /// Alertable categories in stable (model index) order.
    pub fn alertable() -> impl Iterator<Item = Category> {
        ALL_CATEGORIES.into_iter().filter(Category::is_alertable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Normal => "Normal",
            Category::Abuse => "Abuse",
            Category::Arrest => "Arrest",
            Category::Arson => "Arson",
            Category::Assault => "Assault",
            Category::Burglary => "Burglary",
            Category::Explosion => "Explosion",
            Category::Fighting => "Fighting",
            Category::RoadAccident => "RoadAccident",
            Category::Robbery => "Robbery",
            Category::Shooting => "Shooting",
            Category::Shoplifting => "Shoplifting",
            Category::Stealing => "Stealing",
            Category::Vandalism => "Vandalism",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ArgusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ArgusError::UnknownCategory(s.to_string()))
    }
}
