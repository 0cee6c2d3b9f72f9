use serde::{Deserialize, Serialize};

/// Complaint class picked on the first turn.
///
/// `value()` is forwarded verbatim as the first chat message; the service
/// routes on those exact strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Road,
    Electricity,
    Water,
    Garbage,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Road,
        Category::Electricity,
        Category::Water,
        Category::Garbage,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Category::Road => "road",
            Category::Electricity => "electricity",
            Category::Water => "water",
            Category::Garbage => "garbage",
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Category::Road => "road/traffic issues",
            Category::Electricity => "electricity/power problems",
            Category::Water => "water/plumbing issues",
            Category::Garbage => "garbage/waste collection",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Road => "Road & Traffic Issues",
            Category::Electricity => "Electricity / Power Problems",
            Category::Water => "Water & Plumbing Issues",
            Category::Garbage => "Garbage & Waste Collection",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Road => "Potholes, traffic signals, road damage",
            Category::Electricity => "Power outages, electrical issues",
            Category::Water => "Leaks, supply problems, drainage",
            Category::Garbage => "Collection delays, overflowing bins",
        }
    }

    /// Exact match on the wire value.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.value() == value)
    }

    /// Case-insensitive match on the short id (`road`, `water`, ...).
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.into_iter().find(|c| c.id().eq_ignore_ascii_case(id))
    }
}
