//! The eight ABO/Rh blood groups.

use serde::{Deserialize, Serialize};

/// Blood group of a donor or recipient. Maps to the PostgreSQL
/// `blood_group` enum type; the wire representation is the conventional
/// short form (`"A+"`, `"O-"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "blood_group")]
pub enum BloodGroup {
    #[sqlx(rename = "A+")]
    #[serde(rename = "A+")]
    APositive,
    #[sqlx(rename = "A-")]
    #[serde(rename = "A-")]
    ANegative,
    #[sqlx(rename = "B+")]
    #[serde(rename = "B+")]
    BPositive,
    #[sqlx(rename = "B-")]
    #[serde(rename = "B-")]
    BNegative,
    #[sqlx(rename = "AB+")]
    #[serde(rename = "AB+")]
    AbPositive,
    #[sqlx(rename = "AB-")]
    #[serde(rename = "AB-")]
    AbNegative,
    #[sqlx(rename = "O+")]
    #[serde(rename = "O+")]
    OPositive,
    #[sqlx(rename = "O-")]
    #[serde(rename = "O-")]
    ONegative,
}

/// All groups in display order, used by the stock/distribution views so
/// every group appears even when it has zero donors.
pub const ALL_BLOOD_GROUPS: [BloodGroup; 8] = [
    BloodGroup::APositive,
    BloodGroup::ANegative,
    BloodGroup::BPositive,
    BloodGroup::BNegative,
    BloodGroup::AbPositive,
    BloodGroup::AbNegative,
    BloodGroup::OPositive,
    BloodGroup::ONegative,
];

impl BloodGroup {
    /// The short wire form (`"A+"`, `"O-"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl std::str::FromStr for BloodGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_BLOOD_GROUPS
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown blood group: {s}"))
    }
}
