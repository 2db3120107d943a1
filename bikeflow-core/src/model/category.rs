use serde::{Deserialize, Serialize};

/// the kind of bicycle used for a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BikeType {
    #[serde(rename = "classic_bike")]
    Classic,
    #[serde(rename = "electric_bike")]
    Electric,
}

/// the membership status of the rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    Casual,
    Member,
}

impl BikeType {
    pub const ALL: [BikeType; 2] = [BikeType::Classic, BikeType::Electric];

    /// position of this category in a counts table
    pub fn index(&self) -> usize {
        match self {
            BikeType::Classic => 0,
            BikeType::Electric => 1,
        }
    }

    /// the label used in trip data files
    pub fn as_str(&self) -> &'static str {
        match self {
            BikeType::Classic => "classic_bike",
            BikeType::Electric => "electric_bike",
        }
    }

    /// human-readable label for popups
    pub fn label(&self) -> &'static str {
        match self {
            BikeType::Classic => "Classic Bike",
            BikeType::Electric => "Electric Bike",
        }
    }
}

impl MemberType {
    pub const ALL: [MemberType; 2] = [MemberType::Casual, MemberType::Member];

    /// position of this category in a counts table
    pub fn index(&self) -> usize {
        match self {
            MemberType::Casual => 0,
            MemberType::Member => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberType::Casual => "casual",
            MemberType::Member => "member",
        }
    }

    /// human-readable label for popups
    pub fn label(&self) -> &'static str {
        match self {
            MemberType::Casual => "Non-member",
            MemberType::Member => "Member",
        }
    }
}

impl std::str::FromStr for BikeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic_bike" => Ok(BikeType::Classic),
            "electric_bike" => Ok(BikeType::Electric),
            other => Err(format!(
                "unknown bike type '{other}', expected one of [classic_bike, electric_bike]"
            )),
        }
    }
}

impl std::str::FromStr for MemberType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "casual" => Ok(MemberType::Casual),
            "member" => Ok(MemberType::Member),
            other => Err(format!(
                "unknown member type '{other}', expected one of [casual, member]"
            )),
        }
    }
}

impl std::fmt::Display for BikeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for MemberType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_categories() {
        assert_eq!("classic_bike".parse::<BikeType>(), Ok(BikeType::Classic));
        assert_eq!("electric_bike".parse::<BikeType>(), Ok(BikeType::Electric));
        assert_eq!("member".parse::<MemberType>(), Ok(MemberType::Member));
        assert!("docked_bike".parse::<BikeType>().is_err());
        assert!("guest".parse::<MemberType>().is_err());
    }

    #[test]
    fn test_serde_labels_match_data_files() {
        let json = serde_json::to_string(&BikeType::Electric).unwrap();
        assert_eq!(json, r#""electric_bike""#);
        let member: MemberType = serde_json::from_str(r#""casual""#).unwrap();
        assert_eq!(member, MemberType::Casual);
    }
}
