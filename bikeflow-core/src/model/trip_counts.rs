use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use super::{BikeType, MemberType};

/// additive counter of rides, cross-tabulated by [`BikeType`] and [`MemberType`].
///
/// only the cross-tabulation is stored. the total and the per-category
/// marginals are derived from it, so they always agree. serializes to and
/// from the `trip_counts` shape of the aggregated dataset, see [`TripCountsRecord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TripCountsRecord", into = "TripCountsRecord")]
pub struct TripCounts {
    by_bike_and_member_type: [[u64; 2]; 2],
}

impl TripCounts {
    /// an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// a counter holding exactly one ride.
    pub fn single(bike_type: BikeType, member_type: MemberType) -> Self {
        let mut counts = Self::default();
        counts.by_bike_and_member_type[bike_type.index()][member_type.index()] = 1;
        counts
    }

    /// builds a counter from a raw snapshot. the snapshot's total and
    /// marginals must agree with its cross-tabulation.
    pub fn from_snapshot(snapshot: &TripCountsRecord) -> Result<Self, String> {
        let mut counts = Self::default();
        let mut cell_total: u64 = 0;
        for bike_type in BikeType::ALL {
            for member_type in MemberType::ALL {
                let cell = snapshot.get(bike_type, member_type);
                cell_total = cell_total.checked_add(cell).ok_or_else(|| {
                    String::from("trip counts by ride type and member type overflow a 64-bit total")
                })?;
                counts.by_bike_and_member_type[bike_type.index()][member_type.index()] = cell;
            }
        }
        counts.validate_against(snapshot)?;
        Ok(counts)
    }

    /// merges another counter into this one, field by field.
    pub fn merge(&mut self, other: &TripCounts) {
        for (row, other_row) in self
            .by_bike_and_member_type
            .iter_mut()
            .zip(other.by_bike_and_member_type.iter())
        {
            for (cell, other_cell) in row.iter_mut().zip(other_row.iter()) {
                *cell = cell.saturating_add(*other_cell);
            }
        }
    }

    pub fn total(&self) -> u64 {
        saturating_sum(self.by_bike_and_member_type.iter().flatten().copied())
    }

    pub fn by_bike_type(&self, bike_type: BikeType) -> u64 {
        saturating_sum(self.by_bike_and_member_type[bike_type.index()].iter().copied())
    }

    pub fn by_member_type(&self, member_type: MemberType) -> u64 {
        saturating_sum(
            self.by_bike_and_member_type
                .iter()
                .map(|row| row[member_type.index()]),
        )
    }

    pub fn get(&self, bike_type: BikeType, member_type: MemberType) -> u64 {
        self.by_bike_and_member_type[bike_type.index()][member_type.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn validate_against(&self, snapshot: &TripCountsRecord) -> Result<(), String> {
        let total = self.total();
        if snapshot.total != total {
            return Err(format!(
                "trip counts total {} does not match the sum of counts by ride type and member type ({total})",
                snapshot.total
            ));
        }
        for bike_type in BikeType::ALL {
            let expected = self.by_bike_type(bike_type);
            let observed = snapshot.by_ride_type.get(bike_type);
            if observed != expected {
                return Err(format!(
                    "trip counts by_ride_type.{bike_type} is {observed}, expected {expected}"
                ));
            }
        }
        for member_type in MemberType::ALL {
            let expected = self.by_member_type(member_type);
            let observed = snapshot.by_member_type.get(member_type);
            if observed != expected {
                return Err(format!(
                    "trip counts by_member_type.{member_type} is {observed}, expected {expected}"
                ));
            }
        }
        Ok(())
    }
}

fn saturating_sum<I: Iterator<Item = u64>>(values: I) -> u64 {
    values.fold(0, u64::saturating_add)
}

impl AddAssign<&TripCounts> for TripCounts {
    fn add_assign(&mut self, rhs: &TripCounts) {
        self.merge(rhs);
    }
}

impl Add for TripCounts {
    type Output = TripCounts;

    fn add(mut self, rhs: TripCounts) -> Self::Output {
        self += &rhs;
        self
    }
}

impl<'a> std::iter::Sum<&'a TripCounts> for TripCounts {
    fn sum<I: Iterator<Item = &'a TripCounts>>(iter: I) -> Self {
        iter.fold(TripCounts::default(), |mut acc, counts| {
            acc += counts;
            acc
        })
    }
}

impl TryFrom<TripCountsRecord> for TripCounts {
    type Error = String;

    fn try_from(value: TripCountsRecord) -> Result<Self, Self::Error> {
        TripCounts::from_snapshot(&value)
    }
}

/// the `trip_counts` object of an aggregated trip, as written to the dataset file.
/// unknown keys are rejected so that an unexpected ride or member category
/// fails the load instead of being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TripCountsRecord {
    pub total: u64,
    #[serde(alias = "byRideType")]
    pub by_ride_type: RideTypeCounts,
    #[serde(alias = "byMemberType")]
    pub by_member_type: MemberTypeCounts,
    #[serde(alias = "byRideTypeAndMemberType")]
    pub by_ride_type_and_member_type: RideTypeAndMemberTypeCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RideTypeCounts {
    #[serde(alias = "classicBike")]
    pub classic_bike: u64,
    #[serde(alias = "electricBike")]
    pub electric_bike: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberTypeCounts {
    pub casual: u64,
    pub member: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RideTypeAndMemberTypeCounts {
    #[serde(alias = "classicBike")]
    pub classic_bike: MemberTypeCounts,
    #[serde(alias = "electricBike")]
    pub electric_bike: MemberTypeCounts,
}

impl TripCountsRecord {
    fn get(&self, bike_type: BikeType, member_type: MemberType) -> u64 {
        let by_member = match bike_type {
            BikeType::Classic => &self.by_ride_type_and_member_type.classic_bike,
            BikeType::Electric => &self.by_ride_type_and_member_type.electric_bike,
        };
        by_member.get(member_type)
    }
}

impl RideTypeCounts {
    fn get(&self, bike_type: BikeType) -> u64 {
        match bike_type {
            BikeType::Classic => self.classic_bike,
            BikeType::Electric => self.electric_bike,
        }
    }
}

impl MemberTypeCounts {
    fn get(&self, member_type: MemberType) -> u64 {
        match member_type {
            MemberType::Casual => self.casual,
            MemberType::Member => self.member,
        }
    }
}

impl From<TripCounts> for TripCountsRecord {
    fn from(value: TripCounts) -> Self {
        let by_member = |bike_type: BikeType| MemberTypeCounts {
            casual: value.get(bike_type, MemberType::Casual),
            member: value.get(bike_type, MemberType::Member),
        };
        TripCountsRecord {
            total: value.total(),
            by_ride_type: RideTypeCounts {
                classic_bike: value.by_bike_type(BikeType::Classic),
                electric_bike: value.by_bike_type(BikeType::Electric),
            },
            by_member_type: MemberTypeCounts {
                casual: value.by_member_type(MemberType::Casual),
                member: value.by_member_type(MemberType::Member),
            },
            by_ride_type_and_member_type: RideTypeAndMemberTypeCounts {
                classic_bike: by_member(BikeType::Classic),
                electric_bike: by_member(BikeType::Electric),
            },
        }
    }
}
