use std::{
    cmp::Ordering,
    fmt,
    iter::Sum,
    marker::PhantomData,
    ops::Add,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub trait DistanceUnit: Copy + Eq {
    const NAME: &'static str;
    const METERS_IN_UNIT: f64;
}

/// Length in meters, tagged with the unit it is read and written in. Edge
/// lengths keep their full precision since itime is derived from them.
#[derive(Debug, Clone, Copy)]
pub struct Distance<T: DistanceUnit> {
    meters: f64,
    unit: PhantomData<T>,
}

macro_rules! create_distance_unit {
    ($struct_name:ident, $string_name:expr, $meters_conv:expr) => {
        #[derive(Debug, Copy, Clone, Eq, PartialEq)]
        pub struct $struct_name;

        impl DistanceUnit for $struct_name {
            const NAME: &'static str = $string_name;
            const METERS_IN_UNIT: f64 = $meters_conv;
        }
    };
}

create_distance_unit!(Meters, "meter", 1.0);
create_distance_unit!(Kilometers, "kilometer", 1_000.0);

impl<T: DistanceUnit> Distance<T> {
    pub const ZERO: Distance<T> = Distance {
        meters: 0.0,
        unit: PhantomData,
    };

    #[inline(always)]
    pub fn value(&self) -> f64 {
        self.meters / T::METERS_IN_UNIT
    }

    pub fn convert<U: DistanceUnit>(self) -> Distance<U> {
        Distance {
            meters: self.meters,
            unit: PhantomData,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.meters < 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.meters.is_finite()
    }
}

impl<T: DistanceUnit> From<f64> for Distance<T> {
    fn from(value: f64) -> Self {
        Distance {
            meters: value * T::METERS_IN_UNIT,
            unit: PhantomData,
        }
    }
}

impl<T: DistanceUnit> From<i64> for Distance<T> {
    fn from(value: i64) -> Self {
        Distance::from(value as f64)
    }
}

impl<T: DistanceUnit> From<Distance<T>> for f64 {
    fn from(value: Distance<T>) -> Self {
        value.value()
    }
}

impl<T: DistanceUnit> fmt::Display for Distance<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.value();
        write!(
            f,
            "{} {}{}",
            value,
            T::NAME,
            if value == 1.0 { "" } else { "s" }
        )
    }
}

impl<T1: DistanceUnit, T2: DistanceUnit> PartialEq<Distance<T2>> for Distance<T1> {
    fn eq(&self, other: &Distance<T2>) -> bool {
        self.meters == other.meters
    }
}

impl<T1: DistanceUnit, T2: DistanceUnit> PartialOrd<Distance<T2>> for Distance<T1> {
    fn partial_cmp(&self, other: &Distance<T2>) -> Option<Ordering> {
        self.meters.partial_cmp(&other.meters)
    }
}

impl<T1: DistanceUnit, T2: DistanceUnit> Add<Distance<T2>> for Distance<T1> {
    type Output = Distance<T1>;

    fn add(self, other: Distance<T2>) -> Distance<T1> {
        Distance {
            meters: self.meters + other.meters,
            unit: PhantomData,
        }
    }
}

impl<T: DistanceUnit> Sum for Distance<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Distance::ZERO, |acc, d| acc + d)
    }
}

impl<T: DistanceUnit> Serialize for Distance<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de, T: DistanceUnit> Deserialize<'de> for Distance<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Distance::from)
    }
}

#[macro_export]
macro_rules! meters {
    ($num:expr) => {
        $crate::distance::Distance::<$crate::distance::Meters>::from($num)
    };
}

#[macro_export]
macro_rules! kilometers {
    ($num:expr) => {
        $crate::distance::Distance::<$crate::distance::Kilometers>::from($num)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_add_distances_together() {
        let result = meters!(10) + kilometers!(1);
        assert_eq!(result, meters!(1010));
    }

    #[test]
    fn should_convert_to_kilometers() {
        let distance = meters!(1500.0).convert::<Kilometers>();
        assert_eq!(distance.value(), 1.5);
    }

    #[test]
    fn should_sum() {
        let total: Distance<Meters> = [meters!(1), meters!(2.5), meters!(3)].into_iter().sum();
        assert_eq!(total.value(), 6.5);
    }

    #[test]
    fn should_keep_fractional_meters() {
        let distance = meters!(1234.5674);
        assert_eq!(distance.value(), 1234.5674);
        assert!((distance.convert::<Kilometers>().value() - 1.2345674).abs() < 1e-12);

        assert!(meters!(0.0004).value() > 0.0);
    }
}
