use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const INR_CURRENCY_CODE: &str = "INR";

//--------------------------------------       Paise         ---------------------------------------------------------
/// An INR amount in paise (1/100th of a rupee). All monetary values in the gateway are fixed-point
/// i64 paise; floating point never touches an amount.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Paise(i64);

op!(binary Paise, Add, add);
op!(binary Paise, Sub, sub);
op!(inplace Paise, SubAssign, sub_assign);
op!(unary Paise, Neg, neg);

impl Mul<i64> for Paise {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paise: {0}")]
pub struct PaiseConversionError(String);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Paise {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Paise {}

impl TryFrom<u64> for Paise {
    type Error = PaiseConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(PaiseConversionError(format!("Value {} is too large to convert to Paise", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rupees = self.0 / 100;
        let paise = (self.0 % 100).abs();
        write!(f, "₹{rupees}.{paise:02}")
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// Whole-rupee part of the amount. Sub-rupee paise are truncated.
    pub fn rupees(&self) -> i64 {
        self.0 / 100
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rupee_conversions() {
        let amount = Paise::from_rupees(425);
        assert_eq!(amount.value(), 42_500);
        assert_eq!(amount.rupees(), 425);
    }

    #[test]
    fn arithmetic() {
        let total: Paise = [100, 250, 75].into_iter().map(Paise::from_rupees).sum();
        assert_eq!(total, Paise::from_rupees(425));
        assert_eq!(Paise::from_rupees(10) * 3, Paise::from_rupees(30));
        assert_eq!(Paise::from_rupees(10) - Paise::from_rupees(4), Paise::from_rupees(6));
    }

    #[test]
    fn display() {
        assert_eq!(Paise::from(150_050).to_string(), "₹1500.50");
        assert_eq!(Paise::from_rupees(500).to_string(), "₹500.00");
    }

    #[test]
    fn positivity() {
        assert!(Paise::from_rupees(1).is_positive());
        assert!(!Paise::from(0).is_positive());
        assert!(!Paise::from(-100).is_positive());
    }
}
