use super::*;

use core::ops::Mul;

/// Proportional rate in hundredths of a percent. `10_000` is the whole amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, SchemaType)]
pub struct BasisPoints(u16);

impl BasisPoints {
    pub const fn new(basis_points: u16) -> Self {
        Self(basis_points)
    }

    /// Whether the rate is at most 100%.
    pub fn is_valid(&self) -> bool {
        u64::from(self.0) <= BASIS_POINTS_DENOMINATOR
    }
}

/// Share of an amount, rounded down to the nearest micro CCD.
impl Mul<Amount> for BasisPoints {
    type Output = Amount;

    fn mul(self, rhs: Amount) -> Self::Output {
        Amount::from_micro_ccd(
            (rhs.micro_ccd as u128 * self.0 as u128 / BASIS_POINTS_DENOMINATOR as u128) as u64,
        )
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_cut_is_rounded_down() {
        let rate = BasisPoints::new(1000);

        claim_eq!(rate * Amount::from_ccd(2), Amount::from_micro_ccd(200_000));
        claim_eq!(rate * Amount::from_micro_ccd(19), Amount::from_micro_ccd(1));
        claim_eq!(rate * Amount::from_micro_ccd(9), Amount::zero());
    }

    #[concordium_test]
    fn test_cut_never_exceeds_price() {
        let whole = BasisPoints::new(10_000);
        let price = Amount::from_micro_ccd(u64::MAX);

        claim_eq!(whole * price, price);
        claim_eq!(BasisPoints::new(0) * price, Amount::zero());
    }

    #[concordium_test]
    fn test_validity_bounds() {
        claim!(BasisPoints::new(0).is_valid());
        claim!(BasisPoints::new(10_000).is_valid());
        claim!(!BasisPoints::new(10_001).is_valid());
    }
}
