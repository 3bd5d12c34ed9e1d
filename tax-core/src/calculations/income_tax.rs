//! Personal income tax calculation.
//!
//! Taxable income is gross income minus the personal allowance and any
//! donation allowances (each capped at [`DONATION_CAP`]). The result is run
//! through a [`BracketTable`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{Allowance, IncomeTaxCalculator};
//!
//! let calculator = IncomeTaxCalculator::standard();
//!
//! // 1,000,000 - 60,000 - min(150,000, 100,000) = 840,000 taxable
//! let tax = calculator.compute_tax(dec!(1000000), &[Allowance::donation(dec!(150000))]);
//!
//! assert_eq!(tax, dec!(86000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::BracketTable;
use crate::models::{Allowance, AllowanceType, TaxComputationInput, TaxComputationResult};

/// Deduction every filer receives.
pub const PERSONAL_ALLOWANCE: Decimal = Decimal::from_parts(60_000, 0, 0, false, 0);

/// Most a single donation allowance may deduct.
pub const DONATION_CAP: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Computes tax with the standard bracket table and allowances.
///
/// # Arguments
///
/// * `total_income` - Gross income for the year; may be zero or negative
/// * `allowances` - Itemized allowances claimed; only donations deduct
///
/// # Returns
///
/// The tax owed, unrounded. Zero when income does not exceed the allowances.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::compute_tax;
///
/// assert_eq!(compute_tax(dec!(500000), &[]), dec!(29000));
/// assert_eq!(compute_tax(dec!(50000), &[]), dec!(0));
/// ```
pub fn compute_tax(
    total_income: Decimal,
    allowances: &[Allowance],
) -> Decimal {
    IncomeTaxCalculator::standard().compute_tax(total_income, allowances)
}

/// Stateless income tax calculator.
///
/// Holds only immutable configuration, so a single instance can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeTaxCalculator<'a> {
    table: BracketTable<'a>,
    personal_allowance: Decimal,
    donation_cap: Decimal,
}

impl IncomeTaxCalculator<'static> {
    pub const fn standard() -> Self {
        Self::new(BracketTable::standard(), PERSONAL_ALLOWANCE, DONATION_CAP)
    }
}

impl Default for IncomeTaxCalculator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IncomeTaxCalculator<'a> {
    pub const fn new(
        table: BracketTable<'a>,
        personal_allowance: Decimal,
        donation_cap: Decimal,
    ) -> Self {
        Self {
            table,
            personal_allowance,
            donation_cap,
        }
    }

    /// Tax owed on `total_income` after `allowances`.
    ///
    /// Never fails. Income at or below the total allowance yields zero.
    pub fn compute_tax(
        &self,
        total_income: Decimal,
        allowances: &[Allowance],
    ) -> Decimal {
        let taxable_income = self.taxable_income(total_income, allowances);
        self.table.tax_for(taxable_income)
    }

    /// Computes the tax together with its per-bracket breakdown.
    ///
    /// # Arguments
    ///
    /// * `input` - Income, withholding and allowances for one filer. The
    ///   withholding (`wht`) is carried but not applied.
    ///
    /// # Returns
    ///
    /// A [`TaxComputationResult`] holding the total tax and one
    /// [`TaxLevel`](crate::TaxLevel) per bracket, in table order. The level
    /// taxes always sum to the total.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{Allowance, IncomeTaxCalculator, TaxComputationInput};
    ///
    /// let input = TaxComputationInput {
    ///     total_income: dec!(700000),
    ///     wht: dec!(0),
    ///     allowances: vec![Allowance::donation(dec!(20000))],
    /// };
    ///
    /// let result = IncomeTaxCalculator::standard().calculate(&input);
    ///
    /// // taxable 620000: 35000 + 120000 * 0.15
    /// assert_eq!(result.tax, dec!(53000));
    /// assert_eq!(result.tax_levels.len(), 5);
    /// assert_eq!(result.tax_levels[2].level, "500,001-1,000,000");
    /// ```
    pub fn calculate(
        &self,
        input: &TaxComputationInput,
    ) -> TaxComputationResult {
        let taxable_income = self.taxable_income(input.total_income, &input.allowances);
        let tax = self.table.tax_for(taxable_income);

        debug!(
            total_income = %input.total_income,
            allowances = input.allowances.len(),
            %taxable_income,
            %tax,
            "computed income tax"
        );

        TaxComputationResult {
            tax,
            tax_levels: self.table.levels_for(taxable_income),
        }
    }

    /// Personal allowance plus every eligible itemized allowance.
    fn total_allowance(
        &self,
        allowances: &[Allowance],
    ) -> Decimal {
        allowances
            .iter()
            .map(|a| self.effective_allowance(a))
            .fold(self.personal_allowance, Decimal::saturating_add)
    }

    /// Amount a single allowance deducts. Only donations count, up to the cap.
    fn effective_allowance(
        &self,
        allowance: &Allowance,
    ) -> Decimal {
        match allowance.allowance_type {
            AllowanceType::Donation => allowance.amount.min(self.donation_cap),
            AllowanceType::KReceipt | AllowanceType::Other(_) => Decimal::ZERO,
        }
    }

    fn taxable_income(
        &self,
        total_income: Decimal,
        allowances: &[Allowance],
    ) -> Decimal {
        total_income.saturating_sub(self.total_allowance(allowances))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxBracket;

    fn other(
        tag: &str,
        amount: Decimal,
    ) -> Allowance {
        Allowance::new(AllowanceType::from(tag.to_string()), amount)
    }

    #[test]
    fn constants_hold_statutory_values() {
        const STANDARD: IncomeTaxCalculator<'static> = IncomeTaxCalculator::standard();

        assert_eq!(PERSONAL_ALLOWANCE, dec!(60000));
        assert_eq!(DONATION_CAP, dec!(100000));
        assert_eq!(STANDARD, IncomeTaxCalculator::default());
    }

    // =========================================================================
    // effective_allowance tests
    // =========================================================================

    #[test]
    fn effective_allowance_counts_donation_below_cap() {
        let calculator = IncomeTaxCalculator::standard();

        let result = calculator.effective_allowance(&Allowance::donation(dec!(25000)));

        assert_eq!(result, dec!(25000));
    }

    #[test]
    fn effective_allowance_caps_donation() {
        let calculator = IncomeTaxCalculator::standard();

        let result = calculator.effective_allowance(&Allowance::donation(dec!(150000)));

        assert_eq!(result, DONATION_CAP);
    }

    #[test]
    fn effective_allowance_ignores_other_tags() {
        let calculator = IncomeTaxCalculator::standard();

        assert_eq!(
            calculator.effective_allowance(&other("insurance", dec!(50000))),
            Decimal::ZERO
        );
        assert_eq!(
            calculator.effective_allowance(&other("k-receipt", dec!(50000))),
            Decimal::ZERO
        );
    }

    // =========================================================================
    // total_allowance tests
    // =========================================================================

    #[test]
    fn total_allowance_starts_at_personal_allowance() {
        let calculator = IncomeTaxCalculator::standard();

        let result = calculator.total_allowance(&[]);

        assert_eq!(result, PERSONAL_ALLOWANCE);
    }

    #[test]
    fn total_allowance_caps_each_donation_separately() {
        let calculator = IncomeTaxCalculator::standard();
        let allowances = [
            Allowance::donation(dec!(120000)),
            Allowance::donation(dec!(30000)),
            other("insurance", dec!(1000000)),
        ];

        let result = calculator.total_allowance(&allowances);

        // 60000 + 100000 + 30000
        assert_eq!(result, dec!(190000));
    }

    // =========================================================================
    // compute_tax tests
    // =========================================================================

    #[test]
    fn compute_tax_no_income_no_tax() {
        assert_eq!(compute_tax(dec!(0), &[]), Decimal::ZERO);
    }

    #[test]
    fn compute_tax_income_under_personal_allowance() {
        assert_eq!(compute_tax(dec!(50000), &[]), Decimal::ZERO);
        assert_eq!(compute_tax(dec!(60000), &[]), Decimal::ZERO);
    }

    #[test]
    fn compute_tax_negative_income() {
        assert_eq!(compute_tax(dec!(-250000), &[]), Decimal::ZERO);
    }

    #[test]
    fn compute_tax_taxable_income_in_zero_rate_bracket() {
        // taxable 140000
        assert_eq!(compute_tax(dec!(200000), &[]), Decimal::ZERO);
    }

    #[test]
    fn compute_tax_ten_percent_bracket() {
        // taxable 440000: (440000 - 150000) * 0.10
        assert_eq!(compute_tax(dec!(500000), &[]), dec!(29000));
    }

    #[test]
    fn compute_tax_fifteen_percent_bracket() {
        // taxable 640000: 35000 + 140000 * 0.15
        assert_eq!(compute_tax(dec!(700000), &[]), dec!(56000));
    }

    #[test]
    fn compute_tax_twenty_percent_bracket() {
        // taxable 1440000: 110000 + 440000 * 0.20
        assert_eq!(compute_tax(dec!(1500000), &[]), dec!(198000));
    }

    #[test]
    fn compute_tax_top_bracket() {
        // taxable 2940000: 310000 + 940000 * 0.35
        assert_eq!(compute_tax(dec!(3000000), &[]), dec!(639000));
    }

    #[test]
    fn compute_tax_with_donation_cap() {
        let allowances = [Allowance::donation(dec!(150000))];

        // taxable 840000: 35000 + 340000 * 0.15
        assert_eq!(compute_tax(dec!(1000000), &allowances), dec!(86000));
    }

    #[test]
    fn compute_tax_unknown_allowance_contributes_nothing() {
        let allowances = [other("insurance", dec!(500000))];

        assert_eq!(
            compute_tax(dec!(700000), &allowances),
            compute_tax(dec!(700000), &[])
        );
    }

    #[test]
    fn compute_tax_does_not_modify_allowances() {
        let allowances = vec![Allowance::donation(dec!(150000))];
        let before = allowances.clone();

        let first = compute_tax(dec!(1000000), &allowances);
        let second = compute_tax(dec!(1000000), &allowances);

        assert_eq!(allowances, before);
        assert_eq!(first, second);
    }

    #[test]
    fn compute_tax_with_custom_configuration() {
        let brackets = [
            TaxBracket {
                min_income: dec!(0),
                max_income: Some(dec!(1000)),
                tax_rate: dec!(0.10),
                base_tax: dec!(0),
            },
            TaxBracket {
                min_income: dec!(1000),
                max_income: None,
                tax_rate: dec!(0.50),
                base_tax: dec!(100),
            },
        ];
        let table = BracketTable::new(&brackets).unwrap();
        let calculator = IncomeTaxCalculator::new(table, dec!(500), dec!(200));

        let tax = calculator.compute_tax(dec!(2000), &[Allowance::donation(dec!(1000))]);

        // taxable 2000 - 500 - 200 = 1300: 100 + 300 * 0.50
        assert_eq!(tax, dec!(250));
    }

    #[test]
    fn compute_tax_saturates_at_decimal_limits() {
        assert_eq!(compute_tax(Decimal::MIN, &[]), Decimal::ZERO);
        assert!(compute_tax(Decimal::MAX, &[]) > Decimal::ZERO);
    }

    #[test]
    fn compute_tax_saturates_with_extreme_negative_donations() {
        let allowances = [Allowance::donation(Decimal::MIN), Allowance::donation(Decimal::MIN)];

        let tax = compute_tax(Decimal::MAX, &allowances);

        assert!(tax > Decimal::ZERO);
        assert_eq!(
            IncomeTaxCalculator::standard().total_allowance(&allowances),
            Decimal::MIN
        );
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_returns_tax_and_levels() {
        let calculator = IncomeTaxCalculator::standard();
        let input = TaxComputationInput {
            total_income: dec!(500000),
            wht: dec!(0),
            allowances: vec![Allowance::donation(dec!(200000))],
        };

        let result = calculator.calculate(&input);

        // taxable 340000: (340000 - 150000) * 0.10
        assert_eq!(result.tax, dec!(19000));
        assert_eq!(result.tax_levels.len(), 5);
        assert_eq!(result.tax_levels[0].tax, dec!(0));
        assert_eq!(result.tax_levels[1].tax, dec!(19000));
        assert_eq!(result.tax_levels[1].level, "150,001-500,000");
    }

    #[test]
    fn calculate_ignores_withholding() {
        let calculator = IncomeTaxCalculator::standard();
        let mut input = TaxComputationInput {
            total_income: dec!(700000),
            wht: dec!(0),
            allowances: Vec::new(),
        };
        let without_wht = calculator.calculate(&input);
        input.wht = dec!(25000);

        let with_wht = calculator.calculate(&input);

        assert_eq!(with_wht, without_wht);
    }

    #[test]
    fn calculate_matches_compute_tax() {
        let calculator = IncomeTaxCalculator::standard();
        let input = TaxComputationInput {
            total_income: dec!(2345678.90),
            wht: dec!(0),
            allowances: vec![Allowance::donation(dec!(12345.67))],
        };

        let result = calculator.calculate(&input);

        assert_eq!(
            result.tax,
            calculator.compute_tax(input.total_income, &input.allowances)
        );
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #[test]
        fn compute_tax_is_monotonic_in_income(
            low in -1_000_000i64..5_000_000,
            delta in 0i64..5_000_000,
            donation in 0i64..300_000,
        ) {
            let allowances = [Allowance::donation(Decimal::from(donation))];
            let lower = compute_tax(Decimal::from(low), &allowances);
            let higher = compute_tax(Decimal::from(low + delta), &allowances);

            prop_assert!(lower <= higher);
        }

        #[test]
        fn compute_tax_is_non_negative(income in -5_000_000i64..10_000_000) {
            prop_assert!(compute_tax(Decimal::from(income), &[]) >= Decimal::ZERO);
        }

        #[test]
        fn levels_always_sum_to_tax(
            income in 0i64..10_000_000,
            donation in 0i64..300_000,
        ) {
            let calculator = IncomeTaxCalculator::standard();
            let input = TaxComputationInput {
                total_income: Decimal::from(income),
                wht: Decimal::ZERO,
                allowances: vec![Allowance::donation(Decimal::from(donation))],
            };

            let result = calculator.calculate(&input);
            let sum: Decimal = result.tax_levels.iter().map(|l| l.tax).sum();

            prop_assert_eq!(sum, result.tax);
        }
    }
}
