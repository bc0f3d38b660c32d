//! Summary totals over filtered lists.
//!
//! Totals are display-only. They are always computed from the records that
//! passed the current filter, never from the unfiltered list.

use crate::listing::PageView;

/// Numeric fields that can be summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    /// Litres of milk.
    Quantity,
    /// Rupees.
    Amount,
}

/// Records with summable numeric fields.
pub trait Measured {
    /// The value of `measure`, or `None` if missing or not numeric.
    fn measure(&self, measure: Measure) -> Option<f64>;
}

/// Floating-point sum of `measure`; missing values count as zero.
pub fn sum<'a, T, I>(records: I, measure: Measure) -> f64
where
    T: Measured + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .map(|r| r.measure(measure).unwrap_or(0.0))
        .sum()
}

/// Count, quantity and amount totals for a list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub count: usize,
    pub quantity: f64,
    pub amount: f64,
}

impl Totals {
    /// Totals over `records`.
    pub fn of<'a, T, I>(records: I) -> Self
    where
        T: Measured + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        records.into_iter().fold(Self::default(), |acc, r| Self {
            count: acc.count + 1,
            quantity: acc.quantity + r.measure(Measure::Quantity).unwrap_or(0.0),
            amount: acc.amount + r.measure(Measure::Amount).unwrap_or(0.0),
        })
    }

    /// Totals over every record that passed the view's filter, across all pages.
    #[must_use]
    pub fn of_view<T: Measured>(view: &PageView<'_, T>) -> Self {
        Self::of(view.filtered().iter().copied())
    }
}
