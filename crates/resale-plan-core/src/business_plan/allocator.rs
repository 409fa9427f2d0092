use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

use super::inputs::ProjectInputs;
use crate::types::Money;

/// The three capital sources, drawn in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingSource {
    /// Source A: primary credit facility
    PrimaryCredit,
    /// Source B: equity / cash
    Equity,
    /// Source C: secondary (accompaniment) credit
    SecondaryCredit,
}

impl FundingSource {
    /// Draw-down priority.
    pub const PRIORITY: [FundingSource; 3] = [
        FundingSource::PrimaryCredit,
        FundingSource::Equity,
        FundingSource::SecondaryCredit,
    ];
}

/// One amount per funding source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceAmounts {
    pub primary_credit: Money,
    pub equity: Money,
    pub secondary_credit: Money,
}

impl SourceAmounts {
    fn get_mut(&mut self, source: FundingSource) -> &mut Money {
        match source {
            FundingSource::PrimaryCredit => &mut self.primary_credit,
            FundingSource::Equity => &mut self.equity,
            FundingSource::SecondaryCredit => &mut self.secondary_credit,
        }
    }

    pub fn total(&self) -> Money {
        self.primary_credit + self.equity + self.secondary_credit
    }
}

impl Add for SourceAmounts {
    type Output = SourceAmounts;

    fn add(self, rhs: SourceAmounts) -> SourceAmounts {
        SourceAmounts {
            primary_credit: self.primary_credit + rhs.primary_credit,
            equity: self.equity + rhs.equity,
            secondary_credit: self.secondary_credit + rhs.secondary_credit,
        }
    }
}

impl AddAssign for SourceAmounts {
    fn add_assign(&mut self, rhs: SourceAmounts) {
        *self = *self + rhs;
    }
}

/// Result of a single funding call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Amount taken from each source by this call
    pub draws: SourceAmounts,
    /// Part of the request no source could cover
    pub unfunded: Money,
}

impl Allocation {
    pub fn absorb(&mut self, other: Allocation) {
        self.draws += other.draws;
        self.unfunded += other.unfunded;
    }
}

/// Running state of the three financing envelopes for one simulation.
///
/// Capacity only decreases and outstanding balances only increase: nothing is
/// repaid before the resale.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancingState {
    envelopes: SourceAmounts,
    remaining: SourceAmounts,
    drawn: SourceAmounts,
    outstanding: SourceAmounts,
}

impl FinancingState {
    pub fn new(envelopes: SourceAmounts) -> Self {
        Self {
            envelopes,
            remaining: envelopes,
            drawn: SourceAmounts::default(),
            outstanding: SourceAmounts::default(),
        }
    }

    pub fn from_inputs(inputs: &ProjectInputs) -> Self {
        Self::new(SourceAmounts {
            primary_credit: inputs.primary_credit_amount,
            equity: inputs.equity_amount,
            secondary_credit: inputs.secondary_credit_amount,
        })
    }

    /// Fund `amount` from the sources in priority order.
    ///
    /// Whatever the three sources cannot cover is returned as `unfunded`
    /// instead of failing. Negative requests are treated as zero.
    pub fn allocate(&mut self, amount: Money) -> Allocation {
        let mut to_fund = amount.max(Decimal::ZERO);
        let mut draws = SourceAmounts::default();

        for source in FundingSource::PRIORITY {
            if to_fund <= Decimal::ZERO {
                break;
            }
            let capacity = self.remaining.get_mut(source);
            let draw = to_fund.min(*capacity).max(Decimal::ZERO);
            *capacity -= draw;
            *self.drawn.get_mut(source) += draw;
            *self.outstanding.get_mut(source) += draw;
            *draws.get_mut(source) = draw;
            to_fund -= draw;
        }

        Allocation {
            draws,
            unfunded: to_fund,
        }
    }

    /// Initial envelope sizes.
    pub fn envelopes(&self) -> &SourceAmounts {
        &self.envelopes
    }

    /// Undrawn capacity.
    pub fn remaining(&self) -> &SourceAmounts {
        &self.remaining
    }

    /// Cumulative amount drawn.
    pub fn drawn(&self) -> &SourceAmounts {
        &self.drawn
    }

    /// Principal not yet repaid.
    pub fn outstanding(&self) -> &SourceAmounts {
        &self.outstanding
    }
}
