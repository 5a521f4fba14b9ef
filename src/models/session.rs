use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::summary::{
    CommissionSummary, OutOfDeptSummary, ReturnsSummary, ServicePlanSummary, TierBreakdown
};
use crate::models::{SaleEvent, SessionPolicy, TransactionRow};
use crate::types::{TIER_COUNT, Tier, TransactionNumber, out_of_dept_rate, service_plan_rate};

/// Running totals for one session.
///
/// Owned by the engine, mutated by each process call, reset wholesale by
/// `clear`, never persisted. Deductions are stored beside the sales totals
/// and only netted out at summary time, so re-processing never compounds a
/// subtraction.
#[derive(Debug, Clone)]
pub struct SessionStats {
    tier_sales: [Decimal; TIER_COUNT],
    tier_returns: [Decimal; TIER_COUNT],
    deductions: [Decimal; TIER_COUNT],
    service_plan_total: Decimal,
    out_of_dept_total: Decimal,
    returns_count: u64,
    seen_customers: HashSet<TransactionNumber>,
    // Accumulation is cumulative across pages; the memo recognizes an
    // unchanged paste so it is not counted twice.
    prev_table: Option<Vec<TransactionRow>>
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            tier_sales: [Decimal::ZERO; TIER_COUNT],
            tier_returns: [Decimal::ZERO; TIER_COUNT],
            deductions: [Decimal::ZERO; TIER_COUNT],
            service_plan_total: Decimal::ZERO,
            out_of_dept_total: Decimal::ZERO,
            returns_count: 0,
            seen_customers: HashSet::new(),
            prev_table: None
        }
    }

    /// Reinitializes every running total, the customer set, and the memo.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Whether `rows` is exactly the table committed by the previous process
    /// call.
    pub fn is_repeat(&self, rows: &[TransactionRow]) -> bool {
        self.prev_table.as_deref() == Some(rows)
    }

    /// Applies a fully validated batch of events and memoizes its table.
    pub fn commit(&mut self, rows: Vec<TransactionRow>, events: &[SaleEvent]) {
        for event in events {
            match event {
                SaleEvent::Sale { tier, total } | SaleEvent::Exchange { tier, total } => {
                    self.tier_sales[tier.index()] += *total;
                }
                SaleEvent::ServicePlan { total } => {
                    self.service_plan_total += *total;
                }
                SaleEvent::Return { tier, total, quantity } => {
                    self.tier_returns[tier.index()] += *total;
                    self.returns_count += u64::from(*quantity);
                }
                SaleEvent::Ignored => {}
            }
        }

        self.prev_table = Some(rows);
    }

    /// Records the distinct transaction numbers of every retained row.
    ///
    /// Runs on every process call, repeated tables included; the set makes
    /// that idempotent.
    pub fn record_customers(&mut self, rows: &[TransactionRow]) {
        for row in rows {
            self.seen_customers.insert(row.transaction_number.clone());
        }
    }

    /// Stores the per-bracket deductions and recomputes the
    /// out-of-department total as their sum.
    pub fn set_deductions(&mut self, deductions: [Decimal; TIER_COUNT]) {
        self.deductions = deductions;
        self.out_of_dept_total = deductions.iter().copied().sum();

        debug!("Out-of-department total is now {}", self.out_of_dept_total);
    }

    /// Derives the summary from the current totals. Pure; recomputed fresh on
    /// every process call.
    pub fn summarize(&self, policy: &SessionPolicy) -> CommissionSummary {
        let tier_commission: Decimal = Tier::ALL
            .iter()
            .map(|tier| (self.tier_sales[tier.index()] - self.deductions[tier.index()]) * tier.rate())
            .sum();
        let out_of_dept_commission = self.out_of_dept_total * out_of_dept_rate();
        let service_plan_commission = self.service_plan_total * service_plan_rate();
        let total_commission = tier_commission + out_of_dept_commission + service_plan_commission;

        let mut total_sales: Decimal = self.tier_sales.iter().copied().sum::<Decimal>() + self.service_plan_total;
        if policy.include_out_of_dept_in_sales {
            total_sales += self.out_of_dept_total;
        }

        // Explicit guard: an empty session reports a 0 rate, not a fault.
        let overall_rate = if total_sales.is_zero() {
            Decimal::ZERO
        } else {
            total_commission / total_sales * Decimal::ONE_HUNDRED
        };

        let tiers = Tier::ALL.map(|tier| {
            let sales = self.tier_sales[tier.index()];
            let deduction = self.deductions[tier.index()];
            let share_of_sales = if total_sales.is_zero() {
                Decimal::ZERO
            } else {
                sales / total_sales * Decimal::ONE_HUNDRED
            };

            TierBreakdown {
                label: tier.label(),
                rate: tier.rate(),
                sales,
                deduction,
                commission: (sales - deduction) * tier.rate(),
                returned: self.tier_returns[tier.index()],
                share_of_sales
            }
        });

        let returns_total: Decimal = self.tier_returns.iter().copied().sum();
        let commission_lost: Decimal = Tier::ALL
            .iter()
            .map(|tier| self.tier_returns[tier.index()] * tier.rate())
            .sum();

        CommissionSummary {
            total_commission,
            total_sales,
            customers_helped: self.seen_customers.len(),
            overall_rate,
            tiers,
            out_of_dept: OutOfDeptSummary {
                total: self.out_of_dept_total,
                commission: out_of_dept_commission
            },
            service_plan: ServicePlanSummary {
                total: self.service_plan_total,
                commission: service_plan_commission
            },
            returns: ReturnsSummary {
                count: self.returns_count,
                total: returns_total,
                commission_lost
            }
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
