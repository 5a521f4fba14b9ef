use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::TIER_COUNT;

/// Everything the caller renders after a process call.
///
/// Typed fields instead of a label map; amounts carry full precision and the
/// renderer decides rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionSummary {
    pub total_commission: Decimal,
    pub total_sales: Decimal,
    pub customers_helped: usize,
    /// Overall commission rate as a percentage; 0 when total sales is zero.
    pub overall_rate: Decimal,
    pub tiers: [TierBreakdown; TIER_COUNT],
    pub out_of_dept: OutOfDeptSummary,
    pub service_plan: ServicePlanSummary,
    pub returns: ReturnsSummary
}

/// One row of the per-bracket breakdown grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierBreakdown {
    pub label: &'static str,
    pub rate: Decimal,
    pub sales: Decimal,
    pub deduction: Decimal,
    /// (sales - deduction) * rate.
    pub commission: Decimal,
    /// Returned amount bucketed into this bracket; tracked beside sales, not
    /// subtracted from them.
    pub returned: Decimal,
    /// This bracket's share of total sales as a percentage.
    pub share_of_sales: Decimal
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutOfDeptSummary {
    pub total: Decimal,
    pub commission: Decimal
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicePlanSummary {
    pub total: Decimal,
    pub commission: Decimal
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnsSummary {
    pub count: u64,
    pub total: Decimal,
    /// Commission forfeited to returns: per-bracket returned totals at their
    /// bracket rates. Reported, never subtracted from total commission.
    pub commission_lost: Decimal
}
