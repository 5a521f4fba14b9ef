use crate::engine::ClassifyError;
use crate::models::{SaleEvent, SaleType, SessionPolicy, TransactionRow};
use crate::types::Tier;
use crate::types::currency::{parse_amount, parse_wrapped_amount};

/// Validates and classifies a whole table before anything is committed.
///
/// One bad row fails the batch; the caller only mutates the accumulator on a
/// fully classified table.
pub fn classify_rows(rows: &[TransactionRow], policy: &SessionPolicy) -> Result<Vec<SaleEvent>, ClassifyError> {
    rows.iter().map(|row| classify_row(row, policy)).collect()
}

fn classify_row(row: &TransactionRow, policy: &SessionPolicy) -> Result<SaleEvent, ClassifyError> {
    let Some(kind) = row.kind() else {
        return Ok(SaleEvent::Ignored);
    };

    match kind {
        SaleType::Sale => {
            let total = parse_amount(&row.total)
                .map_err(|error| ClassifyError::currency(row, "total", error))?;

            // Service plans bypass the brackets and earn a flat rate.
            if row.is_service_plan() {
                return Ok(SaleEvent::ServicePlan { total });
            }

            let unit_price = parse_amount(&row.unit_price)
                .map_err(|error| ClassifyError::currency(row, "unit price", error))?;
            let tier = Tier::classify(unit_price)
                .map_err(|error| ClassifyError::schedule(row, error))?;

            Ok(SaleEvent::Sale { tier, total })
        }
        SaleType::Exchange => {
            // Exchange totals come wrapped, and the total itself picks the
            // bracket; quantity does not matter.
            let total = parse_wrapped_amount(&row.total)
                .map_err(|error| ClassifyError::currency(row, "total", error))?;
            let tier = Tier::classify(total)
                .map_err(|error| ClassifyError::schedule(row, error))?;

            Ok(SaleEvent::Exchange { tier, total })
        }
        SaleType::Return => {
            let total = parse_wrapped_amount(&row.total)
                .map_err(|error| ClassifyError::currency(row, "total", error))?;
            let tier = Tier::classify(total)
                .map_err(|error| ClassifyError::schedule(row, error))?;
            let quantity = if policy.count_returns_by_quantity {
                row.quantity.trim().parse::<u32>().map_err(|_| ClassifyError::quantity(row))?
            } else {
                1
            };

            Ok(SaleEvent::Return { tier, total, quantity })
        }
    }
}
