use serde::Deserialize;

use crate::models::SaleType;

/// Field arity of a data row; lines splitting into anything else are junk.
pub const FIELD_COUNT: usize = 8;

/// A single retained row from the pasted report, fields still raw.
///
/// Currency and quantity text is parsed at classification time, not here;
/// the parser only guarantees the arity. Field order matches the report
/// export columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionRow {
    pub transaction_number: String,
    pub sale_type: String,
    pub line: String,
    pub sku: String,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: String
}

impl TransactionRow {
    pub fn kind(&self) -> Option<SaleType> {
        SaleType::from_token(self.sale_type.trim())
    }

    /// Whether the description matches the extended service plan pattern:
    /// first whitespace token numeric, second token `year`, last token `plan`.
    pub fn is_service_plan(&self) -> bool {
        let tokens: Vec<&str> = self.description.split_whitespace().collect();

        if tokens.len() < 3 {
            return false;
        }

        tokens[0].chars().all(|c| c.is_ascii_digit())
            && tokens[1].eq_ignore_ascii_case("year")
            && tokens[tokens.len() - 1].eq_ignore_ascii_case("plan")
    }
}
