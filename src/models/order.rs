use chrono::NaiveDateTime;
use sqlx::FromRow;

/// One order as seen by the customer segmentation: who bought, where, when and for how much.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CustomerOrder {
    pub storeid: String,
    pub customerid: i64,
    pub orderid: i64,
    pub orderdate: NaiveDateTime,
    pub total_amount: f64,
}
