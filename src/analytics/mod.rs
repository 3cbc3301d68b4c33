//! Pure computations behind the reports that SQL alone does not express:
//! quartile binning, RFM customer segmentation, box-plot summaries and KPI deltas.
//!
//! Nothing in here touches the database; handlers fetch rows and hand them over.

pub mod boxplot;
pub mod kpi;
pub mod quantile;
pub mod rfm;
