pub mod cohort;
pub mod outliers;
pub mod record;
pub mod stats;
pub mod thresholds;
