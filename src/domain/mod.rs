// Domain layer - Pure, synchronous telemetry pipeline
//
// raw records -> sample::extract -> bucketing (sub-daily means)
//                                 or calendar + alignment (daily totals)
//                                 -> aggregation (shares)
pub mod aggregation;
pub mod alignment;
pub mod bucketing;
pub mod calendar;
pub mod dashboard;
pub mod entity;
pub mod error;
pub mod sample;
pub mod telemetry;
