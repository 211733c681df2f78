pub mod calendar;
pub mod constraints;
pub mod range;
