pub mod episodes;
pub mod event_detector;
pub mod frequency;
pub mod seasonal_filter;
pub mod summary;
pub mod yearly;
