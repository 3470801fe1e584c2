pub mod calendar;
pub mod event;
pub mod event_parameters;
pub mod location;
pub mod seasonal_window;
pub mod variable;
