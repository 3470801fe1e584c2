mod analysis;
mod daily_data;
mod error;
mod generator;
mod report;
mod types;

pub use error::ClimateRiskError;

pub use daily_data::daily_frame::{DailyClimateFrame, DATE_COLUMN};
pub use daily_data::loader::{DailyDataLoader, LoadReport};

pub use types::calendar::{compute_doy, reference_doy, window_kind, WindowKind, REFERENCE_YEAR};
pub use types::event::EventKey;
pub use types::event_parameters::EventParameters;
pub use types::location::{LatLon, Location};
pub use types::seasonal_window::SeasonalWindow;
pub use types::variable::Variable;

pub use analysis::episodes::*;
pub use analysis::event_detector::{compute_event_masks, EventMasks};
pub use analysis::frequency::{summarize_event_frequency_severity, FrequencySeverityRow};
pub use analysis::seasonal_filter::*;
pub use analysis::summary::{summarize_variables, VariableSummary};
pub use analysis::yearly::*;

pub use report::labels::{Labels, Language};
pub use report::payload::*;
pub use report::text::TextReport;

pub use generator::locations::{parse_locations, sanitize_name};
pub use generator::script::{build_daily_script, ScriptRequest};
