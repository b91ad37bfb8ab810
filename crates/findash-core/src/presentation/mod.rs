pub mod format;
pub mod indicator;
pub mod view;

pub use format::{format_change, format_currency, format_percent, format_ratio, format_value};
pub use indicator::{donut, format_indicator, DonutPayload, Indicator};
pub use view::{month_options, render, MonthOption, Panel, Selection, View};
