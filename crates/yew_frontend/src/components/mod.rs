//! Page building blocks

pub mod help;
pub mod mode_selector;
pub mod report;
pub mod upload;

pub use help::HelpPanel;
pub use mode_selector::ModeSelector;
pub use report::ReportView;
pub use upload::UploadControl;
