mod asset_resolver;
mod report_composer;
mod report_service;

pub use asset_resolver::AssetResolver;
pub use report_composer::ReportComposer;
pub use report_service::ReportService;
