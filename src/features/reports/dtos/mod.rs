mod report_dto;

pub use report_dto::{MetricValue, ReportRequestDto, SendReportResponseDto};
