pub mod portfolio_service;
pub mod report_service;
