pub mod export;
pub mod xlsx;

pub use export::FileReportSink;
pub use xlsx::XlsxWorkbookSource;
