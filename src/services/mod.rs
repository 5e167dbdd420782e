pub mod outcome;
pub mod page_parser;
pub mod report_writer;

pub use page_parser::PageParser;
pub use report_writer::ReportWriter;
