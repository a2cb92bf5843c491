pub mod callback_reader;
pub mod report_writer;
