pub mod formatter;

pub use formatter::{format_classpath, format_status, print_view};
