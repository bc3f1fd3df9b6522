pub mod formatting;

pub use formatting::format_tag;
