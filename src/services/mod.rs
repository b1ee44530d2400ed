pub mod dictionary;
pub mod encoding;
pub mod qa;
pub mod rebuild;
pub mod report;
pub mod settings;
pub mod translate;
