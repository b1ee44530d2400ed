//! Translates the action names in slash-command game macros between
//! English, German and French, leaving everything else on the line intact.

pub mod error;
pub mod logging;
pub mod model;
pub mod parsers;
pub mod protocol;
pub mod services;

pub use error::{CoreError, Result};
pub use model::entry::{Entry, Lang};
pub use services::dictionary::Index;
pub use services::translate::{translate_document, translate_line};
