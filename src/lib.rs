//! LEXIS - Async dictionary translation client

pub mod consts;
pub mod logic;
pub mod model;
pub mod network;
pub mod translate;
pub mod utils;

pub use crate::consts::{Config, ConfigError};
pub use crate::logic::{format_outcome, join_texts, translate_all, TranslationQuery};
pub use crate::model::{ErrorDetail, ErrorKind, FlattenResult, Outcome, RequestDescriptor, TranslationRecord};
pub use crate::network::{Completion, HttpTransport, PendingOutcome, RequestDispatcher, Transport};
pub use crate::translate::flatten;
