//! Line-oriented patching of the `applicationId` declaration in Android
//! `build.gradle` files.
//!
//! This crate provides:
//! - A generic line rewrite engine: scan a text stream, match each line
//!   against a set of pattern/handler rules, conditionally rewrite matched
//!   lines, and preserve everything else byte-for-byte.
//! - The applicationId update policy: one rule recognizing the declaration
//!   and rewriting its value with quote normalization, reporting the value
//!   found and the number of lines updated.
//! - Quote utilities shared by the policy and by callers exporting the final
//!   value as a plain string.
//!
//! # Example
//!
//! ```
//! use appid_rewrite::update_application_id;
//!
//! let gradle = r#"applicationId "com.mycompany.myapp""#;
//! let report = update_application_id(gradle.as_bytes(), "com.mynewcompany.mynewapp").unwrap();
//!
//! assert_eq!(report.new_content, r#"applicationId "com.mynewcompany.mynewapp""#);
//! assert_eq!(report.final_application_id, r#""com.mynewcompany.mynewapp""#);
//! assert_eq!(report.updated_count, 1);
//! ```

mod engine;
mod error;
mod quote;
mod updater;

pub use engine::{Handler, Rule, RuleSet, rewrite};
pub use error::{RewriteError, RewriteResult};
pub use quote::{ensure_double_quoted, strip_quotation_marks};
pub use updater::{
    APPLICATION_ID_PATTERN, ApplicationIdUpdater, UpdateReport, update_application_id,
};
