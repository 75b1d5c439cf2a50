//! The applicationId update policy on top of the rewrite engine.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::engine::{Rule, RuleSet, rewrite};
use crate::error::RewriteResult;
use crate::quote::ensure_double_quoted;

/// Matches an `applicationId` declaration on a trimmed line: the keyword,
/// `=` and/or whitespace, then the value token, terminated by whitespace, a
/// `//` comment, or end of line. The value may be double-quoted,
/// single-quoted, or a bare expression such as `rootProject.ext.applicationId`.
pub const APPLICATION_ID_PATTERN: &str = r"^applicationId(?:=|\s)+(.*?)(?:\s|//|$)";

static APPLICATION_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(APPLICATION_ID_PATTERN).expect("Invalid applicationId regex")
});

/// Result of an applicationId update pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// The reconstructed file content.
    pub new_content: String,
    /// The value as it stands after the pass: the normalized new value if a
    /// substitution happened, otherwise the value found in the file (with
    /// its original quoting). Empty when no declaration matched.
    pub final_application_id: String,
    /// Number of lines updated.
    pub updated_count: usize,
}

/// Rewrites the `applicationId` declaration in a build.gradle stream.
pub struct ApplicationIdUpdater<R> {
    reader: R,
}

impl<R: BufRead> ApplicationIdUpdater<R> {
    /// Construct an updater over a build.gradle reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Run the update pass.
    ///
    /// An empty `new_application_id` reports the value currently in the file
    /// without rewriting anything. A file without any declaration is not an
    /// error: the report carries a zero count and an empty final id.
    pub fn update(self, new_application_id: &str) -> RewriteResult<UpdateReport> {
        let mut final_application_id = String::new();
        let mut updated_count = 0usize;

        let new_content = {
            let mut rules = RuleSet::new();
            rules.register(Rule::new(
                APPLICATION_ID_REGEX.clone(),
                |line, index, value| {
                    final_application_id = value.to_string();
                    if new_application_id.is_empty() {
                        return None;
                    }

                    let quoted = ensure_double_quoted(new_application_id);
                    if quoted != new_application_id {
                        warn!(
                            "Leading and/or trailing \" missing from new application id, adding quotation: {new_application_id} -> {quoted}"
                        );
                    }

                    let replaced = line.replacen(value, &quoted, 1);
                    info!("updating line ({index}): {line} -> {replaced}");
                    final_application_id = quoted;
                    updated_count += 1;
                    Some(replaced)
                },
            )?);
            rewrite(self.reader, &mut rules)?
        };

        Ok(UpdateReport {
            new_content,
            final_application_id,
            updated_count,
        })
    }
}

/// Update the applicationId in `reader` with `new_application_id`.
///
/// Convenience wrapper around [`ApplicationIdUpdater`].
pub fn update_application_id<R: BufRead>(
    reader: R,
    new_application_id: &str,
) -> RewriteResult<UpdateReport> {
    ApplicationIdUpdater::new(reader).update(new_application_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pattern_captures_value_token() {
        let cases = [
            (
                r#"applicationId "com.mycompany.myapp""#,
                r#""com.mycompany.myapp""#,
            ),
            (
                r#"applicationId "com.mycompany.myapp"//close comment"#,
                r#""com.mycompany.myapp""#,
            ),
            (
                r#"applicationId "com.mycompany.myapp" // far comment"#,
                r#""com.mycompany.myapp""#,
            ),
            (
                "applicationId 'com.mycompany.myapp'",
                "'com.mycompany.myapp'",
            ),
            (
                "applicationId 'com.mycompany.myapp'//close comment",
                "'com.mycompany.myapp'",
            ),
            (
                "applicationId 'com.mycompany.myapp' // far comment",
                "'com.mycompany.myapp'",
            ),
            (
                "applicationId = 'com.mycompany.myapp' // far comment",
                "'com.mycompany.myapp'",
            ),
            (
                "applicationId rootProject.ext.applicationId",
                "rootProject.ext.applicationId",
            ),
        ];

        for (line, want) in cases {
            let caps = APPLICATION_ID_REGEX
                .captures(line)
                .unwrap_or_else(|| panic!("pattern did not match line: {line}"));
            assert_eq!(&caps[1], want, "line: {line}");
        }
    }

    #[test]
    fn test_pattern_skips_unrelated_lines() {
        for line in [
            "// applicationId is set elsewhere",
            "minSdkVersion 21",
            "",
            "applicationIdSuffix \".debug\"",
        ] {
            assert!(
                APPLICATION_ID_REGEX.captures(line).is_none(),
                "pattern must not match line: {line}"
            );
        }
    }

    #[test]
    fn test_updates_double_quoted_value() {
        let report = update_application_id(
            r#"applicationId "com.mycompany.myappId""#.as_bytes(),
            r#""com.mynewcompany.mynewappId""#,
        )
        .unwrap();

        assert_eq!(
            report,
            UpdateReport {
                new_content: r#"applicationId "com.mynewcompany.mynewappId""#.to_string(),
                final_application_id: r#""com.mynewcompany.mynewappId""#.to_string(),
                updated_count: 1,
            }
        );
    }

    #[test]
    fn test_updates_single_quoted_value() {
        let report = update_application_id(
            "applicationId 'com.mycompany.myappId'".as_bytes(),
            r#""com.mynewcompany.mynewappId""#,
        )
        .unwrap();

        assert_eq!(
            report.new_content,
            r#"applicationId "com.mynewcompany.mynewappId""#
        );
        assert_eq!(report.updated_count, 1);
    }

    #[test]
    fn test_updates_variable_reference() {
        let report = update_application_id(
            "applicationId rootProject.ext.applicationId".as_bytes(),
            r#""com.mynewcompany.mynewappId""#,
        )
        .unwrap();

        assert_eq!(
            report.new_content,
            r#"applicationId "com.mynewcompany.mynewappId""#
        );
        assert_eq!(
            report.final_application_id,
            r#""com.mynewcompany.mynewappId""#
        );
    }

    #[test]
    fn test_adds_quotation_when_missing() {
        for new_id in [
            "com.mynewcompany.mynewappId",
            "com.mynewcompany.mynewappId\"",
            "\"com.mynewcompany.mynewappId",
        ] {
            let report = update_application_id(
                "applicationId rootProject.ext.applicationId".as_bytes(),
                new_id,
            )
            .unwrap();

            assert_eq!(
                report,
                UpdateReport {
                    new_content: r#"applicationId "com.mynewcompany.mynewappId""#.to_string(),
                    final_application_id: r#""com.mynewcompany.mynewappId""#.to_string(),
                    updated_count: 1,
                },
                "new id: {new_id}"
            );
        }
    }

    #[test]
    fn test_empty_new_value_reports_found_value() {
        let input = r#"applicationId "com.mycompany.myappId""#;
        let report = update_application_id(input.as_bytes(), "").unwrap();

        assert_eq!(report.new_content, input);
        assert_eq!(report.final_application_id, r#""com.mycompany.myappId""#);
        assert_eq!(report.updated_count, 0);
    }

    #[test]
    fn test_no_declaration_is_not_an_error() {
        let input = "minSdkVersion 21\ntargetSdkVersion 34";
        let report = update_application_id(input.as_bytes(), "\"com.foo\"").unwrap();

        assert_eq!(report.new_content, input);
        assert_eq!(report.final_application_id, "");
        assert_eq!(report.updated_count, 0);
    }

    #[test]
    fn test_preserves_unaffected_lines() {
        let input = "android {\n    defaultConfig {\n        // applicationId is set elsewhere\n        applicationId \"com.mycompany.myappId\"\n\n        minSdkVersion 21\n    }\n}";
        let report = update_application_id(input.as_bytes(), "com.other.app").unwrap();

        assert_eq!(
            report.new_content,
            "android {\n    defaultConfig {\n        // applicationId is set elsewhere\n        applicationId \"com.other.app\"\n\n        minSdkVersion 21\n    }\n}"
        );
        assert_eq!(report.updated_count, 1);
        assert_eq!(
            report.new_content.lines().count(),
            input.lines().count()
        );
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let input = "applicationId 'com.mycompany.myappId' // release id";
        let first = update_application_id(input.as_bytes(), "com.new.app").unwrap();
        let second =
            update_application_id(first.new_content.as_bytes(), "com.new.app").unwrap();

        assert_eq!(second.new_content, first.new_content);
        assert_eq!(second.final_application_id, first.final_application_id);
        assert_eq!(second.updated_count, 1);
    }

    #[test]
    fn test_multiple_declarations_all_updated() {
        let input = "applicationId \"com.one\"\napplicationId \"com.two\"";
        let report = update_application_id(input.as_bytes(), "\"com.three\"").unwrap();

        assert_eq!(
            report.new_content,
            "applicationId \"com.three\"\napplicationId \"com.three\""
        );
        assert_eq!(report.updated_count, 2);
    }
}
