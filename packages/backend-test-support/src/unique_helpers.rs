//! Unique test data so suites sharing a database never collide.

use uuid::Uuid;

/// `{prefix}-{12 hex chars}`; short enough to pass player-name validation.
///
/// ```
/// use backend_test_support::unique_helpers::unique_name;
///
/// let a = unique_name("bowler");
/// let b = unique_name("bowler");
/// assert_ne!(a, b);
/// assert!(a.starts_with("bowler-"));
/// ```
pub fn unique_name(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &id[..12])
}
