//! Slack name resolution
//!
//! Extracts `@name` tokens from free-form command text and resolves them
//! to stable identifiers through the Users service, plus the reverse
//! direction for rendering identifiers back to display names.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use tb_gateway::UserClient;

use crate::error::Result;

/// Slack names cannot be longer than 21 characters and can only contain
/// letters, numbers, periods, hyphens and underscores.
static SLACK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[a-zA-Z0-9._-]{1,21}").expect("static regex compile"));

/// Downstream error messages embed identifier lists between `#` markers,
/// e.g. `User(s) '#uuid1,uuid2#' exist(s) in another teams`.
static UUID_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([^#]*)#").expect("static regex compile"));

/// Resolves between Slack display names and stable identifiers
pub struct SlackNameResolver {
    users: Arc<dyn UserClient>,
}

impl SlackNameResolver {
    pub fn new(users: Arc<dyn UserClient>) -> Self {
        Self { users }
    }

    /// Extract the set of `@name` tokens from free text
    ///
    /// Duplicates collapse by set semantics; matching is case-sensitive.
    pub fn extract_slack_names(text: &str) -> BTreeSet<String> {
        SLACK_NAME
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Resolve the names mentioned in `text` to stable identifiers
    ///
    /// Names the downstream lookup does not know are silently dropped.
    pub async fn uuids_from_text(&self, text: &str) -> Result<BTreeSet<String>> {
        let slack_names: Vec<String> = Self::extract_slack_names(text).into_iter().collect();
        debug!("Extracted slack names {:?} from text '{}'", slack_names, text);

        let users = self.users.find_by_slack_names(&slack_names).await?;
        Ok(users.into_iter().map(|user| user.uuid).collect())
    }

    /// Resolve stable identifiers to Slack display names
    pub async fn slack_names_from_uuids(&self, uuids: &BTreeSet<String>) -> Result<BTreeSet<String>> {
        let uuids: Vec<String> = uuids.iter().cloned().collect();
        debug!("Resolving slack names for uuids {:?}", uuids);

        let users = self.users.find_by_uuids(&uuids).await?;
        Ok(users.into_iter().map(|user| user.slack).collect())
    }

    /// Replace `#uuid1,uuid2#` marker groups in a downstream error message
    /// with the corresponding display names.
    ///
    /// Best-effort: if the lookup itself fails, the message is returned
    /// unchanged; identifiers the lookup omits stay as they are.
    pub async fn humanize_error_message(&self, message: &str) -> String {
        let uuids: Vec<String> = UUID_MARKER
            .captures_iter(message)
            .flat_map(|caps| {
                caps[1]
                    .split(',')
                    .map(|uuid| uuid.trim().to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|uuid| !uuid.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if uuids.is_empty() {
            return message.to_string();
        }

        let users = match self.users.find_by_uuids(&uuids).await {
            Ok(users) => users,
            Err(e) => {
                warn!("Leaving identifiers unresolved in error message: {}", e);
                return message.to_string();
            }
        };

        let names_by_uuid: HashMap<&str, &str> = users
            .iter()
            .map(|user| (user.uuid.as_str(), user.slack.as_str()))
            .collect();

        UUID_MARKER
            .replace_all(message, |caps: &regex::Captures| {
                caps[1]
                    .split(',')
                    .map(|uuid| uuid.trim())
                    .filter(|uuid| !uuid.is_empty())
                    .map(|uuid| names_by_uuid.get(uuid).copied().unwrap_or(uuid))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tb_core::models::User;
    use tb_gateway::GatewayError;

    /// In-memory Users service knowing a fixed set of users
    struct StubUsers {
        known: Vec<User>,
    }

    impl StubUsers {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                known: pairs
                    .iter()
                    .map(|(uuid, slack)| User {
                        uuid: uuid.to_string(),
                        slack: slack.to_string(),
                    })
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl UserClient for StubUsers {
        async fn find_by_slack_names(
            &self,
            slack_names: &[String],
        ) -> tb_gateway::Result<Vec<User>> {
            Ok(self
                .known
                .iter()
                .filter(|user| slack_names.contains(&user.slack))
                .cloned()
                .collect())
        }

        async fn find_by_uuids(&self, uuids: &[String]) -> tb_gateway::Result<Vec<User>> {
            Ok(self
                .known
                .iter()
                .filter(|user| uuids.contains(&user.uuid))
                .cloned()
                .collect())
        }
    }

    /// Users service that always fails
    struct FailingUsers;

    #[async_trait]
    impl UserClient for FailingUsers {
        async fn find_by_slack_names(&self, _: &[String]) -> tb_gateway::Result<Vec<User>> {
            Err(GatewayError::Parse("users service is down".to_string()))
        }

        async fn find_by_uuids(&self, _: &[String]) -> tb_gateway::Result<Vec<User>> {
            Err(GatewayError::Parse("users service is down".to_string()))
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extracts_names_as_a_set() {
        let names = SlackNameResolver::extract_slack_names(
            "activate @alice @bob-2 and @Carol.X plus @alice once more",
        );
        assert_eq!(names, set(&["@alice", "@bob-2", "@Carol.X"]));
    }

    #[test]
    fn extraction_is_order_independent() {
        let first = SlackNameResolver::extract_slack_names("@bob-2 @alice @Carol.X");
        let second = SlackNameResolver::extract_slack_names("@Carol.X @alice @bob-2");
        assert_eq!(first, second);
    }

    #[test]
    fn extraction_caps_names_at_21_characters() {
        let names = SlackNameResolver::extract_slack_names("@abcdefghijklmnopqrstuvwxyz");
        assert_eq!(names.len(), 1);
        // '@' plus the first 21 allowed characters
        assert_eq!(names.iter().next().unwrap(), "@abcdefghijklmnopqrstu");
    }

    #[test]
    fn extraction_without_mentions_is_empty() {
        let names = SlackNameResolver::extract_slack_names("no mentions in here");
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn uuids_from_text_drops_unknown_names() {
        let resolver = SlackNameResolver::new(Arc::new(StubUsers::new(&[
            ("uuid-john", "@john"),
            ("uuid-jane", "@jane"),
        ])));

        let uuids = resolver
            .uuids_from_text("activate @john @jane @nobody")
            .await
            .unwrap();

        assert_eq!(uuids, set(&["uuid-jane", "uuid-john"]));
    }

    #[tokio::test]
    async fn slack_names_from_uuids_is_idempotent_and_order_independent() {
        let resolver = SlackNameResolver::new(Arc::new(StubUsers::new(&[
            ("id1", "@john"),
            ("id2", "@jane"),
        ])));

        let mut forwards = BTreeSet::new();
        forwards.insert("id1".to_string());
        forwards.insert("id2".to_string());

        let mut backwards = BTreeSet::new();
        backwards.insert("id2".to_string());
        backwards.insert("id1".to_string());

        let first = resolver.slack_names_from_uuids(&forwards).await.unwrap();
        let second = resolver.slack_names_from_uuids(&backwards).await.unwrap();
        let third = resolver.slack_names_from_uuids(&forwards).await.unwrap();

        assert_eq!(first, set(&["@jane", "@john"]));
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[tokio::test]
    async fn humanize_replaces_marker_groups_with_names() {
        let resolver = SlackNameResolver::new(Arc::new(StubUsers::new(&[
            ("uuid1", "@john"),
            ("uuid2", "@jane"),
        ])));

        let message = resolver
            .humanize_error_message("User(s) '#uuid1,uuid2#' exist(s) in another teams")
            .await;

        assert_eq!(message, "User(s) '@john,@jane' exist(s) in another teams");
    }

    #[tokio::test]
    async fn humanize_keeps_unknown_identifiers() {
        let resolver =
            SlackNameResolver::new(Arc::new(StubUsers::new(&[("uuid1", "@john")])));

        let message = resolver
            .humanize_error_message("User(s) '#uuid1,uuid9#' exist(s) in another teams")
            .await;

        assert_eq!(message, "User(s) '@john,uuid9' exist(s) in another teams");
    }

    #[tokio::test]
    async fn humanize_leaves_message_unchanged_when_lookup_fails() {
        let resolver = SlackNameResolver::new(Arc::new(FailingUsers));

        let original = "User(s) '#uuid1#' exist(s) in another teams";
        let message = resolver.humanize_error_message(original).await;

        assert_eq!(message, original);
    }

    #[tokio::test]
    async fn humanize_without_markers_is_a_no_op() {
        let resolver = SlackNameResolver::new(Arc::new(FailingUsers));

        let message = resolver.humanize_error_message("plain message").await;

        assert_eq!(message, "plain message");
    }
}
