use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunData {
    pub fn is_succeeded(&self) -> bool {
        self.status == "SUCCEEDED"
    }

    /// Terminal statuses other than success.
    pub fn is_failed(&self) -> bool {
        matches!(self.status.as_str(), "FAILED" | "ABORTED" | "TIMED-OUT")
    }
}

/// One page of dataset items.
///
/// The total can lag behind the dataset right after a run finishes, so it is
/// informational only.
#[derive(Debug, Clone)]
pub struct DatasetPage<T> {
    pub items: Vec<T>,
    /// Total item count as reported by `X-Apify-Pagination-Total`, when present.
    pub total: Option<u64>,
}

// --- harvestapi/linkedin-post-comments ---

/// Input for the harvestapi/linkedin-post-comments actor.
#[derive(Debug, Clone, Serialize)]
pub struct PostCommentsInput {
    pub posts: Vec<String>,
}

/// A single comment from the post-comments dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostComment {
    #[serde(default)]
    pub actor: Option<CommentActor>,
}

/// The person who wrote a comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentActor {
    pub name: Option<String>,
    pub position: Option<String>,
    #[serde(rename = "linkedinUrl")]
    pub linkedin_url: Option<String>,
}

// --- scraping_solutions/linkedin-posts-engagers-likers-and-commenters-no-cookies ---

/// Which side of a post's engagement to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Likers,
    Commenters,
}

impl EngagementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementKind::Likers => "likers",
            EngagementKind::Commenters => "commenters",
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngagementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "likers" => Ok(EngagementKind::Likers),
            "commenters" => Ok(EngagementKind::Commenters),
            other => Err(format!(
                "unknown engagement kind '{other}' (expected likers or commenters)"
            )),
        }
    }
}

/// Input for the post engagers actor.
#[derive(Debug, Clone, Serialize)]
pub struct PostEngagersInput {
    pub url: String,
    pub start: u32,
    pub iterations: u32,
    #[serde(rename = "type")]
    pub kind: EngagementKind,
}

/// A liker or commenter from the engagers dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostEngager {
    /// "likers" or "commenters", echoing the requested kind.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub url_profile: Option<String>,
    /// Free-text headline shown under the name, usually the role and employer.
    pub subtitle: Option<String>,
}

// --- apimaestro/linkedin-profile-detail ---

/// Input for the apimaestro/linkedin-profile-detail actor.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetailInput {
    pub urls: Vec<String>,
    #[serde(rename = "maxConnectionsPerCrawl")]
    pub max_connections_per_crawl: u32,
    #[serde(rename = "enhanceProfiles")]
    pub enhance_profiles: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDetail {
    #[serde(default)]
    pub basic_info: Option<BasicInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicInfo {
    pub fullname: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<ProfileLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileLocation {
    pub full: Option<String>,
}

// --- apimaestro/linkedin-posts-search-scraper-no-cookies ---

/// Input for the keyword post search actor.
#[derive(Debug, Clone, Serialize)]
pub struct PostSearchInput {
    pub keyword: String,
    pub sort_type: String,
    pub limit: u32,
    pub page_number: u32,
    pub date_filter: String,
}

/// A single post from the keyword search dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostSearchResult {
    pub post_url: Option<String>,
    pub stats: Option<PostStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostStats {
    pub comments: Option<i64>,
}

impl PostSearchResult {
    pub fn comment_count(&self) -> i64 {
        self.stats.as_ref().and_then(|s| s.comments).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_data_parses_apify_payload() {
        let payload = json!({
            "data": {
                "id": "HG7ML7M8z78YcAPEB",
                "actId": "HDSasDasz78YcAPEB",
                "status": "SUCCEEDED",
                "defaultDatasetId": "wmKPijuyDnPZAPRMk",
                "startedAt": "2025-01-08T00:00:00.000Z",
                "finishedAt": null
            }
        });
        let resp: ApiResponse<RunData> = serde_json::from_value(payload).unwrap();
        assert_eq!(resp.data.id, "HG7ML7M8z78YcAPEB");
        assert_eq!(resp.data.default_dataset_id, "wmKPijuyDnPZAPRMk");
        assert!(resp.data.is_succeeded());
        assert!(resp.data.started_at.is_some());
        assert!(resp.data.finished_at.is_none());
    }

    #[test]
    fn failed_statuses_are_terminal() {
        let mut run = RunData {
            id: "r".into(),
            status: "RUNNING".into(),
            default_dataset_id: "d".into(),
            started_at: None,
            finished_at: None,
        };
        assert!(!run.is_failed());
        assert!(!run.is_succeeded());
        for status in ["FAILED", "ABORTED", "TIMED-OUT"] {
            run.status = status.into();
            assert!(run.is_failed(), "{status} should be failed");
        }
    }

    #[test]
    fn comment_without_actor_still_parses() {
        let comment: PostComment = serde_json::from_value(json!({ "commentary": "nice" })).unwrap();
        assert!(comment.actor.is_none());

        let comment: PostComment = serde_json::from_value(json!({
            "actor": {
                "name": "Jane Doe",
                "position": "CTO @ Initech",
                "linkedinUrl": "https://www.linkedin.com/in/janedoe"
            }
        }))
        .unwrap();
        let actor = comment.actor.unwrap();
        assert_eq!(actor.name.as_deref(), Some("Jane Doe"));
        assert_eq!(actor.linkedin_url.as_deref(), Some("https://www.linkedin.com/in/janedoe"));
    }

    #[test]
    fn engagers_input_uses_type_key() {
        let input = PostEngagersInput {
            url: "https://www.linkedin.com/posts/x".into(),
            start: 19,
            iterations: 9,
            kind: EngagementKind::Likers,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["type"], "likers");
        assert_eq!(value["start"], 19);
    }

    #[test]
    fn engagement_kind_parses_case_insensitively() {
        assert_eq!("Likers".parse::<EngagementKind>(), Ok(EngagementKind::Likers));
        assert_eq!(" commenters ".parse::<EngagementKind>(), Ok(EngagementKind::Commenters));
        assert!("shares".parse::<EngagementKind>().is_err());
    }

    #[test]
    fn profile_input_field_names() {
        let input = ProfileDetailInput {
            urls: vec!["https://www.linkedin.com/in/a".into()],
            max_connections_per_crawl: 1,
            enhance_profiles: true,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["maxConnectionsPerCrawl"], 1);
        assert_eq!(value["enhanceProfiles"], true);
    }

    #[test]
    fn post_comment_count_defaults_to_zero() {
        let post: PostSearchResult =
            serde_json::from_value(json!({ "post_url": "https://x" })).unwrap();
        assert_eq!(post.comment_count(), 0);

        let post: PostSearchResult =
            serde_json::from_value(json!({ "post_url": "https://x", "stats": { "comments": 7 } }))
                .unwrap();
        assert_eq!(post.comment_count(), 7);
    }
}
