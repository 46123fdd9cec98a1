//! Shapes of the `web_profile_info` response and the post records built from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub data: Option<ProfileData>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileData {
    pub user: Option<ProfileUser>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUser {
    #[serde(default)]
    pub is_private: bool,
    pub edge_owner_to_timeline_media: Option<MediaConnection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaConnection {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub edges: Vec<MediaEdge>,
}

#[derive(Debug, Deserialize)]
pub struct MediaEdge {
    pub node: MediaNode,
}

#[derive(Debug, Default, Deserialize)]
pub struct Count {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CaptionConnection {
    #[serde(default)]
    pub edges: Vec<CaptionEdge>,
}

#[derive(Debug, Deserialize)]
pub struct CaptionEdge {
    pub node: CaptionNode,
}

#[derive(Debug, Deserialize)]
pub struct CaptionNode {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MediaNode {
    pub id: String,
    pub shortcode: String,
    #[serde(rename = "__typename")]
    pub typename: Option<String>,
    #[serde(default)]
    pub edge_media_to_caption: CaptionConnection,
    pub taken_at_timestamp: Option<i64>,
    pub edge_liked_by: Option<Count>,
    pub edge_media_preview_like: Option<Count>,
    pub edge_media_to_comment: Option<Count>,
    pub display_url: Option<String>,
    #[serde(default)]
    pub is_video: bool,
    pub video_url: Option<String>,
}

/// One scraped post as handed to the workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub shortcode: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub caption: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub likes: u64,
    pub comments: u64,
    pub display_url: Option<String>,
    pub is_video: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl From<MediaNode> for Post {
    fn from(node: MediaNode) -> Self {
        let kind = match node.typename.as_deref() {
            Some("GraphVideo") => "video",
            Some("GraphSidecar") => "carousel",
            Some("GraphImage") | None => {
                if node.is_video {
                    "video"
                } else {
                    "image"
                }
            }
            Some(_) => "other",
        };
        let likes = node
            .edge_liked_by
            .or(node.edge_media_preview_like)
            .map(|c| c.count)
            .unwrap_or(0);

        Post {
            url: format!("https://www.instagram.com/p/{}/", node.shortcode),
            id: node.id,
            shortcode: node.shortcode,
            kind: kind.to_string(),
            caption: node.edge_media_to_caption.edges.into_iter().next().map(|e| e.node.text),
            timestamp: node
                .taken_at_timestamp
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
            likes,
            comments: node.edge_media_to_comment.map(|c| c.count).unwrap_or(0),
            display_url: node.display_url,
            is_video: node.is_video,
            video_url: node.video_url,
        }
    }
}
