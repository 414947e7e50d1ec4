//! Token profile model: upstream metadata for a token before enrichment.

use serde::{Deserialize, Deserializer, Serialize};

/// One entry of a profile's link list (from API).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProfileLink {
    /// Free-form label, e.g. "Website" or "Docs"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Link category, e.g. "twitter" or "telegram"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,

    /// Target URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Links already keyed by category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct KeyedLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

/// Raw profile links in either of the two shapes upstream produces.
///
/// The shape is resolved once, when the profile is deserialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProfileLinks {
    /// Ordered list of `{label?, type?, url}` entries
    Sequence(Vec<ProfileLink>),

    /// Pre-keyed `{website?, twitter?, telegram?}` object
    Keyed(KeyedLinks),
}

/// Open Graph preview data attached to some profiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct OpenGraph {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Lenient links deserializer: any shape other than the two known ones
/// (including `null`) becomes `None` instead of failing the whole profile list.
fn deserialize_links<'de, D>(deserializer: D) -> Result<Option<ProfileLinks>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            serde_json::from_value(value).ok()
        }
        _ => None,
    }))
}

/// Token metadata as published on the latest-profiles feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenProfile {
    /// On-chain token address (identity)
    pub token_address: String,

    /// Chain identifier, e.g. "solana"
    pub chain_id: String,

    /// Upstream page for the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Icon image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Header/banner image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    /// Project description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,

    /// Social and website links
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_links"
    )]
    pub links: Option<ProfileLinks>,
}

impl TokenProfile {
    /// Create a profile with just an address and chain.
    pub fn new(token_address: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            token_address: token_address.into(),
            chain_id: chain_id.into(),
            ..Default::default()
        }
    }

    /// Description, falling back to the Open Graph description.
    ///
    /// An empty string counts as missing.
    pub fn best_description(&self) -> Option<String> {
        let og = self.open_graph.as_ref().and_then(|og| og.description.as_deref());

        [self.description.as_deref(), og]
            .into_iter()
            .flatten()
            .find(|d| !d.is_empty())
            .map(str::to_string)
    }
}
