use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::client::Client;
use crate::newtypes::DestinationId;
use crate::schema::ConfigurationSchema;

/// Alert destination kinds this client can decode. The enum is the
/// registry: resolving a wire discriminator happens through `FromStr`, and
/// supporting a new kind means adding a variant here plus its options in
/// [`DestinationOptions`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum DestinationKind {
    Email,
    Slack,
    Webhook,
    Mattermost,
    ChatWork,
    PagerDuty,
    HangoutsChat,
    HipChat,
}

impl DestinationKind {
    pub const ALL: [DestinationKind; 8] = [
        DestinationKind::Email,
        DestinationKind::Slack,
        DestinationKind::Webhook,
        DestinationKind::Mattermost,
        DestinationKind::ChatWork,
        DestinationKind::PagerDuty,
        DestinationKind::HangoutsChat,
        DestinationKind::HipChat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DestinationKind::Email => "email",
            DestinationKind::Slack => "slack",
            DestinationKind::Webhook => "webhook",
            DestinationKind::Mattermost => "mattermost",
            DestinationKind::ChatWork => "chatwork",
            DestinationKind::PagerDuty => "pagerduty",
            DestinationKind::HangoutsChat => "hangouts_chat",
            DestinationKind::HipChat => "hipchat",
        }
    }
}

impl Display for DestinationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DestinationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<DestinationKind, Error> {
        match s {
            "email" => Ok(DestinationKind::Email),
            "slack" => Ok(DestinationKind::Slack),
            "webhook" => Ok(DestinationKind::Webhook),
            "mattermost" => Ok(DestinationKind::Mattermost),
            "chatwork" => Ok(DestinationKind::ChatWork),
            "pagerduty" => Ok(DestinationKind::PagerDuty),
            "hangouts_chat" => Ok(DestinationKind::HangoutsChat),
            "hipchat" => Ok(DestinationKind::HipChat),
            other => Err(Error::UnknownDestinationType(other.to_string())),
        }
    }
}

/// Envelope fields common to every destination kind. The list endpoint
/// returns these alone; per-kind options only appear on single fetches.
#[derive(Clone, Debug, Deserialize)]
pub struct DestinationSummary {
    pub id: DestinationId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A fully decoded destination: the envelope plus the options selected by
/// the `type` discriminator.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub options: DestinationOptions,
}

impl Destination {
    pub fn kind(&self) -> DestinationKind {
        self.options.kind()
    }
}

/// Kind-specific options, adjacently tagged to match the wire shape
/// `{"type": "...", "options": {...}}`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", content = "options")]
pub enum DestinationOptions {
    #[serde(rename = "email")]
    Email(EmailOptions),
    #[serde(rename = "slack")]
    Slack(SlackOptions),
    #[serde(rename = "webhook")]
    Webhook(WebhookOptions),
    #[serde(rename = "mattermost")]
    Mattermost(MattermostOptions),
    #[serde(rename = "chatwork")]
    ChatWork(ChatWorkOptions),
    #[serde(rename = "pagerduty")]
    PagerDuty(PagerDutyOptions),
    #[serde(rename = "hangouts_chat")]
    HangoutsChat(HangoutsChatOptions),
    #[serde(rename = "hipchat")]
    HipChat(HipChatOptions),
}

impl DestinationOptions {
    pub fn kind(&self) -> DestinationKind {
        match self {
            DestinationOptions::Email(_) => DestinationKind::Email,
            DestinationOptions::Slack(_) => DestinationKind::Slack,
            DestinationOptions::Webhook(_) => DestinationKind::Webhook,
            DestinationOptions::Mattermost(_) => DestinationKind::Mattermost,
            DestinationOptions::ChatWork(_) => DestinationKind::ChatWork,
            DestinationOptions::PagerDuty(_) => DestinationKind::PagerDuty,
            DestinationOptions::HangoutsChat(_) => DestinationKind::HangoutsChat,
            DestinationOptions::HipChat(_) => DestinationKind::HipChat,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EmailOptions {
    /// Comma-separated recipient list.
    pub addresses: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_template: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SlackOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct WebhookOptions {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MattermostOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChatWorkOptions {
    pub api_token: String,
    pub room_id: String,
    pub message_template: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PagerDutyOptions {
    pub integration_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct HangoutsChatOptions {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// HipChat shut down in 2019; the kind survives for servers that still
/// carry old destinations.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct HipChatOptions {
    pub url: String,
}

/// Server-side descriptor for a destination kind, as returned by
/// `/api/destinations/types`.
#[derive(Clone, Debug, Deserialize)]
pub struct DestinationType {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub configuration_schema: ConfigurationSchema,
}

/// Decodes a destination payload by its `type` discriminator.
///
/// The envelope is parsed first to pull out the discriminator, the
/// discriminator is resolved against the registry, and only then is the
/// kind-specific shape parsed. A discriminator outside the registry fails
/// with [`Error::UnknownDestinationType`] rather than decoding into some
/// lossy fallback.
pub fn decode_destination(raw: &[u8]) -> Result<Destination, Error> {
    let summary: DestinationSummary =
        serde_json::from_slice(raw).map_err(|err| Error::MalformedEnvelope(err.to_string()))?;
    if summary.kind.is_empty() {
        return Err(Error::MalformedEnvelope(
            "empty destination type".to_string(),
        ));
    }
    let kind: DestinationKind = summary.kind.parse()?;

    serde_json::from_slice(raw).map_err(|source| Error::VariantDecode { kind, source })
}

#[derive(Serialize)]
struct DestinationPayload<'a> {
    name: &'a str,
    #[serde(flatten)]
    options: &'a DestinationOptions,
}

impl Client {
    /// Lists all destinations. The server omits per-kind options here;
    /// fetch a destination by id to get them.
    pub async fn list_destinations(&self) -> Result<Vec<DestinationSummary>, Error> {
        self.get_json("/api/destinations", &[]).await
    }

    pub async fn get_destination(&self, id: DestinationId) -> Result<Destination, Error> {
        let raw = self.get_raw(&format!("/api/destinations/{id}")).await?;
        decode_destination(&raw)
    }

    /// Lists the destination kinds the server supports together with the
    /// option schema each one expects.
    pub async fn list_destination_types(&self) -> Result<Vec<DestinationType>, Error> {
        self.get_json("/api/destinations/types", &[]).await
    }

    pub async fn create_destination(
        &self,
        name: &str,
        options: &DestinationOptions,
    ) -> Result<Destination, Error> {
        let raw = self
            .post_raw("/api/destinations", &DestinationPayload { name, options })
            .await?;
        decode_destination(&raw)
    }

    pub async fn update_destination(
        &self,
        id: DestinationId,
        name: &str,
        options: &DestinationOptions,
    ) -> Result<Destination, Error> {
        let raw = self
            .post_raw(
                &format!("/api/destinations/{id}"),
                &DestinationPayload { name, options },
            )
            .await?;
        decode_destination(&raw)
    }

    pub async fn delete_destination(&self, id: DestinationId) -> Result<(), Error> {
        self.delete(&format!("/api/destinations/{id}")).await
    }
}
