// Path: crates/types/src/config/integrations.rs
use serde::{Deserialize, Serialize};

/// An optional configuration block that is only written back when configured.
pub trait Integration {
    /// Returns `true` when the block's primary identifying field is set.
    fn is_configured(&self) -> bool;
}

/// Connection settings for an external vulnerability dictionary
/// (go-cve-dictionary, goval-dictionary, gost, go-exploitdb).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DictionaryConf {
    /// Backend type: `"sqlite3"`, `"mysql"`, `"postgres"`, `"redis"` or `"http"`.
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub db_type: String,
    /// Path to the SQLite3 database file.
    #[serde(rename = "sqlite3Path", skip_serializing_if = "String::is_empty")]
    pub sqlite3_path: String,
    /// Connection URL for server backends.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl Integration for DictionaryConf {
    // A dictionary has no single identifying field; any setting counts.
    fn is_configured(&self) -> bool {
        !self.db_type.is_empty() || !self.sqlite3_path.is_empty() || !self.url.is_empty()
    }
}

/// Slack incoming webhook settings.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SlackConf {
    /// Incoming webhook URL.
    #[serde(rename = "hookURL", skip_serializing_if = "String::is_empty")]
    pub hook_url: String,
    /// Legacy API token.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub legacy_token: String,
    /// Target channel.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel: String,
    /// Emoji used as the bot icon.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_emoji: String,
    /// Display name of the posting user.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_user: String,
    /// Users mentioned in every notification.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notify_users: Vec<String>,
}

impl Integration for SlackConf {
    fn is_configured(&self) -> bool {
        !self.hook_url.is_empty()
    }
}

/// SMTP mail delivery settings.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SmtpConf {
    /// SMTP server address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_addr: String,
    /// SMTP server port.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_port: String,
    /// Login user.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    /// Login password.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Sender address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,
    /// Recipient addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,
    /// Carbon-copy addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,
    /// Prefix prepended to every subject line.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject_prefix: String,
}

impl Integration for SmtpConf {
    fn is_configured(&self) -> bool {
        !self.smtp_addr.is_empty()
    }
}

/// HTTP report target.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConf {
    /// Endpoint receiving JSON reports.
    #[serde(rename = "URL", skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl Integration for HttpConf {
    fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Syslog report target.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SyslogConf {
    /// `"tcp"` or `"udp"`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    /// Syslog server host.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    /// Syslog server port.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub port: String,
    /// Message severity.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub severity: String,
    /// Message facility.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub facility: String,
    /// Message tag.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    /// Send full CVE details instead of a summary.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub verbose: bool,
}

impl Integration for SyslogConf {
    fn is_configured(&self) -> bool {
        !self.host.is_empty()
    }
}

/// Amazon S3 report storage.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AwsConf {
    /// Named AWS credentials profile.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub profile: String,
    /// Bucket region.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    /// Target bucket.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub s3_bucket: String,
    /// Key prefix inside the bucket.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub s3_results_dir: String,
    /// Request server-side encryption.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub s3_server_side_encryption: bool,
}

impl Integration for AwsConf {
    fn is_configured(&self) -> bool {
        !self.s3_bucket.is_empty()
    }
}

/// Azure Blob report storage.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AzureConf {
    /// Storage account name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub account_name: String,
    /// Storage account key.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub account_key: String,
    /// Blob container name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub container_name: String,
}

impl Integration for AzureConf {
    fn is_configured(&self) -> bool {
        !self.account_name.is_empty()
    }
}

/// Stride webhook.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct StrideConf {
    /// Webhook URL.
    #[serde(rename = "hookURL", skip_serializing_if = "String::is_empty")]
    pub hook_url: String,
    /// Bearer token.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_token: String,
}

impl Integration for StrideConf {
    fn is_configured(&self) -> bool {
        !self.hook_url.is_empty()
    }
}

/// HipChat room notification.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct HipChatConf {
    /// API token.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_token: String,
    /// Room ID or name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub room: String,
}

impl Integration for HipChatConf {
    fn is_configured(&self) -> bool {
        !self.auth_token.is_empty()
    }
}

/// ChatWork room notification.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatWorkConf {
    /// API token.
    #[serde(rename = "apiToken", skip_serializing_if = "String::is_empty")]
    pub api_token: String,
    /// Room ID.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub room: String,
}

impl Integration for ChatWorkConf {
    fn is_configured(&self) -> bool {
        !self.api_token.is_empty()
    }
}

/// FutureVuls SaaS upload.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SaasConf {
    /// Group the results are uploaded to.
    #[serde(rename = "GroupID", skip_serializing_if = "is_zero")]
    pub group_id: i64,
    /// Upload token.
    #[serde(rename = "Token", skip_serializing_if = "String::is_empty")]
    pub token: String,
    /// Upload endpoint.
    #[serde(rename = "URL", skip_serializing_if = "String::is_empty")]
    pub url: String,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

impl Integration for SaasConf {
    fn is_configured(&self) -> bool {
        self.group_id != 0
    }
}
