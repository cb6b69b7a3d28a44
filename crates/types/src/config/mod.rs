// Path: crates/types/src/config/mod.rs

//! The persisted scanner configuration (`config.toml`).
//!
//! Every `[servers.<name>]` entry inherits empty fields from `[default]` when
//! the file is loaded, so the on-disk form only needs to spell out what
//! differs from the default.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Optional integration blocks (`[slack]`, `[email]`, `[aws]`, ...).
pub mod integrations;
pub use integrations::*;

/// Free-form per-server settings stored under `[servers.<name>.optional]`.
pub type OptionalSettings = BTreeMap<String, toml::Value>;

/// Configuration of one scan target host.
///
/// The same shape is used for the `[default]` template and for every entry
/// under `[servers]`. Empty values are omitted when serialized so that an
/// elided field falls back to the default on the next load.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerInfo {
    /// Address of the host to connect to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    /// SSH port.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub port: String,
    /// SSH login user.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    /// Path to the SSH private key.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_path: String,
    /// Scan type (e.g. `"pseudo"` for hosts that are not reachable over SSH).
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub server_type: String,
    /// Path to an OWASP dependency-check XML report attached to this host.
    #[serde(rename = "owaspDCXMLPath", skip_serializing_if = "String::is_empty")]
    pub owasp_dc_xml_path: String,
    /// Scan modes in the order they were declared (e.g. `["fast", "offline"]`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scan_mode: Vec<String>,
    /// CPE names to check in addition to detected packages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cpe_names: Vec<String>,
    /// CVE IDs excluded from reports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_cves: Vec<String>,
    /// Repositories enabled while scanning (yum `--enablerepo`).
    #[serde(rename = "enablerepo", skip_serializing_if = "Vec::is_empty")]
    pub enable_repo: Vec<String>,
    /// Identity key to UUID for this host and its containers/images.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub uuids: BTreeMap<String, String>,
    /// Arbitrary key/value settings. `None` and `Some(empty)` render differently.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<OptionalSettings>,
    /// Keys without a typed field above (`memo`, `containersIncluded`,
    /// `[servers.<name>.containers.*]`, ...). Carried through verbatim: never
    /// inherited from `[default]` and never elided.
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// The full persisted configuration document.
///
/// The document is passed explicitly into every reconciliation operation;
/// there is no process-wide configuration instance.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigDocument {
    /// go-cve-dictionary connection.
    pub cve_dict: DictionaryConf,
    /// goval-dictionary connection.
    pub oval_dict: DictionaryConf,
    /// gost connection.
    pub gost: DictionaryConf,
    /// go-exploitdb connection.
    pub exploit: DictionaryConf,
    /// Slack incoming webhook.
    pub slack: SlackConf,
    /// SMTP mail delivery.
    pub email: SmtpConf,
    /// HTTP report target.
    pub http: HttpConf,
    /// Syslog report target.
    pub syslog: SyslogConf,
    /// Amazon S3 report storage.
    pub aws: AwsConf,
    /// Azure Blob report storage.
    pub azure: AzureConf,
    /// Stride webhook.
    pub stride: StrideConf,
    /// HipChat room notification.
    pub hip_chat: HipChatConf,
    /// ChatWork room notification.
    pub chat_work: ChatWorkConf,
    /// FutureVuls SaaS upload.
    pub saas: SaasConf,
    /// The inheritance template for every server entry.
    pub default: ServerInfo,
    /// Logical host name to its configuration.
    pub servers: BTreeMap<String, ServerInfo>,
    /// Top-level tables and keys not modelled above (`[wpscan]`, ...).
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl ConfigDocument {
    /// Returns the entry for `name`, inserting an empty one if absent.
    pub fn server_mut(&mut self, name: &str) -> &mut ServerInfo {
        self.servers.entry(name.to_string()).or_default()
    }
}
