// Path: crates/reconcile/src/persist.rs

//! Rendering and safely replacing `config.toml`.
//!
//! The live file is moved to `<path>.bak` before the new content is written,
//! so a failed write never loses the previous configuration. There is no
//! automatic rollback: after a failure past the rename, the previous content
//! lives only in the backup.
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use vuls_telemetry::StageTimer;
use vuls_types::config::{
    AwsConf, AzureConf, ChatWorkConf, ConfigDocument, DictionaryConf, HipChatConf, HttpConf,
    Integration, SaasConf, ServerInfo, SlackConf, SmtpConf, StrideConf, SyslogConf,
};
use vuls_types::error::ConfigError;
use vuls_types::Result;

/// First line of every rewritten configuration file.
pub const HEADER_COMMENT: &str =
    "# See README for details: https://vuls.io/docs/en/usage-settings.html";

const BACKUP_SUFFIX: &str = ".bak";

/// The serializable view of a [`ConfigDocument`].
///
/// Integration blocks that are not configured are `None` and left out of the
/// output entirely; `default`, `servers` and unmodelled top-level keys are
/// always written.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    cve_dict: Option<&'a DictionaryConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    oval_dict: Option<&'a DictionaryConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gost: Option<&'a DictionaryConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exploit: Option<&'a DictionaryConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slack: Option<&'a SlackConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a SmtpConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    http: Option<&'a HttpConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    syslog: Option<&'a SyslogConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aws: Option<&'a AwsConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    azure: Option<&'a AzureConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stride: Option<&'a StrideConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hip_chat: Option<&'a HipChatConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_work: Option<&'a ChatWorkConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saas: Option<&'a SaasConf>,

    default: &'a ServerInfo,
    servers: &'a BTreeMap<String, ServerInfo>,

    #[serde(flatten)]
    extra: &'a toml::Table,
}

fn configured<T: Integration>(block: &T) -> Option<&T> {
    block.is_configured().then_some(block)
}

impl<'a> From<&'a ConfigDocument> for ConfigSnapshot<'a> {
    fn from(doc: &'a ConfigDocument) -> Self {
        Self {
            cve_dict: configured(&doc.cve_dict),
            oval_dict: configured(&doc.oval_dict),
            gost: configured(&doc.gost),
            exploit: configured(&doc.exploit),
            slack: configured(&doc.slack),
            email: configured(&doc.email),
            http: configured(&doc.http),
            syslog: configured(&doc.syslog),
            aws: configured(&doc.aws),
            azure: configured(&doc.azure),
            stride: configured(&doc.stride),
            hip_chat: configured(&doc.hip_chat),
            chat_work: configured(&doc.chat_work),
            saas: configured(&doc.saas),
            default: &doc.default,
            servers: &doc.servers,
            extra: &doc.extra,
        }
    }
}

/// Where a [`persist`] call left things.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOutcome {
    /// The file that received the new content (the symlink target, if any).
    pub written: PathBuf,
    /// The previous content.
    pub backup: PathBuf,
}

/// Renders `doc` as the text that [`persist`] would write.
pub fn render(doc: &ConfigDocument) -> Result<String> {
    let raw = toml::to_string(&ConfigSnapshot::from(doc))?;
    Ok(format!("{}\n\n{}", HEADER_COMMENT, space_sections(&raw)))
}

/// Writes `doc` to `path`, keeping the old file as `<path>.bak`.
///
/// If `path` is a symlink, its target is rewritten and the backup is placed
/// next to the target. The document is rendered before anything on disk is
/// touched; a rename failure aborts with the original file in place.
pub fn persist(doc: &ConfigDocument, path: &Path) -> Result<PersistOutcome> {
    let _timer = StageTimer::new("persist");
    let real_path = resolve_path(path)?;
    let rendered = render(doc)?;
    commit(&real_path, rendered.as_bytes(), write_owner_only)
}

/// Follows `path` if it is a symlink. Relative link targets are resolved
/// against the directory containing the link.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let meta = fs::symlink_metadata(path).map_err(|source| ConfigError::Lstat {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.file_type().is_symlink() {
        return Ok(path.to_path_buf());
    }

    let target = fs::read_link(path).map_err(|source| ConfigError::ReadLink {
        path: path.to_path_buf(),
        source,
    })?;
    match path.parent() {
        Some(dir) if target.is_relative() => Ok(dir.join(target)),
        _ => Ok(target),
    }
}

/// `<path>.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

fn commit<W>(real_path: &Path, contents: &[u8], write: W) -> Result<PersistOutcome>
where
    W: FnOnce(&Path, &[u8]) -> io::Result<()>,
{
    let backup = backup_path(real_path);
    fs::rename(real_path, &backup).map_err(|source| ConfigError::Rename {
        from: real_path.to_path_buf(),
        to: backup.clone(),
        source,
    })?;
    info!(target: "persist", from = %real_path.display(), to = %backup.display(), "Backed up config");

    write(real_path, contents).map_err(|source| ConfigError::Write {
        path: real_path.to_path_buf(),
        source,
    })?;
    info!(target: "persist", path = %real_path.display(), bytes = contents.len(), "Wrote config");

    Ok(PersistOutcome {
        written: real_path.to_path_buf(),
        backup,
    })
}

/// The file may hold integration credentials, so it is readable by the owner only.
fn write_owner_only(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Puts a blank line before every table header not already preceded by one.
///
/// Lines inside multi-line strings are content, not headers.
fn space_sections(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    let mut prev_blank = true;
    let mut state = StringState::Outside;
    for line in raw.lines() {
        let trimmed = line.trim();
        if state == StringState::Outside && !prev_blank && is_table_header(trimmed) {
            out.push('\n');
        }
        out.push_str(line);
        out.push('\n');
        prev_blank = state == StringState::Outside && trimmed.is_empty();
        state = state.advance(line);
    }
    out
}

fn is_table_header(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

/// Which TOML string, if any, is open at a given point of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringState {
    Outside,
    Basic,
    Literal,
    MultiBasic,
    MultiLiteral,
}

impl StringState {
    /// The state after scanning `line`, starting in `self`.
    fn advance(mut self, line: &str) -> Self {
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let rest = &bytes[i..];
            match self {
                Self::Outside => {
                    if rest.starts_with(b"\"\"\"") {
                        self = Self::MultiBasic;
                        i += 3;
                        continue;
                    }
                    if rest.starts_with(b"'''") {
                        self = Self::MultiLiteral;
                        i += 3;
                        continue;
                    }
                    match bytes[i] {
                        b'"' => self = Self::Basic,
                        b'\'' => self = Self::Literal,
                        b'#' => break,
                        _ => {}
                    }
                }
                Self::Basic | Self::MultiBasic if bytes[i] == b'\\' => i += 1,
                Self::Basic if bytes[i] == b'"' => self = Self::Outside,
                Self::Literal if bytes[i] == b'\'' => self = Self::Outside,
                Self::MultiBasic if rest.starts_with(b"\"\"\"") => {
                    self = Self::Outside;
                    i += 3;
                    continue;
                }
                Self::MultiLiteral if rest.starts_with(b"'''") => {
                    self = Self::Outside;
                    i += 3;
                    continue;
                }
                _ => {}
            }
            i += 1;
        }
        // Single-line strings end with their line.
        match self {
            Self::Basic | Self::Literal => Self::Outside,
            other => other,
        }
    }
}
