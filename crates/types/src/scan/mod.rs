// Path: crates/types/src/scan/mod.rs

//! Scan result models.
//!
//! Only the fields that take part in identity reconciliation are typed; the
//! rest of a result (packages, CVEs, errors, ...) is carried through `extra`
//! so that rewriting a result file never drops data.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The container a result was collected from.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    /// Runtime container ID. A non-empty ID marks a container result.
    #[serde(rename = "containerID")]
    pub container_id: String,
    /// Container name; part of the identity key.
    pub name: String,
    /// Image the container runs.
    pub image: String,
    /// Runtime type (`"docker"`, `"lxd"`, ...).
    #[serde(rename = "type")]
    pub runtime: String,
    /// Identifier of the container itself.
    pub uuid: String,
}

impl Container {
    /// Returns `true` if no container was scanned.
    pub fn is_empty(&self) -> bool {
        self.container_id.is_empty()
    }
}

/// The image a result was collected from.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Image {
    /// Repository name. A non-empty name marks an image result.
    pub name: String,
    /// Image tag.
    pub tag: String,
    /// Content digest, when known.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub digest: String,
}

impl Image {
    /// Returns `true` if no image was scanned.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// What a scan result describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTarget<'a> {
    /// The host itself.
    Host,
    /// A container running on the host.
    Container(&'a Container),
    /// An image stored on the host.
    Image(&'a Image),
}

/// One scan outcome for one target.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanResult {
    /// Logical host key; matches a `[servers.<name>]` entry.
    pub server_name: String,
    /// Assigned identifier. For container results this is the host's UUID.
    #[serde(rename = "serverUUID")]
    pub server_uuid: String,
    /// Set for container results.
    #[serde(skip_serializing_if = "Container::is_empty")]
    pub container: Container,
    /// Set for image results.
    #[serde(skip_serializing_if = "Image::is_empty")]
    pub image: Image,
    /// Everything else in the result document, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScanResult {
    /// Creates a bare-host result.
    pub fn host(server_name: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            ..Default::default()
        }
    }

    /// Creates a container result for a container running on `server_name`.
    pub fn container(
        server_name: impl Into<String>,
        container_id: impl Into<String>,
        container_name: impl Into<String>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            container: Container {
                container_id: container_id.into(),
                name: container_name.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Creates an image result for an image stored on `server_name`.
    pub fn image(
        server_name: impl Into<String>,
        image_name: impl Into<String>,
        image_tag: impl Into<String>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            image: Image {
                name: image_name.into(),
                tag: image_tag.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Classifies the result. Container takes precedence over image.
    pub fn target(&self) -> ScanTarget<'_> {
        if !self.container.is_empty() {
            ScanTarget::Container(&self.container)
        } else if !self.image.is_empty() {
            ScanTarget::Image(&self.image)
        } else {
            ScanTarget::Host
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_classification() {
        assert_eq!(ScanResult::host("web").target(), ScanTarget::Host);

        let c = ScanResult::container("web", "abc123", "nginx");
        assert!(matches!(c.target(), ScanTarget::Container(ct) if ct.name == "nginx"));

        let i = ScanResult::image("web", "alpine", "3.9");
        assert!(matches!(i.target(), ScanTarget::Image(img) if img.tag == "3.9"));
    }

    #[test]
    fn test_unknown_fields_survive_rewrite() {
        let raw = r#"{
            "jsonVersion": 4,
            "serverName": "web",
            "serverUUID": "",
            "container": {"containerID": "", "name": "", "image": "", "type": "", "uuid": ""},
            "scannedCves": {"CVE-2014-6271": {"cveID": "CVE-2014-6271"}}
        }"#;
        let mut r: ScanResult = serde_json::from_str(raw).unwrap();
        assert_eq!(r.target(), ScanTarget::Host);
        r.server_uuid = "2d4e5f60-1a2b-4c3d-8e9f-a0b1c2d3e4f5".into();

        let v: Value = serde_json::to_value(&r).unwrap();
        assert_eq!(v["jsonVersion"], 4);
        assert_eq!(v["serverUUID"], "2d4e5f60-1a2b-4c3d-8e9f-a0b1c2d3e4f5");
        assert!(v["scannedCves"]["CVE-2014-6271"].is_object());
        assert!(v.get("container").is_none());
    }
}
