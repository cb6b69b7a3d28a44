// Path: crates/reconcile/src/identity.rs
use tracing::{info, warn};
use uuid::Uuid;
use vuls_types::config::{ConfigDocument, ServerInfo};
use vuls_types::error::IdentityError;
use vuls_types::scan::{ScanResult, ScanTarget};

/// Length of the hyphenated 8-4-4-4-12 form.
const HYPHENATED_LEN: usize = 36;

/// Source of fresh identifiers.
pub trait IdGenerator {
    /// Returns a new identifier in canonical hyphenated form.
    fn generate(&mut self) -> String;
}

/// Random (version 4) UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn generate(&mut self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

/// Checks that `value` is a 32-hex-digit UUID grouped 8-4-4-4-12.
///
/// Hex digits may be upper or lower case. Simple, braced and URN forms are
/// rejected even though they encode a valid UUID.
pub fn validate_uuid(key: &str, value: &str) -> Result<(), IdentityError> {
    if value.len() == HYPHENATED_LEN && Uuid::try_parse(value).is_ok() {
        Ok(())
    } else {
        Err(IdentityError::InvalidFormat {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Returns `true` if `value` is in canonical UUID form.
pub fn is_canonical(value: &str) -> bool {
    validate_uuid("", value).is_ok()
}

/// The key a result's UUID is stored under in `[servers.<name>.uuids]`.
///
/// * host: `<serverName>`
/// * container: `<containerName>@<serverName>`
/// * image: `<imageName>:<imageTag>@<serverName>`
pub fn identity_key(result: &ScanResult) -> String {
    match result.target() {
        ScanTarget::Host => result.server_name.clone(),
        ScanTarget::Container(c) => format!("{}@{}", c.name, result.server_name),
        ScanTarget::Image(i) => format!("{}:{}@{}", i.name, i.tag, result.server_name),
    }
}

/// Assigns and repairs identifiers for scan targets.
pub struct IdentityResolver<G> {
    generator: G,
    generated: usize,
    replaced: usize,
}

impl<G: IdGenerator> IdentityResolver<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            generated: 0,
            replaced: 0,
        }
    }

    /// Number of identifiers created for keys that had none.
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// Number of stored identifiers that were invalid and got replaced.
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    /// Resolves the identifier of `result` against its server entry in `doc`.
    ///
    /// The server entry is created if missing. Container and image results
    /// also make sure the host's own key holds a valid UUID, even when the
    /// host itself is not part of the batch.
    ///
    /// On return, host results carry their UUID in `server_uuid`; container
    /// results carry the container's UUID in `container.uuid` and the host's in
    /// `server_uuid`; image results carry the image's UUID in `server_uuid`.
    /// Returns the resolved identifier of the target and its server entry.
    pub fn resolve<'d>(
        &mut self,
        result: &mut ScanResult,
        doc: &'d mut ConfigDocument,
    ) -> (String, &'d mut ServerInfo) {
        let key = identity_key(result);
        let is_host = matches!(result.target(), ScanTarget::Host);
        let is_container = matches!(result.target(), ScanTarget::Container(_));
        let server_name = result.server_name.clone();
        let entry = doc.server_mut(&server_name);

        let host_id = if is_host {
            None
        } else {
            Some(self.ensure(entry, &server_name, &server_name))
        };
        let id = self.ensure(entry, &server_name, &key);

        match host_id {
            Some(host_id) if is_container => {
                result.container.uuid = id.clone();
                result.server_uuid = host_id;
            }
            _ => result.server_uuid = id.clone(),
        }
        (id, entry)
    }

    fn ensure(&mut self, entry: &mut ServerInfo, server: &str, key: &str) -> String {
        match entry.uuids.get(key) {
            Some(id) => match validate_uuid(key, id) {
                Ok(()) => return id.clone(),
                Err(e) => {
                    warn!(target: "identity", server, error = %e, "Re-generating invalid UUID");
                    self.replaced += 1;
                }
            },
            None => self.generated += 1,
        }

        let id = self.generator.generate();
        info!(target: "identity", server, key, uuid = %id, "Assigned new UUID");
        entry.uuids.insert(key.to_string(), id.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out `00000000-0000-4000-8000-00000000000N` in order.
    struct Sequential(u64);

    impl IdGenerator for Sequential {
        fn generate(&mut self) -> String {
            self.0 += 1;
            format!("00000000-0000-4000-8000-{:012x}", self.0)
        }
    }

    fn seq(n: u64) -> String {
        format!("00000000-0000-4000-8000-{:012x}", n)
    }

    #[test]
    fn test_validate_uuid_forms() {
        assert!(is_canonical("2d4e5f60-1a2b-4c3d-8e9f-a0b1c2d3e4f5"));
        assert!(is_canonical("2D4E5F60-1A2B-4C3D-8E9F-A0B1C2D3E4F5"));

        assert!(!is_canonical(""));
        assert!(!is_canonical("2d4e5f601a2b4c3d8e9fa0b1c2d3e4f5"));
        assert!(!is_canonical("{2d4e5f60-1a2b-4c3d-8e9f-a0b1c2d3e4f5}"));
        assert!(!is_canonical("2d4e5f60-1a2b-4c3d-8e9f-a0b1c2d3e4f5x"));
        assert!(!is_canonical("2d4e5f60-1a2b-4c3d-8e9f-a0b1c2d3e4fg"));
        assert!(!is_canonical("2d4e5f6-01a2b-4c3d-8e9f-a0b1c2d3e4f5"));
    }

    #[test]
    fn test_uuid_v4_generator_is_canonical() {
        let mut g = UuidV4Generator;
        let a = g.generate();
        let b = g.generate();
        assert!(is_canonical(&a));
        assert_ne!(a, b);
    }

    #[test]
    fn test_identity_keys() {
        assert_eq!(identity_key(&ScanResult::host("web")), "web");
        assert_eq!(
            identity_key(&ScanResult::container("web", "abc123", "nginx")),
            "nginx@web"
        );
        assert_eq!(
            identity_key(&ScanResult::image("web", "alpine", "3.9")),
            "alpine:3.9@web"
        );
    }

    #[test]
    fn test_host_gets_new_uuid_once() {
        let mut doc = ConfigDocument::default();
        let mut resolver = IdentityResolver::new(Sequential(0));

        let mut r = ScanResult::host("web");
        let (id, entry) = resolver.resolve(&mut r, &mut doc);
        assert_eq!(id, seq(1));
        assert_eq!(entry.uuids.get("web"), Some(&seq(1)));
        assert_eq!(r.server_uuid, seq(1));

        let mut again = ScanResult::host("web");
        let (id, _) = resolver.resolve(&mut again, &mut doc);
        assert_eq!(id, seq(1));
        assert_eq!(resolver.generated(), 1);
        assert_eq!(resolver.replaced(), 0);
    }

    #[test]
    fn test_invalid_uuid_is_replaced() {
        let mut doc = ConfigDocument::default();
        doc.server_mut("web")
            .uuids
            .insert("web".into(), "not-a-uuid".into());
        let mut resolver = IdentityResolver::new(Sequential(0));

        let mut r = ScanResult::host("web");
        resolver.resolve(&mut r, &mut doc);

        assert_eq!(r.server_uuid, seq(1));
        assert_eq!(doc.servers["web"].uuids["web"], seq(1));
        assert_eq!(resolver.replaced(), 1);
        assert_eq!(resolver.generated(), 0);
    }

    #[test]
    fn test_container_creates_host_uuid_as_side_effect() {
        let mut doc = ConfigDocument::default();
        let mut resolver = IdentityResolver::new(Sequential(0));

        let mut r = ScanResult::container("web", "abc123", "nginx");
        let (id, entry) = resolver.resolve(&mut r, &mut doc);

        // Host key is ensured first, then the container's own key.
        assert_eq!(entry.uuids.get("web"), Some(&seq(1)));
        assert_eq!(entry.uuids.get("nginx@web"), Some(&seq(2)));
        assert_eq!(id, seq(2));
        assert_eq!(r.container.uuid, seq(2));
        assert_eq!(r.server_uuid, seq(1));
    }

    #[test]
    fn test_container_reuses_existing_host_uuid() {
        let host_id = "2d4e5f60-1a2b-4c3d-8e9f-a0b1c2d3e4f5".to_string();
        let mut doc = ConfigDocument::default();
        doc.server_mut("web")
            .uuids
            .insert("web".into(), host_id.clone());
        let mut resolver = IdentityResolver::new(Sequential(0));

        let mut r = ScanResult::container("web", "abc123", "nginx");
        resolver.resolve(&mut r, &mut doc);

        assert_eq!(r.server_uuid, host_id);
        assert_eq!(r.container.uuid, seq(1));
        assert_eq!(resolver.generated(), 1);
    }

    #[test]
    fn test_image_carries_its_own_uuid() {
        let mut doc = ConfigDocument::default();
        let mut resolver = IdentityResolver::new(Sequential(0));

        let mut r = ScanResult::image("registry", "alpine", "3.9");
        resolver.resolve(&mut r, &mut doc);

        let uuids = &doc.servers["registry"].uuids;
        assert_eq!(uuids.get("registry"), Some(&seq(1)));
        assert_eq!(uuids.get("alpine:3.9@registry"), Some(&seq(2)));
        assert_eq!(r.server_uuid, seq(2));
        assert!(r.container.uuid.is_empty());
    }
}
