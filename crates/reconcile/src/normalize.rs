// Path: crates/reconcile/src/normalize.rs

//! Default elision for server entries.
//!
//! `normalize` clears every field of a server entry that merely repeats the
//! `[default]` template so the serializer leaves it out of `config.toml`.
//! `inherit` is the inverse applied at load time. For an entry that was
//! produced by `inherit`, `inherit(normalize(e, d), d) == e`.
//!
//! "Equal" is chosen per field: plain equality for scalars, element-wise
//! equality for ordered lists (`scanMode`, `cpeNames`), set equality for
//! `ignoreCves` and `enablerepo`, and key-wise equality for `optional`.
use std::collections::BTreeSet;
use vuls_types::config::{OptionalSettings, ServerInfo};

/// Elides every field of `entry` that equals the corresponding field of `default`.
///
/// `uuids` and unmodelled keys (`extra`) are never touched. Applying this twice is the same as applying it once.
pub fn normalize(entry: &mut ServerInfo, default: &ServerInfo) {
    elide_scalar(&mut entry.host, &default.host);
    elide_scalar(&mut entry.port, &default.port);
    elide_scalar(&mut entry.user, &default.user);
    elide_scalar(&mut entry.key_path, &default.key_path);
    elide_scalar(&mut entry.server_type, &default.server_type);
    elide_scalar(&mut entry.owasp_dc_xml_path, &default.owasp_dc_xml_path);

    elide_sequence(&mut entry.scan_mode, &default.scan_mode);
    elide_sequence(&mut entry.cpe_names, &default.cpe_names);

    elide_set(&mut entry.ignore_cves, &default.ignore_cves);
    elide_set(&mut entry.enable_repo, &default.enable_repo);

    elide_optional(&mut entry.optional, default.optional.as_ref());
}

/// Returns a normalized copy of `entry`.
pub fn normalized(entry: &ServerInfo, default: &ServerInfo) -> ServerInfo {
    let mut out = entry.clone();
    normalize(&mut out, default);
    out
}

/// Fills the empty fields of `entry` from `default`.
///
/// `optional` is overlaid on the default's map: keys present in `entry` win,
/// missing keys are taken from the default. `extra` is kept as is.
pub fn inherit(entry: &ServerInfo, default: &ServerInfo) -> ServerInfo {
    let mut out = entry.clone();

    fill_scalar(&mut out.host, &default.host);
    fill_scalar(&mut out.port, &default.port);
    fill_scalar(&mut out.user, &default.user);
    fill_scalar(&mut out.key_path, &default.key_path);
    fill_scalar(&mut out.server_type, &default.server_type);
    fill_scalar(&mut out.owasp_dc_xml_path, &default.owasp_dc_xml_path);

    fill_list(&mut out.scan_mode, &default.scan_mode);
    fill_list(&mut out.cpe_names, &default.cpe_names);
    fill_list(&mut out.ignore_cves, &default.ignore_cves);
    fill_list(&mut out.enable_repo, &default.enable_repo);

    out.optional = match (&entry.optional, &default.optional) {
        (None, def) => def.clone(),
        (Some(own), None) => Some(own.clone()),
        (Some(own), Some(def)) => {
            let mut merged = def.clone();
            merged.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
            Some(merged)
        }
    };
    out
}

fn elide_scalar(field: &mut String, default: &str) {
    if *field == default {
        field.clear();
    }
}

fn elide_sequence(field: &mut Vec<String>, default: &[String]) {
    if field.as_slice() == default {
        field.clear();
    }
}

fn elide_set(field: &mut Vec<String>, default: &[String]) {
    let own: BTreeSet<&str> = field.iter().map(String::as_str).collect();
    let inherited: BTreeSet<&str> = default.iter().map(String::as_str).collect();
    if own == inherited {
        field.clear();
    }
}

fn elide_optional(field: &mut Option<OptionalSettings>, default: Option<&OptionalSettings>) {
    // A map identical to the default disappears entirely; a map that only
    // becomes empty through key removal stays as an explicit empty table.
    if field.as_ref() == default {
        *field = None;
        return;
    }
    if let (Some(own), Some(def)) = (field.as_mut(), default) {
        own.retain(|k, v| def.get(k) != Some(&*v));
    }
}

fn fill_scalar(field: &mut String, default: &str) {
    if field.is_empty() {
        field.push_str(default);
    }
}

fn fill_list(field: &mut Vec<String>, default: &[String]) {
    if field.is_empty() {
        field.extend_from_slice(default);
    }
}
