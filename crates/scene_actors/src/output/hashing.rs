use sha2::{Digest, Sha256};

use crate::context::ExportSettings;

use super::OutputError;

/// Raw inputs of one export; any change invalidates previously written tables.
#[derive(Debug, Clone, Copy)]
pub struct ExportInputs<'a> {
    pub scene_json: &'a [u8],
    pub actor_xml: &'a [u8],
    pub settings: &'a ExportSettings,
    pub scene_name: &'a str,
    pub header_index: u32,
}

pub fn hash_export_inputs(inputs: &ExportInputs<'_>) -> Result<String, OutputError> {
    let settings = serde_json::to_vec(inputs.settings).map_err(OutputError::EncodeSettings)?;
    let header_index = inputs.header_index.to_string();

    let mut hasher = Sha256::new();
    for part in [
        inputs.scene_json,
        inputs.actor_xml,
        settings.as_slice(),
        inputs.scene_name.as_bytes(),
        header_index.as_bytes(),
    ] {
        hasher.update(part);
        hasher.update([0u8]);
    }
    Ok(to_hex_lower(&hasher.finalize()))
}

fn to_hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(settings: &'a ExportSettings, header_index: u32) -> ExportInputs<'a> {
        ExportInputs {
            scene_json: br#"{"objects":[]}"#,
            actor_xml: b"<Table/>",
            settings,
            scene_name: "spot00",
            header_index,
        }
    }

    #[test]
    fn hash_is_stable_hex() {
        let settings = ExportSettings::default();
        let first = hash_export_inputs(&inputs(&settings, 0)).expect("hash");
        let second = hash_export_inputs(&inputs(&settings, 0)).expect("hash");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_changes_with_header_and_settings() {
        let settings = ExportSettings::default();
        let legacy = ExportSettings {
            use_new_actor_panel: false,
            ..ExportSettings::default()
        };
        let base = hash_export_inputs(&inputs(&settings, 0)).expect("hash");
        assert_ne!(base, hash_export_inputs(&inputs(&settings, 1)).expect("hash"));
        assert_ne!(base, hash_export_inputs(&inputs(&legacy, 0)).expect("hash"));
    }

    #[test]
    fn separator_keeps_fields_apart() {
        let settings = ExportSettings::default();
        let a = ExportInputs {
            scene_json: b"ab",
            actor_xml: b"c",
            ..inputs(&settings, 0)
        };
        let b = ExportInputs {
            scene_json: b"a",
            actor_xml: b"bc",
            ..inputs(&settings, 0)
        };
        assert_ne!(
            hash_export_inputs(&a).expect("hash"),
            hash_export_inputs(&b).expect("hash")
        );
    }
}
