use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::tables::SceneActorTables;

use super::atomic_io::write_text_atomic;
use super::manifest::{
    read_manifest, write_manifest_atomic, ExportManifest, ManifestReadState,
    OUTPUT_FORMAT_VERSION,
};
use super::OutputError;

const EXPORTER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub header: PathBuf,
    pub source: PathBuf,
    pub cmds: PathBuf,
    pub manifest: PathBuf,
}

impl OutputPaths {
    pub fn new(out_dir: &Path, stem: &str) -> Self {
        Self {
            header: out_dir.join(format!("{stem}.h")),
            source: out_dir.join(format!("{stem}.c")),
            cmds: out_dir.join(format!("{stem}.cmds.inc")),
            manifest: out_dir.join(format!("{stem}.manifest.json")),
        }
    }

    fn outputs(&self) -> [&Path; 3] {
        [&self.header, &self.source, &self.cmds]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    UpToDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteReason {
    ManifestMissing,
    ManifestUnreadable,
    VersionMismatch,
    InputHashMismatch,
    OutputMissing,
}

/// Writes the header, source, command include and manifest for one scene
/// header. Nothing is rewritten when the manifest already records `input_hash`.
pub fn write_actor_tables(
    out_dir: &Path,
    stem: &str,
    tables: &SceneActorTables,
    input_hash: &str,
) -> Result<WriteOutcome, OutputError> {
    let paths = OutputPaths::new(out_dir, stem);
    let Some(reason) = rewrite_reason(&paths, input_hash)? else {
        debug!(stem, input_hash, "actor_tables_up_to_date");
        return Ok(WriteOutcome::UpToDate);
    };

    let data = tables.to_c();
    write_file(&paths.header, &header_file(stem, &data.header))?;
    write_file(&paths.source, &format!("#include \"{stem}.h\"\n\n{}", data.source))?;
    write_file(&paths.cmds, &tables.cmds())?;

    // Manifest goes last so an interrupted write is retried next run.
    let manifest = ExportManifest {
        format_version: OUTPUT_FORMAT_VERSION,
        exporter_version: EXPORTER_VERSION.to_string(),
        header_name: tables.header_name.clone(),
        transition_count: tables.transitions.entries.len(),
        entrance_count: tables.entrances.entries.len(),
        input_hash_sha256_hex: input_hash.to_string(),
    };
    write_manifest_atomic(&paths.manifest, &manifest)?;

    info!(
        stem,
        header = %tables.header_name,
        reason = ?reason,
        out_dir = %out_dir.display(),
        "actor_tables_written"
    );
    Ok(WriteOutcome::Written)
}

fn rewrite_reason(
    paths: &OutputPaths,
    input_hash: &str,
) -> Result<Option<RewriteReason>, OutputError> {
    let manifest = match read_manifest(&paths.manifest)? {
        ManifestReadState::Missing => return Ok(Some(RewriteReason::ManifestMissing)),
        ManifestReadState::Unreadable => return Ok(Some(RewriteReason::ManifestUnreadable)),
        ManifestReadState::Present(manifest) => manifest,
    };
    if manifest.format_version != OUTPUT_FORMAT_VERSION
        || manifest.exporter_version != EXPORTER_VERSION
    {
        return Ok(Some(RewriteReason::VersionMismatch));
    }
    if manifest.input_hash_sha256_hex != input_hash {
        return Ok(Some(RewriteReason::InputHashMismatch));
    }
    if paths.outputs().iter().any(|path| !path.is_file()) {
        return Ok(Some(RewriteReason::OutputMissing));
    }
    Ok(None)
}

fn header_file(stem: &str, declarations: &str) -> String {
    let guard = stem
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect::<String>()
        + "_H";
    format!("#ifndef {guard}\n#define {guard}\n\n{declarations}\n#endif\n")
}

fn write_file(path: &Path, text: &str) -> Result<(), OutputError> {
    write_text_atomic(path, text).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::tables::test_support::{entrance, transition, Fixture};

    fn sample_tables() -> SceneActorTables {
        let mut fixture = Fixture::new();
        let room = fixture.add_room("room_0", 0);
        fixture.add_transition("door", room, transition("ACTOR_EN_DOOR"));
        fixture.add_entrance("spawn", room, entrance(0, Some(room)));
        SceneActorTables::new("spot00", &fixture.ctx(0)).expect("tables")
    }

    #[test]
    fn writes_all_outputs_then_reports_up_to_date() {
        let temp = TempDir::new().expect("tempdir");
        let tables = sample_tables();
        let hash = "11".repeat(32);

        let first = write_actor_tables(temp.path(), "spot00_actors", &tables, &hash)
            .expect("first write");
        assert_eq!(first, WriteOutcome::Written);

        let paths = OutputPaths::new(temp.path(), "spot00_actors");
        let header = fs::read_to_string(&paths.header).expect("read header");
        assert!(header.starts_with("#ifndef SPOT00_ACTORS_H\n#define SPOT00_ACTORS_H\n\n"));
        assert!(header.contains("extern Spawn spot00_header00_entranceList[];\n"));
        let source = fs::read_to_string(&paths.source).expect("read source");
        assert!(source.starts_with("#include \"spot00_actors.h\"\n\nTransitionActorEntry"));
        assert_eq!(
            fs::read_to_string(&paths.cmds).expect("read cmds"),
            tables.cmds()
        );
        assert!(paths.manifest.is_file());

        let second = write_actor_tables(temp.path(), "spot00_actors", &tables, &hash)
            .expect("second write");
        assert_eq!(second, WriteOutcome::UpToDate);
    }

    #[test]
    fn changed_hash_or_missing_output_rewrites() {
        let temp = TempDir::new().expect("tempdir");
        let tables = sample_tables();
        let paths = OutputPaths::new(temp.path(), "spot00_actors");

        write_actor_tables(temp.path(), "spot00_actors", &tables, &"11".repeat(32))
            .expect("first write");
        assert_eq!(
            rewrite_reason(&paths, &"22".repeat(32)).expect("reason"),
            Some(RewriteReason::InputHashMismatch)
        );

        fs::remove_file(&paths.cmds).expect("remove cmds");
        assert_eq!(
            rewrite_reason(&paths, &"11".repeat(32)).expect("reason"),
            Some(RewriteReason::OutputMissing)
        );
        let outcome = write_actor_tables(temp.path(), "spot00_actors", &tables, &"11".repeat(32))
            .expect("rewrite");
        assert_eq!(outcome, WriteOutcome::Written);
        assert!(paths.cmds.is_file());
    }

    #[test]
    fn unreadable_manifest_forces_rewrite() {
        let temp = TempDir::new().expect("tempdir");
        let paths = OutputPaths::new(temp.path(), "spot00_actors");
        fs::write(&paths.manifest, "garbage").expect("write manifest");
        assert_eq!(
            rewrite_reason(&paths, "00").expect("reason"),
            Some(RewriteReason::ManifestUnreadable)
        );
    }
}
