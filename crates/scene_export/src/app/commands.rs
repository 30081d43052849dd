use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use scene_actors::scene::ObjectKind;
use scene_actors::{
    hash_export_inputs, write_actor_tables, ActorExportError, AxisConvertingResolver,
    CatalogError, ExportContext, ExportInputs, ExportSettings, JsonPathError, ObjectId,
    OutputError, SceneActorTables, SceneGraph, SceneLoadError, SceneTransitionActors,
    StaticActorCatalog, TableParseError, WriteOutcome,
};
use thiserror::Error;
use tracing::info;

use super::bootstrap::default_header_index;
use super::cli::{parse_args, usage_text, Command, ExportArgs, ImportArgs};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{var} must be a header index, got '{value}'")]
    InvalidHeaderEnv { var: &'static str, value: String },
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write command output: {0}")]
    Stdout(#[source] io::Error),
    #[error("scene graph has no Scene object")]
    SceneRootMissing,
    #[error("scene graph has several Scene objects and none is named '{scene_name}'")]
    AmbiguousSceneRoot { scene_name: String },
    #[error("invalid export settings: {0}")]
    Settings(#[from] JsonPathError),
    #[error(transparent)]
    SceneLoad(#[from] SceneLoadError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Export(#[from] ActorExportError),
    #[error(transparent)]
    Parse(#[from] TableParseError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

pub(crate) fn run(args: &[String], out: &mut impl Write) -> Result<(), CliError> {
    match parse_args(args).map_err(CliError::Usage)? {
        Command::Help => writeln!(out, "{}", usage_text()).map_err(CliError::Stdout),
        Command::Export(export) => run_export(&export, out).map(|_| ()),
        Command::Import(import) => run_import(&import, out),
    }
}

pub(crate) fn run_export(
    args: &ExportArgs,
    out: &mut impl Write,
) -> Result<WriteOutcome, CliError> {
    let scene_json = read_text(&args.scene)?;
    let actor_xml = read_text(&args.actors)?;
    let settings = match &args.settings {
        Some(path) => ExportSettings::from_json_str(&read_text(path)?)?,
        None => ExportSettings::default(),
    };
    let header_index = match args.header {
        Some(header_index) => header_index,
        None => default_header_index()?,
    };

    let graph = SceneGraph::from_json_str(&scene_json)?;
    let catalog = StaticActorCatalog::from_xml_str(&args.actors, &actor_xml)?;
    let scene = find_scene_root(&graph, &args.scene_name)?;
    info!(
        scene_name = %args.scene_name,
        header_index,
        object_count = graph.len(),
        actor_count = catalog.len(),
        "scene_export_started"
    );

    let ctx = ExportContext {
        graph: &graph,
        scene,
        header_index,
        settings,
        catalog: &catalog,
        resolver: &AxisConvertingResolver,
    };
    let tables = SceneActorTables::new(&args.scene_name, &ctx)?;
    let input_hash = hash_export_inputs(&ExportInputs {
        scene_json: scene_json.as_bytes(),
        actor_xml: actor_xml.as_bytes(),
        settings: &settings,
        scene_name: &args.scene_name,
        header_index,
    })?;
    let outcome = write_actor_tables(&args.out_dir, &tables.header_name, &tables, &input_hash)?;

    let status = match outcome {
        WriteOutcome::Written => "written",
        WriteOutcome::UpToDate => "up to date",
    };
    writeln!(
        out,
        "{}: {status} ({} transition actors, {} entrances) in {}",
        tables.header_name,
        tables.transitions.entries.len(),
        tables.entrances.entries.len(),
        args.out_dir.display()
    )
    .map_err(CliError::Stdout)?;
    Ok(outcome)
}

pub(crate) fn run_import(args: &ImportArgs, out: &mut impl Write) -> Result<(), CliError> {
    let source = read_text(&args.source)?;
    let table = SceneTransitionActors::from_c_source(&source, args.convention)?;
    for (row, entry) in table.entries.iter().enumerate() {
        let [x, y, z] = entry.actor.pos;
        writeln!(
            out,
            "{row}: {} pos={x:.0},{y:.0},{z:.0} rot={} params={} rooms={}->{} cameras={},{}",
            entry.actor.id,
            entry.actor.rot,
            entry.actor.params,
            entry.room_from,
            entry.room_to,
            entry.camera_front,
            entry.camera_back
        )
        .map_err(CliError::Stdout)?;
    }
    info!(
        source = %args.source.display(),
        entry_count = table.entries.len(),
        "transition_actor_import_finished"
    );
    Ok(())
}

/// The Scene object named after the exported scene, or the only one present.
fn find_scene_root(graph: &SceneGraph, scene_name: &str) -> Result<ObjectId, CliError> {
    let scenes = graph
        .objects()
        .filter(|(_, object)| matches!(object.kind, ObjectKind::Scene))
        .collect::<Vec<_>>();
    if let Some((id, _)) = scenes.iter().find(|(_, object)| object.name == scene_name) {
        return Ok(*id);
    }
    match scenes.as_slice() {
        [(id, _)] => Ok(*id),
        [] => Err(CliError::SceneRootMissing),
        _ => Err(CliError::AmbiguousSceneRoot {
            scene_name: scene_name.to_string(),
        }),
    }
}

fn read_text(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
