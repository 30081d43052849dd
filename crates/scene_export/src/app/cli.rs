use std::path::PathBuf;

use scene_actors::RowConvention;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Export(ExportArgs),
    Import(ImportArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportArgs {
    pub scene: PathBuf,
    pub actors: PathBuf,
    pub scene_name: String,
    /// Falls back to the environment default when absent.
    pub header: Option<u32>,
    pub out_dir: PathBuf,
    pub settings: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportArgs {
    pub source: PathBuf,
    pub convention: RowConvention,
}

pub(crate) fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(command) = args.first() else {
        return Err(usage_text());
    };
    let command_args = &args[1..];
    match command.as_str() {
        "-h" | "--help" => Ok(Command::Help),
        "export" => parse_export(command_args).map(Command::Export),
        "import" => parse_import(command_args).map(Command::Import),
        other => Err(format!("unknown subcommand '{other}'")),
    }
}

fn parse_export(args: &[String]) -> Result<ExportArgs, String> {
    let mut scene = None;
    let mut actors = None;
    let mut scene_name = None;
    let mut header = None;
    let mut out_dir = PathBuf::from(".");
    let mut settings = None;

    let mut index = 0usize;
    while index < args.len() {
        let flag = args[index].as_str();
        let value = args
            .get(index + 1)
            .ok_or_else(|| format!("missing value for {flag}"))?;
        match flag {
            "--scene" => scene = Some(PathBuf::from(value)),
            "--actors" => actors = Some(PathBuf::from(value)),
            "--scene-name" => scene_name = Some(value.clone()),
            "--header" => {
                header = Some(
                    value
                        .parse::<u32>()
                        .map_err(|_| format!("invalid --header value '{value}' (expected u32)"))?,
                );
            }
            "--out" => out_dir = PathBuf::from(value),
            "--settings" => settings = Some(PathBuf::from(value)),
            other => return Err(format!("unknown export argument '{other}'")),
        }
        index += 2;
    }

    Ok(ExportArgs {
        scene: scene.ok_or_else(|| "export requires --scene <json>".to_string())?,
        actors: actors.ok_or_else(|| "export requires --actors <xml>".to_string())?,
        scene_name: scene_name.ok_or_else(|| "export requires --scene-name <name>".to_string())?,
        header,
        out_dir,
        settings,
    })
}

fn parse_import(args: &[String]) -> Result<ImportArgs, String> {
    let mut source = None;
    let mut convention = RowConvention::Braced;

    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--source" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --source".to_string())?;
                source = Some(PathBuf::from(value));
                index += 2;
            }
            "--flat" => {
                convention = RowConvention::Flat;
                index += 1;
            }
            other => return Err(format!("unknown import argument '{other}'")),
        }
    }

    Ok(ImportArgs {
        source: source.ok_or_else(|| "import requires --source <file>".to_string())?,
        convention,
    })
}

pub(crate) fn usage_text() -> String {
    [
        "scene_export - scene actor placement table exporter",
        "",
        "Usage:",
        "  scene_export export --scene <json> --actors <xml> --scene-name <name> [--header <u32>] [--out <dir>] [--settings <json>]",
        "  scene_export import --source <file> [--flat]",
        "",
        "Environment:",
        "  SCENE_EXPORT_HEADER  default header index for export (0 when unset)",
        "  RUST_LOG             log filter (default info)",
    ]
    .join("\n")
}
