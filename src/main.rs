use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use rayon::prelude::*;

use figure_workflow::config;
use figure_workflow::extract::SyntheticPolicy;
use figure_workflow::media::MediaStore;
use figure_workflow::model::{Project, Stage};
use figure_workflow::report;
use figure_workflow::session::kv::DirStore;
use figure_workflow::session::{ProjectMeta, SessionSnapshot};
use figure_workflow::store::commands::Command;
use figure_workflow::store::notify::{NoticeKind, NoticeLog};
use figure_workflow::store::{WorkflowStore, validate};
use figure_workflow::upload::{self, IncomingFile};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: figure_workflow <input-dir> [--label <stage>] [--report <path>]");
        eprintln!("  Ingest the files in <input-dir>, extract figures, and print the report.");
        eprintln!("  --label   Upload into a stage lane (design|analyse|dev|testing).");
        eprintln!("  --report  Write the report to <path> instead of stdout.");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("figure_workflow {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    // Parse positional input dir and options.
    let mut input_dir: Option<PathBuf> = None;
    let mut label: Option<Stage> = None;
    let mut report_path: Option<PathBuf> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--label" => {
                let Some(value) = iter.next() else {
                    eprintln!("ERROR: --label requires a value");
                    return ExitCode::FAILURE;
                };
                match Stage::from_str(value) {
                    Ok(stage) => label = Some(stage),
                    Err(e) => {
                        eprintln!("ERROR: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
            "--report" => {
                let Some(value) = iter.next() else {
                    eprintln!("ERROR: --report requires a value");
                    return ExitCode::FAILURE;
                };
                report_path = Some(PathBuf::from(value));
            }
            other => {
                if input_dir.is_some() {
                    eprintln!("ERROR: Unexpected argument '{other}'");
                    return ExitCode::FAILURE;
                }
                input_dir = Some(PathBuf::from(other));
            }
        }
    }

    let Some(input_dir) = input_dir else {
        eprintln!("ERROR: Missing <input-dir>");
        return ExitCode::FAILURE;
    };

    let settings = match config::load_settings_for(&input_dir) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: Failed to load settings for {}: {e}", input_dir.display());
            return ExitCode::FAILURE;
        }
    };

    // Read the batch off disk in parallel; ingest itself stays sequential.
    let file_paths = match list_files(&input_dir) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}: {e}", input_dir.display());
            return ExitCode::FAILURE;
        }
    };

    let incoming: Vec<IncomingFile> = file_paths
        .par_iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            match std::fs::read(path) {
                Ok(bytes) => Some(IncomingFile { name, bytes }),
                Err(e) => {
                    eprintln!("ERROR: Failed to read {}: {e}", path.display());
                    None
                }
            }
        })
        .collect();

    let media = MediaStore::new(&settings.media_dir);
    let mut notices = NoticeLog::new();
    let documents = upload::ingest(incoming, &media, &settings, label, &mut notices);

    let project_name = input_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled project".to_string());

    if let Err(e) = validate::validate_project_creation(&project_name, documents.len()) {
        report_notices(&notices);
        eprintln!("ERROR: {e}");
        return ExitCode::FAILURE;
    }

    let mut store = WorkflowStore::new(Project::new(&project_name, ""));
    store.apply(
        Command::AddDocuments {
            documents: documents.clone(),
        },
        &mut notices,
    );

    // Synthesize one task per document through the extraction policy.
    let policy = SyntheticPolicy {
        count_min: settings.figure_count_min,
        count_max: settings.figure_count_max,
    };
    let document_ids: Vec<_> = documents.iter().map(|d| d.id.clone()).collect();
    for id in &document_ids {
        store.extract_figures(id, &policy, &mut notices);
    }

    report_notices(&notices);

    let rendered = report::render_text(store.project());
    if let Some(path) = &report_path {
        if let Err(e) = std::fs::write(path, &rendered) {
            eprintln!("ERROR: Failed to write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!("OK: report written to {}", path.display());
    } else {
        print!("{rendered}");
    }

    // Persist the session the same way the workspace would.
    let snapshot = SessionSnapshot {
        documents,
        project: ProjectMeta {
            name: store.project().name.clone(),
            description: store.project().description.clone(),
        },
        selected_labels: label.iter().map(|s| s.to_string()).collect(),
        tasks: store.project().tasks.clone(),
    };
    let mut session_store = DirStore::new(&settings.session_dir);
    if let Err(e) = snapshot.save(&mut session_store) {
        eprintln!("ERROR: Failed to persist session: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Regular files directly under `dir`, sorted by name for stable output.
fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        // The workspace settings file is configuration, not an upload.
        .filter(|path| path.file_name().is_none_or(|n| n != "settings.yaml"))
        .collect();
    paths.sort();
    Ok(paths)
}

fn report_notices(notices: &NoticeLog) {
    for notice in &notices.notices {
        match notice.kind {
            NoticeKind::Success => eprintln!("OK: {}", notice.message),
            NoticeKind::Error => eprintln!("ERROR: {}", notice.message),
        }
    }
}
