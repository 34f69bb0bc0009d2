//! `defuse scan`: manifest and dependency scan only; never mutates

use std::path::Path;

use anyhow::Result;
use defuse::application::ScanUseCase;
use defuse::infrastructure::{LocalFs, XmlManifestReader};

use super::Session;
use crate::ui::views::scan::{render_scan_header, render_scan_report, scan_json};

pub fn cmd_scan(
    session: &Session,
    manifest: &Path,
    source_dir: Option<&Path>,
    diff: bool,
) -> Result<i32> {
    let manifest = session.from_cwd(manifest);
    let source_root = session.source_root(source_dir);
    let root = session.workspace.root.as_path();
    let ui = &session.ui;

    if !ui.json {
        print!(
            "{}",
            render_scan_header(&manifest, &source_root, root, ui.color, ui.unicode)
        );
    }

    let options = session.config.scan_options(&source_root)?;
    let reader = XmlManifestReader::new();
    let fs = LocalFs::new();
    let report = ScanUseCase::new(&reader, &fs, &options).execute(Some(&manifest), &source_root)?;

    if ui.json {
        println!("{}", scan_json(&report, root, diff));
    } else {
        print!(
            "{}",
            render_scan_report(&report, root, diff, ui.color, ui.unicode)
        );
    }
    Ok(0)
}
