//! `defuse recover`: undo a run that died holding the working tree

use anyhow::Result;
use defuse::application::RecoverUseCase;
use defuse::infrastructure::LocalFs;

use super::Session;
use crate::ui::views::recover::{recover_json, render_recover_report};

pub fn cmd_recover(session: &Session) -> Result<i32> {
    let ws = &session.workspace;
    let _lock = ws.lock()?;
    let journal = ws.journal();
    let fs = LocalFs::new();

    let report = RecoverUseCase::new(&fs, ws.tree.as_ref(), &journal).execute()?;

    let ui = &session.ui;
    if ui.json {
        println!("{}", recover_json(&report, &ws.root));
    } else {
        print!(
            "{}",
            render_recover_report(&report, &ws.root, ui.color, ui.unicode)
        );
    }
    Ok(0)
}
