use crate::{error::PlanError, split_plan::SplitPlan};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanCommand {
    ToggleSplit { after_page: u32 },
    SetName { index: usize, name: String },
    Clear,
}

impl PlanCommand {
    pub fn apply(&self, plan: &mut SplitPlan) -> Result<(), PlanError> {
        match self {
            PlanCommand::ToggleSplit { after_page } => plan.toggle_split(*after_page),
            PlanCommand::SetName { index, name } => plan.set_name(*index, name),
            PlanCommand::Clear => {
                plan.clear();
                Ok(())
            }
        }
    }
}

// Stops at the first rejected command; earlier ones stay applied.
pub fn apply_all(plan: &mut SplitPlan, commands: &[PlanCommand]) -> Result<(), PlanError> {
    for (i, cmd) in commands.iter().enumerate() {
        cmd.apply(plan).map_err(|e| PlanError::Command {
            position: i + 1,
            source: Box::new(e),
        })?;
    }
    Ok(())
}

pub fn load_commands(path: &Path) -> Result<Vec<PlanCommand>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading commands: {}", path.display()))?;
    let cmds: Vec<PlanCommand> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing commands JSON: {}", path.display()))?;
    Ok(cmds)
}
