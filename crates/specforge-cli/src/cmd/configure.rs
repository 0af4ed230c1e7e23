use crate::root::ToolConfig;
use anyhow::Context;
use specforge_core::{io, paths};
use std::path::{Path, PathBuf};

/// `configure-project-root` — record a target project root in
/// `.specforge/config.yaml` under the current directory so later
/// invocations operate there instead of the CLI's own location.
pub fn run(path: Option<&Path>) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let target = expand(path.unwrap_or(Path::new(".")), &cwd);

    if !target.is_dir() {
        anyhow::bail!(
            "target project root {} does not exist or is not a directory",
            target.display()
        );
    }

    let config = ToolConfig {
        target_project_root: target.clone(),
    };
    let yaml = serde_yaml::to_string(&config)?;
    io::atomic_write(&paths::config_path(&cwd), yaml.as_bytes())?;

    println!("  wrote: {}", paths::CONFIG_FILE);
    println!("Subsequent runs will operate on {}", target.display());
    Ok(())
}

/// Expand a leading `~` and make the path absolute relative to `cwd`.
fn expand(path: &Path, cwd: &Path) -> PathBuf {
    let expanded = if let Ok(stripped) = path.strip_prefix("~") {
        match home::home_dir() {
            Some(home) => home.join(stripped),
            None => path.to_path_buf(),
        }
    } else {
        path.to_path_buf()
    };
    if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let cwd = Path::new("/work/here");
        assert_eq!(expand(Path::new("sub"), cwd), PathBuf::from("/work/here/sub"));
        assert_eq!(expand(Path::new("."), cwd), PathBuf::from("/work/here/."));
    }

    #[test]
    fn absolute_paths_pass_through() {
        let cwd = Path::new("/work/here");
        assert_eq!(expand(Path::new("/other"), cwd), PathBuf::from("/other"));
    }
}
