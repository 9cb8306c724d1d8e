use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

pub fn focusforge_home() -> Result<PathBuf> {
    resolve_home(
        std::env::var("FOCUSFORGE_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn resolve_home(override_dir: Option<String>, home: Option<String>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match home.filter(|h| !h.trim().is_empty()) {
        Some(home) => Ok(PathBuf::from(home).join(".focusforge")),
        None => bail!("HOME is not set (or set FOCUSFORGE_HOME)"),
    }
}

pub fn ensure_focusforge_home() -> Result<PathBuf> {
    let dir = focusforge_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_tasks_path() -> Result<PathBuf> {
    Ok(focusforge_home()?.join("tasks.json"))
}

/// Expand a leading `~/` against `$HOME`. Other paths pass through.
pub fn expand_user(path: &str) -> Result<PathBuf> {
    expand_user_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_user_with(path: &str, home: Option<&str>) -> Result<PathBuf> {
    let Some(rest) = path.strip_prefix("~/") else {
        return Ok(PathBuf::from(path));
    };
    let home = home.context("HOME is not set")?;
    Ok(Path::new(home).join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_home() {
        let dir = resolve_home(Some("/tmp/ff".into()), Some("/home/me".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/ff"));
    }

    #[test]
    fn falls_back_to_dot_dir_under_home() {
        let dir = resolve_home(Some("  ".into()), Some("/home/me".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/home/me/.focusforge"));
        assert!(resolve_home(None, None).is_err());
    }

    #[test]
    fn expands_tilde_only_at_start() {
        assert_eq!(
            expand_user_with("~/.focusforge/tasks.json", Some("/home/me")).unwrap(),
            PathBuf::from("/home/me/.focusforge/tasks.json")
        );
        assert_eq!(
            expand_user_with("notes/~/x.md", None).unwrap(),
            PathBuf::from("notes/~/x.md")
        );
        assert!(expand_user_with("~/x.md", None).is_err());
    }
}
