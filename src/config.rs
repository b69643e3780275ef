use std::path::{Path, PathBuf};

/// Directory that relative `--out` paths are written under, when set.
pub const OUT_DIR_VAR: &str = "GRADEBOOK_OUT_DIR";

/// Resolves `out` against `GRADEBOOK_OUT_DIR` from the environment.
pub fn resolve_out(out: PathBuf) -> PathBuf {
    let out_dir = std::env::var(OUT_DIR_VAR).ok();
    resolve_out_with(out, out_dir.as_deref())
}

/// Absolute paths and an unset or empty directory leave `out` unchanged.
pub fn resolve_out_with(out: PathBuf, out_dir: Option<&str>) -> PathBuf {
    match out_dir {
        Some(dir) if !dir.is_empty() && out.is_relative() => Path::new(dir).join(out),
        _ => out,
    }
}
