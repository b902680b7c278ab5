use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{FixError, FixResult};

/// Where the original content of a target is kept before it is rewritten.
pub trait BackupProvider {
    /// Stores the original content of `target` before it is rewritten.
    ///
    /// # Arguments
    /// * `target`: The file about to be rewritten.
    /// * `original_content`: Its full content as read.
    ///
    /// # Returns
    /// `Ok(())` once the backup is kept, or a `ResourceIo` error.
    fn store_backup(&mut self, target: &Path, original_content: &str) -> FixResult<()>;

    /// Takes the stored content back out. The backup is consumed.
    ///
    /// # Arguments
    /// * `target`: The file whose backup is wanted.
    ///
    /// # Returns
    /// `Ok(Some(content))` if a backup existed, `Ok(None)` otherwise.
    fn take_backup(&mut self, target: &Path) -> FixResult<Option<String>>;
}

/// Keeps the backup as `<target>.bak` next to the target.
pub struct FileBackup;

impl FileBackup {
    pub fn new() -> Self {
        Self
    }

    pub fn backup_path(target: &Path) -> PathBuf {
        let mut name = target
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".bak");
        target.with_file_name(name)
    }
}

impl Default for FileBackup {
    fn default() -> Self {
        Self::new()
    }
}

impl BackupProvider for FileBackup {
    fn store_backup(&mut self, target: &Path, original_content: &str) -> FixResult<()> {
        let backup_path = Self::backup_path(target);
        fs::write(&backup_path, original_content).map_err(|e| FixError::io(&backup_path, e))?;
        info!(backup = %backup_path.display(), "stored backup");
        Ok(())
    }

    fn take_backup(&mut self, target: &Path) -> FixResult<Option<String>> {
        let backup_path = Self::backup_path(target);

        if !backup_path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&backup_path).map_err(|e| FixError::io(&backup_path, e))?;
        fs::remove_file(&backup_path).map_err(|e| FixError::io(&backup_path, e))?;
        Ok(Some(content))
    }
}

/// Backups held in memory for the lifetime of the provider.
#[derive(Default)]
pub struct MemoryBackup {
    backups: HashMap<PathBuf, String>,
}

impl MemoryBackup {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BackupProvider for MemoryBackup {
    fn store_backup(&mut self, target: &Path, original_content: &str) -> FixResult<()> {
        self.backups
            .insert(target.to_path_buf(), original_content.to_string());
        Ok(())
    }

    fn take_backup(&mut self, target: &Path) -> FixResult<Option<String>> {
        Ok(self.backups.remove(target))
    }
}

/// Puts the backed-up content back over `target`.
pub fn restore(provider: &mut dyn BackupProvider, target: &Path) -> FixResult<()> {
    let content = provider
        .take_backup(target)?
        .ok_or_else(|| FixError::MissingBackup(FileBackup::backup_path(target)))?;
    fs::write(target, content).map_err(|e| FixError::io(target, e))?;
    info!(target = %target.display(), "restored from backup");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            FileBackup::backup_path(Path::new("a/View.tsx")),
            PathBuf::from("a/View.tsx.bak")
        );
    }

    #[test]
    fn test_file_backup_store_and_restore() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("View.tsx");
        fs::write(&target, "changed\n").unwrap();

        let mut backup = FileBackup::new();
        backup.store_backup(&target, "original\n").unwrap();
        assert!(FileBackup::backup_path(&target).exists());

        restore(&mut backup, &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "original\n");
        assert!(!FileBackup::backup_path(&target).exists());
    }

    #[test]
    fn test_restore_without_backup_fails() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("View.tsx");
        let err = restore(&mut FileBackup::new(), &target).unwrap_err();
        assert!(matches!(err, FixError::MissingBackup(_)));
    }

    #[test]
    fn test_memory_backup_is_consumed() {
        let mut backup = MemoryBackup::new();
        let target = Path::new("View.tsx");
        backup.store_backup(target, "x").unwrap();
        assert_eq!(backup.take_backup(target).unwrap().as_deref(), Some("x"));
        assert_eq!(backup.take_backup(target).unwrap(), None);
    }
}
