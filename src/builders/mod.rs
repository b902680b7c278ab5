// This file is the module declaration file for the `builders` module.
// It declares the supporting pieces the engine is assembled from.

// `backup` module:
// Defines the `BackupProvider` trait and the `FileBackup` / `MemoryBackup`
// implementations that keep the original content of a target before it is
// rewritten, plus `restore` to put it back.
pub mod backup;

// `patterns` module:
// Defines `DedupPattern` (a literal substring or a `/regex/`) and the
// `PatternMatcher` trait the engine uses to select lines.
pub mod patterns;

// `reporter` module:
// Turns a `DedupReport` into console or JSON output.
pub mod reporter;

// `validator` module:
// Defines the `ConfigValidator` trait and the `StandardValidator` that
// rejects unusable configurations before any file is touched.
pub mod validator;
