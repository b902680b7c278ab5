// This file is the module declaration file for the `core` module.
// It declares the submodules contained within `src/core/` and exposes
// them to the rest of the crate.

// `config` module:
// Defines the configuration file (`FixConfig`), the `ConfigProvider` trait
// for loading/saving it, and the `ConfigManager` that handles the file I/O.
pub mod config;

// `document` module:
// The target file as an ordered sequence of lines, each line keeping its
// original terminator so the file round-trips byte for byte.
pub mod document;

// `engine` module:
// The line deduplicator itself and the `DedupEngine` that reads, filters
// and rewrites the target file.
pub mod engine;
