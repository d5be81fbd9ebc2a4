//! # API Facade
//!
//! [`PendataApi`] is the session object and the single entry point for
//! all operations. It owns the record store, the path of the last file
//! loaded this session, and the configuration; UI clients never touch
//! those directly.
//!
//! The facade dispatches to the command functions and returns their
//! structured `Result<CmdResult>` untouched. It does no business logic
//! of its own and never prints.

use std::path::{Path, PathBuf};

use crate::commands::{self, CmdResult};
use crate::config::PendataConfig;
use crate::error::Result;
use crate::model::{FieldUpdate, Nisn, Student};
use crate::store::RecordStore;

pub struct PendataApi {
    store: RecordStore,
    last_loaded: Option<PathBuf>,
    config: PendataConfig,
}

impl PendataApi {
    pub fn new(config: PendataConfig) -> Self {
        Self {
            store: RecordStore::new(),
            last_loaded: None,
            config,
        }
    }

    pub fn add_student(&mut self, student: Student) -> Result<CmdResult> {
        commands::add::run(&mut self.store, student)
    }

    pub fn edit_student(&mut self, nisn: &Nisn, update: FieldUpdate) -> Result<CmdResult> {
        commands::edit::run(&mut self.store, nisn, update)
    }

    pub fn delete_student(&mut self, nisn: &Nisn) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, nisn)
    }

    pub fn view_student(&self, nisn: &Nisn) -> Result<CmdResult> {
        commands::view::run(&self.store, nisn)
    }

    pub fn list_students(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    /// Loads `path`, replacing the whole collection, and remembers the
    /// path as this session's save target.
    pub fn load(&mut self, path: &Path) -> Result<CmdResult> {
        let result = commands::load::run(&mut self.store, path)?;
        self.last_loaded = Some(path.to_path_buf());
        Ok(result)
    }

    pub fn save(&mut self, path: &Path) -> Result<CmdResult> {
        commands::save::run(&self.store, path)
    }

    pub fn propose_save_path(&self) -> PathBuf {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        commands::save::propose_path(
            self.last_loaded.as_deref(),
            &dir,
            &self.config.default_basename,
            self.config.get_file_ext(),
        )
    }

    pub fn last_loaded(&self) -> Option<&Path> {
        self.last_loaded.as_deref()
    }

    pub fn record_count(&self) -> usize {
        self.store.len()
    }
}
