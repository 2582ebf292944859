//! File-log transform (spec.md §4.6, component C7): appends one line per
//! command to a file on disk, gated by the `log_transforms_to_file` /
//! `log_mappings_to_file` [`Config`] toggles. Forwards every command
//! unchanged; purely an audit trail for offline debugging.

use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::PathBuf;

use crate::command::{BoxedCmd, CmdId};
use crate::config::Config;
use crate::error::Error;
use crate::writer::Writer;

use super::Transform;

pub struct FileLog {
    config: Config,
    path: PathBuf,
    file: Option<File>,
}

impl FileLog {
    pub fn new(config: Config, path: PathBuf) -> Self {
        FileLog {
            config,
            path,
            file: None,
        }
    }

    fn file(&mut self) -> Result<&mut File, Error> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(|e| Error::Service {
                    kind: "file_log",
                    detail: e.to_string(),
                })?;
            self.file = Some(file);
        }
        Ok(self.file.as_mut().expect("just set"))
    }
}

impl Transform for FileLog {
    fn transform(&mut self, id: CmdId, cmd: BoxedCmd, out: &mut dyn Writer) -> Result<(), Error> {
        if self.config.log_transforms_to_file {
            let line = format!("{}\t{}\n", id, cmd.name());
            let file = self.file()?;
            let _ = file.write_all(line.as_bytes());
        }
        out.mutate_and_write(id, cmd)
    }

    fn name(&self) -> &'static str {
        "file_log"
    }
}
