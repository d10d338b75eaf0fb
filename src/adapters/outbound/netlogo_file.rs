use crate::common::EmitResult;
use crate::domains::netlogo::{MapWriter, NetLogoEmitter};
use crate::domains::network::Graph;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Compiles a graph against a template file into an output file.
///
/// The script is staged in a temporary file next to the destination and
/// only renamed over it once emission succeeded, so a failed run leaves any
/// previous output untouched. The template is opened read-only.
pub struct FileMapWriter {
    template: PathBuf,
    output: PathBuf,
    emitter: NetLogoEmitter,
}

impl FileMapWriter {
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>, emitter: NetLogoEmitter) -> Self {
        Self { template: template.into(), output: output.into(), emitter }
    }

    fn staging_dir(&self) -> &Path {
        match self.output.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl MapWriter for FileMapWriter {
    fn write_map(&self, graph: &Graph) -> EmitResult<()> {
        let template = BufReader::new(File::open(&self.template)?);
        let mut staged = NamedTempFile::new_in(self.staging_dir())?;
        self.emitter.emit(graph, template, staged.as_file_mut())?;
        staged.persist(&self.output).map_err(|e| e.error)?;
        Ok(())
    }
}
