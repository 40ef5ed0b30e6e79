use std::path::PathBuf;

use cnh_model::RunParameters;
use cnh_report::OutputFile;

use crate::pipeline::PipelineOutput;

#[derive(Debug)]
pub struct RunResult {
    pub params: RunParameters,
    /// `None` for dry runs.
    pub output_dir: Option<PathBuf>,
    pub pipeline: PipelineOutput,
    pub outputs: Vec<OutputFile>,
    /// Outputs of an earlier run deleted because this run did not produce them.
    pub removed: Vec<PathBuf>,
    pub run_report: Option<PathBuf>,
}

impl RunResult {
    /// A run succeeds when it produced a final table.
    pub fn is_success(&self) -> bool {
        self.pipeline.has_final_table()
    }
}
