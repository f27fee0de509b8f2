use std::path::{Path, PathBuf};

use crate::foundation::config::StudioConfig;
use crate::foundation::error::{ReelError, ReelResult};
use crate::templates::{OptionFields, TemplateKind, TemplateOptions};

/// Raw job input, straight from the command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobRequest {
    pub template: String,
    pub fields: OptionFields,
    /// `None` uses the template's default duration.
    pub duration_secs: Option<f64>,
    /// `None` derives `<output_dir>/<template>-<timestamp>.mp4`.
    pub output_path: Option<PathBuf>,
}

/// A validated, immutable render job.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderJob {
    options: TemplateOptions,
    duration_secs: f64,
    output_path: PathBuf,
}

impl RenderJob {
    pub fn new(
        options: TemplateOptions,
        duration_secs: f64,
        output_path: impl Into<PathBuf>,
    ) -> ReelResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ReelError::validation(format!(
                "duration must be a positive number of seconds (got {duration_secs})"
            )));
        }
        options.template().validate(duration_secs)?;

        let output_path = output_path.into();
        if output_path.file_name().is_none() {
            return Err(ReelError::validation(format!(
                "output path '{}' does not name a file",
                output_path.display()
            )));
        }

        Ok(Self {
            options,
            duration_secs,
            output_path,
        })
    }

    /// Resolve the template, build its typed options and fill in defaults.
    pub fn from_request(
        req: JobRequest,
        config: &StudioConfig,
        now: chrono::DateTime<chrono::Local>,
    ) -> ReelResult<Self> {
        let kind: TemplateKind = req.template.parse()?;
        let options = TemplateOptions::from_fields(kind, req.fields, &config.brand)?;
        let duration = req
            .duration_secs
            .unwrap_or_else(|| kind.default_duration_secs());
        let output_path = req
            .output_path
            .unwrap_or_else(|| config.default_output_path(kind.as_str(), now));
        Self::new(options, duration, output_path)
    }

    pub fn kind(&self) -> TemplateKind {
        self.options.kind()
    }

    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Sibling path the encoder writes to before the final rename.
    pub fn partial_output_path(&self) -> PathBuf {
        partial_path(&self.output_path)
    }
}

/// `dir/name.mp4` -> `dir/name.partial.mp4`.
pub fn partial_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}.partial.{}", ext.to_string_lossy()),
        None => format!("{stem}.partial"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/job/request.rs"]
mod tests;
