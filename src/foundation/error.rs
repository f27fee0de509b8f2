/// Convenience result type used across reelsmith.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy for render jobs.
///
/// Every variant is terminal for the job that produced it; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// The requested template name is not one of the shipped templates.
    #[error("template not found: '{0}' (available: intro, kinetic, testimonial)")]
    TemplateNotFound(String),

    /// A template option is missing, malformed, or not accepted by the template.
    #[error("invalid options for template '{template}': {message}")]
    InvalidTemplateOptions {
        /// Template the options were meant for.
        template: String,
        /// What was wrong with them.
        message: String,
    },

    /// Scene markup could not be parsed or rasterized.
    #[error("rasterization failed{}: {message}", frame_suffix(.frame))]
    Rasterization {
        /// Frame being rasterized, when known.
        frame: Option<u64>,
        /// Backend message.
        message: String,
    },

    /// The external encoder failed to start or exited unsuccessfully.
    #[error("encoder failure: {0}")]
    Encoder(String),

    /// Scratch/output directory or frame file IO failed.
    #[error("filesystem error: {context}: {source}")]
    Filesystem {
        /// Operation and path that failed.
        context: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration or job parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// The job was cancelled before it finished.
    #[error("render cancelled")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn frame_suffix(frame: &Option<u64>) -> String {
    match frame {
        Some(f) => format!(" at frame {f}"),
        None => String::new(),
    }
}

impl ReelError {
    pub fn invalid_options(template: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidTemplateOptions {
            template: template.into(),
            message: msg.into(),
        }
    }

    pub fn rasterization(msg: impl Into<String>) -> Self {
        Self::Rasterization {
            frame: None,
            message: msg.into(),
        }
    }

    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::Encoder(msg.into())
    }

    pub fn fs(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Filesystem {
            context: context.into(),
            source,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Attach a frame index to a rasterization failure that does not carry one yet.
    pub fn with_frame(self, frame: u64) -> Self {
        match self {
            Self::Rasterization {
                frame: None,
                message,
            } => Self::Rasterization {
                frame: Some(frame),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
