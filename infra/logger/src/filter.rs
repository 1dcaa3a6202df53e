use crate::AUDIT_TARGET;
use crate::builder::Settings;
use crate::error::LoggerError;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Global filter derived from the builder settings.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Directives {
    default: LevelFilter,
    explicit: Option<String>,
}

impl Directives {
    pub(crate) fn new(settings: &Settings) -> Self {
        let user = settings.env_filter.as_deref();
        if !settings.audit_only {
            return Self { default: settings.level, explicit: user.map(str::to_owned) };
        }

        let audit = format!("{AUDIT_TARGET}=info");
        let explicit = user.map_or_else(|| audit.clone(), |user| format!("{audit},{user}"));
        Self { default: LevelFilter::OFF, explicit: Some(explicit) }
    }

    /// `RUST_LOG` is read only when no directive was given explicitly.
    pub(crate) fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.default.into());
        let Some(directives) = &self.explicit else {
            return Ok(builder.from_env_lossy());
        };

        builder.parse(directives).map_err(|err| LoggerError::InvalidConfiguration {
            message: format!("invalid filter directives '{directives}': {err}").into(),
            context: None,
        })
    }
}
