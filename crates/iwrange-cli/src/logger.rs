use anyhow::Result;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Install a stderr subscriber; `RUST_LOG` overrides `level`.
pub fn init(level: tracing::Level) -> Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(level).into())
                .from_env()?,
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
