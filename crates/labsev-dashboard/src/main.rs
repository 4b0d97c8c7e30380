use eyre::Result;
use labsev_cohort::cache::CohortCache;
use labsev_dashboard::config;
use labsev_dashboard::logging::init_tracing;
use labsev_dashboard::session::DashboardSession;

fn main() -> Result<()> {
    color_eyre::install()?;

    let path = config::config_path()?;
    init_tracing(config::peek_log_format(&path));

    if !path.exists() {
        return Err(eyre::eyre!(
            "no dashboard config at {}; create one with a data_path",
            path.display()
        ));
    }
    let config = config::load_config_from(&path)?;

    let cache = CohortCache::new();
    let session = DashboardSession::open(&config, &cache)?;
    let snapshot = session.snapshot()?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
