//! cmip6kit - CMIP6 catalog summaries and discrete colormaps
//!
//! This is the main entry point for the cmip6kit command-line tool.

use anyhow::Context;
use tracing::{error, info, warn};

use cmip6kit::config::{ColormapArgs, Command, SearchArgs};
use cmip6kit::logging::{init_tracing, SearchLogger, TracingLogger};
use cmip6kit::{CatalogSearch, Config, DiscreteColormapBuilder, EsmCatalog};

fn main() -> anyhow::Result<()> {
    let (config, command) = Config::load()?;
    config.validate()?;

    init_tracing(&config.log_level);
    info!("Starting cmip6kit v{}", env!("CARGO_PKG_VERSION"));

    let result = match &command {
        Command::Search(args) => run_search(&config, args),
        Command::Colormap(args) => run_colormap(&config, args),
    };
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

fn run_search(config: &Config, args: &SearchArgs) -> anyhow::Result<()> {
    let path = config.catalog_path()?;
    let catalog = EsmCatalog::open(path)
        .with_context(|| format!("Failed to open catalog {}", path.display()))?;

    let logger = TracingLogger;
    let search = CatalogSearch::new(&catalog)
        .with_logger(args.verbose.then_some(&logger as &dyn SearchLogger))
        .with_overrides(config.institution_overrides())
        .with_max_initialization(config.search.max_initialization)
        .with_frequency(config.search.frequency.as_str());

    let query = search.query(
        &args.scenario,
        &args.variable,
        args.member.as_deref(),
        args.model.as_deref(),
    );
    let result = search.run(&query);
    if result.is_absent() {
        warn!(query = %query, "No usable catalog records");
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_colormap(config: &Config, args: &ColormapArgs) -> anyhow::Result<()> {
    let colormap = DiscreteColormapBuilder::new()
        .base(config.colormap.name.as_str())
        .steps(config.colormap.steps)
        .under(args.under.as_deref())
        .over(args.over.as_deref())
        .bad(args.bad.as_deref())
        .build()?;

    for hex in colormap.hex_colors() {
        println!("{}", hex);
    }

    if let Some(output) = &args.output {
        let img = colormap.render_colorbar(args.width, args.height)?;
        img.save(output)
            .with_context(|| format!("Failed to write colorbar to {}", output.display()))?;
        info!(path = %output.display(), "Colorbar written");
    }
    Ok(())
}
