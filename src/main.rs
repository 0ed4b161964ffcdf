use std::path::Path;

use clap::Parser;
use kuralsearch::{
    cli::{self, LOAD_DATA_ONLY, SearchCli},
    config::{DATA_PATH, DEFAULT_LIMIT},
    dataset::load_dataset,
    error::{ErrorPayload, Result},
    logging, search,
};

fn main() -> Result<()> {
    let args = SearchCli::parse();
    logging::init_tracing();

    let Some(query) = args.query else {
        cli::print_json(&ErrorPayload::new("No query provided"))?;
        std::process::exit(1);
    };

    let data = load_dataset(Path::new(DATA_PATH));

    if query == LOAD_DATA_ONLY {
        return match data {
            Ok(dataset) => cli::print_json(&dataset.to_json()),
            Err(e) => cli::print_json(&ErrorPayload::new(e.to_string())),
        };
    }

    let limit = args.limit.unwrap_or(DEFAULT_LIMIT);
    match search::search(&query, limit, Some(data)) {
        Ok(results) => cli::print_json(&results),
        Err(e) => cli::print_json(&e.to_json()),
    }
}
