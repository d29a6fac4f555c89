mod cli;
mod config;
mod logging;
mod naming;
mod routes;
mod runner;
mod scaffold;
mod templates;
mod views;
mod workspace;

fn main() -> anyhow::Result<()> {
    let app = cli::parse();
    logging::init(app.verbose);
    runner::run(app)
}
