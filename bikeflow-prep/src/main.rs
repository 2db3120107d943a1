use bikeflow_prep::app::BikeflowApp;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = BikeflowApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
