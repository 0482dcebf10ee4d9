use clap::Parser;
use lumen_cli::{run, Args};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
