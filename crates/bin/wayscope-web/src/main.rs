use clap::Parser;

use wayscope_web::server::builder::ServerBuilder;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: String,
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let builder = ServerBuilder::new(&args.config, args.port);
    builder.serve().await;
}
