use clap::Parser;
use displacement_volume_analyzer::{app, config, ui_cli::Cli};
use tracing_subscriber::EnvFilter;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 명령을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load_or_default(&cli.config)?;
    app::run(&cfg, cli.command)?;
    Ok(())
}
