use OsciNet::cli::cli_main::run_interactive_menu;
use OsciNet::settings::{AnalysisConfig, DEFAULT_CONFIG_FILE};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

pub fn main() {
    let config = match AnalysisConfig::load(DEFAULT_CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load {}: {}", DEFAULT_CONFIG_FILE, e);
            AnalysisConfig::default()
        }
    };
    let _ = TermLogger::init(
        config.level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    run_interactive_menu(&config);
}
