use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "antagning-tui", version, about = "Admissions dashboard TUI")]
pub struct CliArgs {
    /// Print the rankings and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless rankings as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the admissions feed URL
    #[arg(long = "admissions-url", value_name = "URL")]
    pub admissions_url: Option<String>,

    /// Override the geocoding endpoint
    #[arg(long = "nominatim-url", value_name = "URL")]
    pub nominatim_url: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.admissions_url {
            std::env::set_var("ADMISSIONS_URL", url);
        }
        if let Some(url) = &self.nominatim_url {
            std::env::set_var("NOMINATIM_URL", url);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
