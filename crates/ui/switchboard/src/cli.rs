// src/cli.rs
use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Default)]
#[command(name = "switchboard", version, about = "A phone number form that never submits")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,

    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT")]
    pub tick_rate: Option<f64>,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT")]
    pub frame_rate: Option<f64>,

    /// Country selected when the form mounts (matched by name)
    #[arg(short, long, value_name = "NAME")]
    pub country: Option<String>,

    /// Seed for the message picker, makes a session reproducible
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Show the reset counter and behavior mode under the buttons
    #[arg(long)]
    pub show_counter: bool,

    /// Do not capture the mouse (no hover effects)
    #[arg(long)]
    pub no_mouse: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Print the country catalog and exit
    Countries {
        /// Only list countries matching this text
        #[arg(long)]
        filter: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "switchboard",
            "--tick-rate",
            "8",
            "--country",
            "Tuvalu",
            "--seed",
            "42",
            "--show-counter",
            "--no-mouse",
        ])
        .unwrap();
        assert_eq!(cli.cmd, None);
        assert_eq!(cli.tick_rate, Some(8.0));
        assert_eq!(cli.country.as_deref(), Some("Tuvalu"));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.show_counter);
        assert!(cli.no_mouse);
    }

    #[test]
    fn parses_countries_subcommand() {
        let cli = Cli::try_parse_from(["switchboard", "countries", "--filter", "+6"]).unwrap();
        assert_eq!(
            cli.cmd,
            Some(Cmd::Countries {
                filter: Some("+6".into())
            })
        );
    }
}
