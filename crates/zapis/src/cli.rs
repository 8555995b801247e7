// src/cli.rs
use clap::Parser;

#[derive(Parser)]
#[command(name = "zapis", version, about = "Terminal registration form")]
pub struct Cli {
    /// Require every field and disable draft persistence
    #[arg(long)]
    pub strict: bool,

    /// Tick rate, i.e. number of ticks per second
    #[arg(long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(long, value_name = "FLOAT", default_value_t = 30.0)]
    pub frame_rate: f64,
}
