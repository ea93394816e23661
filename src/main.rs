use anyhow::Result;
use clap::{Parser, ValueEnum};

use gravsim::{
    config::{self, Profile, Summation},
    ui::{self, RunSettings},
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Binary,
    Swarm,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SummationArg {
    Symmetric,
    Asymmetric,
}

#[derive(Parser, Debug)]
#[command(about = "2D gravitational N-body simulation in the terminal")]
struct Args {
    #[arg(short, long, value_enum, default_value_t = ProfileArg::Binary)]
    profile: ProfileArg,

    /// Number of bodies for the swarm profile
    #[arg(short = 'n', long, default_value_t = config::SWARM_BODIES)]
    count: usize,

    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Use a fixed step instead of the profile's timestep
    #[arg(long)]
    dt: Option<f32>,

    #[arg(long, value_enum)]
    summation: Option<SummationArg>,

    /// Refuse to start if any body has zero or negative mass
    #[arg(long)]
    strict_mass: bool,
}

impl From<Args> for RunSettings {
    fn from(args: Args) -> Self {
        RunSettings {
            profile: match args.profile {
                ProfileArg::Binary => Profile::Binary,
                ProfileArg::Swarm => Profile::Swarm,
            },
            count: args.count,
            seed: args.seed,
            fixed_dt: args.dt,
            summation: args.summation.map(|s| match s {
                SummationArg::Symmetric => Summation::Symmetric,
                SummationArg::Asymmetric => Summation::Asymmetric,
            }),
            strict_mass: args.strict_mass,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    log::debug!("{:?}", args);
    ui::run(args.into())
}
