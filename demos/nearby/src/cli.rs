use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ft_core::config::{DEFAULT_LEAF_SIZE, DEFAULT_MAX_WALK_M, DEFAULT_WALK_SPEED_MPS};
use ft_core::{EARTH_RADIUS_M, FootpathConfig, IndexConfig};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Find transit stops within walking distance of each other
pub struct Cli {
    /// A stops.txt/stops.csv file, or a directory searched recursively for them
    pub data: PathBuf,

    /// Maximum number of stops per ball-tree leaf
    #[arg(long, default_value_t = DEFAULT_LEAF_SIZE)]
    pub leaf_size: usize,

    /// Sphere radius for the haversine metric, in metres
    #[arg(long, default_value_t = EARTH_RADIUS_M)]
    pub sphere_radius: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stops within a radius of a given stop
    Query {
        /// The stop_id to search around
        #[arg(long)]
        stop: String,

        /// Search radius in metres
        #[arg(long)]
        radius: f64,

        /// Also list the stop itself
        #[arg(long)]
        include_self: bool,
    },

    /// Stops within a radius of an arbitrary coordinate
    Point {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Search radius in metres
        #[arg(long)]
        radius: f64,
    },

    /// All walking connections, as CSV
    Walks {
        /// Connect stops strictly closer than this, in metres
        #[arg(long, default_value_t = DEFAULT_MAX_WALK_M)]
        max_walk: f64,

        /// Walking speed in metres per second
        #[arg(long, default_value_t = DEFAULT_WALK_SPEED_MPS)]
        speed: f64,

        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Store and tree statistics
    Stats,
}

impl Cli {
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            leaf_size:       self.leaf_size,
            sphere_radius_m: self.sphere_radius,
        }
    }
}

impl Command {
    /// Footpath settings for the `walks` command; defaults otherwise.
    pub fn footpath_config(&self) -> FootpathConfig {
        match self {
            Command::Walks { max_walk, speed, .. } => FootpathConfig {
                max_walk_m:     *max_walk,
                walk_speed_mps: *speed,
            },
            _ => FootpathConfig::default(),
        }
    }
}
