use anyhow::bail;
use clap::{Parser, Subcommand};
use flakeid::{GeneratorConfig, MAX_NODE_ID};

/// Command-line configuration for the `flakeid` binary.
///
/// Generator settings come from CLI arguments or environment variables (a
/// `.env` file in the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "flakeid",
    version,
    about = "Mint and decode 64-bit Snowflake IDs"
)]
pub struct CliArgs {
    /// Node id embedded in every generated ID, 0..=4095.
    ///
    /// When omitted, one is derived from the host name and process id. Unlike
    /// the library, the CLI refuses out-of-range values instead of truncating
    /// them.
    ///
    /// Environment variable: `FLAKEID_NODE_ID`
    #[arg(long, env = "FLAKEID_NODE_ID")]
    pub node_id: Option<u32>,

    /// Epoch offset in milliseconds since the Unix epoch.
    ///
    /// Decoding must use the same value the IDs were generated with. Defaults
    /// to 2020-01-01T00:00:00Z.
    ///
    /// Environment variable: `FLAKEID_EPOCH_MS`
    #[arg(long = "epoch", env = "FLAKEID_EPOCH_MS", allow_negative_numbers = true)]
    pub epoch_offset: Option<i64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print freshly generated IDs, one per line.
    Generate {
        /// How many IDs to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Split IDs into timestamp, node id and sequence.
    Decode {
        /// IDs to decode, as unsigned decimal integers.
        #[arg(required = true)]
        ids: Vec<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub generator: GeneratorConfig,
    pub command: Command,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let node_id = match args.node_id {
            Some(node_id) if node_id > u32::from(MAX_NODE_ID) => {
                bail!(
                    "node id (--node-id / FLAKEID_NODE_ID) {node_id} exceeds the 12-bit node id space (max = {MAX_NODE_ID})"
                );
            }
            Some(node_id) => Some(u16::try_from(node_id)?),
            None => None,
        };

        if let Command::Generate { count: 0 } = args.command {
            bail!("--count must be greater than 0");
        }

        Ok(Self {
            generator: GeneratorConfig::new(node_id, args.epoch_offset),
            command: args.command,
        })
    }
}
