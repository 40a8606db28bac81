use clap::{Args, Parser, Subcommand};

#[derive(Args)]
pub struct ParseHeaderArgs {
    /// Value of the `Authorization` header, including the `Signature` scheme
    pub header: String,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Parse a Joyent `Authorization` header and report any format errors
    ParseHeader(ParseHeaderArgs),
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}
