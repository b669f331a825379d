use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "callsight")]
#[command(about = "Conversation insight analysis for call transcripts", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Start the REST API server
    Serve,
    /// Analyze a recording's transcript
    Analyze(AnalyzeCliArgs),
    /// Ingest and inspect recordings
    Recordings(RecordingsCliArgs),
    /// Manage process templates
    Templates(TemplatesCliArgs),
    /// Inspect the completion provider configuration
    Provider(ProviderCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct AnalyzeCliArgs {
    /// ID of the recording to analyze
    pub recording_id: i64,
    /// Override the analysis deadline in seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,
}

#[derive(ClapArgs, Debug)]
pub struct RecordingsCliArgs {
    #[command(subcommand)]
    pub command: RecordingsCommand,
}

#[derive(Subcommand, Debug)]
pub enum RecordingsCommand {
    /// Ingest a transcript as a new recording
    Add {
        /// Read the transcript from this file (stdin if omitted)
        #[arg(short, long)]
        file: Option<std::path::PathBuf>,
        /// Recording title
        #[arg(short, long)]
        title: Option<String>,
        /// Owning organization
        #[arg(long, default_value = "1")]
        org: i64,
        /// Call duration in seconds
        #[arg(long)]
        duration: Option<i64>,
    },
    /// List recordings, newest first
    List {
        /// Maximum number of results to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show one recording, including its analysis if present
    Show {
        /// ID of the recording
        id: i64,
    },
}

#[derive(ClapArgs, Debug)]
pub struct TemplatesCliArgs {
    #[command(subcommand)]
    pub command: TemplatesCommand,
}

#[derive(Subcommand, Debug)]
pub enum TemplatesCommand {
    /// Add a process template from a JSON steps file
    Add {
        /// Template name
        #[arg(short, long)]
        name: String,
        /// JSON file with an array of {"name", "keywords"} steps
        #[arg(short, long)]
        file: std::path::PathBuf,
        /// Owning organization
        #[arg(long, default_value = "1")]
        org: i64,
        /// Flag the template active for its organization
        #[arg(long)]
        active: bool,
    },
    /// List templates for an organization
    List {
        /// Organization to list templates for
        #[arg(long, default_value = "1")]
        org: i64,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ProviderCliArgs {
    #[command(subcommand)]
    pub command: ProviderCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    /// Show the current completion provider configuration
    Show,
}
