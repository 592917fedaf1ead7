use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use burgeon::adapters::InteractiveQuestionnaire;
use burgeon::ports::QuestionnairePort;
use burgeon::{AppError, Burgeon, InitOptions, parse_key_values};

#[derive(Parser)]
#[command(name = "burgeon")]
#[command(version)]
#[command(
    about = "Manage git-backed project templates and scaffold new projects from them",
    long_about = None
)]
struct Cli {
    /// Template store root (defaults to $BURGEON_PATH, then the platform data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a template from a git URL or a local working tree
    #[clap(visible_alias = "a")]
    Add { name: String, src: String },
    /// Delete a saved template
    #[clap(visible_alias = "rm")]
    Remove { name: String },
    /// List saved templates
    #[clap(visible_alias = "ls")]
    List,
    /// Scaffold a new project from a saved template
    #[clap(visible_alias = "i")]
    Init {
        name: String,
        target: PathBuf,
        /// Locals as key=value pairs (true/false and numbers are coerced)
        #[arg(short, long, num_args = 1..)]
        locals: Vec<String>,
        /// Configuration file merged into the locals (.json, .yaml, .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Branch to check out in the stored template during init
        #[arg(short, long, conflicts_with = "tag")]
        branch: Option<String>,
        /// Tag to check out in the stored template during init
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Run a named generator against a scaffolded project
    #[clap(visible_alias = "r")]
    Run {
        name: String,
        target: PathBuf,
        generator: String,
        /// Arguments handed to the generator
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Pull the latest content for a saved template
    #[clap(visible_alias = "up")]
    Update { name: String },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<(), AppError> {
    let store_root = store_root(cli.store);
    std::fs::create_dir_all(&store_root)?;
    let mut burgeon = Burgeon::open(store_root)?;

    match cli.command {
        Commands::Add { name, src } => {
            burgeon.add(&name, &src)?;
            println!("✅ Added template '{}'", name);
        }
        Commands::Remove { name } => {
            burgeon.remove(&name)?;
            println!("✅ Removed template '{}'", name);
        }
        Commands::List => {
            let names = burgeon.list();
            if names.is_empty() {
                eprintln!("Error: no templates exist");
                std::process::exit(1);
            }
            for name in names {
                println!("{}", name);
            }
        }
        Commands::Init { name, target, locals, config, branch, tag } => {
            let questionnaire = InteractiveQuestionnaire;
            let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
            let options = InitOptions {
                locals: parse_key_values(&locals),
                config,
                branch,
                tag,
                questionnaire: interactive
                    .then_some(&questionnaire as &dyn QuestionnairePort),
            };
            burgeon.init(&name, &target, &options)?;
            println!("✅ Initialized project at {}", target.display());
        }
        Commands::Run { name, target, generator, args } => {
            burgeon.run(&name, &target, &generator, &args)?;
            println!("✅ Ran generator '{}' against {}", generator, target.display());
        }
        Commands::Update { name } => {
            burgeon.update(&name)?;
            println!("✅ Updated template '{}'", name);
        }
    }
    Ok(())
}

/// Store root resolution: flag, then $BURGEON_PATH, then the platform data
/// directory.
fn store_root(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("BURGEON_PATH").map(PathBuf::from))
        .unwrap_or_else(|| {
            dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("burgeon")
        })
}
