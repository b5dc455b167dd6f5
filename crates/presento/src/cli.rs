use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::deck::{ImageFit, Layout, Position, SlideId};

#[derive(Parser)]
#[command(name = "presento")]
#[command(author, version, about)]
#[command(long_about = "A slide-deck editor and presenter.\n\n\
    Build a deck one command at a time, then present it full screen.\n\n\
    Examples:\n  \
    presento list                        Show the deck\n  \
    presento add                         Append a slide after the last one\n  \
    presento edit --layout bullets \\\n    \
      --bullet \"Fast\" --bullet \"Local\"   Turn the current slide into bullets\n  \
    presento move 3 1                    Move slide 3 to the front\n  \
    presento present --slide 2           Present from slide 2\n  \
    presento export -o ~/decks           Save the deck as JSON")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the stored deck (overrides storage.data_dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// A slide addressed by 1-based position, or by id with `--id`.
#[derive(Args, Clone, Debug, Default)]
pub struct SlideArg {
    /// Slide position (1-indexed). Defaults to the current slide.
    #[arg(value_name = "POS")]
    pub pos: Option<String>,

    /// Address the slide by id instead of position
    #[arg(long, conflicts_with = "pos")]
    pub id: Option<String>,
}

impl SlideArg {
    pub fn position(&self) -> Option<Position> {
        match (&self.id, &self.pos) {
            (Some(id), _) => Some(Position::Id(SlideId::new(id.as_str()))),
            (None, Some(pos)) => Some(Position::Ordinal(pos.clone())),
            (None, None) => None,
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct EditArgs {
    #[command(flatten)]
    pub slide: SlideArg,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New content text (split into one bullet per line on bullet slides)
    #[arg(long, conflicts_with = "bullet")]
    pub content: Option<String>,

    /// Bullet item; repeat for several items
    #[arg(long = "bullet", value_name = "TEXT")]
    pub bullet: Vec<String>,

    /// Switch layout, converting the content
    #[arg(long, value_parser = parse_layout)]
    pub layout: Option<Layout>,

    /// Image URL or data URL (image-center slides)
    #[arg(long)]
    pub image: Option<String>,

    /// How the image fills its box (image-center slides)
    #[arg(long, value_parser = parse_image_fit)]
    pub image_fit: Option<ImageFit>,

    /// Image scale in percent (image-center slides)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=400))]
    pub image_scale: Option<u32>,

    /// Code snippet (code slides)
    #[arg(long)]
    pub code: Option<String>,

    /// Presenter notes; pass an empty string to clear
    #[arg(long)]
    pub notes: Option<String>,
}

fn parse_layout(s: &str) -> Result<Layout, String> {
    Layout::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = Layout::all().iter().map(Layout::name).collect();
        format!("unknown layout '{s}', expected one of: {}", names.join(", "))
    })
}

fn parse_image_fit(s: &str) -> Result<ImageFit, String> {
    ImageFit::from_name(s)
        .ok_or_else(|| format!("unknown image fit '{s}', expected contain, cover or fill"))
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the slides, marking the current one
    List,

    /// Print one slide, including presenter notes
    Show {
        #[command(flatten)]
        slide: SlideArg,
    },

    /// Append a new title slide and make it current
    Add,

    /// Make a slide current
    Select {
        #[command(flatten)]
        slide: SlideArg,
    },

    /// Edit a slide's fields
    Edit(EditArgs),

    /// Delete a slide (the last remaining slide is kept)
    Delete {
        #[command(flatten)]
        slide: SlideArg,
    },

    /// Move the slide at FROM to position TO (both 1-indexed)
    Move {
        from: usize,
        to: usize,
    },

    /// Rename the presentation
    Rename {
        name: String,
    },

    /// Export the deck as a JSON file
    Export {
        /// Output directory (defaults to defaults.export_dir, then the current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Replace the deck with slides from a JSON file
    Import {
        file: PathBuf,
    },

    /// Present the deck in a window
    Present {
        /// Start on a specific slide (1-indexed). Defaults to the current slide.
        #[arg(long)]
        slide: Option<String>,

        /// Launch in a window instead of fullscreen
        #[arg(long)]
        windowed: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.export_dir, storage.data_dir)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let Some(command) = self.command else {
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            println!();
            return Ok(());
        };
        let data_dir = self.data_dir;
        let quiet = self.quiet;

        use crate::commands::{completion, config, deck, export, import};
        match command {
            Commands::List => deck::list(data_dir),
            Commands::Show { slide } => deck::show(data_dir, slide.position()),
            Commands::Add => deck::add(data_dir, quiet),
            Commands::Select { slide } => match slide.position() {
                Some(position) => deck::select(data_dir, position, quiet),
                None => anyhow::bail!("Select needs a slide position or --id"),
            },
            Commands::Edit(args) => deck::edit(data_dir, args, quiet),
            Commands::Delete { slide } => deck::delete(data_dir, slide.position(), quiet),
            Commands::Move { from, to } => deck::move_slide(data_dir, from, to, quiet),
            Commands::Rename { name } => deck::rename(data_dir, &name, quiet),
            Commands::Export { output_dir } => export::run(data_dir, output_dir, quiet),
            Commands::Import { file } => import::run(data_dir, &file, quiet),
            Commands::Present { slide, windowed } => {
                crate::present::run(data_dir, slide, windowed)
            }
            Commands::Config { command } => config::run(command),
            Commands::Completion { shell } => {
                completion::run(shell);
                Ok(())
            }
            Commands::Version => {
                println!("presento {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}
