//! quizkit CLI: take and author quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Quiz taking and authoring client")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List quizzes
    List {
        /// Include unpublished quizzes (admin view)
        #[arg(long)]
        all: bool,
    },

    /// Show a quiz and its questions
    Show {
        /// Quiz id
        #[arg(long)]
        quiz: String,

        /// Use the admin view and mark correct choices
        #[arg(long)]
        admin: bool,
    },

    /// Take a quiz with answers read from a TOML file
    Take {
        /// Quiz id
        #[arg(long)]
        quiz: String,

        /// TOML file mapping question id to an answer or list of answers
        #[arg(long)]
        answers: PathBuf,
    },

    /// Create a quiz
    CreateQuiz {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Publish immediately
        #[arg(long)]
        published: bool,
    },

    /// Change a quiz's title or description
    EditQuiz {
        /// Quiz id
        #[arg(long)]
        quiz: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Publish or unpublish a quiz
    Publish {
        /// Quiz id
        #[arg(long)]
        quiz: String,

        /// Hide the quiz from takers instead
        #[arg(long)]
        unpublish: bool,
    },

    /// Delete a quiz and its questions
    DeleteQuiz {
        /// Quiz id
        #[arg(long)]
        quiz: String,
    },

    /// Add a question to a quiz from a TOML question file
    AddQuestion {
        /// Quiz id
        #[arg(long)]
        quiz: String,

        /// Question file
        #[arg(long)]
        file: PathBuf,
    },

    /// Replace a question from a TOML file, or print it for editing
    EditQuestion {
        /// Question id
        #[arg(long)]
        question: String,

        /// Question file; omit to print the current question as TOML
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete a question
    DeleteQuestion {
        /// Question id
        #[arg(long)]
        question: String,
    },

    /// Validate a question file and print the payload it encodes to
    ValidateQuestion {
        /// Question file
        #[arg(long)]
        file: PathBuf,
    },

    /// Preview the slug generated for a quiz title
    Slug {
        title: String,
    },

    /// Create starter config and an example question file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizkit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::List { all } => commands::list::execute(all, config).await,
        Commands::Show { quiz, admin } => commands::show::execute(quiz, admin, config).await,
        Commands::Take { quiz, answers } => commands::take::execute(quiz, answers, config).await,
        Commands::CreateQuiz {
            title,
            description,
            published,
        } => commands::quiz::create(title, description, published, config).await,
        Commands::EditQuiz {
            quiz,
            title,
            description,
        } => commands::quiz::edit(quiz, title, description, config).await,
        Commands::Publish { quiz, unpublish } => {
            commands::quiz::publish(quiz, !unpublish, config).await
        }
        Commands::DeleteQuiz { quiz } => commands::quiz::delete(quiz, config).await,
        Commands::AddQuestion { quiz, file } => commands::question::add(quiz, file, config).await,
        Commands::EditQuestion { question, file } => {
            commands::question::edit(question, file, config).await
        }
        Commands::DeleteQuestion { question } => {
            commands::question::delete(question, config).await
        }
        Commands::ValidateQuestion { file } => commands::validate_question::execute(file),
        Commands::Slug { title } => commands::slug::execute(title),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
