use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Personal task tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: task_cli add "Buy book" --due 2025-07-20 --priority high
    /// Example: task_cli add "Exercise" --due 2025-07-21 --recurring
    Add {
        title: String,
        /// Due date in YYYY-MM-DD format
        #[arg(long = "due", value_name = "YYYY-MM-DD")]
        due_date: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Low, Medium or High
        #[arg(short, long, default_value = "Medium")]
        priority: String,
        #[arg(long)]
        recurring: bool,
    },
    /// Run the built-in demonstration scenarios
    ///
    /// Example: task_cli demo
    Demo,
}
