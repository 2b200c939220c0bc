use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedmerge")]
#[command(about = "Merge cached GitHub repositories and blog posts into one recent-activity feed")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the most recent repositories and blog posts, newest first
    Top {
        /// Number of items to show (defaults to FEEDMERGE_TOP_K)
        #[arg(short)]
        k: Option<usize>,

        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },

    /// List cached public repositories, refreshing them if stale
    Repos {
        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },

    /// List blog posts
    Blogs {
        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a blog post, stamped with the current time
    AddBlog {
        /// Post title
        #[arg(long)]
        title: String,

        /// Short description
        #[arg(long, default_value = "")]
        description: String,

        /// Link to the post
        #[arg(long)]
        url: String,

        /// Cover image link
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Refresh the repository cache now, ignoring its age
    Refresh,
}
