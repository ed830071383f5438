use clap::Parser;
use color_eyre::Result;
use tup::auth::Session;
use tup::cli::{self, Cli, Commands};
use tup::{Config, DailyUpdateStore, Profile, Storage, TaskStore, logging};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    // Note: --config is parsed but not yet used to override the config path
    let config = Config::load_with_profile(profile)?;

    // File logging under the data directory; a broken logger must not stop the CLI
    let data_dir = config.get_data_dir();
    if let Err(e) = logging::init(&config.log_level, &data_dir.join("logs")) {
        eprintln!("WARNING: {}", e);
    }

    // Open snapshot storage and load both stores before any mutation can run
    let storage = Storage::new(&data_dir)?;
    let mut tasks = TaskStore::load(storage.clone());
    let mut updates = DailyUpdateStore::load(storage.clone());
    let session = Session::new(storage);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Add {
            title,
            description,
            category,
            priority,
            status,
            due,
            tags,
        } => {
            cli::handle_add_task(
                title,
                description,
                category,
                priority,
                status,
                due,
                tags,
                &mut tasks,
            )?;
        }
        Commands::List { status } => {
            cli::handle_list_tasks(status, &tasks)?;
        }
        Commands::Move { id, status } => {
            cli::handle_move_task(id, status, &mut tasks)?;
        }
        Commands::Edit {
            id,
            title,
            description,
            category,
            priority,
            due,
            tags,
        } => {
            cli::handle_edit_task(
                id,
                title,
                description,
                category,
                priority,
                due,
                tags,
                &mut tasks,
            )?;
        }
        Commands::Delete { id } => {
            cli::handle_delete_task(id, &mut tasks)?;
        }
        Commands::AddUpdate {
            content,
            mood,
            learnings,
            tomorrow,
        } => {
            cli::handle_add_update(content, mood, learnings, tomorrow, &mut updates)?;
        }
        Commands::Today => {
            cli::handle_today(&updates)?;
        }
        Commands::ListUpdates => {
            cli::handle_list_updates(&updates)?;
        }
        Commands::DeleteUpdate { id } => {
            cli::handle_delete_update(id, &mut updates)?;
        }
        Commands::Stats => {
            cli::handle_stats(&tasks, &updates)?;
        }
        Commands::Achievements => {
            cli::handle_achievements(&tasks, &updates)?;
        }
        Commands::Login { email, password } => {
            cli::handle_login(email, password, &config, &session)?;
        }
        Commands::Signup {
            name,
            email,
            password,
        } => {
            cli::handle_signup(name, email, password, &config, &session)?;
        }
        Commands::Logout => {
            cli::handle_logout(&session)?;
        }
        Commands::Whoami => {
            cli::handle_whoami(&session)?;
        }
        Commands::Profile {
            name,
            bio,
            avatar,
            theme,
        } => {
            cli::handle_profile(name, bio, avatar, theme, &session)?;
        }
    }

    Ok(())
}
