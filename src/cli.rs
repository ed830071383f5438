use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::auth::{AuthClient, AuthError, Session};
use crate::config::Config;
use crate::models::{
    Category, DailyUpdateDraft, Mood, Priority, ProfilePatch, Status, Task, TaskDraft, TaskPatch,
};
use crate::stats;
use crate::storage::StorageError;
use crate::store::{DailyUpdateStore, TaskStore};
use crate::utils::parse_date;
use crate::{achievements, utils};

#[derive(Parser)]
#[command(name = "tup")]
#[command(about = "Tasks, Updates, Progress - track your work from the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/data)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task to the board
    Add {
        /// Task title
        title: String,
        /// Longer description
        #[arg(long, default_value = "")]
        description: String,
        /// Category: work, personal, learning or health
        #[arg(long, default_value = "work")]
        category: Category,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Initial status: todo, in-progress or done
        #[arg(long, default_value = "todo")]
        status: Status,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// List tasks on the board, optionally filtered by status
    List {
        /// Only show tasks with this status
        #[arg(long)]
        status: Option<Status>,
    },
    /// Move a task to another status column
    Move {
        /// Task id (or unique prefix)
        id: String,
        /// Target status: todo, in-progress or done
        status: Status,
    },
    /// Edit fields of an existing task
    Edit {
        /// Task id (or unique prefix)
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        priority: Option<Priority>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Comma-separated tags (replaces the current set)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task id (or unique prefix)
        id: String,
    },
    /// Record today's daily update
    AddUpdate {
        /// What you worked on today
        content: String,
        /// Mood: great, good, okay or challenging
        #[arg(long, default_value = "good")]
        mood: Mood,
        /// What you learned
        #[arg(long, default_value = "")]
        learnings: String,
        /// Plan for tomorrow
        #[arg(long, default_value = "")]
        tomorrow: String,
    },
    /// Show today's daily update, if written
    Today,
    /// List all daily updates, newest first
    ListUpdates,
    /// Delete a daily update
    DeleteUpdate {
        /// Update id (or unique prefix)
        id: String,
    },
    /// Show weekly stats and breakdowns
    Stats,
    /// Show achievement progress
    Achievements,
    /// Sign in against the user directory
    Login {
        email: String,
        password: String,
    },
    /// Create an account in the user directory
    Signup {
        name: String,
        email: String,
        password: String,
    },
    /// Forget the signed-in user
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update the signed-in user's profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        /// UI theme preference: light or dark
        #[arg(long)]
        theme: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("{0}")]
    AuthError(#[from] AuthError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
}

/// Resolve a task id given in full or as a unique prefix
fn resolve_task_id(tasks: &TaskStore, needle: &str) -> Option<String> {
    if tasks.get(needle).is_some() {
        return Some(needle.to_string());
    }
    let mut matches = tasks.tasks().iter().filter(|t| t.id.starts_with(needle));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Some(task.id.clone()),
        _ => None,
    }
}

/// Resolve an update id given in full or as a unique prefix
fn resolve_update_id(updates: &DailyUpdateStore, needle: &str) -> Option<String> {
    let mut matches = updates
        .updates()
        .iter()
        .filter(|u| u.id == needle || u.id.starts_with(needle));
    match (matches.next(), matches.next()) {
        (Some(update), None) => Some(update.id.clone()),
        _ => None,
    }
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn split_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| t.split(',').map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

fn validated_date(due: Option<String>) -> Result<Option<String>, CliError> {
    if let Some(due_str) = &due {
        parse_date(due_str).map_err(|e| {
            CliError::DateParseError(format!("Invalid date format '{}': {}", due_str, e))
        })?;
    }
    Ok(due)
}

fn print_task_line(task: &Task) {
    let mut line = format!(
        "  {}  [{}] {}",
        short_id(&task.id),
        task.priority,
        task.title
    );
    if let Some(due) = &task.due_date {
        line.push_str(&format!("  due {}", due));
    }
    if !task.tags.is_empty() {
        let tags: Vec<String> = task.tags.iter().map(|t| format!("#{}", t)).collect();
        line.push_str(&format!("  {}", tags.join(" ")));
    }
    println!("{}", line);
}

/// Handle the add command
#[allow(clippy::too_many_arguments)]
pub fn handle_add_task(
    title: String,
    description: String,
    category: Category,
    priority: Priority,
    status: Status,
    due: Option<String>,
    tags: Option<String>,
    tasks: &mut TaskStore,
) -> Result<(), CliError> {
    let due_date = validated_date(due)?;

    let task = tasks.add(TaskDraft {
        title,
        description,
        category,
        priority,
        status,
        due_date,
        tags: split_tags(tags),
    });
    println!("Task created (id: {})", short_id(&task.id));

    Ok(())
}

/// Handle the list command
pub fn handle_list_tasks(status: Option<Status>, tasks: &TaskStore) -> Result<(), CliError> {
    let columns: Vec<Status> = match status {
        Some(status) => vec![status],
        None => Status::ALL.to_vec(),
    };

    for column in columns {
        let in_column: Vec<&Task> = tasks.by_status(column).collect();
        println!("{} ({})", column, in_column.len());
        for task in in_column {
            print_task_line(task);
        }
    }

    Ok(())
}

/// Handle the move command (status change, the drag-and-drop equivalent)
pub fn handle_move_task(id: String, status: Status, tasks: &mut TaskStore) -> Result<(), CliError> {
    let Some(id) = resolve_task_id(tasks, &id) else {
        println!("No task matches '{}'", id);
        return Ok(());
    };
    tasks.update(
        &id,
        TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        },
    );
    println!("Task {} moved to {}", short_id(&id), status);

    Ok(())
}

/// Handle the edit command
#[allow(clippy::too_many_arguments)]
pub fn handle_edit_task(
    id: String,
    title: Option<String>,
    description: Option<String>,
    category: Option<Category>,
    priority: Option<Priority>,
    due: Option<String>,
    tags: Option<String>,
    tasks: &mut TaskStore,
) -> Result<(), CliError> {
    let Some(id) = resolve_task_id(tasks, &id) else {
        println!("No task matches '{}'", id);
        return Ok(());
    };
    let due_date = validated_date(due)?;

    tasks.update(
        &id,
        TaskPatch {
            title,
            description,
            category,
            priority,
            status: None,
            due_date,
            tags: tags.map(|t| t.split(',').map(|s| s.to_string()).collect()),
        },
    );
    println!("Task {} updated", short_id(&id));

    Ok(())
}

/// Handle the delete command
pub fn handle_delete_task(id: String, tasks: &mut TaskStore) -> Result<(), CliError> {
    let Some(id) = resolve_task_id(tasks, &id) else {
        println!("No task matches '{}'", id);
        return Ok(());
    };
    tasks.delete(&id);
    println!("Task {} deleted", short_id(&id));

    Ok(())
}

/// Handle the add-update command
pub fn handle_add_update(
    content: String,
    mood: Mood,
    learnings: String,
    tomorrow: String,
    updates: &mut DailyUpdateStore,
) -> Result<(), CliError> {
    // One entry per day is a caller-side rule; the store does not enforce it
    if updates.today_entry().is_some() {
        println!("Today's update already exists - delete it first to rewrite it");
        return Ok(());
    }

    let update = updates.add(DailyUpdateDraft {
        date: utils::today_string(),
        task_id: None,
        content,
        mood,
        learnings,
        tomorrow,
    });
    println!("Daily update recorded (id: {})", short_id(&update.id));

    Ok(())
}

/// Handle the today command
pub fn handle_today(updates: &DailyUpdateStore) -> Result<(), CliError> {
    match updates.today_entry() {
        Some(update) => {
            println!("{}  mood: {}", update.date, update.mood);
            println!("  {}", update.content);
            if !update.learnings.is_empty() {
                println!("  learned: {}", update.learnings);
            }
            if !update.tomorrow.is_empty() {
                println!("  tomorrow: {}", update.tomorrow);
            }
        }
        None => println!("No update written today"),
    }

    Ok(())
}

/// Handle the list-updates command
pub fn handle_list_updates(updates: &DailyUpdateStore) -> Result<(), CliError> {
    let mut all: Vec<_> = updates.updates().iter().collect();
    all.sort_by(|a, b| b.date.cmp(&a.date));

    for update in all {
        println!(
            "{}  {}  mood: {}  {}",
            short_id(&update.id),
            update.date,
            update.mood,
            update.content
        );
    }

    Ok(())
}

/// Handle the delete-update command
pub fn handle_delete_update(id: String, updates: &mut DailyUpdateStore) -> Result<(), CliError> {
    let Some(id) = resolve_update_id(updates, &id) else {
        println!("No update matches '{}'", id);
        return Ok(());
    };
    updates.delete(&id);
    println!("Update {} deleted", short_id(&id));

    Ok(())
}

/// Handle the stats command
pub fn handle_stats(tasks: &TaskStore, updates: &DailyUpdateStore) -> Result<(), CliError> {
    let weekly = tasks.weekly_stats();
    println!("Weekly overview");
    println!("  Total tasks:     {}", weekly.total_tasks);
    println!("  Completed:       {}", weekly.completed_tasks);
    println!("  Done this week:  {}", weekly.this_week_completed);
    println!("  Completion rate: {}%", weekly.completion_rate);

    println!("\nTasks by category");
    for slice in stats::count_by_category(tasks.tasks()) {
        println!("  {:<10} {}", slice.category.to_string(), slice.count);
    }

    println!("\nCompletion by priority");
    for slice in stats::completion_by_priority(tasks.tasks()) {
        println!(
            "  {:<10} {}/{}",
            slice.priority.to_string(),
            slice.completed,
            slice.total
        );
    }

    let moods = stats::mood_distribution(updates.updates());
    if !moods.is_empty() {
        println!("\nMood distribution");
        for slice in moods {
            println!("  {:<12} {}", slice.mood.to_string(), slice.count);
        }
    }

    println!(
        "\nDaily updates recorded: {}",
        stats::update_streak(updates.updates())
    );

    let upcoming = stats::upcoming_due_tasks(tasks.tasks(), 3);
    if !upcoming.is_empty() {
        println!("\nUpcoming deadlines");
        for task in upcoming {
            print_task_line(task);
        }
    }

    let recent = stats::recent_open_tasks(tasks.tasks(), 3);
    if !recent.is_empty() {
        println!("\nRecent open tasks");
        for task in recent {
            print_task_line(task);
        }
    }

    Ok(())
}

/// Handle the achievements command
pub fn handle_achievements(
    tasks: &TaskStore,
    updates: &DailyUpdateStore,
) -> Result<(), CliError> {
    let all = achievements::evaluate(tasks.tasks(), updates.updates());
    let unlocked = all.iter().filter(|a| a.unlocked).count();
    println!("Achievements unlocked: {}/{}", unlocked, all.len());

    for achievement in all {
        let mark = if achievement.unlocked { "x" } else { " " };
        println!(
            "  [{}] {} - {} ({}/{})",
            mark, achievement.title, achievement.description, achievement.progress, achievement.max
        );
    }

    Ok(())
}

/// Handle the login command
pub fn handle_login(
    email: String,
    password: String,
    config: &Config,
    session: &Session,
) -> Result<(), CliError> {
    let client = AuthClient::new(config.users_url.clone());
    let user = client.login(&email, &password)?;
    session.save(&user)?;
    println!("Signed in as {} <{}>", user.name, user.email);

    Ok(())
}

/// Handle the signup command
pub fn handle_signup(
    name: String,
    email: String,
    password: String,
    config: &Config,
    session: &Session,
) -> Result<(), CliError> {
    let client = AuthClient::new(config.users_url.clone());
    let user = client.signup(&name, &email, &password)?;
    session.save(&user)?;
    println!("Account created, signed in as {} <{}>", user.name, user.email);

    Ok(())
}

/// Handle the logout command
pub fn handle_logout(session: &Session) -> Result<(), CliError> {
    session.clear()?;
    println!("Signed out");

    Ok(())
}

/// Handle the whoami command
pub fn handle_whoami(session: &Session) -> Result<(), CliError> {
    match session.current() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            if let Some(bio) = &user.bio {
                println!("  {}", bio);
            }
            println!("  theme: {}  joined: {}", user.theme, user.join_date);
        }
        None => println!("Not signed in"),
    }

    Ok(())
}

/// Handle the profile command
pub fn handle_profile(
    name: Option<String>,
    bio: Option<String>,
    avatar: Option<String>,
    theme: Option<String>,
    session: &Session,
) -> Result<(), CliError> {
    let patch = ProfilePatch {
        name,
        avatar,
        bio,
        theme,
    };
    match session.update(patch)? {
        Some(user) => println!("Profile updated for {} <{}>", user.name, user.email),
        None => println!("Not signed in"),
    }

    Ok(())
}
