use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use witw::config::{AppConfig, Cli, Command, ProfileCommand, ThemeMode};
use witw::core::engine::parse_date;
use witw::core::map::{ATTRIBUTION, MapView};
use witw::core::profile::ProfileService;
use witw::core::view::{BoardView, InputField, Notice, Section, ViewSink};
use witw::{ActivityEngine, CurrentUser, Outcome, ProfileForm, ProjectStore, UserRepository};

/// Prints whatever the engine pushes.
struct TerminalView;

impl ViewSink for TerminalView {
    fn show_activities(&mut self, board: BoardView) {
        print_board(&board);
    }

    fn clear_input(&mut self, _field: InputField) {}

    fn navigate(&mut self, section: Section) {
        tracing::debug!(section = section.title(), "navigate");
    }

    fn notify(&mut self, notice: Notice) {
        println!("{notice}");
    }
}

fn print_board(board: &BoardView) {
    if board.activities.is_empty() {
        println!("No hay actividades.");
        return;
    }
    for activity in &board.activities {
        println!("\n[{}] {}", activity.id, activity.name);
        println!("    {} - {} {}", activity.place, activity.date, activity.time);
        if !activity.description.is_empty() {
            println!("    {}", activity.description);
        }
        println!(
            "    {} ({:.0}%)  -> {}",
            activity.seats_label(),
            activity.completion_percent,
            activity.action.label()
        );
        for comment in &activity.comments {
            println!("      {}: {}", comment.author_name, comment.text);
        }
    }
}

fn print_profile(user: &CurrentUser, avatar: Option<std::path::PathBuf>) {
    println!("{} (id {})", user.name, user.id);
    println!("  email: {}", user.email.as_deref().unwrap_or("-"));
    println!("  bio:   {}", user.bio.as_deref().unwrap_or("-"));
    if let Some(path) = avatar {
        println!("  avatar: {}", path.display());
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from(&cli);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = cli.command.unwrap_or(Command::List);

    // The window drives its own runtime.
    #[cfg(feature = "gui")]
    if matches!(command, Command::Gui) {
        return witw::gui::run(config.project_file);
    }

    tokio::runtime::Runtime::new()?.block_on(run(command, &config))
}

async fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let store = ProjectStore::open(&config.project_file).await?;
    tracing::debug!(project = ?store.project_file(), "opened board");

    let engine = ActivityEngine::new(store.clone());
    let profiles = ProfileService::new(store.clone());
    let mut view = TerminalView;

    match command {
        Command::List => {
            let user = store.current_user().await?;
            engine.refresh(&user.identity(), &mut view).await?;
        }
        Command::Attend { activity_id } => {
            let user = store.current_user().await?;
            let outcome = engine
                .toggle_attendance(activity_id, &user.identity(), &mut view)
                .await?;
            if outcome == Outcome::NotFound {
                tracing::info!(activity_id, "no such activity");
            }
        }
        Command::Comment { activity_id, text } => {
            let user = store.current_user().await?;
            engine
                .add_comment(activity_id, &user.identity(), &text, &mut view)
                .await?;
        }
        Command::Create(args) => {
            let user = store.current_user().await?;
            engine
                .create_activity(&args.to_form(), &user.identity(), &mut view)
                .await?;
        }
        Command::Search { query } => {
            let user = store.current_user().await?;
            print_board(&engine.search(&query, &user.identity()).await?);
        }
        Command::Upcoming { from } => {
            let from = match from {
                Some(raw) => parse_date(&raw)
                    .ok_or_else(|| anyhow::anyhow!("Invalid date {raw:?}, expected YYYY-MM-DD"))?,
                None => OffsetDateTime::now_local()
                    .unwrap_or_else(|_| OffsetDateTime::now_utc())
                    .date(),
            };
            let user = store.current_user().await?;
            print_board(&engine.upcoming(from, &user.identity()).await?);
        }
        Command::Profile(ProfileCommand::Show) => {
            let user = profiles.current_user().await?;
            print_profile(&user, profiles.avatar_path(&user));
        }
        Command::Profile(ProfileCommand::Edit {
            name,
            email,
            bio,
            password,
            confirm_password,
        }) => {
            let form = ProfileForm {
                name,
                email,
                bio,
                password,
                confirm_password,
            };
            let user = profiles.save_profile(&form).await?;
            println!("¡Perfil actualizado con éxito!");
            print_profile(&user, profiles.avatar_path(&user));
        }
        Command::Profile(ProfileCommand::Avatar { image_path }) => {
            let user = profiles.set_avatar(&image_path).await?;
            print_profile(&user, profiles.avatar_path(&user));
        }
        Command::Theme { mode } => {
            profiles.set_dark_mode(mode == ThemeMode::Dark).await?;
        }
        Command::Map => {
            let map = MapView::default();
            println!(
                "Centro: {:.5}, {:.5} (zoom {})",
                map.center.lat, map.center.lon, map.zoom
            );
            for marker in &map.markers {
                println!(
                    "  {} ({:.5}, {:.5}): {}",
                    marker.title, marker.position.lat, marker.position.lon, marker.popup
                );
            }
            println!("Teselas: {}", map.tiles);
            println!("{ATTRIBUTION}");
        }
        #[cfg(feature = "gui")]
        Command::Gui => anyhow::bail!("The window cannot be opened from inside a running command"),
    }

    Ok(())
}
