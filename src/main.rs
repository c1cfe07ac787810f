use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use studyplan::db::Database;
use studyplan::models::{PlanInput, Priority, SubjectInput};
use studyplan::service::PlanService;

#[derive(Parser)]
#[command(name = "studyplan")]
#[command(about = "Exam study-plan generator with local persistence")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and store a new study plan
    Create {
        /// Exam date (YYYY-MM-DD)
        #[arg(long)]
        exam_date: NaiveDate,

        /// Daily study budget in hours
        #[arg(long, default_value = "4")]
        hours_per_day: f64,

        /// Subject as NAME:PRIORITY:HOURS, e.g. "Physics:high:20" (repeatable)
        #[arg(long = "subject", required = true)]
        subjects: Vec<String>,
    },
    /// List stored plans
    List,
    /// Show one plan's schedule
    Show { plan_id: Uuid },
    /// Mark a session as done (or undone with --undo)
    Done {
        plan_id: Uuid,
        item_id: Uuid,
        #[arg(long)]
        undo: bool,
    },
    /// Delete a plan
    Delete { plan_id: Uuid },
    /// Inspect saved chats
    Chats {
        #[command(subcommand)]
        command: ChatCommands,
    },
}

#[derive(Subcommand)]
enum ChatCommands {
    /// List saved chats, most recently updated first
    List,
    /// Show one chat's messages
    Show { chat_id: Uuid },
    /// Delete a chat
    Delete { chat_id: Uuid },
    /// Pin a chat (or unpin with --undo)
    Pin {
        chat_id: Uuid,
        #[arg(long)]
        undo: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "studyplan=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Parse a `NAME:PRIORITY:HOURS` subject argument.
fn parse_subject_arg(raw: &str) -> anyhow::Result<SubjectInput> {
    let parts: Vec<&str> = raw.splitn(3, ':').collect();
    let [name, priority, hours] = parts.as_slice() else {
        anyhow::bail!("expected NAME:PRIORITY:HOURS, got '{raw}'");
    };
    let priority = Priority::from_str(priority)
        .ok_or_else(|| anyhow::anyhow!("unknown priority '{priority}' in '{raw}'"))?;
    let estimated_hours: f64 = hours
        .parse()
        .with_context(|| format!("invalid hours '{hours}' in '{raw}'"))?;
    Ok(SubjectInput {
        name: name.to_string(),
        priority,
        estimated_hours,
    })
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let db = Database::open_default()?;
    db.migrate()?;
    let service = PlanService::new(db.clone());

    match cli.command {
        Commands::Create {
            exam_date,
            hours_per_day,
            subjects,
        } => {
            let subjects = subjects
                .iter()
                .map(|s| parse_subject_arg(s))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let plan = service.create_plan(&PlanInput {
                exam_date,
                hours_per_day,
                subjects,
            })?;

            println!("{}  {}", plan.id, plan.title);
            for subject in &plan.subjects {
                println!(
                    "  {:6} {} ({}h)",
                    subject.priority.as_str(),
                    subject.name,
                    subject.estimated_hours
                );
            }
            println!("  {} sessions scheduled", plan.schedule.len());
        }
        Commands::List => {
            let plans = service.plans();
            if plans.is_empty() {
                println!("No plans stored.");
            }
            for plan in plans {
                println!(
                    "{}  {}  ({} subjects, {} sessions)",
                    plan.id,
                    plan.title,
                    plan.subjects.len(),
                    plan.schedule.len()
                );
            }
        }
        Commands::Show { plan_id } => match service.plan(plan_id) {
            Some(plan) => {
                println!("{} (exam {}, {}h/day)", plan.title, plan.exam_date, plan.total_hours_per_day);
                for item in &plan.schedule {
                    println!(
                        "  [{}] {}  {}  {} — {} ({}h)",
                        if item.completed { "x" } else { " " },
                        item.id,
                        item.date,
                        item.subject,
                        item.topic,
                        item.duration
                    );
                }
            }
            None => println!("Plan {plan_id} not found."),
        },
        Commands::Done {
            plan_id,
            item_id,
            undo,
        } => {
            service.toggle_session(plan_id, item_id, !undo);
        }
        Commands::Delete { plan_id } => {
            if service.remove_plan(plan_id)? {
                println!("Deleted plan {plan_id}.");
            } else {
                println!("Plan {plan_id} not found.");
            }
        }
        Commands::Chats { command } => match command {
            ChatCommands::List => {
                for chat in db.get_all_chats() {
                    println!(
                        "{}{}  {}  ({} messages, updated {})",
                        chat.id,
                        if chat.pinned.unwrap_or(false) { " *" } else { "" },
                        chat.title,
                        chat.messages.len(),
                        chat.updated_at.to_rfc3339()
                    );
                }
            }
            ChatCommands::Show { chat_id } => match db.load_chat(chat_id) {
                Some(chat) => {
                    println!("{}", chat.title);
                    for message in &chat.messages {
                        println!("[{}] {}", message.role.as_str(), message.content);
                    }
                }
                None => println!("Chat {chat_id} not found."),
            },
            ChatCommands::Delete { chat_id } => {
                if db.delete_chat(chat_id)? {
                    println!("Deleted chat {chat_id}.");
                } else {
                    println!("Chat {chat_id} not found.");
                }
            }
            ChatCommands::Pin { chat_id, undo } => {
                db.update_chat_pinned(chat_id, !undo);
            }
        },
    }

    Ok(())
}
