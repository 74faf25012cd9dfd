mod advisor;
mod db;
mod models;
mod scheduler;
mod tui;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use db::Database;
use models::{DaySchedule, JsonOutput, Priority, StudyPlan};

const DEFAULT_DB_NAME: &str = "cramplan.db";

#[derive(Parser)]
#[command(name = "cramplan")]
#[command(about = "Exam study-plan generator with spaced-repetition scheduling")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Manage study topics
    #[command(subcommand)]
    Topic(TopicCommands),

    /// Manage study plans
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Show learning-resource suggestions for a topic
    Resources {
        /// Topic name
        topic: String,

        /// Academic level, e.g. "Class 12 CBSE" or "university"
        #[arg(long, short)]
        level: String,
    },

    /// Launch interactive terminal UI
    Tui,
}

#[derive(Subcommand)]
enum TopicCommands {
    /// List all topics
    List,

    /// Add a new topic
    Add {
        /// Topic name
        name: String,

        /// Priority: high/medium/low
        #[arg(long, short, default_value = "medium")]
        priority: String,

        /// Estimated study hours
        #[arg(long)]
        hours: f64,
    },

    /// Delete a topic
    Delete {
        /// Topic ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Generate a schedule from the stored topics and save it
    Generate {
        /// Exam date (YYYY-MM-DD)
        #[arg(long)]
        exam_date: String,

        /// Available study hours per day
        #[arg(long)]
        daily_hours: f64,

        /// Academic level, e.g. "Class 12 CBSE" or "university"
        #[arg(long, short)]
        level: String,
    },

    /// List saved plans
    List,

    /// Show a saved plan's day-by-day schedule
    Show {
        /// Plan ID
        id: i64,
    },

    /// Delete a saved plan
    Delete {
        /// Plan ID
        id: i64,
    },
}

fn get_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("CRAMPLAN_DB") {
        return PathBuf::from(path);
    }

    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cramplan");

    std::fs::create_dir_all(&config_dir).ok();
    config_dir.join(DEFAULT_DB_NAME)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = get_db_path();
    let mut db = Database::open(&db_path)?;

    match cli.command {
        Commands::Init => {
            db.init()?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
            } else {
                println!("Database initialized at: {}", db_path.display());
            }
        }

        Commands::Topic(topic_cmd) => match topic_cmd {
            TopicCommands::List => {
                let topics = db.list_topics()?;
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&topics))?);
                } else if topics.is_empty() {
                    println!("No topics found.");
                } else {
                    println!("{:<5} {:<40} {:<10} HOURS", "ID", "NAME", "PRIORITY");
                    println!("{}", "-".repeat(65));
                    for topic in topics {
                        println!(
                            "{:<5} {:<40} {:<10} {}",
                            topic.id,
                            truncate(&topic.name, 38),
                            topic.priority.label(),
                            topic.hours
                        );
                    }
                }
            }

            TopicCommands::Add {
                name,
                priority,
                hours,
            } => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err("Topic name cannot be empty".into());
                }
                if hours <= 0.0 {
                    return Err("Topic hours must be greater than zero".into());
                }
                let priority = Priority::from_str(&priority)
                    .ok_or_else(|| format!("Invalid priority '{}'. Use: high, medium, or low", priority))?;

                let id = db.add_topic(&name, priority, hours)?;

                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "id": id,
                            "name": name
                        })))?
                    );
                } else {
                    println!("Added topic '{}' with ID: {}", name, id);
                }
            }

            TopicCommands::Delete { id } => {
                if db.delete_topic(id)? {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                    } else {
                        println!("Topic {} deleted.", id);
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Topic not found"))?
                    );
                } else {
                    println!("Topic not found.");
                }
            }
        },

        Commands::Plan(plan_cmd) => match plan_cmd {
            PlanCommands::Generate {
                exam_date,
                daily_hours,
                level,
            } => {
                if daily_hours <= 0.0 {
                    return Err("Daily hours must be greater than zero".into());
                }
                let exam_date: NaiveDate = exam_date
                    .parse()
                    .map_err(|_| format!("Invalid exam date '{}'. Use YYYY-MM-DD", exam_date))?;

                let topics = db.list_topics()?;
                if topics.is_empty() {
                    return Err("No topics to schedule. Add some with 'cramplan topic add'".into());
                }

                let today = Local::now().date_naive();
                let schedule = match scheduler::build_schedule(today, exam_date, daily_hours, &topics)
                {
                    Ok(s) => s,
                    Err(e) => {
                        if cli.json {
                            println!(
                                "{}",
                                serde_json::to_string(&JsonOutput::<()>::err(e.to_string()))?
                            );
                            return Ok(());
                        }
                        return Err(e.into());
                    }
                };

                let plan_id = db.save_plan(exam_date, daily_hours, &level, &schedule)?;

                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "plan_id": plan_id,
                            "schedule": schedule
                        })))?
                    );
                } else {
                    println!("Saved plan {} ({} days until the exam).", plan_id, schedule.len());
                    println!();
                    print_schedule(&schedule);
                }
            }

            PlanCommands::List => {
                let plans = db.list_plans()?;
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&plans))?);
                } else if plans.is_empty() {
                    println!("No plans found.");
                } else {
                    println!("{:<5} {:<12} {:<8} LEVEL", "ID", "EXAM", "HRS/DAY");
                    println!("{}", "-".repeat(50));
                    for plan in plans {
                        println!(
                            "{:<5} {:<12} {:<8} {}",
                            plan.id,
                            plan.exam_date,
                            plan.daily_hours,
                            truncate(&plan.academic_level, 24)
                        );
                    }
                }
            }

            PlanCommands::Show { id } => {
                let Some(plan) = db.get_plan(id)? else {
                    if cli.json {
                        println!(
                            "{}",
                            serde_json::to_string(&JsonOutput::<()>::err("Plan not found"))?
                        );
                    } else {
                        println!("Plan not found.");
                    }
                    return Ok(());
                };

                let schedule = db.get_schedule(id)?;
                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "plan": plan,
                            "schedule": schedule
                        })))?
                    );
                } else {
                    print_plan_header(&plan);
                    println!();
                    print_schedule(&schedule);
                }
            }

            PlanCommands::Delete { id } => {
                if db.delete_plan(id)? {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                    } else {
                        println!("Plan {} deleted.", id);
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Plan not found"))?
                    );
                } else {
                    println!("Plan not found.");
                }
            }
        },

        Commands::Resources { topic, level } => {
            let bundle = advisor::suggest(&topic, &level);
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&bundle))?);
            } else {
                println!("=== Study Guide for {} ({}) ===", topic, level);
                println!("Category: {}", bundle.category.label());
                println!();
                println!("How to learn:");
                for line in &bundle.how_to_learn {
                    println!("  - {}", line);
                }
                println!();
                println!("Practice ({}):", bundle.practice.amount);
                for line in &bundle.practice.sources {
                    println!("  - {}", line);
                }
                println!();
                println!("Books:");
                for line in &bundle.book_suggestions {
                    println!("  - {}", line);
                }
                println!();
                println!("Key concepts: {}", bundle.key_concepts.join(", "));
                println!();
                println!("Flashcards: make {}. {}", bundle.flashcards.count, bundle.flashcards.tool);
            }
        }

        Commands::Tui => {
            tui::run(db)?;
        }
    }

    Ok(())
}

fn print_plan_header(plan: &StudyPlan) {
    println!("Plan {}", plan.id);
    println!("Exam date: {}", plan.exam_date);
    println!("Daily hours: {}", plan.daily_hours);
    println!("Level: {}", plan.academic_level);
}

fn print_schedule(schedule: &[DaySchedule]) {
    for day in schedule {
        println!(
            "Day {}: {} - {} / {} hours",
            day.day_number, day.date, day.total_scheduled_hours, day.available_hours
        );
        if day.topics.is_empty() {
            println!("  (free day)");
        }
        for topic in &day.topics {
            println!("  {} ({} hours total)", topic.topic_name, topic.total_hours);
            for session in &topic.sessions {
                println!("    {} hour(s) - {}", session.hours, session.kind.label());
            }
        }
        println!();
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
