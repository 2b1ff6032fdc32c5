// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Snowflake - command line front end.
//!
//! Sets up a project directory, manages the ordered scene list and builds
//! the output documents. Editor integrations drive the same operations
//! through `outline --resolve`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use snowflake::app::{Direction, SnowflakeApp};
use snowflake::config::{Config, ConverterConfig, DEFAULT_CONVERTER, DEFAULT_SUFFIX};
use snowflake::io::builder::CommandConverter;
use snowflake::manager::Group;
use snowflake::models::project::InfoField;
use snowflake::project::Project;
use snowflake::SnowflakeError;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::Command;

#[derive(Parser)]
#[command(name = "snowflake")]
#[command(author, version, about = "Snowflake method writing tool")]
struct Cli {
    /// Project directory
    #[arg(short = 'C', long = "dir", env = "SNOWFLAKE_DIR", default_value = ".")]
    dir: PathBuf,

    /// Converter run as `<converter> <input> <output>` on every built document
    #[arg(long, env = "SNOWFLAKE_CONVERTER", default_value = DEFAULT_CONVERTER)]
    converter: PathBuf,

    /// Suffix of the converter's output files
    #[arg(long, env = "SNOWFLAKE_CONVERTER_SUFFIX", default_value = DEFAULT_SUFFIX)]
    converter_suffix: String,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the project layout and ask for any missing project info
    Init {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        year: Option<String>,
    },

    /// Build the output documents and run the converter on each
    Build,

    /// Re-read scene headers from their files, repairing malformed ones
    Refresh,

    /// Print the outline
    Outline {
        /// Groups to show expanded
        #[arg(long, value_enum)]
        expand: Vec<GroupArg>,
        /// Resolve a 1-based outline line to a group and scene index
        #[arg(long)]
        resolve: Option<usize>,
        #[arg(long)]
        json: bool,
    },

    /// Work on the scene list
    Scene {
        #[command(subcommand)]
        command: SceneCommands,
    },
}

#[derive(Subcommand)]
enum SceneCommands {
    /// Insert a new scene at a position (0-based)
    Add {
        index: usize,
        title: String,
        descr: String,
    },

    /// Move a scene; the target index counts after removal
    Move { from: usize, to: usize },

    /// Open a scene in $EDITOR (or print its path) and pick up header edits
    Edit {
        index: usize,
        #[arg(long, env = "EDITOR")]
        editor: Option<String>,
    },

    /// List scenes in document order
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupArg {
    Summary,
    Scenes,
}

impl From<GroupArg> for Group {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Summary => Group::Summary,
            GroupArg::Scenes => Group::Scenes,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(cli) {
        log::error!("{:#}", err);
        eprintln!("error: {:#}", err);
        let code = err
            .downcast_ref::<SnowflakeError>()
            .map(SnowflakeError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config {
        root: cli.dir,
        converter: ConverterConfig {
            command: cli.converter,
            suffix: cli.converter_suffix,
        },
    };

    match cli.command {
        Commands::Init { name, author, year } => {
            let mut given = vec![
                (InfoField::Name, name),
                (InfoField::Author, author),
                (InfoField::CopyrightYear, year),
            ];
            let project = Project::init(&config.root, |label| {
                let answer = given
                    .iter_mut()
                    .find(|(field, _)| field.prompt() == label)
                    .and_then(|(_, value)| value.take());
                answer.unwrap_or_else(|| prompt_stdin(label))
            })?;
            println!(
                "Initialized {} in {}",
                project.info.name.as_deref().unwrap_or_default(),
                project.root().display()
            );
        }
        Commands::Build => {
            let mut app = open_app(&config)?;
            let converter = CommandConverter::new(config.converter.clone());
            for path in app.build(&converter)? {
                println!("{}", path.display());
            }
        }
        Commands::Refresh => {
            let mut app = open_app(&config)?;
            let report = app.refresh()?;
            for path in &report.repaired {
                println!("repaired {}", path.display());
            }
        }
        Commands::Outline {
            expand,
            resolve,
            json,
        } => {
            let mut app = open_app(&config)?;
            app.refresh()?;
            for group in expand {
                app.outline.set_expanded(group.into(), true);
            }
            match resolve {
                Some(line) => {
                    let position = app.position(line);
                    if json {
                        let value = serde_json::json!({
                            "group": position.group,
                            "header_line": position.header_line,
                            "offset": position.offset,
                            "scene_index": position.scene_index(),
                        });
                        println!("{}", serde_json::to_string_pretty(&value)?);
                    } else {
                        match position.scene_index() {
                            Some(index) => println!("scene {}", index),
                            None => println!("{:?}", position.group),
                        }
                    }
                }
                None if json => println!("{}", serde_json::to_string_pretty(&app.menu_lines())?),
                None => {
                    for line in app.menu_lines() {
                        println!("{}", line);
                    }
                }
            }
        }
        Commands::Scene { command } => scene_command(&config, command)?,
    }

    Ok(())
}

fn scene_command(config: &Config, command: SceneCommands) -> Result<()> {
    let mut app = open_app(config)?;
    // headers may have been edited since the last run
    app.refresh()?;

    match command {
        SceneCommands::Add {
            index,
            title,
            descr,
        } => {
            let scene = app.project.scenes.insert_at(index, &title, &descr)?;
            app.project.save_state()?;
            println!("{}", app.project.path(&scene.filename).display());
        }
        SceneCommands::Move { from, to } => {
            app.project.scenes.move_to(from, to)?;
            app.project.save_state()?;
        }
        SceneCommands::Edit { index, editor } => {
            let Some(path) = app.project.scenes.file_at(index)? else {
                let len = app.project.scenes.len();
                anyhow::bail!(SnowflakeError::IndexOutOfRange { index, len });
            };
            match editor {
                Some(editor) => {
                    let status = Command::new(&editor)
                        .arg(&path)
                        .status()
                        .with_context(|| format!("failed to start editor {}", editor))?;
                    if !status.success() {
                        log::warn!("Editor exited with {}", status);
                    }
                    app.refresh()?;
                }
                None => println!("{}", path.display()),
            }
        }
        SceneCommands::List { json } => {
            let scenes = app.project.scenes.scenes();
            if json {
                println!("{}", serde_json::to_string_pretty(scenes)?);
            } else {
                for (i, scene) in scenes.iter().enumerate() {
                    println!("{:>3}  {}  -  {}", i, scene.title, scene.descr);
                }
            }
        }
    }

    Ok(())
}

fn open_app(config: &Config) -> Result<SnowflakeApp> {
    let project = Project::load(&config.root)
        .with_context(|| format!("cannot open project in {}", config.root.display()))?;
    Ok(SnowflakeApp::new(project))
}

fn prompt_stdin(label: &str) -> String {
    print!("{}", label);
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
        log::warn!("Could not read answer for {:?}: {}", label, e);
    }
    line.trim().to_string()
}
