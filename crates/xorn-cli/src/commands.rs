use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::info;
use xorn_sch::{get_color, set_color, AttrState};
use xorn_store::{
    get_added_objects, get_modified_objects, get_removed_objects, ObState, Revision, Selection,
};
use xorn_types::{Double2, ObjectData, ObjectId, ObjectType, SchComponent, SchNet, SchText};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Validate(args) => cmd_validate(args, config),
        Command::Demo(args) => cmd_demo(args, config),
        Command::Config(_) => cmd_config(config),
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
            Ok(text)
        }
    }
}

/// Parse payload fields for `object_type`. Missing fields take their
/// defaults; a `type` key in the input is replaced by `object_type`.
pub fn parse_payload(object_type: ObjectType, json: &str) -> anyhow::Result<ObjectData> {
    let mut value: serde_json::Value = serde_json::from_str(json).context("payload is not JSON")?;
    let fields = value
        .as_object_mut()
        .context("payload must be a JSON object")?;
    fields.insert("type".into(), object_type.as_str().into());
    Ok(serde_json::from_value(value)?)
}

fn cmd_validate(args: ValidateArgs, config: &CliConfig) -> anyhow::Result<()> {
    let object_type = ObjectType::from_str(&args.object_type)?;
    let data = parse_payload(object_type, &read_input(args.input.as_deref())?)?;

    match ObState::create(data) {
        Ok(state) => {
            match config.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(state.data())?),
                OutputFormat::Text => {
                    println!("{} valid {}", "✓".green().bold(), object_type.to_string().cyan());
                    println!("{}", serde_json::to_string_pretty(state.data())?);
                }
            }
            Ok(())
        }
        Err(err) => {
            if config.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "rejected": err.to_string() }));
            } else {
                println!("{} rejected {}: {}", "✗".red().bold(), object_type.to_string().cyan(), err);
            }
            Err(err.into())
        }
    }
}

// ---------------------------------------------------------------------------
// demo
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ObjectRow {
    id: String,
    #[serde(rename = "type")]
    object_type: ObjectType,
    attached_to: Option<String>,
    position: usize,
}

#[derive(Serialize)]
struct RevisionReport {
    name: &'static str,
    transient: bool,
    objects: Vec<ObjectRow>,
}

#[derive(Serialize, Default)]
struct DemoReport {
    revisions: Vec<RevisionReport>,
    rejected: Vec<String>,
    added: Vec<String>,
    removed: Vec<String>,
    modified: Vec<String>,
    color: Option<i32>,
}

struct Labels {
    full: bool,
}

impl Labels {
    fn id(&self, id: &ObjectId) -> String {
        if self.full {
            id.to_string()
        } else {
            id.short_id()
        }
    }

    fn ids(&self, ids: &[ObjectId]) -> Vec<String> {
        ids.iter().map(|id| self.id(id)).collect()
    }
}

fn report_revision(
    labels: &Labels,
    name: &'static str,
    rev: &Revision,
) -> anyhow::Result<RevisionReport> {
    let mut objects = Vec::with_capacity(rev.len());
    for id in rev.get_objects() {
        let (parent, position) = rev.get_object_location(&id)?;
        let object_type = rev
            .get_object_type(&id)
            .context("listed object has no type")?;
        objects.push(ObjectRow {
            id: labels.id(&id),
            object_type,
            attached_to: parent.as_ref().map(|p| labels.id(p)),
            position,
        });
    }
    Ok(RevisionReport {
        name,
        transient: rev.is_transient(),
        objects,
    })
}

/// Build a small component with an attached label, then fork, edit and
/// compare the two revisions.
fn run_demo(labels: &Labels) -> anyhow::Result<DemoReport> {
    let mut report = DemoReport::default();

    let mut base = Revision::new();
    let comp = base.add_object(SchComponent {
        pos: Double2::new(100.0, 200.0),
        selectable: true,
        ..Default::default()
    })?;
    let net = base.add_object(SchNet {
        size: Double2::new(400.0, 0.0),
        color: 4,
        ..Default::default()
    })?;
    let label = base.add_object_at(
        SchText {
            pos: Double2::new(100.0, 250.0),
            text: "refdes=R1".into(),
            text_size: 10,
            ..Default::default()
        },
        Some(comp),
        None,
    )?;
    base.finalize();
    report.revisions.push(report_revision(labels, "base", &base)?);

    let mut edit = Revision::from_parent(&base);
    edit.relocate_object(label, None, Some(net))?;
    let all = Selection::all(&edit);
    set_color(&mut edit, &all, 3)?;
    if let AttrState::Consistent(color) = get_color(&edit, &all) {
        report.color = Some(color);
    }
    edit.delete_object(net)?;
    if let Err(err) = edit.relocate_object(comp, Some(label), None) {
        report.rejected.push(err.to_string());
    }
    if let Err(err) = base.delete_object(comp) {
        report.rejected.push(err.to_string());
    }
    edit.finalize();
    report.revisions.push(report_revision(labels, "edit", &edit)?);

    report.added = labels.ids(&get_added_objects(&base, &edit));
    report.removed = labels.ids(&get_removed_objects(&base, &edit));
    report.modified = labels.ids(&get_modified_objects(&base, &edit));
    info!(
        added = report.added.len(),
        removed = report.removed.len(),
        modified = report.modified.len(),
        "demo session finished"
    );
    Ok(report)
}

fn print_list(title: &str, ids: &[String]) {
    if ids.is_empty() {
        println!("  {title}: {}", "none".dimmed());
    } else {
        println!("  {title}: {}", ids.join(", ").yellow());
    }
}

fn cmd_demo(args: DemoArgs, config: &CliConfig) -> anyhow::Result<()> {
    let labels = Labels { full: args.full_ids };
    let report = run_demo(&labels)?;

    if config.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for rev in &report.revisions {
        let state = if rev.transient { "transient".yellow() } else { "final".green() };
        println!("{} {} ({} objects, {})", "revision".bold(), rev.name.bold(), rev.objects.len(), state);
        for row in &rev.objects {
            let indent = if row.attached_to.is_some() { "    " } else { "  " };
            let parent = row.attached_to.as_deref().unwrap_or("top");
            println!("{indent}{} {:<9} {}[{}]", row.id.yellow(), row.object_type.to_string().cyan(), parent.dimmed(), row.position);
        }
    }
    if let Some(color) = report.color {
        println!("color after bulk edit: {}", color.to_string().bold());
    }
    for reason in &report.rejected {
        println!("{} rejected: {}", "✗".red(), reason);
    }
    println!("{}", "changes base → edit".bold());
    print_list("added", &report.added);
    print_list("removed", &report.removed);
    print_list("modified", &report.modified);
    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config(config: &CliConfig) -> anyhow::Result<()> {
    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => print!("{}", config.to_toml()?),
    }
    Ok(())
}
